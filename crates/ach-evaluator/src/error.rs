//! Error types for the Evaluator

use ach_domain::CriterionId;
use thiserror::Error;

/// Errors on the service path of an evaluation
///
/// None of these reach callers of `CriterionEvaluator::evaluate`; each one
/// triggers the heuristic fallback.
#[derive(Error, Debug)]
pub enum EvaluatorError {
    /// No usable service is configured
    #[error("Evaluation service is not configured")]
    NotConfigured,

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Service call exceeded the configured timeout
    #[error("Evaluation timeout")]
    Timeout,

    /// Response is not in the expected shape
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    /// Response left out a criterion
    #[error("Missing criterion in response: {0}")]
    MissingCriterion(CriterionId),

    /// Response scored a criterion with a weight it does not offer
    #[error("Illegal weight {weight} for criterion {criterion}")]
    IllegalWeight {
        /// Criterion scored
        criterion: CriterionId,
        /// Weight the service proposed
        weight: i64,
    },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl From<serde_json::Error> for EvaluatorError {
    fn from(e: serde_json::Error) -> Self {
        EvaluatorError::JsonParse(e.to_string())
    }
}
