//! ACH Criterion Evaluator
//!
//! Proposes a score and rationale for every SATS criterion from evidence text
//! plus optional source metadata.
//!
//! # Architecture
//!
//! ```text
//! Evidence → PromptBuilder → LlmProvider → strict parser ─┐
//!     │                                                   ├→ CriterionEvaluation → credibility
//!     └──────────── keyword heuristic (fallback) ─────────┘
//! ```
//!
//! The service path is a single call bounded by a timeout. Any failure
//! (no service configured, transport error, timeout, malformed or
//! incomplete JSON, illegal weight) is logged and answered by the
//! deterministic heuristic, so evaluation always succeeds.
//!
//! # Example Usage
//!
//! ```
//! use ach_domain::CriterionId;
//! use ach_evaluator::{CriterionEvaluator, EvaluationRequest, EvaluatorConfig};
//! use ach_llm::MockProvider;
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
//! # rt.block_on(async {
//! // Not configured: the default config names no model
//! let evaluator = CriterionEvaluator::new(MockProvider::default(), EvaluatorConfig::default());
//!
//! let request = EvaluationRequest::new("I personally witnessed the launch.");
//! let assessment = evaluator.evaluate(&request).await;
//!
//! assert_eq!(assessment.evaluation.assessments.len(), 8);
//! // Undated text gets the lowest timeliness option
//! assert_eq!(assessment.evaluation.weight(CriterionId::Timeliness), Some(1));
//! # });
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod evaluator;
mod heuristic;
mod parser;
mod prompt;
mod types;

#[cfg(test)]
mod tests;

pub use config::{EvaluatorConfig, ServiceConfig, DEFAULT_ENDPOINT};
pub use error::EvaluatorError;
pub use evaluator::CriterionEvaluator;
pub use heuristic::evaluate_heuristically;
pub use types::{
    CriterionAssessment, CriterionEvaluation, EvaluationRequest, EvidenceAssessment,
};
