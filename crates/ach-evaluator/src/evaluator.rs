//! Core Evaluator implementation

use crate::config::EvaluatorConfig;
use crate::error::EvaluatorError;
use crate::heuristic::evaluate_heuristically;
use crate::parser::parse_evaluation_response;
use crate::prompt::{response_schema, PromptBuilder};
use crate::types::{CriterionEvaluation, EvaluationRequest, EvidenceAssessment};
use ach_domain::traits::LlmProvider;
use chrono::{DateTime, Utc};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Proposes criterion scores for evidence text
///
/// Tries the configured evaluation service first and falls back to a
/// deterministic keyword heuristic whenever the service is missing, slow,
/// failing, or returns anything other than a complete, legal evaluation.
/// Evaluation itself never fails.
pub struct CriterionEvaluator<L>
where
    L: LlmProvider,
{
    llm_provider: Option<L>,
    config: EvaluatorConfig,
}

impl<L> CriterionEvaluator<L>
where
    L: LlmProvider + Send + Sync,
    L::Error: std::fmt::Display,
{
    /// Create an evaluator backed by `llm_provider`
    ///
    /// The provider is only used while `config.service` is configured.
    pub fn new(llm_provider: L, config: EvaluatorConfig) -> Self {
        Self {
            llm_provider: Some(llm_provider),
            config,
        }
    }

    /// Create an evaluator that always uses the heuristic fallback
    pub fn without_provider(config: EvaluatorConfig) -> Self {
        Self {
            llm_provider: None,
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    fn active_provider(&self) -> Option<&L> {
        self.llm_provider
            .as_ref()
            .filter(|_| self.config.service.is_configured())
    }

    /// Evaluate evidence as of the current time
    pub async fn evaluate(&self, request: &EvaluationRequest) -> EvidenceAssessment {
        self.evaluate_at(request, Utc::now()).await
    }

    /// Evaluate evidence as of `now`
    pub async fn evaluate_at(&self, request: &EvaluationRequest, now: DateTime<Utc>) -> EvidenceAssessment {
        info!(
            "Starting criterion evaluation, text length {}",
            request.text.chars().count()
        );

        let (evaluation, path) = match self.evaluate_with_service(request).await {
            Ok(evaluation) => (evaluation, "service"),
            Err(EvaluatorError::NotConfigured) => {
                debug!("No evaluation service configured, using heuristic evaluation");
                (evaluate_heuristically(request, now), "heuristic")
            }
            Err(e) => {
                warn!("Automated evaluation failed, using heuristic evaluation: {}", e);
                (evaluate_heuristically(request, now), "heuristic")
            }
        };

        let assessment = EvidenceAssessment::from_evaluation(evaluation);

        info!(
            "Evaluation complete via {}: confidence {} ({}), rating {}",
            path,
            assessment.confidence.confidence,
            assessment.confidence.level.as_str(),
            assessment.rating.letter.as_char()
        );

        assessment
    }

    /// Run the service path only
    async fn evaluate_with_service(
        &self,
        request: &EvaluationRequest,
    ) -> Result<CriterionEvaluation, EvaluatorError> {
        let provider = self.active_provider().ok_or(EvaluatorError::NotConfigured)?;

        let text = truncate(&request.text, self.config.max_text_length);
        if text.len() < request.text.len() {
            debug!(
                "Evidence text truncated to {} chars for the service",
                self.config.max_text_length
            );
        }

        let prompt = PromptBuilder::new(text, &request.source).build();
        let schema = response_schema().to_string();

        debug!("Prompt length: {} chars", prompt.len());

        let response = timeout(
            self.config.service.timeout(),
            provider.generate_structured(&prompt, &schema),
        )
        .await
        .map_err(|_| EvaluatorError::Timeout)?
        .map_err(|e| EvaluatorError::Llm(e.to_string()))?;

        debug!("LLM response length: {} chars", response.len());

        parse_evaluation_response(&response)
    }

    /// Whether the evaluation service answers a minimal round trip
    ///
    /// False when no service is configured. The probe is bounded by the
    /// configured timeout and never errors.
    pub async fn is_service_available(&self) -> bool {
        let Some(provider) = self.active_provider() else {
            return false;
        };

        let available = timeout(self.config.service.timeout(), provider.is_available())
            .await
            .unwrap_or(false);

        debug!("Evaluation service available: {}", available);
        available
    }
}

/// Cut `text` to at most `max_chars` characters
fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
