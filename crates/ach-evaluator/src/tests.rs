//! Integration tests for the Evaluator

#[cfg(test)]
mod tests {
    use crate::parser::tests::valid_response;
    use crate::prompt::PromptBuilder;
    use crate::{
        evaluate_heuristically, CriterionEvaluation, CriterionEvaluator, EvaluationRequest,
        EvaluatorConfig, ServiceConfig,
    };
    use ach_domain::traits::LlmProvider;
    use ach_domain::{CriterionId, SourceMetadata};
    use ach_llm::{LlmError, MockProvider};
    use chrono::{TimeZone, Utc};
    use std::future::Future;
    use std::time::Duration;

    fn configured() -> EvaluatorConfig {
        EvaluatorConfig::default()
            .with_service(ServiceConfig::new("http://mock", "mock-model").with_timeout_secs(1))
    }

    fn witness_request() -> EvaluationRequest {
        EvaluationRequest::new("I personally witnessed this, confirmed by two independent journalists")
    }

    /// What the keyword fallback gives for the witness request
    fn witness_fallback() -> CriterionEvaluation {
        evaluate_heuristically(&witness_request(), Utc::now())
    }

    fn all_weights(evaluation: &CriterionEvaluation, weight: i32) -> bool {
        evaluation.assessments.len() == 8 && evaluation.assessments.iter().all(|a| a.weight == weight)
    }

    /// Provider that answers only after a long delay
    struct SlowProvider;

    impl LlmProvider for SlowProvider {
        type Error = LlmError;

        fn generate(&self, _prompt: &str) -> impl Future<Output = Result<String, LlmError>> + Send {
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(valid_response(5).to_string())
            }
        }

        fn generate_structured(
            &self,
            prompt: &str,
            _schema: &str,
        ) -> impl Future<Output = Result<String, LlmError>> + Send {
            self.generate(prompt)
        }

        fn is_available(&self) -> impl Future<Output = bool> + Send {
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                true
            }
        }
    }

    #[tokio::test]
    async fn test_service_evaluation_used_when_valid() {
        let llm = MockProvider::new(valid_response(8).to_string());
        let evaluator = CriterionEvaluator::new(llm.clone(), configured());

        let assessment = evaluator.evaluate(&witness_request()).await;

        assert!(all_weights(&assessment.evaluation, 8));
        assert_eq!(assessment.evaluation.recommendations, vec!["Find a second source"]);
        assert_eq!(assessment.confidence.confidence, 8);
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fenced_service_response_accepted() {
        let llm = MockProvider::new(format!("```json\n{}\n```", valid_response(5)));
        let evaluator = CriterionEvaluator::new(llm, configured());

        let assessment = evaluator.evaluate(&witness_request()).await;
        assert!(all_weights(&assessment.evaluation, 5));
    }

    #[tokio::test]
    async fn test_invalid_json_falls_back() {
        let llm = MockProvider::new("This is not JSON");
        let evaluator = CriterionEvaluator::new(llm.clone(), configured());

        let assessment = evaluator.evaluate(&witness_request()).await;

        assert_eq!(assessment.evaluation, witness_fallback());
        assert_eq!(assessment.evaluation.weight(CriterionId::SourceType), Some(13));
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_illegal_weight_falls_back() {
        let mut response = valid_response(5);
        response["timeliness"]["score"] = serde_json::json!(7);
        let llm = MockProvider::new(response.to_string());
        let evaluator = CriterionEvaluator::new(llm.clone(), configured());

        let assessment = evaluator.evaluate(&witness_request()).await;
        assert_eq!(assessment.evaluation, witness_fallback());
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_provider_error_falls_back() {
        let request = witness_request();
        let prompt = PromptBuilder::new(&request.text, &request.source).build();

        let mut llm = MockProvider::new(valid_response(5).to_string());
        llm.add_error(prompt);
        let evaluator = CriterionEvaluator::new(llm.clone(), configured());

        let assessment = evaluator.evaluate(&request).await;
        assert_eq!(assessment.evaluation, witness_fallback());
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_timeout_falls_back_without_retry() {
        let evaluator = CriterionEvaluator::new(SlowProvider, configured());

        let started = std::time::Instant::now();
        let assessment = evaluator.evaluate(&witness_request()).await;

        assert_eq!(assessment.evaluation, witness_fallback());
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_unconfigured_service_never_called() {
        let llm = MockProvider::new(valid_response(13).to_string());
        let evaluator = CriterionEvaluator::new(llm.clone(), EvaluatorConfig::default());

        let assessment = evaluator.evaluate(&witness_request()).await;

        assert_eq!(assessment.evaluation, witness_fallback());
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_without_provider_uses_heuristic() {
        let evaluator = CriterionEvaluator::<MockProvider>::without_provider(configured());
        let assessment = evaluator.evaluate(&witness_request()).await;
        assert_eq!(assessment.evaluation, witness_fallback());
        assert!(!evaluator.is_service_available().await);
    }

    #[tokio::test]
    async fn test_long_text_is_truncated_for_the_service() {
        let mut config = configured();
        config.max_text_length = 10;

        let request = EvaluationRequest::new("0123456789 and a lot more text after the limit");
        let truncated_prompt = PromptBuilder::new("0123456789", &request.source).build();

        // Only the truncated prompt gets a valid answer
        let mut llm = MockProvider::new("not json");
        llm.add_response(truncated_prompt, valid_response(5).to_string());
        let evaluator = CriterionEvaluator::new(llm.clone(), config);

        let assessment = evaluator.evaluate(&request).await;
        assert!(all_weights(&assessment.evaluation, 5));
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_evaluate_at_fixes_timeliness() {
        let evaluator = CriterionEvaluator::<MockProvider>::without_provider(EvaluatorConfig::default());
        let request = EvaluationRequest::new("Port records show the vessel docked.").with_source(SourceMetadata {
            date: Some("2024-03-01".to_string()),
            ..Default::default()
        });

        let now = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        let assessment = evaluator.evaluate_at(&request, now).await;
        assert_eq!(assessment.evaluation.weight(CriterionId::Timeliness), Some(13));

        let later = Utc.with_ymd_and_hms(2026, 3, 5, 0, 0, 0).unwrap();
        let assessment = evaluator.evaluate_at(&request, later).await;
        assert_eq!(assessment.evaluation.weight(CriterionId::Timeliness), Some(3));
    }

    #[tokio::test]
    async fn test_service_availability_probe() {
        let llm = MockProvider::default();
        let evaluator = CriterionEvaluator::new(llm.clone(), configured());
        assert!(evaluator.is_service_available().await);

        llm.set_available(false);
        assert!(!evaluator.is_service_available().await);

        let unconfigured = CriterionEvaluator::new(MockProvider::default(), EvaluatorConfig::default());
        assert!(!unconfigured.is_service_available().await);
    }

    #[tokio::test]
    async fn test_slow_probe_reports_unavailable() {
        let evaluator = CriterionEvaluator::new(SlowProvider, configured());
        assert!(!evaluator.is_service_available().await);
    }
}
