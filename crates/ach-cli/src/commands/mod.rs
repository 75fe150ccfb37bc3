//! Command implementations.

pub mod advise;
pub mod analyze;
pub mod config;
pub mod convert;
pub mod criteria;
pub mod evaluate;
pub mod status;

pub use self::advise::execute_advise;
pub use self::analyze::execute_analyze;
pub use self::config::execute_config;
pub use self::convert::execute_convert;
pub use self::criteria::execute_criteria;
pub use self::evaluate::execute_evaluate;
pub use self::status::execute_status;

use crate::error::Result;
use ach_evaluator::{CriterionEvaluator, EvaluatorConfig};
use ach_llm::OllamaProvider;
use tracing::debug;

/// Build an evaluator for the configured service.
///
/// With `offline` set, or no service configured, the evaluator carries no
/// provider and always answers with the keyword heuristic.
pub fn build_evaluator(
    config: &EvaluatorConfig,
    offline: bool,
) -> Result<CriterionEvaluator<OllamaProvider>> {
    let service = &config.service;
    if offline || !service.is_configured() {
        debug!(offline, "Evaluation service disabled");
        return Ok(CriterionEvaluator::without_provider(config.clone()));
    }

    let mut provider =
        OllamaProvider::new(service.endpoint.as_str(), service.model.as_str(), service.timeout())?;
    if let Some(credential) = &service.credential {
        provider = provider.with_credential(credential.as_str());
    }
    debug!(endpoint = %service.endpoint, model = %service.model, "Evaluation service enabled");

    Ok(CriterionEvaluator::new(provider, config.clone()))
}
