//! Status command implementation.

use crate::commands::build_evaluator;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the status command.
pub async fn execute_status(config: &Config, formatter: &Formatter) -> Result<()> {
    let service = &config.evaluator.service;
    if !service.is_configured() {
        println!(
            "{}",
            formatter.warning("No evaluation service configured; evidence is scored by the keyword heuristic.")
        );
        return Ok(());
    }

    let evaluator = build_evaluator(&config.evaluator, false)?;
    let target = format!("{} (model: {})", service.endpoint, service.model);
    if evaluator.is_service_available().await {
        println!("{}", formatter.success(&format!("Evaluation service reachable at {}", target)));
    } else {
        println!(
            "{}",
            formatter.error(&format!("Evaluation service unreachable at {}", target))
        );
    }

    Ok(())
}
