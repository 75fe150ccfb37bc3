//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use ach_evaluator::{ServiceConfig, DEFAULT_ENDPOINT};
use std::path::Path;

/// Execute the config command.
///
/// `path` is the file named with `--config`, if any.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let mut shown = config.clone();
            if shown.evaluator.service.credential.is_some() {
                shown.evaluator.service.credential = Some("<redacted>".to_string());
            }
            let contents = toml::to_string_pretty(&shown)
                .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
            println!("{}", contents);
        }
        ConfigAction::Init {
            model,
            endpoint,
            force,
        } => {
            let path = match path {
                Some(path) => path.to_path_buf(),
                None => Config::path()?,
            };
            if path.exists() && !force {
                return Err(CliError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }

            let mut fresh = Config::default();
            if let Some(model) = model {
                let endpoint = endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
                fresh.evaluator = fresh
                    .evaluator
                    .with_service(ServiceConfig::new(endpoint, model));
            }
            fresh.save_to(&path)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote configuration to {}", path.display()))
            );
        }
    }

    Ok(())
}
