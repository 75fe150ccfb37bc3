//! Evaluate command implementation.

use crate::cli::EvaluateArgs;
use crate::commands::build_evaluator;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use ach_domain::{suggest_evidence_improvements, SourceMetadata};
use ach_evaluator::EvaluationRequest;
use std::fs;
use std::io::{self, Read};

/// Execute the evaluate command.
pub async fn execute_evaluate(
    args: EvaluateArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let text = if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(file_path) = &args.file {
        fs::read_to_string(file_path)?
    } else if let Some(text) = &args.text {
        text.clone()
    } else {
        return Err(CliError::InvalidInput(
            "Must provide evidence text, --file or --stdin".to_string(),
        ));
    };

    if text.trim().is_empty() {
        return Err(CliError::InvalidInput("Evidence text is empty".to_string()));
    }

    let request = EvaluationRequest::new(text).with_source(SourceMetadata {
        origin: args.origin,
        publication: args.publication,
        date: args.date,
        author: args.author,
        url: args.url,
    });

    let evaluator = build_evaluator(&config.evaluator, args.offline)?;
    let assessment = evaluator.evaluate(&request).await;

    println!("{}", formatter.format_assessment(&assessment)?);

    if args.advise {
        let plan = suggest_evidence_improvements(&assessment.evaluation.to_response());
        println!("{}", formatter.format_plan(&plan)?);
    }

    Ok(())
}
