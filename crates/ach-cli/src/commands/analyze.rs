//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::commands::build_evaluator;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use ach_evaluator::EvaluationRequest;
use tracing::info;

/// Execute the analyze command.
pub async fn execute_analyze(
    args: AnalyzeArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let mut session = Session::load(&args.session)?;
    if let Some(scale) = args.scale {
        session = session.with_scale(scale.into());
    }

    if args.evaluate {
        let evaluator = build_evaluator(&config.evaluator, args.offline)?;
        for evidence in session.unevaluated_mut() {
            let request = EvaluationRequest::new(evidence.item.text.clone())
                .with_source(evidence.item.source.clone());
            let assessment = evaluator.evaluate(&request).await;
            info!(
                evidence = %evidence.label,
                confidence = assessment.confidence.confidence,
                "Evaluated evidence"
            );
            evidence.item.criteria = Some(assessment.evaluation.to_response());
        }
    }

    let analyses = session.analyze()?;
    println!("{}", formatter.format_analysis(&session.hypotheses, &analyses)?);

    Ok(())
}
