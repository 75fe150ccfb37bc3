//! Advise command implementation.

use crate::cli::AdviseArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;
use ach_domain::{suggest_evidence_improvements, CriterionResponse};

/// Execute the advise command.
pub fn execute_advise(args: AdviseArgs, formatter: &Formatter) -> Result<()> {
    let response = criterion_response(&args)?;
    let plan = suggest_evidence_improvements(&response);
    println!("{}", formatter.format_plan(&plan)?);
    Ok(())
}

/// Collect the criterion scores named on the command line or in a session.
fn criterion_response(args: &AdviseArgs) -> Result<CriterionResponse> {
    if let (Some(path), Some(label)) = (&args.session, &args.evidence) {
        let session = Session::load(path)?;
        let evidence = session.evidence(label).ok_or_else(|| {
            CliError::InvalidInput(format!("No evidence labeled '{}'", label))
        })?;
        return evidence.item.criteria.clone().ok_or_else(|| {
            CliError::InvalidInput(format!("Evidence '{}' has no criterion scores", label))
        });
    }

    let mut response = CriterionResponse::new();
    for (criterion, weight) in &args.criteria {
        response.insert(*criterion, *weight)?;
    }
    Ok(response)
}
