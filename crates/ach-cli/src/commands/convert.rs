//! Convert command implementation.

use crate::cli::ConvertArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use ach_domain::{LegacyJudgment, ScaleType};

/// Execute the convert command.
pub fn execute_convert(args: ConvertArgs, formatter: &Formatter) -> Result<()> {
    let judgment = LegacyJudgment::parse(&args.judgment).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "Unknown judgment '{}' (expected supports, contradicts, neutral or not_applicable)",
            args.judgment
        ))
    })?;
    let scale: ScaleType = args.scale.into();
    let value = judgment.to_consistency(scale);

    println!("{}", formatter.format_conversion(judgment, scale, value)?);
    Ok(())
}
