//! Criteria command implementation.

use crate::error::Result;
use crate::output::Formatter;

/// Execute the criteria command.
pub fn execute_criteria(formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_criteria()?);
    Ok(())
}
