//! ACH CLI library.
//!
//! Command-line front end for the ACH scoring engine: evidence evaluation,
//! session analysis, improvement advice, configuration management and output
//! formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod session;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use session::Session;
