//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Criterion catalog failed its integrity check
    #[error("Criterion catalog error: {0}")]
    Catalog(#[from] ach_domain::CriterionError),

    /// Scoring engine rejected the session
    #[error("Scoring error: {0}")]
    Scoring(#[from] ach_domain::ScoringError),

    /// Evaluation service provider could not be created
    #[error("LLM provider error: {0}")]
    Llm(#[from] ach_llm::LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
