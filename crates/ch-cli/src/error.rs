//! CLI error type.

use thiserror::Error;

/// Errors surfaced by the console.
#[derive(Debug, Error)]
pub enum CliError {
    /// The pricing core rejected the inputs or failed.
    #[error("pricing error: {0}")]
    Pricing(#[from] chernoff::core::Error),

    /// Report serialisation failed.
    #[error("serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),
}

/// Shorthand `Result` for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
