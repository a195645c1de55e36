//! Error types for the core library.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur in campaign operations.
#[derive(Debug, Error)]
pub enum Error {
    /// SMTP session failed.
    #[error("SMTP error: {0}")]
    Smtp(#[from] mailsalvo_smtp::Error),

    /// Planning failed.
    #[error("planning error: {0}")]
    Plan(#[from] crate::plan::PlanError),

    /// Delivery failed mid-batch.
    #[error(transparent)]
    Dispatch(#[from] crate::dispatch::DispatchError),

    /// Configuration file could not be parsed.
    #[error("configuration parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid.
    #[error("invalid configuration: {}", join_violations(.0))]
    Invalid(Vec<ConfigError>),
}

fn join_violations(violations: &[ConfigError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
