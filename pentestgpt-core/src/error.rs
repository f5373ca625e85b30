//! Error types for pentestgpt-core

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias using pentestgpt Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for pentestgpt
///
/// Connectivity failures get their own kind so callers can tell a failed
/// upstream probe apart from a failure inside the running session.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Configuration error: {0}")]
    #[diagnostic(code(pentestgpt::config))]
    Config(String),

    #[error("Connection test failed: {0}")]
    #[diagnostic(code(pentestgpt::connection))]
    Connection(String),

    #[error("Provider error: {0}")]
    #[diagnostic(code(pentestgpt::provider))]
    Provider(String),

    #[error("Session error: {0}")]
    #[diagnostic(code(pentestgpt::session))]
    Session(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(pentestgpt::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(pentestgpt::serde))]
    Serde(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error came from the upstream connectivity probe
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Error::Connection(_))
    }
}
