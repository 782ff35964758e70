//! Error types for daytrace-core

use thiserror::Error;

/// Main error type for the daytrace-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHub(String),

    /// Git integration error
    #[error("git error: {0}")]
    Git(String),

    /// Invalid user-supplied input (dates, hours, file contents)
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for daytrace-core
pub type Result<T> = std::result::Result<T, Error>;
