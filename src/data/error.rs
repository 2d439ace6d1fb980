//! Error types for loading and persisting the question bank.

use thiserror::Error;

/// Errors that can occur while loading the question bank from its source.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be reached or read.
    #[error("failed to fetch quiz data: {0}")]
    Fetch(String),

    /// The source answered with a non-success HTTP status.
    #[error("failed to fetch quiz data (HTTP {0})")]
    Status(u16),

    /// The source returned something that is not a question list.
    #[error("malformed quiz data: {0}")]
    Parse(#[from] serde_json::Error),

    /// The question list parsed but breaks the question bank rules.
    #[error("invalid question bank: {0}")]
    Invalid(String),
}

/// Errors raised by a key-value storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
