// Error types for Scanner module

use thiserror::Error;

/// Scanner error types
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Path '{0}' does not exist.")]
    NotFound(String),

    #[error("Path '{0}' is not a directory.")]
    NotADirectory(String),

    #[error("'query' parameter must be a non-empty string.")]
    EmptyQuery,
}

pub type Result<T> = std::result::Result<T, ScanError>;
