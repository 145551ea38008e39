// Error types for Executor module
#![allow(dead_code)]

use crate::scanner::ScanError;
use thiserror::Error;

/// Executor error types
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("Unknown tool '{name}'. Known tools: {known}")]
    UnknownTool { name: String, known: String },

    #[error("Missing required parameter '{param}' for tool '{tool}'")]
    MissingParameter { param: String, tool: String },

    #[error("Failed to start command: {0}")]
    SpawnFailed(String),

    #[error("Command timed out after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error(transparent)]
    Scan(#[from] ScanError),
}

pub type Result<T> = std::result::Result<T, ExecutorError>;
