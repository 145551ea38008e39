// Agent errors

use thiserror::Error;

/// Agent errors
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Model request failed: {0}")]
    Model(String),
}

pub type Result<T> = std::result::Result<T, AgentError>;
