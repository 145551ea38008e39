// Agent module - interactive chat session around the executor

pub mod actions;
pub mod config;
pub mod error;
pub mod prompt;
pub mod session;
pub mod spinner;
pub mod types;

pub use error::{AgentError, Result};
pub use session::{ModelRef, Session, TurnReport};
pub use types::AgentConfig;
