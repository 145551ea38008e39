// Executor module - turns parsed tool calls into side effects
#![allow(unused_imports)]

pub mod bash;
pub mod codebase;
pub mod config;
pub mod confirm;
pub mod error;
pub mod fs;
pub mod runner;
pub mod tool;
pub mod types;

pub use config::ExecutorConfig;
pub use confirm::{Confirmer, ConsoleConfirmer, LineReader};
pub use error::{ExecutorError, Result};
pub use runner::Executor;
pub use tool::ToolImpl;
pub use types::{
    BatchOutcome, ConfirmationDecision, OperationOutcome, ParamSpec, ToolDefinition, ToolKind,
    ToolOutput,
};
