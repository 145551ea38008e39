// Parser module - extracts tool calls from model responses
#![allow(dead_code)]

pub mod calls;
pub mod types;

pub use calls::{parse_tool_calls, strip_tool_calls};
pub use types::{ToolParams, ToolRequest};
