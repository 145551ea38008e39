// Data types for Executor module
#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result text recorded when the user declines a single operation
pub const SKIPPED_MESSAGE: &str = "Operation skipped by user.";

/// The operations a model may request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    ReadFile,
    WriteFile,
    DeleteFile,
    CreateDirectory,
    ExecuteBashCommand,
    ScanCodebase,
    SearchCodebase,
}

impl ToolKind {
    /// Canonical order, used for listings and error messages
    pub const ALL: [ToolKind; 7] = [
        ToolKind::ReadFile,
        ToolKind::WriteFile,
        ToolKind::DeleteFile,
        ToolKind::CreateDirectory,
        ToolKind::ExecuteBashCommand,
        ToolKind::ScanCodebase,
        ToolKind::SearchCodebase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::ReadFile => "read_file",
            ToolKind::WriteFile => "write_file",
            ToolKind::DeleteFile => "delete_file",
            ToolKind::CreateDirectory => "create_directory",
            ToolKind::ExecuteBashCommand => "execute_bash_command",
            ToolKind::ScanCodebase => "scan_codebase",
            ToolKind::SearchCodebase => "search_codebase",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Mutating operations need a human decision before they run
    pub fn requires_confirmation(&self) -> bool {
        !matches!(
            self,
            ToolKind::ReadFile | ToolKind::ScanCodebase | ToolKind::SearchCodebase
        )
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named parameter of a tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

impl ParamSpec {
    pub const fn required(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            required: false,
        }
    }
}

/// What the model is told about a tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
}

impl ToolDefinition {
    pub fn required_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(|p| p.required)
    }
}

/// Output from a tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Result text handed back to the model
    pub content: String,
    /// The operation failed (including a non-zero exit code)
    #[serde(default)]
    pub is_error: bool,
}

impl ToolOutput {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}

/// A user's answer at a confirmation point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationDecision {
    Proceed,
    Skip,
    /// Stop the whole batch
    Abort,
}

/// Per-request result of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationOutcome {
    /// Requested kind, verbatim (may be unknown)
    pub kind: String,
    pub result: String,
    pub is_error: bool,
    pub skipped: bool,
}

impl OperationOutcome {
    pub fn from_output(kind: impl Into<String>, output: ToolOutput) -> Self {
        Self {
            kind: kind.into(),
            result: output.content,
            is_error: output.is_error,
            skipped: false,
        }
    }

    pub fn error(kind: impl Into<String>, message: impl fmt::Display) -> Self {
        Self {
            kind: kind.into(),
            result: format!("Error: {}", message),
            is_error: true,
            skipped: false,
        }
    }

    pub fn skipped(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            result: SKIPPED_MESSAGE.to_string(),
            is_error: false,
            skipped: true,
        }
    }
}

/// Everything a batch produced; on abort `outcomes` is shorter than the request list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub outcomes: Vec<OperationOutcome>,
    pub aborted: bool,
}

impl BatchOutcome {
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }
}
