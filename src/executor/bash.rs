// Shell command tool implementation
#![allow(dead_code)]

use crate::executor::tool::required_param;
use crate::executor::types::{ParamSpec, ToolDefinition, ToolKind};
use crate::executor::{ExecutorError, Result, ToolImpl, ToolOutput};
use crate::parser::ToolParams;
use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::{debug, info, warn};

pub const NO_OUTPUT_MESSAGE: &str = "Command executed successfully (no output)";

/// Runs `command` through `<shell> -c`
pub struct BashTool {
    description: String,
    shell: String,
    timeout_secs: u64,
}

impl BashTool {
    pub fn new(description: impl Into<String>, shell: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            description: description.into(),
            shell: shell.into(),
            timeout_secs,
        }
    }
}

#[async_trait]
impl ToolImpl for BashTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description.clone(),
            params: vec![ParamSpec::required(
                "command",
                "The shell command to execute",
            )],
        }
    }

    fn kind(&self) -> ToolKind {
        ToolKind::ExecuteBashCommand
    }

    fn describe(&self, params: &ToolParams) -> String {
        format!("executing command: {}", params.get("command").unwrap_or_default())
    }

    fn progress(&self, params: &ToolParams) -> Option<String> {
        Some(format!(
            "Executing command: {}",
            params.get("command").unwrap_or_default()
        ))
    }

    async fn run(&self, params: &ToolParams) -> Result<ToolOutput> {
        let start = Instant::now();
        let command = required_param(params, "command", self.kind())?;

        debug!(command = %command, shell = %self.shell, "executing shell command");

        let child = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExecutorError::SpawnFailed(e.to_string()))?;

        // Dropping the pending wait on timeout kills the child.
        let output = match tokio::time::timeout(
            Duration::from_secs(self.timeout_secs),
            child.wait_with_output(),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => {
                warn!(command = %command, timeout_secs = self.timeout_secs, "command timed out");
                return Err(ExecutorError::Timeout(self.timeout_secs));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let content = format_command_output(output.status, &stdout, &stderr);
        let is_error = !output.status.success();

        info!(
            command = %command.chars().take(100).collect::<String>(),
            duration_ms = start.elapsed().as_millis() as u64,
            exit_code = output.status.code().unwrap_or(-1),
            output_bytes = content.len(),
            is_error = is_error,
            "shell command executed"
        );

        Ok(ToolOutput { content, is_error })
    }
}

/// `Exit code: N` for failures, then the non-empty streams under their labels
fn format_command_output(status: ExitStatus, stdout: &str, stderr: &str) -> String {
    let mut sections = Vec::new();
    match status.code() {
        Some(0) => {}
        Some(code) => sections.push(format!("Exit code: {}", code)),
        None => sections.push("Exit code: none (terminated by signal)".to_string()),
    }
    if !stdout.is_empty() {
        sections.push(format!("[stdout]\n{}", stdout.trim_end()));
    }
    if !stderr.is_empty() {
        sections.push(format!("[stderr]\n{}", stderr.trim_end()));
    }

    if sections.is_empty() {
        NO_OUTPUT_MESSAGE.to_string()
    } else {
        sections.join("\n")
    }
}

/// Default shell tool description
pub fn default_bash_description() -> String {
    "Execute a shell command via /bin/sh -c (useful for running tests, checking errors, \
     fixing bugs). Stdout and stderr are captured separately; a non-zero exit code is reported."
        .to_string()
}
