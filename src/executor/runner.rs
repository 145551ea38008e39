// Main Executor implementation
#![allow(dead_code)]

use crate::executor::bash::{BashTool, default_bash_description};
use crate::executor::codebase::{
    ScanCodebaseTool, SearchCodebaseTool, default_scan_description, default_search_description,
};
use crate::executor::config::ExecutorConfig;
use crate::executor::confirm::Confirmer;
use crate::executor::error::{ExecutorError, Result};
use crate::executor::fs::{
    CreateDirectoryTool, DeleteFileTool, ReadFileTool, WriteFileTool,
    default_create_directory_description, default_delete_description, default_read_description,
    default_write_description,
};
use crate::executor::tool::{ToolImpl, load_tool_descriptions, validate_params};
use crate::executor::types::{
    BatchOutcome, ConfirmationDecision, OperationOutcome, ToolDefinition, ToolKind, ToolOutput,
};
use crate::parser::{ToolParams, ToolRequest};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Main executor for tool execution
pub struct Executor {
    tools: RwLock<HashMap<String, Arc<dyn ToolImpl>>>,
}

impl Executor {
    /// Initialize with the built-in tools registered
    pub fn init(config: ExecutorConfig) -> Self {
        debug!(
            timeout_secs = config.command_timeout_secs,
            shell = %config.shell,
            "initializing executor"
        );

        let descriptions = match load_tool_descriptions(&config.tools_toml_path) {
            Ok(descriptions) => descriptions,
            Err(e) => {
                warn!(path = %config.tools_toml_path.display(), error = %e, "ignoring tools config");
                HashMap::new()
            }
        };
        let describe = |kind: ToolKind, default: fn() -> String| {
            descriptions
                .get(kind.as_str())
                .cloned()
                .unwrap_or_else(default)
        };

        let builtin: Vec<Arc<dyn ToolImpl>> = vec![
            Arc::new(ReadFileTool::new(describe(
                ToolKind::ReadFile,
                default_read_description,
            ))),
            Arc::new(WriteFileTool::new(describe(
                ToolKind::WriteFile,
                default_write_description,
            ))),
            Arc::new(DeleteFileTool::new(describe(
                ToolKind::DeleteFile,
                default_delete_description,
            ))),
            Arc::new(CreateDirectoryTool::new(describe(
                ToolKind::CreateDirectory,
                default_create_directory_description,
            ))),
            Arc::new(BashTool::new(
                describe(ToolKind::ExecuteBashCommand, default_bash_description),
                config.shell.clone(),
                config.command_timeout_secs,
            )),
            Arc::new(ScanCodebaseTool::new(
                describe(ToolKind::ScanCodebase, default_scan_description),
                config.scanner.clone(),
            )),
            Arc::new(SearchCodebaseTool::new(
                describe(ToolKind::SearchCodebase, default_search_description),
                config.scanner.clone(),
            )),
        ];

        let tools: HashMap<String, Arc<dyn ToolImpl>> =
            builtin.into_iter().map(|tool| (tool.name(), tool)).collect();

        info!(tool_count = tools.len(), "executor initialized with tools");

        Self {
            tools: RwLock::new(tools),
        }
    }

    fn lookup(&self, name: &str) -> Option<Arc<dyn ToolImpl>> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.get(name).cloned()
    }

    /// Registered tool names in canonical order
    pub fn known_tools(&self) -> Vec<String> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = tools.keys().cloned().collect();
        names.sort_by_key(|name| {
            let rank = ToolKind::parse(name)
                .and_then(|kind| ToolKind::ALL.iter().position(|k| *k == kind))
                .unwrap_or(ToolKind::ALL.len());
            (rank, name.clone())
        });
        names
    }

    /// Tool definitions in canonical order, for the system prompt
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.known_tools()
            .iter()
            .filter_map(|name| self.lookup(name))
            .map(|tool| tool.definition())
            .collect()
    }

    fn resolve(&self, tool_name: &str, params: &ToolParams) -> Result<Arc<dyn ToolImpl>> {
        let tool = self
            .lookup(tool_name)
            .ok_or_else(|| ExecutorError::UnknownTool {
                name: tool_name.to_string(),
                known: self.known_tools().join(", "),
            })?;
        validate_params(&tool.definition(), params)?;
        Ok(tool)
    }

    /// Run a single tool directly, without any confirmation
    pub async fn execute(&self, tool_name: &str, params: &ToolParams) -> Result<ToolOutput> {
        debug!(tool = %tool_name, "looking up tool");
        let tool = self.resolve(tool_name, params)?;

        info!(tool = %tool_name, "executing tool");
        tool.run(params).await
    }

    /// Execute requests strictly in order, asking `confirmer` before every
    /// mutating one. Failures become `Error:` outcomes; an Abort returns the
    /// outcomes gathered so far.
    pub async fn run_batch(
        &self,
        requests: &[ToolRequest],
        confirmer: &mut dyn Confirmer,
    ) -> BatchOutcome {
        let mut batch = BatchOutcome::default();

        for (index, request) in requests.iter().enumerate() {
            let kind = request.kind.as_str();
            let tool = match self.resolve(kind, &request.params) {
                Ok(tool) => tool,
                Err(e) => {
                    warn!(tool = %kind, error = %e, "rejected tool call");
                    batch.outcomes.push(OperationOutcome::error(kind, e));
                    continue;
                }
            };

            if tool.kind().requires_confirmation() {
                let preview = tool.preview(&request.params);
                let decision = confirmer.confirm(&tool.describe(&request.params), preview.as_ref());
                debug!(tool = %kind, decision = ?decision, "confirmation answered");
                match decision {
                    ConfirmationDecision::Proceed => {}
                    ConfirmationDecision::Skip => {
                        batch.outcomes.push(OperationOutcome::skipped(kind));
                        continue;
                    }
                    ConfirmationDecision::Abort => {
                        info!(
                            completed = batch.outcomes.len(),
                            remaining = requests.len() - index,
                            "batch aborted by user"
                        );
                        batch.aborted = true;
                        return batch;
                    }
                }
            }

            if let Some(message) = tool.progress(&request.params) {
                confirmer.announce(&message);
            }

            let start = Instant::now();
            let outcome = match tool.run(&request.params).await {
                Ok(output) => OperationOutcome::from_output(kind, output),
                Err(e) => OperationOutcome::error(kind, e),
            };
            info!(
                tool = %kind,
                duration_ms = start.elapsed().as_millis() as u64,
                is_error = outcome.is_error,
                "tool call finished"
            );
            batch.outcomes.push(outcome);
        }

        batch
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::init(ExecutorConfig::default())
    }
}
