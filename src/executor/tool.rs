// Tool trait and shared helpers
#![allow(dead_code)]

use crate::diff::DiffPreview;
use crate::executor::error::{ExecutorError, Result};
use crate::executor::types::{ToolDefinition, ToolKind, ToolOutput};
use crate::parser::ToolParams;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Internal trait for tool implementations
#[async_trait]
pub trait ToolImpl: Send + Sync {
    /// Name, description and parameters shown to the model
    fn definition(&self) -> ToolDefinition;

    fn kind(&self) -> ToolKind;

    /// One-line description used when asking for confirmation
    fn describe(&self, params: &ToolParams) -> String {
        let _ = params;
        format!("running {}", self.kind())
    }

    /// Shown before the confirmation question, if any
    fn preview(&self, params: &ToolParams) -> Option<DiffPreview> {
        let _ = params;
        None
    }

    /// Progress line announced right before the tool runs
    fn progress(&self, params: &ToolParams) -> Option<String> {
        let _ = params;
        None
    }

    /// Run with already validated parameters
    async fn run(&self, params: &ToolParams) -> Result<ToolOutput>;

    /// Get tool name
    fn name(&self) -> String {
        self.kind().as_str().to_string()
    }
}

/// Check that every required parameter is present
pub fn validate_params(definition: &ToolDefinition, params: &ToolParams) -> Result<()> {
    match definition
        .required_params()
        .find(|spec| params.get(spec.name).is_none())
    {
        Some(spec) => Err(ExecutorError::MissingParameter {
            param: spec.name.to_string(),
            tool: definition.name.clone(),
        }),
        None => Ok(()),
    }
}

/// Fetch a parameter that validation guarantees is present
pub fn required_param<'a>(params: &'a ToolParams, name: &str, tool: ToolKind) -> Result<&'a str> {
    params
        .get(name)
        .ok_or_else(|| ExecutorError::MissingParameter {
            param: name.to_string(),
            tool: tool.to_string(),
        })
}

#[derive(Debug, Deserialize)]
struct ToolEntry {
    description: Option<String>,
}

/// Load tool description overrides from a TOML file of `[tool_name]` tables
pub fn load_tool_descriptions(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        debug!(path = %path.display(), "tools.toml not found, using default descriptions");
        return Ok(HashMap::new());
    }

    let content = std::fs::read_to_string(path)?;
    let entries: HashMap<String, ToolEntry> = toml::from_str(&content)?;

    let descriptions: HashMap<String, String> = entries
        .into_iter()
        .filter_map(|(name, entry)| entry.description.map(|desc| (name, desc)))
        .collect();

    debug!(path = %path.display(), tool_count = descriptions.len(), "loaded tool descriptions from config");
    Ok(descriptions)
}
