// Codebase scan and search tools
#![allow(dead_code)]

use crate::executor::tool::required_param;
use crate::executor::types::{ParamSpec, ToolDefinition, ToolKind};
use crate::executor::{Result, ToolImpl, ToolOutput};
use crate::parser::ToolParams;
use crate::scanner::{ScannerConfig, scan_codebase, search_codebase};
use async_trait::async_trait;

pub struct ScanCodebaseTool {
    description: String,
    config: ScannerConfig,
}

impl ScanCodebaseTool {
    pub fn new(description: impl Into<String>, config: ScannerConfig) -> Self {
        Self {
            description: description.into(),
            config,
        }
    }
}

#[async_trait]
impl ToolImpl for ScanCodebaseTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description.clone(),
            params: vec![ParamSpec::required(
                "root_path",
                "Directory to scan, usually '.'",
            )],
        }
    }

    fn kind(&self) -> ToolKind {
        ToolKind::ScanCodebase
    }

    fn progress(&self, params: &ToolParams) -> Option<String> {
        Some(format!(
            "Scanning codebase under '{}'",
            params.get("root_path").unwrap_or_default()
        ))
    }

    async fn run(&self, params: &ToolParams) -> Result<ToolOutput> {
        let root_path = required_param(params, "root_path", self.kind())?;
        let report = scan_codebase(root_path, &self.config)?;
        Ok(ToolOutput::success(report.to_string()))
    }
}

pub struct SearchCodebaseTool {
    description: String,
    config: ScannerConfig,
}

impl SearchCodebaseTool {
    pub fn new(description: impl Into<String>, config: ScannerConfig) -> Self {
        Self {
            description: description.into(),
            config,
        }
    }
}

#[async_trait]
impl ToolImpl for SearchCodebaseTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description.clone(),
            params: vec![
                ParamSpec::required("root_path", "Directory to search under"),
                ParamSpec::required("query", "Literal text to look for"),
                ParamSpec::optional("max_results", "Maximum matches to report (default 80)"),
            ],
        }
    }

    fn kind(&self) -> ToolKind {
        ToolKind::SearchCodebase
    }

    fn progress(&self, params: &ToolParams) -> Option<String> {
        Some(format!(
            "Searching for '{}' under '{}'",
            params.get("query").unwrap_or_default(),
            params.get("root_path").unwrap_or_default()
        ))
    }

    async fn run(&self, params: &ToolParams) -> Result<ToolOutput> {
        let root_path = required_param(params, "root_path", self.kind())?;
        let query = required_param(params, "query", self.kind())?;
        let report = search_codebase(root_path, query, params.get("max_results"), &self.config)?;
        Ok(ToolOutput::success(report.to_string()))
    }
}

pub fn default_scan_description() -> String {
    "Summarise a project's layout: directories, key files and file types. \
     Respects .gitignore and skips dependency and cache directories."
        .to_string()
}

pub fn default_search_description() -> String {
    "Search the codebase for a literal text and report matching lines as path:line: text"
        .to_string()
}
