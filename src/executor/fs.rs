// File and directory tools
#![allow(dead_code)]

use crate::diff::{self, DiffPreview};
use crate::executor::tool::required_param;
use crate::executor::types::{ParamSpec, ToolDefinition, ToolKind};
use crate::executor::{Result, ToolImpl, ToolOutput};
use crate::parser::ToolParams;
use async_trait::async_trait;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Whether `path` names an existing regular file; an error message otherwise
async fn check_regular_file(file_path: &str) -> std::result::Result<(), ToolOutput> {
    match fs::metadata(file_path).await {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(ToolOutput::error(format!(
            "Error: '{}' is not a file.",
            file_path
        ))),
        Err(_) => Err(ToolOutput::error(format!(
            "Error: File '{}' does not exist.",
            file_path
        ))),
    }
}

pub struct ReadFileTool {
    description: String,
}

impl ReadFileTool {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

#[async_trait]
impl ToolImpl for ReadFileTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description.clone(),
            params: vec![ParamSpec::required("file_path", "Path of the file to read")],
        }
    }

    fn kind(&self) -> ToolKind {
        ToolKind::ReadFile
    }

    fn progress(&self, params: &ToolParams) -> Option<String> {
        Some(format!(
            "Reading file '{}'",
            params.get("file_path").unwrap_or_default()
        ))
    }

    async fn run(&self, params: &ToolParams) -> Result<ToolOutput> {
        let file_path = required_param(params, "file_path", self.kind())?;
        if let Err(output) = check_regular_file(file_path).await {
            return Ok(output);
        }

        match fs::read_to_string(file_path).await {
            Ok(content) => {
                debug!(path = %file_path, bytes = content.len(), "read file");
                Ok(ToolOutput::success(content))
            }
            Err(e) => Ok(ToolOutput::error(format!("Error reading file: {}", e))),
        }
    }
}

pub struct WriteFileTool {
    description: String,
}

impl WriteFileTool {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

#[async_trait]
impl ToolImpl for WriteFileTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description.clone(),
            params: vec![
                ParamSpec::required("file_path", "Path of the file to write"),
                ParamSpec::required("content", "Full new content of the file"),
            ],
        }
    }

    fn kind(&self) -> ToolKind {
        ToolKind::WriteFile
    }

    fn describe(&self, params: &ToolParams) -> String {
        format!(
            "writing into file '{}'",
            params.get("file_path").unwrap_or_default()
        )
    }

    fn preview(&self, params: &ToolParams) -> Option<DiffPreview> {
        let file_path = params.get("file_path")?;
        let content = params.get("content").unwrap_or_default();
        Some(diff::preview_write(file_path, content))
    }

    fn progress(&self, params: &ToolParams) -> Option<String> {
        Some(format!(
            "Writing file '{}'",
            params.get("file_path").unwrap_or_default()
        ))
    }

    async fn run(&self, params: &ToolParams) -> Result<ToolOutput> {
        let file_path = required_param(params, "file_path", self.kind())?;
        let content = required_param(params, "content", self.kind())?;

        let write = async {
            if let Some(parent) = Path::new(file_path).parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent).await?;
            }
            fs::write(file_path, content).await
        };

        match write.await {
            Ok(()) => {
                debug!(path = %file_path, bytes = content.len(), "wrote file");
                Ok(ToolOutput::success(format!(
                    "Successfully wrote to '{}'",
                    file_path
                )))
            }
            Err(e) => Ok(ToolOutput::error(format!("Error writing file: {}", e))),
        }
    }
}

pub struct DeleteFileTool {
    description: String,
}

impl DeleteFileTool {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

#[async_trait]
impl ToolImpl for DeleteFileTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description.clone(),
            params: vec![ParamSpec::required("file_path", "Path of the file to delete")],
        }
    }

    fn kind(&self) -> ToolKind {
        ToolKind::DeleteFile
    }

    fn describe(&self, params: &ToolParams) -> String {
        format!(
            "deleting file '{}'",
            params.get("file_path").unwrap_or_default()
        )
    }

    async fn run(&self, params: &ToolParams) -> Result<ToolOutput> {
        let file_path = required_param(params, "file_path", self.kind())?;
        if let Err(output) = check_regular_file(file_path).await {
            return Ok(output);
        }

        match fs::remove_file(file_path).await {
            Ok(()) => Ok(ToolOutput::success(format!(
                "Successfully deleted '{}'",
                file_path
            ))),
            Err(e) => Ok(ToolOutput::error(format!("Error deleting file: {}", e))),
        }
    }
}

pub struct CreateDirectoryTool {
    description: String,
}

impl CreateDirectoryTool {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

#[async_trait]
impl ToolImpl for CreateDirectoryTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description.clone(),
            params: vec![ParamSpec::required(
                "dir_path",
                "Directory to create, parents included",
            )],
        }
    }

    fn kind(&self) -> ToolKind {
        ToolKind::CreateDirectory
    }

    fn describe(&self, params: &ToolParams) -> String {
        format!(
            "creating directory '{}'",
            params.get("dir_path").unwrap_or_default()
        )
    }

    async fn run(&self, params: &ToolParams) -> Result<ToolOutput> {
        let dir_path = required_param(params, "dir_path", self.kind())?;

        if let Ok(meta) = fs::metadata(dir_path).await {
            return Ok(if meta.is_dir() {
                ToolOutput::success(format!("Directory '{}' already exists.", dir_path))
            } else {
                ToolOutput::error(format!(
                    "Error: '{}' exists but is not a directory.",
                    dir_path
                ))
            });
        }

        match fs::create_dir_all(dir_path).await {
            Ok(()) => Ok(ToolOutput::success(format!(
                "Successfully created directory '{}'",
                dir_path
            ))),
            Err(e) => Ok(ToolOutput::error(format!(
                "Error creating directory: {}",
                e
            ))),
        }
    }
}

pub fn default_read_description() -> String {
    "Read the contents of a file".to_string()
}

pub fn default_write_description() -> String {
    "Write content to a file, creating parent directories as needed".to_string()
}

pub fn default_delete_description() -> String {
    "Delete a file".to_string()
}

pub fn default_create_directory_description() -> String {
    "Create a directory (and any missing parents)".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn params(pairs: &[(&str, &str)]) -> ToolParams {
        pairs.iter().copied().collect()
    }

    #[tokio::test]
    async fn test_read_file_errors() {
        let dir = tempdir().unwrap();
        let tool = ReadFileTool::new("");

        let missing = dir.path().join("missing.txt");
        let missing = missing.to_str().unwrap();
        let out = tool.run(&params(&[("file_path", missing)])).await.unwrap();
        assert_eq!(out.content, format!("Error: File '{}' does not exist.", missing));
        assert!(out.is_error);

        let dir_path = dir.path().to_str().unwrap();
        let out = tool.run(&params(&[("file_path", dir_path)])).await.unwrap();
        assert_eq!(out.content, format!("Error: '{}' is not a file.", dir_path));
    }

    #[tokio::test]
    async fn test_write_creates_parents_then_read() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("a/b/c.txt");
        let target = target.to_str().unwrap();

        let out = WriteFileTool::new("")
            .run(&params(&[("file_path", target), ("content", "hi\n")]))
            .await
            .unwrap();
        assert_eq!(out.content, format!("Successfully wrote to '{}'", target));

        let out = ReadFileTool::new("")
            .run(&params(&[("file_path", target)]))
            .await
            .unwrap();
        assert_eq!(out.content, "hi\n");
        assert!(!out.is_error);
    }

    #[tokio::test]
    async fn test_delete_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("gone.txt");
        std::fs::write(&target, "x").unwrap();
        let target = target.to_str().unwrap();

        let tool = DeleteFileTool::new("");
        let out = tool.run(&params(&[("file_path", target)])).await.unwrap();
        assert_eq!(out.content, format!("Successfully deleted '{}'", target));
        assert!(!Path::new(target).exists());

        let out = tool.run(&params(&[("file_path", target)])).await.unwrap();
        assert!(out.content.ends_with("does not exist."));
    }

    #[tokio::test]
    async fn test_create_directory_cases() {
        let dir = tempdir().unwrap();
        let tool = CreateDirectoryTool::new("");

        let nested = dir.path().join("x/y");
        let nested = nested.to_str().unwrap();
        let out = tool.run(&params(&[("dir_path", nested)])).await.unwrap();
        assert_eq!(out.content, format!("Successfully created directory '{}'", nested));

        let out = tool.run(&params(&[("dir_path", nested)])).await.unwrap();
        assert_eq!(out.content, format!("Directory '{}' already exists.", nested));
        assert!(!out.is_error);

        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();
        let file = file.to_str().unwrap();
        let out = tool.run(&params(&[("dir_path", file)])).await.unwrap();
        assert_eq!(out.content, format!("Error: '{}' exists but is not a directory.", file));
        assert!(out.is_error);
    }

    #[test]
    fn test_write_preview_and_description() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("new.txt");
        let target = target.to_str().unwrap();
        let tool = WriteFileTool::new("");
        let p = params(&[("file_path", target), ("content", "body")]);

        assert_eq!(tool.describe(&p), format!("writing into file '{}'", target));
        assert!(matches!(tool.preview(&p), Some(DiffPreview::NewFile { .. })));
    }
}
