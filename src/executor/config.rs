// Executor configuration
#![allow(dead_code)]

use crate::scanner::ScannerConfig;
use std::path::PathBuf;

/// Executor configuration
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Wall-clock limit for a shell command
    pub command_timeout_secs: u64,
    /// Path to tools.toml configuration file
    pub tools_toml_path: PathBuf,
    /// Shell path for command execution
    pub shell: String,
    pub scanner: ScannerConfig,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            command_timeout_secs: 180,
            tools_toml_path: PathBuf::from("tools.toml"),
            shell: String::from("/bin/sh"),
            scanner: ScannerConfig::default(),
        }
    }
}

impl ExecutorConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let shell = std::env::var("EXECUTOR_SHELL").unwrap_or(defaults.shell);

        let command_timeout_secs = std::env::var("EXECUTOR_COMMAND_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(defaults.command_timeout_secs);

        let tools_toml_path = std::env::var("EXECUTOR_TOOLS_TOML")
            .map(PathBuf::from)
            .unwrap_or(defaults.tools_toml_path);

        Self {
            command_timeout_secs,
            tools_toml_path,
            shell,
            scanner: defaults.scanner,
        }
    }
}
