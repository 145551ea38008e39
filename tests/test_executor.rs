// Integration tests for Executor module
// This file should be run with cargo test --test test_executor

#[path = "../src/diff/mod.rs"]
mod diff;

#[path = "../src/executor/mod.rs"]
mod executor;

#[path = "../src/parser/mod.rs"]
mod parser;

#[path = "../src/scanner/mod.rs"]
mod scanner;

fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    });
}

fn create_executor() -> executor::Executor {
    let config = executor::ExecutorConfig {
        tools_toml_path: std::path::PathBuf::from("/nonexistent/tools.toml"),
        ..Default::default()
    };
    executor::Executor::init(config)
}

fn request(kind: &str, params: &[(&str, &str)]) -> parser::ToolRequest {
    parser::ToolRequest::new(kind, params.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use executor::ConfirmationDecision::{Abort, Proceed, Skip};
    use executor::confirm::ScriptedConfirmer;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    /// Test basic shell command execution
    #[tokio::test]
    async fn test_bash_echo() {
        init_tracing();

        let executor = create_executor();
        let params = [("command", "echo hello")].into_iter().collect();

        let output = executor
            .execute("execute_bash_command", &params)
            .await
            .unwrap();
        assert_eq!(output.content, "[stdout]\nhello");
        assert!(!output.is_error, "Exit code 0 should not be an error");
    }

    /// Test execute from synchronous code
    #[test]
    fn test_bash_multiline_blocking() {
        init_tracing();

        let executor = create_executor();
        let params = [("command", "echo line1 && echo line2")].into_iter().collect();

        let output =
            tokio_test::block_on(executor.execute("execute_bash_command", &params)).unwrap();
        assert_eq!(output.content, "[stdout]\nline1\nline2");
    }

    /// Test unknown tool inside a batch
    #[tokio::test]
    async fn test_unknown_tool_does_not_stop_batch() {
        init_tracing();

        let executor = create_executor();
        let dir = tempdir().unwrap();
        let file = dir.path().join("x.txt");
        fs::write(&file, "x body").unwrap();

        let requests = vec![
            request("rm_rf", &[("path", "/")]),
            request("read_file", &[("file_path", file.to_str().unwrap())]),
        ];
        let mut confirmer = ScriptedConfirmer::default();
        let batch = executor.run_batch(&requests, &mut confirmer).await;

        assert_eq!(batch.len(), 2);
        assert_eq!(
            batch.outcomes[0].result,
            "Error: Unknown tool 'rm_rf'. Known tools: read_file, write_file, delete_file, \
             create_directory, execute_bash_command, scan_codebase, search_codebase"
        );
        assert!(batch.outcomes[0].is_error);
        assert_eq!(batch.outcomes[1].result, "x body");
        assert!(confirmer.asked.is_empty(), "read-only tools are never confirmed");
        assert_eq!(
            confirmer.announced,
            vec![format!("Reading file '{}'", file.display())]
        );
    }

    /// Test missing parameter is reported without prompting
    #[tokio::test]
    async fn test_missing_parameter_skips_prompt() {
        init_tracing();

        let executor = create_executor();
        let requests = vec![request("write_file", &[("file_path", "never.txt")])];
        let mut confirmer = ScriptedConfirmer::new([Proceed]);
        let batch = executor.run_batch(&requests, &mut confirmer).await;

        assert_eq!(
            batch.outcomes[0].result,
            "Error: Missing required parameter 'content' for tool 'write_file'"
        );
        assert!(confirmer.asked.is_empty());
        assert!(!std::path::Path::new("never.txt").exists());
    }

    /// Abort at the Kth confirmation keeps exactly K-1 outcomes
    #[tokio::test]
    async fn test_abort_truncates_batch() {
        init_tracing();

        let executor = create_executor();
        for k in 1..=3usize {
            let dir = tempdir().unwrap();
            let requests: Vec<_> = (0..3)
                .map(|i| {
                    let path = dir.path().join(format!("d{}", i));
                    request("create_directory", &[("dir_path", path.to_str().unwrap())])
                })
                .collect();

            let mut decisions = vec![Proceed; k - 1];
            decisions.push(Abort);
            let mut confirmer = ScriptedConfirmer::new(decisions);
            let batch = executor.run_batch(&requests, &mut confirmer).await;

            assert_eq!(batch.len(), k - 1);
            assert!(batch.aborted);
            assert_eq!(confirmer.asked.len(), k);
            assert!(!dir.path().join(format!("d{}", k - 1)).exists());
        }
    }

    /// Test skip records the fixed message and continues
    #[tokio::test]
    async fn test_skip_continues() {
        init_tracing();

        let executor = create_executor();
        let dir = tempdir().unwrap();
        let target = dir.path().join("keep.txt");
        fs::write(&target, "old\n").unwrap();
        let target = target.to_str().unwrap();

        let requests = vec![
            request("delete_file", &[("file_path", target)]),
            request("write_file", &[("file_path", target), ("content", "new\n")]),
        ];
        let mut confirmer = ScriptedConfirmer::new([Skip, Proceed]);
        let batch = executor.run_batch(&requests, &mut confirmer).await;

        assert!(!batch.aborted);
        assert_eq!(batch.outcomes[0].result, "Operation skipped by user.");
        assert!(batch.outcomes[0].skipped);
        assert_eq!(batch.outcomes[1].result, format!("Successfully wrote to '{}'", target));
        assert_eq!(fs::read_to_string(target).unwrap(), "new\n");
        assert_eq!(
            confirmer.asked,
            vec![
                format!("deleting file '{}'", target),
                format!("writing into file '{}'", target),
            ]
        );
    }

    /// Test write preview is shown before the decision
    #[tokio::test]
    async fn test_write_preview_is_offered() {
        init_tracing();

        let executor = create_executor();
        let dir = tempdir().unwrap();
        let target = dir.path().join("cfg.toml");
        fs::write(&target, "a = 1\nb = 2\n").unwrap();
        let target = target.to_str().unwrap();

        let requests = vec![request(
            "write_file",
            &[("file_path", target), ("content", "a = 1\nb = 3\n")],
        )];
        let mut confirmer = ScriptedConfirmer::new([Skip]);
        executor.run_batch(&requests, &mut confirmer).await;

        assert_eq!(confirmer.previews.len(), 1);
        let preview = &confirmer.previews[0];
        assert_eq!(preview.added(), 1);
        assert_eq!(preview.removed(), 1);
        assert_eq!(fs::read_to_string(target).unwrap(), "a = 1\nb = 2\n");
    }

    /// A command sleeping past the timeout yields a timeout outcome
    #[tokio::test]
    async fn test_command_timeout_outcome() {
        init_tracing();

        let executor = executor::Executor::init(executor::ExecutorConfig {
            command_timeout_secs: 1,
            tools_toml_path: std::path::PathBuf::from("/nonexistent/tools.toml"),
            ..Default::default()
        });
        let requests = vec![request("execute_bash_command", &[("command", "sleep 5")])];
        let mut confirmer = ScriptedConfirmer::new([Proceed]);
        let batch = executor.run_batch(&requests, &mut confirmer).await;

        assert_eq!(batch.outcomes[0].result, "Error: Command timed out after 1 seconds");
        assert!(batch.outcomes[0].is_error);
    }

    /// Test scan errors surface as result text
    #[tokio::test]
    async fn test_scan_missing_root() {
        init_tracing();

        let executor = create_executor();
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let requests = vec![request("scan_codebase", &[("root_path", missing.to_str().unwrap())])];
        let batch = executor
            .run_batch(&requests, &mut ScriptedConfirmer::default())
            .await;

        assert_eq!(
            batch.outcomes[0].result,
            format!("Error: Path '{}' does not exist.", missing.display())
        );
    }

    /// Test tool_definitions and description overrides
    #[tokio::test]
    async fn test_tool_definitions() {
        init_tracing();

        let dir = tempdir().unwrap();
        let toml_path = dir.path().join("tools.toml");
        fs::write(&toml_path, "[read_file]\ndescription = \"Custom reader\"\n").unwrap();
        let executor = executor::Executor::init(executor::ExecutorConfig {
            tools_toml_path: toml_path,
            ..Default::default()
        });

        let defs = executor.tool_definitions();
        let names: Vec<&str> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            executor::ToolKind::ALL
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
        );
        assert_eq!(defs[0].description, "Custom reader");
        assert!(defs.iter().all(|d| !d.description.is_empty()));

        let search = defs.iter().find(|d| d.name == "search_codebase").unwrap();
        let required: Vec<&str> = search.required_params().map(|p| p.name).collect();
        assert_eq!(required, vec!["root_path", "query"]);
    }
}
