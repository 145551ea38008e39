//! Pucky tools tester
//!
//! Runs each tool directly through the executor, without the model or the
//! confirmation flow, so the file, shell and codebase operations can be
//! tried by hand.

#[path = "../diff/mod.rs"]
mod diff;
#[path = "../executor/mod.rs"]
mod executor;
#[path = "../parser/mod.rs"]
mod parser;
#[path = "../scanner/mod.rs"]
mod scanner;

use clap::Parser;
use executor::{Executor, ExecutorConfig, LineReader, ToolKind};
use parser::ToolParams;
use rustyline::DefaultEditor;
use std::process;
use tracing::Level;
use tracing_subscriber::fmt;

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "pucky-tools")]
#[command(about = "Interactive tester for pucky's tools")]
struct Args {
    /// Log level for stderr output
    #[arg(long, default_value = "warn")]
    log_level: Level,
}

const MENU: [(&str, ToolKind); 7] = [
    ("Read file", ToolKind::ReadFile),
    ("Write file", ToolKind::WriteFile),
    ("Delete file", ToolKind::DeleteFile),
    ("Create directory", ToolKind::CreateDirectory),
    ("Execute shell command", ToolKind::ExecuteBashCommand),
    ("Scan codebase", ToolKind::ScanCodebase),
    ("Search codebase", ToolKind::SearchCodebase),
];

fn print_menu() {
    let rule = "=".repeat(60);
    println!("\n{}\nPucky Tools Tester\n{}", rule, rule);
    for (i, (label, _)) in MENU.iter().enumerate() {
        println!("{}. {}", i + 1, label);
    }
    println!("0. Quit\n{}", rule);
}

/// Prompt for one value; end of input leaves the program
fn ask<R: LineReader>(reader: &mut R, prompt: &str) -> String {
    match reader.read_line(&format!("{}: ", prompt)) {
        Some(line) => line.trim().to_string(),
        None => {
            println!("\nExiting...");
            process::exit(0);
        }
    }
}

/// Lines until one reads exactly `EOF` (or input ends)
fn ask_content<R: LineReader>(reader: &mut R) -> String {
    println!("Enter content (type 'EOF' on a new line to finish):");
    let mut lines = Vec::new();
    while let Some(line) = reader.read_line("") {
        if line == "EOF" {
            break;
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Collect parameters for `kind`; `None` when the user gave up
fn collect_params<R: LineReader>(reader: &mut R, kind: ToolKind) -> Option<ToolParams> {
    let mut params = ToolParams::new();
    match kind {
        ToolKind::ReadFile | ToolKind::WriteFile | ToolKind::DeleteFile => {
            let path = ask(reader, "Enter file path");
            if path.is_empty() {
                println!("Error: File path cannot be empty");
                return None;
            }
            if kind == ToolKind::WriteFile {
                params.insert("content", ask_content(reader));
            }
            if kind == ToolKind::DeleteFile {
                let answer = ask(reader, &format!("Are you sure you want to delete '{}'? (yes/no)", path));
                if !matches!(answer.to_lowercase().as_str(), "y" | "yes") {
                    println!("Cancelled.");
                    return None;
                }
            }
            params.insert("file_path", path);
        }
        ToolKind::CreateDirectory => {
            let path = ask(reader, "Enter directory path");
            if path.is_empty() {
                println!("Error: Directory path cannot be empty");
                return None;
            }
            params.insert("dir_path", path);
        }
        ToolKind::ExecuteBashCommand => {
            let command = ask(reader, "Enter shell command");
            if command.is_empty() {
                println!("Error: Command cannot be empty");
                return None;
            }
            params.insert("command", command);
        }
        ToolKind::ScanCodebase => {
            let root = ask(reader, "Enter root path (default: '.')");
            params.insert("root_path", if root.is_empty() { ".".to_string() } else { root });
        }
        ToolKind::SearchCodebase => {
            let root = ask(reader, "Enter root path (default: '.')");
            params.insert("root_path", if root.is_empty() { ".".to_string() } else { root });
            let query = ask(reader, "Enter search query");
            if query.is_empty() {
                println!("Error: Query cannot be empty");
                return None;
            }
            params.insert("query", query);
            let max_results = ask(reader, "Enter max results (default: 80)");
            if !max_results.is_empty() {
                params.insert("max_results", max_results);
            }
        }
    }
    Some(params)
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    let executor = Executor::init(ExecutorConfig::from_env());
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error: failed to initialize line editor: {}", e);
            process::exit(1);
        }
    };

    println!("\nWelcome to Pucky Tools Tester!");
    println!("Select a tool to test from the menu below.");

    loop {
        print_menu();
        let choice = ask(&mut editor, "\nSelect an option (0-7)");
        if choice == "0" {
            println!("\nGoodbye!");
            break;
        }

        let selected = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| MENU.get(i));
        let Some((label, kind)) = selected else {
            println!("\nInvalid choice: '{}'. Please select 0-7.", choice);
            continue;
        };

        if let Some(params) = collect_params(&mut editor, *kind) {
            println!("\n{}...", label);
            match executor.execute(kind.as_str(), &params).await {
                Ok(output) => println!("{}", output.content),
                Err(e) => println!("Error: {}", e),
            }
        }

        let next = ask(&mut editor, "\nPress Enter to continue or 'q' to quit");
        if matches!(next.to_lowercase().as_str(), "q" | "quit") {
            println!("\nGoodbye!");
            break;
        }
    }
}
