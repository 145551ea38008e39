mod agent;
mod brain;
mod diff;
mod executor;
mod parser;
mod report;
mod scanner;

use agent::{AgentConfig, Session};
use brain::{Brain, BrainConfig};
use clap::Parser;
use executor::{Executor, ExecutorConfig};
use rustyline::DefaultEditor;
use std::path::PathBuf;
use std::process;
use tracing::{Level, error, info, warn};
use tracing_subscriber::fmt;

const BANNER: &str = r#"
    _ __  _   _  ___| | ___   _
   | '_ \| | | |/ __| |/ / | | |
   | |_) | |_| | (__|   <| |_| |
   | .__/ \__,_|\___|_|\_\\__, |
   |_|                    |___/
"#;

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "pucky")]
#[command(about = "Conversational coding assistant with confirmed local tools")]
struct Args {
    /// Log level for stderr output (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: Level,

    /// Skip the model's introduction at startup
    #[arg(long)]
    no_greeting: bool,

    /// History file path (default: ~/.pucky_history)
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Tool description overrides (default: EXECUTOR_TOOLS_TOML or tools.toml)
    #[arg(long)]
    tools_config: Option<PathBuf>,
}

fn default_history_file() -> PathBuf {
    dirs::home_dir()
        .map(|p| p.join(".pucky_history"))
        .unwrap_or_else(|| PathBuf::from(".pucky_history"))
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    fmt()
        .with_max_level(args.log_level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let brain_config = match BrainConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "failed to load inference configuration");
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let mut agent_config = AgentConfig::from_env();
    if args.no_greeting {
        agent_config.greeting = false;
    }
    let mut executor_config = ExecutorConfig::from_env();
    if let Some(path) = args.tools_config {
        executor_config.tools_toml_path = path;
    }

    info!(
        model = %brain_config.default_model,
        history_window = agent_config.history_window,
        command_timeout_secs = executor_config.command_timeout_secs,
        "configuration loaded"
    );

    let brain = match Brain::new(brain_config) {
        Ok(brain) => brain,
        Err(e) => {
            error!(error = %e, "failed to initialize brain");
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let executor = Executor::init(executor_config);

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error: failed to initialize line editor: {}", e);
            process::exit(1);
        }
    };
    let history_file = args.history_file.unwrap_or_else(default_history_file);
    if history_file.exists()
        && let Err(e) = editor.load_history(&history_file)
    {
        warn!(path = %history_file.display(), error = %e, "failed to load history");
    }

    println!("{}", BANNER);
    println!("Type 'quit' or 'q' to end the conversation, '@help' for local actions.\n");

    {
        let mut session = Session::new(&brain, &executor, &mut editor, agent_config);
        if let Err(e) = session.greet().await {
            eprintln!("Error connecting to the model: {}", e);
            process::exit(1);
        }
        session.run().await;
    }

    if let Err(e) = editor.save_history(&history_file) {
        warn!(path = %history_file.display(), error = %e, "failed to save history");
    }
}
