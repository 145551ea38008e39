// Interactive chat session

use super::actions::handle_action;
use super::error::{AgentError, Result};
use super::prompt::build_system_prompt;
use super::spinner::Spinner;
use super::types::AgentConfig;
use crate::brain::{Brain, Message, Role};
use crate::executor::{BatchOutcome, ConsoleConfirmer, Executor, LineReader};
use crate::parser::{parse_tool_calls, strip_tool_calls};
use crate::report;
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Text-completion seam between the session and the inference backend
#[async_trait]
pub trait ModelRef: Send + Sync {
    async fn complete(&self, system: &str, history: &[Message]) -> std::result::Result<String, String>;
}

#[async_trait]
impl ModelRef for Brain {
    async fn complete(&self, system: &str, history: &[Message]) -> std::result::Result<String, String> {
        Brain::complete(self, system, history)
            .await
            .map_err(|e| e.to_string())
    }
}

/// What one model turn produced
#[derive(Debug, Clone)]
pub struct TurnReport {
    /// Response with the tool calls removed
    pub text: String,
    pub requested: usize,
    pub batch: BatchOutcome,
}

/// Conversation state plus the collaborators a turn needs
pub struct Session<'a, M: ModelRef + ?Sized, R: LineReader + ?Sized> {
    model: &'a M,
    executor: &'a Executor,
    reader: &'a mut R,
    config: AgentConfig,
    system_prompt: String,
    history: Vec<Message>,
    colored: bool,
    show_spinner: bool,
}

impl<'a, M: ModelRef + ?Sized, R: LineReader + ?Sized> Session<'a, M, R> {
    pub fn new(model: &'a M, executor: &'a Executor, reader: &'a mut R, config: AgentConfig) -> Self {
        let system_prompt = build_system_prompt(&config.identity, &executor.tool_definitions());
        debug!(prompt_chars = system_prompt.len(), "system prompt built");
        Self {
            model,
            executor,
            reader,
            config,
            system_prompt,
            history: Vec::new(),
            colored: console::colors_enabled(),
            show_spinner: true,
        }
    }

    pub fn with_spinner(mut self, enabled: bool) -> Self {
        self.show_spinner = enabled;
        self
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    fn print_response(&self, text: &str) {
        let name = self.config.identity.to_lowercase();
        if self.colored {
            println!("\n{} {}\n", console::style(format!("{}:", name)).cyan().bold(), text);
        } else {
            println!("\n{}: {}\n", name, text);
        }
    }

    async fn ask_model(&self, messages: &[Message]) -> Result<String> {
        let spinner = Spinner::start_with(
            format!("{} is thinking", self.config.identity),
            self.show_spinner && console::Term::stdout().is_term(),
        );
        let result = self.model.complete(&self.system_prompt, messages).await;
        spinner.stop().await;
        result.map_err(AgentError::Model)
    }

    /// Let the model introduce itself; the exchange is not kept in history
    pub async fn greet(&mut self) -> Result<()> {
        if !self.config.greeting {
            return Ok(());
        }
        let greeting = [Message::user_text(self.config.greeting_prompt.clone())];
        let reply = self.ask_model(&greeting).await?;
        self.print_response(&reply);
        Ok(())
    }

    /// Read one message. A trailing `\` continues on the next line; an empty
    /// continuation line ends the message. `None` on end of input.
    pub fn read_input(&mut self) -> Option<String> {
        let mut lines: Vec<String> = Vec::new();
        loop {
            let prompt = if lines.is_empty() { "You: " } else { "... " };
            let line = self.reader.read_line(prompt)?;
            match line.strip_suffix('\\') {
                Some(head) => lines.push(head.trim_end().to_string()),
                None => {
                    lines.push(line);
                    break;
                }
            }
        }

        let input = lines.join("\n").trim().to_string();
        if !input.is_empty() {
            self.reader.remember(&input);
        }
        Some(input)
    }

    /// Run one user message through the model and the executor.
    ///
    /// Returns `None` when the input was a local action. On a model failure
    /// the user message is dropped from the history again.
    pub async fn handle_turn(&mut self, input: &str) -> Result<Option<TurnReport>> {
        if let Some(message) = handle_action(input, &mut self.history) {
            println!("\n{}\n", message);
            return Ok(None);
        }

        self.history.push(Message::user_text(input));
        let start = self.history.len().saturating_sub(self.config.history_window);
        let window = self.history[start..].to_vec();

        let response = match self.ask_model(&window).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "model turn failed");
                if self.history.last().is_some_and(|m| m.role == Role::User) {
                    self.history.pop();
                }
                return Err(e);
            }
        };

        let requests = parse_tool_calls(&response);
        let text = strip_tool_calls(&response);
        if !text.is_empty() {
            self.print_response(&text);
        }

        let executor = self.executor;
        let mut confirmer = ConsoleConfirmer::new(&mut *self.reader, self.colored);
        let batch = executor.run_batch(&requests, &mut confirmer).await;

        if let Some(summary) = report::summary(&batch, requests.len()) {
            println!("\n{}\n", summary);
        }
        info!(
            requested = requests.len(),
            completed = batch.len(),
            aborted = batch.aborted,
            "turn finished"
        );

        self.history
            .push(Message::assistant_text(report::conversation_text(&response, &batch)));

        Ok(Some(TurnReport {
            text,
            requested: requests.len(),
            batch,
        }))
    }

    /// Read and answer messages until `quit`, `q` or end of input
    pub async fn run(&mut self) {
        loop {
            let Some(input) = self.read_input() else {
                println!("\nGoodbye!");
                break;
            };
            if input.is_empty() {
                continue;
            }
            if matches!(input.to_lowercase().as_str(), "quit" | "q") {
                println!("\nGoodbye!");
                break;
            }

            if let Err(e) = self.handle_turn(&input).await {
                println!("\nError: {}\n", e);
            }
        }
    }
}
