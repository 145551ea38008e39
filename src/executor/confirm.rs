// Confirmation source for mutating operations
#![allow(dead_code)]

use crate::diff::DiffPreview;
use crate::executor::types::ConfirmationDecision;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::warn;

/// Answers confirmation questions and receives progress lines
pub trait Confirmer {
    /// Ask whether to go ahead with `description`, showing `preview` first
    fn confirm(&mut self, description: &str, preview: Option<&DiffPreview>) -> ConfirmationDecision;

    fn announce(&mut self, message: &str) {
        println!("  {}", message);
    }
}

/// Line-oriented input. `None` means end of input or an interrupt.
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> Option<String>;

    /// Record an entered line in the input history, if there is one
    fn remember(&mut self, line: &str) {
        let _ = line;
    }
}

impl LineReader for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        match self.readline(prompt) {
            Ok(line) => Some(line),
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => None,
            Err(e) => {
                warn!(error = %e, "failed to read input");
                None
            }
        }
    }

    fn remember(&mut self, line: &str) {
        if let Err(e) = self.add_history_entry(line) {
            warn!(error = %e, "failed to record history entry");
        }
    }
}

/// `y`/`yes`, `n`/`no`, `q`/`quit`, case-insensitive
pub fn parse_decision(input: &str) -> Option<ConfirmationDecision> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(ConfirmationDecision::Proceed),
        "n" | "no" => Some(ConfirmationDecision::Skip),
        "q" | "quit" => Some(ConfirmationDecision::Abort),
        _ => None,
    }
}

/// Interactive confirmer that keeps asking until it gets a valid answer
pub struct ConsoleConfirmer<'a, R: LineReader + ?Sized> {
    reader: &'a mut R,
    colored: bool,
}

impl<'a, R: LineReader + ?Sized> ConsoleConfirmer<'a, R> {
    pub fn new(reader: &'a mut R, colored: bool) -> Self {
        Self { reader, colored }
    }
}

impl<R: LineReader + ?Sized> Confirmer for ConsoleConfirmer<'_, R> {
    fn confirm(&mut self, description: &str, preview: Option<&DiffPreview>) -> ConfirmationDecision {
        println!("\n  About to {}", description);
        if let Some(preview) = preview {
            for line in preview.render(self.colored).lines() {
                println!("    {}", line);
            }
        }

        loop {
            let Some(answer) = self.reader.read_line("  Proceed? [y]es / [n]o / [q]uit: ") else {
                println!();
                return ConfirmationDecision::Abort;
            };
            match parse_decision(&answer) {
                Some(decision) => return decision,
                None => println!("  Please answer 'y', 'n' or 'q'."),
            }
        }
    }
}

/// Replays a fixed list of answers; runs out as Abort
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedConfirmer {
    decisions: std::collections::VecDeque<ConfirmationDecision>,
    pub asked: Vec<String>,
    pub previews: Vec<DiffPreview>,
    pub announced: Vec<String>,
}

#[cfg(test)]
impl ScriptedConfirmer {
    pub fn new(decisions: impl IntoIterator<Item = ConfirmationDecision>) -> Self {
        Self {
            decisions: decisions.into_iter().collect(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl Confirmer for ScriptedConfirmer {
    fn confirm(&mut self, description: &str, preview: Option<&DiffPreview>) -> ConfirmationDecision {
        self.asked.push(description.to_string());
        self.previews.extend(preview.cloned());
        self.decisions
            .pop_front()
            .unwrap_or(ConfirmationDecision::Abort)
    }

    fn announce(&mut self, message: &str) {
        self.announced.push(message.to_string());
    }
}

/// Replays fixed input lines; runs out as end of input
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedReader {
    lines: std::collections::VecDeque<String>,
    pub prompts: Vec<String>,
    pub remembered: Vec<String>,
}

#[cfg(test)]
impl ScriptedReader {
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl LineReader for ScriptedReader {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.prompts.push(prompt.to_string());
        self.lines.pop_front()
    }

    fn remember(&mut self, line: &str) {
        self.remembered.push(line.to_string());
    }
}
