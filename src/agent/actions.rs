// Local `@` actions that never contact the model

use crate::brain::Message;
use std::fs;
use tracing::debug;

pub const ACTION_HELP: &str = "Local actions (do not contact the model):\n\
    \x20 @file <path>   stage a file so the agent sees its contents next turn (alias @f)\n\
    \x20 @help          show this help message (aliases @commands, @?)\n\
    \n\
    Use these to preload context (for example several files) before you ask\n\
    your actual question. When you are ready, type your prompt normally.";

/// Handle input starting with `@`.
///
/// Returns `None` when the input is not an action, otherwise the text to show
/// the user. Staged files are appended to `history` as user messages.
pub fn handle_action(input: &str, history: &mut Vec<Message>) -> Option<String> {
    let rest = input.strip_prefix('@')?;
    let (command, arguments) = match rest.split_once(char::is_whitespace) {
        Some((command, arguments)) => (command, arguments.trim()),
        None => (rest, ""),
    };
    let command = command.trim().to_lowercase();

    let message = match command.as_str() {
        "file" | "f" => stage_file(arguments, history),
        "help" | "commands" | "?" => ACTION_HELP.to_string(),
        "" => "Actions need a name, e.g. '@file README.md'.".to_string(),
        other => format!("Unknown action '@{}'. Type '@help' for the list.", other),
    };
    Some(message)
}

fn stage_file(path: &str, history: &mut Vec<Message>) -> String {
    if path.is_empty() {
        return "Usage: @file <path>".to_string();
    }

    match fs::read(path) {
        Ok(bytes) => {
            let content = String::from_utf8_lossy(&bytes);
            let lines = content.lines().count();
            history.push(Message::user_text(format!(
                "Here is the content of the file '{}' for context:\n\n```\n{}\n```",
                path,
                content.trim_end()
            )));
            debug!(path, lines, "staged file for context");
            format!("Staged '{}' ({} lines) for the next message.", path, lines)
        }
        Err(e) => format!("Could not read '{}': {}", path, e),
    }
}
