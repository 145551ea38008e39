// Report module - folds batch outcomes into text for the user and the history

#![allow(dead_code)]

use crate::executor::{BatchOutcome, OperationOutcome};

/// Longest result excerpt shown per line of the summary
pub const SUMMARY_EXCERPT_CHARS: usize = 100;

/// Assistant message recorded in the conversation history
pub fn conversation_text(response: &str, batch: &BatchOutcome) -> String {
    if batch.is_empty() {
        return response.to_string();
    }
    let results: Vec<String> = batch
        .outcomes
        .iter()
        .map(|o| format!("{}: {}", o.kind, o.result))
        .collect();
    format!("{}\n\nTool results:\n{}", response, results.join("\n"))
}

fn status_tag(outcome: &OperationOutcome) -> &'static str {
    if outcome.skipped {
        "[skipped]"
    } else if outcome.is_error {
        "[error]"
    } else {
        "[ok]"
    }
}

fn excerpt(result: &str) -> String {
    let first = result.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let more = result.lines().filter(|l| !l.trim().is_empty()).count() > 1;
    match first.char_indices().nth(SUMMARY_EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &first[..cut]),
        None if more => format!("{} ...", first),
        None => first.to_string(),
    }
}

/// Per-operation status lines for the terminal; `None` when nothing was requested
pub fn summary(batch: &BatchOutcome, requested: usize) -> Option<String> {
    if requested == 0 {
        return None;
    }

    let mut lines = vec!["Tool results:".to_string()];
    lines.extend(
        batch
            .outcomes
            .iter()
            .map(|o| format!("  {} {}: {}", status_tag(o), o.kind, excerpt(&o.result))),
    );

    if batch.aborted {
        let remaining = requested.saturating_sub(batch.len());
        lines.push(format!(
            "Cancelled by user; {} remaining operation(s) were not run.",
            remaining
        ));
    }
    Some(lines.join("\n"))
}
