// Tool-call extraction from free-form model output

use crate::parser::types::{ToolParams, ToolRequest};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static TOOL_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<tool_call type="([^"]+)">(.*?)</tool_call>"#)
        .expect("tool call pattern is valid")
});

static PARAMETER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<parameter name="([^"]+)">(.*?)</parameter>"#)
        .expect("parameter pattern is valid")
});

// Three or more line breaks, with only whitespace in between
static BLANK_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n\s*\n").expect("blank run pattern is valid"));

/// Extract every tool call from `text`, in document order.
///
/// Fragments that do not match the exact tag shape are skipped; this never fails.
pub fn parse_tool_calls(text: &str) -> Vec<ToolRequest> {
    let requests: Vec<ToolRequest> = TOOL_CALL
        .captures_iter(text)
        .map(|caps| {
            let raw = caps.get(0).map_or("", |m| m.as_str());
            let kind = caps.get(1).map_or("", |m| m.as_str());
            let body = caps.get(2).map_or("", |m| m.as_str());

            ToolRequest {
                kind: kind.to_string(),
                params: parse_parameters(body),
                raw: raw.to_string(),
            }
        })
        .collect();

    debug!(calls = requests.len(), "parsed tool calls");
    requests
}

fn parse_parameters(body: &str) -> ToolParams {
    PARAMETER
        .captures_iter(body)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str();
            let value = caps.get(2)?.as_str().trim();
            Some((name, value))
        })
        .collect()
}

/// Remove every tool-call span and squeeze the leftover blank lines.
pub fn strip_tool_calls(text: &str) -> String {
    let mut cleaned = TOOL_CALL.replace_all(text, "").into_owned();
    // Removing a span can splice two halves of an outer fragment into a new match.
    while TOOL_CALL.is_match(&cleaned) {
        cleaned = TOOL_CALL.replace_all(&cleaned, "").into_owned();
    }

    BLANK_RUN.replace_all(&cleaned, "\n\n").trim().to_string()
}
