// Diff module - previews what a write would change

#![allow(dead_code)]

use console::style;
use similar::{ChangeTag, DiffOp, TextDiff};
use std::fmt::Write as _;
use std::fs;
use std::ops::Range;
use std::path::Path;
use tracing::debug;

const CONTEXT_LINES: usize = 3;

pub const IDENTICAL_NOTE: &str = "(No changes; content is identical.)";
pub const NEW_FILE_NOTE: &str = "(File does not exist yet; this will create a new file.)";

/// Display classification of one diff line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffTag {
    /// File (`---`/`+++`) and hunk (`@@`) headers
    Header,
    Added,
    Removed,
    Context,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub tag: DiffTag,
    /// Full line text including its `+`/`-`/space marker
    pub text: String,
}

impl DiffLine {
    fn new(tag: DiffTag, text: impl Into<String>) -> Self {
        Self {
            tag,
            text: text.into(),
        }
    }
}

/// What a `write_file` would do to its target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffPreview {
    /// The target is missing or not a regular file
    NewFile { content: String },
    Identical,
    Changed { lines: Vec<DiffLine> },
}

impl DiffPreview {
    /// Render for the terminal; `colored` paints additions green and removals red.
    pub fn render(&self, colored: bool) -> String {
        let mut out = String::new();
        match self {
            DiffPreview::NewFile { content } => {
                out.push_str(NEW_FILE_NOTE);
                if !content.is_empty() {
                    out.push_str("\nContent to be written:");
                    for line in content.split('\n') {
                        let _ = write!(out, "\n  {}", line);
                    }
                }
            }
            DiffPreview::Identical => out.push_str(IDENTICAL_NOTE),
            DiffPreview::Changed { lines } => {
                out.push_str("Preview of changes (unified diff):");
                for line in lines {
                    let text = match (colored, line.tag) {
                        (true, DiffTag::Added) => style(&line.text).green().to_string(),
                        (true, DiffTag::Removed) => style(&line.text).red().to_string(),
                        _ => line.text.clone(),
                    };
                    let _ = write!(out, "\n  {}", text);
                }
            }
        }
        out
    }

    pub fn added(&self) -> usize {
        self.count(DiffTag::Added)
    }

    pub fn removed(&self) -> usize {
        self.count(DiffTag::Removed)
    }

    fn count(&self, tag: DiffTag) -> usize {
        match self {
            DiffPreview::Changed { lines } => lines.iter().filter(|l| l.tag == tag).count(),
            _ => 0,
        }
    }
}

/// Compare the current content of `path` with `new_content`. Never writes.
pub fn preview_write(path: &str, new_content: &str) -> DiffPreview {
    let target = Path::new(path);
    if !target.is_file() {
        return DiffPreview::NewFile {
            content: new_content.to_string(),
        };
    }

    let old_content = match fs::read(target) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            debug!(path, error = %e, "unreadable write target, diffing against empty");
            String::new()
        }
    };

    let lines = unified_diff(path, &old_content, new_content);
    if lines.is_empty() {
        DiffPreview::Identical
    } else {
        DiffPreview::Changed { lines }
    }
}

/// Line diff with `CONTEXT_LINES` lines of context, empty when the texts
/// have the same lines.
pub fn unified_diff(path: &str, old: &str, new: &str) -> Vec<DiffLine> {
    let old = normalise_lines(old);
    let new = normalise_lines(new);
    let diff = TextDiff::from_lines(old.as_str(), new.as_str());
    let groups = diff.grouped_ops(CONTEXT_LINES);
    if groups.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![
        DiffLine::new(DiffTag::Header, format!("--- {} (current)", path)),
        DiffLine::new(DiffTag::Header, format!("+++ {} (new)", path)),
    ];
    for group in &groups {
        let (old_range, new_range) = group_ranges(group);
        lines.push(DiffLine::new(
            DiffTag::Header,
            format!(
                "@@ -{} +{} @@",
                format_range(&old_range),
                format_range(&new_range)
            ),
        ));
        for op in group {
            for change in diff.iter_changes(op) {
                let value = change.value().trim_end_matches('\n');
                let line = match change.tag() {
                    ChangeTag::Delete => DiffLine::new(DiffTag::Removed, format!("-{}", value)),
                    ChangeTag::Insert => DiffLine::new(DiffTag::Added, format!("+{}", value)),
                    ChangeTag::Equal => DiffLine::new(DiffTag::Context, format!(" {}", value)),
                };
                lines.push(line);
            }
        }
    }
    lines
}

/// Every line newline-terminated, so a missing final newline is not a change
fn normalise_lines(text: &str) -> String {
    text.lines().map(|line| format!("{}\n", line)).collect()
}

fn group_ranges(group: &[DiffOp]) -> (Range<usize>, Range<usize>) {
    match (group.first(), group.last()) {
        (Some(first), Some(last)) => (
            first.old_range().start..last.old_range().end,
            first.new_range().start..last.new_range().end,
        ),
        _ => (0..0, 0..0),
    }
}

/// `start,len` with 1-based start; a single line drops the length and an
/// empty range points at the line before it.
fn format_range(range: &Range<usize>) -> String {
    let len = range.end - range.start;
    match len {
        1 => format!("{}", range.start + 1),
        0 => format!("{},0", range.start),
        _ => format!("{},{}", range.start + 1, len),
    }
}
