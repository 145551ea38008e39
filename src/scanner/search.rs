// Literal text search across a directory tree

use crate::scanner::config::ScannerConfig;
use crate::scanner::error::{Result, ScanError};
use crate::scanner::gitignore::IgnoreMatcher;
use crate::scanner::types::{SearchMatch, SearchReport};
use crate::scanner::walk::{candidate_files, resolve_root};
use std::fs;
use std::time::Instant;
use tracing::{debug, info};

/// Find lines containing `query` verbatim.
///
/// `max_results` is the caller's raw cap; see [`ScannerConfig::coerce_max_results`].
/// Each file contributes at most `config.max_matches_per_file` matches, and
/// the walk stops once the overall cap is reached.
pub fn search_codebase(
    root_path: &str,
    query: &str,
    max_results: Option<&str>,
    config: &ScannerConfig,
) -> Result<SearchReport> {
    if query.is_empty() {
        return Err(ScanError::EmptyQuery);
    }
    let start = Instant::now();
    let root = resolve_root(root_path)?;
    let limit = config.coerce_max_results(max_results);
    let matcher = IgnoreMatcher::load(&root, config);
    debug!(root = %root.display(), query, limit, "searching codebase");

    let mut report = SearchReport::new(root.clone(), query, limit);
    let mut files_read = 0usize;
    for entry in candidate_files(&root, config, &matcher) {
        if report.is_full() {
            report.stopped_early = true;
            break;
        }

        let bytes = match fs::read(&entry.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(path = %entry.relative_path, error = %e, "unreadable file");
                continue;
            }
        };
        files_read += 1;
        let text = String::from_utf8_lossy(&bytes);

        let mut in_file = 0usize;
        for (idx, line) in text.lines().enumerate() {
            if !line.contains(query) {
                continue;
            }
            report.total_found += 1;
            if in_file < config.max_matches_per_file && !report.is_full() {
                report.matches.push(SearchMatch::new(
                    &entry.relative_path,
                    idx + 1,
                    line,
                    config.max_snippet_chars,
                ));
                in_file += 1;
            }
        }
    }

    info!(
        root = %root.display(),
        files = files_read,
        matches = report.matches.len(),
        total_found = report.total_found,
        duration_ms = start.elapsed().as_millis() as u64,
        "search complete"
    );
    Ok(report)
}
