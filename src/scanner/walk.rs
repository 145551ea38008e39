// Shared traversal for scan and search

use crate::scanner::config::ScannerConfig;
use crate::scanner::error::{Result, ScanError};
use crate::scanner::gitignore::IgnoreMatcher;
use crate::scanner::types::{NO_EXTENSION, ScanEntry};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Expand `~`, canonicalise and check that `raw` names a directory
pub fn resolve_root(raw: &str) -> Result<PathBuf> {
    let expanded = expand_home(raw);
    let root = fs::canonicalize(&expanded).map_err(|_| {
        let shown = std::path::absolute(&expanded).unwrap_or_else(|_| expanded.clone());
        ScanError::NotFound(shown.display().to_string())
    })?;
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.display().to_string()));
    }
    Ok(root)
}

fn expand_home(raw: &str) -> PathBuf {
    let raw = if raw.is_empty() { "." } else { raw };
    match (raw, dirs::home_dir()) {
        ("~", Some(home)) => home,
        (_, Some(home)) if raw.starts_with("~/") => home.join(&raw[2..]),
        _ => PathBuf::from(raw),
    }
}

/// Root-relative path with forward slashes; `""` for the root itself
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn file_type_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

/// Lazily yield the files a scan or search should look at.
///
/// Built-in and ignored directories are pruned before they are entered.
/// Surviving files must pass the ignore rules, the extension allow-list
/// (no extension is allowed) and the size cap.
pub fn candidate_files<'a>(
    root: &'a Path,
    config: &'a ScannerConfig,
    matcher: &'a IgnoreMatcher,
) -> impl Iterator<Item = ScanEntry> + 'a {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            if config.is_skipped_dir(&entry.file_name().to_string_lossy()) {
                return false;
            }
            !matcher.is_ignored(&relative_path(root, entry.path()), true)
        })
        .filter_map(|result| match result {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(move |entry| {
            let relative = relative_path(root, entry.path());
            if matcher.is_ignored(&relative, false) {
                return None;
            }

            let file_type = file_type_of(entry.path());
            if let Some(ext) = &file_type
                && !config.allows_extension(ext)
            {
                return None;
            }

            let size = entry.metadata().ok()?.len();
            if size > config.max_file_bytes {
                debug!(path = %relative, size, "skipping large file");
                return None;
            }

            Some(ScanEntry {
                path: entry.into_path(),
                relative_path: relative,
                file_type: file_type.unwrap_or_else(|| NO_EXTENSION.to_string()),
                size,
            })
        })
}
