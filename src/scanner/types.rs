// Data types for Scanner module

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;

/// Type key for files without an extension
pub const NO_EXTENSION: &str = "<no-ext>";

/// A file that survived pruning and filtering
#[derive(Debug, Clone)]
pub struct ScanEntry {
    /// Absolute path, used to open the file
    pub path: PathBuf,
    /// Root-relative path with forward slashes
    pub relative_path: String,
    /// Lower-case extension with its dot, or `<no-ext>`
    pub file_type: String,
    pub size: u64,
}

impl ScanEntry {
    /// Root-relative directory, `.` for the root itself
    pub fn dir(&self) -> &str {
        self.relative_path
            .rsplit_once('/')
            .map_or(".", |(dir, _)| dir)
    }

    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit_once('/')
            .map_or(self.relative_path.as_str(), |(_, name)| name)
    }
}

/// One line containing the query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    pub path: String,
    /// 1-based
    pub line_number: usize,
    pub text: String,
}

impl SearchMatch {
    pub fn new(path: &str, line_number: usize, line: &str, max_chars: usize) -> Self {
        let text = match line.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", &line[..cut]),
            None => line.to_string(),
        };
        Self {
            path: path.to_string(),
            line_number,
            text,
        }
    }
}

impl fmt::Display for SearchMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.path, self.line_number, self.text)
    }
}

/// Result of a structural scan
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub root: PathBuf,
    /// Directory → file names, in discovery order
    pub files_by_dir: BTreeMap<String, Vec<String>>,
    pub type_counts: HashMap<String, usize>,
    pub total_files: usize,
    /// The file cap was hit before the walk finished
    pub truncated: bool,
    pub max_files: usize,
    pub max_listed_per_dir: usize,
}

impl ScanReport {
    pub fn new(root: PathBuf, max_files: usize, max_listed_per_dir: usize) -> Self {
        Self {
            root,
            files_by_dir: BTreeMap::new(),
            type_counts: HashMap::new(),
            total_files: 0,
            truncated: false,
            max_files,
            max_listed_per_dir,
        }
    }

    pub fn add(&mut self, entry: ScanEntry) {
        self.files_by_dir
            .entry(entry.dir().to_string())
            .or_default()
            .push(entry.file_name().to_string());
        *self.type_counts.entry(entry.file_type).or_insert(0) += 1;
        self.total_files += 1;
    }

    /// Extension counts, most frequent first, ties by name
    pub fn sorted_type_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = self
            .type_counts
            .iter()
            .map(|(ext, count)| (ext.as_str(), *count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        counts
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.files_by_dir.is_empty() {
            return write!(f, "No interesting files found under '{}'.", self.root.display());
        }

        writeln!(f, "Codebase scan (root: {})", self.root.display())?;
        writeln!(f)?;
        write!(f, "Directories and key files (truncated):")?;

        for (dir, files) in &self.files_by_dir {
            write!(f, "\n- {}/", dir)?;
            let mut files: Vec<&String> = files.iter().collect();
            files.sort();
            for name in files.iter().take(self.max_listed_per_dir) {
                write!(f, "\n  - {}", name)?;
            }
            if files.len() > self.max_listed_per_dir {
                write!(
                    f,
                    "\n  - ... ({} more files)",
                    files.len() - self.max_listed_per_dir
                )?;
            }
        }

        write!(f, "\n\nFile types summary:")?;
        for (ext, count) in self.sorted_type_counts() {
            write!(f, "\n- {}: {} file(s)", ext, count)?;
        }

        if self.truncated {
            write!(
                f,
                "\n\nNote: Stopped after {} files to avoid scanning the entire tree.",
                self.max_files
            )?;
        }
        Ok(())
    }
}

/// Result of a text search
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub root: PathBuf,
    pub query: String,
    pub limit: usize,
    pub matches: Vec<SearchMatch>,
    /// Every matching line in the files that were read, capped or not
    pub total_found: usize,
    /// The overall cap was hit while files were still left to search
    pub stopped_early: bool,
}

impl SearchReport {
    pub fn new(root: PathBuf, query: impl Into<String>, limit: usize) -> Self {
        Self {
            root,
            query: query.into(),
            limit,
            matches: Vec::new(),
            total_found: 0,
            stopped_early: false,
        }
    }

    pub fn is_full(&self) -> bool {
        self.matches.len() >= self.limit
    }
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.matches.is_empty() {
            return write!(
                f,
                "No matches for '{}' under '{}'.",
                self.query,
                self.root.display()
            );
        }

        writeln!(
            f,
            "Search results for '{}' (root: {}):",
            self.query,
            self.root.display()
        )?;
        writeln!(f, "- Matches found: {}", self.total_found)?;
        writeln!(f, "- Max reported matches: {}", self.limit)?;
        writeln!(f)?;

        let lines: Vec<String> = self.matches.iter().map(ToString::to_string).collect();
        write!(f, "{}", lines.join("\n"))?;

        if self.total_found > self.matches.len() {
            write!(
                f,
                "\n\nNote: Showing {} of {} matches found. \
                 Refine your query or search a narrower directory if needed.",
                self.matches.len(),
                self.total_found
            )?;
        }
        if self.stopped_early {
            write!(
                f,
                "\nSearch stopped at the limit of {} matches; remaining files were not searched.",
                self.limit
            )?;
        }
        Ok(())
    }
}
