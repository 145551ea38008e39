// Scanner configuration

/// Directories that are never entered, whatever the ignore files say
pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    ".venv",
    "venv",
    "node_modules",
    "__pycache__",
    "dist",
    "build",
    ".mypy_cache",
    ".pytest_cache",
    ".ruff_cache",
    ".cache",
];

/// Text and source extensions worth listing or searching
pub const DEFAULT_CODE_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".jsx", ".ts", ".tsx", ".json", ".yml", ".yaml", ".toml", ".md", ".txt",
    ".html", ".css", ".scss", ".go", ".rs", ".java", ".c", ".h", ".cpp", ".cc", ".ini",
    ".cfg", ".env",
];

/// Scanner configuration
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Directory names pruned from every walk
    pub skip_dirs: Vec<String>,
    /// Allowed lower-case extensions, dot included
    pub extensions: Vec<String>,
    /// Files larger than this are skipped
    pub max_file_bytes: u64,
    /// Structural scan stops after this many files
    pub max_files: usize,
    /// File names shown per directory in a structural scan
    pub max_listed_per_dir: usize,
    /// Matches reported per file in a search
    pub max_matches_per_file: usize,
    /// Overall search cap when the caller gives none (or a bad one)
    pub default_max_results: usize,
    /// Longest line snippet kept in a search match
    pub max_snippet_chars: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
            extensions: DEFAULT_CODE_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_file_bytes: 512 * 1024,
            max_files: 400,
            max_listed_per_dir: 10,
            max_matches_per_file: 5,
            default_max_results: 80,
            max_snippet_chars: 200,
        }
    }
}

impl ScannerConfig {
    pub fn is_skipped_dir(&self, name: &str) -> bool {
        self.skip_dirs.iter().any(|d| d == name)
    }

    pub fn allows_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }

    /// Parse a caller-supplied result cap; missing, non-numeric and
    /// non-positive values all fall back to the default.
    pub fn coerce_max_results(&self, raw: Option<&str>) -> usize {
        raw.and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|n| *n > 0)
            .map(|n| n as usize)
            .unwrap_or(self.default_max_results)
    }
}
