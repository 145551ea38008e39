// Structural scan of a directory tree

use crate::scanner::config::ScannerConfig;
use crate::scanner::error::Result;
use crate::scanner::gitignore::IgnoreMatcher;
use crate::scanner::types::ScanReport;
use crate::scanner::walk::{candidate_files, resolve_root};
use std::time::Instant;
use tracing::{debug, info};

/// Summarise the layout of the tree under `root_path`.
///
/// Collects at most `config.max_files` files; the report is marked truncated
/// only when another candidate was still waiting.
pub fn scan_codebase(root_path: &str, config: &ScannerConfig) -> Result<ScanReport> {
    let start = Instant::now();
    let root = resolve_root(root_path)?;
    let matcher = IgnoreMatcher::load(&root, config);
    debug!(root = %root.display(), ignore_rules = matcher.len(), "scanning codebase");

    let mut report = ScanReport::new(root.clone(), config.max_files, config.max_listed_per_dir);
    for entry in candidate_files(&root, config, &matcher) {
        if report.total_files >= config.max_files {
            report.truncated = true;
            break;
        }
        report.add(entry);
    }

    info!(
        root = %root.display(),
        files = report.total_files,
        truncated = report.truncated,
        duration_ms = start.elapsed().as_millis() as u64,
        "scan complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_scan_prunes_and_groups() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join(".git/objects")).unwrap();
        fs::create_dir_all(root.join("generated")).unwrap();
        fs::write(root.join(".gitignore"), "generated/\n*.log\n").unwrap();
        fs::write(root.join("src/main.rs"), "fn main() {}").unwrap();
        fs::write(root.join("src/lib.rs"), "").unwrap();
        fs::write(root.join(".git/objects/abc.txt"), "blob").unwrap();
        fs::write(root.join("generated/out.rs"), "x").unwrap();
        fs::write(root.join("debug.log"), "x").unwrap();

        let report = scan_codebase(root.to_str().unwrap(), &ScannerConfig::default()).unwrap();
        assert_eq!(report.total_files, 3);
        assert!(!report.truncated);
        assert_eq!(
            report.files_by_dir.get("src").cloned().unwrap_or_default(),
            vec!["lib.rs".to_string(), "main.rs".to_string()]
        );
        assert_eq!(
            report.files_by_dir.get(".").cloned().unwrap_or_default(),
            vec![".gitignore".to_string()]
        );
        assert_eq!(
            report.sorted_type_counts(),
            vec![(".rs", 2), ("<no-ext>", 1)]
        );
    }

    #[test]
    fn test_scan_truncates_at_cap() {
        let dir = tempdir().unwrap();
        for i in 0..4 {
            fs::write(dir.path().join(format!("f{i}.txt")), "x").unwrap();
        }
        let config = ScannerConfig {
            max_files: 3,
            ..ScannerConfig::default()
        };

        let report = scan_codebase(dir.path().to_str().unwrap(), &config).unwrap();
        assert_eq!(report.total_files, 3);
        assert!(report.truncated);
        assert!(report.to_string().ends_with("Note: Stopped after 3 files to avoid scanning the entire tree."));

        let exact = ScannerConfig {
            max_files: 4,
            ..ScannerConfig::default()
        };
        let report = scan_codebase(dir.path().to_str().unwrap(), &exact).unwrap();
        assert!(!report.truncated);
    }

    #[test]
    fn test_scan_empty_tree() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("photo.png"), [0u8; 8]).unwrap();
        let report = scan_codebase(dir.path().to_str().unwrap(), &ScannerConfig::default()).unwrap();
        assert!(report.to_string().starts_with("No interesting files found under"));
    }
}
