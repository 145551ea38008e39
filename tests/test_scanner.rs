// Integration tests for Scanner module
// This file should be run with cargo test --test test_scanner

#[path = "../src/scanner/mod.rs"]
mod scanner;

fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scanner::{ScannerConfig, scan_codebase, search_codebase};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// A TODO in a.py is found once; .git is never entered
    #[test]
    fn test_todo_search_ignores_git() {
        init_tracing();

        let dir = tempdir().unwrap();
        write(dir.path(), "a.py", "x = 1\n# TODO: fix\n");
        write(dir.path(), ".git/HEAD", "TODO in git\n");
        write(dir.path(), ".git/notes.txt", "TODO in git\n");

        let report = search_codebase(
            dir.path().to_str().unwrap(),
            "TODO",
            None,
            &ScannerConfig::default(),
        )
        .unwrap();
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].to_string(), "a.py:2: # TODO: fix");
        assert_eq!(report.total_found, 1);
    }

    /// Full rendering of a small search
    #[test]
    fn test_search_rendering() {
        init_tracing();

        let dir = tempdir().unwrap();
        write(dir.path(), "src/lib.rs", "fn alpha() {}\nfn beta() {}\n");
        let report = search_codebase(
            dir.path().to_str().unwrap(),
            "fn ",
            Some("10"),
            &ScannerConfig::default(),
        )
        .unwrap();

        let root = fs::canonicalize(dir.path()).unwrap();
        let expected = format!(
            "Search results for 'fn ' (root: {}):\n\
             - Matches found: 2\n\
             - Max reported matches: 10\n\
             \n\
             src/lib.rs:1: fn alpha() {{}}\n\
             src/lib.rs:2: fn beta() {{}}",
            root.display()
        );
        assert_eq!(report.to_string(), expected);
    }

    /// Zero and non-numeric caps fall back to 80
    #[test]
    fn test_bad_max_results_use_default() {
        init_tracing();

        let dir = tempdir().unwrap();
        let body: String = (0..5).map(|i| format!("hit {}\n", i)).collect();
        for i in 0..20 {
            write(dir.path(), &format!("f{:02}.txt", i), &body);
        }

        for raw in [Some("0"), Some("lots"), Some("-1"), None] {
            let report = search_codebase(
                dir.path().to_str().unwrap(),
                "hit",
                raw,
                &ScannerConfig::default(),
            )
            .unwrap();
            assert_eq!(report.limit, 80, "max_results {:?}", raw);
            assert_eq!(report.matches.len(), 80);
            assert!(report.stopped_early);
        }
    }

    /// Nested .gitignore rules apply below their own directory only
    #[test]
    fn test_nested_gitignore_scope() {
        init_tracing();

        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, ".gitignore", "*.txt\n!keep.txt\n");
        write(root, "app/.gitignore", "/generated\ncache/\n");
        write(root, "app/main.py", "print()\n");
        write(root, "app/generated/out.py", "x\n");
        write(root, "app/sub/generated/ok.py", "x\n");
        write(root, "app/cache/blob.txt", "x\n");
        write(root, "generated/top.py", "x\n");
        write(root, "debug.txt", "x\n");
        write(root, "keep.txt", "x\n");

        let report = scan_codebase(root.to_str().unwrap(), &ScannerConfig::default()).unwrap();
        let mut listed: Vec<String> = report
            .files_by_dir
            .iter()
            .flat_map(|(dir, files)| files.iter().map(move |f| format!("{}/{}", dir, f)))
            .collect();
        listed.sort();
        assert_eq!(
            listed,
            vec![
                "./.gitignore",
                "./keep.txt",
                "app/.gitignore",
                "app/main.py",
                "app/sub/generated/ok.py",
                "generated/top.py",
            ]
        );
    }

    /// A nested negation beats the root rule even when its directory sorts first
    #[test]
    fn test_deeper_gitignore_overrides_root() {
        init_tracing();

        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, ".gitignore", "*.txt\n");
        for sub in [".config", "-lib", "app"] {
            write(root, &format!("{}/.gitignore", sub), "!keep.txt\n");
            write(root, &format!("{}/keep.txt", sub), "x\n");
            write(root, &format!("{}/drop.txt", sub), "x\n");
        }

        let report = scan_codebase(root.to_str().unwrap(), &ScannerConfig::default()).unwrap();
        for sub in [".config", "-lib", "app"] {
            let files = &report.files_by_dir[sub];
            assert!(files.contains(&"keep.txt".to_string()), "{}: {:?}", sub, files);
            assert!(!files.contains(&"drop.txt".to_string()), "{}: {:?}", sub, files);
        }
    }

    /// Directory names with glob characters are matched literally
    #[test]
    fn test_gitignore_scope_with_glob_characters() {
        init_tracing();

        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, ".gitignore", "secret.md\n");
        write(root, "secret.md", "x\n");
        write(root, "tpl{x/.gitignore", "*.tmp\n");
        write(root, "tpl{x/page.md", "x\n");
        write(root, "pages/[id]/.gitignore", "gen.js\n");
        write(root, "pages/[id]/gen.js", "x\n");
        write(root, "pages/[id]/page.js", "x\n");

        let rendered = scan_codebase(root.to_str().unwrap(), &ScannerConfig::default())
            .unwrap()
            .to_string();
        assert!(!rendered.contains("- secret.md"), "{}", rendered);
        assert!(!rendered.contains("- gen.js"), "{}", rendered);
        assert!(rendered.contains("- page.js"), "{}", rendered);
        assert!(rendered.contains("- tpl{x/"), "{}", rendered);
    }

    /// Ignore files inside skipped directories are never read
    #[test]
    fn test_ignore_files_in_skipped_dirs_unused() {
        init_tracing();

        let dir = tempdir().unwrap();
        write(dir.path(), "node_modules/.gitignore", "*.py\n");
        write(dir.path(), "main.py", "x\n");

        let report =
            scan_codebase(dir.path().to_str().unwrap(), &ScannerConfig::default()).unwrap();
        assert_eq!(report.total_files, 1);
        assert!(report.to_string().contains("  - main.py"));
    }

    /// Invalid patterns disable ignore rules instead of failing the scan
    #[test]
    fn test_invalid_pattern_degrades() {
        init_tracing();

        let dir = tempdir().unwrap();
        write(dir.path(), ".gitignore", "[broken\n*.py\n");
        write(dir.path(), "main.py", "x\n");

        let report =
            scan_codebase(dir.path().to_str().unwrap(), &ScannerConfig::default()).unwrap();
        assert_eq!(report.total_files, 2);
    }

    /// Per-directory listing is capped at ten names
    #[test]
    fn test_listing_cap() {
        init_tracing();

        let dir = tempdir().unwrap();
        for i in 0..12 {
            write(dir.path(), &format!("docs/page{:02}.md", i), "x");
        }
        let rendered = scan_codebase(dir.path().to_str().unwrap(), &ScannerConfig::default())
            .unwrap()
            .to_string();
        assert!(rendered.contains("  - page09.md\n  - ... (2 more files)"));
        assert!(!rendered.contains("page10.md"));
        assert!(rendered.ends_with("File types summary:\n- .md: 12 file(s)"));
    }
}
