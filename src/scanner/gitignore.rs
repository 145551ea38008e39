// Gitignore-style rule loading and matching

use crate::scanner::config::ScannerConfig;
use crate::scanner::walk::relative_path;
use ignore::Match;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

const IGNORE_FILE_NAME: &str = ".gitignore";

/// One line of an ignore file, scoped to the directory that declared it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRule {
    /// Pattern text without `!`, leading `/` or trailing `/`
    pub pattern: String,
    pub negated: bool,
    /// Root-relative directory of the declaring file, `""` or ending in `/`
    pub scope: String,
    /// Trailing `/`: only directories match
    pub dir_only: bool,
    /// Leading or interior `/`: relative to the scope rather than any depth below it
    pub anchored: bool,
}

impl IgnoreRule {
    /// Parse one ignore-file line. Blank lines and comments yield `None`.
    pub fn parse(line: &str, scope: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let (negated, core) = match line.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, line),
        };
        let (dir_only, core) = match core.strip_suffix('/') {
            Some(rest) => (true, rest),
            None => (false, core),
        };
        let anchored = core.contains('/');
        let core = core.trim_start_matches('/');
        if core.is_empty() {
            return None;
        }

        Some(Self {
            pattern: core.to_string(),
            negated,
            scope: scope.to_string(),
            dir_only,
            anchored,
        })
    }

    /// Normalised gitignore line, relative to the declaring directory
    pub fn to_line(&self) -> String {
        format!(
            "{}{}{}{}",
            if self.negated { "!" } else { "" },
            if self.anchored { "/" } else { "" },
            self.pattern,
            if self.dir_only { "/" } else { "" },
        )
    }
}

/// Compiled rules of one declaring directory
#[derive(Debug, Clone)]
struct ScopedIgnore {
    scope: String,
    rules: Gitignore,
}

/// Compiled ignore rules, deepest declaring directory first.
///
/// Within one directory the last matching rule decides; a deeper directory
/// with any matching rule overrides its ancestors.
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    scopes: Vec<ScopedIgnore>,
}

impl IgnoreMatcher {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build one matcher per scope, keeping declaration order inside a scope.
    /// `root` is only used to label the per-directory matchers.
    pub fn compile(root: &Path, rules: &[IgnoreRule]) -> Result<Self, ignore::Error> {
        let mut grouped: Vec<(&str, Vec<&IgnoreRule>)> = Vec::new();
        for rule in rules {
            match grouped.iter_mut().find(|(scope, _)| *scope == rule.scope) {
                Some((_, members)) => members.push(rule),
                None => grouped.push((rule.scope.as_str(), vec![rule])),
            }
        }

        let mut scopes = grouped
            .into_iter()
            .map(|(scope, members)| {
                let mut builder = GitignoreBuilder::new(root.join(scope));
                for rule in members {
                    builder.add_line(None, &rule.to_line())?;
                }
                Ok(ScopedIgnore {
                    scope: scope.to_string(),
                    rules: builder.build()?,
                })
            })
            .collect::<Result<Vec<_>, ignore::Error>>()?;
        scopes.sort_by_key(|s| std::cmp::Reverse(s.scope.matches('/').count()));
        Ok(Self { scopes })
    }

    /// Collect every ignore file under `root` and compile them.
    /// A pattern that fails to compile disables ignore rules altogether.
    pub fn load(root: &Path, config: &ScannerConfig) -> Self {
        let rules = load_ignore_rules(root, config);
        if rules.is_empty() {
            return Self::empty();
        }

        match Self::compile(root, &rules) {
            Ok(matcher) => {
                debug!(root = %root.display(), rules = rules.len(), scopes = matcher.len(), "compiled ignore rules");
                matcher
            }
            Err(e) => {
                warn!(root = %root.display(), error = %e, "invalid ignore pattern, ignoring rules");
                Self::empty()
            }
        }
    }

    /// Number of declaring directories
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Whether a root-relative path is excluded, either directly or through
    /// one of its parent directories.
    pub fn is_ignored(&self, rel_path: &str, is_dir: bool) -> bool {
        for scoped in &self.scopes {
            let Some(local) = rel_path.strip_prefix(scoped.scope.as_str()) else {
                continue;
            };
            if local.is_empty() {
                continue;
            }
            match scoped.rules.matched_path_or_any_parents(local, is_dir) {
                Match::None => {}
                Match::Ignore(_) => return true,
                Match::Whitelist(_) => return false,
            }
        }
        false
    }
}

/// Walk `root` once, skipping built-in directories, and gather the rules of
/// every ignore file in declaration order.
pub fn load_ignore_rules(root: &Path, config: &ScannerConfig) -> Vec<IgnoreRule> {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !config.is_skipped_dir(&entry.file_name().to_string_lossy())
        });

    let mut rules = Vec::new();
    for entry in walker.filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() || entry.file_name() != IGNORE_FILE_NAME {
            continue;
        }

        let scope = match entry.path().parent() {
            Some(dir) if dir != root => format!("{}/", relative_path(root, dir)),
            _ => String::new(),
        };

        let content = match fs::read(entry.path()) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                debug!(path = %entry.path().display(), error = %e, "unreadable ignore file");
                continue;
            }
        };

        rules.extend(
            content
                .lines()
                .filter_map(|line| IgnoreRule::parse(line, &scope)),
        );
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(lines: &[(&str, &str)]) -> IgnoreMatcher {
        let rules: Vec<IgnoreRule> = lines
            .iter()
            .filter_map(|(scope, line)| IgnoreRule::parse(line, scope))
            .collect();
        IgnoreMatcher::compile(Path::new("/repo"), &rules).unwrap()
    }

    #[test]
    fn test_parse_rule_shapes() {
        assert_eq!(IgnoreRule::parse("   ", ""), None);
        assert_eq!(IgnoreRule::parse("# comment", ""), None);
        assert_eq!(IgnoreRule::parse("/", ""), None);

        let rule = IgnoreRule::parse("!/target/", "sub/").unwrap();
        assert_eq!(rule.pattern, "target");
        assert!(rule.negated);
        assert!(rule.dir_only);
        assert!(rule.anchored);
        assert_eq!(rule.to_line(), "!/target/");

        let rule = IgnoreRule::parse("docs/*.md", "").unwrap();
        assert!(rule.anchored);
        assert_eq!(rule.to_line(), "/docs/*.md");

        let rule = IgnoreRule::parse("*.log", "sub/").unwrap();
        assert!(!rule.anchored);
        assert_eq!(rule.to_line(), "*.log");
    }

    #[test]
    fn test_unanchored_matches_any_depth() {
        let m = matcher(&[("", "*.log")]);
        assert!(m.is_ignored("a.log", false));
        assert!(m.is_ignored("deep/er/a.log", false));
        assert!(!m.is_ignored("a.logs", false));
    }

    #[test]
    fn test_later_negation_wins() {
        let m = matcher(&[("", "*.log"), ("", "!keep.log")]);
        assert!(m.is_ignored("drop.log", false));
        assert!(!m.is_ignored("keep.log", false));
        assert!(!m.is_ignored("x/keep.log", false));
    }

    #[test]
    fn test_dir_only_rule() {
        let m = matcher(&[("", "out/")]);
        assert!(m.is_ignored("out", true));
        assert!(!m.is_ignored("out", false));
        assert!(m.is_ignored("out/file.txt", false));
    }

    #[test]
    fn test_nested_scope_and_anchor() {
        let m = matcher(&[("pkg/", "/gen"), ("pkg/", "*.tmp")]);
        assert!(m.is_ignored("pkg/gen", true));
        assert!(!m.is_ignored("pkg/inner/gen", true));
        assert!(!m.is_ignored("gen", true));
        assert!(m.is_ignored("pkg/inner/x.tmp", false));
        assert!(!m.is_ignored("x.tmp", false));
    }

    #[test]
    fn test_deeper_scope_wins_regardless_of_order() {
        let m = matcher(&[(".config/", "!keep.txt"), ("", "*.txt")]);
        assert!(!m.is_ignored(".config/keep.txt", false));
        assert!(m.is_ignored(".config/other.txt", false));
        assert!(m.is_ignored("keep.txt", false));
    }

    #[test]
    fn test_scope_with_glob_characters_is_literal() {
        let m = matcher(&[("pages/[id]/", "gen.js"), ("tpl{x/", "*.tmp")]);
        assert!(m.is_ignored("pages/[id]/gen.js", false));
        assert!(!m.is_ignored("pages/i/gen.js", false));
        assert!(m.is_ignored("tpl{x/a.tmp", false));
    }

    #[test]
    fn test_star_does_not_cross_directories() {
        let m = matcher(&[("", "docs/*.md")]);
        assert!(m.is_ignored("docs/a.md", false));
        assert!(!m.is_ignored("docs/sub/a.md", false));
    }

    #[test]
    fn test_invalid_pattern_fails_compile() {
        let rules = vec![IgnoreRule::parse("[unclosed", "").unwrap()];
        assert!(IgnoreMatcher::compile(Path::new("/repo"), &rules).is_err());
    }
}
