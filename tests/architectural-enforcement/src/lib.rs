//! Architectural Enforcement
//!
//! Source scans that keep the TUI crate honest:
//! - No sleeping outside the simulated executor
//! - Nothing but the binary writes straight to stdout/stderr
//! - No panicking shortcuts in production code
//!
//! Test modules (everything from `#[cfg(test)]` to the end of a file) are
//! production-exempt.

use std::fs;
use std::path::{Path, PathBuf};

/// One offending line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: PathBuf,
    pub line: usize,
    pub text: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} - {}", self.path.display(), self.line, self.text)
    }
}

/// Root of the TUI crate's sources
pub fn tui_src() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../tui/src")
}

/// All `.rs` files under `dir`, sorted
pub fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Lines of `source` before its test module, with comments stripped
pub fn production_lines(source: &str) -> Vec<(usize, &str)> {
    source
        .lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
        .map(|(idx, line)| (idx + 1, code_part(line)))
        .filter(|(_, code)| !code.trim().is_empty())
        .collect()
}

/// Every line of `source`, with comments stripped
pub fn all_lines(source: &str) -> Vec<(usize, &str)> {
    source
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, code_part(line)))
        .filter(|(_, code)| !code.trim().is_empty())
        .collect()
}

/// The part of a line before any `//` comment.
///
/// Doesn't understand string literals; a `//` inside a string cuts the line
/// short, which only ever hides code from the scan.
fn code_part(line: &str) -> &str {
    line.split("//").next().unwrap_or(line)
}

/// Scan every file under `dir`, reporting lines where `matches` is true
pub fn scan<F>(dir: &Path, production_only: bool, mut matches: F) -> Vec<Violation>
where
    F: FnMut(&Path, &str) -> bool,
{
    let mut violations = Vec::new();

    for path in rust_files(dir) {
        let Ok(source) = fs::read_to_string(&path) else {
            continue;
        };
        let lines = if production_only {
            production_lines(&source)
        } else {
            all_lines(&source)
        };

        for (line, code) in lines {
            if matches(&path, code) {
                violations.push(Violation {
                    path: path.clone(),
                    line,
                    text: code.trim().to_string(),
                });
            }
        }
    }

    violations
}

/// Panic with a readable report if there are violations
pub fn assert_clean(rule: &str, violations: &[Violation]) {
    if violations.is_empty() {
        return;
    }

    let mut report = format!("\n{rule}: {} violation(s)\n", violations.len());
    for violation in violations {
        report.push_str(&format!("  {violation}\n"));
    }
    panic!("{report}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_lines_stop_at_test_module() {
        let source = "fn a() {}\n// note\n#[cfg(test)]\nmod tests { fn b() {} }\n";
        let lines = production_lines(source);
        assert_eq!(lines, vec![(1, "fn a() {}")]);
    }

    #[test]
    fn test_comments_are_ignored() {
        let source = "let x = 1; // x.unwrap()\n";
        assert_eq!(all_lines(source), vec![(1, "let x = 1; ")]);
    }

    #[test]
    fn test_tui_sources_are_found() {
        let files = rust_files(&tui_src());
        assert!(files.iter().any(|p| p.ends_with("main.rs")));
        assert!(files.iter().any(|p| p.ends_with("lib.rs")));
    }
}
