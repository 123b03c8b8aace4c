//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The render path is pure (no filesystem, network, process or thread access)
//! - The render path never panics on `unwrap()`
//! - The library reports through `tracing`, never by printing
//!
//! The helpers below are shared by the scans in `tests/`.

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root, two levels above this package
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

/// All `.rs` files under `dir`, relative to the workspace root, sorted
#[must_use]
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    let path = workspace_root().join(dir);
    if !path.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Production code of `content` as `(line_number, code)` pairs
///
/// Everything from the first `#[cfg(test)]` on is test code. Line comments
/// and doc comments are stripped.
#[must_use]
pub fn production_lines(content: &str) -> Vec<(usize, &str)> {
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
        .map(|(idx, line)| (idx + 1, line.split("//").next().unwrap_or(line)))
        .filter(|(_, code)| !code.trim().is_empty())
        .collect()
}

/// Scan the production lines of `files`, reporting every line `check` flags
///
/// `check` returns a short description of the violation.
pub fn scan(files: &[PathBuf], check: impl Fn(&str) -> Option<&'static str>) -> Vec<String> {
    let mut violations = Vec::new();

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => continue,
        };

        for (line_number, code) in production_lines(&content) {
            if let Some(what) = check(code) {
                violations.push(format!(
                    "{}:{} - {}: {}",
                    path.display(),
                    line_number,
                    what,
                    code.trim()
                ));
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_module_is_skipped() {
        let content = "fn a() {}\n\n#[cfg(test)]\nmod tests {\n    fn b() { x.unwrap(); }\n}\n";
        let lines = production_lines(content);
        assert_eq!(lines, vec![(1, "fn a() {}")]);
    }

    #[test]
    fn test_comments_are_stripped() {
        let content = "/// calls std::fs\nlet x = 1; // std::net\n";
        let lines = production_lines(content);
        assert_eq!(lines, vec![(2, "let x = 1; ")]);
    }

    #[test]
    fn test_workspace_root_holds_the_core() {
        assert!(workspace_root().join("moo").join("core").join("Cargo.toml").exists());
        assert!(!rust_files("moo/core/src").is_empty());
    }
}
