//! Integration Test: Render Path Purity
//!
//! **Policy**: The modules that turn a message into a drawing are pure text
//! transformations. They MUST NOT touch the filesystem, the network, child
//! processes, threads or the environment, and MUST NOT `unwrap()`.
//!
//! Loading (`config`, `cows/loader`) lives outside the render path and may do I/O.

use std::path::PathBuf;

use architectural_enforcement::{rust_files, scan, workspace_root};

/// Modules on the render path
const RENDER_PATH: &[&str] = &[
    "moo/core/src/modes.rs",
    "moo/core/src/balloon.rs",
    "moo/core/src/compose.rs",
    "moo/core/src/cows/mod.rs",
    "moo/core/src/cows/builtin.rs",
    "moo/core/src/api.rs",
    "moo/core/src/share.rs",
];

fn render_path() -> Vec<PathBuf> {
    RENDER_PATH.iter().map(|file| workspace_root().join(file)).collect()
}

fn impure_call(code: &str) -> Option<&'static str> {
    if code.contains("std::fs") || code.contains("fs::read") || code.contains("File::") {
        return Some("Filesystem access");
    }
    if code.contains("std::net") {
        return Some("Network access");
    }
    if code.contains("std::process") {
        return Some("Process access");
    }
    if code.contains("std::thread") || code.contains("thread::spawn") {
        return Some("Threading");
    }
    if code.contains("std::env") || code.contains("env::var") {
        return Some("Environment access");
    }
    None
}

fn unwrap_call(code: &str) -> Option<&'static str> {
    code.contains(".unwrap()").then_some("unwrap() on the render path")
}

fn print_call(code: &str) -> Option<&'static str> {
    ["println!", "eprintln!", "print!", "eprint!", "dbg!"]
        .iter()
        .any(|mac| code.contains(mac))
        .then_some("Printing from the library")
}

fn report(violations: &[String], headline: &str) {
    if violations.is_empty() {
        return;
    }

    eprintln!("\n❌ {headline}\n");
    for violation in violations {
        eprintln!("  ❌ {violation}");
    }

    panic!("\nFound {} violation(s).\nFix these before merging!", violations.len());
}

#[test]
fn test_render_path_modules_exist() {
    for path in render_path() {
        assert!(path.exists(), "missing render path module {}", path.display());
    }
}

#[test]
fn test_no_io_on_render_path() {
    let violations = scan(&render_path(), impure_call);
    report(&violations, "CRITICAL: I/O found on the render path!");
}

#[test]
fn test_no_unwrap_on_render_path() {
    let violations = scan(&render_path(), unwrap_call);
    report(&violations, "CRITICAL: unwrap() found on the render path!");
}

#[test]
fn test_library_never_prints() {
    let violations = scan(&rust_files("moo/core/src"), print_call);
    report(&violations, "CRITICAL: The library prints instead of logging through tracing!");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impure_call_detection() {
        assert_eq!(impure_call("let s = std::fs::read_to_string(p)?;"), Some("Filesystem access"));
        assert_eq!(impure_call("std::thread::spawn(|| ());"), Some("Threading"));
        assert_eq!(impure_call("let x = balloon(action, message, wrap);"), None);
    }

    #[test]
    fn test_unwrap_detection() {
        assert!(unwrap_call("let x = y.unwrap();").is_some());
        assert!(unwrap_call("let x = y.unwrap_or(&z);").is_none());
    }
}
