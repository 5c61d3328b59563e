//! Terminal Ownership
//!
//! The status line is redrawn in place. A stray print from library code
//! would tear it, so only the binary may write to stdout or stderr directly,
//! and only after the terminal is restored.

use architectural_enforcement::{assert_clean, scan, tui_src};

const PRINT_MACROS: &[&str] = &["print!(", "println!(", "eprint!(", "eprintln!(", "dbg!("];

#[test]
fn test_no_direct_printing_in_library() {
    let violations = scan(&tui_src(), true, |path, code| {
        !path.ends_with("main.rs") && PRINT_MACROS.iter().any(|m| code.contains(m))
    });
    assert_clean("direct terminal output outside main.rs", &violations);
}

#[test]
fn test_no_raw_stdout_handles_outside_surface() {
    let violations = scan(&tui_src(), true, |path, code| {
        let owner = path.ends_with("surface.rs") || path.ends_with("main.rs");
        !owner && code.contains("stdout()")
    });
    assert_clean("stdout handle outside surface.rs", &violations);
}
