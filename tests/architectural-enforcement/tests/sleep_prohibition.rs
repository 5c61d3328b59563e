//! Sleep Prohibition
//!
//! The event loop waits on channels, input and tick deadlines. Nothing may
//! block a thread, and the only timed wait outside the loop is the simulated
//! executor standing in for real work.

use architectural_enforcement::{assert_clean, scan, tui_src};

/// Files allowed to call `tokio::time::sleep` in production code
const SLEEP_ALLOWED: &[&str] = &["tasks/executor.rs"];

#[test]
fn test_no_thread_sleep_anywhere() {
    // Blocking the current-thread runtime freezes the display, tests included.
    let violations = scan(&tui_src(), false, |_, code| {
        code.contains("thread::sleep(")
    });
    assert_clean("std::thread::sleep in TUI sources", &violations);
}

#[test]
fn test_async_sleep_only_in_simulated_executor() {
    let violations = scan(&tui_src(), true, |path, code| {
        let allowed = SLEEP_ALLOWED.iter().any(|f| path.ends_with(f));
        !allowed && (code.contains("::sleep(") || code.contains(" sleep("))
    });
    assert_clean("sleep outside the simulated executor", &violations);
}

#[test]
fn test_no_polling_intervals() {
    // Ticks are one-shot deadlines scheduled by the state machine.
    let violations = scan(&tui_src(), true, |_, code| code.contains("time::interval("));
    assert_clean("fixed-rate interval timer", &violations);
}
