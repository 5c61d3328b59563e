//! Panic Prohibition
//!
//! A panic with raw mode on leaves the user's terminal unusable. Production
//! code propagates errors instead of unwrapping them.

use architectural_enforcement::{assert_clean, scan, tui_src};

#[test]
fn test_no_unwrap_in_production_code() {
    let violations = scan(&tui_src(), true, |_, code| {
        code.contains(".unwrap()") || code.contains(".expect(")
    });
    assert_clean("unwrap/expect in production code", &violations);
}

#[test]
fn test_no_explicit_panics_in_production_code() {
    let violations = scan(&tui_src(), true, |_, code| {
        code.contains("panic!(") || code.contains("todo!(") || code.contains("unimplemented!(")
    });
    assert_clean("explicit panic in production code", &violations);
}
