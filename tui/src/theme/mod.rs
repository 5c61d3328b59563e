//! Theme and Colors
//!
//! The status line's palette, handed to the renderer once at construction.
//! The default is the green bootstrap look: a bright cyan spinner, green task
//! names and check marks, and a dark-to-mint gradient on the progress bar.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Bootstrap Palette
// ============================================================================

/// Progress bar gradient start - deep forest green
pub const GRADIENT_START: Color = Color::Rgb(0x13, 0x2a, 0x21);

/// Progress bar gradient end - mint
pub const GRADIENT_END: Color = Color::Rgb(0x63, 0xd3, 0xa6);

/// Unfilled bar cells
pub const BAR_EMPTY: Color = Color::Rgb(0x60, 0x60, 0x60);

/// Task names and check marks
pub const SUCCESS_GREEN: Color = Color::Green;

/// Failure marker and cause
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Immutable styling for the status line
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    /// Spinner glyph
    pub spinner: Style,
    /// Name of the in-flight task
    pub task_name: Style,
    /// `✓` in completion lines
    pub check_mark: Style,
    /// Final summary line
    pub summary: Style,
    /// Failure line
    pub failure: Style,
    /// Cancellation line and counter
    pub dim: Style,
    /// Filled bar cells blend from the first color to the second
    pub bar_gradient: (Color, Color),
    /// Unfilled bar cells
    pub bar_empty: Style,
    /// Glyph for filled bar cells
    pub bar_full_char: char,
    /// Glyph for unfilled bar cells
    pub bar_empty_char: char,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            spinner: Style::default().fg(Color::LightCyan),
            task_name: Style::default().fg(SUCCESS_GREEN),
            check_mark: Style::default().fg(SUCCESS_GREEN),
            summary: Style::default().add_modifier(Modifier::BOLD),
            failure: Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(DIM_GRAY),
            bar_gradient: (GRADIENT_START, GRADIENT_END),
            bar_empty: Style::default().fg(BAR_EMPTY),
            bar_full_char: '█',
            bar_empty_char: '░',
        }
    }
}

impl Theme {
    /// Color of filled cell `cell` out of `filled`, blending along the gradient
    pub fn gradient_at(&self, cell: usize, filled: usize) -> Color {
        let (start, end) = self.bar_gradient;
        match (start, end) {
            (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
                let t = if filled <= 1 {
                    0.0
                } else {
                    cell as f64 / (filled - 1) as f64
                };
                let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
                Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
            }
            // Named colors can't be blended
            _ => start,
        }
    }
}
