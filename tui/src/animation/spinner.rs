//! Spinner
//!
//! A looping glyph animation whose only job is to show the process is alive.
//! It knows nothing about task progress.

use std::time::Duration;

const LINE: &[&str] = &["|", "/", "-", "\\"];
const DOT: &[&str] = &["⣾ ", "⣽ ", "⣻ ", "⢿ ", "⡿ ", "⣟ ", "⣯ ", "⣷ "];
const MINI_DOT: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const POINTS: &[&str] = &["∙∙∙", "●∙∙", "∙●∙", "∙∙●"];

/// Built-in spinner glyph sets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SpinnerStyle {
    /// `| / - \`
    #[default]
    Line,
    /// Braille dots
    Dot,
    /// Smaller braille dots
    MiniDot,
    /// Three dots filling up
    Points,
}

impl SpinnerStyle {
    /// Frames and frame interval for this style
    pub fn frames(self) -> (&'static [&'static str], Duration) {
        match self {
            Self::Line => (LINE, Duration::from_millis(100)),
            Self::Dot => (DOT, Duration::from_millis(100)),
            Self::MiniDot => (MINI_DOT, Duration::from_millis(83)),
            Self::Points => (POINTS, Duration::from_millis(143)),
        }
    }
}

/// Spinner animation cursor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spinner {
    frames: &'static [&'static str],
    interval: Duration,
    index: usize,
}

impl Spinner {
    pub fn new(style: SpinnerStyle) -> Self {
        let (frames, interval) = style.frames();
        Self {
            frames,
            interval,
            index: 0,
        }
    }

    /// Advance to the next frame, wrapping at the end
    pub fn tick(&mut self) {
        self.index = (self.index + 1) % self.frames.len();
    }

    /// Current glyph
    pub fn frame(&self) -> &'static str {
        self.frames[self.index]
    }

    /// Current frame index
    pub fn phase(&self) -> usize {
        self.index
    }

    /// Time between frames
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new(SpinnerStyle::default())
    }
}
