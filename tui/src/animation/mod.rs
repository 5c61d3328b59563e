//! Animation
//!
//! The two independently ticking sub-widgets of the status line: a cosmetic
//! spinner and the eased progress-bar fill.

mod easing;
mod progress;
mod spinner;

pub use easing::{EasingFunction, Smoothing};
pub use progress::ProgressAnimation;
pub use spinner::{Spinner, SpinnerStyle};
