//! Progress bar fill animation
//!
//! Tracks the fraction the bar currently shows and the fraction it is
//! heading for. Targets only ever move forward and every step lands between
//! the current value and the target, so the displayed fraction is
//! non-decreasing and settles exactly on the target.

use std::time::Duration;

use super::easing::Smoothing;

/// Gap below which the bar snaps onto its target
const SETTLE_EPSILON: f64 = 1e-3;

/// Animated fill state of the progress bar
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressAnimation {
    displayed: f64,
    target: f64,
    smoothing: Smoothing,
    interval: Duration,
    /// Whether a tick is outstanding
    animating: bool,
    /// Tween bookkeeping: where the current curve started and how far along it is
    tween_start: f64,
    tween_frame: u32,
}

impl ProgressAnimation {
    /// Create an empty bar animating at `fps` frames per second
    pub fn new(smoothing: Smoothing, fps: u32) -> Self {
        Self {
            displayed: 0.0,
            target: 0.0,
            smoothing,
            interval: Duration::from_secs(1) / fps.max(1),
            animating: false,
            tween_start: 0.0,
            tween_frame: 0,
        }
    }

    /// Fraction currently drawn
    pub fn displayed(&self) -> f64 {
        self.displayed
    }

    /// Fraction the bar is moving toward
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Time between animation frames
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the bar still has ground to cover
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Point the bar at a new fraction.
    ///
    /// Returns `true` when a tick chain has to be started, i.e. the bar was
    /// idle and now has somewhere to go. Targets behind the current one are
    /// ignored.
    pub fn set_target(&mut self, target: f64) -> bool {
        let target = target.clamp(0.0, 1.0);
        if target <= self.target {
            return false;
        }

        self.target = target;
        self.tween_start = self.displayed;
        self.tween_frame = 0;

        let start_ticking = !self.animating;
        self.animating = true;
        start_ticking
    }

    /// Advance one frame. Returns `true` while more frames are needed.
    pub fn advance(&mut self) -> bool {
        if !self.animating {
            return false;
        }

        let next = match self.smoothing {
            Smoothing::Exponential { factor } => {
                self.displayed + (self.target - self.displayed) * factor
            }
            Smoothing::Tween { frames, easing } => {
                self.tween_frame = (self.tween_frame + 1).min(frames);
                let t = f64::from(self.tween_frame) / f64::from(frames);
                self.tween_start + (self.target - self.tween_start) * easing.apply(t)
            }
        };

        self.displayed = next.clamp(self.displayed, self.target);
        if self.target - self.displayed < SETTLE_EPSILON {
            self.displayed = self.target;
            self.animating = false;
        }
        self.animating
    }

    /// Jump straight to a full bar and stop animating
    pub fn finish(&mut self) {
        self.displayed = 1.0;
        self.target = 1.0;
        self.animating = false;
    }

    /// Stop animating where the bar is
    pub fn freeze(&mut self) {
        self.animating = false;
    }
}

impl Default for ProgressAnimation {
    fn default() -> Self {
        Self::new(Smoothing::default(), 60)
    }
}
