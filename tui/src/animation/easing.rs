//! Easing
//!
//! Step functions moving the progress bar's displayed fraction toward its
//! target. Every curve here is monotonic on `[0, 1]` and never overshoots,
//! so the bar never runs backwards.

/// Tween curves, applied to normalized time `t` in `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EasingFunction {
    /// Constant speed
    Linear,

    /// Fast start, slow end
    #[default]
    EaseOutQuad,

    /// Sharper fast start, slow end
    EaseOutCubic,

    /// Slow start and end
    EaseInOutCubic,
}

impl EasingFunction {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// How the displayed fraction approaches a new target
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Smoothing {
    /// Close `factor` of the remaining gap every frame
    Exponential { factor: f64 },

    /// Replay a fixed-length curve from wherever the bar currently is
    Tween { frames: u32, easing: EasingFunction },
}

impl Smoothing {
    pub fn exponential(factor: f64) -> Self {
        Self::Exponential {
            factor: factor.clamp(f64::EPSILON, 1.0),
        }
    }

    pub fn tween(frames: u32, easing: EasingFunction) -> Self {
        Self::Tween {
            frames: frames.max(1),
            easing,
        }
    }
}

impl Default for Smoothing {
    fn default() -> Self {
        Self::exponential(0.25)
    }
}
