//! Duration providers for simulated tasks

use std::time::Duration;

use rand::Rng;

use super::list::Task;

/// Decides how long a simulated task takes
pub trait DurationProvider: Send + Sync {
    /// Delay before `task` reports completion
    fn delay_for(&self, task: &Task) -> Duration;
}

/// Every task takes the same time
#[derive(Clone, Copy, Debug)]
pub struct FixedDelay(pub Duration);

impl DurationProvider for FixedDelay {
    fn delay_for(&self, _task: &Task) -> Duration {
        self.0
    }
}

/// Uniformly random delay in `0..max`, whole milliseconds
#[derive(Clone, Copy, Debug)]
pub struct RandomDelay {
    max: Duration,
}

impl RandomDelay {
    pub fn new(max: Duration) -> Self {
        Self { max }
    }
}

impl DurationProvider for RandomDelay {
    fn delay_for(&self, _task: &Task) -> Duration {
        let max_ms = self.max.as_millis().min(u64::MAX as u128) as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..max_ms))
    }
}

impl<F> DurationProvider for F
where
    F: Fn(&Task) -> Duration + Send + Sync,
{
    fn delay_for(&self, task: &Task) -> Duration {
        self(task)
    }
}
