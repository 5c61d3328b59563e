//! Tasks
//!
//! The ordered task list and the executors that perform each task's work.

mod delay;
mod executor;
mod list;

pub use delay::{DurationProvider, FixedDelay, RandomDelay};
pub use executor::{
    execute_with_timeout, ShellExecutor, SimulatedExecutor, TaskExecutor, TaskOutcome,
};
pub use list::{Task, TaskList};
