//! Bootstrap TUI - run tasks one at a time behind a live status line
//!
//! This crate executes an ordered list of tasks sequentially while drawing a
//! single, continuously updated terminal line: a spinner, the current task's
//! name, an eased progress bar and a `done/total` counter.
//!
//! # Architecture
//!
//! - **Machine**: pure state machine, events in and commands out
//! - **Animation**: spinner frames and progress-bar easing
//! - **Render**: state to one styled line
//! - **App**: async driver multiplexing executors, tick timers and input
//! - **Tasks**: the task list and pluggable executors
//! - **Surface**: where lines are drawn (inline terminal viewport)

pub mod animation;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod machine;
pub mod render;
pub mod surface;
pub mod tasks;
pub mod theme;

pub use app::{App, RunOutcome};
pub use error::BootstrapError;
