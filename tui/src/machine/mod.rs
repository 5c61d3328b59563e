//! State Machine
//!
//! Pure event handling for a run: events in, commands out.

mod events;
mod state;

pub use events::{Command, Event, Key};
pub use state::{Phase, ProgressState};
