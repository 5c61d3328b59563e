//! Events and Commands
//!
//! Everything the state machine reacts to arrives as an [`Event`]; everything
//! it wants done in the outside world leaves as a [`Command`]. Executors,
//! tickers and the input listener only ever produce events; the driver only
//! ever interprets commands.

use std::time::Duration;

use crate::tasks::TaskOutcome;

/// Keys the machine distinguishes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Ctrl+C
    Interrupt,
    /// Esc
    Escape,
    /// Any printable character
    Char(char),
    /// Anything else
    Other,
}

impl Key {
    /// Whether this key cancels the run
    pub fn is_cancel(self) -> bool {
        matches!(self, Self::Interrupt | Self::Escape | Self::Char('q'))
    }
}

/// Input to the state machine
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// The in-flight task finished
    TaskCompleted {
        /// Index of the task that ran
        index: usize,
        /// How it went
        outcome: TaskOutcome,
    },

    /// Spinner frame timer fired
    SpinnerTick,

    /// Progress bar frame timer fired
    ProgressTick,

    /// Terminal was resized
    Resize {
        /// New width in cells
        width: u16,
        /// New height in rows
        height: u16,
    },

    /// A key was pressed
    Key(Key),
}

/// Side effects requested by a transition
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start the executor for the task at `index`
    StartTask { index: usize },

    /// Deliver a `SpinnerTick` after `after`
    ScheduleSpinnerTick { after: Duration },

    /// Deliver a `ProgressTick` after `after`
    ScheduleProgressTick { after: Duration },

    /// Print a permanent completion line for the task at `index`
    Announce { index: usize },

    /// Stop the loop after the current render
    Quit,
}
