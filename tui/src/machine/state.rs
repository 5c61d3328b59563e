//! Progress State Machine
//!
//! [`ProgressState`] is the whole of the application's mutable state. It is
//! changed only by [`ProgressState::update`], which takes one [`Event`] and
//! returns the [`Command`]s the driver should carry out. Nothing here touches
//! the terminal, a timer or a task, which keeps every transition testable
//! with plain synthetic events.
//!
//! # Phases
//!
//! ```text
//! Running(0) ──TaskCompleted──▶ Running(1) ──▶ … ──▶ Done
//!     │                                  │
//!     ├──failure──▶ Failed(index, cause) │
//!     └──cancel key──▶ Cancelled ◀───────┘
//! ```
//!
//! Exactly one task is in flight while running: `StartTask` for index `i + 1`
//! is only ever emitted while handling the completion of index `i`.

use crate::animation::{ProgressAnimation, Spinner};
use crate::tasks::{Task, TaskList, TaskOutcome};

use super::events::{Command, Event};

/// Where the run is
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Working through the list
    Running,
    /// Every task completed
    Done,
    /// The task at `index` failed; the run stopped there
    Failed { index: usize, cause: String },
    /// The user cancelled the run
    Cancelled,
}

impl Phase {
    /// Whether no further transitions will do anything
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Application state
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressState {
    tasks: TaskList,
    current_index: usize,
    phase: Phase,
    terminal_width: u16,
    terminal_height: u16,
    spinner: Spinner,
    progress: ProgressAnimation,
}

impl ProgressState {
    /// Create the initial state for a run over `tasks`.
    ///
    /// An empty list starts out `Done`; there is nothing to index into.
    pub fn new(tasks: TaskList, spinner: Spinner, mut progress: ProgressAnimation) -> Self {
        let phase = if tasks.is_empty() {
            progress.finish();
            Phase::Done
        } else {
            Phase::Running
        };

        Self {
            tasks,
            current_index: 0,
            phase,
            terminal_width: 0,
            terminal_height: 0,
            spinner,
            progress,
        }
    }

    /// Seed the viewport size known at startup
    #[must_use]
    pub fn with_viewport(mut self, width: u16, height: u16) -> Self {
        self.terminal_width = width;
        self.terminal_height = height;
        self
    }

    /// Commands that kick off the run
    pub fn init(&self) -> Vec<Command> {
        if self.phase.is_terminal() {
            return vec![Command::Quit];
        }

        vec![
            Command::StartTask {
                index: self.current_index,
            },
            Command::ScheduleSpinnerTick {
                after: self.spinner.interval(),
            },
        ]
    }

    /// Apply one event and return the follow-up commands
    pub fn update(&mut self, event: Event) -> Vec<Command> {
        match event {
            Event::TaskCompleted { index, outcome } => self.complete_task(index, outcome),

            Event::SpinnerTick => {
                if self.phase.is_terminal() {
                    return Vec::new();
                }
                self.spinner.tick();
                vec![Command::ScheduleSpinnerTick {
                    after: self.spinner.interval(),
                }]
            }

            Event::ProgressTick => {
                if self.phase.is_terminal() || !self.progress.advance() {
                    return Vec::new();
                }
                vec![Command::ScheduleProgressTick {
                    after: self.progress.interval(),
                }]
            }

            Event::Resize { width, height } => {
                self.terminal_width = width;
                self.terminal_height = height;
                Vec::new()
            }

            Event::Key(key) => {
                if !key.is_cancel() || self.phase.is_terminal() {
                    return Vec::new();
                }
                self.phase = Phase::Cancelled;
                self.progress.freeze();
                vec![Command::Quit]
            }
        }
    }

    fn complete_task(&mut self, index: usize, outcome: TaskOutcome) -> Vec<Command> {
        // Only the in-flight task may complete; anything else is stale.
        if self.phase.is_terminal() || index != self.current_index {
            return Vec::new();
        }

        if let TaskOutcome::Failed(cause) = outcome {
            self.phase = Phase::Failed { index, cause };
            self.progress.freeze();
            return vec![Command::Quit];
        }

        if self.tasks.is_last(index) {
            self.current_index = self.tasks.len();
            self.phase = Phase::Done;
            self.progress.finish();
            return vec![Command::Announce { index }, Command::Quit];
        }

        self.current_index += 1;
        let mut commands = vec![
            Command::Announce { index },
            Command::StartTask {
                index: self.current_index,
            },
        ];

        let target = self.current_index as f64 / self.tasks.len() as f64;
        if self.progress.set_target(target) {
            commands.push(Command::ScheduleProgressTick {
                after: self.progress.interval(),
            });
        }
        commands
    }

    /// The task list
    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Index of the in-flight task, or the list length once done
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The in-flight task
    pub fn current_task(&self) -> Option<&Task> {
        match self.phase {
            Phase::Running => self.tasks.get(self.current_index),
            _ => None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Number of tasks that completed successfully
    pub fn completed(&self) -> usize {
        match &self.phase {
            Phase::Failed { index, .. } => *index,
            _ => self.current_index,
        }
    }

    pub fn terminal_width(&self) -> u16 {
        self.terminal_width
    }

    pub fn terminal_height(&self) -> u16 {
        self.terminal_height
    }

    pub fn spinner(&self) -> &Spinner {
        &self.spinner
    }

    pub fn progress(&self) -> &ProgressAnimation {
        &self.progress
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::machine::events::Key;
    use crate::animation::{Smoothing, SpinnerStyle};

    fn state(names: &[&str]) -> ProgressState {
        ProgressState::new(
            TaskList::from_names(names.iter().copied()),
            Spinner::new(SpinnerStyle::Line),
            ProgressAnimation::new(Smoothing::exponential(0.25), 60),
        )
        .with_viewport(80, 24)
    }

    fn completed(index: usize) -> Event {
        Event::TaskCompleted {
            index,
            outcome: TaskOutcome::Succeeded,
        }
    }

    fn settle(state: &mut ProgressState) {
        for _ in 0..1_000 {
            if state.update(Event::ProgressTick).is_empty() {
                return;
            }
        }
        panic!("progress never settled");
    }

    #[test]
    fn test_init_starts_first_task_and_spinner() {
        let state = state(&["a", "b"]);
        assert_eq!(
            state.init(),
            vec![
                Command::StartTask { index: 0 },
                Command::ScheduleSpinnerTick {
                    after: Duration::from_millis(100)
                },
            ]
        );
    }

    #[test]
    fn test_two_task_scenario() {
        let mut state = state(&["kind create cluster", "kubectl apply"]);
        assert_eq!(state.init()[0], Command::StartTask { index: 0 });

        let commands = state.update(completed(0));
        assert_eq!(
            commands,
            vec![
                Command::Announce { index: 0 },
                Command::StartTask { index: 1 },
                Command::ScheduleProgressTick {
                    after: Duration::from_secs(1) / 60
                },
            ]
        );
        assert_eq!(state.current_index(), 1);
        assert_eq!(state.progress().target(), 0.5);
        assert!(!state.is_done());

        let commands = state.update(completed(1));
        assert_eq!(commands, vec![Command::Announce { index: 1 }, Command::Quit]);
        assert!(state.is_done());
        assert_eq!(state.current_index(), 2);
        assert_eq!(state.progress().displayed(), 1.0);
    }

    #[test]
    fn test_empty_list_is_done_without_starting_anything() {
        let state = state(&[]);
        assert!(state.is_done());
        assert_eq!(state.current_index(), 0);
        assert!(state.current_task().is_none());
        assert_eq!(state.init(), vec![Command::Quit]);
    }

    #[test]
    fn test_tasks_start_one_at_a_time_in_order() {
        let names: Vec<String> = (0..7).map(|i| format!("task-{i}")).collect();
        let mut state = state(&names.iter().map(String::as_str).collect::<Vec<_>>());

        let mut started: Vec<usize> = state
            .init()
            .into_iter()
            .filter_map(|c| match c {
                Command::StartTask { index } => Some(index),
                _ => None,
            })
            .collect();

        while !state.is_done() {
            let in_flight = *started.last().expect("a task is always in flight");
            let starts: Vec<usize> = state
                .update(completed(in_flight))
                .into_iter()
                .filter_map(|c| match c {
                    Command::StartTask { index } => Some(index),
                    _ => None,
                })
                .collect();
            assert!(starts.len() <= 1, "more than one task started at once");
            started.extend(starts);
        }

        assert_eq!(started, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut state = state(&["a", "b", "c"]);
        state.update(completed(0));

        assert!(state.update(completed(0)).is_empty());
        assert!(state.update(completed(2)).is_empty());
        assert_eq!(state.current_index(), 1);
    }

    #[test]
    fn test_failure_stops_the_run() {
        let mut state = state(&["a", "b", "c"]);
        state.update(completed(0));

        let commands = state.update(Event::TaskCompleted {
            index: 1,
            outcome: TaskOutcome::Failed("exit status: 1".to_string()),
        });

        assert_eq!(commands, vec![Command::Quit]);
        assert_eq!(
            state.phase(),
            &Phase::Failed {
                index: 1,
                cause: "exit status: 1".to_string()
            }
        );
        assert_eq!(state.completed(), 1);
        assert!(!state.is_done());
        assert!(state.update(completed(1)).is_empty());
    }

    #[test]
    fn test_spinner_ticks_until_terminal() {
        let mut state = state(&["a"]);
        let phase_before = state.spinner().phase();

        let commands = state.update(Event::SpinnerTick);
        assert_eq!(state.spinner().phase(), phase_before + 1);
        assert!(matches!(commands[..], [Command::ScheduleSpinnerTick { .. }]));

        state.update(completed(0));
        let phase_done = state.spinner().phase();
        assert!(state.update(Event::SpinnerTick).is_empty());
        assert_eq!(state.spinner().phase(), phase_done);
    }

    #[test]
    fn test_progress_is_monotonic_and_converges() {
        let mut state = state(&["a", "b", "c", "d"]);
        let mut last = state.progress().displayed();

        for index in 0..3 {
            state.update(completed(index));
            // A few frames, then the next task lands mid-animation.
            for _ in 0..3 {
                state.update(Event::ProgressTick);
                assert!(state.progress().displayed() >= last);
                last = state.progress().displayed();
            }
        }

        settle(&mut state);
        assert_eq!(state.progress().displayed(), 0.75);
        assert!(!state.is_done());

        state.update(completed(3));
        assert_eq!(state.progress().displayed(), 1.0);
    }

    #[test]
    fn test_progress_tick_without_target_stops_chain() {
        let mut state = state(&["a", "b"]);
        assert!(state.update(Event::ProgressTick).is_empty());
        assert_eq!(state.progress().displayed(), 0.0);
    }

    #[test]
    fn test_resize_only_touches_viewport() {
        let mut state = state(&["kind create cluster", "kubectl apply"]);
        state.update(completed(0));
        let before = state.clone();

        assert!(state.update(Event::Resize { width: 12, height: 3 }).is_empty());

        assert_eq!(state.terminal_width(), 12);
        assert_eq!(state.terminal_height(), 3);
        assert_eq!(state.current_index(), before.current_index());
        assert_eq!(state.phase(), before.phase());
    }

    #[test]
    fn test_cancel_before_first_completion() {
        let mut state = state(&["a", "b"]);

        assert_eq!(state.update(Event::Key(Key::Escape)), vec![Command::Quit]);
        assert_eq!(state.phase(), &Phase::Cancelled);
        assert!(!state.is_done());

        // The abandoned task's completion has no effect.
        assert!(state.update(completed(0)).is_empty());
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut state = state(&["a"]);
        assert!(state.update(Event::Key(Key::Char('x'))).is_empty());
        assert!(state.update(Event::Key(Key::Other)).is_empty());
        assert_eq!(state.phase(), &Phase::Running);
    }
}
