//! Main Application
//!
//! The App drives a run: it owns the [`ProgressState`], feeds it events and
//! carries out the commands it returns.
//!
//! # Event Sources
//!
//! One `tokio::select!` loop multiplexes everything:
//! 1. Task completions, sent over an mpsc channel by the spawned executor
//! 2. Spinner and progress-bar tick deadlines
//! 3. Terminal input (key presses, resizes)
//!
//! Producers never touch the state. Every event goes through
//! [`ProgressState::update`] and the status line is redrawn afterwards, all
//! on the loop's own task, so nothing else ever writes to the terminal.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::Event as TermEvent;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::config::{Config, ExecutionConfig, ExecutionMode};
use crate::error::BootstrapError;
use crate::input;
use crate::machine::{Command, Event, Phase, ProgressState};
use crate::render::Renderer;
use crate::surface::StatusSurface;
use crate::tasks::{
    execute_with_timeout, FixedDelay, RandomDelay, ShellExecutor, SimulatedExecutor, TaskExecutor,
    TaskOutcome,
};
use crate::theme::Theme;

/// How a run ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every task succeeded
    Completed { tasks: usize },
    /// A task failed and the run stopped
    Failed { index: usize, cause: String },
    /// The user cancelled
    Cancelled { completed: usize },
}

impl RunOutcome {
    /// Process exit status for this outcome
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Completed { .. } | Self::Cancelled { .. } => 0,
            Self::Failed { .. } => 1,
        }
    }
}

/// The executor task currently running
struct InFlight {
    index: usize,
    handle: JoinHandle<()>,
}

/// Main application state
pub struct App {
    // === Core State ===
    /// State machine
    state: ProgressState,
    /// Status line renderer
    renderer: Renderer,

    // === Task Execution ===
    /// Performs each task's work
    executor: Arc<dyn TaskExecutor>,
    /// Per-task time limit
    task_timeout: Option<Duration>,
    /// The one task in flight
    in_flight: Option<InFlight>,

    // === Event Queue ===
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,

    // === Animation Timers ===
    /// When the next spinner tick is due
    spinner_due: Option<Instant>,
    /// When the next progress tick is due
    progress_due: Option<Instant>,
}

impl App {
    /// Create an app over an initial state
    pub fn new(state: ProgressState, renderer: Renderer, executor: Arc<dyn TaskExecutor>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state,
            renderer,
            executor,
            task_timeout: None,
            in_flight: None,
            events_tx,
            events_rx,
            spinner_due: None,
            progress_due: None,
        }
    }

    /// Build an app from resolved configuration and the current viewport
    pub fn from_config(config: &Config, viewport: (u16, u16)) -> Self {
        let state = ProgressState::new(
            config.tasks.clone(),
            config.display.spinner(),
            config.display.progress(),
        )
        .with_viewport(viewport.0, viewport.1);
        let renderer = Renderer::new(Theme::default(), config.display.bar_width);

        Self::new(state, renderer, executor_for(&config.execution))
            .with_task_timeout(config.execution.timeout)
    }

    /// Fail any task that runs longer than `limit`
    #[must_use]
    pub fn with_task_timeout(mut self, limit: Option<Duration>) -> Self {
        self.task_timeout = limit;
        self
    }

    /// Current state
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Run until the machine quits.
    ///
    /// `input` is the terminal event stream; when it ends the run carries on
    /// without input. Whatever task is still in flight when the loop exits
    /// is aborted.
    pub async fn run<S, I>(&mut self, surface: &mut S, input: I) -> Result<RunOutcome, BootstrapError>
    where
        S: StatusSurface,
        I: Stream<Item = io::Result<TermEvent>> + Unpin,
    {
        let result = self.event_loop(surface, input).await;
        self.abort_in_flight();
        result?;

        let outcome = self.outcome();
        tracing::info!(?outcome, "run finished");
        Ok(outcome)
    }

    async fn event_loop<S, I>(&mut self, surface: &mut S, mut input: I) -> Result<(), BootstrapError>
    where
        S: StatusSurface,
        I: Stream<Item = io::Result<TermEvent>> + Unpin,
    {
        let commands = self.state.init();
        let mut running = self.execute(commands, surface)?;
        self.draw(surface)?;

        let mut input_open = true;
        while running {
            let event = tokio::select! {
                Some(event) = self.events_rx.recv() => event,

                _ = wait_until(self.spinner_due) => {
                    self.spinner_due = None;
                    Event::SpinnerTick
                }

                _ = wait_until(self.progress_due) => {
                    self.progress_due = None;
                    Event::ProgressTick
                }

                maybe_event = input.next(), if input_open => match maybe_event {
                    Some(Ok(term_event)) => match input::translate(term_event) {
                        Some(event) => event,
                        None => continue,
                    },
                    Some(Err(e)) => return Err(BootstrapError::Input(e)),
                    None => {
                        tracing::debug!("input stream closed");
                        input_open = false;
                        continue;
                    }
                },
            };

            let commands = self.state.update(event);
            running = self.execute(commands, surface)?;
            self.draw(surface)?;
        }

        Ok(())
    }

    /// Carry out commands. Returns `false` once the machine asked to quit.
    fn execute<S: StatusSurface>(
        &mut self,
        commands: Vec<Command>,
        surface: &mut S,
    ) -> Result<bool, BootstrapError> {
        let mut keep_running = true;
        for command in commands {
            match command {
                Command::StartTask { index } => self.start_task(index),
                Command::ScheduleSpinnerTick { after } => {
                    self.spinner_due = Some(Instant::now() + after);
                }
                Command::ScheduleProgressTick { after } => {
                    self.progress_due = Some(Instant::now() + after);
                }
                Command::Announce { index } => {
                    if let Some(task) = self.state.tasks().get(index) {
                        tracing::info!(index, task = %task.id, "task completed");
                        surface
                            .print_above(self.renderer.render_completed(task))
                            .map_err(BootstrapError::Render)?;
                    }
                }
                Command::Quit => keep_running = false,
            }
        }
        Ok(keep_running)
    }

    fn start_task(&mut self, index: usize) {
        let Some(task) = self.state.tasks().get(index).cloned() else {
            tracing::error!(index, "no task at index");
            return;
        };
        tracing::info!(index, task = %task.id, "starting task");

        let executor = Arc::clone(&self.executor);
        let events = self.events_tx.clone();
        let limit = self.task_timeout;
        let handle = tokio::spawn(async move {
            let outcome = execute_with_timeout(executor.as_ref(), &task, limit).await;
            if let TaskOutcome::Failed(cause) = &outcome {
                tracing::warn!(index, task = %task.id, %cause, "task failed");
            }
            // Nobody is listening after a cancel; dropping the result is fine.
            let _ = events.send(Event::TaskCompleted { index, outcome });
        });

        self.in_flight = Some(InFlight { index, handle });
    }

    fn abort_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            if !in_flight.handle.is_finished() {
                tracing::debug!(index = in_flight.index, "abandoning in-flight task");
                in_flight.handle.abort();
            }
        }
    }

    fn draw<S: StatusSurface>(&self, surface: &mut S) -> Result<(), BootstrapError> {
        surface
            .draw_status(self.renderer.render(&self.state))
            .map_err(BootstrapError::Render)
    }

    fn outcome(&self) -> RunOutcome {
        match self.state.phase() {
            Phase::Done => RunOutcome::Completed {
                tasks: self.state.tasks().len(),
            },
            Phase::Failed { index, cause } => RunOutcome::Failed {
                index: *index,
                cause: cause.clone(),
            },
            Phase::Cancelled | Phase::Running => RunOutcome::Cancelled {
                completed: self.state.completed(),
            },
        }
    }
}

/// Executor for the configured mode
pub fn executor_for(config: &ExecutionConfig) -> Arc<dyn TaskExecutor> {
    match config.mode {
        ExecutionMode::Simulated => Arc::new(SimulatedExecutor::new(RandomDelay::new(config.max_delay))),
        ExecutionMode::Fixed => Arc::new(SimulatedExecutor::new(FixedDelay(config.fixed_delay))),
        ExecutionMode::Shell => Arc::new(ShellExecutor::new(config.shell.clone())),
    }
}

/// Resolve at `deadline`, or never
async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
