//! Task Executors
//!
//! An executor performs the work behind one task and reports a single
//! [`TaskOutcome`]. The driver spawns exactly one execution at a time and
//! turns its outcome into a `TaskCompleted` event.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use super::delay::DurationProvider;
use super::list::Task;

/// Result of running one task
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The task finished successfully
    Succeeded,
    /// The task failed; carries a human-readable cause
    Failed(String),
}

impl TaskOutcome {
    /// Whether the task succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Performs the work behind a task
#[async_trait]
pub trait TaskExecutor: Send + Sync {
    /// Run `task` to completion and report how it went
    async fn execute(&self, task: &Task) -> TaskOutcome;
}

/// Stand-in executor that waits for a provided duration and always succeeds
pub struct SimulatedExecutor<D> {
    durations: D,
}

impl<D: DurationProvider> SimulatedExecutor<D> {
    /// Create an executor drawing task durations from `durations`
    pub fn new(durations: D) -> Self {
        Self { durations }
    }
}

#[async_trait]
impl<D: DurationProvider> TaskExecutor for SimulatedExecutor<D> {
    async fn execute(&self, task: &Task) -> TaskOutcome {
        let delay = self.durations.delay_for(task);
        tracing::debug!(task = %task.id, delay_ms = delay.as_millis() as u64, "simulating task");
        tokio::time::sleep(delay).await;
        TaskOutcome::Succeeded
    }
}

/// Runs each task's command through a shell
pub struct ShellExecutor {
    shell: String,
}

impl ShellExecutor {
    /// Create an executor that runs commands via `<shell> -c <command>`
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new("sh")
    }
}

#[async_trait]
impl TaskExecutor for ShellExecutor {
    async fn execute(&self, task: &Task) -> TaskOutcome {
        let command = task.command_line();
        tracing::debug!(task = %task.id, %command, shell = %self.shell, "running task command");

        // Output is captured so it never tears through the status line.
        // kill_on_drop reaps the child when a cancelled run aborts us.
        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => TaskOutcome::Succeeded,
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let cause = match stderr.lines().rev().find(|l| !l.trim().is_empty()) {
                    Some(line) => format!("{}: {}", output.status, line.trim()),
                    None => output.status.to_string(),
                };
                TaskOutcome::Failed(cause)
            }
            Err(e) => TaskOutcome::Failed(format!("failed to spawn {}: {}", self.shell, e)),
        }
    }
}

/// Run `task` on `executor`, converting an overrun of `limit` into a failure
pub async fn execute_with_timeout(
    executor: &dyn TaskExecutor,
    task: &Task,
    limit: Option<Duration>,
) -> TaskOutcome {
    let Some(limit) = limit else {
        return executor.execute(task).await;
    };

    match tokio::time::timeout(limit, executor.execute(task)).await {
        Ok(outcome) => outcome,
        Err(_) => {
            tracing::warn!(task = %task.id, limit_secs = limit.as_secs_f64(), "task timed out");
            TaskOutcome::Failed(format!("timed out after {}s", limit.as_secs_f64()))
        }
    }
}
