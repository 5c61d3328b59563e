//! Task List
//!
//! The ordered, immutable list of tasks a run works through. Built once at
//! startup from configuration and shared read-only with the state machine,
//! the renderer and the executors.

use std::sync::Arc;

/// A single unit of work, identified by its display name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    /// Identifier shown in the status line
    pub id: String,
    /// Shell command to run for this task (falls back to `id`)
    pub command: Option<String>,
}

impl Task {
    /// Create a task with no explicit command
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            command: None,
        }
    }

    /// Attach a shell command
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// The command line a shell executor runs for this task
    pub fn command_line(&self) -> &str {
        self.command.as_deref().unwrap_or(&self.id)
    }
}

/// Ordered, immutable sequence of tasks
///
/// Cloning is cheap: the tasks live behind an `Arc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskList {
    tasks: Arc<[Task]>,
}

impl TaskList {
    /// Build a list from tasks in execution order
    pub fn new(tasks: impl IntoIterator<Item = Task>) -> Self {
        Self {
            tasks: tasks.into_iter().collect(),
        }
    }

    /// Build a list of tasks that only carry a name
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Task::new))
    }

    /// Number of tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether there is nothing to run
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Task at `index`, if any
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Whether `index` is the final task
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.tasks.len()
    }

    /// Iterate in execution order
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
