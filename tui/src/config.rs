//! TOML Configuration File Support
//!
//! Loads the task list and display/execution settings, supporting a TOML
//! configuration file at `~/.config/bootstrap/bootstrap.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (`BOOTSTRAP_CONFIG` selects the file)
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [[tasks]]
//! name = "kind create cluster"
//!
//! [[tasks]]
//! name = "kubectl apply"
//! command = "kubectl apply -f manifests/"
//!
//! [execution]
//! mode = "shell"
//! timeout_secs = 300
//!
//! [display]
//! bar_width = 40
//! spinner = "dot"
//! progress_fps = 60
//! easing = "exponential"
//! smoothing = 0.25
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::{EasingFunction, ProgressAnimation, Smoothing, Spinner, SpinnerStyle};
use crate::render::DEFAULT_BAR_WIDTH;
use crate::tasks::{Task, TaskList};

/// Tasks run when nothing else is configured
pub const DEFAULT_TASKS: &[&str] = &[
    "kind create cluster",
    "kubectl apply",
    "a",
    "b",
    "c",
    "d",
    "e",
    "f",
    "g",
    "h",
    "i",
    "j",
];

/// Upper bound of the default simulated task duration
pub const DEFAULT_MAX_DELAY_MS: u64 = 2000;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// One `[[tasks]]` entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskToml {
    /// Name shown in the status line
    pub name: String,

    /// Shell command (defaults to the name)
    #[serde(default)]
    pub command: Option<String>,
}

/// How tasks are executed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Random delay, always succeeds
    #[default]
    Simulated,
    /// Fixed delay, always succeeds
    Fixed,
    /// Run each task's command in a shell
    Shell,
}

/// Execution section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionToml {
    /// Execution mode
    pub mode: Option<ExecutionMode>,

    /// Upper bound for simulated delays in milliseconds
    pub max_delay_ms: Option<u64>,

    /// Delay for fixed mode in milliseconds
    pub fixed_delay_ms: Option<u64>,

    /// Per-task timeout in seconds (0 = none)
    pub timeout_secs: Option<u64>,

    /// Shell used in shell mode
    pub shell: Option<String>,
}

/// Spinner glyph set names
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinnerName {
    Line,
    Dot,
    MiniDot,
    Points,
}

impl From<SpinnerName> for SpinnerStyle {
    fn from(name: SpinnerName) -> Self {
        match name {
            SpinnerName::Line => Self::Line,
            SpinnerName::Dot => Self::Dot,
            SpinnerName::MiniDot => Self::MiniDot,
            SpinnerName::Points => Self::Points,
        }
    }
}

/// Progress bar easing names
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingName {
    Exponential,
    Linear,
    EaseOutQuad,
    EaseOutCubic,
    EaseInOutCubic,
}

/// Display section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayToml {
    /// Progress bar width in cells
    pub bar_width: Option<u16>,

    /// Spinner glyph set
    pub spinner: Option<SpinnerName>,

    /// Progress animation frame rate
    pub progress_fps: Option<u32>,

    /// Easing curve for the progress bar
    pub easing: Option<EasingName>,

    /// Fraction of the remaining gap closed per frame (exponential easing)
    pub smoothing: Option<f64>,

    /// Frames per tween (curve easings)
    pub tween_frames: Option<u32>,
}

/// Root of the TOML configuration file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Tasks in execution order
    pub tasks: Option<Vec<TaskToml>>,

    /// Execution settings
    pub execution: ExecutionToml,

    /// Display settings
    pub display: DisplayToml,
}

impl ConfigFile {
    /// Parse a TOML document
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Read and parse a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Default config file location (`$XDG_CONFIG_HOME/bootstrap/bootstrap.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bootstrap").join("bootstrap.toml"))
    }
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Resolved execution settings
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionConfig {
    pub mode: ExecutionMode,
    pub max_delay: Duration,
    pub fixed_delay: Duration,
    pub timeout: Option<Duration>,
    pub shell: String,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Simulated,
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
            fixed_delay: Duration::from_millis(500),
            timeout: None,
            shell: "sh".to_string(),
        }
    }
}

/// Resolved display settings
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayConfig {
    pub bar_width: u16,
    pub spinner: SpinnerStyle,
    pub progress_fps: u32,
    pub easing: EasingName,
    pub smoothing: f64,
    pub tween_frames: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            bar_width: DEFAULT_BAR_WIDTH,
            spinner: SpinnerStyle::Line,
            progress_fps: 60,
            easing: EasingName::Exponential,
            smoothing: 0.25,
            tween_frames: 30,
        }
    }
}

impl DisplayConfig {
    /// Spinner configured for this run
    pub fn spinner(&self) -> Spinner {
        Spinner::new(self.spinner)
    }

    /// Progress bar animation configured for this run
    pub fn progress(&self) -> ProgressAnimation {
        let curve = |easing| Smoothing::tween(self.tween_frames, easing);
        let smoothing = match self.easing {
            EasingName::Exponential => Smoothing::exponential(self.smoothing),
            EasingName::Linear => curve(EasingFunction::Linear),
            EasingName::EaseOutQuad => curve(EasingFunction::EaseOutQuad),
            EasingName::EaseOutCubic => curve(EasingFunction::EaseOutCubic),
            EasingName::EaseInOutCubic => curve(EasingFunction::EaseInOutCubic),
        };
        ProgressAnimation::new(smoothing, self.progress_fps)
    }
}

/// Complete configuration for a run
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub tasks: TaskList,
    pub execution: ExecutionConfig,
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tasks: TaskList::from_names(DEFAULT_TASKS.iter().copied()),
            execution: ExecutionConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the default location if a file
    /// exists there, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                ConfigFile::load(path)?
            }
            None => match ConfigFile::default_path().filter(|p| p.is_file()) {
                Some(path) => {
                    tracing::debug!(path = %path.display(), "loading default config");
                    ConfigFile::load(&path)?
                }
                None => ConfigFile::default(),
            },
        };
        Self::from_file(file)
    }

    /// Resolve a parsed file on top of the defaults
    pub fn from_file(file: ConfigFile) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_file(file);
        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(tasks) = file.tasks {
            self.tasks = TaskList::new(tasks.into_iter().map(|t| Task {
                id: t.name,
                command: t.command,
            }));
        }

        let exec = file.execution;
        if let Some(mode) = exec.mode {
            self.execution.mode = mode;
        }
        if let Some(ms) = exec.max_delay_ms {
            self.execution.max_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = exec.fixed_delay_ms {
            self.execution.fixed_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = exec.timeout_secs {
            self.execution.timeout = timeout_from_secs(secs);
        }
        if let Some(shell) = exec.shell {
            self.execution.shell = shell;
        }

        let display = file.display;
        if let Some(width) = display.bar_width {
            self.display.bar_width = width;
        }
        if let Some(spinner) = display.spinner {
            self.display.spinner = spinner.into();
        }
        if let Some(fps) = display.progress_fps {
            self.display.progress_fps = fps;
        }
        if let Some(easing) = display.easing {
            self.display.easing = easing;
        }
        if let Some(smoothing) = display.smoothing {
            self.display.smoothing = smoothing;
        }
        if let Some(frames) = display.tween_frames {
            self.display.tween_frames = frames;
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.bar_width == 0 {
            return Err(ConfigError::ValidationError(
                "display.bar_width must be at least 1".to_string(),
            ));
        }
        if !(1..=240).contains(&self.display.progress_fps) {
            return Err(ConfigError::ValidationError(format!(
                "display.progress_fps must be between 1 and 240, got {}",
                self.display.progress_fps
            )));
        }
        if !(self.display.smoothing > 0.0 && self.display.smoothing <= 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "display.smoothing must be in (0, 1], got {}",
                self.display.smoothing
            )));
        }
        if self.display.tween_frames == 0 {
            return Err(ConfigError::ValidationError(
                "display.tween_frames must be at least 1".to_string(),
            ));
        }
        if self.execution.mode == ExecutionMode::Shell && self.execution.shell.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "execution.shell must not be empty in shell mode".to_string(),
            ));
        }
        if let Some(task) = self.tasks.iter().find(|t| t.id.trim().is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "task names must not be empty (command: {:?})",
                task.command
            )));
        }
        Ok(())
    }
}

/// `0` disables the timeout
pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
