//! Command-line arguments
//!
//! Flags override values from the config file.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{timeout_from_secs, Config, ConfigError, ExecutionMode, SpinnerName};
use crate::tasks::TaskList;

/// Run bootstrap tasks one at a time behind a live progress line
#[derive(Debug, Default, Parser)]
#[command(name = "bootstrap", version, about)]
pub struct Args {
    /// Path to a TOML config file
    #[arg(short, long, env = "BOOTSTRAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Task to run (repeatable, replaces the configured list)
    #[arg(short, long = "task", value_name = "NAME")]
    pub tasks: Vec<String>,

    /// How tasks are executed
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Upper bound for simulated task durations
    #[arg(long, value_name = "MS")]
    pub max_delay_ms: Option<u64>,

    /// Duration of every task in fixed mode
    #[arg(long, value_name = "MS")]
    pub fixed_delay_ms: Option<u64>,

    /// Fail a task that runs longer than this (0 = no limit)
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Progress bar width in cells
    #[arg(long, value_name = "CELLS")]
    pub bar_width: Option<u16>,

    /// Spinner glyph set
    #[arg(long, value_enum)]
    pub spinner: Option<SpinnerArg>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    Simulated,
    Fixed,
    Shell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum SpinnerArg {
    Line,
    Dot,
    MiniDot,
    Points,
}

impl Args {
    /// Load the config file and apply flag overrides on top
    pub fn resolve(&self) -> Result<Config, ConfigError> {
        let mut config = Config::load(self.config.as_deref())?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply(&self, config: &mut Config) {
        if !self.tasks.is_empty() {
            config.tasks = TaskList::from_names(self.tasks.iter().cloned());
        }
        if let Some(mode) = self.mode {
            config.execution.mode = match mode {
                ModeArg::Simulated => ExecutionMode::Simulated,
                ModeArg::Fixed => ExecutionMode::Fixed,
                ModeArg::Shell => ExecutionMode::Shell,
            };
        }
        if let Some(ms) = self.max_delay_ms {
            config.execution.max_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = self.fixed_delay_ms {
            config.execution.fixed_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = self.timeout_secs {
            config.execution.timeout = timeout_from_secs(secs);
        }
        if let Some(width) = self.bar_width {
            config.display.bar_width = width;
        }
        if let Some(spinner) = self.spinner {
            let name = match spinner {
                SpinnerArg::Line => SpinnerName::Line,
                SpinnerArg::Dot => SpinnerName::Dot,
                SpinnerArg::MiniDot => SpinnerName::MiniDot,
                SpinnerArg::Points => SpinnerName::Points,
            };
            config.display.spinner = name.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;
    use std::io::Write;

    use super::*;
    use crate::animation::SpinnerStyle;

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "bootstrap",
            "--task",
            "kind create cluster",
            "-t",
            "kubectl apply",
            "--mode",
            "fixed",
            "--fixed-delay-ms",
            "10",
            "--timeout-secs",
            "0",
            "--spinner",
            "mini-dot",
        ])
        .expect("valid args");

        let mut config = Config::default();
        args.apply(&mut config);

        assert_eq!(
            config.tasks,
            TaskList::from_names(["kind create cluster", "kubectl apply"])
        );
        assert_eq!(config.execution.mode, ExecutionMode::Fixed);
        assert_eq!(config.execution.fixed_delay, Duration::from_millis(10));
        assert_eq!(config.execution.timeout, None);
        assert_eq!(config.display.spinner, SpinnerStyle::MiniDot);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let args = Args::try_parse_from(["bootstrap"]).expect("valid args");
        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial_test::serial]
    fn test_config_path_from_environment() {
        let mut env_file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(env_file, "[[tasks]]\nname = \"from env\"").expect("write config");
        let mut flag_file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(flag_file, "[[tasks]]\nname = \"from flag\"").expect("write config");

        std::env::set_var("BOOTSTRAP_CONFIG", env_file.path());
        let from_env = Args::try_parse_from(["bootstrap"]);
        let from_flag = Args::try_parse_from([
            OsStr::new("bootstrap"),
            OsStr::new("--config"),
            flag_file.path().as_os_str(),
        ]);
        std::env::remove_var("BOOTSTRAP_CONFIG");

        let from_env = from_env.expect("valid args");
        assert_eq!(from_env.config.as_deref(), Some(env_file.path()));
        assert_eq!(
            from_env.resolve().expect("resolves").tasks,
            TaskList::from_names(["from env"])
        );

        let from_flag = from_flag.expect("valid args");
        assert_eq!(
            from_flag.resolve().expect("resolves").tasks,
            TaskList::from_names(["from flag"])
        );
    }

    #[test]
    fn test_zero_bar_width_fails_validation() {
        let args = Args {
            bar_width: Some(0),
            config: Some(PathBuf::from("/nonexistent/bootstrap.toml")),
            ..Args::default()
        };
        // The missing file is reported before validation runs.
        assert!(matches!(args.resolve(), Err(ConfigError::ReadError { .. })));

        let mut config = Config::default();
        Args {
            bar_width: Some(0),
            ..Args::default()
        }
        .apply(&mut config);
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }
}
