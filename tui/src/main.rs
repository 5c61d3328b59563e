//! Bootstrap Entry Point
//!
//! Runs the configured tasks behind a one-line progress display.
//!
//! Usage:
//!   bootstrap [OPTIONS]
//!
//! Options:
//!   --config <PATH>      TOML config file (or $BOOTSTRAP_CONFIG)
//!   --task <NAME>        Task to run, repeatable
//!   --mode <MODE>        simulated | fixed | shell
//!   --log-file <PATH>    Write logs to a file

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::event::EventStream;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bootstrap_tui::cli::Args;
use bootstrap_tui::surface::InlineSurface;
use bootstrap_tui::{App, BootstrapError, RunOutcome};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_tracing(args.log_file.as_deref()) {
        eprintln!("bootstrap: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("bootstrap: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Set up logging.
///
/// The terminal belongs to the status line, so logs go to `log_file` when
/// given. Without one, stderr only gets what `RUST_LOG` explicitly asks for.
fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<()> {
    let registry = tracing_subscriber::registry();

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
                .init();
        }
        None => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(io::stderr),
                )
                .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
                .init();
        }
    }

    Ok(())
}

async fn run(args: Args) -> anyhow::Result<RunOutcome> {
    let config = args.resolve().context("Failed to load configuration")?;

    // Check for a TTY before touching the terminal
    if !io::stdout().is_terminal() {
        anyhow::bail!("bootstrap requires a terminal (TTY) on stdout");
    }
    let viewport = crossterm::terminal::size().map_err(BootstrapError::Terminal)?;

    let mut app = App::from_config(&config, viewport);
    let mut surface = InlineSurface::acquire()?;

    let result = app.run(&mut surface, EventStream::new()).await;

    // Restore terminal, then propagate any errors
    let restored = surface.restore();
    settle(result, restored)
}

/// Combine the run's result with the terminal restore.
///
/// A run error wins; a restore failure on top of it is attached as context
/// rather than replacing it.
fn settle(
    result: Result<RunOutcome, BootstrapError>,
    restored: Result<(), BootstrapError>,
) -> anyhow::Result<RunOutcome> {
    match (result, restored) {
        (Ok(outcome), Ok(())) => Ok(outcome),
        (Err(run), Ok(())) => Err(run.into()),
        (Ok(_), Err(restore)) => Err(restore.into()),
        (Err(run), Err(restore)) => {
            tracing::error!(error = %restore, "terminal restore failed after run error");
            Err(anyhow::Error::new(run).context(format!("also failed to restore terminal: {restore}")))
        }
    }
}
