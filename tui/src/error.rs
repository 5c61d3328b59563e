//! Error Types

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that end a run before or outside the event loop
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The terminal could not be acquired or restored
    #[error("Failed to initialize terminal: {0}")]
    Terminal(#[source] std::io::Error),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Drawing to the terminal failed
    #[error("Failed to draw status line: {0}")]
    Render(#[source] std::io::Error),

    /// The terminal input stream failed
    #[error("Failed to read terminal input: {0}")]
    Input(#[source] std::io::Error),
}
