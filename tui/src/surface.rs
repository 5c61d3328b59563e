//! Terminal Surface
//!
//! Where rendered lines go. The driver only talks to [`StatusSurface`], so the
//! event loop runs the same against a real terminal and against a recorder
//! in tests.

use std::io::{self, Stdout, Write};
use std::panic;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget};
use ratatui::{Terminal, TerminalOptions, Viewport};

use crate::error::BootstrapError;

/// Sink for the status line
pub trait StatusSurface {
    /// Replace the live status line
    fn draw_status(&mut self, line: Line<'static>) -> io::Result<()>;

    /// Print a permanent line above the status line
    fn print_above(&mut self, line: Line<'static>) -> io::Result<()>;
}

/// One-row inline viewport at the cursor, leaving scrollback intact
pub struct InlineSurface {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl InlineSurface {
    /// Take over the terminal: raw mode for key events plus a one-line
    /// inline viewport. A panic hook restores the terminal before the
    /// panic message prints.
    pub fn acquire() -> Result<Self, BootstrapError> {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            original_hook(panic_info);
        }));

        enable_raw_mode().map_err(BootstrapError::Terminal)?;
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Inline(1),
            },
        )
        .map_err(|e| {
            let _ = disable_raw_mode();
            BootstrapError::Terminal(e)
        })?;

        Ok(Self { terminal })
    }

    /// Leave raw mode and put the cursor below the final line
    pub fn restore(mut self) -> Result<(), BootstrapError> {
        disable_raw_mode().map_err(BootstrapError::Terminal)?;
        self.terminal.show_cursor().map_err(BootstrapError::Terminal)?;
        // Step past the viewport so the shell prompt doesn't overwrite it.
        let backend = self.terminal.backend_mut();
        writeln!(backend)
            .and_then(|()| backend.flush())
            .map_err(BootstrapError::Terminal)
    }
}

impl StatusSurface for InlineSurface {
    fn draw_status(&mut self, line: Line<'static>) -> io::Result<()> {
        self.terminal
            .draw(|frame| frame.render_widget(Paragraph::new(line), frame.area()))?;
        Ok(())
    }

    fn print_above(&mut self, line: Line<'static>) -> io::Result<()> {
        self.terminal
            .insert_before(1, |buf| Paragraph::new(line).render(buf.area, buf))
    }
}
