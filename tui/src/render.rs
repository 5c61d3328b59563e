//! Status Line Renderer
//!
//! Turns a [`ProgressState`] into the single styled line shown at the bottom
//! of the terminal. Rendering is a pure function of the state: the same
//! state always yields the same line.
//!
//! ```text
//! ⠼ Executing: kubectl apply            ████████████░░░░░░░░░░░░░░░░  3/12
//! └┬┘└───────── info ─────────┘└ gap ┘└────────── bar ──────────┘└counter┘
//! ```

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::machine::{Phase, ProgressState};
use crate::tasks::Task;
use crate::theme::Theme;

/// Label in front of the in-flight task's name
const INFO_PREFIX: &str = "Executing: ";

/// Marker appended to truncated names
const ELLIPSIS: char = '…';

/// Default bar width in cells
pub const DEFAULT_BAR_WIDTH: u16 = 40;

/// Renders status lines with a fixed theme
#[derive(Clone, Debug)]
pub struct Renderer {
    theme: Theme,
    bar_width: u16,
}

impl Renderer {
    pub fn new(theme: Theme, bar_width: u16) -> Self {
        Self {
            theme,
            bar_width: bar_width.max(1),
        }
    }

    /// The line for the current state
    pub fn render(&self, state: &ProgressState) -> Line<'static> {
        match state.phase() {
            Phase::Running => self.status(state),
            Phase::Done => self.summary(state),
            Phase::Failed { index, cause } => self.failure(state, *index, cause),
            Phase::Cancelled => self.cancelled(state),
        }
    }

    /// Permanent line printed above the status line when a task finishes
    pub fn render_completed(&self, task: &Task) -> Line<'static> {
        Line::from(vec![
            Span::styled("✓", self.theme.check_mark),
            Span::raw(" "),
            Span::raw(task.id.clone()),
        ])
    }

    fn status(&self, state: &ProgressState) -> Line<'static> {
        let total = state.tasks().len();
        let digits = total.to_string().len();
        let counter = format!(" {:>digits$}/{:>digits$}", state.current_index(), total);
        let spin = format!("{} ", state.spinner().frame());

        let width = usize::from(state.terminal_width());
        let fixed = spin.width() + counter.width();

        // The bar keeps its nominal width unless the terminal can't fit it.
        let bar_width = if width == 0 {
            usize::from(self.bar_width)
        } else {
            usize::from(self.bar_width).min(width.saturating_sub(fixed))
        };
        // Unknown width: show the whole name and keep one space before the bar.
        let available = if width == 0 {
            usize::MAX
        } else {
            width.saturating_sub(fixed + bar_width)
        };

        let name = state.current_task().map(|t| t.id.as_str()).unwrap_or_default();
        let info = self.info(name, available);
        let info_width: usize = info.iter().map(Span::width).sum();
        let gap = if width == 0 {
            1
        } else {
            width.saturating_sub(fixed + bar_width + info_width)
        };

        let mut spans = Vec::with_capacity(info.len() + bar_width + 4);
        spans.push(Span::styled(spin, self.theme.spinner));
        spans.extend(info);
        if gap > 0 {
            spans.push(Span::raw(" ".repeat(gap)));
        }
        spans.extend(self.bar(state.progress().displayed(), bar_width));
        spans.push(Span::raw(counter));
        Line::from(spans)
    }

    /// `Executing: <name>`, cut down to `available` cells
    fn info(&self, name: &str, available: usize) -> Vec<Span<'static>> {
        if INFO_PREFIX.width() + name.width() <= available {
            return vec![
                Span::raw(INFO_PREFIX),
                Span::styled(name.to_string(), self.theme.task_name),
            ];
        }
        if available == 0 {
            return Vec::new();
        }

        let budget = available - 1;
        let prefix = take_width(INFO_PREFIX, budget);
        let mut shown = take_width(name, budget - prefix.width());
        shown.push(ELLIPSIS);

        let mut spans = Vec::with_capacity(2);
        if !prefix.is_empty() {
            spans.push(Span::raw(prefix));
        }
        spans.push(Span::styled(shown, self.theme.task_name));
        spans
    }

    fn bar(&self, fraction: f64, width: usize) -> Vec<Span<'static>> {
        let filled = ((width as f64) * fraction.clamp(0.0, 1.0)).round() as usize;
        let filled = filled.min(width);

        let mut spans: Vec<Span<'static>> = (0..filled)
            .map(|cell| {
                Span::styled(
                    self.theme.bar_full_char.to_string(),
                    Style::default().fg(self.theme.gradient_at(cell, filled)),
                )
            })
            .collect();

        if width > filled {
            let empty: String = std::iter::repeat(self.theme.bar_empty_char)
                .take(width - filled)
                .collect();
            spans.push(Span::styled(empty, self.theme.bar_empty));
        }
        spans
    }

    fn summary(&self, state: &ProgressState) -> Line<'static> {
        let n = state.tasks().len();
        Line::from(Span::styled(
            format!("Done! Executed {n} {}.", plural(n)),
            self.theme.summary,
        ))
    }

    fn failure(&self, state: &ProgressState, index: usize, cause: &str) -> Line<'static> {
        let name = state.tasks().get(index).map(|t| t.id.as_str()).unwrap_or_default();
        let detail = format!(
            " {name} failed: {cause} ({}/{} completed)",
            state.completed(),
            state.tasks().len()
        );
        Line::from(vec![
            Span::styled("✗", self.theme.failure),
            Span::styled(fit(&detail, state.terminal_width()), self.theme.failure),
        ])
    }

    fn cancelled(&self, state: &ProgressState) -> Line<'static> {
        let total = state.tasks().len();
        Line::from(Span::styled(
            format!(
                "Cancelled after {}/{} {}.",
                state.completed(),
                total,
                plural(total)
            ),
            self.theme.dim,
        ))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Theme::default(), DEFAULT_BAR_WIDTH)
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        "task"
    } else {
        "tasks"
    }
}

/// Longest prefix of `text` that fits in `max` cells
fn take_width(text: &str, max: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= max
        })
        .collect()
}

/// `text` elided to `width` cells; a width of 0 means unknown
fn fit(text: &str, width: u16) -> String {
    let width = usize::from(width);
    if width == 0 || text.width() < width {
        return text.to_string();
    }
    // One cell goes to the leading marker.
    let mut cut = take_width(text, width.saturating_sub(2));
    cut.push(ELLIPSIS);
    cut
}
