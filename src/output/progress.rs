//! Progress bar for multi-file commands.
//!
//! The bar draws only on a terminal, and only when the command was not
//! run with `--no-progress` or `--quiet`. Otherwise every method is a
//! no-op apart from bookkeeping.
//!
//! # Examples
//!
//! ```
//! use pdf_toolkit::output::ProgressBar;
//!
//! let mut progress = ProgressBar::new(3);
//! progress.set_message("Writing");
//! for _ in 0..3 {
//!     progress.increment();
//! }
//! progress.finish();
//! ```

use std::io::{self, IsTerminal, Write};
use std::time::{Duration, Instant};

use crate::config::DisplayOptions;

/// Progress bar for visual feedback during operations.
#[derive(Debug)]
pub struct ProgressBar {
    total: usize,
    current: usize,
    message: Option<String>,
    start_time: Instant,
    last_update: Option<Instant>,
    update_interval: Duration,
    enabled: bool,
}

impl ProgressBar {
    /// Create a progress bar that draws when stdout is a terminal.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            current: 0,
            message: None,
            start_time: Instant::now(),
            last_update: None,
            update_interval: Duration::from_millis(100),
            enabled: io::stdout().is_terminal(),
        }
    }

    /// Create a bar honoring the command's display options.
    pub fn for_display(total: usize, display: &DisplayOptions) -> Self {
        if display.show_progress() {
            Self::new(total)
        } else {
            Self::disabled(total)
        }
    }

    /// Create a disabled progress bar (no output).
    pub fn disabled(total: usize) -> Self {
        let mut pb = Self::new(total);
        pb.enabled = false;
        pb
    }

    /// Set the message shown before the bar.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Move the bar to `current`.
    pub fn update(&mut self, current: usize) {
        self.current = current.min(self.total);

        let due = self
            .last_update
            .is_none_or(|at| at.elapsed() >= self.update_interval);
        if due || self.current == self.total {
            self.last_update = Some(Instant::now());
            self.render();
        }
    }

    /// Advance the bar by one.
    pub fn increment(&mut self) {
        self.update(self.current + 1);
    }

    /// Complete the bar and move to a new line.
    pub fn finish(&mut self) {
        self.current = self.total;
        if self.enabled {
            self.render();
            println!();
        }
    }

    /// Remove the bar from the terminal without completing it.
    pub fn clear(&self) {
        if self.enabled {
            print!("\r\x1b[K");
            io::stdout().flush().ok();
        }
    }

    /// Get the current progress percentage.
    pub fn percent(&self) -> f64 {
        if self.total > 0 {
            (self.current as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }

    fn render(&self) {
        if !self.enabled {
            return;
        }

        print!("\r\x1b[K{}", self.render_bar());
        io::stdout().flush().ok();
    }

    fn render_bar(&self) -> String {
        let width = 30;
        let filled = (width * self.current) / self.total.max(1);
        let head = if filled > 0 && filled < width { ">" } else { "" };
        let body = "=".repeat(filled.saturating_sub(head.len()));

        let mut parts = Vec::with_capacity(5);
        if let Some(ref msg) = self.message {
            parts.push(msg.clone());
        }
        parts.push(format!("[{body}{head}{}]", " ".repeat(width - filled)));
        parts.push(format!("{:>3.0}%", self.percent()));
        parts.push(format!("{}/{}", self.current, self.total));
        parts.push(format_duration(self.start_time.elapsed()));
        parts.join(" ")
    }

}

/// Format a duration as a human-readable string.
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
