//! Message formatting and display.
//!
//! Status output goes to stdout and errors go to stderr. Colors are used
//! only when the stream is a terminal.
//!
//! # Examples
//!
//! ```
//! use pdf_toolkit::output::formatter::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.info("Processing files...");
//! formatter.success("Operation completed");
//! formatter.error("Something went wrong");
//! ```

use std::io::{self, IsTerminal};

/// Level of output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational message.
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
    /// Verbose detail.
    Debug,
}

impl MessageLevel {
    /// Symbol printed before the message.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Info => "ℹ ",
            Self::Success => "✓ ",
            Self::Warning => "⚠ ",
            Self::Error => "✗ ",
            Self::Debug => "→ ",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Self::Info => "\x1b[34m",
            Self::Success => "\x1b[32m",
            Self::Warning => "\x1b[33m",
            Self::Error => "\x1b[31m",
            Self::Debug => "\x1b[36m",
        }
    }
}

/// Output formatter with configurable verbosity.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    /// Whether to suppress non-error output.
    quiet: bool,
    /// Whether to show verbose output.
    verbose: bool,
    /// Whether stdout gets colors.
    colored: bool,
    /// Whether stderr gets colors.
    colored_err: bool,
}

impl OutputFormatter {
    /// Create a new output formatter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - Suppress non-error output
    /// * `verbose` - Show verbose output
    pub fn new(quiet: bool, verbose: bool) -> Self {
        let term = std::env::var_os("TERM").is_some() && std::env::var_os("NO_COLOR").is_none();
        Self {
            quiet,
            verbose,
            colored: term && io::stdout().is_terminal(),
            colored_err: term && io::stderr().is_terminal(),
        }
    }

    /// Print an informational message.
    ///
    /// Suppressed in quiet mode.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{}", self.render(MessageLevel::Info, message, self.colored));
        }
    }

    /// Print a success message.
    ///
    /// Suppressed in quiet mode.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{}", self.render(MessageLevel::Success, message, self.colored));
        }
    }

    /// Print a warning message.
    ///
    /// Suppressed in quiet mode.
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{}", self.render(MessageLevel::Warning, message, self.colored));
        }
    }

    /// Print an error message to stderr.
    ///
    /// Always displayed.
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.render(MessageLevel::Error, message, self.colored_err));
    }

    /// Print a verbose message.
    ///
    /// Only displayed in verbose mode.
    pub fn debug(&self, message: &str) {
        if self.verbose && !self.quiet {
            println!("{}", self.render(MessageLevel::Debug, message, self.colored));
        }
    }

    /// Print a plain line, e.g. a bare number for scripts.
    ///
    /// Suppressed in quiet mode.
    pub fn plain(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }

    /// Print a `label: value` line.
    ///
    /// Suppressed in quiet mode.
    pub fn detail(&self, label: &str, value: &str) {
        if !self.quiet {
            println!("  {label:<10} {value}");
        }
    }

    /// Print a list item.
    ///
    /// Only shown in verbose mode.
    pub fn list_item(&self, index: usize, message: &str) {
        if self.verbose && !self.quiet {
            println!("  {index}. {message}");
        }
    }

    fn render(&self, level: MessageLevel, message: &str, colored: bool) -> String {
        let prefix = level.prefix();
        if colored {
            format!("{}{prefix}{message}\x1b[0m", level.color_code())
        } else {
            format!("{prefix}{message}")
        }
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(false, false)
    }
}
