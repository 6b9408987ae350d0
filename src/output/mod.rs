//! User-facing output: status lines and progress display.
//!
//! Status lines go through [`OutputFormatter`]; diagnostics go through the
//! `log` macros and are controlled separately by the log filter.
//!
//! # Examples
//!
//! ```no_run
//! use pdf_toolkit::output::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.info("Splitting report.pdf");
//! formatter.success("Created 3 files");
//! ```

pub mod formatter;
pub mod progress;

pub use formatter::{MessageLevel, OutputFormatter};
pub use progress::ProgressBar;
