//! pdf-toolkit: merge, split and extract pages from PDF files.
//!
//! The library exposes each command as an async operation driven by a
//! configuration struct, so the binary is a thin layer over it:
//!
//! - [`merge::merge_pdfs`] for `merge` and `merge-dir`
//! - [`split::split_pdf`] for `split`, `split-at` and `split-pages`
//! - [`extract::extract_pages`] for `extract`
//! - [`info::read_info`] and [`info::count_pages`] for `info` and `count`
//!
//! All PDF parsing and writing is done by `lopdf`.

#![warn(missing_docs)]

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod extract;
pub mod info;
pub mod io;
pub mod merge;
pub mod output;
pub mod pages;
pub mod ranges;
pub mod split;
pub(crate) mod utils;

#[cfg(test)]
mod test_support;

pub use error::{Result, ToolkitError};

use crate::cli::{Cli, Command};
use crate::output::OutputFormatter;

/// Crate version, as reported by `version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Binary name.
pub const NAME: &str = "pdf-toolkit";

/// Run the parsed command line.
///
/// # Errors
///
/// Returns the first error of the command; nothing is retried.
pub async fn run(cli: &Cli, out: &OutputFormatter) -> Result<()> {
    log::debug!("running {:?}", cli.command);

    match &cli.command {
        Command::Merge(args) => commands::merge(cli, args, out).await,
        Command::MergeDir(args) => commands::merge_dir(cli, args, out).await,
        Command::Split(args) => commands::split(args.to_config(cli)?, out).await,
        Command::SplitAt(args) => commands::split(args.to_config(cli)?, out).await,
        Command::SplitPages(args) => commands::split(args.to_config(cli)?, out).await,
        Command::Extract(args) => commands::extract(cli, args, out).await,
        Command::Info(args) => commands::info(args, out).await,
        Command::Count(args) => commands::count(args).await,
        Command::Version => {
            commands::version(out);
            Ok(())
        }
    }
}
