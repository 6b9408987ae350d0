//! Merging several PDFs into one.
//!
//! [`merge_pdfs`] is the whole `merge` / `merge-dir` pipeline: validate the
//! configuration, refuse an existing output, load every input in order,
//! combine them with [`Merger`] and write the result atomically.
//!
//! # Examples
//!
//! ```no_run
//! use pdf_toolkit::config::{DisplayOptions, MergeConfig, OverwriteMode};
//! use pdf_toolkit::merge::merge_pdfs;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MergeConfig {
//!     inputs: vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
//!     output: PathBuf::from("merged.pdf"),
//!     bookmarks: true,
//!     overwrite_mode: OverwriteMode::Refuse,
//!     display: DisplayOptions::default(),
//! };
//! let outcome = merge_pdfs(&config).await?;
//! println!("{} pages", outcome.statistics.total_pages);
//! # Ok(())
//! # }
//! ```

pub mod bookmarks;
pub mod merger;

pub use bookmarks::{Bookmark, BookmarkManager};
pub use merger::{MergeResult, MergeStatistics, Merger};

use std::path::PathBuf;

use crate::config::MergeConfig;
use crate::error::Result;
use crate::io::writer::WriteStatistics;
use crate::io::{PdfReader, PdfWriter};
use crate::output::ProgressBar;

/// Everything a finished merge reports.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Statistics about the merge itself.
    pub statistics: MergeStatistics,
    /// Input files in the order they were merged.
    pub merged_files: Vec<PathBuf>,
    /// The written output.
    pub written: WriteStatistics,
}

/// Merge the configured inputs and write the output.
///
/// # Errors
///
/// Fails before writing anything if the configuration is invalid, the output
/// exists and overwriting is refused, or any input cannot be loaded.
pub async fn merge_pdfs(config: &MergeConfig) -> Result<MergeOutcome> {
    config.validate()?;

    let writer = PdfWriter::new(config.overwrite_mode);
    writer.check_output(&config.output).await?;

    log::info!(
        "merging {} files into {}",
        config.inputs.len(),
        config.output.display()
    );

    let mut progress = ProgressBar::for_display(config.inputs.len(), &config.display);
    progress.set_message("Loading");
    let loaded = PdfReader::new()
        .load_all(&config.inputs, |_, _| progress.increment())
        .await;
    let loaded = match loaded {
        Ok(loaded) => {
            progress.finish();
            loaded
        }
        Err(e) => {
            progress.clear();
            return Err(e);
        }
    };

    let result = Merger::new()
        .with_bookmarks(config.bookmarks)
        .merge(loaded)?;

    let written = writer.save(result.document, &config.output).await?;

    Ok(MergeOutcome {
        statistics: result.statistics,
        merged_files: result.merged_files,
        written,
    })
}
