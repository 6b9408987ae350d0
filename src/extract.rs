//! Extracting selected pages into a new PDF.

use std::path::PathBuf;

use crate::config::ExtractConfig;
use crate::error::Result;
use crate::io::writer::WriteStatistics;
use crate::io::{PdfReader, PdfWriter};
use crate::pages::PageExtractor;

/// Result of an extraction.
#[derive(Debug, Clone)]
pub struct ExtractOutcome {
    /// Page count of the input.
    pub source_pages: u32,
    /// Pages written, ascending.
    pub pages: Vec<u32>,
    /// The written output.
    pub written: WriteStatistics,
}

impl ExtractOutcome {
    /// Path of the written file.
    pub fn output(&self) -> &PathBuf {
        &self.written.output_path
    }
}

/// Write the pages named by the configured range to the output file.
///
/// # Errors
///
/// - [`ToolkitError::InvalidRange`](crate::ToolkitError::InvalidRange) if the
///   range names pages past the end of the document
/// - [`ToolkitError::OutputExists`](crate::ToolkitError::OutputExists) if the
///   output exists and overwriting is refused
/// - loading and writing errors from [`PdfReader`] and [`PdfWriter`]
pub async fn extract_pages(config: &ExtractConfig) -> Result<ExtractOutcome> {
    config.validate()?;

    let writer = PdfWriter::new(config.overwrite_mode);
    writer.check_output(&config.output).await?;

    let source = PdfReader::new().load(&config.input).await?;
    let pages = config.pages.resolve(source.page_count)?;

    log::info!(
        "extracting {} of {} pages ({}) from {}",
        pages.len(),
        source.page_count,
        config.pages,
        config.input.display()
    );

    let document = PageExtractor::new().extract_pages(&source, &pages)?;
    let written = writer.save(document, &config.output).await?;

    Ok(ExtractOutcome {
        source_pages: source.page_count,
        pages,
        written,
    })
}
