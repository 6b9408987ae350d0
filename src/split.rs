//! Splitting one PDF into several.
//!
//! A split is planned completely before anything is written: the chunks
//! are computed from the [`SplitMode`], every chunk gets an output path
//! from the [`OutputPattern`](crate::config::OutputPattern), and all paths
//! are checked for collisions. Only then are the outputs written, one at a
//! time. If one of them fails, the ones already written are removed.

use std::path::PathBuf;

use crate::config::{SplitConfig, SplitMode, same_file};
use crate::error::{Result, ToolkitError};
use crate::io::{OutputSet, PdfReader, PdfWriter};
use crate::output::ProgressBar;
use crate::pages::PageExtractor;
use crate::ranges::{Chunk, breakpoint_chunks, fixed_size_chunks, single_page_chunks};

/// One planned output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOutput {
    /// Pages written to the file.
    pub chunk: Chunk,
    /// Destination path.
    pub path: PathBuf,
}

/// One written output file.
#[derive(Debug, Clone)]
pub struct SplitOutput {
    /// Pages written to the file.
    pub chunk: Chunk,
    /// Destination path.
    pub path: PathBuf,
    /// Size of the written file in bytes.
    pub file_size: u64,
}

/// Result of a split.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    /// Page count of the input.
    pub source_pages: u32,
    /// Files written, in chunk order.
    pub outputs: Vec<SplitOutput>,
}

/// Compute the chunks for `mode` over a document of `total` pages.
///
/// # Errors
///
/// Returns [`ToolkitError::InvalidArgument`] for a zero chunk size, bad
/// breakpoints or an empty document.
pub fn plan_chunks(mode: &SplitMode, total: u32) -> Result<Vec<Chunk>> {
    match mode {
        SplitMode::EveryNPages(size) => fixed_size_chunks(total, *size),
        SplitMode::AtPages(points) => breakpoint_chunks(total, points),
        SplitMode::SinglePages => single_page_chunks(total),
    }
}

/// Assign an output path to every chunk.
///
/// # Errors
///
/// Returns [`ToolkitError::InvalidArgument`] if the pattern has no `{num}`
/// while several chunks are produced, or if a path would replace the input.
pub fn plan_outputs(config: &SplitConfig, chunks: &[Chunk]) -> Result<Vec<PlannedOutput>> {
    if chunks.len() > 1 && !config.pattern.has_counter() {
        return Err(ToolkitError::invalid_argument(format!(
            "output pattern '{}' needs a {{num}} placeholder to name {} files",
            config.pattern,
            chunks.len()
        )));
    }

    let dir = config.effective_output_dir();
    let base = config.base_name();

    chunks
        .iter()
        .enumerate()
        .map(|(i, &chunk)| {
            let path = dir.join(config.pattern.render(&base, i + 1));
            if same_file(&path, &config.input) {
                return Err(ToolkitError::invalid_argument(format!(
                    "output {} would replace the input file",
                    path.display()
                )));
            }
            Ok(PlannedOutput { chunk, path })
        })
        .collect()
}

/// Split the configured input and write every chunk.
///
/// # Errors
///
/// Nothing is written when loading, planning or the collision check fails.
/// A write failure removes the outputs created so far.
pub async fn split_pdf(config: &SplitConfig) -> Result<SplitOutcome> {
    let source = PdfReader::new().load(&config.input).await?;
    let chunks = plan_chunks(&config.mode, source.page_count)?;
    let planned = plan_outputs(config, &chunks)?;

    let writer = PdfWriter::new(config.overwrite_mode);
    let paths: Vec<PathBuf> = planned.iter().map(|p| p.path.clone()).collect();
    writer.check_outputs(&paths).await?;

    log::info!(
        "splitting {} ({} pages) into {} files",
        config.input.display(),
        source.page_count,
        planned.len()
    );

    let total = planned.len();
    let extractor = PageExtractor::new();
    let mut created = OutputSet::new();
    let mut outputs = Vec::with_capacity(total);
    let mut progress = ProgressBar::for_display(total, &config.display);
    progress.set_message("Writing");

    for output in planned {
        let written = match extractor.extract_chunk(&source, output.chunk) {
            Ok(doc) => writer.save(doc, &output.path).await,
            Err(e) => Err(e),
        };
        let written = match written {
            Ok(written) => written,
            Err(e) => {
                progress.clear();
                log::error!(
                    "failed writing {} after {} of {total} files",
                    output.path.display(),
                    created.paths().len()
                );
                return Err(e);
            }
        };

        log::debug!("{} -> {}", output.chunk, output.path.display());
        created.record(output.path.clone());
        outputs.push(SplitOutput {
            chunk: output.chunk,
            path: output.path,
            file_size: written.file_size,
        });
        progress.increment();
    }

    progress.finish();
    created.commit();

    Ok(SplitOutcome {
        source_pages: source.page_count,
        outputs,
    })
}
