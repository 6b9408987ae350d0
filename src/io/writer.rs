//! PDF writing and saving operations.
//!
//! Every output goes through the same path:
//! - collision check against [`OverwriteMode`] before any work starts
//! - missing parent directories are created
//! - the document is written to a temp file next to the destination
//! - the temp file is renamed into place
//!
//! Commands that write several files track them in an [`OutputSet`], which
//! removes everything it recorded unless the command commits it.
//!
//! # Examples
//!
//! ```no_run
//! use pdf_toolkit::config::OverwriteMode;
//! use pdf_toolkit::io::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new(OverwriteMode::Refuse);
//! writer.check_output(Path::new("output.pdf")).await?;
//! writer.save(doc, Path::new("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::collections::HashSet;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::config::OverwriteMode;
use crate::error::{Result, ToolkitError};
use crate::utils::format_file_size;

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer bound to an overwrite policy.
#[derive(Debug, Clone)]
pub struct PdfWriter {
    overwrite_mode: OverwriteMode,
}

impl PdfWriter {
    /// Create a writer with the given overwrite policy.
    pub fn new(overwrite_mode: OverwriteMode) -> Self {
        Self { overwrite_mode }
    }

    /// Check that `path` may be written.
    ///
    /// # Errors
    ///
    /// - [`ToolkitError::OutputExists`] if the file exists and overwriting is
    ///   not allowed
    /// - [`ToolkitError::InvalidArgument`] if the path is a directory
    pub async fn check_output(&self, path: &Path) -> Result<()> {
        match tokio::fs::metadata(path).await {
            Ok(metadata) if metadata.is_dir() => Err(ToolkitError::invalid_argument(format!(
                "output path is a directory: {}",
                path.display()
            ))),
            Ok(_) if !self.overwrite_mode.allows_overwrite() => {
                Err(ToolkitError::output_exists(path))
            }
            Ok(_) => {
                log::warn!("overwriting existing file {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ToolkitError::io(path, e)),
        }
    }

    /// Check a whole batch of planned outputs before writing any of them.
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::InvalidArgument`] if two outputs share a path,
    /// and otherwise the first error from [`PdfWriter::check_output`].
    pub async fn check_outputs(&self, paths: &[PathBuf]) -> Result<()> {
        let mut seen = HashSet::with_capacity(paths.len());
        for path in paths {
            if !seen.insert(path) {
                return Err(ToolkitError::invalid_argument(format!(
                    "output pattern produces the same file name twice: {}",
                    path.display()
                )));
            }
        }

        for path in paths {
            self.check_output(path).await?;
        }
        Ok(())
    }

    /// Save a PDF document to `path`.
    ///
    /// The document is consumed; it is compressed and serialized on the
    /// blocking pool.
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::IoFailure`] if the directory cannot be created
    /// or the file cannot be written, and [`ToolkitError::OutputExists`] if
    /// another process created the file after the collision check while
    /// overwriting is refused.
    pub async fn save(&self, doc: Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.clone();

        let stats = task::spawn_blocking(move || options.save_blocking(doc, path_buf))
            .await
            .map_err(|e| ToolkitError::io(path, std::io::Error::other(e)))??;

        log::debug!(
            "wrote {} ({}) in {:?}",
            stats.output_path.display(),
            stats.format_file_size(),
            stats.write_time
        );

        Ok(stats)
    }

    fn save_blocking(&self, mut doc: Document, path: PathBuf) -> Result<WriteStatistics> {
        let start = Instant::now();

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| ToolkitError::io(&dir, e))?;

        doc.compress();

        let temp = tempfile::Builder::new()
            .prefix(".pdf-toolkit-")
            .suffix(".tmp")
            .tempfile_in(&dir)
            .map_err(|e| ToolkitError::io(&dir, e))?;

        {
            let mut writer = BufWriter::new(temp.as_file());
            doc.save_to(&mut writer)
                .map_err(|e| ToolkitError::io(&path, std::io::Error::other(e)))?;
            writer.flush().map_err(|e| ToolkitError::io(&path, e))?;
        }

        let file = if self.overwrite_mode.allows_overwrite() {
            temp.persist(&path)
        } else {
            temp.persist_noclobber(&path)
        }
        .map_err(|e| {
            if e.error.kind() == ErrorKind::AlreadyExists {
                ToolkitError::output_exists(&path)
            } else {
                ToolkitError::io(&path, e.error)
            }
        })?;

        let file_size = file.metadata().map(|m| m.len()).unwrap_or(0);

        Ok(WriteStatistics {
            write_time: start.elapsed(),
            file_size,
            output_path: path,
        })
    }
}

/// Outputs created by one command.
///
/// Dropping the set without calling [`OutputSet::commit`] deletes every
/// recorded file, so a command that fails part-way leaves nothing behind.
#[derive(Debug, Default)]
pub struct OutputSet {
    paths: Vec<PathBuf>,
    committed: bool,
}

impl OutputSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file that was written.
    pub fn record(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    /// Files recorded so far.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Keep the recorded files and return them.
    pub fn commit(mut self) -> Vec<PathBuf> {
        self.committed = true;
        std::mem::take(&mut self.paths)
    }
}

impl Drop for OutputSet {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        for path in &self.paths {
            match std::fs::remove_file(path) {
                Ok(()) => log::debug!("removed partial output {}", path.display()),
                Err(e) => log::warn!("could not remove {}: {e}", path.display()),
            }
        }
    }
}
