//! PDF reading and loading operations.
//!
//! Inputs are checked before lopdf sees them: the path has to exist, be a
//! regular file and carry a `.pdf` extension. Parsing runs on the blocking
//! pool so the runtime thread only awaits it.
//!
//! # Examples
//!
//! ```no_run
//! use pdf_toolkit::io::PdfReader;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("document.pdf")).await?;
//! println!("{} pages", loaded.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{Result, ToolkitError};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: u32,

    /// File size in bytes.
    pub file_size: u64,

    /// Time taken to parse the document.
    pub load_time: Duration,
}

impl LoadedPdf {
    /// File stem of the source, used for bookmark titles and output names.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// PDF reader with configurable loading behavior.
#[derive(Debug, Clone)]
pub struct PdfReader {
    /// Reject documents without pages.
    require_pages: bool,
    /// Accept encrypted documents lopdf could open with the empty password.
    allow_decrypted: bool,
}

impl PdfReader {
    /// Create a reader that rejects empty documents.
    pub fn new() -> Self {
        Self {
            require_pages: true,
            allow_decrypted: false,
        }
    }

    /// Create a reader that accepts documents without pages.
    ///
    /// Used by `count`, which reports zero pages instead of failing.
    pub fn allow_empty() -> Self {
        Self {
            require_pages: false,
            allow_decrypted: false,
        }
    }

    /// Create a reader for `info`.
    ///
    /// Empty documents are accepted, and so are encrypted documents whose
    /// content lopdf could decrypt with the empty user password. Documents
    /// that stay locked are still rejected.
    pub fn for_inspection() -> Self {
        Self {
            require_pages: false,
            allow_decrypted: true,
        }
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// - [`ToolkitError::FileNotFound`] if the path does not exist
    /// - [`ToolkitError::InvalidArgument`] if it is not a `.pdf` file
    /// - [`ToolkitError::EncryptedPdf`] if it is encrypted (see
    ///   [`PdfReader::for_inspection`] for the one exception)
    /// - [`ToolkitError::ParseFailure`] if lopdf cannot parse it, or it has
    ///   no pages and the reader requires some
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let file_size = validate_input(path).await?;
        let path_buf = path.to_path_buf();

        log::debug!("loading {}", path.display());

        let (document, load_time) = task::spawn_blocking(move || {
            let start = Instant::now();
            let doc = Document::load(&path_buf)
                .map_err(|e| ToolkitError::from_load_error(&path_buf, e))?;
            Ok::<_, ToolkitError>((doc, start.elapsed()))
        })
        .await
        .map_err(|e| ToolkitError::parse_failure(path, format!("load task failed: {e}")))??;

        // lopdf loads encrypted files without error, locked or not.
        if document.trailer.has(b"Encrypt") {
            let decrypted = document.encryption_state.is_some();
            log::debug!(
                "{} is encrypted ({})",
                path.display(),
                if decrypted { "decrypted with empty password" } else { "locked" }
            );
            if !(self.allow_decrypted && decrypted) {
                return Err(ToolkitError::encrypted(path));
            }
        }

        let page_count = document.get_pages().len() as u32;
        if self.require_pages && page_count == 0 {
            return Err(ToolkitError::parse_failure(path, "PDF has no pages"));
        }

        log::debug!(
            "loaded {} ({page_count} pages, {file_size} bytes) in {load_time:?}",
            path.display()
        );

        Ok(LoadedPdf {
            document,
            path: path.to_path_buf(),
            page_count,
            file_size,
            load_time,
        })
    }

    /// Load several documents one after another, stopping at the first
    /// failure.
    ///
    /// `on_loaded` is called after each document with its index.
    pub async fn load_all<F>(&self, paths: &[PathBuf], mut on_loaded: F) -> Result<Vec<LoadedPdf>>
    where
        F: FnMut(usize, &LoadedPdf),
    {
        let mut loaded = Vec::with_capacity(paths.len());
        for (index, path) in paths.iter().enumerate() {
            let pdf = self.load(path).await?;
            on_loaded(index, &pdf);
            loaded.push(pdf);
        }
        Ok(loaded)
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Check that `path` names an existing `.pdf` file and return its size.
///
/// # Errors
///
/// Returns [`ToolkitError::FileNotFound`] for missing paths and
/// [`ToolkitError::InvalidArgument`] for directories and non-PDF files.
pub async fn validate_input(path: &Path) -> Result<u64> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ToolkitError::file_not_found(path));
        }
        Err(e) => return Err(ToolkitError::io(path, e)),
    };

    if !metadata.is_file() {
        return Err(ToolkitError::invalid_argument(format!(
            "not a file: {}",
            path.display()
        )));
    }

    if !has_pdf_extension(path) {
        return Err(ToolkitError::invalid_argument(format!(
            "not a PDF file: {}",
            path.display()
        )));
    }

    Ok(metadata.len())
}

/// Whether the path ends in `.pdf`, ignoring case.
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
