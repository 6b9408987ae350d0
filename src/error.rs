//! Error types for pdf-toolkit.
//!
//! Every command reports failures through [`ToolkitError`]. Errors are never
//! retried; the binary prints them and exits with [`ToolkitError::exit_code`].
//!
//! # Error Categories
//!
//! - **Input errors**: missing files, wrong file types, bad arguments
//! - **Range errors**: malformed or out-of-bounds page range specs
//! - **PDF errors**: documents the PDF library cannot parse
//! - **Output errors**: collisions with existing files, write failures

use std::io;
use std::path::{Path, PathBuf};

/// Result type alias for pdf-toolkit operations.
pub type Result<T> = std::result::Result<T, ToolkitError>;

/// Main error type for pdf-toolkit operations.
#[derive(Debug, thiserror::Error)]
pub enum ToolkitError {
    /// Input file or directory was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path that does not exist.
        path: PathBuf,
    },

    /// Page range spec is malformed or names pages outside the document.
    #[error("Invalid page range '{spec}': {reason}")]
    InvalidRange {
        /// The range spec as given by the user.
        spec: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An argument value is not acceptable.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the problem.
        message: String,
    },

    /// Output file already exists and overwriting was not requested.
    #[error(
        "Output file already exists: {}\n  Use --overwrite to replace it or choose a different output path",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// The PDF library could not parse the file.
    #[error("Failed to parse PDF: {}\n  Reason: {reason}", path.display())]
    ParseFailure {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason reported by the PDF library.
        reason: String,
    },

    /// PDF is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// Reading, writing, renaming or creating a directory failed.
    #[error("I/O error on {}: {source}", path.display())]
    IoFailure {
        /// Path the operation was acting on.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl ToolkitError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create an InvalidRange error.
    pub fn invalid_range(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            spec: spec.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidArgument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: impl Into<PathBuf>) -> Self {
        Self::OutputExists { path: path.into() }
    }

    /// Create a ParseFailure error.
    pub fn parse_failure(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ParseFailure {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted(path: impl Into<PathBuf>) -> Self {
        Self::EncryptedPdf { path: path.into() }
    }

    /// Create an IoFailure error for `path`.
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::IoFailure {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Classify a lopdf load error for `path`.
    pub(crate) fn from_load_error(path: &Path, err: lopdf::Error) -> Self {
        let msg = err.to_string();
        let lower = msg.to_lowercase();
        if lower.contains("encrypt") || lower.contains("password") || lower.contains("decrypt") {
            Self::encrypted(path)
        } else if let lopdf::Error::IO(io_err) = err {
            Self::io(path, io_err)
        } else {
            Self::parse_failure(path, msg)
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::InvalidRange { .. } => 1,
            Self::InvalidArgument { .. } => 1,
            Self::OutputExists { .. } => 4,
            Self::ParseFailure { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::IoFailure { .. } => 5,
        }
    }
}
