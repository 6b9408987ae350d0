//! Utilities for input path collection and size formatting.

use std::path::{Path, PathBuf};

use crate::error::{Result, ToolkitError};
use crate::io::reader::has_pdf_extension;

/// Expand merge inputs that are glob patterns.
///
/// Paths that exist are taken as given. Anything else containing `*`, `?`
/// or `[` is expanded, in the order `glob` yields matches. Remaining paths
/// are passed through unchanged so that loading reports them as missing.
///
/// # Errors
///
/// Returns [`ToolkitError::InvalidArgument`] for malformed patterns and
/// [`ToolkitError::FileNotFound`] for patterns that match nothing.
pub fn expand_input_patterns<T>(inputs: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<Path>,
{
    let mut resolved_paths = Vec::new();

    for input in inputs {
        let input = input.as_ref();
        match input.to_str() {
            Some(pattern) if !input.exists() && is_glob_pattern(pattern) => {
                let matches = collect_paths_for_pattern(pattern)?;
                if matches.is_empty() {
                    return Err(ToolkitError::file_not_found(input));
                }
                resolved_paths.extend(matches);
            }
            _ => resolved_paths.push(input.to_path_buf()),
        }
    }

    Ok(resolved_paths)
}

fn is_glob_pattern(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

/// Expand a single glob pattern into filesystem paths.
fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|err| {
        ToolkitError::invalid_argument(format!("invalid glob pattern '{pattern}': {err}"))
    })?;

    let mut resolved_paths = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| {
            let path = err.path().to_path_buf();
            ToolkitError::io(&path, err.into())
        })?;
        resolved_paths.push(path);
    }

    Ok(resolved_paths)
}

/// Collect PDF files from `dir`, sorted by path.
///
/// With `recursive`, subdirectories are searched too. `exclude` is skipped
/// so that a merge output placed inside the input directory is never read
/// back as an input.
///
/// # Errors
///
/// - [`ToolkitError::FileNotFound`] if `dir` does not exist
/// - [`ToolkitError::InvalidArgument`] if it is not a directory or holds no
///   PDF files
pub fn collect_pdfs_in_dir(
    dir: &Path,
    recursive: bool,
    exclude: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(ToolkitError::file_not_found(dir));
    }
    if !dir.is_dir() {
        return Err(ToolkitError::invalid_argument(format!(
            "not a directory: {}",
            dir.display()
        )));
    }

    let excluded = exclude.and_then(|p| p.canonicalize().ok());
    let max_depth = if recursive { usize::MAX } else { 1 };

    let mut pdfs = Vec::new();
    for entry in walkdir::WalkDir::new(dir).max_depth(max_depth) {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(dir).to_path_buf();
            let io_err = err
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
            ToolkitError::io(&path, io_err)
        })?;

        if !entry.file_type().is_file() || !has_pdf_extension(entry.path()) {
            continue;
        }
        if let Some(excluded) = &excluded
            && entry.path().canonicalize().ok().as_ref() == Some(excluded)
        {
            log::debug!("skipping output file {}", entry.path().display());
            continue;
        }
        pdfs.push(entry.into_path());
    }

    if pdfs.is_empty() {
        return Err(ToolkitError::invalid_argument(format!(
            "no PDF files found in {}",
            dir.display()
        )));
    }

    pdfs.sort();
    log::debug!("found {} PDF files in {}", pdfs.len(), dir.display());
    Ok(pdfs)
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
