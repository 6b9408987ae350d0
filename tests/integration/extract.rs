//! Page extraction through the library API.

use pdf_toolkit::ToolkitError;
use pdf_toolkit::config::{DisplayOptions, ExtractConfig, OverwriteMode};
use pdf_toolkit::extract::extract_pages;
use pdf_toolkit::ranges::PageRange;
use std::path::Path;
use tempfile::TempDir;

use crate::common::{create_pdf, page_labels};

fn extract_config(input: &Path, spec: &str, output: &Path) -> ExtractConfig {
    ExtractConfig {
        input: input.to_path_buf(),
        pages: PageRange::parse(spec).unwrap(),
        output: output.to_path_buf(),
        overwrite_mode: OverwriteMode::Refuse,
        display: DisplayOptions::default(),
    }
}

#[tokio::test]
async fn test_extract_selection_in_ascending_order() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_pdf(temp_dir.path(), "report.pdf", "r", 20);
    let output = temp_dir.path().join("summary.pdf");

    let outcome = extract_pages(&extract_config(&input, "10-15,5,1", &output))
        .await
        .unwrap();

    assert_eq!(outcome.pages, vec![1, 5, 10, 11, 12, 13, 14, 15]);
    assert_eq!(
        page_labels(&output),
        vec!["r-1", "r-5", "r-10", "r-11", "r-12", "r-13", "r-14", "r-15"]
    );
}

#[tokio::test]
async fn test_extract_range_past_end() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_pdf(temp_dir.path(), "report.pdf", "r", 3);
    let output = temp_dir.path().join("summary.pdf");

    let err = extract_pages(&extract_config(&input, "2-4", &output))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolkitError::InvalidRange { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_extract_into_new_directory() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_pdf(temp_dir.path(), "report.pdf", "r", 3);
    let output = temp_dir.path().join("nested/dir/first.pdf");

    extract_pages(&extract_config(&input, "1", &output))
        .await
        .unwrap();
    assert_eq!(page_labels(&output), vec!["r-1"]);
}
