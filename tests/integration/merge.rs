//! Merging through the library API.

use pdf_toolkit::ToolkitError;
use pdf_toolkit::config::{DisplayOptions, MergeConfig, OverwriteMode};
use pdf_toolkit::merge::{BookmarkManager, merge_pdfs};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::common::{create_pdf, labels, page_labels};

fn merge_config(inputs: Vec<PathBuf>, output: &Path) -> MergeConfig {
    MergeConfig {
        inputs,
        output: output.to_path_buf(),
        bookmarks: false,
        overwrite_mode: OverwriteMode::Refuse,
        display: DisplayOptions {
            quiet: true,
            verbose: false,
            progress: false,
        },
    }
}

#[tokio::test]
async fn test_merge_keeps_source_order() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = vec![
        create_pdf(temp_dir.path(), "a.pdf", "a", 3),
        create_pdf(temp_dir.path(), "b.pdf", "b", 5),
        create_pdf(temp_dir.path(), "c.pdf", "c", 2),
    ];
    let output = temp_dir.path().join("merged.pdf");

    let outcome = merge_pdfs(&merge_config(inputs.clone(), &output)).await.unwrap();

    assert_eq!(outcome.statistics.files_merged, 3);
    assert_eq!(outcome.statistics.total_pages, 10);
    assert_eq!(outcome.merged_files, inputs);

    let expected: Vec<String> = [labels("a", 1, 3), labels("b", 1, 5), labels("c", 1, 2)].concat();
    assert_eq!(page_labels(&output), expected);
}

#[tokio::test]
async fn test_merge_with_bookmarks() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = vec![
        create_pdf(temp_dir.path(), "intro.pdf", "intro", 2),
        create_pdf(temp_dir.path(), "body.pdf", "body", 4),
    ];
    let output = temp_dir.path().join("book.pdf");

    let mut config = merge_config(inputs, &output);
    config.bookmarks = true;
    let outcome = merge_pdfs(&config).await.unwrap();
    assert_eq!(outcome.statistics.bookmarks_added, 2);

    let doc = lopdf::Document::load(&output).unwrap();
    let outline = BookmarkManager::new().read_outline(&doc);
    let titles: Vec<&str> = outline.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["intro", "body"]);

    let pages = doc.get_pages();
    assert_eq!(outline[0].page_id, pages[&1]);
    assert_eq!(outline[1].page_id, pages[&3]);
}

#[tokio::test]
async fn test_merge_refuses_existing_output() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = vec![
        create_pdf(temp_dir.path(), "a.pdf", "a", 1),
        create_pdf(temp_dir.path(), "b.pdf", "b", 1),
    ];
    let output = temp_dir.path().join("merged.pdf");
    std::fs::write(&output, b"precious").unwrap();

    let result = merge_pdfs(&merge_config(inputs.clone(), &output)).await;
    assert!(matches!(result, Err(ToolkitError::OutputExists { .. })));
    assert_eq!(std::fs::read(&output).unwrap(), b"precious");

    let mut config = merge_config(inputs, &output);
    config.overwrite_mode = OverwriteMode::Overwrite;
    merge_pdfs(&config).await.unwrap();
    assert_eq!(page_labels(&output), vec!["a-1", "b-1"]);
}

#[tokio::test]
async fn test_merge_missing_input() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = vec![
        create_pdf(temp_dir.path(), "a.pdf", "a", 1),
        temp_dir.path().join("missing.pdf"),
    ];
    let output = temp_dir.path().join("merged.pdf");

    let result = merge_pdfs(&merge_config(inputs, &output)).await;
    assert!(matches!(result, Err(ToolkitError::FileNotFound { .. })));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_merge_corrupted_input() {
    let temp_dir = TempDir::new().unwrap();
    let broken = temp_dir.path().join("broken.pdf");
    std::fs::write(&broken, b"this is not a pdf").unwrap();
    let inputs = vec![create_pdf(temp_dir.path(), "a.pdf", "a", 1), broken];
    let output = temp_dir.path().join("merged.pdf");

    let result = merge_pdfs(&merge_config(inputs, &output)).await;
    assert!(matches!(result, Err(ToolkitError::ParseFailure { .. })));
    assert_eq!(result.unwrap_err().exit_code(), 3);
}

#[tokio::test]
async fn test_merge_output_is_input() {
    let temp_dir = TempDir::new().unwrap();
    let a = create_pdf(temp_dir.path(), "a.pdf", "a", 1);
    let b = create_pdf(temp_dir.path(), "b.pdf", "b", 1);

    let result = merge_pdfs(&merge_config(vec![a.clone(), b], &a)).await;
    assert!(matches!(result, Err(ToolkitError::InvalidArgument { .. })));
    assert_eq!(page_labels(&a), vec!["a-1"]);
}
