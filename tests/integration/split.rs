//! Splitting through the library API.

use pdf_toolkit::ToolkitError;
use pdf_toolkit::config::{
    DEFAULT_PAGES_PATTERN, DEFAULT_SPLIT_PATTERN, DisplayOptions, OutputPattern, OverwriteMode,
    SplitConfig, SplitMode,
};
use pdf_toolkit::ranges::Chunk;
use pdf_toolkit::split::split_pdf;
use rstest::rstest;
use std::path::Path;
use tempfile::TempDir;

use crate::common::{create_pdf, labels, page_count, page_labels};

fn split_config(input: &Path, mode: SplitMode, pattern: &str) -> SplitConfig {
    SplitConfig {
        input: input.to_path_buf(),
        mode,
        pattern: OutputPattern::parse(pattern).unwrap(),
        output_dir: None,
        overwrite_mode: OverwriteMode::Refuse,
        display: DisplayOptions::default(),
    }
}

#[rstest]
#[case(10, 3, 4)]
#[case(10, 5, 2)]
#[case(10, 10, 1)]
#[case(10, 25, 1)]
#[case(1, 1, 1)]
#[tokio::test]
async fn test_fixed_size_split_counts(
    #[case] pages: usize,
    #[case] size: u32,
    #[case] expected_files: usize,
) {
    let temp_dir = TempDir::new().unwrap();
    let input = create_pdf(temp_dir.path(), "doc.pdf", "p", pages);

    let outcome = split_pdf(&split_config(
        &input,
        SplitMode::EveryNPages(size),
        DEFAULT_SPLIT_PATTERN,
    ))
    .await
    .unwrap();

    assert_eq!(outcome.outputs.len(), expected_files);
    let total: usize = outcome.outputs.iter().map(|o| page_count(&o.path)).sum();
    assert_eq!(total, pages);
}

#[tokio::test]
async fn test_split_at_breakpoints() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_pdf(temp_dir.path(), "book.pdf", "p", 100);

    let outcome = split_pdf(&split_config(
        &input,
        SplitMode::AtPages(vec![25, 50]),
        DEFAULT_SPLIT_PATTERN,
    ))
    .await
    .unwrap();

    let chunks: Vec<Chunk> = outcome.outputs.iter().map(|o| o.chunk).collect();
    assert_eq!(
        chunks,
        vec![Chunk::new(1, 24), Chunk::new(25, 49), Chunk::new(50, 100)]
    );

    let second = temp_dir.path().join("book_part2.pdf");
    assert_eq!(page_labels(&second), labels("p", 25, 49));
    assert_eq!(page_count(&temp_dir.path().join("book_part3.pdf")), 51);
}

#[tokio::test]
async fn test_split_pages_one_file_per_page() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_pdf(temp_dir.path(), "deck.pdf", "slide", 4);

    let mut config = split_config(&input, SplitMode::SinglePages, DEFAULT_PAGES_PATTERN);
    config.output_dir = Some(temp_dir.path().join("out/slides"));
    let outcome = split_pdf(&config).await.unwrap();

    assert_eq!(outcome.outputs.len(), 4);
    for n in 1..=4 {
        let path = temp_dir.path().join(format!("out/slides/deck_page{n}.pdf"));
        assert_eq!(page_labels(&path), vec![format!("slide-{n}")]);
    }
}

#[tokio::test]
async fn test_split_padded_pattern() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_pdf(temp_dir.path(), "deck.pdf", "s", 3);

    split_pdf(&split_config(
        &input,
        SplitMode::SinglePages,
        "{base}-{num:03}.pdf",
    ))
    .await
    .unwrap();

    assert!(temp_dir.path().join("deck-001.pdf").exists());
    assert!(temp_dir.path().join("deck-003.pdf").exists());
}

#[tokio::test]
async fn test_split_collision_leaves_everything_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_pdf(temp_dir.path(), "doc.pdf", "p", 6);
    let existing = temp_dir.path().join("doc_part3.pdf");
    std::fs::write(&existing, b"keep").unwrap();

    let result = split_pdf(&split_config(
        &input,
        SplitMode::EveryNPages(2),
        DEFAULT_SPLIT_PATTERN,
    ))
    .await;

    assert!(matches!(result, Err(ToolkitError::OutputExists { .. })));
    assert!(!temp_dir.path().join("doc_part1.pdf").exists());
    assert!(!temp_dir.path().join("doc_part2.pdf").exists());
    assert_eq!(std::fs::read(&existing).unwrap(), b"keep");
}

#[rstest]
#[case(SplitMode::EveryNPages(0))]
#[case(SplitMode::AtPages(vec![1]))]
#[case(SplitMode::AtPages(vec![11]))]
#[case(SplitMode::AtPages(vec![]))]
#[tokio::test]
async fn test_split_invalid_modes(#[case] mode: SplitMode) {
    let temp_dir = TempDir::new().unwrap();
    let input = create_pdf(temp_dir.path(), "doc.pdf", "p", 10);

    let result = split_pdf(&split_config(&input, mode, DEFAULT_SPLIT_PATTERN)).await;
    assert!(matches!(result, Err(ToolkitError::InvalidArgument { .. })));
}
