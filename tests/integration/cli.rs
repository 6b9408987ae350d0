//! End-to-end runs of the pdf-toolkit binary.

use lopdf::dictionary;
use tempfile::TempDir;

use crate::common::{
    create_pdf, encrypt, labels, page_count, page_labels, run, save, stderr, stdout,
};

#[test]
fn test_cli_merge() {
    let temp_dir = TempDir::new().unwrap();
    create_pdf(temp_dir.path(), "a.pdf", "a", 3);
    create_pdf(temp_dir.path(), "b.pdf", "b", 5);
    create_pdf(temp_dir.path(), "c.pdf", "c", 2);

    let output = run(
        temp_dir.path(),
        &["merge", "a.pdf", "b.pdf", "c.pdf", "-o", "all.pdf", "--no-progress"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("✓ Created"));
    assert_eq!(page_count(&temp_dir.path().join("all.pdf")), 10);
}

#[test]
fn test_cli_merge_glob() {
    let temp_dir = TempDir::new().unwrap();
    create_pdf(temp_dir.path(), "ch1.pdf", "one", 1);
    create_pdf(temp_dir.path(), "ch2.pdf", "two", 1);

    let output = run(temp_dir.path(), &["-q", "merge", "ch*.pdf", "-o", "book.pdf"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).is_empty());
    assert_eq!(
        page_labels(&temp_dir.path().join("book.pdf")),
        vec!["one-1", "two-1"]
    );
}

#[test]
fn test_cli_refuses_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    create_pdf(temp_dir.path(), "a.pdf", "a", 1);
    create_pdf(temp_dir.path(), "b.pdf", "b", 1);
    let existing = temp_dir.path().join("out.pdf");
    std::fs::write(&existing, b"untouched").unwrap();

    let output = run(temp_dir.path(), &["merge", "a.pdf", "b.pdf", "-o", "out.pdf"]);

    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("✗"));
    assert!(stderr(&output).contains("--overwrite"));
    assert_eq!(std::fs::read(&existing).unwrap(), b"untouched");

    let output = run(
        temp_dir.path(),
        &["merge", "a.pdf", "b.pdf", "-o", "out.pdf", "--overwrite"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(page_count(&existing), 2);
}

#[test]
fn test_cli_merge_dir_recursive() {
    let temp_dir = TempDir::new().unwrap();
    create_pdf(temp_dir.path(), "scans/01.pdf", "first", 1);
    create_pdf(temp_dir.path(), "scans/02.pdf", "second", 2);
    create_pdf(temp_dir.path(), "scans/more/03.pdf", "third", 1);
    std::fs::write(temp_dir.path().join("scans/notes.txt"), b"ignored").unwrap();

    let flat = run(temp_dir.path(), &["merge-dir", "scans", "-o", "flat.pdf"]);
    assert!(flat.status.success(), "stderr: {}", stderr(&flat));
    assert_eq!(page_count(&temp_dir.path().join("flat.pdf")), 3);

    let deep = run(temp_dir.path(), &["merge-dir", "scans", "-o", "deep.pdf", "-r"]);
    assert!(deep.status.success(), "stderr: {}", stderr(&deep));
    assert_eq!(
        page_labels(&temp_dir.path().join("deep.pdf")),
        vec!["first-1", "second-1", "second-2", "third-1"]
    );
}

#[test]
fn test_cli_merge_dir_without_pdfs() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir(temp_dir.path().join("empty")).unwrap();

    let output = run(temp_dir.path(), &["merge-dir", "empty", "-o", "out.pdf"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!temp_dir.path().join("out.pdf").exists());

    let output = run(temp_dir.path(), &["merge-dir", "missing", "-o", "out.pdf"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_cli_split_variants() {
    let temp_dir = TempDir::new().unwrap();
    create_pdf(temp_dir.path(), "book.pdf", "p", 9);

    let output = run(temp_dir.path(), &["split", "book.pdf", "-p", "4", "--o-dir", "fixed"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Created 3 files"));
    assert_eq!(page_labels(&temp_dir.path().join("fixed/book_part3.pdf")), vec!["p-9"]);

    let output = run(
        temp_dir.path(),
        &["split-at", "book.pdf", "--at", "3", "--at", "7", "-d", "at"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        page_labels(&temp_dir.path().join("at/book_part2.pdf")),
        labels("p", 3, 6)
    );

    let output = run(temp_dir.path(), &["split-pages", "book.pdf", "-d", "single"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(std::fs::read_dir(temp_dir.path().join("single")).unwrap().count(), 9);
}

#[test]
fn test_cli_extract() {
    let temp_dir = TempDir::new().unwrap();
    create_pdf(temp_dir.path(), "report.pdf", "r", 20);

    let output = run(
        temp_dir.path(),
        &["extract", "report.pdf", "--pages", "1,5,10-15", "-o", "summary.pdf"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Extracted 8 of 20 pages"));

    let output = run(
        temp_dir.path(),
        &["extract", "report.pdf", "--pages", "abc", "-o", "bad.pdf"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(!temp_dir.path().join("bad.pdf").exists());
}

#[test]
fn test_cli_info_and_count() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_pdf(temp_dir.path(), "plain.pdf", "p", 4);

    let mut doc = lopdf::Document::load(&path).unwrap();
    let info_id = doc.add_object(dictionary! {
        "Title" => lopdf::Object::string_literal("Quarterly Figures"),
        "Author" => lopdf::Object::string_literal("Finance"),
    });
    doc.trailer.set("Info", info_id);
    save(temp_dir.path(), "titled.pdf", doc);

    let output = run(temp_dir.path(), &["info", "titled.pdf"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Pages:"));
    assert!(text.contains("Quarterly Figures"));
    assert!(text.contains("Finance"));

    let output = run(temp_dir.path(), &["info", "titled.pdf", "--json"]);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["pageCount"], 4);
    assert_eq!(json["metadata"]["author"], "Finance");

    let output = run(temp_dir.path(), &["count", "plain.pdf"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "plain.pdf has 4 pages");

    let output = run(temp_dir.path(), &["-q", "count", "plain.pdf"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "plain.pdf has 4 pages");
}

#[test]
fn test_cli_encrypted_input() {
    let temp_dir = TempDir::new().unwrap();
    let plain = create_pdf(temp_dir.path(), "plain.pdf", "p", 3);
    encrypt(temp_dir.path(), "locked.pdf", &plain, "user");
    encrypt(temp_dir.path(), "open.pdf", &plain, "");

    for args in [
        &["merge", "plain.pdf", "open.pdf", "-o", "all.pdf"][..],
        &["split-pages", "open.pdf"],
        &["extract", "locked.pdf", "--pages", "1", "-o", "one.pdf"],
        &["count", "open.pdf"],
        &["info", "locked.pdf"],
    ] {
        let output = run(temp_dir.path(), args);
        assert_eq!(output.status.code(), Some(3), "args: {args:?}");
        assert!(stderr(&output).contains("encrypted"), "args: {args:?}");
    }
    assert!(!temp_dir.path().join("all.pdf").exists());
    assert!(!temp_dir.path().join("open_page1.pdf").exists());

    let output = run(temp_dir.path(), &["info", "open.pdf", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["encrypted"], true);
    assert_eq!(json["pageCount"], 3);
}

#[test]
fn test_cli_error_exit_codes() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("junk.pdf"), b"not a pdf at all").unwrap();
    std::fs::write(temp_dir.path().join("notes.txt"), b"text").unwrap();

    let missing = run(temp_dir.path(), &["count", "nope.pdf"]);
    assert_eq!(missing.status.code(), Some(2));
    assert!(stdout(&missing).is_empty());

    let corrupt = run(temp_dir.path(), &["count", "junk.pdf"]);
    assert_eq!(corrupt.status.code(), Some(3));

    let wrong_type = run(temp_dir.path(), &["info", "notes.txt"]);
    assert_eq!(wrong_type.status.code(), Some(1));
}

#[test]
fn test_cli_version() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(temp_dir.path(), &["version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}
