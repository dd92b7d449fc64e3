//! Integration tests for failure paths.

use pdfpart::config::OverwriteMode;
use pdfpart::error::PdfPartError;
use pdfpart::io::{PdfReader, PdfWriter};
use pdfpart::split::{OutlineSplitter, PageCountSplitter, SizeBoundedSplitter};
use pdfpart::validation::Validator;
use tempfile::TempDir;

use crate::common::{pdf_with_pages, write_pdf};

#[tokio::test]
async fn test_load_missing_file() {
    let reader = PdfReader::new();
    let result = reader
        .load(std::path::Path::new("/no/such/file.pdf"))
        .await;

    assert!(matches!(
        result.unwrap_err(),
        PdfPartError::FileNotFound { .. }
    ));
}

#[tokio::test]
async fn test_load_directory_is_rejected() {
    let temp_dir = TempDir::new().unwrap();

    let reader = PdfReader::new();
    let result = reader.load(temp_dir.path()).await;

    assert!(matches!(result.unwrap_err(), PdfPartError::NotAFile { .. }));
}

#[tokio::test]
async fn test_load_corrupt_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("garbage.pdf");
    std::fs::write(&path, b"%PDF-but not really").unwrap();

    let reader = PdfReader::new();
    let result = reader.load(&path).await;

    assert!(matches!(
        result.unwrap_err(),
        PdfPartError::UnreadableContainer { .. }
    ));
}

#[tokio::test]
async fn test_load_empty_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.pdf");
    std::fs::File::create(&path).unwrap();

    let reader = PdfReader::new();
    let result = reader.load(&path).await;

    assert!(matches!(
        result.unwrap_err(),
        PdfPartError::UnreadableContainer { .. }
    ));
}

#[tokio::test]
async fn test_zero_page_source_splits_to_zero_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_pdf(&temp_dir, "empty_tree.pdf", pdf_with_pages(0));

    // The split commands load through the permissive reader; an empty
    // page tree must come out as zero parts, not a load error.
    let reader = PdfReader::allowing_empty();
    let source = reader.load(&path).await.unwrap();
    assert_eq!(source.page_count, 0);

    let by_pages = PageCountSplitter::new().split(&source, 3).unwrap();
    assert!(by_pages.artifacts.is_empty());

    let by_size = SizeBoundedSplitter::new().split(&source, 100).unwrap();
    assert!(by_size.artifacts.is_empty());

    let by_outline = OutlineSplitter::new().split(&source).unwrap();
    assert!(by_outline.artifacts.is_empty());
}

#[tokio::test]
async fn test_page_count_allows_zero_page_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_pdf(&temp_dir, "empty_tree.pdf", pdf_with_pages(0));

    let reader = PdfReader::new();
    let count = reader.page_count(&path).await.unwrap();

    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_write_to_missing_directory_fails_cleanly() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("missing").join("out.pdf");

    let writer = PdfWriter::new();
    let result = writer.write_bytes(vec![1, 2, 3], &target).await;

    assert!(result.is_err());

    // No staging file may be left behind.
    let leftovers: Vec<_> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn test_no_clobber_refuses_existing_target() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("exists.pdf");
    std::fs::write(&target, b"occupied").unwrap();

    let validator = Validator::new();
    let result = validator
        .validate_output(&target, OverwriteMode::NoClobber)
        .await;

    assert!(matches!(
        result.unwrap_err(),
        PdfPartError::OutputExists { .. }
    ));
}

#[test]
fn test_exit_codes_are_distinct_per_class() {
    let path_err = PdfPartError::file_not_found("a.pdf".into());
    let parse_err = PdfPartError::unreadable_container("a.pdf".into(), "bad xref");
    let exists_err = PdfPartError::output_exists("out.pdf".into());

    assert_ne!(path_err.exit_code(), 0);
    assert_ne!(path_err.exit_code(), parse_err.exit_code());
    assert_ne!(parse_err.exit_code(), exists_err.exit_code());
}
