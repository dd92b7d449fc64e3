//! Integration tests for merging.

use pdfpart::io::{PdfReader, PdfWriter};
use pdfpart::merge::Merger;
use tempfile::TempDir;

use crate::common::{pdf_with_pages, write_pdf};

#[tokio::test]
async fn test_merge_three_sources_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(&temp_dir, "a.pdf", pdf_with_pages(2));
    let b = write_pdf(&temp_dir, "b.pdf", pdf_with_pages(3));
    let c = write_pdf(&temp_dir, "c.pdf", pdf_with_pages(1));

    let merger = Merger::new();
    let outcome = merger.merge(&[a, b, c], 4).await.unwrap();

    assert_eq!(outcome.statistics.files_merged, 3);
    assert_eq!(outcome.statistics.total_pages, 6);

    // Write and reparse the merged document.
    let output = temp_dir.path().join("merged.pdf");
    let writer = PdfWriter::new();
    writer.save_document(&outcome.document, &output).await.unwrap();

    let reader = PdfReader::new();
    let merged = reader.load(&output).await.unwrap();
    assert_eq!(merged.page_count, 6);
}

#[tokio::test]
async fn test_merge_skips_failing_source() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(&temp_dir, "a.pdf", pdf_with_pages(2));
    let broken = temp_dir.path().join("broken.pdf");
    std::fs::write(&broken, b"definitely not a pdf").unwrap();
    let c = write_pdf(&temp_dir, "c.pdf", pdf_with_pages(3));

    let merger = Merger::new();
    let outcome = merger
        .merge(&[a.clone(), broken.clone(), c.clone()], 2)
        .await
        .unwrap();

    assert_eq!(outcome.statistics.files_merged, 2);
    assert_eq!(outcome.statistics.total_pages, 5);
    assert_eq!(outcome.merged_files, vec![a, c]);

    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].path, broken);
    assert!(!outcome.skipped[0].reason.is_empty());
}

#[tokio::test]
async fn test_merge_same_source_twice() {
    let temp_dir = TempDir::new().unwrap();
    let doc = write_pdf(&temp_dir, "doc.pdf", pdf_with_pages(4));

    let merger = Merger::new();
    let outcome = merger.merge(&[doc.clone(), doc], 1).await.unwrap();

    assert_eq!(outcome.statistics.files_merged, 2);
    assert_eq!(outcome.statistics.total_pages, 8);
}

#[tokio::test]
async fn test_merge_all_failing_returns_error() {
    let temp_dir = TempDir::new().unwrap();
    let one = temp_dir.path().join("one.pdf");
    let two = temp_dir.path().join("two.pdf");

    let merger = Merger::new();
    let result = merger.merge(&[one, two], 4).await;

    assert!(result.is_err());
}
