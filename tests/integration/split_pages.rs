//! Integration tests for fixed page-count splitting.

use pdfpart::io::{PdfReader, PdfWriter};
use pdfpart::split::PageCountSplitter;
use tempfile::TempDir;

use crate::common::{pdf_with_pages, write_pdf};

#[tokio::test]
async fn test_split_ten_pages_by_three() {
    let temp_dir = TempDir::new().unwrap();
    let source_path = write_pdf(&temp_dir, "source.pdf", pdf_with_pages(10));

    let reader = PdfReader::new();
    let source = reader.load(&source_path).await.unwrap();

    let outcome = PageCountSplitter::new().split(&source, 3).unwrap();

    assert_eq!(outcome.artifacts.len(), 4);

    let page_counts: Vec<usize> = outcome.artifacts.iter().map(|a| a.page_count()).collect();
    assert_eq!(page_counts, vec![3, 3, 3, 1]);

    let names: Vec<&str> = outcome
        .artifacts
        .iter()
        .map(|a| a.file_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "source_part_1.pdf",
            "source_part_2.pdf",
            "source_part_3.pdf",
            "source_part_4.pdf",
        ]
    );
}

#[tokio::test]
async fn test_written_parts_reparse_with_expected_pages() {
    let temp_dir = TempDir::new().unwrap();
    let source_path = write_pdf(&temp_dir, "doc.pdf", pdf_with_pages(7));

    let reader = PdfReader::new();
    let source = reader.load(&source_path).await.unwrap();

    let outcome = PageCountSplitter::new().split(&source, 4).unwrap();

    let writer = PdfWriter::new();
    let mut reparsed_counts = Vec::new();
    for artifact in outcome.artifacts {
        let target = temp_dir.path().join(&artifact.file_name);
        writer.write_bytes(artifact.bytes, &target).await.unwrap();

        let part = reader.load(&target).await.unwrap();
        reparsed_counts.push(part.page_count);
    }

    assert_eq!(reparsed_counts, vec![4, 3]);
}

#[tokio::test]
async fn test_even_division_has_no_short_tail() {
    let temp_dir = TempDir::new().unwrap();
    let source_path = write_pdf(&temp_dir, "even.pdf", pdf_with_pages(6));

    let reader = PdfReader::new();
    let source = reader.load(&source_path).await.unwrap();

    let outcome = PageCountSplitter::new().split(&source, 2).unwrap();

    assert_eq!(outcome.artifacts.len(), 3);
    assert!(outcome.artifacts.iter().all(|a| a.page_count() == 2));
    assert_eq!(outcome.statistics.source_pages, 6);
    assert_eq!(outcome.statistics.parts, 3);
}

#[tokio::test]
async fn test_part_count_larger_than_document() {
    let temp_dir = TempDir::new().unwrap();
    let source_path = write_pdf(&temp_dir, "short.pdf", pdf_with_pages(2));

    let reader = PdfReader::new();
    let source = reader.load(&source_path).await.unwrap();

    let outcome = PageCountSplitter::new().split(&source, 50).unwrap();

    assert_eq!(outcome.artifacts.len(), 1);
    assert_eq!(outcome.artifacts[0].page_count(), 2);
    assert_eq!(outcome.artifacts[0].file_name, "short_part_1.pdf");
}
