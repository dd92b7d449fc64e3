//! Integration tests for outline-boundary splitting.

use pdfpart::io::{PdfReader, PdfWriter};
use pdfpart::split::{OutlineSplitter, SplitNote};
use tempfile::TempDir;

use crate::common::{pdf_with_outline, pdf_with_pages, write_pdf};

#[tokio::test]
async fn test_outline_split_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let doc = pdf_with_outline(9, &[("Intro", 0), ("Body", 2), ("Appendix", 7)]);
    let source_path = write_pdf(&temp_dir, "book.pdf", doc);

    let reader = PdfReader::new();
    let source = reader.load(&source_path).await.unwrap();

    let outcome = OutlineSplitter::new().split(&source).unwrap();

    assert_eq!(outcome.artifacts.len(), 3);
    assert!(outcome.notes.is_empty());

    let names: Vec<&str> = outcome
        .artifacts
        .iter()
        .map(|a| a.file_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "book_part_1_Intro.pdf",
            "book_part_2_Body.pdf",
            "book_part_3_Appendix.pdf",
        ]
    );

    let page_counts: Vec<usize> = outcome.artifacts.iter().map(|a| a.page_count()).collect();
    assert_eq!(page_counts, vec![2, 5, 2]);
}

#[tokio::test]
async fn test_duplicate_boundary_is_skipped_with_note() {
    let temp_dir = TempDir::new().unwrap();
    // Entries at pages 0, 4, 4, 9 of a 12-page document. The repeated
    // boundary produces an empty range for entry 2.
    let doc = pdf_with_outline(12, &[("One", 0), ("Two", 4), ("Three", 4), ("Four", 9)]);
    let source_path = write_pdf(&temp_dir, "dup.pdf", doc);

    let reader = PdfReader::new();
    let source = reader.load(&source_path).await.unwrap();

    let outcome = OutlineSplitter::new().split(&source).unwrap();

    assert_eq!(outcome.artifacts.len(), 3);
    assert_eq!(
        outcome.notes,
        vec![SplitNote::DegenerateRange {
            entry: 2,
            title: "Two".to_string(),
            page: 4,
        }]
    );

    let page_counts: Vec<usize> = outcome.artifacts.iter().map(|a| a.page_count()).collect();
    assert_eq!(page_counts, vec![4, 5, 3]);
}

#[tokio::test]
async fn test_document_without_outline_notes_and_produces_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let source_path = write_pdf(&temp_dir, "plain.pdf", pdf_with_pages(5));

    let reader = PdfReader::new();
    let source = reader.load(&source_path).await.unwrap();

    let outcome = OutlineSplitter::new().split(&source).unwrap();

    assert!(outcome.artifacts.is_empty());
    assert_eq!(outcome.notes, vec![SplitNote::NoOutlineAvailable]);
    assert_eq!(outcome.statistics.parts, 0);
}

#[tokio::test]
async fn test_written_parts_have_no_outline() {
    let temp_dir = TempDir::new().unwrap();
    let doc = pdf_with_outline(6, &[("A", 0), ("B", 3)]);
    let source_path = write_pdf(&temp_dir, "src.pdf", doc);

    let reader = PdfReader::new();
    let source = reader.load(&source_path).await.unwrap();

    let outcome = OutlineSplitter::new().split(&source).unwrap();

    let writer = PdfWriter::new();
    for artifact in outcome.artifacts {
        let target = temp_dir.path().join(&artifact.file_name);
        writer.write_bytes(artifact.bytes, &target).await.unwrap();

        // A part holds a slice of the source; keeping the source outline
        // would point at pages the part no longer has.
        let part = reader.load(&target).await.unwrap();
        assert!(!part.document.catalog().unwrap().has(b"Outlines"));
    }
}

#[tokio::test]
async fn test_outline_titles_with_path_characters_are_sanitized() {
    let temp_dir = TempDir::new().unwrap();
    let doc = pdf_with_outline(4, &[("Part 1: a/b", 0), ("Part 2: c\\d", 2)]);
    let source_path = write_pdf(&temp_dir, "weird.pdf", doc);

    let reader = PdfReader::new();
    let source = reader.load(&source_path).await.unwrap();

    let outcome = OutlineSplitter::new().split(&source).unwrap();

    let names: Vec<&str> = outcome
        .artifacts
        .iter()
        .map(|a| a.file_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "weird_part_1_Part 1_ a_b.pdf",
            "weird_part_2_Part 2_ c_d.pdf",
        ]
    );
}
