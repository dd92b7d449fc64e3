//! Integration tests for size-bounded splitting.

use pdfpart::io::{PdfReader, PdfWriter};
use pdfpart::split::SizeBoundedSplitter;
use tempfile::TempDir;

use crate::common::{pdf_with_content_pages, write_pdf};

#[tokio::test]
async fn test_split_produces_ordered_partition() {
    let temp_dir = TempDir::new().unwrap();
    // Six pages of ~4 KiB each; a 10 KiB bound forces multiple parts.
    let source_path = write_pdf(&temp_dir, "big.pdf", pdf_with_content_pages(6, 4096));

    let reader = PdfReader::new();
    let source = reader.load(&source_path).await.unwrap();

    let outcome = SizeBoundedSplitter::new().split(&source, 10).unwrap();

    assert!(outcome.artifacts.len() > 1);

    // Parts cover all pages, in order, with no gap or overlap.
    let mut expected_start = 0;
    for artifact in &outcome.artifacts {
        assert_eq!(artifact.group.start, expected_start);
        expected_start = artifact.group.end;
    }
    assert_eq!(expected_start, 6);

    let total_pages: usize = outcome.artifacts.iter().map(|a| a.page_count()).sum();
    assert_eq!(total_pages, 6);
}

#[tokio::test]
async fn test_part_numbers_are_zero_based() {
    let temp_dir = TempDir::new().unwrap();
    let source_path = write_pdf(&temp_dir, "doc.pdf", pdf_with_content_pages(4, 4096));

    let reader = PdfReader::new();
    let source = reader.load(&source_path).await.unwrap();

    let outcome = SizeBoundedSplitter::new().split(&source, 8).unwrap();

    for (i, artifact) in outcome.artifacts.iter().enumerate() {
        assert_eq!(artifact.file_name, format!("doc_part_{i}.pdf"));
    }
}

#[tokio::test]
async fn test_generous_bound_yields_single_part() {
    let temp_dir = TempDir::new().unwrap();
    let source_path = write_pdf(&temp_dir, "small.pdf", pdf_with_content_pages(3, 512));

    let reader = PdfReader::new();
    let source = reader.load(&source_path).await.unwrap();

    // 10 MiB bound; everything fits in one part.
    let outcome = SizeBoundedSplitter::new().split(&source, 10 * 1024).unwrap();

    assert_eq!(outcome.artifacts.len(), 1);
    assert_eq!(outcome.artifacts[0].page_count(), 3);
    assert_eq!(outcome.artifacts[0].file_name, "small_part_0.pdf");
}

#[tokio::test]
async fn test_written_parts_reparse() {
    let temp_dir = TempDir::new().unwrap();
    let source_path = write_pdf(&temp_dir, "data.pdf", pdf_with_content_pages(5, 4096));

    let reader = PdfReader::new();
    let source = reader.load(&source_path).await.unwrap();

    let outcome = SizeBoundedSplitter::new().split(&source, 10).unwrap();

    let writer = PdfWriter::new();
    let mut reparsed_total = 0;
    for artifact in outcome.artifacts {
        let target = temp_dir.path().join(&artifact.file_name);
        let expected_pages = artifact.page_count();
        writer.write_bytes(artifact.bytes, &target).await.unwrap();

        let part = reader.load(&target).await.unwrap();
        assert_eq!(part.page_count, expected_pages);
        reparsed_total += part.page_count;
    }

    assert_eq!(reparsed_total, 5);
}

#[tokio::test]
async fn test_zero_bound_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let source_path = write_pdf(&temp_dir, "x.pdf", pdf_with_content_pages(1, 128));

    let reader = PdfReader::new();
    let source = reader.load(&source_path).await.unwrap();

    let result = SizeBoundedSplitter::new().split(&source, 0);
    assert!(result.is_err());
}
