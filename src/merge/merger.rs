//! Core merge implementation.

use lopdf::{Document, Object, ObjectId};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{PdfPartError, Result};
use crate::io::{LoadedPdf, PdfReader};
use crate::utils::format_file_size;

/// A source that could not be loaded and was left out of the merge.
#[derive(Debug, Clone, Serialize)]
pub struct SourceFailure {
    /// Path of the skipped source.
    pub path: PathBuf,

    /// Human-readable reason for the skip.
    pub reason: String,
}

/// Statistics about a merge operation.
#[derive(Debug, Clone, Serialize)]
pub struct MergeStatistics {
    /// Number of sources successfully merged.
    pub files_merged: usize,

    /// Number of sources skipped due to load failures.
    pub files_skipped: usize,

    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Total size of the merged input files.
    pub input_size: u64,

    /// Time taken to load all sources.
    #[serde(skip)]
    pub load_time: Duration,

    /// Total time taken for the merge.
    #[serde(skip)]
    pub merge_time: Duration,
}

impl MergeStatistics {
    /// Format input size as a human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of a merge operation.
pub struct MergeOutcome {
    /// The merged document.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// Paths of sources that contributed pages, in output order.
    pub merged_files: Vec<PathBuf>,

    /// Sources that failed to load and were skipped.
    pub skipped: Vec<SourceFailure>,
}

/// Merges the page sequences of multiple documents into one.
pub struct Merger {
    reader: PdfReader,
}

impl Merger {
    /// Create a new merger with default settings.
    pub fn new() -> Self {
        Self {
            reader: PdfReader::new(),
        }
    }

    /// Merge `inputs` into a single document, preserving input order.
    ///
    /// Sources that fail to load with a recoverable error (missing,
    /// unreadable, encrypted) are recorded in [`MergeOutcome::skipped`]
    /// and the merge continues with the rest.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPartError::NoSourcesMerged`] when every source failed
    /// to load, carrying no partial output, and propagates any
    /// non-recoverable load error as-is.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfpart::merge::Merger;
    /// # use std::path::PathBuf;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let merger = Merger::new();
    /// let inputs = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
    /// let outcome = merger.merge(&inputs, 4).await?;
    /// println!(
    ///     "merged {} files into {} pages",
    ///     outcome.statistics.files_merged,
    ///     outcome.statistics.total_pages
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(&self, inputs: &[PathBuf], jobs: usize) -> Result<MergeOutcome> {
        let merge_start = Instant::now();

        let load_start = Instant::now();
        let (load_results, _load_stats) = self.reader.load_all(inputs, jobs).await;
        let load_time = load_start.elapsed();

        let mut loaded_pdfs = Vec::new();
        let mut skipped = Vec::new();
        for (path, result) in inputs.iter().zip(load_results) {
            match result {
                Ok(loaded) => loaded_pdfs.push(loaded),
                Err(e) if e.is_recoverable() => skipped.push(SourceFailure {
                    path: path.clone(),
                    reason: e.to_string(),
                }),
                Err(e) => return Err(e),
            }
        }

        if loaded_pdfs.is_empty() {
            return Err(PdfPartError::NoSourcesMerged);
        }

        let document = concatenate(&loaded_pdfs)?;

        let statistics = MergeStatistics {
            files_merged: loaded_pdfs.len(),
            files_skipped: skipped.len(),
            total_pages: document.get_pages().len(),
            input_size: loaded_pdfs.iter().map(|p| p.file_size).sum(),
            load_time,
            merge_time: merge_start.elapsed(),
        };

        let merged_files: Vec<PathBuf> = loaded_pdfs.into_iter().map(|p| p.path).collect();

        Ok(MergeOutcome {
            document,
            statistics,
            merged_files,
            skipped,
        })
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}

/// Concatenate the page sequences of `loaded_pdfs` in order.
///
/// The first document becomes the base; each following document is
/// renumbered past the base's highest object id, its objects are moved
/// across, and its page references are appended to the base's page tree.
fn concatenate(loaded_pdfs: &[LoadedPdf]) -> Result<Document> {
    let mut merged = loaded_pdfs[0].document.clone();
    let mut max_id = merged.max_id;

    for loaded in &loaded_pdfs[1..] {
        let mut doc = loaded.document.clone();

        doc.renumber_objects_with(max_id + 1);
        max_id = doc.max_id;

        let doc_pages: Vec<ObjectId> = doc.get_pages().into_values().collect();

        merged.objects.extend(doc.objects);

        append_pages(&mut merged, &doc_pages, &loaded.path)?;
    }

    merged.compress();
    // Each appended document leaves its old catalog behind; drop
    // everything unreachable from the base trailer.
    merged.prune_objects();
    merged.renumber_objects();

    Ok(merged)
}

/// Append page references to the base document's root page tree.
fn append_pages(merged: &mut Document, page_ids: &[ObjectId], source: &Path) -> Result<()> {
    let unreadable = |reason: String| PdfPartError::unreadable_container(source.to_path_buf(), reason);

    let catalog = merged
        .catalog_mut()
        .map_err(|e| unreadable(format!("no catalog in merge base: {e}")))?;

    let pages_id = catalog
        .get(b"Pages")
        .and_then(|p| p.as_reference())
        .map_err(|e| unreadable(format!("no page tree reference: {e}")))?;

    let pages_dict = merged
        .get_object_mut(pages_id)
        .map_err(|e| unreadable(format!("missing page tree object: {e}")))?;

    let Object::Dictionary(dict) = pages_dict else {
        return Err(unreadable("page tree is not a dictionary".to_string()));
    };

    match dict.get_mut(b"Kids") {
        Ok(Object::Array(kids)) => {
            for &page_id in page_ids {
                kids.push(Object::Reference(page_id));
            }
        }
        _ => return Err(unreadable("page tree has no Kids array".to_string())),
    }

    let current_count = dict.get(b"Count").and_then(|c| c.as_i64()).unwrap_or(0);
    dict.set("Count", Object::Integer(current_count + page_ids.len() as i64));

    Ok(())
}
