//! PDF reading and loading operations.
//!
//! Loading goes through [`PdfReader`], which wraps the `lopdf` codec and
//! normalizes its failures into the crate error taxonomy. Batch loading for
//! merge keeps input order even when loads run in parallel.

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{PdfPartError, Result};

/// A loaded PDF document with metadata about its source.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

impl LoadedPdf {
    fn new(document: Document, path: PathBuf, load_time: Duration) -> Self {
        let page_count = document.get_pages().len();
        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Self {
            document,
            path,
            page_count,
            load_time,
            file_size,
        }
    }
}

/// Result of a load operation (success or failure).
pub type LoadResult = Result<LoadedPdf>;

/// Statistics for a batch load operation.
#[derive(Debug, Clone)]
pub struct LoadStatistics {
    /// Number of PDFs successfully loaded.
    pub success_count: usize,

    /// Number of PDFs that failed to load.
    pub failure_count: usize,

    /// Total time taken for all loads.
    pub total_time: Duration,

    /// Total size of successfully loaded files.
    pub total_size: u64,

    /// Total number of pages loaded.
    pub total_pages: usize,
}

impl LoadStatistics {
    fn from_results(results: &[LoadResult], total_time: Duration) -> Self {
        let mut success_count = 0;
        let mut failure_count = 0;
        let mut total_size = 0;
        let mut total_pages = 0;

        for result in results {
            match result {
                Ok(loaded) => {
                    success_count += 1;
                    total_size += loaded.file_size;
                    total_pages += loaded.page_count;
                }
                Err(_) => {
                    failure_count += 1;
                }
            }
        }

        Self {
            success_count,
            failure_count,
            total_time,
            total_size,
            total_pages,
        }
    }

    /// Format total size as human-readable string.
    pub fn format_total_size(&self) -> String {
        crate::utils::format_file_size(self.total_size)
    }
}

/// PDF reader wrapping the `lopdf` codec.
#[derive(Debug, Clone)]
pub struct PdfReader {
    /// Whether to reject documents with an empty page tree after loading.
    verify: bool,
}

impl PdfReader {
    /// Create a new PDF reader with default settings.
    pub fn new() -> Self {
        Self { verify: true }
    }

    /// Create a reader that accepts documents with an empty page tree.
    ///
    /// The splitters need this: a zero-page source is a valid input that
    /// yields zero output artifacts, not an error.
    pub fn allowing_empty() -> Self {
        Self { verify: false }
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPartError::FileNotFound`] / [`PdfPartError::NotAFile`]
    /// for path problems, [`PdfPartError::EncryptedPdf`] for encrypted
    /// inputs and [`PdfPartError::UnreadableContainer`] for everything the
    /// codec rejects.
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();

        match tokio::fs::metadata(&path_buf).await {
            Ok(meta) if !meta.is_file() => {
                return Err(PdfPartError::not_a_file(path_buf));
            }
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PdfPartError::file_not_found(path_buf));
            }
            Err(e) => {
                return Err(PdfPartError::FileNotAccessible {
                    path: path_buf,
                    source: e,
                });
            }
        }

        let start = Instant::now();

        let doc = Document::load(&path_buf).await.map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                PdfPartError::encrypted_pdf(path_buf.clone())
            } else {
                PdfPartError::unreadable_container(path_buf.clone(), err_msg)
            }
        })?;

        if self.verify && doc.get_pages().is_empty() {
            return Err(PdfPartError::unreadable_container(
                path_buf,
                "PDF has no pages",
            ));
        }

        let load_time = start.elapsed();

        Ok(LoadedPdf::new(doc, path_buf, load_time))
    }

    /// Report the total page count of a source.
    ///
    /// # Errors
    ///
    /// Fails with [`PdfPartError::UnreadableContainer`] (or a path error)
    /// when the source cannot be opened or parsed.
    pub async fn page_count(&self, path: &Path) -> Result<usize> {
        let loaded = Self::allowing_empty().load(path).await?;
        Ok(loaded.page_count)
    }

    /// Load multiple PDF documents sequentially, in the order provided.
    pub async fn load_sequential(&self, paths: &[PathBuf]) -> Vec<LoadResult> {
        let mut results = Vec::with_capacity(paths.len());

        for path in paths {
            results.push(self.load(path).await);
        }

        results
    }

    /// Load multiple PDF documents in parallel.
    ///
    /// Loads concurrently with at most `workers` loads in flight, then
    /// restores input order before returning. Merge depends on that order.
    pub async fn load_parallel(&self, paths: &[PathBuf], workers: usize) -> Vec<LoadResult> {
        use futures::stream::{self, StreamExt};

        let workers = workers.max(1);

        let tasks = paths.iter().enumerate().map(|(idx, path)| {
            let path = path.clone();
            let reader = self.clone();
            async move {
                let result = reader.load(&path).await;
                (idx, result)
            }
        });

        let mut indexed_results: Vec<(usize, LoadResult)> = stream::iter(tasks)
            .buffer_unordered(workers)
            .collect::<Vec<_>>()
            .await;

        indexed_results.sort_by_key(|(idx, _)| *idx);

        indexed_results
            .into_iter()
            .map(|(_, result)| result)
            .collect()
    }

    /// Load all PDFs with automatic parallelization.
    ///
    /// Sequential loading is used for small batches to reduce overhead.
    ///
    /// # Returns
    ///
    /// A tuple of (results, statistics); results are in input order.
    pub async fn load_all(
        &self,
        paths: &[PathBuf],
        max_workers: usize,
    ) -> (Vec<LoadResult>, LoadStatistics) {
        let start = Instant::now();

        let results = if paths.len() <= 3 {
            self.load_sequential(paths).await
        } else {
            self.load_parallel(paths, max_workers).await
        };

        let total_time = start.elapsed();
        let stats = LoadStatistics::from_results(&results, total_time);

        (results, stats)
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}
