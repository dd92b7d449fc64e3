//! PDF writing and saving operations.
//!
//! All writes are atomic: bytes go to a staging file next to the target and
//! are renamed into place once fully flushed. Each staging file carries a
//! process-unique sequence number, so concurrent writes never collide on a
//! shared temporary name. On any write failure the staging file is removed
//! before the error propagates; artifacts flushed earlier are left intact.

use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfPartError, Result};

/// Process-wide counter for unique staging-file names.
static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

fn staging_path(target: &Path) -> PathBuf {
    let seq = STAGING_SEQ.fetch_add(1, Ordering::Relaxed);
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{seq}.tmp"));
    target.with_file_name(name)
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        crate::utils::format_file_size(self.file_size)
    }
}

/// PDF writer with atomic-write behavior.
pub struct PdfWriter {
    buffer_size: usize,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self { buffer_size: 8192 }
    }

    /// Write already-serialized artifact bytes to a file.
    ///
    /// Used for split artifacts, whose bytes were produced when the page
    /// assembly was finalized.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPartError::FailedToCreateOutput`] when the staging file
    /// cannot be created and [`PdfPartError::WriteFailure`] when writing or
    /// the final rename fails. The staging file never survives a failure.
    pub async fn write_bytes(&self, bytes: Vec<u8>, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let buffer_size = self.buffer_size;

        task::spawn_blocking(move || {
            let start = Instant::now();
            let write_path = staging_path(&path_buf);

            let file = std::fs::File::create(&write_path).map_err(|e| {
                PdfPartError::FailedToCreateOutput {
                    path: path_buf.clone(),
                    source: e,
                }
            })?;

            let result = (|| {
                let mut writer = std::io::BufWriter::with_capacity(buffer_size, file);
                writer.write_all(&bytes)?;
                writer.flush()?;
                Ok::<_, std::io::Error>(())
            })();

            if let Err(e) = result {
                let _ = std::fs::remove_file(&write_path);
                return Err(PdfPartError::WriteFailure {
                    path: path_buf,
                    source: e,
                });
            }

            if let Err(e) = std::fs::rename(&write_path, &path_buf) {
                let _ = std::fs::remove_file(&write_path);
                return Err(PdfPartError::WriteFailure {
                    path: path_buf,
                    source: e,
                });
            }

            let write_time = start.elapsed();
            let file_size = std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0);

            Ok(WriteStatistics {
                write_time,
                file_size,
                output_path: path_buf,
            })
        })
        .await
        .map_err(|e| PdfPartError::other(format!("Write task failed: {e}")))?
    }

    /// Serialize a document and write it to a file.
    ///
    /// Used for the merge result. The document is compressed and renumbered
    /// before serialization, matching how split artifacts are produced.
    pub async fn save_document(&self, doc: &Document, path: &Path) -> Result<WriteStatistics> {
        let mut doc = doc.clone();

        let bytes = task::spawn_blocking(move || {
            doc.compress();
            doc.renumber_objects();

            let mut buffer = Vec::new();
            doc.save_to(&mut buffer)?;
            Ok::<_, PdfPartError>(buffer)
        })
        .await
        .map_err(|e| PdfPartError::other(format!("Serialize task failed: {e}")))??;

        self.write_bytes(bytes, path).await
    }

}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}
