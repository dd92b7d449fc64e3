//! Size-bounded splitting.
//!
//! Partitions pages into consecutive groups so each serialized group stays
//! within a byte bound. The format gives no cheap incremental size oracle,
//! so the splitter re-measures the accumulating assembly after every
//! appended page (see [`SizeOracle`]). The bound is advisory: a page that
//! on its own serializes larger than the bound is still emitted, as a
//! singleton group, because a page cannot be split smaller than one page.

use std::path::Path;
use std::time::Instant;

use crate::error::{PdfPartError, Result};
use crate::io::LoadedPdf;
use crate::split::{
    OutputArtifact, PageAssembly, PageGroup, SerializedSizeOracle, SizeOracle, SplitOutcome,
};
use crate::utils::part_file_name;

/// Splitter that bounds the serialized size of each part.
pub struct SizeBoundedSplitter<O: SizeOracle = SerializedSizeOracle> {
    oracle: O,
}

impl SizeBoundedSplitter {
    /// Create a splitter with the default write-then-measure oracle.
    pub fn new() -> Self {
        Self {
            oracle: SerializedSizeOracle,
        }
    }
}

impl<O: SizeOracle> SizeBoundedSplitter<O> {
    /// Create a splitter with a custom size oracle.
    pub fn with_oracle(oracle: O) -> Self {
        Self { oracle }
    }

    /// Split `source` so each part's serialized size stays at or under
    /// `max_part_kib` kibibytes.
    ///
    /// The group that first exceeds the bound is finalized including the
    /// overflowing page; the trailing group is finalized regardless of its
    /// size. Parts are numbered from 0: `<stem>_part_<N>.<ext>`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPartError::InvalidArgument`] for a zero bound, before
    /// any page is touched; serialization failures propagate as-is.
    pub fn split(&self, source: &LoadedPdf, max_part_kib: u64) -> Result<SplitOutcome> {
        if max_part_kib == 0 {
            return Err(PdfPartError::invalid_argument(
                "maximum part size must be at least 1 KiB",
            ));
        }

        let start_time = Instant::now();
        let page_count = source.page_count;
        let max_bytes = max_part_kib * 1024;

        let mut artifacts = Vec::new();
        let mut assembly = PageAssembly::new(&source.document);
        let mut group_start = 0usize;

        for page_index in 0..page_count {
            assembly.push_page(page_index);

            let size = self.oracle.measure(&assembly)?;
            if size > max_bytes {
                artifacts.push(finalize(
                    &source.path,
                    &assembly,
                    PageGroup::new(group_start, page_index + 1),
                    artifacts.len(),
                )?);

                assembly = PageAssembly::new(&source.document);
                group_start = page_index + 1;
            }
        }

        if !assembly.is_empty() {
            artifacts.push(finalize(
                &source.path,
                &assembly,
                PageGroup::new(group_start, page_count),
                artifacts.len(),
            )?);
        }

        Ok(SplitOutcome::new(
            artifacts,
            Vec::new(),
            page_count,
            start_time.elapsed(),
        ))
    }
}

impl Default for SizeBoundedSplitter {
    fn default() -> Self {
        Self::new()
    }
}

fn finalize(
    source_path: &Path,
    assembly: &PageAssembly<'_>,
    group: PageGroup,
    part_number: usize,
) -> Result<OutputArtifact> {
    let bytes = assembly.to_bytes()?;

    Ok(OutputArtifact {
        bytes,
        file_name: part_file_name(source_path, part_number),
        group,
    })
}
