//! Document splitting operations.
//!
//! Three policies partition the pages of one source document into
//! consecutive groups:
//! - [`SizeBoundedSplitter`] keeps each serialized part under a byte bound,
//! - [`PageCountSplitter`] cuts after a fixed number of pages,
//! - [`OutlineSplitter`] cuts at top-level bookmark boundaries.
//!
//! Every splitter upholds the same partition invariant: the produced groups
//! cover `[0, page_count)` exactly once, in order, with no gaps or
//! overlaps. A zero-page source produces zero artifacts. Groups an outline
//! split deliberately skips are reported as [`SplitNote`] records and are
//! the only permitted exception to total coverage.

pub mod assembly;
pub mod outline;
pub mod pages;
pub mod size;

pub use assembly::{PageAssembly, SerializedSizeOracle, SizeOracle};
pub use outline::{OutlineEntry, OutlineSplitter};
pub use pages::PageCountSplitter;
pub use size::SizeBoundedSplitter;

use serde::Serialize;
use std::time::Duration;

/// A contiguous, non-overlapping run of zero-based page indices
/// `[start, end)` from exactly one source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageGroup {
    /// First page index in the group (inclusive, zero-based).
    pub start: usize,
    /// One past the last page index in the group.
    pub end: usize,
}

impl PageGroup {
    /// Create a group covering `[start, end)`.
    ///
    /// # Panics
    ///
    /// Panics if `start >= end`; empty groups are never materialized.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start < end, "page group [{start}, {end}) is empty");
        Self { start, end }
    }

    /// Number of pages in the group.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the group is empty. Always false for constructed groups;
    /// kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// The serialized bytes of one page group, with a suggested filename.
///
/// Ownership transfers fully to the caller; the splitter holds no
/// reference to it after returning.
#[derive(Debug)]
pub struct OutputArtifact {
    /// Serialized PDF bytes for this group.
    pub bytes: Vec<u8>,

    /// Suggested filename, following the part-naming convention of the
    /// splitter that produced it.
    pub file_name: String,

    /// The page range this artifact covers.
    pub group: PageGroup,
}

impl OutputArtifact {
    /// Number of pages in the artifact.
    pub fn page_count(&self) -> usize {
        self.group.len()
    }

    /// Serialized size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Non-fatal condition observed during a split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SplitNote {
    /// Outline split was requested but the document has no outline.
    /// The split returns zero artifacts.
    NoOutlineAvailable,

    /// A top-level outline entry resolved to a zero-length page range and
    /// was skipped. Reported rather than silently merged so callers can
    /// detect malformed outlines.
    DegenerateRange {
        /// 1-based outline entry number.
        entry: usize,
        /// Entry title as found in the outline.
        title: String,
        /// Page index both this entry and its successor resolved to.
        page: usize,
    },
}

/// Aggregate statistics for one split operation.
#[derive(Debug, Clone, Serialize)]
pub struct SplitStatistics {
    /// Pages in the source document.
    pub source_pages: usize,

    /// Number of artifacts produced.
    pub parts: usize,

    /// Sum of all artifact sizes in bytes.
    pub total_output_size: u64,

    /// Time taken by the split, including size measurement.
    #[serde(skip)]
    pub split_time: Duration,
}

impl SplitStatistics {
    /// Format total output size as a human-readable string.
    pub fn format_total_output_size(&self) -> String {
        crate::utils::format_file_size(self.total_output_size)
    }
}

/// Result of one split operation: the artifacts, any non-fatal notes, and
/// aggregate statistics.
#[derive(Debug)]
pub struct SplitOutcome {
    /// Produced artifacts, in page order.
    pub artifacts: Vec<OutputArtifact>,

    /// Non-fatal conditions observed while splitting.
    pub notes: Vec<SplitNote>,

    /// Aggregate statistics.
    pub statistics: SplitStatistics,
}

impl SplitOutcome {
    pub(crate) fn new(
        artifacts: Vec<OutputArtifact>,
        notes: Vec<SplitNote>,
        source_pages: usize,
        split_time: Duration,
    ) -> Self {
        let total_output_size = artifacts.iter().map(OutputArtifact::size).sum();
        let statistics = SplitStatistics {
            source_pages,
            parts: artifacts.len(),
            total_output_size,
            split_time,
        };

        Self {
            artifacts,
            notes,
            statistics,
        }
    }
}
