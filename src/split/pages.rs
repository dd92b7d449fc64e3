//! Fixed page-count splitting.

use std::time::Instant;

use crate::error::{PdfPartError, Result};
use crate::io::LoadedPdf;
use crate::split::{OutputArtifact, PageAssembly, PageGroup, SplitOutcome};
use crate::utils::part_file_name;

/// Splitter that cuts after a fixed number of pages.
pub struct PageCountSplitter;

impl PageCountSplitter {
    /// Create a new page-count splitter.
    pub fn new() -> Self {
        Self
    }

    /// Split `source` into consecutive groups of `pages_per_part` pages.
    ///
    /// The final group holds the remainder when the page count does not
    /// divide evenly. Parts are numbered from 1, contiguously:
    /// `<stem>_part_<N>.<ext>` with `N = 1 + start / pages_per_part`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPartError::InvalidArgument`] when `pages_per_part` is
    /// zero, before any page is touched.
    pub fn split(&self, source: &LoadedPdf, pages_per_part: u32) -> Result<SplitOutcome> {
        if pages_per_part == 0 {
            return Err(PdfPartError::invalid_argument(
                "pages per part must be at least 1",
            ));
        }

        let start_time = Instant::now();
        let page_count = source.page_count;
        let pages_per_part = pages_per_part as usize;

        let mut artifacts = Vec::new();

        for group_start in (0..page_count).step_by(pages_per_part) {
            let group_end = (group_start + pages_per_part).min(page_count);
            let group = PageGroup::new(group_start, group_end);

            let assembly = PageAssembly::from_group(&source.document, group);
            let bytes = assembly.to_bytes()?;

            let part_number = 1 + group_start / pages_per_part;
            artifacts.push(OutputArtifact {
                bytes,
                file_name: part_file_name(&source.path, part_number),
                group,
            });
        }

        Ok(SplitOutcome::new(
            artifacts,
            Vec::new(),
            page_count,
            start_time.elapsed(),
        ))
    }
}

impl Default for PageCountSplitter {
    fn default() -> Self {
        Self::new()
    }
}
