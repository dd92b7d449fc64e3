//! User-facing output.
//!
//! Formatted status messages, warnings, and summary reports, with quiet
//! and verbose modes.
//!
//! # Examples
//!
//! ```no_run
//! use pdfpart::output::OutputFormatter;
//! use pdfpart::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Splitting document");
//! formatter.success("Done");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::merge::MergeOutcome;
use crate::split::{SplitNote, SplitOutcome};

/// Render a split note as a warning line.
pub fn note_message(note: &SplitNote) -> String {
    match note {
        SplitNote::NoOutlineAvailable => {
            "document has no outline; nothing to split".to_string()
        }
        SplitNote::DegenerateRange { entry, title, page } => format!(
            "outline entry {entry} ({title:?}) at page {} covers no pages; skipped",
            page + 1
        ),
    }
}

/// Display a split summary to the user.
pub fn display_split_summary(formatter: &OutputFormatter, outcome: &SplitOutcome) {
    for note in &outcome.notes {
        formatter.warning(&note_message(note));
    }

    let stats = &outcome.statistics;
    formatter.info(&format!(
        "Split {} page(s) into {} part(s), {} total",
        stats.source_pages,
        stats.parts,
        stats.format_total_output_size()
    ));

    for artifact in &outcome.artifacts {
        formatter.detail(
            &artifact.file_name,
            &format!("{} page(s)", artifact.page_count()),
        );
    }
}

/// Display a merge summary to the user.
pub fn display_merge_summary(formatter: &OutputFormatter, outcome: &MergeOutcome) {
    for failure in &outcome.skipped {
        formatter.warning(&format!(
            "Skipped {}: {}",
            failure.path.display(),
            failure.reason
        ));
    }

    let stats = &outcome.statistics;
    formatter.info(&format!(
        "Merged {} file(s) in {:.2}s: {} pages, {}",
        stats.files_merged,
        stats.merge_time.as_secs_f64(),
        stats.total_pages,
        stats.format_input_size()
    ));
}
