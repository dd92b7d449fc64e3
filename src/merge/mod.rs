//! Multi-source recombination.
//!
//! Combines the full page sequences of several documents into one, in the
//! order the sources were given. Loading is best-effort: a source that
//! cannot be read is skipped and recorded, it never aborts the merge.

pub mod merger;

pub use merger::{MergeOutcome, MergeStatistics, Merger, SourceFailure};
