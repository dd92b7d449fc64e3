//! Shared helpers: filename sanitizing, part-file naming, glob expansion
//! and size formatting.

use std::path::{Path, PathBuf};

use crate::error::{PdfPartError, Result};

/// Characters that are unsafe in filenames on at least one platform.
const ILLEGAL_FILENAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Replace filesystem-unsafe characters with underscores.
///
/// Total (never fails) and idempotent: sanitizing an already sanitized
/// string changes nothing.
///
/// # Examples
///
/// ```
/// use pdfpart::utils::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Chapter 1: Intro"), "Chapter 1_ Intro");
/// assert_eq!(sanitize_filename("a/b\\c"), "a_b_c");
/// ```
pub fn sanitize_filename(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if ILLEGAL_FILENAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Filename stem of a source path, without its extension.
///
/// Falls back to "output" for paths with no usable filename.
pub fn source_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Extension of a source path, defaulting to "pdf".
pub fn source_extension(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or("pdf")
        .to_string()
}

/// Filename for one part of a split: `<stem>_part_<N>.<ext>`.
///
/// The size-bounded splitter numbers parts from 0, the page-count splitter
/// from 1; the caller supplies the number under its own convention.
pub fn part_file_name(source: &Path, part_number: usize) -> String {
    format!(
        "{}_part_{}.{}",
        source_stem(source),
        part_number,
        source_extension(source)
    )
}

/// Filename for one outline part: `<stem>_part_<N>_<sanitizedTitle>.<ext>`.
pub fn outline_part_file_name(source: &Path, part_number: usize, title: &str) -> String {
    format!(
        "{}_part_{}_{}.{}",
        source_stem(source),
        part_number,
        sanitize_filename(title),
        source_extension(source)
    )
}

/// Expand multiple glob patterns into filesystem paths.
///
/// Accepts anything iterable with items that convert to `&str`, e.g.:
/// `&[&str]`, `Vec<String>`, or `Vec<&str>`.
///
/// Returns a flattened list of resolved paths. A pattern that contains no
/// glob metacharacters is passed through verbatim even when the file does
/// not exist, so missing inputs surface as load errors with their path
/// rather than silently disappearing during expansion.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns.into_iter() {
        let paths = collect_paths_for_pattern(pattern)?;
        resolved_paths.extend(paths);
    }

    Ok(resolved_paths)
}

/// Expand a single glob pattern into filesystem paths.
fn collect_paths_for_pattern<P: AsRef<str>>(pattern: P) -> Result<Vec<PathBuf>> {
    let pattern = pattern.as_ref();

    if !pattern.contains(['*', '?', '[']) {
        return Ok(vec![PathBuf::from(pattern)]);
    }

    let mut resolved_paths = Vec::new();

    let paths = glob::glob(pattern).map_err(|err| PdfPartError::Other {
        message: err.to_string(),
    })?;

    for entry in paths {
        let path = entry.map_err(|err| PdfPartError::Other {
            message: err.to_string(),
        })?;
        resolved_paths.push(path);
    }

    Ok(resolved_paths)
}

/// Format a byte count as a human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
