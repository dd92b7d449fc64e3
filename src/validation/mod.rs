//! Input validation.
//!
//! Checks sources and output targets before an operation runs:
//! - File existence and accessibility
//! - Container parseability and encryption detection
//! - Page count extraction
//! - Output path and overwrite checks
//!
//! # Examples
//!
//! ```no_run
//! use pdfpart::validation::Validator;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = Validator::new();
//! let result = validator.validate_file(&PathBuf::from("test.pdf")).await?;
//! println!("PDF has {} pages", result.page_count);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::OverwriteMode;
use crate::error::{PdfPartError, Result};
use crate::io::{LoadedPdf, PdfReader};
use crate::utils::format_file_size;

/// Result of validating a single source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Path to the validated file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// PDF version (major, minor).
    pub version: Option<(u8, u8)>,

    /// Size of the file in bytes.
    pub file_size: u64,

    /// Number of objects in the document.
    pub object_count: usize,

    /// Whether the document carries an outline.
    pub has_outline: bool,
}

impl ValidationResult {
    fn from_loaded(loaded: &LoadedPdf) -> Self {
        let doc = &loaded.document;

        let version = doc.version.split_once('.').map(|(major, minor)| {
            (
                major.parse::<u8>().unwrap_or_default(),
                minor.parse::<u8>().unwrap_or_default(),
            )
        });

        let has_outline = doc
            .catalog()
            .ok()
            .map(|catalog| catalog.has(b"Outlines"))
            .unwrap_or(false);

        Self {
            path: loaded.path.clone(),
            page_count: loaded.page_count,
            version,
            file_size: loaded.file_size,
            object_count: doc.objects.len(),
            has_outline,
        }
    }
}

/// A source that failed validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    /// Path of the failing file.
    pub path: PathBuf,

    /// Human-readable reason for the failure.
    pub reason: String,
}

/// Summary of validation results for multiple files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    /// Individual validation results for each file.
    pub results: Vec<ValidationResult>,

    /// Files that failed validation, with their reasons. Reporting is
    /// the caller's concern.
    pub failures: Vec<ValidationFailure>,

    /// Total number of pages across all files.
    pub total_pages: usize,

    /// Total file size in bytes.
    pub total_size: u64,

    /// Number of files that passed validation.
    pub files_validated: usize,

    /// Number of files that failed validation.
    pub files_failed: usize,
}

impl ValidationSummary {
    /// Create a summary from per-file outcomes.
    pub fn from_results(results: Vec<ValidationResult>, failures: Vec<ValidationFailure>) -> Self {
        let total_pages = results.iter().map(|r| r.page_count).sum();
        let total_size = results.iter().map(|r| r.file_size).sum();
        let files_validated = results.len();
        let files_failed = failures.len();

        Self {
            results,
            failures,
            total_pages,
            total_size,
            files_validated,
            files_failed,
        }
    }

    /// Format the total file size as a human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// Validator for sources and output targets.
pub struct Validator {
    reader: PdfReader,
}

impl Validator {
    /// Create a new validator with default settings.
    pub fn new() -> Self {
        Self {
            reader: PdfReader::new(),
        }
    }

    /// Validate a single source file.
    ///
    /// # Errors
    ///
    /// Returns the corresponding load error when the file is missing,
    /// inaccessible, encrypted, or cannot be parsed.
    pub async fn validate_file(&self, path: &Path) -> Result<ValidationResult> {
        let loaded = self.reader.load(path).await?;
        Ok(ValidationResult::from_loaded(&loaded))
    }

    /// Validate multiple source files.
    ///
    /// # Arguments
    ///
    /// * `paths` - Paths to validate
    /// * `continue_on_error` - Whether to keep going after a failure
    ///
    /// # Errors
    ///
    /// Returns the first failure when `continue_on_error` is false, or
    /// [`PdfPartError::NoSourcesMerged`] when no file validated at all.
    pub async fn validate_files(
        &self,
        paths: &[PathBuf],
        continue_on_error: bool,
    ) -> Result<ValidationSummary> {
        let mut results = Vec::new();
        let mut failures = Vec::new();

        for path in paths {
            match self.validate_file(path).await {
                Ok(result) => results.push(result),
                Err(e) => {
                    if continue_on_error {
                        failures.push(ValidationFailure {
                            path: path.clone(),
                            reason: e.to_string(),
                        });
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        if results.is_empty() {
            return Err(PdfPartError::NoSourcesMerged);
        }

        Ok(ValidationSummary::from_results(results, failures))
    }

    /// Validate an output target before writing.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPartError::OutputExists`] when the target exists under
    /// [`OverwriteMode::NoClobber`], or an accessibility error when the
    /// target directory is missing or read-only.
    pub async fn validate_output(&self, target: &Path, mode: OverwriteMode) -> Result<()> {
        if target.exists() && mode == OverwriteMode::NoClobber {
            return Err(PdfPartError::output_exists(target.to_path_buf()));
        }

        if let Some(parent) = target.parent()
            && !parent.as_os_str().is_empty()
        {
            if !parent.exists() {
                return Err(PdfPartError::invalid_argument(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }

            let metadata = tokio::fs::metadata(parent).await.map_err(|e| {
                PdfPartError::FileNotAccessible {
                    path: parent.to_path_buf(),
                    source: e,
                }
            })?;

            if metadata.permissions().readonly() {
                return Err(PdfPartError::invalid_argument(format!(
                    "Output directory is not writable: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
