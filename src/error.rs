//! Error types for pdfpart.
//!
//! Every failure carries the offending path or parameter so callers can act
//! on it. Two conditions that look like errors are deliberately not errors:
//! a document without an outline and an outline entry with an empty page
//! range are reported as [`crate::split::SplitNote`] records on the split
//! outcome instead.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfpart operations.
pub type Result<T> = std::result::Result<T, PdfPartError>;

/// Main error type for pdfpart operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfPartError {
    /// Input file was not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input file is not accessible (permission denied, etc.).
    #[error("Cannot access file: {path}\n  Reason: {source}")]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Path exists but is not a regular file.
    #[error("Not a file: {path}")]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Source container cannot be opened or parsed as a PDF.
    #[error("Cannot read PDF container: {path}\n  Reason: {reason}")]
    UnreadableContainer {
        /// Path to the unreadable container.
        path: PathBuf,
        /// Details from the codec.
        reason: String,
    },

    /// PDF is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {path}\n  \
         Hint: decrypt the PDF first using 'qpdf --decrypt' or similar tools"
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// A policy parameter violates its precondition.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the violated precondition.
        message: String,
    },

    /// The outline exists but cannot be traversed or resolved.
    #[error("Cannot read outline of: {path}\n  Reason: {reason}")]
    OutlineUnreadable {
        /// Path to the PDF whose outline failed to resolve.
        path: PathBuf,
        /// Details about the failure.
        reason: String,
    },

    /// No merge source could be loaded.
    #[error("No sources could be merged")]
    NoSourcesMerged,

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {path}\n  \
         Use --force to overwrite or choose a different output path"
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create an output file.
    #[error("Failed to create output file: {path}\n  Reason: {source}")]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Output serialization failed (disk full, permissions, ...).
    /// Any partially written artifact has been removed before this
    /// error propagates.
    #[error("Failed to write output: {path}\n  Reason: {source}")]
    WriteFailure {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfPartError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<serde_json::Error> for PdfPartError {
    fn from(err: serde_json::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for PdfPartError {
    fn from(err: anyhow::Error) -> Self {
        Self::InvalidArgument {
            message: err.to_string(),
        }
    }
}

impl PdfPartError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create an UnreadableContainer error.
    pub fn unreadable_container(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::UnreadableContainer {
            path,
            reason: reason.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an InvalidArgument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an OutlineUnreadable error.
    pub fn outline_unreadable(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::OutlineUnreadable {
            path,
            reason: reason.into(),
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable for batch operations.
    ///
    /// Merge skips a source on a recoverable load error and records it;
    /// the single-source operations treat every error as fatal.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::FileNotAccessible { .. }
                | Self::NotAFile { .. }
                | Self::UnreadableContainer { .. }
                | Self::EncryptedPdf { .. }
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::UnreadableContainer { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::InvalidArgument { .. } => 1,
            Self::OutlineUnreadable { .. } => 3,
            Self::NoSourcesMerged => 1,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::WriteFailure { .. } => 5,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
