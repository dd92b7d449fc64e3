//! pdfpart - Split and merge paginated PDF documents.
//!
//! This library cuts a PDF into parts and recombines several PDFs into
//! one. It supports:
//!
//! - Size-bounded splitting (no part exceeds a KiB bound)
//! - Fixed page-count splitting
//! - Splitting at top-level bookmark boundaries
//! - Best-effort merging of multiple documents
//! - Page-count queries and input validation
//! - Parallel loading and comprehensive error handling
//!
//! # Examples
//!
//! ## Splitting by page count
//!
//! ```no_run
//! use pdfpart::io::{PdfReader, PdfWriter};
//! use pdfpart::split::PageCountSplitter;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let source = reader.load(Path::new("report.pdf")).await?;
//!
//! let outcome = PageCountSplitter::new().split(&source, 10)?;
//!
//! let writer = PdfWriter::new();
//! for artifact in outcome.artifacts {
//!     writer
//!         .write_bytes(artifact.bytes, Path::new(&artifact.file_name))
//!         .await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Merging
//!
//! ```no_run
//! use pdfpart::merge::Merger;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let merger = Merger::new();
//! let inputs = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let outcome = merger.merge(&inputs, 4).await?;
//! println!("Created {} page document", outcome.statistics.total_pages);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod split;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{PdfPartError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
