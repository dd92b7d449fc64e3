//! I/O operations for pdfpart.
//!
//! This module handles all file I/O:
//! - Loading PDF documents from disk (sequential or order-preserving
//!   parallel batches)
//! - Writing split artifacts and merge results atomically

pub mod reader;
pub mod writer;

pub use reader::{LoadResult, LoadStatistics, LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteStatistics};
