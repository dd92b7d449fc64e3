//! CLI argument parsing.
//!
//! Defines the command-line interface structure using `clap`: one
//! subcommand per operation, with shared output and verbosity flags.
//!
//! # Examples
//!
//! ```no_run
//! use pdfpart::cli::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! let config = cli.to_config().expect("invalid arguments");
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, Operation, OverwriteMode};
use crate::error::{PdfPartError, Result};
use crate::utils::collect_paths_for_patterns;

/// Split and merge paginated PDF documents.
///
/// pdfpart cuts a single PDF into parts by size bound, fixed page count,
/// or top-level bookmarks, and recombines multiple PDFs into one.
#[derive(Parser, Debug)]
#[command(name = "pdfpart")]
#[command(version)]
#[command(about = "Split and merge PDF documents", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// The operation to perform.
    #[command(subcommand)]
    pub command: Command,

    /// Directory for split output files
    ///
    /// Defaults to the directory of the source document.
    #[arg(short = 'd', long, value_name = "DIR", global = true)]
    pub output_dir: Option<PathBuf>,

    /// Dry run - validate inputs and preview without writing output
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Verbose output - show detailed information about each file
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    ///
    /// Only errors and warnings will be printed.
    /// Useful for scripts and automation.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force overwrite of existing output files without confirmation
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Never overwrite existing output files
    ///
    /// If an output file already exists, exit with an error
    /// instead of prompting or overwriting.
    #[arg(long, global = true, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Number of parallel jobs for loading PDFs
    ///
    /// Default is the number of CPU cores. Use 1 for sequential loading.
    #[arg(short, long, global = true, value_name = "N")]
    pub jobs: Option<usize>,

    /// Emit a machine-readable JSON summary on stdout
    #[arg(long, global = true)]
    pub json: bool,
}

/// The available operations.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split a PDF so no part exceeds a size bound
    ///
    /// Parts are cut greedily: pages accumulate until the serialized part
    /// would exceed the bound, then a new part starts. Output files are
    /// named <stem>_part_<N>.pdf.
    SplitSize {
        /// Source PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Maximum part size in KiB
        #[arg(short = 's', long, value_name = "KIB")]
        max_size: u64,
    },

    /// Split a PDF into parts with a fixed page count
    ///
    /// Every part holds exactly the given number of pages except possibly
    /// the last. Output files are named <stem>_part_<N>.pdf.
    SplitPages {
        /// Source PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Pages per part
        #[arg(short = 'p', long, value_name = "N")]
        pages_per_part: u32,
    },

    /// Split a PDF at its top-level bookmark boundaries
    ///
    /// Each top-level outline entry starts a part that runs to the next
    /// entry's page. Output files are named
    /// <stem>_part_<N>_<title>.pdf.
    SplitOutline {
        /// Source PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Merge multiple PDFs into a single document
    ///
    /// Files are merged in the order provided. Glob patterns are
    /// expanded. Sources that fail to load are skipped with a warning.
    ///
    /// Examples:
    ///   pdfpart merge a.pdf b.pdf -o combined.pdf
    ///   pdfpart merge 'chapter*.pdf' -o book.pdf
    Merge {
        /// Input PDF files to merge (in order)
        #[arg(required = true, value_name = "FILE")]
        inputs: Vec<String>,

        /// Output PDF file path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Report the page count of each given PDF
    Pages {
        /// PDF files to inspect
        #[arg(required = true, value_name = "FILE")]
        inputs: Vec<String>,
    },
}

impl Cli {
    /// Convert CLI arguments into a validated [`Config`].
    ///
    /// Expands glob patterns in multi-input commands and resolves the
    /// overwrite mode from the `--force`/`--no-clobber` flags.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPartError::InvalidArgument`] when a glob pattern is
    /// malformed or the resulting configuration is inconsistent.
    pub fn to_config(&self) -> Result<Config> {
        let operation = match &self.command {
            Command::SplitSize { input, max_size } => Operation::SplitBySize {
                input: input.clone(),
                max_part_kib: *max_size,
            },
            Command::SplitPages {
                input,
                pages_per_part,
            } => Operation::SplitByPages {
                input: input.clone(),
                pages_per_part: *pages_per_part,
            },
            Command::SplitOutline { input } => Operation::SplitByOutline {
                input: input.clone(),
            },
            Command::Merge { inputs, output } => Operation::Merge {
                inputs: collect_paths_for_patterns(inputs)?,
                output: output.clone(),
            },
            Command::Pages { inputs } => Operation::PageCount {
                inputs: collect_paths_for_patterns(inputs)?,
            },
        };

        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let config = Config {
            operation,
            output_dir: self.output_dir.clone(),
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
            overwrite_mode,
            jobs: self.jobs,
            json: self.json,
        };

        config
            .validate()
            .map_err(|e| PdfPartError::invalid_argument(e.to_string()))?;

        Ok(config)
    }
}
