//! Configuration module.
//!
//! Transforms CLI arguments into a validated, normalized configuration
//! that drives the split and merge operations. It handles:
//! - Validation of argument combinations
//! - Resolution of conflicting options
//! - Application of defaults

use anyhow::{Result, bail};

use std::path::PathBuf;

/// The operation the tool has been asked to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Split one document so no part exceeds a byte-size bound.
    SplitBySize {
        /// Source document.
        input: PathBuf,
        /// Maximum part size in KiB.
        max_part_kib: u64,
    },

    /// Split one document into parts of a fixed page count.
    SplitByPages {
        /// Source document.
        input: PathBuf,
        /// Pages per part.
        pages_per_part: u32,
    },

    /// Split one document at its top-level outline boundaries.
    SplitByOutline {
        /// Source document.
        input: PathBuf,
    },

    /// Merge several documents into one.
    Merge {
        /// Source documents, in merge order.
        inputs: Vec<PathBuf>,
        /// Output document path.
        output: PathBuf,
    },

    /// Report per-file page counts.
    PageCount {
        /// Documents to inspect.
        inputs: Vec<PathBuf>,
    },
}

impl Operation {
    /// All input paths the operation reads, in order.
    pub fn inputs(&self) -> Vec<&PathBuf> {
        match self {
            Self::SplitBySize { input, .. }
            | Self::SplitByPages { input, .. }
            | Self::SplitByOutline { input } => vec![input],
            Self::Merge { inputs, .. } | Self::PageCount { inputs } => inputs.iter().collect(),
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Complete configuration for one invocation.
///
/// Contains all settings needed to perform an operation, derived and
/// validated from CLI arguments.
#[derive(Debug, Clone)]
pub struct Config {
    /// The operation to perform.
    pub operation: Operation,

    /// Directory where split artifacts are written. Defaults to the
    /// source document's directory.
    pub output_dir: Option<PathBuf>,

    /// Dry run mode: validate and report without writing output.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode: suppress non-error output.
    pub quiet: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Number of parallel load jobs (None = auto-detect).
    pub jobs: Option<usize>,

    /// Emit a machine-readable JSON summary on stdout.
    pub json: bool,
}

impl Config {
    /// Validate the configuration.
    ///
    /// Checks for logical inconsistencies and invalid combinations.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - Verbose and quiet modes are both enabled
    /// - Jobs count is zero
    /// - A merge output collides with one of its inputs
    pub fn validate(&self) -> Result<()> {
        if self.operation.inputs().is_empty() {
            bail!("No input files specified");
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            bail!("Number of jobs must be at least 1");
        }

        if let Operation::Merge { inputs, output } = &self.operation {
            for input in inputs {
                if input == output {
                    bail!(
                        "Output file cannot be the same as an input file: {}",
                        output.display()
                    );
                }
            }
        }

        match &self.operation {
            Operation::SplitBySize { max_part_kib, .. } if *max_part_kib == 0 => {
                bail!("Maximum part size must be at least 1 KiB");
            }
            Operation::SplitByPages { pages_per_part, .. } if *pages_per_part == 0 => {
                bail!("Pages per part must be at least 1");
            }
            _ => {}
        }

        Ok(())
    }

    /// Get the effective number of parallel jobs.
    ///
    /// Returns the configured job count, or the number of CPU cores if
    /// auto-detect.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Resolve the directory split artifacts are written to.
    ///
    /// Falls back to the source document's directory when no explicit
    /// output directory was given.
    pub fn resolve_output_dir(&self, source: &std::path::Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => source
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// Check if output should be displayed.
    ///
    /// Returns false if in quiet mode and not doing a dry run.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}
