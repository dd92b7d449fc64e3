//! pdfpart - Split and merge PDF documents.

use clap::Parser;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process;

use pdfpart::cli::Cli;
use pdfpart::config::{Config, Operation, OverwriteMode};
use pdfpart::error::PdfPartError;
use pdfpart::io::{PdfReader, PdfWriter};
use pdfpart::merge::Merger;
use pdfpart::output::{OutputFormatter, display_merge_summary, display_split_summary, note_message};
use pdfpart::split::{
    OutlineSplitter, PageCountSplitter, SizeBoundedSplitter, SplitOutcome,
};
use pdfpart::utils::format_file_size;
use pdfpart::validation::Validator;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfPartError> {
    let config = cli.to_config()?;

    let formatter = OutputFormatter::from_config(&config);

    if formatter.should_print() && !config.json {
        formatter.section(&format!("{} v{}", pdfpart::NAME, pdfpart::VERSION));
        formatter.blank_line();
    }

    match config.operation.clone() {
        Operation::SplitBySize {
            input,
            max_part_kib,
        } => run_split(&config, &formatter, &input, SplitKind::Size(max_part_kib)).await,
        Operation::SplitByPages {
            input,
            pages_per_part,
        } => {
            run_split(&config, &formatter, &input, SplitKind::Pages(pages_per_part)).await
        }
        Operation::SplitByOutline { input } => {
            run_split(&config, &formatter, &input, SplitKind::Outline).await
        }
        Operation::Merge { inputs, output } => {
            run_merge(&config, &formatter, &inputs, &output).await
        }
        Operation::PageCount { inputs } => run_pages(&config, &formatter, &inputs).await,
    }
}

/// Which split strategy to apply.
enum SplitKind {
    Size(u64),
    Pages(u32),
    Outline,
}

/// Run one of the split operations end to end.
async fn run_split(
    config: &Config,
    formatter: &OutputFormatter,
    input: &Path,
    kind: SplitKind,
) -> Result<(), PdfPartError> {
    // A zero-page source is a valid split input that yields zero parts.
    let reader = PdfReader::allowing_empty();
    let source = reader.load(input).await?;

    if !config.json {
        formatter.info(&format!(
            "Loaded {}: {} page(s), {}",
            input.display(),
            source.page_count,
            format_file_size(source.file_size)
        ));
    }

    let outcome = match kind {
        SplitKind::Size(max_part_kib) => SizeBoundedSplitter::new().split(&source, max_part_kib)?,
        SplitKind::Pages(pages_per_part) => {
            PageCountSplitter::new().split(&source, pages_per_part)?
        }
        SplitKind::Outline => OutlineSplitter::new().split(&source)?,
    };

    let out_dir = config.resolve_output_dir(input);

    if config.dry_run {
        for note in &outcome.notes {
            formatter.warning(&note_message(note));
        }

        formatter.success("Dry run completed successfully");
        for (index, artifact) in outcome.artifacts.iter().enumerate() {
            formatter.list_item(
                index + 1,
                &format!(
                    "Would write: {} ({} page(s), {})",
                    out_dir.join(&artifact.file_name).display(),
                    artifact.page_count(),
                    format_file_size(artifact.size())
                ),
            );
        }

        if config.json {
            print_split_json(&outcome, &out_dir, true)?;
        }
        return Ok(());
    }

    let validator = Validator::new();
    let writer = PdfWriter::new();

    // Check every target before the first write so a late collision
    // cannot leave a half-finished set behind.
    for artifact in &outcome.artifacts {
        let target = out_dir.join(&artifact.file_name);
        validator
            .validate_output(&target, config.overwrite_mode)
            .await?;
        if target.exists() {
            confirm_overwrite(&target, config.overwrite_mode, formatter)?;
        }
    }

    for artifact in &outcome.artifacts {
        let target = out_dir.join(&artifact.file_name);
        writer.write_bytes(artifact.bytes.clone(), &target).await?;
    }

    if config.json {
        print_split_json(&outcome, &out_dir, false)?;
    } else {
        display_split_summary(formatter, &outcome);
        formatter.success(&format!(
            "Created {} part(s) in {}",
            outcome.artifacts.len(),
            out_dir.display()
        ));
    }

    Ok(())
}

/// Run the merge operation end to end.
async fn run_merge(
    config: &Config,
    formatter: &OutputFormatter,
    inputs: &[PathBuf],
    output: &Path,
) -> Result<(), PdfPartError> {
    let validator = Validator::new();
    validator
        .validate_output(output, config.overwrite_mode)
        .await?;

    if config.dry_run {
        let summary = validator.validate_files(inputs, true).await?;
        for failure in &summary.failures {
            formatter.warning(&format!(
                "Skipping {}: {}",
                failure.path.display(),
                failure.reason
            ));
        }
        formatter.info(&format!(
            "Validated {} file(s): {} pages, {}",
            summary.files_validated,
            summary.total_pages,
            summary.format_total_size()
        ));

        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        formatter.info(&format!("  Output would be: {}", output.display()));
        formatter.info("  Run without --dry-run to create the merged PDF");
        return Ok(());
    }

    if output.exists() {
        confirm_overwrite(output, config.overwrite_mode, formatter)?;
    }

    let merger = Merger::new();
    let outcome = merger.merge(inputs, config.effective_jobs()).await?;

    let writer = PdfWriter::new();
    let write_stats = writer.save_document(&outcome.document, output).await?;

    if config.json {
        let summary = json!({
            "operation": "merge",
            "output": output,
            "outputSize": write_stats.file_size,
            "mergedFiles": outcome.merged_files,
            "skipped": outcome.skipped,
            "statistics": outcome.statistics,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    display_merge_summary(formatter, &outcome);
    formatter.success(&format!(
        "Successfully created {} ({})",
        output.display(),
        write_stats.format_file_size()
    ));

    if formatter.is_verbose() {
        formatter.blank_line();
        formatter.section("Statistics");
        formatter.detail("Input files", &outcome.statistics.files_merged.to_string());
        formatter.detail("Total pages", &outcome.statistics.total_pages.to_string());
        formatter.detail("Input size", &outcome.statistics.format_input_size());
        formatter.detail("Output size", &write_stats.format_file_size());
        formatter.detail(
            "Load time",
            &format!("{:.2}s", outcome.statistics.load_time.as_secs_f64()),
        );
        formatter.detail(
            "Merge time",
            &format!("{:.2}s", outcome.statistics.merge_time.as_secs_f64()),
        );
        formatter.detail(
            "Write time",
            &format!("{:.2}s", write_stats.write_time.as_secs_f64()),
        );
    }

    Ok(())
}

/// Report the page count of each input.
async fn run_pages(
    config: &Config,
    formatter: &OutputFormatter,
    inputs: &[PathBuf],
) -> Result<(), PdfPartError> {
    let reader = PdfReader::new();

    let mut counts: Vec<(PathBuf, usize)> = Vec::new();
    let mut failures: Vec<(PathBuf, String)> = Vec::new();

    for path in inputs {
        match reader.page_count(path).await {
            Ok(count) => counts.push((path.clone(), count)),
            Err(e) => failures.push((path.clone(), e.to_string())),
        }
    }

    if config.json {
        let summary = json!({
            "operation": "pages",
            "files": counts
                .iter()
                .map(|(path, count)| json!({ "path": path, "pageCount": count }))
                .collect::<Vec<_>>(),
            "failures": failures
                .iter()
                .map(|(path, reason)| json!({ "path": path, "reason": reason }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        // The counts are the command's output; they print even in quiet
        // mode.
        for (path, count) in &counts {
            println!("{}: {} page(s)", path.display(), count);
        }
        for (path, reason) in &failures {
            formatter.error(&format!("{}: {}", path.display(), reason));
        }
        if counts.len() > 1 {
            let total: usize = counts.iter().map(|(_, c)| c).sum();
            formatter.info(&format!("Total: {total} page(s)"));
        }
    }

    if counts.is_empty() && !failures.is_empty() {
        return Err(PdfPartError::NoSourcesMerged);
    }

    Ok(())
}

/// Ask before overwriting an existing output file.
fn confirm_overwrite(
    target: &Path,
    mode: OverwriteMode,
    formatter: &OutputFormatter,
) -> Result<(), PdfPartError> {
    match mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(PdfPartError::output_exists(target.to_path_buf())),
        OverwriteMode::Prompt => {
            // In quiet mode there is nobody to ask; treat as no-clobber.
            if formatter.is_quiet() {
                return Err(PdfPartError::output_exists(target.to_path_buf()));
            }

            formatter.warning(&format!("Output file already exists: {}", target.display()));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| PdfPartError::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(PdfPartError::Cancelled)
            }
        }
    }
}

/// Print a machine-readable summary of a split operation.
fn print_split_json(
    outcome: &SplitOutcome,
    out_dir: &Path,
    dry_run: bool,
) -> Result<(), PdfPartError> {
    let summary = json!({
        "operation": "split",
        "dryRun": dry_run,
        "outputDir": out_dir,
        "parts": outcome
            .artifacts
            .iter()
            .map(|artifact| json!({
                "fileName": artifact.file_name,
                "pageCount": artifact.page_count(),
                "size": artifact.size(),
            }))
            .collect::<Vec<_>>(),
        "notes": outcome.notes,
        "statistics": outcome.statistics,
    });

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
