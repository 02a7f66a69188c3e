//! Main application orchestrator.
//!
//! Coordinates a run:
//! 1. Initializes logging unless quiet.
//! 2. Loads the graph from a file or builds the reference graph.
//! 3. Runs FCP and/or SPCM from the chosen source.
//! 4. Optionally verifies FCP sums against brute force.
//! 5. Cross-checks the two source results when both ran.
//! 6. Writes the report to stdout or the requested output file.

use std::io::{self, Write};

use super::cli::Cli;
use super::error::AppError;
use super::file_handler;
use super::logger;
use super::processing;
use super::report;
use super::{verbose_eprintln, verbose_println};
use crate::crawler::DfsMode;

/// Source results of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub fcp_source_sum: Option<i64>,
    pub spcm_source_sum: Option<u64>,
    pub exact_vertices: Option<(usize, usize)>,
}

/// Runs the application and prints the report to stdout or `--output`.
///
/// # Errors
/// Returns `AppError` for unreadable input, invalid graphs, cycles, and a
/// failed cross-check between the two algorithms.
pub fn run_app(cli: Cli) -> Result<(), AppError> {
    let quiet_mode = cli.quiet;

    if !quiet_mode {
        if let Err(e) = logger::init_global_logger(&cli.log_file) {
            // Keep going without the verbose log.
            eprintln!(
                "Warning: Failed to initialize verbose logger ({}): {}. Verbose file logging will be unavailable.",
                cli.log_file.display(),
                e
            );
        } else {
            verbose_println!(
                quiet_mode,
                "Verbose logging initialized to {}",
                cli.log_file.display()
            );
        }
    }

    let mut buffer: Vec<u8> = Vec::new();
    let outcome = run_with_writer(&cli, &mut buffer);

    // Whatever was rendered before a failure is still worth showing.
    let emitted = match &cli.output {
        Some(path) => {
            let content = String::from_utf8_lossy(&buffer);
            file_handler::write_content_to_file(path, &content).map(|_| {
                verbose_println!(quiet_mode, "\n[INFO] Report written to {}", path.display());
            })
        }
        None => io::stdout().write_all(&buffer),
    };

    if !quiet_mode {
        if let Err(e) = logger::flush_global_logger() {
            eprintln!("[WARNING] Failed to perform final flush of the log: {}", e);
        }
    }

    outcome?;
    emitted?;
    Ok(())
}

/// Executes the configured run, rendering the report into `writer`.
pub fn run_with_writer(cli: &Cli, writer: &mut dyn Write) -> Result<RunSummary, AppError> {
    let quiet_mode = cli.quiet;
    let mode = if cli.iterative {
        DfsMode::Iterative
    } else {
        DfsMode::Recursive
    };

    let (graph, origin) = processing::load_graph(cli.graph_file.as_deref(), quiet_mode)?;
    report::write_graph_summary(writer, &graph, &origin)?;

    let mut summary = RunSummary {
        fcp_source_sum: None,
        spcm_source_sum: None,
        exact_vertices: None,
    };

    if cli.algorithm.runs_fcp() {
        let sums = processing::run_fcp(&graph, &cli.source, mode, quiet_mode)?;
        report::write_subtree_sums(writer, &sums)?;
        summary.fcp_source_sum = Some(sums.source_sum());

        if cli.verify {
            let rows = processing::verify_fcp(&graph, &sums, quiet_mode);
            report::write_verification(writer, &rows)?;
            let exact = rows.iter().filter(|row| row.matches()).count();
            summary.exact_vertices = Some((exact, rows.len()));
        }
    }

    if cli.algorithm.runs_spcm() {
        let path_counts = processing::run_spcm(&graph, &cli.source, mode, quiet_mode)?;
        report::write_path_counts(writer, &path_counts)?;
        summary.spcm_source_sum = Some(path_counts.corrected_sum);
    }

    if let (Some(fcp), Some(spcm)) = (summary.fcp_source_sum, summary.spcm_source_sum) {
        report::write_cross_check(writer, fcp, spcm)?;
        if i64::try_from(spcm).map_or(true, |spcm| spcm != fcp) {
            verbose_eprintln!(
                quiet_mode,
                "Cross-check failed for '{}': FCP {} vs SPCM {}",
                cli.source,
                fcp,
                spcm
            );
            return Err(AppError::CrossCheck {
                source_name: cli.source.clone(),
                fcp,
                spcm,
            });
        }
        verbose_println!(quiet_mode, "\n[INFO] FCP and SPCM agree on {}.", fcp);
    }

    Ok(summary)
}
