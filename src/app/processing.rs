//! The individual steps of a run: loading the graph and driving each crawler.
//!
//! Each step logs its progress through the verbose macros and returns plain
//! results; rendering is left to `report`.

use std::path::Path;

use super::error::AppError;
use super::file_handler;
use super::{verbose_eprintln, verbose_println};
use crate::crawler::{
    verify_subtree_sums, DfsMode, FirstCommonPredecessor, PathCountReport, PathCountSubtraction,
    SubtreeCrawler, SubtreeSums, VerifiedSum,
};
use crate::graph::Graph;
use crate::graph_loader;

/// Loads the graph from `graph_file`, or builds the reference graph.
///
/// Returns the graph and a label describing where it came from.
pub fn load_graph(graph_file: Option<&Path>, quiet_mode: bool) -> Result<(Graph, String), AppError> {
    verbose_println!(quiet_mode, "\n[STEP 1] Loading graph...");
    let (graph, origin) = match graph_file {
        Some(path) => {
            let path_str = file_handler::validate_graph_file(path, quiet_mode)?;
            let graph = graph_loader::load_graph_from_file(&path_str).map_err(|e| {
                verbose_eprintln!(quiet_mode, "   Failed to load {}: {}", path_str, e);
                AppError::Load(e)
            })?;
            (graph, path_str)
        }
        None => (graph_loader::reference_graph()?, "built-in reference graph".to_string()),
    };
    verbose_println!(
        quiet_mode,
        "   => {} vertices, {} edges from {}.",
        graph.len(),
        graph.edge_count(),
        origin
    );
    Ok((graph, origin))
}

/// Runs FCP from `source` and logs the visit order.
pub fn run_fcp(
    graph: &Graph,
    source: &str,
    mode: DfsMode,
    quiet_mode: bool,
) -> Result<SubtreeSums, AppError> {
    verbose_println!(quiet_mode, "\n[STEP 2] FCP from '{}' ({:?})...", source, mode);
    let sums = FirstCommonPredecessor::new(mode)
        .calculate_subtree_sums(graph, source)
        .map_err(|e| {
            verbose_eprintln!(quiet_mode, "   FCP aborted: {}", e);
            AppError::Traversal(e)
        })?;
    verbose_println!(quiet_mode, "   Visit order: {}", sums.visit_order().join(" "));
    verbose_println!(quiet_mode, "   => Source sum: {}", sums.source_sum());
    Ok(sums)
}

/// Runs SPCM from `source` and logs the per-vertex duplicated sums.
pub fn run_spcm(
    graph: &Graph,
    source: &str,
    mode: DfsMode,
    quiet_mode: bool,
) -> Result<PathCountReport, AppError> {
    verbose_println!(quiet_mode, "\n[STEP 3] SPCM from '{}' ({:?})...", source, mode);
    let report = PathCountSubtraction::new(mode)
        .calculate_subtree_sums(graph, source)
        .map_err(|e| {
            verbose_eprintln!(quiet_mode, "   SPCM aborted: {}", e);
            AppError::Traversal(e)
        })?;
    for row in report.path_counts.iter().filter(|row| row.paths > 0) {
        verbose_println!(
            quiet_mode,
            "   Duplicated sum of {} is {} ({} path(s))",
            row.name,
            row.duplicated_sum,
            row.paths
        );
    }
    verbose_println!(
        quiet_mode,
        "   => Duplicated {}, corrected {}.",
        report.duplicated_sum,
        report.corrected_sum
    );
    Ok(report)
}

/// Checks FCP sums against brute force and logs each mismatch.
pub fn verify_fcp(graph: &Graph, sums: &SubtreeSums, quiet_mode: bool) -> Vec<VerifiedSum> {
    verbose_println!(quiet_mode, "\n[STEP 4] Verifying FCP sums...");
    let rows = verify_subtree_sums(graph, sums);
    for row in rows.iter().filter(|row| !row.matches()) {
        verbose_println!(
            quiet_mode,
            "   {} reports {} but reaches weight {}; its shared descendants were charged to an ancestor.",
            row.name,
            row.reported,
            row.exact
        );
    }
    rows
}
