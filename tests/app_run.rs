//! Drives the application layer the way the binary does, in quiet mode.

use std::io::Write;

use clap::Parser;
use subtree_sums::app::{run_app, run_with_writer, AppError, Cli, RunSummary};
use subtree_sums::traversal::TraversalError;

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["subtree-sums", "--quiet"];
    argv.extend_from_slice(args);
    Cli::parse_from(argv)
}

fn run(args: &[&str]) -> (Result<RunSummary, AppError>, String) {
    let mut buffer: Vec<u8> = Vec::new();
    let result = run_with_writer(&cli(args), &mut buffer);
    (result, String::from_utf8(buffer).expect("utf-8 report"))
}

fn graph_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "{}", content).expect("write graph");
    file
}

#[test]
fn default_run_cross_checks_reference_graph() {
    let (result, report) = run(&[]);
    let summary = result.expect("reference run succeeds");
    assert_eq!(summary.fcp_source_sum, Some(11));
    assert_eq!(summary.spcm_source_sum, Some(11));
    assert!(report.starts_with("Graph: built-in reference graph (11 vertices, 16 edges)"));
    assert!(report.contains("Cross-check: FCP 11 vs SPCM 11 (agree)"));
}

#[test]
fn iterative_mode_gives_the_same_report() {
    let (recursive, recursive_report) = run(&["--algorithm", "both"]);
    let (iterative, iterative_report) = run(&["--algorithm", "both", "--iterative"]);
    assert_eq!(
        recursive.expect("recursive run"),
        iterative.expect("iterative run")
    );
    assert_eq!(recursive_report, iterative_report);
}

#[test]
fn verify_reports_exact_vertices() {
    let (result, report) = run(&["--algorithm", "fcp", "--verify"]);
    let summary = result.expect("verify run succeeds");
    assert_eq!(summary.exact_vertices, Some((10, 11)));
    assert_eq!(summary.spcm_source_sum, None);
    assert!(report.contains("C: reported 9, exact 8 (differs)"));
}

#[test]
fn spcm_only_for_another_source() {
    let (result, report) = run(&["--algorithm", "spcm", "--source", "B"]);
    let summary = result.expect("spcm run succeeds");
    assert_eq!(summary.fcp_source_sum, None);
    assert_eq!(summary.spcm_source_sum, Some(9));
    assert!(report.contains("SPCM result for source vertex B is: 9"));
}

#[test]
fn weighted_file_is_loaded() {
    let file = graph_file("top(2) -> left right\nleft(3) -> bottom\nright(5) -> bottom\nbottom(7)\n");
    let path = file.path().to_str().expect("utf-8 path");
    let (result, _) = run(&[path, "--source", "top"]);
    let summary = result.expect("weighted run succeeds");
    assert_eq!(summary.fcp_source_sum, Some(17));
    assert_eq!(summary.spcm_source_sum, Some(17));
}

#[test]
fn cyclic_file_aborts_with_cycle() {
    let file = graph_file("A -> B\nB -> C\nC -> A\n");
    let path = file.path().to_str().expect("utf-8 path");
    let (result, _) = run(&[path]);
    assert!(matches!(
        result,
        Err(AppError::Traversal(TraversalError::CycleDetected { .. }))
    ));
}

#[test]
fn missing_graph_file_is_an_invalid_path() {
    let (result, report) = run(&["/no/such/file.dag"]);
    assert!(matches!(result, Err(AppError::InvalidPath(_))));
    assert!(report.is_empty());
}

#[test]
fn unknown_source_is_reported() {
    let (result, _) = run(&["--source", "Z"]);
    assert!(matches!(result, Err(AppError::Traversal(TraversalError::Graph(_)))));
}

#[test]
fn run_app_writes_output_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output = dir.path().join("report.txt");
    let output_arg = output.to_str().expect("utf-8 path");
    run_app(cli(&["--output", output_arg])).expect("run succeeds");
    let written = std::fs::read_to_string(&output).expect("report written");
    assert!(written.contains("SPCM result for source vertex A is: 11"));
    assert!(written.contains("Subtree sums (source A):"));
}
