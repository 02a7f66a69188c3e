//! Renders crawler results as plain text.
//!
//! Every writer takes `&mut dyn Write` so the orchestrator can target stdout,
//! an output file, or an in-memory buffer in tests.

use std::io::{self, Write};

use crate::crawler::{PathCountReport, SubtreeSums, VerifiedSum};
use crate::graph::Graph;

pub fn write_graph_summary(writer: &mut dyn Write, graph: &Graph, origin: &str) -> io::Result<()> {
    writeln!(
        writer,
        "Graph: {} ({} vertices, {} edges)",
        origin,
        graph.len(),
        graph.edge_count()
    )
}

/// Prints the FCP block, one vertex per line in declaration order.
pub fn write_subtree_sums(writer: &mut dyn Write, sums: &SubtreeSums) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "    >>> FCP <<<")?;
    writeln!(writer, "Subtree sums (source {}):", sums.source())?;
    for entry in sums.entries() {
        if entry.reached {
            writeln!(writer, "{}: {}", entry.name, entry.sum)?;
        } else {
            writeln!(writer, "{}: - (not reachable)", entry.name)?;
        }
    }
    Ok(())
}

/// Prints the SPCM block: path counts, then the duplicated and corrected sums.
pub fn write_path_counts(writer: &mut dyn Write, report: &PathCountReport) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "    >>> SPCM <<<")?;
    for row in &report.path_counts {
        writeln!(
            writer,
            "Paths from source to {} count: {}",
            row.name, row.paths
        )?;
    }
    writeln!(writer, "Duplicated sum: {}", report.duplicated_sum)?;
    writeln!(
        writer,
        "SPCM result for source vertex {} is: {}",
        report.source, report.corrected_sum
    )
}

/// Prints one line per checked vertex and a closing tally.
pub fn write_verification(writer: &mut dyn Write, rows: &[VerifiedSum]) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "Verification against reachable sets:")?;
    for row in rows {
        let status = if row.matches() { "ok" } else { "differs" };
        writeln!(
            writer,
            "{}: reported {}, exact {} ({})",
            row.name, row.reported, row.exact, status
        )?;
    }
    let exact = rows.iter().filter(|row| row.matches()).count();
    writeln!(writer, "{} of {} vertices exact", exact, rows.len())
}

pub fn write_cross_check(writer: &mut dyn Write, fcp: i64, spcm: u64) -> io::Result<()> {
    let status = if i64::try_from(spcm).map_or(false, |spcm| spcm == fcp) {
        "agree"
    } else {
        "DISAGREE"
    };
    writeln!(writer)?;
    writeln!(writer, "Cross-check: FCP {} vs SPCM {} ({})", fcp, spcm, status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::{FirstCommonPredecessor, PathCountSubtraction, SubtreeCrawler};
    use crate::graph_loader::reference_graph;

    fn render(f: impl FnOnce(&mut dyn Write) -> io::Result<()>) -> String {
        let mut buffer: Vec<u8> = Vec::new();
        f(&mut buffer).expect("in-memory write");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[test]
    fn fcp_block_lists_vertices_in_order() {
        let graph = reference_graph().expect("reference graph builds");
        let sums = FirstCommonPredecessor::default()
            .calculate_subtree_sums(&graph, "A")
            .expect("acyclic");
        let text = render(|w| write_subtree_sums(w, &sums));
        assert!(text.contains("Subtree sums (source A):\nA: 11\nB: 9\n"));
        assert!(text.trim_end().ends_with("K: 1"));
    }

    #[test]
    fn spcm_block_ends_with_result_line() {
        let graph = reference_graph().expect("reference graph builds");
        let report = PathCountSubtraction::default()
            .calculate_subtree_sums(&graph, "A")
            .expect("acyclic");
        let text = render(|w| write_path_counts(w, &report));
        assert!(text.contains("Paths from source to K count: 8"));
        assert!(text.trim_end().ends_with("SPCM result for source vertex A is: 11"));
    }

    #[test]
    fn cross_check_flags_disagreement() {
        assert!(render(|w| write_cross_check(w, 11, 11)).contains("(agree)"));
        assert!(render(|w| write_cross_check(w, 10, 11)).contains("(DISAGREE)"));
    }

    #[test]
    fn graph_summary_counts_edges() {
        let graph = reference_graph().expect("reference graph builds");
        let text = render(|w| write_graph_summary(w, &graph, "reference"));
        assert_eq!(text, "Graph: reference (11 vertices, 16 edges)\n");
    }
}
