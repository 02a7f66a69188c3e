// fcp module
mod fcp;
// spcm module
mod spcm;
// brute-force cross-check
mod verify;

use crate::graph::Graph;
use crate::traversal::TraversalError;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports from the crawler modules.
//─────────────────────────────────────────────────────────────────────────────
pub use fcp::{FirstCommonPredecessor, SubtreeSum, SubtreeSums};
pub use spcm::{PathCount, PathCountReport, PathCountSubtraction};
pub use verify::{verify_subtree_sums, VerifiedSum};

/// How a crawler walks the graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DfsMode {
    /// Native recursion; depth grows with the longest path from the source.
    #[default]
    Recursive,
    /// Explicit frame stack with the same visit and finish order.
    Iterative,
}

/// A strategy that computes deduplicated subtree weights from one source.
///
/// Every call works on fresh traversal state, so a crawler can be run any
/// number of times over the same graph.
pub trait SubtreeCrawler {
    type Output;

    /// Runs the strategy from the vertex named `source`.
    ///
    /// # Errors
    /// `TraversalError::Graph` when `source` is unknown, and
    /// `TraversalError::CycleDetected` when the walk meets a back edge.
    fn calculate_subtree_sums(&self, graph: &Graph, source: &str)
        -> Result<Self::Output, TraversalError>;
}
