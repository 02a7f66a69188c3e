use crate::graph::GraphError;
use thiserror::Error;

// Error type for subtree-sum traversals.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraversalError {
    /// The source name did not resolve to a vertex.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// An in-progress vertex was reached again as a child.
    #[error("Cycle detected: edge '{from}' -> '{to}' closes a cycle")]
    CycleDetected { from: String, to: String },

    /// A finished vertex had no back-pointer to follow.
    #[error("Vertex '{0}' finished without a recorded parent")]
    MissingParent(String),

    /// A sum left the representable range.
    #[error("Arithmetic overflow while summing at vertex '{0}'")]
    Overflow(String),
}
