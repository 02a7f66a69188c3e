use crate::graph::GraphError;
use thiserror::Error;

//─────────────────────────────────────────────────────────────────────────────

/// Error type for edge-list loading operations.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Error when reading a file.
    #[error("Failed to read file '{0}': {1}")]
    ReadFile(String, std::io::Error),

    /// A line does not follow `name[(weight)] [-> child ...]`.
    #[error("Line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// The file held no vertex declarations.
    #[error("No vertices declared in '{0}'")]
    NoVertices(String),

    /// The parsed declarations do not form a valid graph.
    #[error("Invalid graph: {0}")]
    Graph(#[from] GraphError),
}
