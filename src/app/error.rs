use thiserror::Error;

// Custom Application Error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Graph loading error: {0}")]
    Load(#[from] crate::graph_loader::LoaderError),
    #[error("Graph construction error: {0}")]
    Graph(#[from] crate::graph::GraphError),
    #[error("Traversal error: {0}")]
    Traversal(#[from] crate::traversal::TraversalError),
    #[error("Cross-check failed for source '{source_name}': FCP {fcp} != SPCM {spcm}")]
    CrossCheck {
        source_name: String,
        fcp: i64,
        spcm: u64,
    },
    #[error("Invalid file path: {0}")]
    InvalidPath(String),
}
