pub mod error;
mod loader;

pub use error::LoaderError;
pub use loader::{
    load_graph_from_file, parse_edge_list, reference_graph, REFERENCE_EDGES,
};
