// error module
mod error;
// tri-color state module
mod state;

pub use error::TraversalError;
pub use state::{Color, RunTables, TraversalState};
