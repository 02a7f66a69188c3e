use thiserror::Error;

//─────────────────────────────────────────────────────────────────────────────

/// Error type for graph construction and name lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A vertex lists a child that was never declared.
    #[error("Unresolved reference: vertex '{parent}' names unknown child '{child}'")]
    UnresolvedChild { parent: String, child: String },

    /// A lookup by name did not match any vertex.
    #[error("Unresolved reference: no vertex named '{0}'")]
    UnknownVertex(String),

    /// The same name was declared twice.
    #[error("Duplicate vertex '{0}'")]
    DuplicateVertex(String),

    /// Weights must be strictly positive.
    #[error("Invalid weight 0 for vertex '{0}'")]
    ZeroWeight(String),
}
