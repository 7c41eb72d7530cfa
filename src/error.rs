use thiserror::Error;

/// All possible errors when building or loading a graph
///
/// A cycle is not an error: sort and validity queries report it as a normal
/// outcome.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(String),

    #[error("Dataset error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GraphError>;
