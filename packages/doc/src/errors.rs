//! Error types for document editing

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocError {
    #[error("Node not found: {0}")]
    NodeNotFound(usize),

    #[error("Offset {offset} out of range for node {node} (length {len})")]
    OffsetOutOfRange {
        node: usize,
        offset: usize,
        len: usize,
    },

    #[error("Malformed document JSON: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for DocError {
    fn from(e: serde_json::Error) -> Self {
        DocError::Malformed(e.to_string())
    }
}
