use thiserror::Error;

use crate::node::NodeKind;
use crate::tree::NodeId;

pub type Result<T, E = TreeError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Structural mismatch: {0}")]
    StructuralMismatch(String),
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),
    #[error("Node {id} is a {found}, expected a {expected}")]
    UnexpectedKind {
        id: NodeId,
        expected: NodeKind,
        found: NodeKind,
    },
    #[error("Index {index} out of bounds for {len} statement(s)")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("Indentation must not contain a newline: {0:?}")]
    InvalidIndent(String),

    #[cfg(feature = "serde")]
    #[error("Invalid raw tree: {0}")]
    Json(#[from] serde_json::Error),
}
