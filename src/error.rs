//! Error types.
//!
//! Only conditions a caller can recover from are errors here. Tree invariant
//! violations (re-parenting an attached node) panic instead.

use thiserror::Error;

use crate::engine::NodeId;

/// Errors surfaced by the toolkit.
#[derive(Debug, Error)]
pub enum UiError {
    /// The layout solver rejected an operation.
    #[error("layout engine error: {0}")]
    Layout(#[from] taffy::TaffyError),

    /// Terminal or other I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A node id that does not belong to this tree.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
}

/// Result type alias for toolkit operations.
pub type Result<T, E = UiError> = std::result::Result<T, E>;
