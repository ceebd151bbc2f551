//! Error types shared by the tree, the keywords and the runtime seam.

use crate::style::StyleError;

/// Convenience alias used throughout the crate.
pub type Result<T, E = WorkstationError> = std::result::Result<T, E>;

/// Which ordering rule a keyword call broke.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Ordering {
    /// A widget keyword ran before any `screen` was declared.
    #[error("screen must be defined before {widget} can be added")]
    ScreenRequired { widget: String },
    /// A `row` ran outside of any open `table` block.
    #[error("table must be defined before {widget} can be added")]
    ContainerRequired { widget: String },
}

/// Every failure the builder, the tree or a runtime handle can surface.
#[derive(Debug, thiserror::Error)]
pub enum WorkstationError {
    /// Positional accessor called with a negative or too-large index.
    #[error("Index out of range.")]
    IndexOutOfRange { index: i128, len: usize },

    #[error(transparent)]
    OrderingViolation(#[from] Ordering),

    /// Default behaviour of an unbound widget runtime handle.
    #[error("{operation} not implemented")]
    NotImplemented { operation: &'static str },

    #[error("no runtime configured")]
    RuntimeUnavailable,

    #[error("no screen matches {0}")]
    ScreenNotFound(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// A node id that does not (or no longer) exists in the tree.
    #[error("node does not exist in this tree")]
    UnknownNode,

    #[error(transparent)]
    Style(#[from] StyleError),
}

impl WorkstationError {
    /// Whether this is an ordering violation of any kind.
    pub fn is_ordering(&self) -> bool {
        matches!(self, WorkstationError::OrderingViolation(_))
    }
}
