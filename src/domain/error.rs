//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::node::NodeKind;

/// Domain errors represent violations of the tree and path rules.
/// These are independent of how trees are read or written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("path is not syntactically correct: \"{0}\"")]
    InvalidPath(String),

    #[error("invalid path separator: \"{0}\" (allowed: '.' or '/')")]
    InvalidSeparator(String),

    #[error("path does not exist in this localization: \"{0}\"")]
    PathNotFound(String),

    #[error("node is not of expected type: expected {expected}, found {actual}")]
    TypeMismatch { expected: NodeKind, actual: NodeKind },

    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot operate on path: \"{0}\"")]
    CannotOperateOnPath(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
