//! Domain-level errors (no I/O concerns)

use thiserror::Error;

use crate::domain::node::TreeMode;

/// Domain errors represent violations of the tree's addressing and shape rules.
///
/// Every mutating operation validates fully before it touches the tree, so
/// an error always leaves the tree exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("cannot operate on an absent root")]
    NullRoot,

    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("invalid direction '{direction}' in path '{path}', use 'L' or 'R'")]
    InvalidDirection { path: String, direction: char },

    #[error("cannot follow path '{path}': {side} child does not exist")]
    PathBroken { path: String, side: &'static str },

    #[error("cannot follow path '{path}': child at index {index} does not exist ({count} children)")]
    ChildNotFound {
        path: String,
        index: usize,
        count: usize,
    },

    #[error("node already exists at path '{path}'")]
    DuplicateNode { path: String },

    #[error("index {index} out of range in path '{path}', use {expected}")]
    IndexOutOfRange {
        path: String,
        index: usize,
        expected: usize,
    },

    #[error("cannot insert in {mode} mode at path '{path}': parent is a {kind} node with children")]
    ModeMismatch {
        path: String,
        mode: TreeMode,
        kind: TreeMode,
    },

    #[error("document form is binary-shaped: node has {count} children")]
    UnsupportedShape { count: usize },

    #[error("cannot encode node value: {0}")]
    DocumentEncode(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
