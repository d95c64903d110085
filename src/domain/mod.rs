//! Domain layer: nodes, paths and the operations on them
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod document;
pub mod error;
pub mod mutation;
pub mod node;
pub mod path;

pub use document::{from_document, to_document};
pub use error::{DomainError, DomainResult};
pub use mutation::{
    delete, delete_subtree, edit, find, find_mut, insert, insert_at, insert_at_with, insert_with,
};
pub use node::{Node, NodeKind, TreeMode};
pub use path::{PathResolver, Step, DEFAULT_SEPARATOR};
