//! dualtree: binary and general trees with path addressing.
//!
//! A [`Node`] is either binary (optional `left`/`right`) or general (an ordered
//! list of children). Nodes are addressed by paths: `"LR"` walks left then
//! right, `"0-2"` walks to child 0 and then its child 2. Trees serialize to a
//! nested `value`/`left`/`right` document (YAML on disk).

pub mod application;
pub mod cli;
pub mod config;
pub mod display;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use display::TreeRender;
pub use domain::{
    delete, delete_subtree, edit, find, find_mut, from_document, insert, insert_at, to_document,
    DomainError, DomainResult, Node, NodeKind, PathResolver, TreeMode,
};
