//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::cli::value::TreeValue;

/// Binary and general trees with path addressing, stored as YAML documents
#[derive(Parser, Debug)]
#[command(name = "dualtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file, layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print author and version
    #[arg(long)]
    pub info: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a document holding a single root node
    New {
        /// Tree document (YAML)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Root value
        value: TreeValue,
    },

    /// Print the tree
    Show {
        /// Tree document (YAML)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// First level to print (root = 0)
        #[arg(long)]
        min_depth: Option<usize>,
        /// Last level to print
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Insert a node at a path ("LR" binary, "0-1" general)
    Insert {
        /// Tree document (YAML)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Path to the new node
        path: String,
        /// Value of the new node
        value: TreeValue,
        /// Use general (index) addressing
        #[arg(short, long, conflicts_with = "binary")]
        general: bool,
        /// Use binary (L/R) addressing
        #[arg(short, long)]
        binary: bool,
        /// General insert before an existing child instead of appending
        #[arg(long, conflicts_with = "binary")]
        at: bool,
    },

    /// Find a node by value (breadth-first)
    Find {
        /// Tree document (YAML)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Value to look for
        value: TreeValue,
    },

    /// Replace the value of the first matching node
    Edit {
        /// Tree document (YAML)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Current value
        old: TreeValue,
        /// New value
        new: TreeValue,
    },

    /// Delete the first matching node and its subtree
    Delete {
        /// Tree document (YAML)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Value of the node to delete
        value: TreeValue,
    },

    /// Remove everything below the root
    Clear {
        /// Tree document (YAML)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Walk through binary and general tree operations
    Demo,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
