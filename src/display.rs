//! Text rendering of trees via `termtree`.
//!
//! Binary nodes label their children `L:`/`R:`; general nodes list children in
//! order. The layout follows the node's kind tag, not its child count.

use std::collections::VecDeque;
use std::fmt;

use termtree::Tree;
use tracing::instrument;

use crate::domain::{Node, NodeKind};

pub trait TreeRender {
    fn to_tree_string(&self) -> Tree<String>;

    /// Subtrees rooted at depth `min_depth` (root = 0), cut below `max_depth`.
    fn render_range(&self, min_depth: usize, max_depth: usize) -> Vec<Tree<String>>;
}

fn labelled_children<V>(node: &Node<V>) -> Vec<(&'static str, &Node<V>)> {
    match node.kind() {
        NodeKind::Binary { left, right } => left
            .as_deref()
            .map(|n| ("L: ", n))
            .into_iter()
            .chain(right.as_deref().map(|n| ("R: ", n)))
            .collect(),
        NodeKind::General { children } => children.iter().map(|n| ("", n)).collect(),
    }
}

/// Recurses once per level; output is meant for trees that fit on a terminal.
fn build<V: fmt::Display>(node: &Node<V>, label: &str, levels_left: usize) -> Tree<String> {
    let mut tree = Tree::new(format!("{}{}", label, node.value));
    if levels_left > 0 {
        for (child_label, child) in labelled_children(node) {
            tree.push(build(child, child_label, levels_left - 1));
        }
    }
    tree
}

impl<V: fmt::Display> TreeRender for Node<V> {
    #[instrument(level = "trace", skip_all)]
    fn to_tree_string(&self) -> Tree<String> {
        build(self, "", usize::MAX)
    }

    #[instrument(level = "trace", skip(self))]
    fn render_range(&self, min_depth: usize, max_depth: usize) -> Vec<Tree<String>> {
        if min_depth > max_depth {
            return Vec::new();
        }

        let mut forest = Vec::new();
        let mut queue = VecDeque::from([("", self, 0usize)]);
        while let Some((label, node, depth)) = queue.pop_front() {
            if depth == min_depth {
                forest.push(build(node, label, max_depth - min_depth));
                continue;
            }
            for (child_label, child) in labelled_children(node) {
                queue.push_back((child_label, child, depth + 1));
            }
        }
        forest
    }
}

impl<V: fmt::Display> fmt::Display for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tree_string())
    }
}
