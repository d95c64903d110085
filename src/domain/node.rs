//! Tree node with an explicit binary/general kind tag.
//!
//! A binary node stores exactly two slots; a general node stores an ordered
//! list. Each kind projects the other view on demand (`children()` on a binary
//! node, `left()`/`right()` on a general node), so there is never a second copy
//! of the child references to keep in sync.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Addressing and insertion discipline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeMode {
    /// Two named slots, addressed by `L`/`R`.
    #[default]
    Binary,
    /// Unbounded ordered children, addressed by index.
    General,
}

impl fmt::Display for TreeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeMode::Binary => write!(f, "binary"),
            TreeMode::General => write!(f, "general"),
        }
    }
}

impl FromStr for TreeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binary" => Ok(TreeMode::Binary),
            "general" => Ok(TreeMode::General),
            other => Err(format!("unknown tree mode '{other}', use 'binary' or 'general'")),
        }
    }
}

/// Child storage of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind<V> {
    Binary {
        left: Option<Box<Node<V>>>,
        right: Option<Box<Node<V>>>,
    },
    General {
        children: Vec<Node<V>>,
    },
}

impl<V> NodeKind<V> {
    pub(crate) fn empty(mode: TreeMode) -> Self {
        match mode {
            TreeMode::Binary => NodeKind::Binary {
                left: None,
                right: None,
            },
            TreeMode::General => NodeKind::General {
                children: Vec::new(),
            },
        }
    }
}

/// A tree node. Any node held by the caller is the root of the tree it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<V> {
    pub value: V,
    pub(crate) kind: NodeKind<V>,
}

impl<V> Node<V> {
    /// Binary leaf.
    pub fn new(value: V) -> Self {
        Self::with_mode(value, TreeMode::Binary)
    }

    /// General leaf.
    pub fn general(value: V) -> Self {
        Self::with_mode(value, TreeMode::General)
    }

    pub fn with_mode(value: V, mode: TreeMode) -> Self {
        Self {
            value,
            kind: NodeKind::empty(mode),
        }
    }

    /// Binary node with the given subtrees.
    pub fn binary(value: V, left: Option<Node<V>>, right: Option<Node<V>>) -> Self {
        Self {
            value,
            kind: NodeKind::Binary {
                left: left.map(Box::new),
                right: right.map(Box::new),
            },
        }
    }

    /// General node with the given ordered children.
    pub fn with_children(value: V, children: Vec<Node<V>>) -> Self {
        Self {
            value,
            kind: NodeKind::General { children },
        }
    }

    pub fn kind(&self) -> &NodeKind<V> {
        &self.kind
    }

    /// The kind tag. Never inferred from the number of children.
    pub fn mode(&self) -> TreeMode {
        match self.kind {
            NodeKind::Binary { .. } => TreeMode::Binary,
            NodeKind::General { .. } => TreeMode::General,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.child_count() == 0
    }

    /// Left child; `children[0]` for a general node.
    pub fn left(&self) -> Option<&Node<V>> {
        match &self.kind {
            NodeKind::Binary { left, .. } => left.as_deref(),
            NodeKind::General { children } => children.first(),
        }
    }

    /// Right child; `children[1]` for a general node.
    pub fn right(&self) -> Option<&Node<V>> {
        match &self.kind {
            NodeKind::Binary { right, .. } => right.as_deref(),
            NodeKind::General { children } => children.get(1),
        }
    }

    pub fn left_mut(&mut self) -> Option<&mut Node<V>> {
        match &mut self.kind {
            NodeKind::Binary { left, .. } => left.as_deref_mut(),
            NodeKind::General { children } => children.first_mut(),
        }
    }

    pub fn right_mut(&mut self) -> Option<&mut Node<V>> {
        match &mut self.kind {
            NodeKind::Binary { right, .. } => right.as_deref_mut(),
            NodeKind::General { children } => children.get_mut(1),
        }
    }

    /// Number of positional child slots in use.
    ///
    /// A binary node with only a right child counts 2: the right slot is
    /// always index 1.
    pub fn child_count(&self) -> usize {
        match &self.kind {
            NodeKind::Binary { right: Some(_), .. } => 2,
            NodeKind::Binary { left: Some(_), .. } => 1,
            NodeKind::Binary { .. } => 0,
            NodeKind::General { children } => children.len(),
        }
    }

    /// Child at a positional index (binary: 0 = left, 1 = right).
    pub fn child(&self, index: usize) -> Option<&Node<V>> {
        match &self.kind {
            NodeKind::Binary { .. } => match index {
                0 => self.left(),
                1 => self.right(),
                _ => None,
            },
            NodeKind::General { children } => children.get(index),
        }
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut Node<V>> {
        match &mut self.kind {
            NodeKind::Binary { left, right } => match index {
                0 => left.as_deref_mut(),
                1 => right.as_deref_mut(),
                _ => None,
            },
            NodeKind::General { children } => children.get_mut(index),
        }
    }

    /// Present children in order (binary: left then right).
    pub fn children(&self) -> impl Iterator<Item = &Node<V>> + '_ {
        let (slots, list): ([Option<&Node<V>>; 2], &[Node<V>]) = match &self.kind {
            NodeKind::Binary { left, right } => {
                ([left.as_deref(), right.as_deref()], Default::default())
            }
            NodeKind::General { children } => ([None, None], children.as_slice()),
        };
        slots.into_iter().flatten().chain(list.iter())
    }

    pub fn children_mut(&mut self) -> impl Iterator<Item = &mut Node<V>> + '_ {
        let (slots, list): ([Option<&mut Node<V>>; 2], &mut [Node<V>]) = match &mut self.kind {
            NodeKind::Binary { left, right } => (
                [left.as_deref_mut(), right.as_deref_mut()],
                Default::default(),
            ),
            NodeKind::General { children } => ([None, None], children.as_mut_slice()),
        };
        slots.into_iter().flatten().chain(list.iter_mut())
    }

    /// Detaches all children, leaving this node a leaf of the same kind.
    pub(crate) fn detach_children(&mut self) -> Vec<Node<V>> {
        match &mut self.kind {
            NodeKind::Binary { left, right } => left
                .take()
                .into_iter()
                .chain(right.take())
                .map(|child| *child)
                .collect(),
            NodeKind::General { children } => std::mem::take(children),
        }
    }

    /// Height of the tree: 1 for a leaf.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut queue = VecDeque::new();
        queue.push_back((self, 1)); // (node, depth)

        while let Some((node, depth)) = queue.pop_front() {
            max_depth = max_depth.max(depth);
            for child in node.children() {
                queue.push_back((child, depth + 1));
            }
        }

        max_depth
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children());
        }
        count
    }
}

/// Tears the subtree down through a worklist, so dropping a deep tree does not
/// recurse once per level.
impl<V> Drop for Node<V> {
    fn drop(&mut self) {
        let mut pending = self.detach_children();
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.detach_children());
        }
    }
}
