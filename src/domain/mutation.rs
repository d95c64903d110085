//! Insert, find, edit and delete on binary and general trees.
//!
//! All traversals are breadth-first over an explicit queue, so lookup order is
//! level order in both modes and deep trees do not grow the call stack.

use std::collections::VecDeque;

use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{Node, NodeKind, TreeMode};
use crate::domain::path::{PathResolver, Step};

/// Inserts `value` at `path`, using the default path separator.
///
/// Binary paths end in the slot to fill (`"LR"` = right child of the left
/// child). General paths must end in the append position of the parent
/// (`"0-2"` when child 0 has two children). Returns the root for chaining.
///
/// # Errors
///
/// `NullRoot` for an absent root, any path error from [`PathResolver`],
/// `DuplicateNode` when a binary slot is taken, `IndexOutOfRange` when a
/// general index is not the append position, `ModeMismatch` when the parent
/// holds children the step cannot address (general children under a binary
/// step, or a binary node with only a right child under a general step). The
/// tree is unchanged on error.
pub fn insert<'a, V>(
    root: Option<&'a mut Node<V>>,
    path: &str,
    value: V,
    mode: TreeMode,
) -> DomainResult<&'a mut Node<V>> {
    insert_with(&PathResolver::default(), root, path, value, mode)
}

/// [`insert`] with an explicit resolver (custom separator).
#[instrument(level = "debug", skip(resolver, root, value))]
pub fn insert_with<'a, V>(
    resolver: &PathResolver,
    root: Option<&'a mut Node<V>>,
    path: &str,
    value: V,
    mode: TreeMode,
) -> DomainResult<&'a mut Node<V>> {
    let root = root.ok_or(DomainError::NullRoot)?;
    let (parent, step) = resolver.resolve(root, path, mode)?;
    attach(parent, step, Node::with_mode(value, mode), path, false)?;
    debug!("inserted node");
    Ok(root)
}

/// General-mode insert that may also place the new node before an existing child.
///
/// The final index may be anything up to the parent's child count; later
/// siblings shift one position to the right. [`insert`] stays append-only.
pub fn insert_at<'a, V>(
    root: Option<&'a mut Node<V>>,
    path: &str,
    value: V,
) -> DomainResult<&'a mut Node<V>> {
    insert_at_with(&PathResolver::default(), root, path, value)
}

#[instrument(level = "debug", skip(resolver, root, value))]
pub fn insert_at_with<'a, V>(
    resolver: &PathResolver,
    root: Option<&'a mut Node<V>>,
    path: &str,
    value: V,
) -> DomainResult<&'a mut Node<V>> {
    let root = root.ok_or(DomainError::NullRoot)?;
    let (parent, step) = resolver.resolve(root, path, TreeMode::General)?;
    attach(parent, step, Node::general(value), path, true)?;
    debug!("inserted node");
    Ok(root)
}

/// Validates, then attaches `child` to `parent` at `step`.
///
/// A leaf of the other kind is re-tagged to the step's kind. A binary node
/// without a gap (left present) accepts a general step and becomes a general
/// node holding `[left, right?]`, which is how a general tree read back from a
/// document keeps growing. Any other node of the other kind is rejected.
fn attach<V>(
    parent: &mut Node<V>,
    step: Step,
    child: Node<V>,
    path: &str,
    shift: bool,
) -> DomainResult<()> {
    let mode = step.mode();
    if parent.mode() != mode {
        let convertible = parent.is_leaf()
            || (mode == TreeMode::General && parent.left().is_some());
        if !convertible {
            return Err(DomainError::ModeMismatch {
                path: path.to_string(),
                mode,
                kind: parent.mode(),
            });
        }
        if let Step::Index(index) = step {
            let count = parent.child_count();
            if index > count || (index < count && !shift) {
                return Err(DomainError::IndexOutOfRange {
                    path: path.to_string(),
                    index,
                    expected: count,
                });
            }
        }
        trace!(from = %parent.mode(), to = %mode, "re-tagging node");
        let children = parent.detach_children();
        parent.kind = match mode {
            TreeMode::Binary => NodeKind::empty(mode),
            TreeMode::General => NodeKind::General { children },
        };
    }

    match (&mut parent.kind, step) {
        (NodeKind::Binary { left: slot, .. }, Step::Left)
        | (NodeKind::Binary { right: slot, .. }, Step::Right) => {
            if slot.is_some() {
                return Err(DomainError::DuplicateNode {
                    path: path.to_string(),
                });
            }
            *slot = Some(Box::new(child));
            Ok(())
        }
        (NodeKind::General { children }, Step::Index(index)) => {
            let count = children.len();
            if index == count {
                children.push(child);
                Ok(())
            } else if shift && index < count {
                children.insert(index, child);
                Ok(())
            } else {
                Err(DomainError::IndexOutOfRange {
                    path: path.to_string(),
                    index,
                    expected: count,
                })
            }
        }
        (kind, _) => Err(DomainError::ModeMismatch {
            path: path.to_string(),
            mode,
            kind: match kind {
                NodeKind::Binary { .. } => TreeMode::Binary,
                NodeKind::General { .. } => TreeMode::General,
            },
        }),
    }
}

/// Breadth-first search for the first node holding `value`.
pub fn find<'a, V: PartialEq>(root: Option<&'a Node<V>>, value: &V) -> Option<&'a Node<V>> {
    let mut queue: VecDeque<&Node<V>> = root.into_iter().collect();

    while let Some(node) = queue.pop_front() {
        if node.value == *value {
            return Some(node);
        }
        queue.extend(node.children());
    }

    None
}

/// Mutable twin of [`find`], same visiting order.
pub fn find_mut<'a, V: PartialEq>(
    root: Option<&'a mut Node<V>>,
    value: &V,
) -> Option<&'a mut Node<V>> {
    let mut queue: VecDeque<&mut Node<V>> = root.into_iter().collect();

    while let Some(node) = queue.pop_front() {
        if node.value == *value {
            return Some(node);
        }
        queue.extend(node.children_mut());
    }

    None
}

/// Overwrites the value of the first node holding `old_value`.
///
/// Returns `false` when no node matches; the structure is never touched.
#[instrument(level = "debug", skip_all)]
pub fn edit<V: PartialEq>(root: Option<&mut Node<V>>, old_value: &V, new_value: V) -> bool {
    match find_mut(root, old_value) {
        Some(node) => {
            node.value = new_value;
            debug!("node edited");
            true
        }
        None => {
            debug!("no node to edit");
            false
        }
    }
}

/// Removes the first node holding `value` together with its subtree.
///
/// Deleting the root discards the whole tree and returns `None`; no child is
/// promoted in its place. A general parent closes the gap in its child list,
/// so `left()`/`right()` see the shifted children. A binary parent only clears
/// the matching slot. Returns the unchanged root when nothing matches.
#[instrument(level = "debug", skip_all)]
pub fn delete<V: PartialEq>(root: Option<Node<V>>, value: &V) -> Option<Node<V>> {
    let mut root = root?;
    if root.value == *value {
        debug!("deleting root, tree discarded");
        return None;
    }
    if remove_first(&mut root, value) {
        debug!("node deleted");
    } else {
        debug!("no node to delete");
    }
    Some(root)
}

fn remove_first<V: PartialEq>(root: &mut Node<V>, value: &V) -> bool {
    let mut queue = VecDeque::from([root]);

    while let Some(node) = queue.pop_front() {
        match &mut node.kind {
            NodeKind::Binary { left, right } => {
                for slot in [&mut *left, &mut *right] {
                    if slot.as_ref().is_some_and(|child| child.value == *value) {
                        *slot = None;
                        return true;
                    }
                }
                queue.extend(left.as_deref_mut());
                queue.extend(right.as_deref_mut());
            }
            NodeKind::General { children } => {
                if let Some(index) = children.iter().position(|child| child.value == *value) {
                    trace!(index, "removing child");
                    children.remove(index);
                    return true;
                }
                queue.extend(children.iter_mut());
            }
        }
    }

    false
}

/// Releases every descendant of `root`, leaving it a childless node.
///
/// Idempotent; a no-op on an absent root.
#[instrument(level = "debug", skip_all)]
pub fn delete_subtree<V>(root: Option<&mut Node<V>>) {
    let Some(root) = root else {
        return;
    };
    let released = root.detach_children();
    trace!(children = released.len(), "releasing subtree");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_absent_root() {
        let err = insert::<i32>(None, "L", 1, TreeMode::Binary).unwrap_err();
        assert_eq!(err, DomainError::NullRoot);
    }

    #[test]
    fn test_insert_right_before_left() {
        let mut root = Node::new(1);
        insert(Some(&mut root), "R", 3, TreeMode::Binary).unwrap();
        assert!(root.left().is_none());
        assert_eq!(root.right().map(|n| n.value), Some(3));
        assert_eq!(root.child_count(), 2);

        insert(Some(&mut root), "L", 2, TreeMode::Binary).unwrap();
        assert_eq!(root.left().map(|n| n.value), Some(2));
        assert_eq!(root.right().map(|n| n.value), Some(3));
    }

    #[test]
    fn test_general_insert_retags_binary_leaf() {
        let mut root = Node::new("CEO");
        insert(Some(&mut root), "0", "CTO", TreeMode::General).unwrap();
        assert_eq!(root.mode(), TreeMode::General);
    }

    #[test]
    fn test_failed_retag_leaves_leaf_untouched() {
        let mut root = Node::new(1);
        let err = insert(Some(&mut root), "1", 2, TreeMode::General).unwrap_err();
        assert!(matches!(err, DomainError::IndexOutOfRange { expected: 0, .. }));
        assert_eq!(root, Node::new(1));
    }

    #[test]
    fn test_mode_mismatch_on_non_leaf() {
        let mut root = Node::with_children(0, vec![Node::general(1)]);
        let err = insert(Some(&mut root), "R", 2, TreeMode::Binary).unwrap_err();
        assert!(matches!(
            err,
            DomainError::ModeMismatch {
                mode: TreeMode::Binary,
                kind: TreeMode::General,
                ..
            }
        ));
    }

    #[test]
    fn test_general_step_converts_gap_free_binary_node() {
        let mut root = Node::binary("CEO", Some(Node::new("CTO")), None);
        insert(Some(&mut root), "1", "CFO", TreeMode::General).unwrap();
        assert_eq!(root.mode(), TreeMode::General);
        let values: Vec<_> = root.children().map(|n| n.value).collect();
        assert_eq!(values, vec!["CTO", "CFO"]);
    }

    #[test]
    fn test_failed_conversion_leaves_binary_node_untouched() {
        let mut root = Node::binary(0, Some(Node::new(1)), None);
        let before = root.clone();
        let err = insert(Some(&mut root), "3", 9, TreeMode::General).unwrap_err();
        assert!(matches!(err, DomainError::IndexOutOfRange { expected: 1, .. }));
        assert_eq!(root, before);
    }

    #[test]
    fn test_general_step_rejects_binary_node_with_gap() {
        let mut root = Node::binary(0, None, Some(Node::new(2)));
        let err = insert(Some(&mut root), "2", 9, TreeMode::General).unwrap_err();
        assert!(matches!(
            err,
            DomainError::ModeMismatch {
                mode: TreeMode::General,
                kind: TreeMode::Binary,
                ..
            }
        ));
    }

    #[test]
    fn test_find_is_level_order() {
        // both nodes hold 7; the shallower one must win
        let mut root = Node::new(0);
        insert(Some(&mut root), "L", 1, TreeMode::Binary).unwrap();
        insert(Some(&mut root), "R", 7, TreeMode::Binary).unwrap();
        insert(Some(&mut root), "LL", 7, TreeMode::Binary).unwrap();

        let found = find_mut(Some(&mut root), &7).unwrap();
        found.value = 70;
        assert_eq!(root.right().map(|n| n.value), Some(70));
        assert_eq!(root.left().and_then(|n| n.left()).map(|n| n.value), Some(7));
    }

    #[test]
    fn test_delete_binary_left_keeps_right_slot() {
        let mut root = Node::new(1);
        insert(Some(&mut root), "L", 2, TreeMode::Binary).unwrap();
        insert(Some(&mut root), "R", 3, TreeMode::Binary).unwrap();

        let root = delete(Some(root), &2).unwrap();
        assert!(root.left().is_none());
        assert_eq!(root.right().map(|n| n.value), Some(3));
    }

    #[test]
    fn test_delete_general_first_child_shifts_projection() {
        let mut root = Node::general("r");
        for (path, value) in [("0", "a"), ("1", "b"), ("2", "c")] {
            insert(Some(&mut root), path, value, TreeMode::General).unwrap();
        }

        let root = delete(Some(root), &"a").unwrap();
        assert_eq!(root.left().map(|n| n.value), Some("b"));
        assert_eq!(root.right().map(|n| n.value), Some("c"));
    }

    #[test]
    fn test_delete_subtree_deep_chain() {
        let mut root = Node::general(0usize);
        let mut path = String::from("0");
        for value in 1..2_000 {
            insert(Some(&mut root), &path, value, TreeMode::General).unwrap();
            path.push_str("-0");
        }
        assert_eq!(root.depth(), 2_000);

        delete_subtree(Some(&mut root));
        assert!(root.is_leaf());
    }
}
