//! Integration tests for binary trees: L/R addressing, search, edit, delete.

use dualtree::{
    delete, delete_subtree, edit, find, find_mut, insert, DomainError, Node, PathResolver,
    TreeMode,
};
use rstest::rstest;

fn sample() -> Node<i32> {
    let mut root = Node::new(1);
    for (path, value) in [("L", 2), ("R", 3), ("LL", 4), ("LR", 5)] {
        insert(Some(&mut root), path, value, TreeMode::Binary).unwrap();
    }
    root
}

fn values_bfs(root: &Node<i32>) -> Vec<i32> {
    let mut out = vec![];
    let mut queue = std::collections::VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        out.push(node.value);
        queue.extend(node.children());
    }
    out
}

#[test]
fn given_binary_tree_when_find_edit_delete_then_tree_reflects_each_step() {
    // Arrange
    let root = sample();

    // Act / Assert: find
    assert_eq!(find(Some(&root), &5).map(|n| n.value), Some(5));

    // Act / Assert: edit
    let mut root = root;
    assert!(edit(Some(&mut root), &5, 50));
    assert_eq!(root.left().and_then(Node::right).map(|n| n.value), Some(50));

    // Act / Assert: delete
    let root = delete(Some(root), &4).unwrap();
    let left = root.left().unwrap();
    assert!(left.left().is_none());
    assert_eq!(left.value, 2);
    assert_eq!(left.right().map(|n| n.value), Some(50));
}

#[test]
fn given_occupied_slot_when_insert_then_duplicate_and_tree_unchanged() {
    // Arrange
    let mut root = sample();
    let before = root.clone();

    // Act
    let err = insert(Some(&mut root), "LL", 99, TreeMode::Binary).unwrap_err();

    // Assert
    assert_eq!(
        err,
        DomainError::DuplicateNode {
            path: "LL".to_string()
        }
    );
    assert_eq!(root, before);
}

#[rstest]
#[case("", "empty path")]
#[case("LX", "bad direction")]
#[case("RLL", "missing intermediate")]
fn given_bad_path_when_insert_then_error_and_tree_unchanged(
    #[case] path: &str,
    #[case] _why: &str,
) {
    // Arrange
    let mut root = sample();
    let before = root.clone();

    // Act
    let result = insert(Some(&mut root), path, 7, TreeMode::Binary);

    // Assert
    assert!(result.is_err());
    assert_eq!(root, before);
}

#[test]
fn given_broken_path_when_insert_then_reports_missing_side() {
    let mut root = sample();
    let err = insert(Some(&mut root), "RLL", 7, TreeMode::Binary).unwrap_err();
    assert!(matches!(err, DomainError::PathBroken { side: "left", .. }));
}

#[test]
fn given_absent_root_when_insert_then_null_root() {
    let err = insert::<i32>(None, "L", 1, TreeMode::Binary).unwrap_err();
    assert_eq!(err, DomainError::NullRoot);
}

#[test]
fn given_root_value_when_delete_then_whole_tree_gone() {
    assert!(delete(Some(sample()), &1).is_none());
}

#[test]
fn given_missing_value_when_delete_then_tree_unchanged() {
    let root = sample();
    let after = delete(Some(root.clone()), &42);
    assert_eq!(after, Some(root));
}

#[test]
fn given_only_right_child_when_delete_left_sibling_then_right_stays_right() {
    // Arrange
    let mut root = Node::new(1);
    insert(Some(&mut root), "L", 2, TreeMode::Binary).unwrap();
    insert(Some(&mut root), "R", 3, TreeMode::Binary).unwrap();

    // Act
    let root = delete(Some(root), &2).unwrap();

    // Assert
    assert!(root.left().is_none());
    assert_eq!(root.right().map(|n| n.value), Some(3));
    assert_eq!(root.child_count(), 2);
}

#[test]
fn given_duplicate_values_when_edit_then_breadth_first_match_changes() {
    // Arrange: 7 at depth 2 (LL) and depth 1 (R)
    let mut root = Node::new(0);
    insert(Some(&mut root), "L", 1, TreeMode::Binary).unwrap();
    insert(Some(&mut root), "LL", 7, TreeMode::Binary).unwrap();
    insert(Some(&mut root), "R", 7, TreeMode::Binary).unwrap();

    // Act
    assert!(edit(Some(&mut root), &7, 8));

    // Assert
    assert_eq!(root.right().map(|n| n.value), Some(8));
    assert_eq!(
        root.left().and_then(Node::left).map(|n| n.value),
        Some(7)
    );
}

#[test]
fn given_tree_when_delete_subtree_twice_then_only_root_remains() {
    // Arrange
    let mut root = sample();

    // Act
    delete_subtree(Some(&mut root));
    delete_subtree(Some(&mut root));
    delete_subtree::<i32>(None);

    // Assert
    assert!(root.is_leaf());
    assert_eq!(root.value, 1);
    assert_eq!(root.size(), 1);
}

#[test]
fn given_tree_when_find_mut_then_value_is_writable() {
    let mut root = sample();
    if let Some(node) = find_mut(Some(&mut root), &3) {
        node.value = 30;
    }
    assert_eq!(values_bfs(&root), vec![1, 2, 30, 4, 5]);
}

#[test]
fn given_path_when_node_at_then_returns_slot_content() {
    let root = sample();
    let resolver = PathResolver::default();
    assert_eq!(
        resolver
            .node_at(&root, "LR", TreeMode::Binary)
            .unwrap()
            .map(|n| n.value),
        Some(5)
    );
    assert!(resolver
        .node_at(&root, "RR", TreeMode::Binary)
        .unwrap()
        .is_none());
}

#[test]
fn given_tree_when_measured_then_depth_and_size_match() {
    let root = sample();
    assert_eq!(root.depth(), 3);
    assert_eq!(root.size(), 5);
}

#[test]
fn given_missing_value_when_edit_then_false_and_tree_unchanged() {
    // Arrange
    let mut root = sample();
    let before = root.clone();

    // Act
    let edited = edit(Some(&mut root), &42, 420);

    // Assert
    assert!(!edited);
    assert_eq!(root, before);
    assert!(!edit::<i32>(None, &1, 10));
}

#[test]
fn given_missing_value_when_find_then_none() {
    let mut root = sample();

    assert!(find(Some(&root), &42).is_none());
    assert!(find_mut(Some(&mut root), &42).is_none());
    assert!(find::<i32>(None, &1).is_none());
}
