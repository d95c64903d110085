//! Path parsing and resolution.
//!
//! Binary paths are strings over `L`/`R` (case-insensitive), one character per
//! level. General paths are non-negative indices joined by a separator
//! (`0-1` = child 0, then its child 1). Resolution walks every step but the
//! last and hands the final step back to the caller, so attaching is the only
//! mutation and happens after the whole path has been validated.

use tracing::{instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{Node, TreeMode};

/// Separator between indices of a general path.
pub const DEFAULT_SEPARATOR: &str = "-";

/// One level of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Left,
    Right,
    Index(usize),
}

impl Step {
    /// Mode this step belongs to.
    pub fn mode(self) -> TreeMode {
        match self {
            Step::Left | Step::Right => TreeMode::Binary,
            Step::Index(_) => TreeMode::General,
        }
    }
}

/// Parses and walks paths for both addressing schemes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    separator: String,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

impl PathResolver {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Parses a path into steps; never touches a tree.
    pub fn parse(&self, path: &str, mode: TreeMode) -> DomainResult<Vec<Step>> {
        if path.is_empty() {
            return Err(DomainError::InvalidPath {
                path: path.to_string(),
                reason: "path cannot be empty".to_string(),
            });
        }
        match mode {
            TreeMode::Binary => path
                .chars()
                .map(|c| match c.to_ascii_uppercase() {
                    'L' => Ok(Step::Left),
                    'R' => Ok(Step::Right),
                    _ => Err(DomainError::InvalidDirection {
                        path: path.to_string(),
                        direction: c,
                    }),
                })
                .collect(),
            TreeMode::General => path
                .split(self.separator.as_str())
                .map(|token| {
                    token
                        .parse::<usize>()
                        .map(Step::Index)
                        .map_err(|_| DomainError::InvalidPath {
                            path: path.to_string(),
                            reason: format!("invalid path index '{token}'"),
                        })
                })
                .collect(),
        }
    }

    /// Walks to the parent addressed by `path` and returns it with the final step.
    #[instrument(level = "trace", skip(self, root))]
    pub fn resolve<'a, V>(
        &self,
        root: &'a mut Node<V>,
        path: &str,
        mode: TreeMode,
    ) -> DomainResult<(&'a mut Node<V>, Step)> {
        let steps = self.parse(path, mode)?;
        let Some((last, walk)) = steps.split_last() else {
            return Err(DomainError::InvalidPath {
                path: path.to_string(),
                reason: "path cannot be empty".to_string(),
            });
        };

        let mut current = root;
        for step in walk {
            current = match *step {
                Step::Left => current.left_mut().ok_or_else(|| DomainError::PathBroken {
                    path: path.to_string(),
                    side: "left",
                })?,
                Step::Right => current.right_mut().ok_or_else(|| DomainError::PathBroken {
                    path: path.to_string(),
                    side: "right",
                })?,
                Step::Index(index) => {
                    let count = current.child_count();
                    current
                        .child_mut(index)
                        .ok_or_else(|| DomainError::ChildNotFound {
                            path: path.to_string(),
                            index,
                            count,
                        })?
                }
            };
        }
        trace!(?last, "resolved parent");
        Ok((current, *last))
    }

    /// Walks the full path, final step included.
    ///
    /// Returns `Ok(None)` when the last step addresses an empty position;
    /// missing intermediate nodes are errors as in [`PathResolver::resolve`].
    pub fn node_at<'a, V>(
        &self,
        root: &'a Node<V>,
        path: &str,
        mode: TreeMode,
    ) -> DomainResult<Option<&'a Node<V>>> {
        let steps = self.parse(path, mode)?;
        let last_index = steps.len() - 1;

        let mut current = root;
        for (i, step) in steps.iter().enumerate() {
            let next = match *step {
                Step::Left => current.left(),
                Step::Right => current.right(),
                Step::Index(index) => current.child(index),
            };
            match next {
                Some(node) => current = node,
                None if i == last_index => return Ok(None),
                None => {
                    return Err(match *step {
                        Step::Left => DomainError::PathBroken {
                            path: path.to_string(),
                            side: "left",
                        },
                        Step::Right => DomainError::PathBroken {
                            path: path.to_string(),
                            side: "right",
                        },
                        Step::Index(index) => DomainError::ChildNotFound {
                            path: path.to_string(),
                            index,
                            count: current.child_count(),
                        },
                    })
                }
            }
        }
        Ok(Some(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> Node<i32> {
        Node::binary(1, Some(Node::binary(2, Some(Node::new(4)), None)), None)
    }

    #[rstest]
    #[case("L", vec![Step::Left])]
    #[case("lr", vec![Step::Left, Step::Right])]
    #[case("RRL", vec![Step::Right, Step::Right, Step::Left])]
    fn test_parse_binary(#[case] path: &str, #[case] expected: Vec<Step>) {
        let steps = PathResolver::default().parse(path, TreeMode::Binary).unwrap();
        assert_eq!(steps, expected);
    }

    #[rstest]
    #[case("0", vec![Step::Index(0)])]
    #[case("0-1", vec![Step::Index(0), Step::Index(1)])]
    #[case("2-0-11", vec![Step::Index(2), Step::Index(0), Step::Index(11)])]
    fn test_parse_general(#[case] path: &str, #[case] expected: Vec<Step>) {
        let steps = PathResolver::default().parse(path, TreeMode::General).unwrap();
        assert_eq!(steps, expected);
    }

    #[test]
    fn test_parse_general_custom_separator() {
        let steps = PathResolver::new("/").parse("3/1", TreeMode::General).unwrap();
        assert_eq!(steps, vec![Step::Index(3), Step::Index(1)]);
    }

    #[rstest]
    #[case("", TreeMode::Binary)]
    #[case("", TreeMode::General)]
    #[case("0-x", TreeMode::General)]
    #[case("0--1", TreeMode::General)]
    #[case("-1", TreeMode::General)]
    fn test_parse_invalid_path(#[case] path: &str, #[case] mode: TreeMode) {
        let err = PathResolver::default().parse(path, mode).unwrap_err();
        assert!(matches!(err, DomainError::InvalidPath { .. }), "{err:?}");
    }

    #[test]
    fn test_parse_invalid_direction_in_last_position() {
        let err = PathResolver::default().parse("LX", TreeMode::Binary).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidDirection {
                path: "LX".to_string(),
                direction: 'X'
            }
        );
    }

    #[test]
    fn test_resolve_returns_parent_and_final_step() {
        let mut root = sample();
        let (parent, step) = PathResolver::default()
            .resolve(&mut root, "LR", TreeMode::Binary)
            .unwrap();
        assert_eq!(parent.value, 2);
        assert_eq!(step, Step::Right);
    }

    #[test]
    fn test_resolve_broken_path() {
        let mut root = sample();
        let err = PathResolver::default()
            .resolve(&mut root, "RL", TreeMode::Binary)
            .unwrap_err();
        assert!(matches!(err, DomainError::PathBroken { side: "right", .. }));
    }

    #[test]
    fn test_resolve_general_missing_child() {
        let mut root = Node::with_children(0, vec![Node::general(1)]);
        let err = PathResolver::default()
            .resolve(&mut root, "1-0", TreeMode::General)
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::ChildNotFound {
                index: 1,
                count: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_node_at_walks_full_path() {
        let root = sample();
        let resolver = PathResolver::default();
        assert_eq!(
            resolver
                .node_at(&root, "LL", TreeMode::Binary)
                .unwrap()
                .map(|n| n.value),
            Some(4)
        );
        assert!(resolver.node_at(&root, "LR", TreeMode::Binary).unwrap().is_none());
        assert!(resolver.node_at(&root, "RL", TreeMode::Binary).is_err());
    }
}
