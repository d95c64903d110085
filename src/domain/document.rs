//! Tree <-> nested key-value document.
//!
//! The document form of a node is a mapping with the keys `value`, `left`
//! and `right`, in that order; absent children are omitted. General trees are
//! exported through their `left`/`right` projection and may hold at most two
//! children per node.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{Node, NodeKind};

pub const VALUE_KEY: &str = "value";
pub const LEFT_KEY: &str = "left";
pub const RIGHT_KEY: &str = "right";

/// Converts a tree into its document form; `None` for an absent root.
///
/// # Errors
///
/// `UnsupportedShape` when a general node has more than two children,
/// `DocumentEncode` when a value cannot be represented.
///
/// Encoding recurses once per level. Depth is bounded in practice by the
/// YAML reader, which rejects documents nested past its recursion limit, so
/// only trees of moderate depth round-trip through a file.
#[instrument(level = "debug", skip_all)]
pub fn to_document<V: Serialize>(root: Option<&Node<V>>) -> DomainResult<Option<Value>> {
    root.map(encode_node).transpose()
}

fn encode_node<V: Serialize>(node: &Node<V>) -> DomainResult<Value> {
    if let NodeKind::General { children } = node.kind() {
        if children.len() > 2 {
            return Err(DomainError::UnsupportedShape {
                count: children.len(),
            });
        }
    }

    let mut doc = Mapping::new();
    let value =
        serde_yaml::to_value(&node.value).map_err(|e| DomainError::DocumentEncode(e.to_string()))?;
    doc.insert(Value::String(VALUE_KEY.to_string()), value);
    if let Some(left) = node.left() {
        doc.insert(Value::String(LEFT_KEY.to_string()), encode_node(left)?);
    }
    if let Some(right) = node.right() {
        doc.insert(Value::String(RIGHT_KEY.to_string()), encode_node(right)?);
    }
    Ok(Value::Mapping(doc))
}

/// Builds a binary tree from its document form.
///
/// Anything that is not a mapping with a `value` key convertible to `V`
/// yields `None` at that position: a malformed subtree is dropped, the rest
/// of the tree is still built. Recurses once per level, like [`to_document`].
pub fn from_document<V: DeserializeOwned>(doc: Option<&Value>) -> Option<Node<V>> {
    let mapping = doc?.as_mapping()?;
    let raw = mapping.get(VALUE_KEY)?;
    let value = match serde_yaml::from_value::<V>(raw.clone()) {
        Ok(value) => value,
        Err(e) => {
            debug!("dropping subtree with unreadable value: {}", e);
            return None;
        }
    };

    Some(Node::binary(
        value,
        from_document(mapping.get(LEFT_KEY)),
        from_document(mapping.get(RIGHT_KEY)),
    ))
}
