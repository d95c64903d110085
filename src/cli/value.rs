//! Node values as typed on the command line.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// A YAML scalar (or nested value) stored in a node.
///
/// Command-line text is read as YAML, so `5` is a number and `CEO` a string,
/// matching what a document file holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreeValue(pub Value);

impl FromStr for TreeValue {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match serde_yaml::from_str::<Value>(s) {
            Ok(Value::Null) if !s.trim().is_empty() && s.trim() != "~" && s.trim() != "null" => {
                TreeValue(Value::String(s.to_string()))
            }
            Ok(value) => TreeValue(value),
            Err(_) => TreeValue(Value::String(s.to_string())),
        })
    }
}

impl From<&str> for TreeValue {
    fn from(s: &str) -> Self {
        TreeValue(Value::String(s.to_string()))
    }
}

impl From<i64> for TreeValue {
    fn from(n: i64) -> Self {
        TreeValue(Value::Number(n.into()))
    }
}

impl fmt::Display for TreeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
            other => match serde_yaml::to_string(other) {
                Ok(text) => write!(f, "{}", text.trim_end()),
                Err(_) => write!(f, "{other:?}"),
            },
        }
    }
}
