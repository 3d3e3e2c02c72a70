//! Tree node: the closed variant every parsed document is made of

use std::fmt;

use indexmap::IndexMap;
use serde_json::{Number, Value};

/// Ordered key/value pairs. Keys are unique, insertion order is kept.
pub type Mapping = IndexMap<String, Node>;

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(Number),
    Bool(bool),
    Null,
}

/// Any node of a semi-structured document.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Mapping(Mapping),
    Sequence(Vec<Node>),
    Scalar(Scalar),
}

impl Node {
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Variant name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Mapping(_) => "mapping",
            Node::Sequence(_) => "sequence",
            Node::Scalar(_) => "scalar",
        }
    }

    /// Keys of a mapping in insertion order; empty for other variants.
    pub fn keys(&self) -> Vec<&str> {
        self.as_mapping()
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Null => f.write_str("null"),
        }
    }
}

/// Scalars print their plain text; containers print as compact JSON.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Scalar(scalar) => fmt::Display::fmt(scalar, f),
            other => write!(f, "{}", Value::from(other)),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Node::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, Node::from(v)))
                    .collect(),
            ),
            Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::String(s) => Node::Scalar(Scalar::Text(s)),
            Value::Number(n) => Node::Scalar(Scalar::Number(n)),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Value::Null => Node::Scalar(Scalar::Null),
        }
    }
}

impl From<&Node> for Value {
    fn from(node: &Node) -> Self {
        match node {
            Node::Mapping(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
            Node::Sequence(items) => Value::Array(items.iter().map(Value::from).collect()),
            Node::Scalar(Scalar::Text(s)) => Value::String(s.clone()),
            Node::Scalar(Scalar::Number(n)) => Value::Number(n.clone()),
            Node::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
            Node::Scalar(Scalar::Null) => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn given_json_object_when_converting_then_keeps_key_order() {
        let value = json!({"zeta": 1, "alpha": 2, "mid": 3});
        let node = Node::from(value);
        assert_eq!(node.keys(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn given_integer_and_float_when_displaying_then_uses_json_number_form() {
        assert_eq!(Node::from(json!(23)).to_string(), "23");
        assert_eq!(Node::from(json!(2.5)).to_string(), "2.5");
    }

    #[test]
    fn given_scalars_when_displaying_then_prints_plain_text() {
        assert_eq!(Node::from(json!("Main St")).to_string(), "Main St");
        assert_eq!(Node::from(json!(true)).to_string(), "true");
        assert_eq!(Node::from(json!(null)).to_string(), "null");
    }

    #[test]
    fn given_container_when_displaying_then_prints_compact_json() {
        let node = Node::from(json!({"b": [1, 2], "a": "x"}));
        assert_eq!(node.to_string(), r#"{"b":[1,2],"a":"x"}"#);
    }

    #[test]
    fn given_node_when_converting_back_to_json_then_equals_source() {
        let value = json!({"system": {"components": ["CPU", null, false], "load": 0.75}});
        let node = Node::from(value.clone());
        assert_eq!(Value::from(&node), value);
    }
}
