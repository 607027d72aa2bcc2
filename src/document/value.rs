//! Loosely-typed YAML value tree.
//!
//! Map definitions are read without a schema, so every lookup goes through
//! [`Node::field`], which distinguishes a missing key from an explicit
//! `null` and never panics on a shape mismatch.

use std::fmt;

/// A YAML number, kept close to how it was written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    /// Integers above `i64::MAX`.
    Unsigned(u64),
    Float(f64),
}

impl Number {
    /// Whether the number counts as "set" (non-zero).
    pub fn is_nonzero(&self) -> bool {
        match self {
            Number::Integer(n) => *n != 0,
            Number::Unsigned(n) => *n != 0,
            Number::Float(f) => *f != 0.0,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Unsigned(n) => write!(f, "{}", n),
            // Debug keeps the fractional part: 1.0 stays "1.0"
            Number::Float(x) => write!(f, "{:?}", x),
        }
    }
}

/// One node of a parsed document.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Node>),
    /// Key order is preserved as written.
    Mapping(Vec<(String, Node)>),
}

/// Result of looking up a key in a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    /// The key is absent, or the node is not a mapping.
    Missing,
    /// The key is present with an explicit `null` value.
    Null,
    /// The key is present with a value.
    Present(&'a Node),
}

impl<'a> Field<'a> {
    /// The value, if the key is present and not `null`.
    pub fn present(self) -> Option<&'a Node> {
        match self {
            Field::Present(node) => Some(node),
            Field::Missing | Field::Null => None,
        }
    }

    /// The value, if it is present and truthy (see [`Node::is_truthy`]).
    pub fn truthy(self) -> Option<&'a Node> {
        self.present().filter(|node| node.is_truthy())
    }

    /// Look up `key` in the value, propagating absence.
    pub fn field(self, key: &str) -> Field<'a> {
        match self {
            Field::Present(node) => node.field(key),
            Field::Missing | Field::Null => Field::Missing,
        }
    }
}

impl Node {
    /// Look up a key in a mapping node.
    pub fn field(&self, key: &str) -> Field<'_> {
        let Node::Mapping(entries) = self else {
            return Field::Missing;
        };

        match entries.iter().find(|(k, _)| k == key) {
            Some((_, Node::Null)) => Field::Null,
            Some((_, node)) => Field::Present(node),
            None => Field::Missing,
        }
    }

    /// Truthiness: null, `false`, zero, empty strings and empty collections are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Node::Null => false,
            Node::Bool(b) => *b,
            Node::Number(n) => n.is_nonzero(),
            Node::String(s) => !s.is_empty(),
            Node::Sequence(items) => !items.is_empty(),
            Node::Mapping(entries) => !entries.is_empty(),
        }
    }

    /// Render a scalar as text. Null and collections have no label.
    pub fn to_label(&self) -> Option<String> {
        match self {
            Node::Bool(b) => Some(b.to_string()),
            Node::Number(n) => Some(n.to_string()),
            Node::String(s) => Some(s.clone()),
            Node::Null | Node::Sequence(_) | Node::Mapping(_) => None,
        }
    }

    /// An integer in `1..=u32::MAX`.
    pub fn as_positive_u32(&self) -> Option<u32> {
        match self {
            Node::Number(Number::Integer(n)) if *n >= 1 => u32::try_from(*n).ok(),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Node::Mapping(_))
    }

    /// Short name of the node's variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "boolean",
            Node::Number(_) => "number",
            Node::String(_) => "string",
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
        }
    }
}

impl From<serde_yaml::Value> for Node {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Node::Number(Number::Integer(i))
                } else if let Some(u) = n.as_u64() {
                    Node::Number(Number::Unsigned(u))
                } else {
                    Node::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Value::String(s) => Node::String(s),
            Value::Sequence(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Mapping(map) => Node::Mapping(
                map.into_iter()
                    .filter_map(|(key, value)| {
                        // Complex keys cannot be addressed by name
                        let key = Node::from(key).to_label()?;
                        Some((key, Node::from(value)))
                    })
                    .collect(),
            ),
            Value::Tagged(tagged) => Node::from(tagged.value),
        }
    }
}
