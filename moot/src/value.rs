/*!
The dynamic [`Value`] tree.

`moot` deals in runtime schemas, so there is no static type to parse into;
defaults, stored constants, raw parse results, and the final structured
result are all represented as [`Value`] trees.
*/

use std::collections::BTreeMap;
use std::fmt;

use crate::errors::CoercionError;

/// A dynamically typed value: a field default, a stored constant, a raw
/// parse result, or a node of the final structured result.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The explicit "no value" marker, as stored by an inverted choice flag.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Truthiness, used by the boolean handler to decide flag inversion.
    /// `Null`, `false`, zero, and empty containers are falsy; everything
    /// else is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(entries) => !entries.is_empty(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_map(self) -> Option<BTreeMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /**
    Parse a textual literal data structure, such as `{"x": 1, "y": [2, 3]}`,
    into a [`Value`].

    The accepted grammar is the JSON value grammar (maps, lists, numbers,
    strings, booleans, null); no code is ever evaluated. This is how the
    mapping handler coerces its raw string argument.
    */
    pub fn from_literal(text: &str) -> Result<Self, CoercionError> {
        let parsed: serde_json::Value =
            serde_json::from_str(text).map_err(|source| CoercionError::InvalidLiteral {
                text: text.to_owned(),
                source,
            })?;

        Ok(Self::from_json(parsed))
    }

    fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(n) => Value::Int(n),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Self::from_json).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from_json(value)))
                    .collect(),
            ),
        }
    }
}

/**
The rendered text of a value: the spelling a user would type on the command
line to select it. Literal choice tables and `(default: …)` help suffixes
are built from this rendering, so scalars render bare (`2`, `fast`, `true`)
rather than quoted.
*/
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}
