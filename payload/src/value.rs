//! Runtime value tree shared by codec and command stages.
//!
//! A [`Value`] is the one shape every plugin must honor: a scalar string, an
//! ordered sequence, or an ordered mapping with unique keys. Mappings keep
//! their entries as pairs so that insertion order survives every transform.

use crate::error::{DispatchError, DispatchResult};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Scalar(String),
    Sequence(Vec<Value>),
    Mapping(Vec<(Value, Value)>),
}

impl Value {
    pub fn scalar(s: impl Into<String>) -> Self {
        Value::Scalar(s.into())
    }

    pub fn sequence(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Sequence(items.into_iter().collect())
    }

    pub fn mapping(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Mapping(entries.into_iter().collect())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// True for the shapes the codec engine recurses into.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Sequence(_) | Value::Mapping(_))
    }

    /// Looks up a mapping entry by scalar key. `None` for non-mappings and
    /// missing keys.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| k.as_scalar() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Converts a JSON document into a value tree. Scalars absorb every JSON
    /// primitive in its textual form; object key order is preserved.
    pub fn from_json(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Scalar(String::new()),
            serde_json::Value::Bool(b) => Value::Scalar(b.to_string()),
            serde_json::Value::Number(n) => Value::Scalar(n.to_string()),
            serde_json::Value::String(s) => Value::Scalar(s.clone()),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Mapping(
                map.iter()
                    .map(|(k, v)| (Value::Scalar(k.clone()), Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Converts a value tree into JSON. Fails on mapping keys that are not
    /// scalars, since JSON object keys must be strings.
    pub fn to_json(&self) -> DispatchResult<serde_json::Value> {
        match self {
            Value::Scalar(s) => Ok(serde_json::Value::String(s.clone())),
            Value::Sequence(items) => {
                let array: DispatchResult<Vec<_>> = items.iter().map(Value::to_json).collect();
                Ok(serde_json::Value::Array(array?))
            }
            Value::Mapping(entries) => {
                let mut object = serde_json::Map::new();
                for (key, value) in entries {
                    let key = key.as_scalar().ok_or_else(|| {
                        DispatchError::MalformedValue(format!(
                            "mapping key must be a scalar, got {}",
                            key.type_name()
                        ))
                    })?;
                    object.insert(key.to_string(), value.to_json()?);
                }
                Ok(serde_json::Value::Object(object))
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => write!(f, "\"{}\"", s),
            Value::Sequence(items) => {
                let rendered: Vec<String> = items.iter().map(|i| i.to_string()).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            Value::Mapping(entries) => {
                let rendered: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}
