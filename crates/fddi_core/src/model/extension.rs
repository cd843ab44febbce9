//! Open extension bag attached to every record.
//!
//! # Responsibility
//! - Carry forward-compatible, schema-less key/value data next to typed fields.
//! - Keep the value space closed so encoding stays total and type-safe.
//!
//! # Invariants
//! - Keys are ordered (`BTreeMap`), so the encoded form is deterministic.
//! - Float values must be finite to be representable in JSON.

use super::validation::RecordValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extension mapping carried by every record.
pub type Extensions = BTreeMap<String, ExtensionValue>;

/// One untyped extension value.
///
/// Serialized without a tag, so the JSON form is the plain JSON value.
/// Variant order matters for decoding: integers are tried before floats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtensionValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<ExtensionValue>),
    Map(BTreeMap<String, ExtensionValue>),
}

impl ExtensionValue {
    /// Returns whether this value (and everything nested in it) can be
    /// written as JSON.
    pub fn is_representable(&self) -> bool {
        match self {
            Self::Float(value) => value.is_finite(),
            Self::List(items) => items.iter().all(Self::is_representable),
            Self::Map(entries) => entries.values().all(Self::is_representable),
            Self::Null | Self::Bool(_) | Self::Integer(_) | Self::String(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

impl From<bool> for ExtensionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ExtensionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ExtensionValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ExtensionValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ExtensionValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<ExtensionValue>> From<Vec<T>> for ExtensionValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// Rejects extension bags holding values JSON cannot express.
///
/// The reported key is a dotted path to the first offending value, with list
/// positions in brackets (e.g. `metrics.samples[2]`).
pub(crate) fn check_extensions(extensions: &Extensions) -> Result<(), RecordValidationError> {
    for (key, value) in extensions {
        if let Some(path) = first_unrepresentable(key.clone(), value) {
            return Err(RecordValidationError::NonFiniteNumber { key: path });
        }
    }
    Ok(())
}

fn first_unrepresentable(path: String, value: &ExtensionValue) -> Option<String> {
    match value {
        ExtensionValue::Float(number) if !number.is_finite() => Some(path),
        ExtensionValue::List(items) => items
            .iter()
            .enumerate()
            .find_map(|(index, item)| first_unrepresentable(format!("{path}[{index}]"), item)),
        ExtensionValue::Map(entries) => entries
            .iter()
            .find_map(|(key, item)| first_unrepresentable(format!("{path}.{key}"), item)),
        _ => None,
    }
}
