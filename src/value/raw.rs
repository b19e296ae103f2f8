use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Untyped value drawn from a parsed configuration tree.
///
/// This is the engine's input currency: whatever parser produced the
/// configuration (YAML, JSON, TOML, ...) reduces to scalars, sequences, and
/// string-keyed mappings. Mapping keys are unique and iteration preserves
/// insertion order.
///
/// The untagged serde representation means any self-describing format can
/// deserialize straight into a `RawValue`; conversions from already-parsed
/// `serde_json` and `toml` trees are provided below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<RawValue>),
    Map(IndexMap<String, RawValue>),
}

impl RawValue {
    /// Shape name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Seq(_) => "sequence",
            Self::Map(_) => "mapping",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[RawValue]> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, RawValue>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<RawValue>> for RawValue {
    fn from(items: Vec<RawValue>) -> Self {
        Self::Seq(items)
    }
}

impl From<IndexMap<String, RawValue>> for RawValue {
    fn from(entries: IndexMap<String, RawValue>) -> Self {
        Self::Map(entries)
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Bool(value),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(value) => Self::Int(value),
                // Large u64s and fractions both land here.
                None => Self::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(value) => Self::Str(value),
            serde_json::Value::Array(items) => {
                Self::Seq(items.into_iter().map(RawValue::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, RawValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<toml::Value> for RawValue {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::Boolean(value) => Self::Bool(value),
            toml::Value::Integer(value) => Self::Int(value),
            toml::Value::Float(value) => Self::Float(value),
            toml::Value::String(value) => Self::Str(value),
            toml::Value::Datetime(value) => Self::Str(value.to_string()),
            toml::Value::Array(items) => {
                Self::Seq(items.into_iter().map(RawValue::from).collect())
            }
            toml::Value::Table(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, RawValue::from(value)))
                    .collect(),
            ),
        }
    }
}
