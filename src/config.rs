use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::LoadError;
use crate::value::RawValue;

/// A named, read-only source of raw values.
///
/// The engine never owns a configuration's lifecycle; it reads values by key
/// during a single load and uses the name for diagnostics only.
pub trait Configuration: Send + Sync {
    /// Diagnostic name of this source.
    fn name(&self) -> &str;

    /// Raw value stored under `key`, if present.
    fn get(&self, key: &str) -> Option<&RawValue>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// In-memory [`Configuration`] over an ordered key/value mapping.
///
/// This is the seam every parser feeds: hand it an already-parsed tree —
/// via [`from_value`](Self::from_value), the `serde_json`/`toml`
/// conversions on [`RawValue`], or serde deserialization — and the engine
/// takes it from there.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct MapConfiguration {
    #[serde(skip)]
    name: String,
    values: IndexMap<String, RawValue>,
}

impl MapConfiguration {
    pub fn new(name: impl Into<String>, values: IndexMap<String, RawValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Build from any raw value, requiring a mapping at the top level.
    pub fn from_value(name: impl Into<String>, value: RawValue) -> Result<Self, LoadError> {
        match value {
            RawValue::Map(values) => Ok(Self::new(name, values)),
            other => Err(LoadError::custom(format!(
                "configuration root must be a mapping, found {}",
                other.kind()
            ))),
        }
    }

    /// Build from a parsed JSON document.
    pub fn from_json(name: impl Into<String>, value: serde_json::Value) -> Result<Self, LoadError> {
        Self::from_value(name, RawValue::from(value))
    }

    /// Build from a parsed TOML document.
    pub fn from_toml(name: impl Into<String>, value: toml::Value) -> Result<Self, LoadError> {
        Self::from_value(name, RawValue::from(value))
    }

    /// Rename the source, for diagnostics.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn values(&self) -> &IndexMap<String, RawValue> {
        &self.values
    }
}

impl Configuration for MapConfiguration {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Option<&RawValue> {
        self.values.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_value_requires_mapping() {
        let err = MapConfiguration::from_value("bad", RawValue::Int(1)).unwrap_err();
        assert!(matches!(err, LoadError::Custom(_)));
    }

    #[test]
    fn json_document_round_trips_by_key() {
        let config =
            MapConfiguration::from_json("app", serde_json::json!({"debug": true})).unwrap();
        assert_eq!(config.name(), "app");
        assert_eq!(config.get("debug"), Some(&RawValue::Bool(true)));
        assert!(!config.contains("missing"));
    }

    #[test]
    fn yaml_deserializes_transparently() {
        let config: MapConfiguration = serde_yaml::from_str("a: 1\nb: two\n").unwrap();
        let config = config.with_name("inline");
        assert_eq!(config.get("a"), Some(&RawValue::Int(1)));
        assert_eq!(config.get("b"), Some(&RawValue::from("two")));
    }
}
