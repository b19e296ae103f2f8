use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;

/// Identifier a preprocessor chain is registered under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerKey(Cow<'static, str>);

impl MarkerKey {
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarkerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for MarkerKey {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for MarkerKey {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

/// A marker attached to a template field, triggering any preprocessors
/// registered under its key.
///
/// Parameters are free-form string pairs the preprocessor may consult.
/// A marker whose key has no registered preprocessor is inert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    key: MarkerKey,
    params: IndexMap<String, String>,
}

impl Marker {
    pub fn new(key: impl Into<MarkerKey>) -> Self {
        Self {
            key: key.into(),
            params: IndexMap::new(),
        }
    }

    /// Attach a parameter, returning the marker for chaining.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn key(&self) -> &MarkerKey {
        &self.key
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}
