//! Materialize typed objects from loosely-typed configuration trees.
//!
//! A [`ConfigRegistry`] owns a table of pluggable [`TypeLoader`]s keyed by
//! [`DeclaredType`] and dispatches each template field's raw value through a
//! fixed resolution order: exact declared type, raw type for parameterized
//! declarations, then a shared enum fallback. Marker-driven
//! [`ValuePreprocessor`]s rewrite raw values before loading, and nested
//! templates recurse through the same dispatch entry point, so arbitrarily
//! deep configuration graphs get uniform treatment and localized failures.
//!
//! The engine parses nothing itself: feed it a [`Configuration`] built from
//! any already-parsed tree — [`RawValue`] converts from `serde_json` and
//! `toml` values and deserializes from any self-describing serde format.

pub mod config;
pub mod error;
pub mod loaders;
pub mod preprocessor;
pub mod registry;
pub mod template;
pub mod types;
pub mod value;

pub use config::{Configuration, MapConfiguration};
pub use error::{ConfigError, LoadError};
pub use loaders::{ObjectTemplateLoader, TypeLoader};
pub use preprocessor::ValuePreprocessor;
pub use registry::ConfigRegistry;
pub use template::{ConfigTemplate, Field, LoadedSink, populate};
pub use types::{AnnotatedType, ConfigEnum, DeclaredType, Marker, MarkerKey, TypeKey};
pub use value::{DynObject, FromLoaded, LoadedValue, RawValue};
