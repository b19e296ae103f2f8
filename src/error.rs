use thiserror::Error;

use crate::types::DeclaredType;
use crate::value::RawValue;

/// Errors raised while converting a single raw value into its declared type.
///
/// Every fallible step of dispatch — loader resolution, preprocessing, the
/// loader itself, and the final assignment onto a template field — reports
/// through this type, so callers have one failure surface to match on.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No loader is registered for the declared type and it is not an enum.
    #[error("no loader registered for type {ty}")]
    NoLoader { ty: String },

    /// A required field has no value in the configuration source.
    #[error("missing value for required field '{field}'")]
    MissingField { field: String },

    /// The raw value's shape does not match what the declared type's loader accepts.
    #[error("expected {expected} for type {ty}, found {found}")]
    Mismatch {
        ty: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A numeric raw value does not fit the declared integer type.
    #[error("value out of range for type {ty}: {value}")]
    OutOfRange { ty: String, value: String },

    /// A string raw value names no variant of the declared enum.
    #[error("unknown variant '{variant}' for enum {ty}")]
    UnknownVariant { ty: String, variant: String },

    /// A loaded value could not be converted into the concrete field type.
    #[error("cannot convert {found} into {expected}")]
    Conversion {
        expected: &'static str,
        found: &'static str,
    },

    /// Failure while loading a named field, wrapping the underlying cause.
    ///
    /// Nested template loading stacks one of these per level, so a deep
    /// failure surfaces at the top call with its full field path intact.
    #[error("failed to load field '{field}'")]
    Field {
        field: String,
        #[source]
        source: Box<LoadError>,
    },

    /// Loader- or preprocessor-specific failure with a bare message.
    #[error("{0}")]
    Custom(String),

    /// A foreign error raised inside a loader, wrapped once at the loader
    /// boundary with its message and cause preserved.
    #[error("unexpected error while loading type {ty}: {message}")]
    Wrapped {
        ty: String,
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl LoadError {
    pub fn no_loader(ty: &DeclaredType) -> Self {
        Self::NoLoader { ty: ty.to_string() }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn mismatch(ty: &DeclaredType, expected: &'static str, found: &RawValue) -> Self {
        Self::Mismatch {
            ty: ty.to_string(),
            expected,
            found: found.kind(),
        }
    }

    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Wrap a foreign error raised while loading `ty`.
    pub fn wrapped(
        ty: &DeclaredType,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let source = source.into();
        Self::Wrapped {
            ty: ty.to_string(),
            message: source.to_string(),
            source,
        }
    }

    /// Attach the field name a failure occurred under.
    pub(crate) fn in_field(self, field: &str) -> Self {
        Self::Field {
            field: field.to_string(),
            source: Box::new(self),
        }
    }
}

/// Top-level failure of [`ConfigRegistry::load`](crate::ConfigRegistry::load).
///
/// Distinguishes a structural load failure from a semantic validation
/// failure: a validation failure means the object was fully assembled but
/// rejected by its own [`validate`](crate::ConfigTemplate::validate) hook.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("failed to validate configuration '{name}'")]
    Validation { name: String },
}
