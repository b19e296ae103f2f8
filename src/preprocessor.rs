use crate::error::LoadError;
use crate::registry::ConfigRegistry;
use crate::types::{AnnotatedType, Marker};
use crate::value::RawValue;

/// Marker-triggered transformation applied to a raw value before type
/// loading.
///
/// Preprocessors registered under one marker key compose in registration
/// order, each consuming the previous one's output. The transformation must
/// be a pure function of the raw value; the shared registry reference allows
/// recursive loading of sub-values but not registry mutation.
pub trait ValuePreprocessor: Send + Sync {
    fn process(
        &self,
        ty: &AnnotatedType,
        value: RawValue,
        registry: &ConfigRegistry,
        marker: &Marker,
    ) -> Result<RawValue, LoadError>;
}

impl<F> ValuePreprocessor for F
where
    F: Fn(&AnnotatedType, RawValue, &ConfigRegistry, &Marker) -> Result<RawValue, LoadError>
        + Send
        + Sync,
{
    fn process(
        &self,
        ty: &AnnotatedType,
        value: RawValue,
        registry: &ConfigRegistry,
        marker: &Marker,
    ) -> Result<RawValue, LoadError> {
        self(ty, value, registry, marker)
    }
}
