use std::any::Any;
use std::marker::PhantomData;

use crate::config::MapConfiguration;
use crate::error::LoadError;
use crate::loaders::TypeLoader;
use crate::registry::ConfigRegistry;
use crate::template::{ConfigTemplate, populate};
use crate::types::AnnotatedType;
use crate::value::{LoadedValue, RawValue};

/// The recursion point: a loader that populates a fresh nested template
/// instead of converting the raw value directly.
///
/// The raw mapping becomes a nested configuration and every field of the
/// fresh instance goes back through the registry's public dispatch entry
/// point, so nested fields get the identical preprocessor and resolution
/// treatment as top-level ones. Recursion depth is bounded by the declared
/// template graph, not by the data.
pub struct ObjectTemplateLoader<T, F> {
    provider: F,
    _template: PhantomData<fn() -> T>,
}

impl<T, F> ObjectTemplateLoader<T, F>
where
    T: ConfigTemplate,
    F: Fn() -> T,
{
    pub fn new(provider: F) -> Self {
        Self {
            provider,
            _template: PhantomData,
        }
    }
}

impl<T, F> TypeLoader for ObjectTemplateLoader<T, F>
where
    T: ConfigTemplate + Any + Send + Sync,
    F: Fn() -> T + Send + Sync,
{
    fn load(
        &self,
        ty: &AnnotatedType,
        value: RawValue,
        registry: &ConfigRegistry,
    ) -> Result<LoadedValue, LoadError> {
        let nested = match value {
            RawValue::Map(entries) => {
                MapConfiguration::new(ty.declared().key().as_str(), entries)
            }
            other => return Err(LoadError::mismatch(ty.declared(), "mapping", &other)),
        };
        let template = (self.provider)();
        let populated = populate(template, &nested, |field_ty, raw| {
            registry.load_type(field_ty, raw)
        })?;
        Ok(LoadedValue::object(populated))
    }
}
