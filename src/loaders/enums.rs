use crate::error::LoadError;
use crate::loaders::TypeLoader;
use crate::registry::ConfigRegistry;
use crate::types::AnnotatedType;
use crate::value::{LoadedValue, RawValue};

/// Shared fallback loader for every [`ConfigEnum`](crate::ConfigEnum).
///
/// One instance serves all enum types: construction goes through the
/// [`EnumBinding`](crate::types::EnumBinding) the declaration carries, so
/// the loader itself holds no per-enum state. It only runs for enum types
/// with no explicitly registered loader.
pub struct EnumLoader;

impl TypeLoader for EnumLoader {
    fn load(
        &self,
        ty: &AnnotatedType,
        value: RawValue,
        _registry: &ConfigRegistry,
    ) -> Result<LoadedValue, LoadError> {
        let binding = ty
            .declared()
            .enum_binding()
            .ok_or_else(|| LoadError::no_loader(ty.declared()))?;
        match value {
            RawValue::Str(name) => {
                (binding.construct)(&name).ok_or_else(|| LoadError::UnknownVariant {
                    ty: ty.declared().to_string(),
                    variant: name,
                })
            }
            other => Err(LoadError::mismatch(ty.declared(), "string", &other)),
        }
    }
}
