use indexmap::IndexMap;

use crate::error::LoadError;
use crate::loaders::TypeLoader;
use crate::registry::ConfigRegistry;
use crate::types::{AnnotatedType, DeclaredType, TypeKey};
use crate::value::{LoadedValue, RawValue};

/// Element type for a container, falling back to plain strings when the
/// declaration carries no parameter.
fn param_type(ty: &AnnotatedType, index: usize) -> AnnotatedType {
    ty.declared()
        .param(index)
        .cloned()
        .map(AnnotatedType::new)
        .unwrap_or_else(|| AnnotatedType::new(DeclaredType::simple(TypeKey::STR)))
}

/// Loads sequences, one shared instance for every element type; the element
/// type comes from the declaration's first parameter and each element goes
/// back through dispatch.
pub struct ListLoader;

impl TypeLoader for ListLoader {
    fn load(
        &self,
        ty: &AnnotatedType,
        value: RawValue,
        registry: &ConfigRegistry,
    ) -> Result<LoadedValue, LoadError> {
        match value {
            RawValue::Seq(items) => {
                let element = param_type(ty, 0);
                items
                    .into_iter()
                    .map(|item| registry.load_type(&element, item))
                    .collect::<Result<Vec<_>, _>>()
                    .map(LoadedValue::Seq)
            }
            other => Err(LoadError::mismatch(ty.declared(), "sequence", &other)),
        }
    }
}

/// Same walk as [`ListLoader`]; uniqueness is applied by the receiving
/// collection at assignment.
pub struct SetLoader;

impl TypeLoader for SetLoader {
    fn load(
        &self,
        ty: &AnnotatedType,
        value: RawValue,
        registry: &ConfigRegistry,
    ) -> Result<LoadedValue, LoadError> {
        match value {
            RawValue::Seq(items) => {
                let element = param_type(ty, 0);
                items
                    .into_iter()
                    .map(|item| registry.load_type(&element, item))
                    .collect::<Result<Vec<_>, _>>()
                    .map(LoadedValue::Seq)
            }
            other => Err(LoadError::mismatch(ty.declared(), "sequence", &other)),
        }
    }
}

/// Loads string-keyed mappings; the value type comes from the declaration's
/// first parameter. Entry order is preserved.
pub struct MapLoader;

impl TypeLoader for MapLoader {
    fn load(
        &self,
        ty: &AnnotatedType,
        value: RawValue,
        registry: &ConfigRegistry,
    ) -> Result<LoadedValue, LoadError> {
        match value {
            RawValue::Map(entries) => {
                let value_type = param_type(ty, 0);
                entries
                    .into_iter()
                    .map(|(key, value)| Ok((key, registry.load_type(&value_type, value)?)))
                    .collect::<Result<IndexMap<_, _>, LoadError>>()
                    .map(LoadedValue::Map)
            }
            other => Err(LoadError::mismatch(ty.declared(), "mapping", &other)),
        }
    }
}
