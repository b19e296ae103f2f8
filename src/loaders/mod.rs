//! The [`TypeLoader`] contract and the default loader set registered by
//! [`ConfigRegistry::new`](crate::ConfigRegistry::new).

mod containers;
mod duration;
mod enums;
mod object;
mod primitives;

pub use containers::{ListLoader, MapLoader, SetLoader};
pub use duration::DurationLoader;
pub use enums::EnumLoader;
pub use object::ObjectTemplateLoader;
pub use primitives::{
    BoolLoader, CharLoader, F32Loader, F64Loader, I8Loader, I16Loader, I32Loader, I64Loader,
    StringLoader, U8Loader, U16Loader, U32Loader, U64Loader,
};

use crate::error::LoadError;
use crate::registry::ConfigRegistry;
use crate::types::AnnotatedType;
use crate::value::{LoadedValue, RawValue};

/// Single-purpose converter from a raw value to one declared type.
///
/// Loaders receive the full annotated type — a loader registered under a raw
/// container key still sees the type parameters — and the registry, through
/// which container and template loaders recurse. Registration accepts any
/// implementor, including plain closures of the same shape; nothing checks
/// up front that a loader can handle every value it will be given, so
/// failures surface at load time as [`LoadError`]s.
pub trait TypeLoader: Send + Sync {
    fn load(
        &self,
        ty: &AnnotatedType,
        value: RawValue,
        registry: &ConfigRegistry,
    ) -> Result<LoadedValue, LoadError>;
}

impl<F> TypeLoader for F
where
    F: Fn(&AnnotatedType, RawValue, &ConfigRegistry) -> Result<LoadedValue, LoadError>
        + Send
        + Sync,
{
    fn load(
        &self,
        ty: &AnnotatedType,
        value: RawValue,
        registry: &ConfigRegistry,
    ) -> Result<LoadedValue, LoadError> {
        self(ty, value, registry)
    }
}
