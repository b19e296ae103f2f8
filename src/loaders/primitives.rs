use crate::error::LoadError;
use crate::loaders::TypeLoader;
use crate::registry::ConfigRegistry;
use crate::types::AnnotatedType;
use crate::value::{LoadedValue, RawValue};

macro_rules! int_loaders {
    ($($loader:ident => $variant:ident, $ty:ty;)+) => {$(
        pub struct $loader;

        impl TypeLoader for $loader {
            fn load(
                &self,
                ty: &AnnotatedType,
                value: RawValue,
                _registry: &ConfigRegistry,
            ) -> Result<LoadedValue, LoadError> {
                match value {
                    RawValue::Int(n) => {
                        <$ty>::try_from(n).map(LoadedValue::$variant).map_err(|_| {
                            LoadError::OutOfRange {
                                ty: ty.declared().to_string(),
                                value: n.to_string(),
                            }
                        })
                    }
                    other => Err(LoadError::mismatch(ty.declared(), "integer", &other)),
                }
            }
        }
    )+};
}

int_loaders! {
    I8Loader => I8, i8;
    I16Loader => I16, i16;
    I32Loader => I32, i32;
    I64Loader => I64, i64;
    U8Loader => U8, u8;
    U16Loader => U16, u16;
    U32Loader => U32, u32;
    U64Loader => U64, u64;
}

pub struct BoolLoader;

impl TypeLoader for BoolLoader {
    fn load(
        &self,
        ty: &AnnotatedType,
        value: RawValue,
        _registry: &ConfigRegistry,
    ) -> Result<LoadedValue, LoadError> {
        match value {
            RawValue::Bool(value) => Ok(LoadedValue::Bool(value)),
            other => Err(LoadError::mismatch(ty.declared(), "boolean", &other)),
        }
    }
}

pub struct F32Loader;

impl TypeLoader for F32Loader {
    fn load(
        &self,
        ty: &AnnotatedType,
        value: RawValue,
        _registry: &ConfigRegistry,
    ) -> Result<LoadedValue, LoadError> {
        match value {
            RawValue::Float(value) => Ok(LoadedValue::F32(value as f32)),
            RawValue::Int(value) => Ok(LoadedValue::F32(value as f32)),
            other => Err(LoadError::mismatch(ty.declared(), "number", &other)),
        }
    }
}

pub struct F64Loader;

impl TypeLoader for F64Loader {
    fn load(
        &self,
        ty: &AnnotatedType,
        value: RawValue,
        _registry: &ConfigRegistry,
    ) -> Result<LoadedValue, LoadError> {
        match value {
            RawValue::Float(value) => Ok(LoadedValue::F64(value)),
            RawValue::Int(value) => Ok(LoadedValue::F64(value as f64)),
            other => Err(LoadError::mismatch(ty.declared(), "number", &other)),
        }
    }
}

pub struct CharLoader;

impl TypeLoader for CharLoader {
    fn load(
        &self,
        ty: &AnnotatedType,
        value: RawValue,
        _registry: &ConfigRegistry,
    ) -> Result<LoadedValue, LoadError> {
        match value {
            RawValue::Str(value) => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(LoadedValue::Char(c)),
                    _ => Err(LoadError::custom(format!(
                        "expected a single character for type {}, found \"{value}\"",
                        ty.declared()
                    ))),
                }
            }
            other => Err(LoadError::mismatch(ty.declared(), "string", &other)),
        }
    }
}

/// Strings accept any scalar, stringified.
pub struct StringLoader;

impl TypeLoader for StringLoader {
    fn load(
        &self,
        ty: &AnnotatedType,
        value: RawValue,
        _registry: &ConfigRegistry,
    ) -> Result<LoadedValue, LoadError> {
        match value {
            RawValue::Str(value) => Ok(LoadedValue::Str(value)),
            RawValue::Bool(value) => Ok(LoadedValue::Str(value.to_string())),
            RawValue::Int(value) => Ok(LoadedValue::Str(value.to_string())),
            RawValue::Float(value) => Ok(LoadedValue::Str(value.to_string())),
            other => Err(LoadError::mismatch(ty.declared(), "scalar", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeclaredType, TypeKey};

    fn annotated(key: TypeKey) -> AnnotatedType {
        AnnotatedType::new(DeclaredType::simple(key))
    }

    #[test]
    fn integer_range_is_enforced() {
        let registry = ConfigRegistry::new();
        let err = U8Loader
            .load(&annotated(TypeKey::U8), RawValue::Int(-1), &registry)
            .unwrap_err();
        assert!(matches!(err, LoadError::OutOfRange { .. }));
    }

    #[test]
    fn char_requires_exactly_one_character() {
        let registry = ConfigRegistry::new();
        let ok = CharLoader
            .load(&annotated(TypeKey::CHAR), RawValue::from("x"), &registry)
            .unwrap();
        assert!(matches!(ok, LoadedValue::Char('x')));
        assert!(
            CharLoader
                .load(&annotated(TypeKey::CHAR), RawValue::from("xy"), &registry)
                .is_err()
        );
    }

    #[test]
    fn string_stringifies_scalars_only() {
        let registry = ConfigRegistry::new();
        let loaded = StringLoader
            .load(&annotated(TypeKey::STR), RawValue::Int(42), &registry)
            .unwrap();
        assert!(matches!(loaded, LoadedValue::Str(s) if s == "42"));
        assert!(
            StringLoader
                .load(&annotated(TypeKey::STR), RawValue::Seq(vec![]), &registry)
                .is_err()
        );
    }
}
