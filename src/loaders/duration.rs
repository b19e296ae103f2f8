use std::time::Duration;

use crate::error::LoadError;
use crate::loaders::TypeLoader;
use crate::registry::ConfigRegistry;
use crate::types::AnnotatedType;
use crate::value::{LoadedValue, RawValue};

/// Loads durations from an integer number of whole seconds or a
/// human-readable string such as `"150ms"` or `"2h 30m"`.
pub struct DurationLoader;

impl TypeLoader for DurationLoader {
    fn load(
        &self,
        ty: &AnnotatedType,
        value: RawValue,
        _registry: &ConfigRegistry,
    ) -> Result<LoadedValue, LoadError> {
        match value {
            RawValue::Int(seconds) => u64::try_from(seconds)
                .map(|seconds| LoadedValue::Duration(Duration::from_secs(seconds)))
                .map_err(|_| LoadError::OutOfRange {
                    ty: ty.declared().to_string(),
                    value: seconds.to_string(),
                }),
            RawValue::Str(text) => humantime::parse_duration(&text)
                .map(LoadedValue::Duration)
                .map_err(|err| LoadError::wrapped(ty.declared(), err)),
            other => Err(LoadError::mismatch(
                ty.declared(),
                "integer seconds or duration string",
                &other,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeclaredType, TypeKey};

    fn annotated() -> AnnotatedType {
        AnnotatedType::new(DeclaredType::simple(TypeKey::DURATION))
    }

    #[test]
    fn integer_means_whole_seconds() {
        let registry = ConfigRegistry::new();
        let loaded = DurationLoader
            .load(&annotated(), RawValue::Int(90), &registry)
            .unwrap();
        assert!(matches!(loaded, LoadedValue::Duration(d) if d == Duration::from_secs(90)));
    }

    #[test]
    fn string_parses_human_readable_forms() {
        let registry = ConfigRegistry::new();
        let loaded = DurationLoader
            .load(&annotated(), RawValue::from("150ms"), &registry)
            .unwrap();
        assert!(matches!(loaded, LoadedValue::Duration(d) if d == Duration::from_millis(150)));
    }

    #[test]
    fn negative_seconds_and_garbage_strings_fail() {
        let registry = ConfigRegistry::new();
        assert!(matches!(
            DurationLoader
                .load(&annotated(), RawValue::Int(-1), &registry)
                .unwrap_err(),
            LoadError::OutOfRange { .. }
        ));
        assert!(matches!(
            DurationLoader
                .load(&annotated(), RawValue::from("soon"), &registry)
                .unwrap_err(),
            LoadError::Wrapped { .. }
        ));
    }
}
