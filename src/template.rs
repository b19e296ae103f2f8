use crate::config::Configuration;
use crate::error::LoadError;
use crate::types::{AnnotatedType, Marker};
use crate::value::{FromLoaded, LoadedValue, RawValue};

/// A caller-defined target shape populated from a configuration source.
///
/// Templates own their fields; the engine mutates the instance handed to
/// [`ConfigRegistry::load`](crate::ConfigRegistry::load) and returns that
/// same instance, never a copy. Nesting is expressed by declaring a field
/// whose type was registered through
/// [`register_template`](crate::ConfigRegistry::register_template).
pub trait ConfigTemplate {
    /// Field bindings in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>>;

    /// Post-population semantic check; overriding this declares a
    /// validation contract. Runs once, on the fully-assembled top-level
    /// object.
    fn validate(&self) -> bool {
        true
    }
}

/// Type-erased assignment target for one field.
///
/// Blanket-implemented for every [`FromLoaded`] type, so fields erase to
/// `&mut dyn LoadedSink` without per-template glue.
pub trait LoadedSink {
    fn assign(&mut self, value: LoadedValue) -> Result<(), LoadError>;
}

impl<T: FromLoaded> LoadedSink for T {
    fn assign(&mut self, value: LoadedValue) -> Result<(), LoadError> {
        *self = T::from_loaded(value)?;
        Ok(())
    }
}

/// Binding between one configuration key and one template field.
pub struct Field<'a> {
    key: &'static str,
    ty: AnnotatedType,
    required: bool,
    sink: &'a mut dyn LoadedSink,
}

impl<'a> Field<'a> {
    /// A field that must be present in the configuration source.
    pub fn required<T: FromLoaded>(
        key: &'static str,
        ty: impl Into<AnnotatedType>,
        slot: &'a mut T,
    ) -> Self {
        Self {
            key,
            ty: ty.into(),
            required: true,
            sink: slot,
        }
    }

    /// A field that keeps the template's current value when absent.
    pub fn optional<T: FromLoaded>(
        key: &'static str,
        ty: impl Into<AnnotatedType>,
        slot: &'a mut T,
    ) -> Self {
        Self {
            key,
            ty: ty.into(),
            required: false,
            sink: slot,
        }
    }

    /// Attach a marker to the field's declared type.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.ty = self.ty.with_marker(marker);
        self
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn ty(&self) -> &AnnotatedType {
        &self.ty
    }
}

/// Populate a template from a configuration source, dispatching each field's
/// raw value through the supplied callback.
///
/// This is the per-field walk the registry hands its own
/// [`load_type`](crate::ConfigRegistry::load_type) to — both at the top
/// level and, through the object-template loader, at every nesting depth.
/// The first failure aborts the walk; there is no partial-result delivery.
pub fn populate<T, D>(
    mut template: T,
    source: &dyn Configuration,
    mut dispatch: D,
) -> Result<T, LoadError>
where
    T: ConfigTemplate,
    D: FnMut(&AnnotatedType, RawValue) -> Result<LoadedValue, LoadError>,
{
    for field in template.fields() {
        match source.get(field.key) {
            Some(raw) => {
                let loaded =
                    dispatch(&field.ty, raw.clone()).map_err(|err| err.in_field(field.key))?;
                field
                    .sink
                    .assign(loaded)
                    .map_err(|err| err.in_field(field.key))?;
            }
            None if field.required => return Err(LoadError::missing_field(field.key)),
            None => {}
        }
    }
    Ok(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfiguration;
    use crate::types::{DeclaredType, TypeKey};

    #[derive(Default, Debug)]
    struct Sample {
        name: String,
        retries: Option<i32>,
    }

    impl ConfigTemplate for Sample {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::required("name", DeclaredType::simple(TypeKey::STR), &mut self.name),
                Field::optional(
                    "retries",
                    DeclaredType::simple(TypeKey::I32),
                    &mut self.retries,
                ),
            ]
        }
    }

    fn stub_dispatch(ty: &AnnotatedType, value: RawValue) -> Result<LoadedValue, LoadError> {
        match value {
            RawValue::Str(s) => Ok(LoadedValue::Str(s)),
            RawValue::Int(n) => Ok(LoadedValue::I32(n as i32)),
            other => Err(LoadError::mismatch(ty.declared(), "scalar", &other)),
        }
    }

    #[test]
    fn missing_required_field_fails() {
        let source = MapConfiguration::from_json("t", serde_json::json!({})).unwrap();
        let err = populate(Sample::default(), &source, stub_dispatch).unwrap_err();
        assert!(matches!(err, LoadError::MissingField { field } if field == "name"));
    }

    #[test]
    fn missing_optional_field_keeps_default() {
        let source = MapConfiguration::from_json("t", serde_json::json!({"name": "x"})).unwrap();
        let sample = populate(Sample::default(), &source, stub_dispatch).unwrap();
        assert_eq!(sample.name, "x");
        assert_eq!(sample.retries, None);
    }

    #[test]
    fn dispatch_failure_names_the_field() {
        let source =
            MapConfiguration::from_json("t", serde_json::json!({"name": [1, 2]})).unwrap();
        let err = populate(Sample::default(), &source, stub_dispatch).unwrap_err();
        assert!(matches!(err, LoadError::Field { field, .. } if field == "name"));
    }
}
