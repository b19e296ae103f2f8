use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::time::Duration;

use indexmap::IndexMap;

use crate::error::LoadError;
use crate::value::LoadedValue;

/// Conversion from a dispatched [`LoadedValue`] into a concrete field type.
///
/// Template fields are typed through this trait: the engine assigns whatever
/// the resolved loader produced, and the conversion rejects anything not
/// assignable. Custom and nested-template types implement it in one line via
/// [`LoadedValue::into_object`].
pub trait FromLoaded: Sized {
    fn from_loaded(value: LoadedValue) -> Result<Self, LoadError>;
}

macro_rules! impl_from_loaded_int {
    ($($ty:ty => $name:literal),+ $(,)?) => {$(
        impl FromLoaded for $ty {
            fn from_loaded(value: LoadedValue) -> Result<Self, LoadError> {
                let Some(n) = value.as_integer() else {
                    return Err(LoadError::Conversion {
                        expected: $name,
                        found: value.kind(),
                    });
                };
                <$ty>::try_from(n).map_err(|_| LoadError::OutOfRange {
                    ty: $name.to_string(),
                    value: n.to_string(),
                })
            }
        }
    )+};
}

impl_from_loaded_int! {
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
}

impl FromLoaded for bool {
    fn from_loaded(value: LoadedValue) -> Result<Self, LoadError> {
        match value {
            LoadedValue::Bool(value) => Ok(value),
            other => Err(LoadError::Conversion {
                expected: "boolean",
                found: other.kind(),
            }),
        }
    }
}

impl FromLoaded for f32 {
    fn from_loaded(value: LoadedValue) -> Result<Self, LoadError> {
        match value {
            LoadedValue::F32(value) => Ok(value),
            LoadedValue::F64(value) => Ok(value as f32),
            other => Err(LoadError::Conversion {
                expected: "f32",
                found: other.kind(),
            }),
        }
    }
}

impl FromLoaded for f64 {
    fn from_loaded(value: LoadedValue) -> Result<Self, LoadError> {
        match value {
            LoadedValue::F32(value) => Ok(value.into()),
            LoadedValue::F64(value) => Ok(value),
            other => Err(LoadError::Conversion {
                expected: "f64",
                found: other.kind(),
            }),
        }
    }
}

impl FromLoaded for char {
    fn from_loaded(value: LoadedValue) -> Result<Self, LoadError> {
        match value {
            LoadedValue::Char(value) => Ok(value),
            other => Err(LoadError::Conversion {
                expected: "char",
                found: other.kind(),
            }),
        }
    }
}

impl FromLoaded for String {
    fn from_loaded(value: LoadedValue) -> Result<Self, LoadError> {
        match value {
            LoadedValue::Str(value) => Ok(value),
            other => Err(LoadError::Conversion {
                expected: "string",
                found: other.kind(),
            }),
        }
    }
}

impl FromLoaded for Duration {
    fn from_loaded(value: LoadedValue) -> Result<Self, LoadError> {
        match value {
            LoadedValue::Duration(value) => Ok(value),
            other => Err(LoadError::Conversion {
                expected: "duration",
                found: other.kind(),
            }),
        }
    }
}

impl<T: FromLoaded> FromLoaded for Vec<T> {
    fn from_loaded(value: LoadedValue) -> Result<Self, LoadError> {
        match value {
            LoadedValue::Seq(items) => items.into_iter().map(T::from_loaded).collect(),
            other => Err(LoadError::Conversion {
                expected: "sequence",
                found: other.kind(),
            }),
        }
    }
}

impl<T: FromLoaded + Eq + Hash> FromLoaded for HashSet<T> {
    fn from_loaded(value: LoadedValue) -> Result<Self, LoadError> {
        match value {
            LoadedValue::Seq(items) => items.into_iter().map(T::from_loaded).collect(),
            other => Err(LoadError::Conversion {
                expected: "sequence",
                found: other.kind(),
            }),
        }
    }
}

impl<T: FromLoaded> FromLoaded for HashMap<String, T> {
    fn from_loaded(value: LoadedValue) -> Result<Self, LoadError> {
        match value {
            LoadedValue::Map(entries) => entries
                .into_iter()
                .map(|(key, value)| Ok((key, T::from_loaded(value)?)))
                .collect(),
            other => Err(LoadError::Conversion {
                expected: "mapping",
                found: other.kind(),
            }),
        }
    }
}

impl<T: FromLoaded> FromLoaded for IndexMap<String, T> {
    fn from_loaded(value: LoadedValue) -> Result<Self, LoadError> {
        match value {
            LoadedValue::Map(entries) => entries
                .into_iter()
                .map(|(key, value)| Ok((key, T::from_loaded(value)?)))
                .collect(),
            other => Err(LoadError::Conversion {
                expected: "mapping",
                found: other.kind(),
            }),
        }
    }
}

/// Presence of a value yields `Some`; absent optional fields are simply
/// never assigned.
impl<T: FromLoaded> FromLoaded for Option<T> {
    fn from_loaded(value: LoadedValue) -> Result<Self, LoadError> {
        T::from_loaded(value).map(Some)
    }
}
