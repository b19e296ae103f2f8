use std::any::Any;
use std::fmt;
use std::time::Duration;

use indexmap::IndexMap;

use crate::error::LoadError;

/// Boxed custom value produced by a loader, downcast at assignment time.
pub type DynObject = Box<dyn Any + Send + Sync>;

/// Strongly-typed result of dispatching one raw value.
///
/// Dispatch either produces one of these — assignable to the declared type —
/// or fails; it never hands back a partially-converted value. Custom types
/// and nested templates travel through the [`Object`](Self::Object) variant.
pub enum LoadedValue {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Char(char),
    Str(String),
    Duration(Duration),
    Seq(Vec<LoadedValue>),
    Map(IndexMap<String, LoadedValue>),
    Object(DynObject),
}

impl LoadedValue {
    /// Box a custom value.
    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        Self::Object(Box::new(value))
    }

    /// Take a custom value back out, failing with a conversion error when
    /// the variant or the boxed type does not match.
    pub fn into_object<T: Any>(self) -> Result<T, LoadError> {
        let expected = std::any::type_name::<T>();
        match self {
            Self::Object(object) => object
                .downcast::<T>()
                .map(|boxed| *boxed)
                .map_err(|_| LoadError::Conversion {
                    expected,
                    found: "object",
                }),
            other => Err(LoadError::Conversion {
                expected,
                found: other.kind(),
            }),
        }
    }

    /// Shape name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Char(_) => "char",
            Self::Str(_) => "string",
            Self::Duration(_) => "duration",
            Self::Seq(_) => "sequence",
            Self::Map(_) => "mapping",
            Self::Object(_) => "object",
        }
    }

    /// Widen any integer variant, for checked narrowing at assignment.
    pub fn as_integer(&self) -> Option<i128> {
        match *self {
            Self::I8(value) => Some(value.into()),
            Self::I16(value) => Some(value.into()),
            Self::I32(value) => Some(value.into()),
            Self::I64(value) => Some(value.into()),
            Self::U8(value) => Some(value.into()),
            Self::U16(value) => Some(value.into()),
            Self::U32(value) => Some(value.into()),
            Self::U64(value) => Some(value.into()),
            _ => None,
        }
    }
}

impl fmt::Debug for LoadedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Self::I8(value) => f.debug_tuple("I8").field(value).finish(),
            Self::I16(value) => f.debug_tuple("I16").field(value).finish(),
            Self::I32(value) => f.debug_tuple("I32").field(value).finish(),
            Self::I64(value) => f.debug_tuple("I64").field(value).finish(),
            Self::U8(value) => f.debug_tuple("U8").field(value).finish(),
            Self::U16(value) => f.debug_tuple("U16").field(value).finish(),
            Self::U32(value) => f.debug_tuple("U32").field(value).finish(),
            Self::U64(value) => f.debug_tuple("U64").field(value).finish(),
            Self::F32(value) => f.debug_tuple("F32").field(value).finish(),
            Self::F64(value) => f.debug_tuple("F64").field(value).finish(),
            Self::Char(value) => f.debug_tuple("Char").field(value).finish(),
            Self::Str(value) => f.debug_tuple("Str").field(value).finish(),
            Self::Duration(value) => f.debug_tuple("Duration").field(value).finish(),
            Self::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
            Self::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Self::Object(_) => f.write_str("Object(..)"),
        }
    }
}
