use std::borrow::Cow;
use std::fmt;

/// Identifier a type loader is registered under.
///
/// Keys are plain values, cheap to clone and hash. The constants below cover
/// every type the registry bootstraps a loader for; custom types pick their
/// own names via [`TypeKey::named`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(Cow<'static, str>);

impl TypeKey {
    pub const BOOL: TypeKey = TypeKey::borrowed("bool");
    pub const I8: TypeKey = TypeKey::borrowed("i8");
    pub const I16: TypeKey = TypeKey::borrowed("i16");
    pub const I32: TypeKey = TypeKey::borrowed("i32");
    pub const I64: TypeKey = TypeKey::borrowed("i64");
    pub const U8: TypeKey = TypeKey::borrowed("u8");
    pub const U16: TypeKey = TypeKey::borrowed("u16");
    pub const U32: TypeKey = TypeKey::borrowed("u32");
    pub const U64: TypeKey = TypeKey::borrowed("u64");
    pub const F32: TypeKey = TypeKey::borrowed("f32");
    pub const F64: TypeKey = TypeKey::borrowed("f64");
    pub const CHAR: TypeKey = TypeKey::borrowed("char");
    pub const STR: TypeKey = TypeKey::borrowed("str");
    pub const LIST: TypeKey = TypeKey::borrowed("list");
    pub const MAP: TypeKey = TypeKey::borrowed("map");
    pub const SET: TypeKey = TypeKey::borrowed("set");
    pub const DURATION: TypeKey = TypeKey::borrowed("duration");

    const fn borrowed(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Key for a custom type.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for TypeKey {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for TypeKey {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}
