use std::fmt;
use std::hash::{Hash, Hasher};

use crate::types::{Marker, TypeKey};
use crate::value::LoadedValue;

/// An enumeration loadable from configuration by variant name.
///
/// Implementing this trait and declaring the field with
/// [`DeclaredType::enum_of`] is all an enum needs to participate in loading;
/// the shared fallback loader handles every such type. Registering an
/// explicit loader for the enum's key takes precedence over the fallback.
pub trait ConfigEnum: Sized + Send + Sync + 'static {
    /// Type key this enum is declared under.
    const KEY: &'static str;

    /// Variant names accepted from configuration.
    const VARIANTS: &'static [&'static str];

    /// Resolve a variant name to a value, `None` if unknown.
    fn from_variant(name: &str) -> Option<Self>;
}

/// Construction metadata carried by enum declarations, consumed by the
/// shared fallback loader.
#[derive(Debug, Clone, Copy)]
pub struct EnumBinding {
    pub(crate) construct: fn(&str) -> Option<LoadedValue>,
    pub(crate) variants: &'static [&'static str],
}

impl EnumBinding {
    pub fn of<E: ConfigEnum>() -> Self {
        fn construct<E: ConfigEnum>(name: &str) -> Option<LoadedValue> {
            E::from_variant(name).map(LoadedValue::object)
        }
        Self {
            construct: construct::<E>,
            variants: E::VARIANTS,
        }
    }

    pub fn variants(&self) -> &'static [&'static str] {
        self.variants
    }
}

/// The target shape a configuration field is converted into: a [`TypeKey`]
/// plus ordered type parameters.
///
/// A parameterized type is a registry key in its own right, distinct from
/// its raw (parameterless) form; dispatch consults the exact key first and
/// the raw key second. Identity is the key and parameters only — enum
/// construction metadata does not participate in equality or hashing.
#[derive(Debug, Clone)]
pub struct DeclaredType {
    key: TypeKey,
    params: Vec<DeclaredType>,
    enum_binding: Option<EnumBinding>,
}

impl DeclaredType {
    /// A plain, parameterless type.
    pub fn simple(key: impl Into<TypeKey>) -> Self {
        Self {
            key: key.into(),
            params: Vec::new(),
            enum_binding: None,
        }
    }

    /// A custom type identified by name.
    pub fn named(name: &'static str) -> Self {
        Self::simple(TypeKey::named(name))
    }

    /// A generic type instantiated with the given parameters.
    pub fn parameterized(key: impl Into<TypeKey>, params: Vec<DeclaredType>) -> Self {
        Self {
            key: key.into(),
            params,
            enum_binding: None,
        }
    }

    /// A sequence with the given element type.
    pub fn list_of(element: DeclaredType) -> Self {
        Self::parameterized(TypeKey::LIST, vec![element])
    }

    /// A set with the given element type.
    pub fn set_of(element: DeclaredType) -> Self {
        Self::parameterized(TypeKey::SET, vec![element])
    }

    /// A string-keyed mapping with the given value type.
    pub fn map_of(value: DeclaredType) -> Self {
        Self::parameterized(TypeKey::MAP, vec![value])
    }

    /// An enumeration declared through [`ConfigEnum`].
    pub fn enum_of<E: ConfigEnum>() -> Self {
        Self {
            key: TypeKey::named(E::KEY),
            params: Vec::new(),
            enum_binding: Some(EnumBinding::of::<E>()),
        }
    }

    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    pub fn params(&self) -> &[DeclaredType] {
        &self.params
    }

    pub fn param(&self, index: usize) -> Option<&DeclaredType> {
        self.params.get(index)
    }

    pub fn is_parameterized(&self) -> bool {
        !self.params.is_empty()
    }

    /// The raw (parameterless) form of this type, the second dispatch tier.
    pub fn raw(&self) -> DeclaredType {
        Self {
            key: self.key.clone(),
            params: Vec::new(),
            enum_binding: None,
        }
    }

    pub fn enum_binding(&self) -> Option<&EnumBinding> {
        self.enum_binding.as_ref()
    }
}

impl PartialEq for DeclaredType {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.params == other.params
    }
}

impl Eq for DeclaredType {}

impl Hash for DeclaredType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
        self.params.hash(state);
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)?;
        if !self.params.is_empty() {
            write!(f, "<")?;
            for (index, param) in self.params.iter().enumerate() {
                if index > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{param}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl From<TypeKey> for DeclaredType {
    fn from(key: TypeKey) -> Self {
        Self::simple(key)
    }
}

/// A [`DeclaredType`] plus the markers attached to the field declaring it.
///
/// This is what dispatch receives per field: the markers drive the
/// preprocessor chain, the declared type drives loader resolution.
#[derive(Debug, Clone)]
pub struct AnnotatedType {
    declared: DeclaredType,
    markers: Vec<Marker>,
}

impl AnnotatedType {
    pub fn new(declared: DeclaredType) -> Self {
        Self {
            declared,
            markers: Vec::new(),
        }
    }

    /// Attach a marker, returning the annotated type for chaining. Markers
    /// apply in attachment order.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn declared(&self) -> &DeclaredType {
        &self.declared
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

impl From<DeclaredType> for AnnotatedType {
    fn from(declared: DeclaredType) -> Self {
        Self::new(declared)
    }
}

impl From<TypeKey> for AnnotatedType {
    fn from(key: TypeKey) -> Self {
        Self::new(DeclaredType::simple(key))
    }
}
