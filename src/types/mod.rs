//! Value-level type identities used to key the loader registry.
//!
//! The registry never inspects Rust types at runtime; a field's target shape
//! is described by a [`DeclaredType`] (a [`TypeKey`] plus type parameters)
//! and decorated with [`Marker`]s into an [`AnnotatedType`] when the template
//! is defined.

mod declared;
mod key;
mod marker;

pub use declared::{AnnotatedType, ConfigEnum, DeclaredType, EnumBinding};
pub use key::TypeKey;
pub use marker::{Marker, MarkerKey};
