//! The two value trees the engine moves between: untyped [`RawValue`]s from
//! the parser and strongly-typed [`LoadedValue`]s out of dispatch.

mod convert;
mod loaded;
mod raw;

pub use convert::FromLoaded;
pub use loaded::{DynObject, LoadedValue};
pub use raw::RawValue;
