//! The loader registry and its dispatch algorithm — the engine's core.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use log::trace;

use crate::config::Configuration;
use crate::error::{ConfigError, LoadError};
use crate::loaders::{
    BoolLoader, CharLoader, DurationLoader, EnumLoader, F32Loader, F64Loader, I8Loader, I16Loader,
    I32Loader, I64Loader, ListLoader, MapLoader, ObjectTemplateLoader, SetLoader, StringLoader,
    TypeLoader, U8Loader, U16Loader, U32Loader, U64Loader,
};
use crate::preprocessor::ValuePreprocessor;
use crate::template::{ConfigTemplate, populate};
use crate::types::{AnnotatedType, DeclaredType, MarkerKey, TypeKey};
use crate::value::{LoadedValue, RawValue};

/// Registry of type loaders and value preprocessors, and the engine's entry
/// point for loading templates.
///
/// Construct one, register any custom loaders, templates, and preprocessors,
/// then share it for as many [`load`](Self::load) calls as needed:
/// registration takes `&mut self` and loading takes `&self`, so the
/// configure-then-read lifecycle is enforced by the borrow rules, and
/// concurrent loads against a quiesced registry are safe.
pub struct ConfigRegistry {
    loaders: HashMap<DeclaredType, Arc<dyn TypeLoader>>,
    preprocessors: HashMap<MarkerKey, Vec<Arc<dyn ValuePreprocessor>>>,
    enum_loader: Arc<dyn TypeLoader>,
}

impl ConfigRegistry {
    /// A registry with the default loader set: every primitive, `list`,
    /// `map`, `set`, `duration`, and the shared enum fallback.
    pub fn new() -> Self {
        let mut registry = Self {
            loaders: HashMap::new(),
            preprocessors: HashMap::new(),
            enum_loader: Arc::new(EnumLoader),
        };
        registry
            .register_loader(TypeKey::BOOL, BoolLoader)
            .register_loader(TypeKey::I8, I8Loader)
            .register_loader(TypeKey::I16, I16Loader)
            .register_loader(TypeKey::I32, I32Loader)
            .register_loader(TypeKey::I64, I64Loader)
            .register_loader(TypeKey::U8, U8Loader)
            .register_loader(TypeKey::U16, U16Loader)
            .register_loader(TypeKey::U32, U32Loader)
            .register_loader(TypeKey::U64, U64Loader)
            .register_loader(TypeKey::F32, F32Loader)
            .register_loader(TypeKey::F64, F64Loader)
            .register_loader(TypeKey::CHAR, CharLoader)
            .register_loader(TypeKey::STR, StringLoader)
            .register_loader(TypeKey::LIST, ListLoader)
            .register_loader(TypeKey::MAP, MapLoader)
            .register_loader(TypeKey::SET, SetLoader)
            .register_loader(TypeKey::DURATION, DurationLoader);
        registry
    }

    /// Associate a loader with a declared type, replacing any prior
    /// association for that exact key.
    ///
    /// A parameterized `DeclaredType` registers the specific instantiation;
    /// a bare key serves every instantiation of that raw type.
    pub fn register_loader<L>(&mut self, ty: impl Into<DeclaredType>, loader: L) -> &mut Self
    where
        L: TypeLoader + 'static,
    {
        self.loaders.insert(ty.into(), Arc::new(loader));
        self
    }

    /// Register a nested template type: wraps the factory in an
    /// [`ObjectTemplateLoader`] and registers it like any other loader.
    pub fn register_template<T, F>(&mut self, ty: impl Into<DeclaredType>, provider: F) -> &mut Self
    where
        T: ConfigTemplate + Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.register_loader(ty, ObjectTemplateLoader::new(provider))
    }

    /// Append a preprocessor to the chain for a marker key. Chains run in
    /// registration order.
    pub fn register_preprocessor<P>(
        &mut self,
        marker: impl Into<MarkerKey>,
        preprocessor: P,
    ) -> &mut Self
    where
        P: ValuePreprocessor + 'static,
    {
        self.preprocessors
            .entry(marker.into())
            .or_default()
            .push(Arc::new(preprocessor));
        self
    }

    /// Load a template from a configuration source.
    ///
    /// Populates every declared field through [`load_type`](Self::load_type),
    /// then runs the template's validation hook; a rejected object fails with
    /// [`ConfigError::Validation`] naming the source. Returns the same
    /// (moved) template instance, fully populated.
    pub fn load<T: ConfigTemplate>(
        &self,
        template: T,
        source: &dyn Configuration,
    ) -> Result<T, ConfigError> {
        let populated = populate(template, source, |ty, value| self.load_type(ty, value))?;
        if !populated.validate() {
            return Err(ConfigError::Validation {
                name: source.name().to_string(),
            });
        }
        Ok(populated)
    }

    /// Dispatch one raw value against an annotated declared type.
    ///
    /// Runs the preprocessor chain, then resolves a loader with fixed
    /// precedence: exact declared type (a parameterized type is its own
    /// key), raw type for parameterized declarations, enum fallback, and
    /// otherwise [`LoadError::NoLoader`]. This is also the callback every
    /// nested template load recurses through.
    pub fn load_type(&self, ty: &AnnotatedType, value: RawValue) -> Result<LoadedValue, LoadError> {
        let value = self.preprocess(ty, value)?;
        self.resolve(ty, value)
    }

    fn preprocess(&self, ty: &AnnotatedType, mut value: RawValue) -> Result<RawValue, LoadError> {
        for marker in ty.markers() {
            // Markers with no registered preprocessor are inert.
            let Some(chain) = self.preprocessors.get(marker.key()) else {
                continue;
            };
            for preprocessor in chain {
                value = preprocessor.process(ty, value, self, marker)?;
            }
        }
        Ok(value)
    }

    fn resolve(&self, ty: &AnnotatedType, value: RawValue) -> Result<LoadedValue, LoadError> {
        let declared = ty.declared();
        if let Some(loader) = self.loaders.get(declared) {
            return loader.load(ty, value, self);
        }
        if declared.is_parameterized() {
            if let Some(loader) = self.loaders.get(&declared.raw()) {
                trace!("no exact loader for {declared}, using raw type {}", declared.key());
                return loader.load(ty, value, self);
            }
        }
        if declared.enum_binding().is_some() {
            trace!("using enum fallback for {declared}");
            return self.enum_loader.load(ty, value, self);
        }
        Err(LoadError::no_loader(declared))
    }
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
