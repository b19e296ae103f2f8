use std::collections::HashMap;
use std::time::Duration;

use super::*;
use crate::config::MapConfiguration;
use crate::template::Field;
use crate::types::{ConfigEnum, Marker};
use crate::value::FromLoaded;

#[derive(Debug, PartialEq, Eq, Hash)]
enum Compression {
    Gzip,
    Zstd,
}

impl ConfigEnum for Compression {
    const KEY: &'static str = "compression";
    const VARIANTS: &'static [&'static str] = &["GZIP", "ZSTD"];

    fn from_variant(name: &str) -> Option<Self> {
        match name {
            "GZIP" => Some(Self::Gzip),
            "ZSTD" => Some(Self::Zstd),
            _ => None,
        }
    }
}

impl FromLoaded for Compression {
    fn from_loaded(value: LoadedValue) -> Result<Self, LoadError> {
        value.into_object()
    }
}

#[derive(Debug, Default, PartialEq)]
struct PoolSettings {
    size: u32,
    keepalive: Duration,
}

impl ConfigTemplate for PoolSettings {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::required("size", DeclaredType::simple(TypeKey::U32), &mut self.size),
            Field::required(
                "keepalive",
                DeclaredType::simple(TypeKey::DURATION),
                &mut self.keepalive,
            ),
        ]
    }
}

impl FromLoaded for PoolSettings {
    fn from_loaded(value: LoadedValue) -> Result<Self, LoadError> {
        value.into_object()
    }
}

#[derive(Debug, Default, PartialEq)]
struct DatabaseSettings {
    url: String,
    pool: PoolSettings,
}

impl ConfigTemplate for DatabaseSettings {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::required("url", DeclaredType::simple(TypeKey::STR), &mut self.url),
            Field::required("pool", DeclaredType::named("pool"), &mut self.pool),
        ]
    }
}

impl FromLoaded for DatabaseSettings {
    fn from_loaded(value: LoadedValue) -> Result<Self, LoadError> {
        value.into_object()
    }
}

#[derive(Debug, Default)]
struct ServiceSettings {
    name: String,
    workers: u16,
    tags: Vec<String>,
    limits: HashMap<String, i64>,
    compression: Option<Compression>,
    database: DatabaseSettings,
}

impl ConfigTemplate for ServiceSettings {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::required("name", DeclaredType::simple(TypeKey::STR), &mut self.name),
            Field::required(
                "workers",
                DeclaredType::simple(TypeKey::U16),
                &mut self.workers,
            ),
            Field::optional(
                "tags",
                DeclaredType::list_of(DeclaredType::simple(TypeKey::STR)),
                &mut self.tags,
            ),
            Field::optional(
                "limits",
                DeclaredType::map_of(DeclaredType::simple(TypeKey::I64)),
                &mut self.limits,
            ),
            Field::optional(
                "compression",
                DeclaredType::enum_of::<Compression>(),
                &mut self.compression,
            ),
            Field::required(
                "database",
                DeclaredType::named("database"),
                &mut self.database,
            ),
        ]
    }

    fn validate(&self) -> bool {
        self.workers > 0
    }
}

fn service_registry() -> ConfigRegistry {
    let mut registry = ConfigRegistry::new();
    registry
        .register_template(DeclaredType::named("database"), DatabaseSettings::default)
        .register_template(DeclaredType::named("pool"), PoolSettings::default);
    registry
}

fn annotated(declared: DeclaredType) -> AnnotatedType {
    AnnotatedType::new(declared)
}

fn sentinel_loader(
    _ty: &AnnotatedType,
    _value: RawValue,
    _registry: &ConfigRegistry,
) -> Result<LoadedValue, LoadError> {
    Ok(LoadedValue::Str("sentinel".to_string()))
}

fn echo_type_loader(
    ty: &AnnotatedType,
    _value: RawValue,
    _registry: &ConfigRegistry,
) -> Result<LoadedValue, LoadError> {
    Ok(LoadedValue::Str(ty.declared().to_string()))
}

#[test]
fn bootstrap_dispatches_int() {
    let registry = ConfigRegistry::new();
    let loaded = registry
        .load_type(&annotated(DeclaredType::simple(TypeKey::I32)), RawValue::Int(5))
        .unwrap();
    assert!(matches!(loaded, LoadedValue::I32(5)));
}

#[test]
fn bootstrap_dispatches_string_list_in_order() {
    let registry = ConfigRegistry::new();
    let ty = annotated(DeclaredType::list_of(DeclaredType::simple(TypeKey::STR)));
    let raw = RawValue::Seq(vec![RawValue::from("a"), RawValue::from("b")]);
    let loaded = registry.load_type(&ty, raw).unwrap();
    assert_eq!(Vec::<String>::from_loaded(loaded).unwrap(), vec!["a", "b"]);
}

#[test]
fn exact_match_beats_raw_type() {
    let mut registry = ConfigRegistry::new();
    let exact = DeclaredType::list_of(DeclaredType::simple(TypeKey::STR));
    registry.register_loader(exact.clone(), sentinel_loader);

    let loaded = registry
        .load_type(&annotated(exact), RawValue::Seq(vec![]))
        .unwrap();
    assert!(matches!(loaded, LoadedValue::Str(s) if s == "sentinel"));

    // A different instantiation still goes through the shared raw loader.
    let other = annotated(DeclaredType::list_of(DeclaredType::simple(TypeKey::I32)));
    let loaded = registry
        .load_type(&other, RawValue::Seq(vec![RawValue::Int(1)]))
        .unwrap();
    assert!(matches!(loaded, LoadedValue::Seq(_)));
}

#[test]
fn raw_match_passes_full_parameterized_type_through() {
    let mut registry = ConfigRegistry::new();
    registry.register_loader(TypeKey::named("pair"), echo_type_loader);

    let ty = annotated(DeclaredType::parameterized(
        TypeKey::named("pair"),
        vec![
            DeclaredType::simple(TypeKey::I32),
            DeclaredType::simple(TypeKey::STR),
        ],
    ));
    let loaded = registry.load_type(&ty, RawValue::Null).unwrap();
    assert!(matches!(loaded, LoadedValue::Str(s) if s == "pair<i32, str>"));
}

#[test]
fn enum_fallback_resolves_variants() {
    let registry = ConfigRegistry::new();
    let ty = annotated(DeclaredType::enum_of::<Compression>());

    let loaded = registry.load_type(&ty, RawValue::from("GZIP")).unwrap();
    assert_eq!(Compression::from_loaded(loaded).unwrap(), Compression::Gzip);

    let err = registry.load_type(&ty, RawValue::from("BROTLI")).unwrap_err();
    assert!(matches!(
        err,
        LoadError::UnknownVariant { ty, variant }
            if ty == "compression" && variant == "BROTLI"
    ));
}

#[test]
fn explicit_registration_beats_enum_fallback() {
    let mut registry = ConfigRegistry::new();
    registry.register_loader(DeclaredType::named("compression"), sentinel_loader);

    let ty = annotated(DeclaredType::enum_of::<Compression>());
    let loaded = registry.load_type(&ty, RawValue::from("GZIP")).unwrap();
    assert!(matches!(loaded, LoadedValue::Str(s) if s == "sentinel"));
}

#[test]
fn unregistered_type_fails_naming_it() {
    let registry = ConfigRegistry::new();
    let ty = annotated(DeclaredType::named("widget.factory"));
    let err = registry
        .load_type(&ty, RawValue::Map(Default::default()))
        .unwrap_err();
    assert!(matches!(err, LoadError::NoLoader { ty } if ty == "widget.factory"));
}

#[test]
fn re_registration_replaces_the_loader() {
    let mut registry = ConfigRegistry::new();
    registry.register_loader(TypeKey::I32, sentinel_loader);

    let loaded = registry
        .load_type(&annotated(DeclaredType::simple(TypeKey::I32)), RawValue::Int(5))
        .unwrap();
    assert!(matches!(loaded, LoadedValue::Str(s) if s == "sentinel"));
}

fn append_a(
    _ty: &AnnotatedType,
    value: RawValue,
    _registry: &ConfigRegistry,
    _marker: &Marker,
) -> Result<RawValue, LoadError> {
    match value {
        RawValue::Str(s) => Ok(RawValue::Str(format!("{s}a"))),
        other => Ok(other),
    }
}

fn append_b(
    _ty: &AnnotatedType,
    value: RawValue,
    _registry: &ConfigRegistry,
    _marker: &Marker,
) -> Result<RawValue, LoadError> {
    match value {
        RawValue::Str(s) => Ok(RawValue::Str(format!("{s}b"))),
        other => Ok(other),
    }
}

#[test]
fn preprocessors_compose_in_registration_order() {
    let mut registry = ConfigRegistry::new();
    registry
        .register_preprocessor("suffix", append_a)
        .register_preprocessor("suffix", append_b);

    let ty = annotated(DeclaredType::simple(TypeKey::STR)).with_marker(Marker::new("suffix"));
    let loaded = registry.load_type(&ty, RawValue::from("base-")).unwrap();
    assert!(matches!(loaded, LoadedValue::Str(s) if s == "base-ab"));
}

#[test]
fn marker_without_preprocessor_is_inert() {
    let registry = ConfigRegistry::new();
    let ty = annotated(DeclaredType::simple(TypeKey::STR)).with_marker(Marker::new("unknown"));
    let loaded = registry.load_type(&ty, RawValue::from("plain")).unwrap();
    assert!(matches!(loaded, LoadedValue::Str(s) if s == "plain"));
}

fn substitute_default(
    _ty: &AnnotatedType,
    value: RawValue,
    _registry: &ConfigRegistry,
    marker: &Marker,
) -> Result<RawValue, LoadError> {
    match value {
        RawValue::Null => Ok(marker
            .param("value")
            .map(RawValue::from)
            .unwrap_or(RawValue::Null)),
        other => Ok(other),
    }
}

#[test]
fn preprocessor_reads_marker_parameters() {
    let mut registry = ConfigRegistry::new();
    registry.register_preprocessor("fallback", substitute_default);

    let ty = annotated(DeclaredType::simple(TypeKey::STR))
        .with_marker(Marker::new("fallback").with_param("value", "anonymous"));
    let loaded = registry.load_type(&ty, RawValue::Null).unwrap();
    assert!(matches!(loaded, LoadedValue::Str(s) if s == "anonymous"));
}

fn service_source(json: serde_json::Value) -> MapConfiguration {
    MapConfiguration::from_json("service.yml", json).unwrap()
}

#[test]
fn three_level_nested_load_populates_fully() {
    let registry = service_registry();
    let source = service_source(serde_json::json!({
        "name": "ingest",
        "workers": 4,
        "tags": ["edge", "beta"],
        "limits": {"rps": 250},
        "compression": "ZSTD",
        "database": {
            "url": "postgres://localhost/ingest",
            "pool": {"size": 8, "keepalive": "30s"},
        },
    }));

    let service = registry.load(ServiceSettings::default(), &source).unwrap();
    assert_eq!(service.name, "ingest");
    assert_eq!(service.workers, 4);
    assert_eq!(service.tags, vec!["edge", "beta"]);
    assert_eq!(service.limits["rps"], 250);
    assert_eq!(service.compression, Some(Compression::Zstd));
    assert_eq!(service.database.url, "postgres://localhost/ingest");
    assert_eq!(
        service.database.pool,
        PoolSettings {
            size: 8,
            keepalive: Duration::from_secs(30),
        }
    );
}

#[test]
fn deep_failure_surfaces_at_the_top_with_field_path() {
    let registry = service_registry();
    let source = service_source(serde_json::json!({
        "name": "ingest",
        "workers": 4,
        "database": {
            "url": "postgres://localhost/ingest",
            "pool": {"size": "not-a-number", "keepalive": 30},
        },
    }));

    let err = match registry.load(ServiceSettings::default(), &source) {
        Err(ConfigError::Load(err)) => err,
        other => panic!("expected load failure, got {other:?}"),
    };

    // The chain walks database -> pool -> size down to the real cause.
    let mut fields = Vec::new();
    let mut cause: &dyn std::error::Error = &err;
    loop {
        if let Some(LoadError::Field { field, .. }) = cause.downcast_ref::<LoadError>() {
            fields.push(field.clone());
        }
        match cause.source() {
            Some(next) => cause = next,
            None => break,
        }
    }
    assert_eq!(fields, vec!["database", "pool", "size"]);
    assert!(matches!(
        cause.downcast_ref::<LoadError>(),
        Some(LoadError::Mismatch { .. })
    ));
}

#[test]
fn missing_nested_field_aborts_the_whole_load() {
    let registry = service_registry();
    let source = service_source(serde_json::json!({
        "name": "ingest",
        "workers": 4,
        "database": {"url": "postgres://localhost/ingest"},
    }));

    assert!(registry.load(ServiceSettings::default(), &source).is_err());
}

#[test]
fn validation_failure_is_distinct_and_names_the_source() {
    let registry = service_registry();
    let source = service_source(serde_json::json!({
        "name": "ingest",
        "workers": 0,
        "database": {
            "url": "postgres://localhost/ingest",
            "pool": {"size": 8, "keepalive": 30},
        },
    }));

    let err = registry
        .load(ServiceSettings::default(), &source)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Validation { name } if name == "service.yml"));
}

#[test]
fn yaml_source_loads_end_to_end() {
    let registry = service_registry();
    let config: MapConfiguration = serde_yaml::from_str(
        r#"
name: archive
workers: 2
tags: [cold]
database:
  url: postgres://localhost/archive
  pool:
    size: 2
    keepalive: 5m
"#,
    )
    .unwrap();
    let source = config.with_name("archive.yml");

    let service = registry.load(ServiceSettings::default(), &source).unwrap();
    assert_eq!(service.name, "archive");
    assert_eq!(service.database.pool.keepalive, Duration::from_secs(300));
    assert_eq!(service.compression, None);
}

#[test]
fn loads_are_read_only_and_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConfigRegistry>();

    let registry = service_registry();
    let source = service_source(serde_json::json!({
        "name": "a",
        "workers": 1,
        "database": {
            "url": "u",
            "pool": {"size": 1, "keepalive": 1},
        },
    }));

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                registry.load(ServiceSettings::default(), &source).unwrap();
            });
        }
    });
}
