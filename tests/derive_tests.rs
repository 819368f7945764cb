//! Integration tests for the Spec derive macro.

use envspec::env::MockEnv;
use envspec::{BindError, Binder, BoxError, Field, Kind, Slot, Spec, Value};
use envspec_derive::Spec as DeriveSpec;

// ============================================================================
// Registration
// ============================================================================

#[derive(Debug, Default, DeriveSpec)]
struct EmptyConfig {}

#[test]
fn test_empty_struct() {
    let mut config = EmptyConfig {};
    assert!(config.fields().is_empty());
    assert!(Binder::new()
        .bind_with_env(&mut config, &MockEnv::new())
        .is_ok());
}

#[derive(Debug, Default, DeriveSpec)]
struct Tagged {
    #[spec(key = "APP_HOST", default = "localhost")]
    host: String,

    #[spec(key = "APP_PORT", required, flagname = "listen", usage = "port to listen on")]
    port: i64,

    untagged: bool,
}

#[test]
fn test_tags_follow_attributes() {
    let mut config = Tagged::default();
    let fields = config.fields();

    assert_eq!(fields.len(), 3);

    let host = &fields[0].tags;
    assert_eq!(host.name, "host");
    assert_eq!(host.key, Some("APP_HOST"));
    assert_eq!(host.default, Some("localhost"));
    assert!(!host.required);

    let port = &fields[1].tags;
    assert!(port.required);
    assert_eq!(port.flagname, Some("listen"));
    assert_eq!(port.usage, Some("port to listen on"));

    let untagged = &fields[2].tags;
    assert_eq!(untagged.key, None);
    assert_eq!(fields[2].slot.kind(), Kind::Bool);
}

#[test]
fn test_untagged_field_fails_env_binding_after_earlier_fields() {
    let env = MockEnv::new()
        .with_env("APP_HOST", "db")
        .with_env("APP_PORT", "5432");
    let mut config = Tagged::default();

    let err = Binder::new().bind_with_env(&mut config, &env).unwrap_err();

    assert_eq!(err, BindError::MissingKey { field: "untagged" });
    assert_eq!(config.host, "db");
    assert_eq!(config.port, 5432);
}

// ============================================================================
// Raw identifiers and generics
// ============================================================================

#[derive(Debug, Default, DeriveSpec)]
struct RawNames {
    #[spec(key = "KIND")]
    r#type: String,
}

#[test]
fn test_raw_identifier_name() {
    let mut config = RawNames::default();
    assert_eq!(config.fields()[0].tags.name, "type");
}

#[derive(Debug, Default)]
struct Csv(Vec<String>);

impl Value for Csv {
    fn set(&mut self, raw: &str) -> Result<(), BoxError> {
        self.0 = raw
            .split(',')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Ok(())
    }
}

#[derive(Debug, Default, DeriveSpec)]
struct Generic<T: Value + Default> {
    #[spec(key = "ITEMS", custom)]
    items: T,

    #[spec(key = "COUNT", default = "3")]
    count: u8,
}

#[test]
fn test_generic_custom_field() {
    let env = MockEnv::new().with_env("ITEMS", "a,b,,c");
    let mut config: Generic<Csv> = Generic::default();

    Binder::new().bind_with_env(&mut config, &env).unwrap();

    assert_eq!(config.items.0, vec!["a", "b", "c"]);
    assert_eq!(config.count, 3);
}

#[test]
fn test_custom_slot_kind() {
    let mut config: Generic<Csv> = Generic::default();
    let fields = config.fields();
    assert!(matches!(fields[0].slot, Slot::Custom(_)));
    assert_eq!(fields[0].slot.kind(), Kind::Custom);
    assert_eq!(fields[1].slot.kind(), Kind::U8);
}

// ============================================================================
// Hand-written and derived impls agree
// ============================================================================

#[derive(Debug, Default)]
struct Manual {
    host: String,
}

impl Spec for Manual {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![Field::new(
            envspec::Tags::new("host").key("APP_HOST").default("localhost"),
            Slot::Native(&mut self.host),
        )]
    }
}

#[test]
fn test_manual_and_derived_tags_match() {
    let mut manual = Manual::default();
    let mut derived = Tagged::default();
    assert_eq!(manual.fields()[0].tags, derived.fields()[0].tags);
}
