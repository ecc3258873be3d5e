#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

const SHOP_TOML: &str = r#"
name = "shop.proto"
package = "com.example.shop"

[[messages]]
name = "Order"

[[messages.fields]]
name = "order_id"
number = 1
type = "int64"

[[messages.fields]]
name = "lines"
number = 2
type = "message"
label = "repeated"
type_name = "Order.Line"

[[messages.nested]]
name = "Line"

[[messages.nested.fields]]
name = "sku"
number = 1
type = "string"
default_value = "unknown"
"#;

#[test]
fn SchemaFile___from_toml_str___parses_nested_tree() {
    let schema = SchemaFile::from_toml_str(SHOP_TOML).unwrap();

    assert_eq!(schema.name, "shop.proto");
    assert_eq!(schema.package, "com.example.shop");
    assert_eq!(schema.messages.len(), 1);

    let order = &schema.messages[0];
    assert_eq!(order.name, "Order");
    assert_eq!(order.fields[0].ty, FieldType::Int64);
    assert_eq!(order.fields[0].label, Label::Optional);
    assert_eq!(order.fields[1].label, Label::Repeated);
    assert_eq!(order.fields[1].type_name.as_deref(), Some("Order.Line"));
    assert_eq!(order.nested[0].fields[0].default_value.as_deref(), Some("unknown"));
}

#[test]
fn SchemaFile___from_json_str___parses_minimal_schema() {
    let json = r#"{
        "name": "a.proto",
        "messages": [
            { "name": "Ping", "fields": [ { "name": "seq", "number": 1, "type": "uint32" } ] }
        ]
    }"#;

    let schema = SchemaFile::from_json_str(json).unwrap();

    assert_eq!(schema.package, "");
    assert_eq!(schema.messages[0].fields[0].ty, FieldType::Uint32);
}

#[test]
fn SchemaFile___from_toml_str___rejects_unknown_type() {
    let toml = r#"
name = "a.proto"
[[messages]]
name = "Bad"
[[messages.fields]]
name = "x"
number = 1
type = "int128"
"#;

    let result = SchemaFile::from_toml_str(toml);

    assert!(matches!(result, Err(SchemaError::Toml(_))));
}

#[test]
fn SchemaFile___from_path___rejects_unknown_extension() {
    let dir = std::env::temp_dir().join("as3gen-core-descriptor-tests");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("schema.yaml");
    std::fs::write(&path, "name: a").unwrap();

    let result = SchemaFile::from_path(&path);

    assert!(matches!(result, Err(SchemaError::UnsupportedFormat(ref ext)) if ext == "yaml"));
}

#[test]
fn SchemaFile___from_path___reports_missing_file() {
    let result = SchemaFile::from_path(Path::new("/nonexistent/as3gen/schema.toml"));

    assert!(matches!(result, Err(SchemaError::Read { .. })));
}

#[test]
fn SchemaFile___namespace___prefers_as3_package() {
    let schema = SchemaFile::new("a.proto", "proto.pkg");
    assert_eq!(schema.namespace(), "proto.pkg");

    let schema = schema.with_as3_package("flash.pkg");
    assert_eq!(schema.namespace(), "flash.pkg");
}

#[test]
fn SchemaFile___record_count___includes_nested_transitively() {
    let schema = SchemaFile::new("a.proto", "")
        .with_message(
            RecordType::new("A").with_nested(RecordType::new("B").with_nested(RecordType::new("C"))),
        )
        .with_message(RecordType::new("D"));

    assert_eq!(schema.record_count(), 4);
}

#[test]
fn RecordType___field_position___finds_declared_field() {
    let record = RecordType::new("A")
        .with_field(Field::new("x", 1, FieldType::Int32))
        .with_field(Field::new("y", 7, FieldType::Bool));

    assert_eq!(record.field_position(7), Some(1));
    assert_eq!(record.field_position(1), Some(0));
    assert!(record.field_position(2).is_none());
}

#[test_case(Label::Optional, Cardinality::Singular)]
#[test_case(Label::Required, Cardinality::Singular)]
#[test_case(Label::Repeated, Cardinality::Repeated)]
fn Field___cardinality___follows_label(label: Label, expected: Cardinality) {
    let mut field = Field::new("f", 1, FieldType::Int32);
    field.label = label;

    assert_eq!(field.cardinality(), expected);
}

#[test]
fn Field___value_category___covers_every_scalar() {
    for ty in FieldType::ALL.into_iter().filter(|ty| ty.is_scalar()) {
        let field = Field::new("f", 1, ty);

        assert_eq!(field.value_category(), Some(ValueCategory::Primitive), "{ty}");
    }
}

#[test]
fn Field___value_category___classifies_references() {
    assert_eq!(
        Field::message("m", 1, "Other").value_category(),
        Some(ValueCategory::Record)
    );
    assert_eq!(
        Field::enumeration("e", 2, "Color").value_category(),
        Some(ValueCategory::Enumerated)
    );
}

#[test_case(Field::new("g", 1, FieldType::Group) ; "group")]
#[test_case(Field::new("m", 1, FieldType::Message) ; "message without type name")]
#[test_case(Field::new("e", 1, FieldType::Enum) ; "enum without type name")]
fn Field___value_category___is_none_for_unclassifiable(field: Field) {
    assert_eq!(field.value_category(), None);
}

#[test]
fn FieldType___all___has_unique_names() {
    let mut names: Vec<&str> = FieldType::ALL.iter().map(|ty| ty.name()).collect();
    names.sort_unstable();
    names.dedup();

    assert_eq!(names.len(), FieldType::ALL.len());
}
