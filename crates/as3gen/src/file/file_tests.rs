#![allow(non_snake_case)]

use super::*;
use as3gen_core::{Field, FieldType};
use test_case::test_case;

fn chat_schema() -> SchemaFile {
    SchemaFile::new("chat.proto", "com.example.chat")
        .with_message(
            RecordType::new("Msg")
                .with_field(Field::new("text", 1, FieldType::String))
                .with_field(Field::message("sender", 2, ".com.example.chat.Msg.User"))
                .with_nested(
                    RecordType::new("User")
                        .with_field(Field::new("name", 1, FieldType::String))
                        .with_nested(RecordType::new("Avatar")),
                )
                .with_nested(RecordType::new("Meta")),
        )
        .with_message(RecordType::new("Ack").with_field(Field::new("id", 1, FieldType::Uint64)))
}

fn paths(planned: &[PlannedFile]) -> Vec<&str> {
    planned.iter().map(|file| file.path.as_str()).collect()
}

#[test]
fn FileGenerator___plan___lists_siblings_depth_first() {
    let schema = chat_schema();

    let planned = FileGenerator::new(&schema).plan().unwrap();

    assert_eq!(
        paths(&planned),
        vec![
            "com/example/chat/Msg.as",
            "com/example/chat/Msg_User.as",
            "com/example/chat/Msg_User_Avatar.as",
            "com/example/chat/Msg_Meta.as",
            "com/example/chat/Ack.as",
        ]
    );
    assert_eq!(planned[2].type_name, "Msg.User.Avatar");
    assert_eq!(planned[2].class_name, "Msg_User_Avatar");
}

#[test]
fn FileGenerator___plan_inline___lists_top_level_only() {
    let schema = chat_schema();

    let planned = FileGenerator::new(&schema)
        .with_placement(NestedPlacement::Inline)
        .plan()
        .unwrap();

    assert_eq!(
        paths(&planned),
        vec!["com/example/chat/Msg.as", "com/example/chat/Ack.as"]
    );
}

#[test]
fn FileGenerator___default_placement___is_sibling() {
    let schema = chat_schema();

    assert_eq!(FileGenerator::new(&schema).placement(), NestedPlacement::Sibling);
    assert_eq!(NESTED_PLACEMENT, NestedPlacement::Sibling);
}

#[test]
fn FileGenerator___empty_namespace___writes_at_root() {
    let schema = SchemaFile::new("w.proto", "").with_message(RecordType::new("Widget"));

    let planned = FileGenerator::new(&schema).plan().unwrap();

    assert_eq!(paths(&planned), vec!["Widget.as"]);
}

#[test]
fn FileGenerator___as3_package___overrides_namespace() {
    let schema = SchemaFile::new("w.proto", "proto.pkg")
        .with_as3_package("a.b")
        .with_message(RecordType::new("Widget"));

    let planned = FileGenerator::new(&schema).plan().unwrap();

    assert_eq!(paths(&planned), vec!["a/b/Widget.as"]);
}

#[test]
fn FileGenerator___flattened_name_clash___is_path_collision() {
    let schema = SchemaFile::new("x.proto", "x")
        .with_message(RecordType::new("A").with_nested(RecordType::new("B")))
        .with_message(RecordType::new("A_B"));

    let result = FileGenerator::new(&schema).validate();

    match result {
        Err(GeneratorError::PathCollision {
            path,
            first,
            second,
        }) => {
            assert_eq!(path, "x/A_B.as");
            assert_eq!(first, "A.B");
            assert_eq!(second, "A_B");
        }
        other => panic!("expected path collision, got {other:?}"),
    }
}

#[test]
fn FileGenerator___duplicate_top_level___is_path_collision() {
    let schema = SchemaFile::new("x.proto", "x")
        .with_message(RecordType::new("Dup"))
        .with_message(RecordType::new("Dup"));

    let result = FileGenerator::new(&schema).validate();

    assert!(matches!(result, Err(GeneratorError::PathCollision { .. })));
}

#[test]
fn FileGenerator___inline_nested_clash___is_not_a_path_collision() {
    let schema = SchemaFile::new("x.proto", "x")
        .with_message(RecordType::new("A").with_nested(RecordType::new("B")))
        .with_message(RecordType::new("A_B"));

    let result = FileGenerator::new(&schema)
        .with_placement(NestedPlacement::Inline)
        .validate();

    assert!(result.is_ok());
}

#[test_case("" ; "empty")]
#[test_case("a" ; "single segment")]
#[test_case("com.example.chat" ; "dotted")]
#[test_case("_x.y1" ; "underscore and digits")]
fn validate_namespace___accepts_identifiers(namespace: &str) {
    assert!(validate_namespace(namespace).is_ok());
}

#[test_case("a..b" ; "empty segment")]
#[test_case(".a" ; "leading dot")]
#[test_case("a." ; "trailing dot")]
#[test_case("a/b" ; "slash")]
#[test_case("1abc" ; "leading digit")]
#[test_case("a.b-c" ; "dash")]
#[test_case("../etc" ; "traversal")]
#[test_case("com.package" ; "package keyword")]
#[test_case("a.class" ; "class keyword")]
#[test_case("function" ; "single keyword")]
fn validate_namespace___rejects_invalid_segments(namespace: &str) {
    let result = validate_namespace(namespace);

    match result {
        Err(error @ GeneratorError::InvalidNamespace { .. }) => {
            assert!(error.is_user_facing());
            assert!(error.to_string().contains(namespace));
        }
        other => panic!("expected invalid namespace, got {other:?}"),
    }
}

#[test]
fn validate_namespace___reserved_word___names_the_segment() {
    let error = validate_namespace("com.package.chat").unwrap_err();

    assert!(error.to_string().contains("segment `package` is a reserved word"));
}

#[test]
fn FileGenerator___reserved_word_namespace___fails_plan() {
    let schema = SchemaFile::new("x.proto", "com.class").with_message(RecordType::new("X"));

    assert!(matches!(
        FileGenerator::new(&schema).plan(),
        Err(GeneratorError::InvalidNamespace { .. })
    ));
}

#[test]
fn FileGenerator___invalid_namespace___fails_plan() {
    let schema = SchemaFile::new("x.proto", "bad-name").with_message(RecordType::new("X"));

    assert!(matches!(
        FileGenerator::new(&schema).plan(),
        Err(GeneratorError::InvalidNamespace { .. })
    ));
}

#[test]
fn FileGenerator___generate___renders_header_and_package_block() {
    let schema = chat_schema();
    let generator = FileGenerator::new(&schema);

    let files = generator.generate(&schema.messages[1]).unwrap();

    assert_eq!(files.len(), 1);
    let contents = &files[0].contents;
    assert!(contents.starts_with(
        "// Generated by the protocol buffer compiler.  DO NOT EDIT!\n// source: chat.proto\n\npackage com.example.chat {\n\n  import com.google.protobuf.CodedInputStream;\n"
    ));
    assert!(contents.contains("\n  public final class Ack {\n"));
    assert!(contents.contains("\n  public final class AckBuilder {\n"));
    assert!(contents.ends_with("  }\n\n}\n"));
}

#[test]
fn FileGenerator___empty_namespace___renders_anonymous_package() {
    let schema = SchemaFile::new("w.proto", "").with_message(RecordType::new("Widget"));

    let files = FileGenerator::new(&schema).generate_all().unwrap();

    assert!(files[0].contents.contains("\npackage {\n"));
}

#[test]
fn FileGenerator___generate_sibling___emits_one_file_per_type() {
    let schema = chat_schema();
    let generator = FileGenerator::new(&schema);

    let files = generator.generate(&schema.messages[0]).unwrap();
    let file_paths: Vec<&str> = files.iter().map(|file| file.path.as_str()).collect();

    assert_eq!(
        file_paths,
        vec![
            "com/example/chat/Msg.as",
            "com/example/chat/Msg_User.as",
            "com/example/chat/Msg_User_Avatar.as",
            "com/example/chat/Msg_Meta.as",
        ]
    );
    assert!(files[1].contents.contains("  public final class Msg_User {\n"));
    assert!(files[0].contents.contains("internal var sender_:Msg_User = null;"));
    assert!(!files[0].contents.contains("class Msg_User {"));
}

#[test]
fn FileGenerator___generate_inline___appends_file_local_classes() {
    let schema = chat_schema();
    let generator = FileGenerator::new(&schema).with_placement(NestedPlacement::Inline);

    let files = generator.generate(&schema.messages[0]).unwrap();
    let contents = &files[0].contents;

    assert_eq!(files.len(), 1);
    let package_end = contents.find("\n}\n").unwrap();
    let user = contents.find("\nfinal class Msg_User {\n").unwrap();
    let avatar = contents.find("\nfinal class Msg_User_Avatar {\n").unwrap();
    let meta = contents.find("\nfinal class Msg_Meta {\n").unwrap();
    assert!(package_end < user);
    assert!(user < avatar);
    assert!(avatar < meta);
    assert!(contents.contains("\nfinal class Msg_UserBuilder {\n"));
}

#[test]
fn FileGenerator___generate_all___matches_plan_order() {
    let schema = chat_schema();
    let generator = FileGenerator::new(&schema);

    let files = generator.generate_all().unwrap();
    let planned = generator.plan().unwrap();

    let rendered: Vec<&str> = files.iter().map(|file| file.path.as_str()).collect();
    assert_eq!(rendered, paths(&planned));
}

#[test]
fn FileGenerator___generate_all___is_deterministic() {
    let schema = chat_schema();
    let generator = FileGenerator::new(&schema);

    assert_eq!(generator.generate_all().unwrap(), generator.generate_all().unwrap());
}

#[test]
fn FileGenerator___group_field___aborts_rendering() {
    let schema = SchemaFile::new("g.proto", "g").with_message(
        RecordType::new("Old").with_field(Field::new("legacy", 1, FieldType::Group)),
    );

    let result = FileGenerator::new(&schema).generate_all();

    assert!(matches!(result, Err(GeneratorError::InternalDispatch { .. })));
}
