//! Integration tests for the `as3gen` binary.
//!
//! Each test writes a schema into a temporary directory and runs the
//! compiled binary against it.

#![allow(non_snake_case)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const SCHEMA: &str = r#"
name = "widgets.proto"
package = "com.example"

[[messages]]
name = "Widget"

[[messages.fields]]
name = "id"
number = 1
type = "int32"
label = "required"

[[messages.fields]]
name = "tags"
number = 2
type = "string"
label = "repeated"

[[messages.fields]]
name = "part"
number = 3
type = "message"
type_name = "Widget.Part"

[[messages.nested]]
name = "Part"

[[messages.nested.fields]]
name = "weight"
number = 1
type = "double"
"#;

fn as3gen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_as3gen"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_schema(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

// =============================================================================
// generate
// =============================================================================

mod generate {
    use super::*;

    #[test]
    fn generate___toml_schema___writes_primary_and_sibling_files() {
        let dir = TempDir::new().unwrap();
        let schema = write_schema(&dir, "widgets.toml", SCHEMA);
        let out = dir.path().join("out");

        let output = as3gen(&[
            "generate",
            "--schema",
            path_str(&schema),
            "--output",
            path_str(&out),
        ]);

        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        let widget = fs::read_to_string(out.join("com/example/Widget.as")).unwrap();
        assert!(widget.contains("package com.example {"));
        assert!(widget.contains("public final class Widget {"));
        assert!(out.join("com/example/Widget_Part.as").exists());
    }

    #[test]
    fn generate___output_list_file___lists_generated_paths_in_order() {
        let dir = TempDir::new().unwrap();
        let schema = write_schema(&dir, "widgets.toml", SCHEMA);
        let out = dir.path().join("out");

        let output = as3gen(&[
            "generate",
            "--schema",
            path_str(&schema),
            "--output",
            path_str(&out),
            "--parameter",
            "output_list_file=files.txt",
        ]);

        assert!(output.status.success());
        let listed = fs::read_to_string(out.join("files.txt")).unwrap();
        assert_eq!(
            listed,
            "com/example/Widget.as\ncom/example/Widget_Part.as\n"
        );
    }

    #[test]
    fn generate___unknown_option___fails_and_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let schema = write_schema(&dir, "widgets.toml", SCHEMA);
        let out = dir.path().join("out");

        let output = as3gen(&[
            "generate",
            "--schema",
            path_str(&schema),
            "--output",
            path_str(&out),
            "--parameter",
            "output_list_file=out.txt,bogus=1",
        ]);

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Unknown generator option: bogus"), "{stderr}");
        assert!(!out.exists());
    }

    #[test]
    fn generate___info_log_level___reports_progress_on_stderr() {
        let dir = TempDir::new().unwrap();
        let schema = write_schema(&dir, "widgets.toml", SCHEMA);
        let out = dir.path().join("out");

        let output = as3gen(&[
            "--log-level",
            "info",
            "generate",
            "--schema",
            path_str(&schema),
            "--output",
            path_str(&out),
        ]);

        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("generating sources"), "{stderr}");
        assert!(stderr.contains("generation complete"), "{stderr}");
        assert!(!String::from_utf8_lossy(&output.stdout).contains("generating sources"));
    }

    #[test]
    fn generate___default_log_level___keeps_stderr_quiet() {
        let dir = TempDir::new().unwrap();
        let schema = write_schema(&dir, "widgets.toml", SCHEMA);
        let out = dir.path().join("out");

        let output = as3gen(&[
            "generate",
            "--schema",
            path_str(&schema),
            "--output",
            path_str(&out),
        ]);

        assert!(output.status.success());
        assert!(!String::from_utf8_lossy(&output.stderr).contains("generating sources"));
    }

    #[test]
    fn generate___json_schema___is_accepted() {
        let dir = TempDir::new().unwrap();
        let schema = write_schema(
            &dir,
            "point.json",
            r#"{"name": "point.proto", "messages": [{"name": "Point", "fields": [
                {"name": "x", "number": 1, "type": "sint32"}]}]}"#,
        );
        let out = dir.path().join("out");

        let output = as3gen(&[
            "generate",
            "--schema",
            path_str(&schema),
            "--output",
            path_str(&out),
        ]);

        assert!(output.status.success());
        let point = fs::read_to_string(out.join("Point.as")).unwrap();
        assert!(point.starts_with("// Generated by the protocol buffer compiler."));
        assert!(point.contains("package {"));
    }

    #[test]
    fn generate___unsupported_extension___fails() {
        let dir = TempDir::new().unwrap();
        let schema = write_schema(&dir, "widgets.yaml", SCHEMA);

        let output = as3gen(&[
            "generate",
            "--schema",
            path_str(&schema),
            "--output",
            path_str(dir.path()),
        ]);

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load schema"));
    }

    #[test]
    fn generate___missing_schema___fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.toml");

        let output = as3gen(&[
            "generate",
            "--schema",
            path_str(&missing),
            "--output",
            path_str(dir.path()),
        ]);

        assert!(!output.status.success());
    }
}

// =============================================================================
// check
// =============================================================================

mod check {
    use super::*;

    #[test]
    fn check___valid_schema___lists_planned_files() {
        let dir = TempDir::new().unwrap();
        let schema = write_schema(&dir, "widgets.toml", SCHEMA);

        let output = as3gen(&["check", "--schema", path_str(&schema)]);

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("com/example/Widget.as (Widget)"));
        assert!(stdout.contains("com/example/Widget_Part.as (Widget.Part)"));
    }

    #[test]
    fn check___info_log_level___reports_validation_on_stderr() {
        let dir = TempDir::new().unwrap();
        let schema = write_schema(&dir, "widgets.toml", SCHEMA);

        let output = as3gen(&["--log-level", "info", "check", "--schema", path_str(&schema)]);

        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("schema is valid"), "{stderr}");
    }

    #[test]
    fn check___json_flag___prints_plan_as_json() {
        let dir = TempDir::new().unwrap();
        let schema = write_schema(&dir, "widgets.toml", SCHEMA);

        let output = as3gen(&["check", "--schema", path_str(&schema), "--json"]);

        assert!(output.status.success());
        let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let files = plan.as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[1]["class_name"], "Widget_Part");
        assert_eq!(files[1]["type_name"], "Widget.Part");
    }

    #[test]
    fn check___invalid_namespace___fails_without_writing() {
        let dir = TempDir::new().unwrap();
        let schema = write_schema(
            &dir,
            "bad.toml",
            "name = \"bad.proto\"\nas3_package = \"com..example\"\n\n[[messages]]\nname = \"A\"\n",
        );

        let output = as3gen(&["check", "--schema", path_str(&schema)]);

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("invalid namespace"));
    }

    #[test]
    fn check___list_file_collides_with_generated_file___fails() {
        let dir = TempDir::new().unwrap();
        let schema = write_schema(&dir, "widgets.toml", SCHEMA);

        let output = as3gen(&[
            "check",
            "--schema",
            path_str(&schema),
            "--parameter",
            "output_list_file=com/example/Widget.as",
        ]);

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("output path collision"));
    }
}
