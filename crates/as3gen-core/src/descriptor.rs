//! Schema descriptor tree.
//!
//! The generators read an already-validated description of one schema file:
//! its package, and an ordered tree of record types (messages) with their
//! fields. The tree is immutable for the lifetime of a generation run.
//!
//! # Structure
//!
//! - [`SchemaFile`]: package/namespace plus the top-level record types
//! - [`RecordType`]: a named record with ordered fields and nested records
//! - [`Field`]: a numbered member with a [`FieldType`] and a [`Label`]
//!
//! # Loading
//!
//! Schemas can be loaded from TOML or JSON. In TOML:
//!
//! ```toml
//! name = "shop.proto"
//! package = "com.example.shop"
//!
//! [[messages]]
//! name = "Order"
//!
//! [[messages.fields]]
//! name = "order_id"
//! number = 1
//! type = "int64"
//!
//! [[messages.fields]]
//! name = "lines"
//! number = 2
//! type = "message"
//! label = "repeated"
//! type_name = "Order.Line"
//!
//! [[messages.nested]]
//! name = "Line"
//! ```
//!
//! # Classification
//!
//! Every field is classified along two axes, [`ValueCategory`] and
//! [`Cardinality`]. The field generators are selected from this pair.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a schema description
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("failed to read schema {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML schema: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported schema format `{0}` (expected .toml or .json)")]
    UnsupportedFormat(String),
}

/// A parsed schema file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Source file name, echoed in generated headers.
    pub name: String,

    /// Dot-separated package.
    #[serde(default)]
    pub package: String,

    /// Output namespace override; replaces `package` when present.
    #[serde(default)]
    pub as3_package: Option<String>,

    /// Top-level record types in declaration order.
    #[serde(default)]
    pub messages: Vec<RecordType>,
}

/// A record type (message).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordType {
    pub name: String,

    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<Field>,

    /// Nested record types in declaration order.
    #[serde(default)]
    pub nested: Vec<RecordType>,
}

/// A field of a record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,

    /// Declared field number.
    pub number: u32,

    #[serde(rename = "type")]
    pub ty: FieldType,

    #[serde(default)]
    pub label: Label,

    /// Referenced type for `message` and `enum` fields.
    ///
    /// Either relative to the package (`Outer.Inner`) or fully qualified
    /// with a leading dot (`.com.example.Outer.Inner`).
    #[serde(default)]
    pub type_name: Option<String>,

    /// Default value as written in the schema.
    #[serde(default)]
    pub default_value: Option<String>,
}

/// Declared field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Double,
    Float,
    Int64,
    Uint64,
    Int32,
    Fixed64,
    Fixed32,
    Bool,
    String,
    Group,
    Message,
    Bytes,
    Uint32,
    Enum,
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
}

/// Field label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    #[default]
    Optional,
    Required,
    Repeated,
}

/// What kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueCategory {
    /// A nested record.
    Record,
    /// An enumerated constant.
    Enumerated,
    /// A primitive scalar (numbers, booleans, strings, bytes).
    Primitive,
}

/// How many values a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    Singular,
    Repeated,
}

impl FieldType {
    /// Every declared field type, in descriptor numbering order.
    pub const ALL: [FieldType; 18] = [
        FieldType::Double,
        FieldType::Float,
        FieldType::Int64,
        FieldType::Uint64,
        FieldType::Int32,
        FieldType::Fixed64,
        FieldType::Fixed32,
        FieldType::Bool,
        FieldType::String,
        FieldType::Group,
        FieldType::Message,
        FieldType::Bytes,
        FieldType::Uint32,
        FieldType::Enum,
        FieldType::Sfixed32,
        FieldType::Sfixed64,
        FieldType::Sint32,
        FieldType::Sint64,
    ];

    /// Whether values of this type are primitive scalars.
    pub fn is_scalar(self) -> bool {
        !matches!(self, FieldType::Group | FieldType::Message | FieldType::Enum)
    }

    /// The lowercase schema spelling of this type.
    pub fn name(self) -> &'static str {
        match self {
            FieldType::Double => "double",
            FieldType::Float => "float",
            FieldType::Int64 => "int64",
            FieldType::Uint64 => "uint64",
            FieldType::Int32 => "int32",
            FieldType::Fixed64 => "fixed64",
            FieldType::Fixed32 => "fixed32",
            FieldType::Bool => "bool",
            FieldType::String => "string",
            FieldType::Group => "group",
            FieldType::Message => "message",
            FieldType::Bytes => "bytes",
            FieldType::Uint32 => "uint32",
            FieldType::Enum => "enum",
            FieldType::Sfixed32 => "sfixed32",
            FieldType::Sfixed64 => "sfixed64",
            FieldType::Sint32 => "sint32",
            FieldType::Sint64 => "sint64",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl SchemaFile {
    /// Create an empty schema file.
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            as3_package: None,
            messages: Vec::new(),
        }
    }

    /// Append a top-level record type.
    pub fn with_message(mut self, message: RecordType) -> Self {
        self.messages.push(message);
        self
    }

    /// Override the output namespace.
    pub fn with_as3_package(mut self, package: impl Into<String>) -> Self {
        self.as3_package = Some(package.into());
        self
    }

    /// The namespace generated code is placed in.
    pub fn namespace(&self) -> &str {
        self.as3_package.as_deref().unwrap_or(&self.package)
    }

    /// Number of record types reachable from the top-level types, nested included.
    pub fn record_count(&self) -> usize {
        self.messages.iter().map(RecordType::record_count).sum()
    }

    /// Load a schema from a `.toml` or `.json` file.
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => Err(SchemaError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    /// Parse a schema from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SchemaError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a schema from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(content)?)
    }
}

impl RecordType {
    /// Create a record type with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Append a field.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a nested record type.
    pub fn with_nested(mut self, nested: RecordType) -> Self {
        self.nested.push(nested);
        self
    }

    /// This record plus every record nested in it, transitively.
    pub fn record_count(&self) -> usize {
        1 + self.nested.iter().map(RecordType::record_count).sum::<usize>()
    }

    /// Declaration index of the field with the given number.
    pub fn field_position(&self, number: u32) -> Option<usize> {
        self.fields.iter().position(|field| field.number == number)
    }
}

impl Field {
    /// Create an optional field.
    pub fn new(name: impl Into<String>, number: u32, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            number,
            ty,
            label: Label::Optional,
            type_name: None,
            default_value: None,
        }
    }

    /// Create an optional field referencing a record type.
    pub fn message(name: impl Into<String>, number: u32, type_name: impl Into<String>) -> Self {
        Self::new(name, number, FieldType::Message).with_type_name(type_name)
    }

    /// Create an optional field referencing an enum type.
    pub fn enumeration(name: impl Into<String>, number: u32, type_name: impl Into<String>) -> Self {
        Self::new(name, number, FieldType::Enum).with_type_name(type_name)
    }

    /// Mark the field repeated.
    pub fn repeated(mut self) -> Self {
        self.label = Label::Repeated;
        self
    }

    /// Mark the field required.
    pub fn required(mut self) -> Self {
        self.label = Label::Required;
        self
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn cardinality(&self) -> Cardinality {
        match self.label {
            Label::Repeated => Cardinality::Repeated,
            Label::Optional | Label::Required => Cardinality::Singular,
        }
    }

    pub fn is_repeated(&self) -> bool {
        self.cardinality() == Cardinality::Repeated
    }

    /// The field's value category, or `None` when it has none.
    ///
    /// Groups have no category, and neither do `message`/`enum` fields
    /// that lack a `type_name`.
    pub fn value_category(&self) -> Option<ValueCategory> {
        match self.ty {
            FieldType::Group => None,
            FieldType::Message => self.type_name.as_ref().map(|_| ValueCategory::Record),
            FieldType::Enum => self.type_name.as_ref().map(|_| ValueCategory::Enumerated),
            _ => Some(ValueCategory::Primitive),
        }
    }
}

#[cfg(test)]
#[path = "descriptor/descriptor_tests.rs"]
mod descriptor_tests;
