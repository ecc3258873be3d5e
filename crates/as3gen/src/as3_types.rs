//! ActionScript 3 type mappings for scalar fields.
//!
//! # Type Mappings
//!
//! | Field type | AS3 type | Runtime suffix | Zero |
//! |------------|----------|----------------|------|
//! | `double` | `Number` | `Double` | `0` |
//! | `float` | `Number` | `Float` | `0` |
//! | `int64` / `sint64` / `sfixed64` | `Number` | `Int64` / `SInt64` / `SFixed64` | `0` |
//! | `uint64` / `fixed64` | `Number` | `UInt64` / `Fixed64` | `0` |
//! | `int32` / `sint32` / `sfixed32` | `int` | `Int32` / `SInt32` / `SFixed32` | `0` |
//! | `uint32` / `fixed32` | `uint` | `UInt32` / `Fixed32` | `0` |
//! | `bool` | `Boolean` | `Bool` | `false` |
//! | `string` | `String` | `String` | `""` |
//! | `bytes` | `ByteArray` | `Bytes` | `null` |
//! | `enum` | `int` | `Enum` | `0` |
//!
//! The runtime suffix names the `CodedOutputStream.write<Suffix>`,
//! `CodedOutputStream.compute<Suffix>Size` and `CodedInputStream.read<Suffix>`
//! helpers used by the emitted code.

use as3gen_core::FieldType;

/// Runtime suffix for record-typed fields (`writeMessage`).
pub const MESSAGE_SUFFIX: &str = "Message";

/// Runtime suffix for enum fields (`writeEnum`).
pub const ENUM_SUFFIX: &str = "Enum";

/// Storage type of enum values.
pub const ENUM_TYPE: &str = "int";

/// An AS3 scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct As3Type {
    /// The declared AS3 type (`int`, `Number`, `String`).
    pub name: &'static str,
    /// Suffix of the runtime read/write/size helpers.
    pub suffix: &'static str,
    /// Literal for the type's zero value.
    pub zero: &'static str,
    /// Whether values are references that may be `null`.
    pub is_reference: bool,
}

impl As3Type {
    const fn value(name: &'static str, suffix: &'static str, zero: &'static str) -> Self {
        Self {
            name,
            suffix,
            zero,
            is_reference: false,
        }
    }

    const fn reference(name: &'static str, suffix: &'static str, zero: &'static str) -> Self {
        Self {
            name,
            suffix,
            zero,
            is_reference: true,
        }
    }

    /// The element type used inside arrays and `for each` loops.
    ///
    /// AS3 has no boxing; every type is usable as an array element, so this
    /// is the declared type itself.
    pub fn boxed(&self) -> &'static str {
        self.name
    }
}

/// Map a scalar field type to its AS3 type.
///
/// Returns `None` for `message`, `enum` and `group`, which are not scalars.
pub fn scalar_type(ty: FieldType) -> Option<As3Type> {
    let mapped = match ty {
        FieldType::Double => As3Type::value("Number", "Double", "0"),
        FieldType::Float => As3Type::value("Number", "Float", "0"),
        FieldType::Int64 => As3Type::value("Number", "Int64", "0"),
        FieldType::Uint64 => As3Type::value("Number", "UInt64", "0"),
        FieldType::Sint64 => As3Type::value("Number", "SInt64", "0"),
        FieldType::Fixed64 => As3Type::value("Number", "Fixed64", "0"),
        FieldType::Sfixed64 => As3Type::value("Number", "SFixed64", "0"),
        FieldType::Int32 => As3Type::value("int", "Int32", "0"),
        FieldType::Sint32 => As3Type::value("int", "SInt32", "0"),
        FieldType::Sfixed32 => As3Type::value("int", "SFixed32", "0"),
        FieldType::Uint32 => As3Type::value("uint", "UInt32", "0"),
        FieldType::Fixed32 => As3Type::value("uint", "Fixed32", "0"),
        FieldType::Bool => As3Type::value("Boolean", "Bool", "false"),
        FieldType::String => As3Type::reference("String", "String", "\"\""),
        FieldType::Bytes => As3Type::reference("ByteArray", "Bytes", "null"),
        FieldType::Message | FieldType::Enum | FieldType::Group => return None,
    };
    Some(mapped)
}

/// Literal for a scalar field's default value.
///
/// Without a schema default the type's zero is used. Bytes defaults are
/// not representable as a literal and fall back to `null`.
pub fn default_literal(ty: FieldType, as3_type: &As3Type, default_value: Option<&str>) -> String {
    let Some(value) = default_value else {
        return as3_type.zero.to_string();
    };

    match ty {
        FieldType::String => quote_string(value),
        FieldType::Bytes => as3_type.zero.to_string(),
        FieldType::Bool => match value {
            "true" => "true".to_string(),
            _ => "false".to_string(),
        },
        FieldType::Double | FieldType::Float => match value {
            "inf" => "Number.POSITIVE_INFINITY".to_string(),
            "-inf" => "Number.NEGATIVE_INFINITY".to_string(),
            "nan" => "Number.NaN".to_string(),
            _ => value.to_string(),
        },
        _ => value.to_string(),
    }
}

/// Literal for an enum field's default value.
///
/// A named default is emitted as a constant reference on the enum class.
pub fn enum_default_literal(enum_class: &str, default_value: Option<&str>) -> String {
    match default_value {
        Some(name) if !name.is_empty() => format!("{enum_class}.{name}"),
        _ => "0".to_string(),
    }
}

/// Quote a string as an AS3 double-quoted literal.
pub fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
