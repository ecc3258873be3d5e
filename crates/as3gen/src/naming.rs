//! Naming convention utilities for code generation.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `snake_case` | [`to_camel_case`] | `snakeCase` |
//! | `word` | [`capitalize`] | `Word` |
//! | `Outer.Inner` | [`class_name_for_reference`] | `Outer_Inner` |
//! | `a.b` | [`package_dir`] | `a/b` |

/// Extension of every generated source file.
pub const FILE_EXTENSION: &str = ".as";

/// ActionScript 3 reserved words that cannot be used as identifiers.
const AS3_KEYWORDS: &[&str] = &[
    "as", "break", "case", "catch", "class", "const", "continue", "default", "delete", "do",
    "else", "extends", "false", "finally", "for", "function", "if", "implements", "import", "in",
    "instanceof", "interface", "internal", "is", "native", "new", "null", "package", "private",
    "protected", "public", "return", "super", "switch", "this", "throw", "to", "true", "try",
    "typeof", "use", "var", "void", "while", "with",
];

/// Convert snake_case to camelCase.
///
/// The first letter is lowercased; a letter following `_` or a digit is
/// uppercased.
///
/// # Examples
///
/// ```
/// use as3gen::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("display_name"), "displayName");
/// assert_eq!(to_camel_case("Id"), "id");
/// assert_eq!(to_camel_case("field2name"), "field2Name");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = false;

    for c in s.chars() {
        if c == '_' {
            capitalize_next = !result.is_empty();
        } else if c.is_ascii_digit() {
            result.push(c);
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else if result.is_empty() {
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use as3gen::naming::capitalize;
///
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Whether `s` is an ActionScript 3 reserved word.
pub fn is_keyword(s: &str) -> bool {
    AS3_KEYWORDS.contains(&s)
}

/// The member name used for a field: camelCase, with a trailing `_` on keywords.
pub fn field_name(name: &str) -> String {
    let camel = to_camel_case(name);
    if is_keyword(&camel) {
        format!("{camel}_")
    } else {
        camel
    }
}

/// The capitalized name used in accessor names (`getFooBar`).
pub fn capitalized_field_name(name: &str) -> String {
    capitalize(&to_camel_case(name))
}

/// Class name of a record type declared in `scope` (the enclosing class, if any).
pub fn class_name(scope: Option<&str>, name: &str) -> String {
    match scope {
        Some(outer) => format!("{outer}_{name}"),
        None => name.to_string(),
    }
}

/// Class name of the builder paired with a value-holder class.
pub fn builder_class_name(class_name: &str) -> String {
    format!("{class_name}Builder")
}

/// Class name for a referenced type.
///
/// Accepts a package-relative name (`Outer.Inner`) or a fully qualified one
/// (`.pkg.Outer.Inner`); the leading dot and the package prefix are
/// stripped and the remaining dots become `_`.
pub fn class_name_for_reference(type_name: &str, package: &str) -> String {
    let relative = match type_name.strip_prefix('.') {
        Some(qualified) if package.is_empty() => qualified,
        Some(qualified) => qualified
            .strip_prefix(package)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(qualified),
        None => type_name,
    };
    relative.replace('.', "_")
}

/// Directory for a namespace: `a.b` becomes `a/b`.
pub fn package_dir(namespace: &str) -> String {
    namespace.replace('.', "/")
}

/// Relative output path for a class in a namespace.
///
/// ```
/// use as3gen::naming::output_path;
///
/// assert_eq!(output_path("a.b", "Widget"), "a/b/Widget.as");
/// assert_eq!(output_path("", "Widget"), "Widget.as");
/// ```
pub fn output_path(namespace: &str, class_name: &str) -> String {
    let dir = package_dir(namespace);
    if dir.is_empty() {
        format!("{class_name}{FILE_EXTENSION}")
    } else {
        format!("{dir}/{class_name}{FILE_EXTENSION}")
    }
}

/// Whether `s` is a valid ActionScript identifier.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
