//! Generator options parsed from the plugin parameter string

use crate::error::{GeneratorError, GeneratorResult};
use serde::{Deserialize, Serialize};

/// Key naming the file that receives the list of generated files
pub const OUTPUT_LIST_FILE: &str = "output_list_file";

/// Options recognised by the generator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    /// Path, relative to the output root, of the manifest file.
    ///
    /// An empty value behaves as if the option was not given.
    #[serde(default)]
    pub output_list_file: Option<String>,
}

impl GeneratorOptions {
    /// Create options with every key unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `key[=value],...` parameter string
    ///
    /// Any key other than [`OUTPUT_LIST_FILE`] is rejected. A repeated key
    /// keeps its last value.
    pub fn parse(parameter: &str) -> GeneratorResult<Self> {
        let mut options = Self::default();

        for (key, value) in split_parameter(parameter) {
            match key.as_str() {
                OUTPUT_LIST_FILE => options.output_list_file = Some(value),
                _ => return Err(GeneratorError::UnknownOption(key)),
            }
        }

        Ok(options)
    }

    /// The manifest path, if one was configured with a non-empty value
    pub fn output_list_file(&self) -> Option<&str> {
        self.output_list_file.as_deref().filter(|path| !path.is_empty())
    }

    /// Set the manifest path
    pub fn with_output_list_file(mut self, path: impl Into<String>) -> Self {
        self.output_list_file = Some(path.into());
        self
    }
}

/// Split `"foo=bar,baz,qux=corge"` into `("foo", "bar"), ("baz", ""), ("qux", "corge")`
///
/// Empty tokens are skipped. Only the first `=` separates key from value.
pub fn split_parameter(text: &str) -> Vec<(String, String)> {
    text.split(',')
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (part.to_string(), String::new()),
        })
        .collect()
}
