//! Template emitter with `$name$` substitution and line indentation.

use as3gen_core::{GeneratorError, GeneratorResult};
use std::collections::BTreeMap;

/// Substitution table for a template.
pub type Variables = BTreeMap<&'static str, String>;

const INDENT: &str = "  ";

/// Accumulates generated text.
///
/// Templates reference variables as `$name$`; `$$` emits a literal `$`.
/// The current indentation is inserted at the start of every non-empty line.
#[derive(Debug)]
pub struct Printer {
    output: String,
    indent: String,
    at_line_start: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: String::new(),
            at_line_start: true,
        }
    }

    /// Print `template`, substituting every `$name$` from `variables`.
    ///
    /// An unterminated or unbound placeholder is a [`GeneratorError::Template`].
    pub fn print(&mut self, template: &str, variables: &Variables) -> GeneratorResult<()> {
        let mut rest = template;
        while let Some(start) = rest.find('$') {
            self.write_text(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after.find('$').ok_or_else(|| {
                GeneratorError::Template(format!(
                    "unterminated variable in `{}`",
                    template.lines().next().unwrap_or_default()
                ))
            })?;
            let name = &after[..end];
            if name.is_empty() {
                self.write_text("$");
            } else {
                let value = variables.get(name).ok_or_else(|| {
                    GeneratorError::Template(format!("undefined variable `{name}`"))
                })?;
                self.write_text(value);
            }
            rest = &after[end + 1..];
        }
        self.write_text(rest);
        Ok(())
    }

    /// Print text verbatim, with indentation but no substitution.
    pub fn print_raw(&mut self, text: &str) {
        self.write_text(text);
    }

    pub fn indent(&mut self) {
        self.indent.push_str(INDENT);
    }

    /// Undo one [`indent`](Self::indent). Outdenting past zero is a no-op.
    pub fn outdent(&mut self) {
        let len = self.indent.len().saturating_sub(INDENT.len());
        self.indent.truncate(len);
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub fn into_string(self) -> String {
        self.output
    }

    fn write_text(&mut self, text: &str) {
        for line in text.split_inclusive('\n') {
            if self.at_line_start && !line.starts_with('\n') {
                self.output.push_str(&self.indent);
            }
            self.output.push_str(line);
            self.at_line_start = line.ends_with('\n');
        }
    }
}
