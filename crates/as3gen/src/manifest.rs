//! The ordered list of files produced by a run.

use crate::output::OutputDirectory;
use as3gen_core::{GeneratorError, GeneratorResult};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Relative paths of generated files, in generation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    files: Vec<String>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<String>) {
        self.files.push(path.into());
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// One path per line, each followed by a newline.
    pub fn to_text(&self) -> String {
        self.files.iter().fold(String::new(), |mut text, file| {
            text.push_str(file);
            text.push('\n');
            text
        })
    }

    /// Write the list file `path` into `output`.
    pub fn write_to(&self, output: &mut dyn OutputDirectory, path: &str) -> GeneratorResult<()> {
        let mut stream = output
            .open(path)
            .map_err(|source| GeneratorError::io(path, source))?;
        stream
            .write_all(self.to_text().as_bytes())
            .and_then(|()| stream.flush())
            .map_err(|source| GeneratorError::io(path, source))
    }
}

impl<S: Into<String>> FromIterator<S> for Manifest {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
