//! Output directory abstraction.
//!
//! Generated files are opened by path relative to the output root. The
//! filesystem implementation creates parent directories on demand; the
//! in-memory implementation records every open for inspection.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

/// Check that `path` stays below the output root.
///
/// Absolute paths and `..` components are rejected; the error is the reason.
pub fn check_relative_path(path: &str) -> Result<(), &'static str> {
    if path.is_empty() {
        return Err("path is empty");
    }
    for component in Path::new(path).components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => return Err("`..` leaves the output root"),
            Component::RootDir | Component::Prefix(_) => return Err("path is absolute"),
        }
    }
    Ok(())
}

/// A destination for generated files.
pub trait OutputDirectory {
    /// Open a stream for `relative_path`, replacing any previous contents.
    fn open(&mut self, relative_path: &str) -> io::Result<Box<dyn Write + '_>>;
}

/// Writes files below a root directory on disk.
#[derive(Debug, Clone)]
pub struct FsOutputDirectory {
    root: PathBuf,
}

impl FsOutputDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputDirectory for FsOutputDirectory {
    fn open(&mut self, relative_path: &str) -> io::Result<Box<dyn Write + '_>> {
        check_relative_path(relative_path).map_err(|reason| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{relative_path}: {reason}"),
            )
        })?;
        let path = self.root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&path)?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

/// Keeps files in memory.
#[derive(Debug, Default)]
pub struct MemoryOutputDirectory {
    files: BTreeMap<String, Vec<u8>>,
    opened: Vec<String>,
}

impl MemoryOutputDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every path passed to `open`, in call order.
    pub fn opened(&self) -> &[String] {
        &self.opened
    }

    /// Contents of `path` as UTF-8, if it was written.
    pub fn contents(&self, path: &str) -> Option<&str> {
        self.files
            .get(path)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl OutputDirectory for MemoryOutputDirectory {
    fn open(&mut self, relative_path: &str) -> io::Result<Box<dyn Write + '_>> {
        self.opened.push(relative_path.to_string());
        let buffer = self.files.entry(relative_path.to_string()).or_default();
        buffer.clear();
        Ok(Box::new(buffer))
    }
}
