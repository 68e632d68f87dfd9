//! Basename ignore list (`.insekiignore`).
//!
//! One basename per line; blank lines are skipped. Entries are compared
//! against a path's final segment only.

use std::collections::BTreeSet;
use std::path::Path;

use crate::config::{FileSystem, RealFileSystem};
use crate::error::{InsekiError, Result};
use crate::path_utils::basename;

pub const IGNORE_FILE_NAME: &str = ".insekiignore";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    names: BTreeSet<String>,
}

impl IgnoreList {
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn parse(content: &str) -> Self {
        Self::new(
            content
                .lines()
                .map(str::trim_end)
                .filter(|line| !line.is_empty()),
        )
    }

    /// Load an ignore file. A missing file is an empty list.
    ///
    /// # Errors
    /// Returns `FileRead` for any other read failure.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with(&RealFileSystem, path)
    }

    /// [`IgnoreList::load`] over an explicit [`FileSystem`].
    ///
    /// # Errors
    /// Returns `FileRead` for any read failure other than `NotFound`.
    pub fn load_with<F: FileSystem>(fs: &F, path: &Path) -> Result<Self> {
        match fs.read_to_string(path) {
            Ok(content) => Ok(Self::parse(&content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(InsekiError::FileRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    #[must_use]
    pub fn is_ignored_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Whether the final segment of `path` is listed.
    #[must_use]
    pub fn is_ignored(&self, path: &Path) -> bool {
        !self.names.is_empty() && self.is_ignored_name(&basename(path))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "ignore_list_tests.rs"]
mod tests;
