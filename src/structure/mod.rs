//! In-memory template model.
//!
//! A [`Structure`] is a named, rooted [`Node`] tree loaded once from the
//! template library and never mutated afterwards. Containment and equality
//! are pure tree relations; only [`instantiated_at`] touches the disk.

mod capture;
mod hash;
mod instantiate;
mod library;
mod node;
mod pattern;
mod relation;

pub use capture::{CaptureOptions, capture_directory};
pub use hash::{StructureHash, hash_node};
pub use instantiate::instantiated_at;
pub use library::{ImportReport, ImportWarning, TemplateLibrary, import_structures};
pub use node::Node;
pub use pattern::{NamePattern, WILDCARD};
pub use relation::contains;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// A named template tree with its content hash.
#[derive(Clone)]
pub struct Structure {
    name: String,
    source: Option<PathBuf>,
    root: Node,
    hash: StructureHash,
}

impl Structure {
    #[must_use]
    pub fn new(name: impl Into<String>, root: Node) -> Self {
        let hash = hash_node(&root);
        Self {
            name: name.into(),
            source: None,
            root,
            hash,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: PathBuf) -> Self {
        self.source = Some(source);
        self
    }

    /// Replace the computed hash, to exercise collision handling.
    #[cfg(test)]
    pub(crate) fn with_forged_hash(mut self, hash: StructureHash) -> Self {
        self.hash = hash;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Template file this structure was loaded from, if any.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    #[must_use]
    pub const fn root(&self) -> &Node {
        &self.root
    }

    #[must_use]
    pub const fn hash(&self) -> StructureHash {
        self.hash
    }

    /// `self` is satisfied by `other`: everything `self` requires, `other` has.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || contains(&self.root, &other.root)
    }

    /// Mutual containment.
    ///
    /// Identical hashes with identical trees short-circuit; otherwise both
    /// directions of [`contains`] are evaluated, so trees that differ only in
    /// child order or optional flags still compare equal.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        if self.hash == other.hash && self.root == other.root {
            return true;
        }
        self.contains(other) && other.contains(self)
    }

    /// Serialize the tree back to the template JSON format.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    /// Write the template JSON to `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn export(&self, path: &Path) -> Result<()> {
        let mut json = self.to_json()?;
        json.push('\n');
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl fmt::Debug for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Structure")
            .field("name", &self.name)
            .field("hash", &self.hash)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
