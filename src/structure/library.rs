//! Template library import.
//!
//! Templates are `*.json` files found recursively under a directory. A bad
//! file never aborts the import: it becomes an [`ImportWarning`]. Only a
//! hash collision between structurally different templates is fatal.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use super::hash::StructureHash;
use super::node::Node;
use super::Structure;
use crate::error::{InsekiError, Result};
use crate::ignore_list::IgnoreList;

const TEMPLATE_EXTENSION: &str = "json";

/// Recoverable problem found while importing templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportWarning {
    /// The file could not be read or parsed; it was skipped.
    Malformed { path: PathBuf, reason: String },
    /// The file describes a structure already loaded from `original`.
    Duplicate { path: PathBuf, original: PathBuf },
    /// A directory could not be entered.
    Unreadable { path: PathBuf },
}

impl ImportWarning {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Malformed { path, .. }
            | Self::Duplicate { path, .. }
            | Self::Unreadable { path } => path,
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Malformed { path, reason } => {
                format!("Skipping malformed template {}: {reason}", path.display())
            }
            Self::Duplicate { path, original } => format!(
                "Skipping duplicate template {} (same structure as {})",
                path.display(),
                original.display()
            ),
            Self::Unreadable { path } => {
                format!("Permission denied, skipping {}", path.display())
            }
        }
    }
}

/// Outcome of [`import_structures`].
#[derive(Debug)]
pub struct ImportReport {
    pub library: TemplateLibrary,
    pub warnings: Vec<ImportWarning>,
    /// Number of template files examined, including skipped ones.
    pub files_read: usize,
}

/// Immutable set of loaded structures.
#[derive(Debug, Default)]
pub struct TemplateLibrary {
    dir: PathBuf,
    structures: Vec<Structure>,
}

impl TemplateLibrary {
    #[must_use]
    pub fn from_structures(structures: Vec<Structure>) -> Self {
        Self {
            dir: PathBuf::new(),
            structures,
        }
    }

    /// Directory the library was imported from (empty when built in memory).
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.structures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Structure> {
        self.structures.iter()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Structure> {
        self.structures.iter().find(|s| s.name() == name)
    }
}

impl<'a> IntoIterator for &'a TemplateLibrary {
    type Item = &'a Structure;
    type IntoIter = std::slice::Iter<'a, Structure>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Import every template below `dir`, pruning ignored basenames.
///
/// Files are visited in sorted order so that, among duplicates, the first
/// one by path is kept.
///
/// # Errors
/// Returns `NoStructures` if `dir` does not exist, `TemplateConflict` on a
/// hash collision, and `Walk` for fatal directory traversal errors.
pub fn import_structures(dir: &Path, ignore: &IgnoreList) -> Result<ImportReport> {
    if !dir.is_dir() {
        return Err(InsekiError::NoStructures {
            dir: dir.to_path_buf(),
        });
    }

    let mut importer = Importer::default();

    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !ignore.is_ignored(entry.path()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(dir).to_path_buf();
                if err.io_error().map(std::io::Error::kind)
                    == Some(std::io::ErrorKind::PermissionDenied)
                {
                    importer.warnings.push(ImportWarning::Unreadable { path });
                    continue;
                }
                return Err(InsekiError::Walk {
                    path,
                    source: err.into(),
                });
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some(TEMPLATE_EXTENSION)
        {
            continue;
        }

        importer.files_read += 1;
        match read_template(dir, path) {
            Ok(structure) => importer.add(structure)?,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "template rejected");
                importer.warnings.push(ImportWarning::Malformed {
                    path: path.to_path_buf(),
                    reason: skip_reason(&err),
                });
            }
        }
    }

    info!(
        dir = %dir.display(),
        loaded = importer.structures.len(),
        skipped = importer.warnings.len(),
        "templates imported"
    );

    Ok(ImportReport {
        library: TemplateLibrary {
            dir: dir.to_path_buf(),
            structures: importer.structures,
        },
        warnings: importer.warnings,
        files_read: importer.files_read,
    })
}

#[derive(Default)]
struct Importer {
    structures: Vec<Structure>,
    by_hash: HashMap<StructureHash, usize>,
    warnings: Vec<ImportWarning>,
    files_read: usize,
}

impl Importer {
    fn add(&mut self, structure: Structure) -> Result<()> {
        let existing = match self.by_hash.entry(structure.hash()) {
            Entry::Occupied(slot) => *slot.get(),
            Entry::Vacant(slot) => {
                slot.insert(self.structures.len());
                self.structures.push(structure);
                return Ok(());
            }
        };

        let kept = &self.structures[existing];
        let original = origin(kept).to_path_buf();
        let path = origin(&structure).to_path_buf();

        if kept.equals(&structure) {
            self.warnings
                .push(ImportWarning::Duplicate { path, original });
            return Ok(());
        }

        Err(InsekiError::TemplateConflict {
            first: original,
            second: path,
        })
    }
}

fn origin(structure: &Structure) -> &Path {
    structure
        .source()
        .unwrap_or_else(|| Path::new(structure.name()))
}

fn read_template(base: &Path, path: &Path) -> Result<Structure> {
    let content = fs::read_to_string(path).map_err(|source| InsekiError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let root: Node = serde_json::from_str(&content).map_err(|source| InsekiError::TemplateParse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Structure::new(template_name(base, path), root).with_source(path.to_path_buf()))
}

/// Name of a template: its path relative to the library, minus `.json`,
/// with `/` separators.
fn template_name(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path).with_extension("");
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn skip_reason(err: &InsekiError) -> String {
    match err {
        InsekiError::TemplateParse { source, .. } => source.to_string(),
        InsekiError::FileRead { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "library_tests.rs"]
mod tests;
