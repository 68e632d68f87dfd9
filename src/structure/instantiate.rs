//! Disk-probing confirmation that a directory instantiates a template.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use super::Structure;
use super::node::Node;

/// A directory entry reduced to what matching needs.
struct Entry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

/// Check whether the tree rooted at `root` instantiates `structure`.
///
/// The root's own name and kind must match the template root. Every required
/// node must then find an entry of the right kind whose name matches its
/// pattern, and whose subtree validates. Optional nodes never reject the
/// parent: an optional entry with an incomplete subtree counts as absent.
///
/// I/O failures (missing path, unreadable directory) mean "no match".
#[must_use]
pub fn instantiated_at(structure: &Structure, root: &Path) -> bool {
    let node = structure.root();

    let Ok(metadata) = fs::metadata(root) else {
        return false;
    };

    if metadata.is_dir() != node.is_directory || !root_name_matches(node, root) {
        return false;
    }

    !node.is_directory || children_satisfied(node, root)
}

/// A root without a final segment (`/`) only matches the universal wildcard.
fn root_name_matches(node: &Node, root: &Path) -> bool {
    root.file_name().map_or_else(
        || node.pattern.is_wildcard(),
        |name| node.pattern.is_match(&name.to_string_lossy()),
    )
}

fn children_satisfied(node: &Node, dir: &Path) -> bool {
    if node.children.is_empty() {
        return true;
    }

    let entries = match list_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            trace!(path = %dir.display(), error = %err, "cannot list directory");
            return false;
        }
    };

    node.children
        .iter()
        .all(|child| child_satisfied(child, &entries))
}

fn child_satisfied(child: &Node, entries: &[Entry]) -> bool {
    if child.optional {
        return true;
    }

    entries
        .iter()
        .filter(|entry| entry.is_dir == child.is_directory && child.pattern.is_match(&entry.name))
        .any(|entry| !child.is_directory || children_satisfied(child, &entry.path))
}

fn list_dir(dir: &Path) -> std::io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;
        let is_dir = if file_type.is_symlink() {
            path.is_dir()
        } else {
            file_type.is_dir()
        };
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path,
            is_dir,
        });
    }
    Ok(entries)
}

#[cfg(test)]
#[path = "instantiate_tests.rs"]
mod tests;
