//! Turn an existing directory into a template.

use std::path::Path;

use walkdir::WalkDir;

use super::node::Node;
use super::pattern::{NamePattern, WILDCARD};
use crate::error::{InsekiError, Result};
use crate::ignore_list::IgnoreList;

#[derive(Debug, Clone)]
pub struct CaptureOptions {
    /// Pattern given to the template root.
    pub root_pattern: String,
    /// Deepest level captured below the root (`None` = unlimited).
    pub max_depth: Option<usize>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            root_pattern: WILDCARD.to_string(),
            max_depth: None,
        }
    }
}

/// Capture every entry below `dir` as a required node.
///
/// Children are sorted by name and real names are escaped so that glob
/// metacharacters in file names match literally.
///
/// # Errors
/// Returns `Walk` if the directory cannot be traversed, or `InvalidPattern`
/// if `root_pattern` is not a valid glob.
pub fn capture_directory(dir: &Path, ignore: &IgnoreList, options: &CaptureOptions) -> Result<Node> {
    NamePattern::new(options.root_pattern.as_str())?;

    let mut walker = WalkDir::new(dir).min_depth(1).sort_by_file_name();
    if let Some(depth) = options.max_depth {
        walker = walker.max_depth(depth);
    }

    let mut paths = Vec::new();
    for entry in walker
        .into_iter()
        .filter_entry(|entry| !ignore.is_ignored(entry.path()))
    {
        let entry = entry.map_err(|err| InsekiError::Walk {
            path: err.path().unwrap_or(dir).to_path_buf(),
            source: err.into(),
        })?;

        let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
        let mut rel = relative
            .components()
            .map(|c| globset::escape(&c.as_os_str().to_string_lossy()))
            .collect::<Vec<_>>()
            .join("/");
        if entry.file_type().is_dir() {
            rel.push('/');
        }
        paths.push(rel);
    }

    Node::from_paths(&options.root_pattern, &paths)
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;
