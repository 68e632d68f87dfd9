use std::fmt;

use serde::{Deserialize, Serialize};

use super::pattern::NamePattern;
use crate::error::{InsekiError, Result};

/// One element of a template tree.
///
/// Children are owned by their parent; there are no back references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub struct Node {
    pub pattern: NamePattern,
    pub is_directory: bool,
    pub optional: bool,
    pub children: Vec<Self>,
}

/// On-disk JSON shape of a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    name: String,
    #[serde(default)]
    is_directory: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    optional: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Self>,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde's skip_serializing_if signature
const fn is_false(value: &bool) -> bool {
    !*value
}

impl TryFrom<RawNode> for Node {
    type Error = InsekiError;

    fn try_from(raw: RawNode) -> Result<Self> {
        if !raw.is_directory && !raw.children.is_empty() {
            return Err(InsekiError::Config(format!(
                "file node '{}' cannot have children",
                raw.name
            )));
        }

        let children = raw
            .children
            .into_iter()
            .map(Self::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            pattern: NamePattern::new(raw.name)?,
            is_directory: raw.is_directory,
            optional: raw.optional,
            children,
        })
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        Self {
            name: node.pattern.as_str().to_string(),
            is_directory: node.is_directory,
            optional: node.optional,
            children: node.children.into_iter().map(Self::from).collect(),
        }
    }
}

impl Node {
    /// Required file node.
    ///
    /// # Errors
    /// Returns `InvalidPattern` for malformed globs.
    pub fn file(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: NamePattern::new(pattern)?,
            is_directory: false,
            optional: false,
            children: Vec::new(),
        })
    }

    /// Required directory node with the given children.
    ///
    /// # Errors
    /// Returns `InvalidPattern` for malformed globs.
    pub fn dir(pattern: &str, children: Vec<Self>) -> Result<Self> {
        Ok(Self {
            pattern: NamePattern::new(pattern)?,
            is_directory: true,
            optional: false,
            children,
        })
    }

    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Build a directory tree from slash-separated relative paths.
    ///
    /// A trailing `/` marks a directory; every intermediate component is a
    /// directory. Components are used verbatim as patterns.
    ///
    /// # Errors
    /// Returns `InvalidPattern` when a component is not a valid glob, or
    /// `Config` when a path uses a file as a directory.
    pub fn from_paths<S: AsRef<str>>(root_pattern: &str, paths: &[S]) -> Result<Self> {
        let mut root = Self::dir(root_pattern, Vec::new())?;
        for path in paths {
            let path = path.as_ref();
            let is_dir = path.ends_with('/');
            let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
            root.insert_path(&parts, is_dir, path)?;
        }
        Ok(root)
    }

    fn insert_path(&mut self, parts: &[&str], leaf_is_dir: bool, full: &str) -> Result<()> {
        let Some((first, rest)) = parts.split_first() else {
            return Ok(());
        };
        let is_dir = !rest.is_empty() || leaf_is_dir;

        let position = self
            .children
            .iter()
            .position(|child| child.pattern.as_str() == *first);
        let index = match position {
            Some(index) => {
                if self.children[index].is_directory != is_dir {
                    return Err(InsekiError::Config(format!(
                        "path '{full}' uses '{first}' both as a file and a directory"
                    )));
                }
                index
            }
            None => {
                let child = if is_dir {
                    Self::dir(first, Vec::new())?
                } else {
                    Self::file(first)?
                };
                self.children.push(child);
                self.children.len() - 1
            }
        };

        self.children[index].insert_path(rest, leaf_is_dir, full)
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Iterate over children that must be present.
    pub fn required_children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter(|child| !child.optional)
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        let kind = if self.is_directory { "Directory" } else { "File" };
        let suffix = if self.optional { " (optional)" } else { "" };
        writeln!(f, "{indent}{kind}: {}{suffix}", self.pattern)?;
        for child in &self.children {
            child.write_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
