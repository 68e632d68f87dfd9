//! Content hashing of template trees.
//!
//! A node's hash covers its pattern, directory flag, optional flag and the
//! hashes of its children in order. Fields are tagged and length-prefixed so
//! distinct trees cannot produce the same byte stream.

use std::fmt;

use sha2::{Digest, Sha224};

use super::node::Node;

/// SHA-224 digest of a template tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructureHash([u8; 28]);

impl StructureHash {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 28] {
        &self.0
    }

    /// First 12 hex digits, for compact listings.
    #[must_use]
    pub fn short(&self) -> String {
        self.to_string()[..12].to_string()
    }
}

impl fmt::Display for StructureHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for StructureHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StructureHash({})", self.short())
    }
}

/// Hash a node and, recursively, its children.
#[must_use]
pub fn hash_node(node: &Node) -> StructureHash {
    let pattern = node.pattern.as_str().as_bytes();

    let mut hasher = Sha224::new();
    hasher.update(b"node");
    hasher.update((pattern.len() as u64).to_be_bytes());
    hasher.update(pattern);
    hasher.update([u8::from(node.is_directory), u8::from(node.optional)]);
    hasher.update((node.children.len() as u64).to_be_bytes());
    for child in &node.children {
        hasher.update(hash_node(child).0);
    }

    let mut bytes = [0u8; 28];
    bytes.copy_from_slice(&hasher.finalize());
    StructureHash(bytes)
}

#[cfg(test)]
#[path = "hash_tests.rs"]
mod tests;
