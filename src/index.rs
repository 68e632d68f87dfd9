//! Anchor pattern index.
//!
//! Maps each anchor pattern (a template's root pattern, unless it is the
//! universal wildcard, plus the pattern of every immediate child of the
//! root) to the structures it may indicate and the hop distance from the
//! anchor back to the template root.

use std::path::Path;

use globset::{GlobSet, GlobSetBuilder};
use indexmap::IndexMap;
use tracing::debug;

use crate::error::{InsekiError, Result};
use crate::structure::{NamePattern, Structure, TemplateLibrary};

/// Index construction switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOptions {
    /// Optional immediate children also act as anchors.
    pub include_optional_anchors: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            include_optional_anchors: true,
        }
    }
}

/// A structure reachable from an anchor, `hops` levels below its root.
#[derive(Debug, Clone, Copy)]
pub struct Anchored<'lib> {
    pub structure: &'lib Structure,
    pub hops: usize,
}

/// Every structure indexed under one anchor pattern.
#[derive(Debug)]
pub struct Association<'lib> {
    pub pattern: NamePattern,
    pub members: Vec<Anchored<'lib>>,
}

/// Read-only index built once per run.
#[derive(Debug)]
pub struct PatternIndex<'lib> {
    associations: IndexMap<String, Association<'lib>>,
    matcher: GlobSet,
}

impl<'lib> PatternIndex<'lib> {
    /// Build the index in a single pass over the library.
    ///
    /// # Errors
    /// Returns `InvalidPattern` if the combined anchor set fails to compile.
    pub fn build(library: &'lib TemplateLibrary, options: IndexOptions) -> Result<Self> {
        let mut associations: IndexMap<String, Association<'lib>> = IndexMap::new();

        for structure in library {
            let root = structure.root();
            let mut anchors = Vec::new();
            if !root.pattern.is_wildcard() {
                anchors.push((&root.pattern, 0));
            }
            anchors.extend(
                root.children
                    .iter()
                    .filter(|child| options.include_optional_anchors || !child.optional)
                    .map(|child| (&child.pattern, 1)),
            );

            for (pattern, hops) in anchors {
                let association = associations
                    .entry(pattern.as_str().to_string())
                    .or_insert_with(|| Association {
                        pattern: pattern.clone(),
                        members: Vec::new(),
                    });
                let duplicate = association
                    .members
                    .iter()
                    .any(|m| std::ptr::eq(m.structure, structure) && m.hops == hops);
                if !duplicate {
                    association.members.push(Anchored { structure, hops });
                }
            }
        }

        let matcher = build_matcher(associations.values())?;
        debug!(anchors = associations.len(), "pattern index built");

        Ok(Self {
            associations,
            matcher,
        })
    }

    /// Associations whose anchor pattern matches `name`, in index order.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Vec<&Association<'lib>> {
        let mut hits = self.matcher.matches(Path::new(name));
        hits.sort_unstable();
        hits.into_iter()
            .filter_map(|i| self.associations.get_index(i).map(|(_, a)| a))
            .collect()
    }

    #[must_use]
    pub fn get(&self, pattern: &str) -> Option<&Association<'lib>> {
        self.associations.get(pattern)
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.associations.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.associations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.associations.is_empty()
    }
}

fn build_matcher<'a, 'lib: 'a>(
    associations: impl Iterator<Item = &'a Association<'lib>>,
) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for association in associations {
        builder.add(association.pattern.glob().clone());
    }
    builder.build().map_err(|source| InsekiError::InvalidPattern {
        pattern: "combined anchor patterns".to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod tests;
