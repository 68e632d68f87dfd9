use std::fmt;
use std::path::Path;

use globset::{Glob, GlobBuilder, GlobMatcher};

use crate::error::{InsekiError, Result};

/// The universal wildcard. A template root using it is never an anchor.
pub const WILDCARD: &str = "*";

/// A single-segment name pattern: a literal file name or a glob expression.
///
/// Patterns only ever match one path segment, so `*` never crosses `/`.
#[derive(Clone)]
pub struct NamePattern {
    raw: String,
    glob: Glob,
    matcher: GlobMatcher,
}

impl NamePattern {
    /// Compile a pattern.
    ///
    /// # Errors
    /// Returns `InvalidPattern` when the glob syntax is malformed (e.g. `[abc`).
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let glob = GlobBuilder::new(&raw)
            .literal_separator(true)
            .backslash_escape(true)
            .build()
            .map_err(|source| InsekiError::InvalidPattern {
                pattern: raw.clone(),
                source,
            })?;

        Ok(Self {
            matcher: glob.compile_matcher(),
            glob,
            raw,
        })
    }

    /// Pattern for an exact file name, escaping any glob metacharacters.
    ///
    /// # Errors
    /// Returns `InvalidPattern` if the escaped name still fails to compile.
    pub fn literal(name: &str) -> Result<Self> {
        Self::new(globset::escape(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.raw == WILDCARD
    }

    /// Compiled glob, for building combined matchers.
    #[must_use]
    pub const fn glob(&self) -> &Glob {
        &self.glob
    }

    /// Test a concrete file name against this pattern.
    #[must_use]
    pub fn is_match(&self, name: &str) -> bool {
        self.matcher.is_match(Path::new(name))
    }

    /// Whether this pattern accepts everything `other` names.
    ///
    /// Used between two template nodes: the other pattern's text is treated
    /// as a name, so `*.c` covers `main.c` and `*.c` itself.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        self.raw == other.raw || self.is_match(&other.raw)
    }
}

impl PartialEq for NamePattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for NamePattern {}

impl fmt::Debug for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NamePattern").field(&self.raw).finish()
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
