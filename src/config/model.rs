use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ignore_list::IGNORE_FILE_NAME;
use crate::path_utils::expand_home;

/// Default inseki home, before `~` expansion.
pub const DEFAULT_HOME: &str = "~/.config/inseki";

/// Name of the template directory inside the inseki home.
pub const STRUCTURES_DIR_NAME: &str = "structures";

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub scan: ScanConfig,
}

/// Where inseki keeps its data. Unset entries derive from `home`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_home")]
    pub home: PathBuf,

    /// Template directory (default: `<home>/structures`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structures: Option<PathBuf>,

    /// Ignore list (default: `<home>/.insekiignore`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_file: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            home: default_home(),
            structures: None,
            ignore_file: None,
        }
    }
}

/// Crawl and verification tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Verification workers; `0` means one per logical CPU.
    #[serde(default)]
    pub jobs: usize,

    /// Optional immediate children of a template root act as anchors.
    #[serde(default = "default_true")]
    pub include_optional_anchors: bool,

    #[serde(default)]
    pub follow_links: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            jobs: 0,
            include_optional_anchors: true,
            follow_links: false,
        }
    }
}

/// Configured paths with `~` expanded and defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub home: PathBuf,
    pub structures: PathBuf,
    pub ignore_file: PathBuf,
}

impl PathsConfig {
    #[must_use]
    pub fn resolve(&self) -> ResolvedPaths {
        self.resolve_with(expand_home)
    }

    /// Resolve with a custom `~` expansion.
    pub fn resolve_with(&self, expand: impl Fn(&Path) -> PathBuf) -> ResolvedPaths {
        let home = expand(&self.home);
        let structures = self
            .structures
            .as_deref()
            .map_or_else(|| home.join(STRUCTURES_DIR_NAME), &expand);
        let ignore_file = self
            .ignore_file
            .as_deref()
            .map_or_else(|| home.join(IGNORE_FILE_NAME), &expand);

        ResolvedPaths {
            home,
            structures,
            ignore_file,
        }
    }
}

fn default_home() -> PathBuf {
    PathBuf::from(DEFAULT_HOME)
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
