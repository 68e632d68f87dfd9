//! Seam for the small amount of non-scan I/O inseki does: config discovery,
//! the ignore list and bootstrapping the data directory.
//!
//! The crawl and the instantiation check read the real tree directly.

use std::io;
use std::path::{Path, PathBuf};

/// Name under which inseki looks up its platform directories.
pub const APP_NAME: &str = "inseki";

pub trait FileSystem {
    /// # Errors
    /// Any read failure, including `NotFound`.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Regular file (after following links) at `path`.
    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents.
    ///
    /// # Errors
    /// Returns the underlying error when a component cannot be created.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// # Errors
    /// Returns an error if the working directory is gone or unreadable.
    fn current_dir(&self) -> io::Result<PathBuf>;

    /// Per-user config directory (`~/.config/inseki` on Linux), if the
    /// platform has one.
    fn config_dir(&self) -> Option<PathBuf>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }
}
