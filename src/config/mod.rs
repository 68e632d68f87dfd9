mod filesystem;
mod loader;
mod model;

#[cfg(test)]
pub(crate) mod mock_fs;

pub use filesystem::{APP_NAME, FileSystem, RealFileSystem};
pub use loader::{ConfigLoader, FileConfigLoader, LOCAL_CONFIG_NAME, LoadResult};
pub use model::{
    Config, DEFAULT_HOME, PathsConfig, ResolvedPaths, STRUCTURES_DIR_NAME, ScanConfig,
};

use std::path::PathBuf;

use tracing::info;

use crate::error::{InsekiError, Result};

/// Create the inseki home and template directories when missing.
///
/// Returns the directories that were created, in creation order.
///
/// # Errors
/// Returns `FileRead` naming the directory that could not be created.
pub fn ensure_directories(paths: &ResolvedPaths) -> Result<Vec<PathBuf>> {
    ensure_directories_with(&RealFileSystem, paths)
}

/// [`ensure_directories`] over an explicit [`FileSystem`].
///
/// # Errors
/// Returns `FileRead` naming the directory that could not be created.
pub fn ensure_directories_with<F: FileSystem>(fs: &F, paths: &ResolvedPaths) -> Result<Vec<PathBuf>> {
    let mut created = Vec::new();
    for dir in [&paths.home, &paths.structures] {
        if fs.is_dir(dir) {
            continue;
        }
        fs.create_dir_all(dir).map_err(|source| InsekiError::FileRead {
            path: dir.clone(),
            source,
        })?;
        info!(dir = %dir.display(), "created directory");
        created.push(dir.clone());
    }
    Ok(created)
}
