use std::path::{Path, PathBuf};

/// Expand a leading `~` or `~/` to the invoking user's home directory.
///
/// Only the first component is considered, so `/data/~/x` is left untouched.
/// When the home directory cannot be determined the path is returned as is.
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    let home = directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
    expand_home_with(path, home.as_deref())
}

/// Same as [`expand_home`] with an explicit home directory.
#[must_use]
pub fn expand_home_with(path: &Path, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };

    let Some(raw) = path.to_str() else {
        return path.to_path_buf();
    };

    if raw == "~" {
        return home.to_path_buf();
    }

    raw.strip_prefix("~/")
        .or_else(|| raw.strip_prefix("~\\"))
        .map_or_else(|| path.to_path_buf(), |rest| home.join(rest))
}

/// Final path segment as a lossy string, or the whole path when it has none.
///
/// `/` and `.` have no file name; matching against their full text keeps the
/// crawl root comparable with anchor patterns.
#[must_use]
pub fn basename(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().into_owned(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Ascend `hops` parent directories from `path`.
///
/// Returns `None` when the path runs out of parents first.
#[must_use]
pub fn ancestor(path: &Path, hops: usize) -> Option<&Path> {
    path.ancestors().nth(hops).filter(|p| !p.as_os_str().is_empty())
}
