//! Single-threaded pre-order walk that flags candidate anchor locations.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::error::{InsekiError, Result};
use crate::ignore_list::IgnoreList;
use crate::index::{Association, PatternIndex};
use crate::path_utils::{basename, expand_home};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Follow symbolic links while walking.
    pub follow_links: bool,
}

/// A path whose basename matched at least one anchor pattern.
#[derive(Debug)]
pub struct Target<'i, 'lib> {
    pub path: PathBuf,
    pub is_dir: bool,
    pub associations: Vec<&'i Association<'lib>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Entries tested against the index.
    pub entries_visited: usize,
    /// Of which regular files (and non-followed links).
    pub files_visited: usize,
    /// Entries dropped by the ignore list.
    pub ignored: usize,
    /// Entries skipped for lack of permission.
    pub skipped: usize,
    pub targets: usize,
}

/// Crawl result. Targets form a stack: the last one found is verified first.
#[derive(Debug)]
pub struct CrawlOutcome<'i, 'lib> {
    pub targets: Vec<Target<'i, 'lib>>,
    pub stats: CrawlStats,
}

pub struct Crawler<'i, 'lib> {
    index: &'i PatternIndex<'lib>,
    options: CrawlOptions,
}

impl<'i, 'lib> Crawler<'i, 'lib> {
    #[must_use]
    pub const fn new(index: &'i PatternIndex<'lib>, options: CrawlOptions) -> Self {
        Self { index, options }
    }

    /// Walk `root` in sorted pre-order.
    ///
    /// Ignored directories are pruned. A directory that matches an anchor is
    /// recorded and not descended into.
    ///
    /// # Errors
    /// Returns `Walk` on any I/O failure other than permission denied,
    /// including a missing root.
    pub fn crawl(&self, root: &Path, ignore: &IgnoreList) -> Result<CrawlOutcome<'i, 'lib>> {
        let root = expand_home(root);
        let mut walker = WalkDir::new(&root)
            .follow_links(self.options.follow_links)
            .sort_by_file_name()
            .into_iter();

        let mut targets = Vec::new();
        let mut stats = CrawlStats::default();

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().unwrap_or(&root).to_path_buf();
                    if is_skippable(&err) {
                        debug!(path = %path.display(), error = %err, "skipping entry");
                        stats.skipped += 1;
                        continue;
                    }
                    return Err(InsekiError::Walk {
                        path,
                        source: err.into(),
                    });
                }
            };

            let is_dir = entry.file_type().is_dir();
            let name = basename(entry.path());

            if ignore.is_ignored_name(&name) {
                stats.ignored += 1;
                if is_dir {
                    walker.skip_current_dir();
                }
                continue;
            }

            stats.entries_visited += 1;
            if !is_dir {
                stats.files_visited += 1;
            }

            let associations = self.index.lookup(&name);
            if associations.is_empty() {
                continue;
            }

            if is_dir {
                walker.skip_current_dir();
            }
            trace!(path = %entry.path().display(), anchors = associations.len(), "anchor hit");
            targets.push(Target {
                path: entry.into_path(),
                is_dir,
                associations,
            });
        }

        stats.targets = targets.len();
        debug!(
            root = %root.display(),
            visited = stats.entries_visited,
            targets = stats.targets,
            "crawl finished"
        );

        Ok(CrawlOutcome { targets, stats })
    }
}

/// Permission problems and symlink loops do not abort the walk.
fn is_skippable(err: &walkdir::Error) -> bool {
    err.loop_ancestor().is_some()
        || err
            .io_error()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::PermissionDenied)
}

#[cfg(test)]
#[path = "crawler_tests.rs"]
mod tests;
