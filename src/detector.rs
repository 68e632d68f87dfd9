//! End-to-end detection: index, crawl, verify, resolve.

use std::collections::BTreeSet;
use std::path::Path;
use std::thread;

use tracing::info;

use crate::crawler::{CrawlOptions, CrawlOutcome, CrawlStats, Crawler};
use crate::error::{InsekiError, Result};
use crate::ignore_list::IgnoreList;
use crate::index::{IndexOptions, PatternIndex};
use crate::resolver::{ResolveStats, Resolver};
use crate::structure::TemplateLibrary;
use crate::verifier::{Response, Verifier};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectOptions {
    /// Verification workers (`0` = one per CPU).
    pub jobs: usize,
    pub index: IndexOptions,
    pub crawl: CrawlOptions,
}

/// Final result of a run.
#[derive(Debug)]
pub struct Detection<'lib> {
    /// Surviving matches, sorted by root then structure name.
    pub matches: Vec<Response<'lib>>,
    pub crawl: CrawlStats,
    pub resolve: ResolveStats,
}

impl Detection<'_> {
    /// Number of distinct detected roots.
    #[must_use]
    pub fn roots(&self) -> usize {
        self.matches
            .iter()
            .map(|m| m.root.as_path())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

pub struct Detector<'lib> {
    index: PatternIndex<'lib>,
    verifier: Verifier,
    crawl_options: CrawlOptions,
}

impl<'lib> Detector<'lib> {
    /// Build the index and the worker pool.
    ///
    /// # Errors
    /// Returns `NoStructures` for an empty library, before any crawl.
    pub fn new(library: &'lib TemplateLibrary, options: DetectOptions) -> Result<Self> {
        if library.is_empty() {
            return Err(InsekiError::NoStructures {
                dir: library.dir().to_path_buf(),
            });
        }

        Ok(Self {
            index: PatternIndex::build(library, options.index)?,
            verifier: Verifier::new(options.jobs)?,
            crawl_options: options.crawl,
        })
    }

    #[must_use]
    pub const fn index(&self) -> &PatternIndex<'lib> {
        &self.index
    }

    /// Phase one: walk `root` and collect targets.
    ///
    /// # Errors
    /// Propagates fatal walk errors.
    pub fn crawl(&self, root: &Path, ignore: &IgnoreList) -> Result<CrawlOutcome<'_, 'lib>> {
        Crawler::new(&self.index, self.crawl_options).crawl(root, ignore)
    }

    /// Phase two: verify all targets on the pool while resolving on the
    /// calling thread. `on_verified` runs once per finished target.
    #[must_use]
    pub fn verify(
        &self,
        outcome: CrawlOutcome<'_, 'lib>,
        on_verified: &(dyn Fn() + Sync),
    ) -> Detection<'lib> {
        let CrawlOutcome { targets, stats } = outcome;
        let (sender, receiver) = crossbeam_channel::unbounded();
        let verifier = &self.verifier;

        let resolver = thread::scope(|scope| {
            scope.spawn(move || verifier.dispatch(targets, sender, on_verified));
            let mut resolver = Resolver::new();
            resolver.drain(&receiver);
            resolver
        });

        let (matches, resolve) = resolver.finish();
        info!(
            targets = stats.targets,
            matches = matches.len(),
            "detection finished"
        );

        Detection {
            matches,
            crawl: stats,
            resolve,
        }
    }

    /// Crawl then verify, without progress reporting.
    ///
    /// # Errors
    /// Propagates fatal walk errors.
    pub fn detect(&self, root: &Path, ignore: &IgnoreList) -> Result<Detection<'lib>> {
        let outcome = self.crawl(root, ignore)?;
        Ok(self.verify(outcome, &|| {}))
    }
}

#[cfg(test)]
#[path = "detector_tests.rs"]
mod tests;
