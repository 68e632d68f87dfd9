//! Fan-in of confirmed matches into a minimal result set.
//!
//! Responses are grouped by detected root. Within a root the more specific
//! structure wins: an incoming structure is dropped when a kept one already
//! satisfies everything it requires, and kept structures whose requirements
//! the incoming one satisfies are replaced by it.

use std::path::PathBuf;

use crossbeam_channel::Receiver;
use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::verifier::Response;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    pub received: usize,
    /// Dropped because an equal structure was already kept at that root.
    pub duplicates: usize,
    /// Dropped or replaced because a more specific structure matched.
    pub subsumed: usize,
}

/// What happened to a response handed to [`Resolver::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Kept { replaced: usize },
    Duplicate,
    Subsumed,
}

#[derive(Debug, Default)]
pub struct Resolver<'lib> {
    groups: IndexMap<PathBuf, Vec<Response<'lib>>>,
    stats: ResolveStats,
}

impl<'lib> Resolver<'lib> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one response into the set kept for its root.
    pub fn add(&mut self, response: Response<'lib>) -> Admission {
        self.stats.received += 1;
        let kept = self.groups.entry(response.root.clone()).or_default();
        let incoming = response.structure;

        if let Some(slot) = kept.iter_mut().find(|k| k.structure.equals(incoming)) {
            self.stats.duplicates += 1;
            trace!(structure = incoming.name(), root = %response.root.display(), "duplicate match");
            // Equal structures may still differ by name; the lowest name
            // survives whatever the arrival order.
            if incoming.name() < slot.structure.name() {
                *slot = response;
            }
            return Admission::Duplicate;
        }

        if kept.iter().any(|k| incoming.contains(k.structure)) {
            self.stats.subsumed += 1;
            trace!(structure = incoming.name(), root = %response.root.display(), "subsumed match");
            return Admission::Subsumed;
        }

        let before = kept.len();
        kept.retain(|k| !k.structure.contains(incoming));
        let replaced = before - kept.len();
        self.stats.subsumed += replaced;
        kept.push(response);

        Admission::Kept { replaced }
    }

    /// Consume responses until every sender has been dropped.
    pub fn drain(&mut self, receiver: &Receiver<Response<'lib>>) {
        for response in receiver {
            self.add(response);
        }
    }

    #[must_use]
    pub const fn stats(&self) -> ResolveStats {
        self.stats
    }

    /// Surviving responses, ordered by root then structure name.
    #[must_use]
    pub fn finish(self) -> (Vec<Response<'lib>>, ResolveStats) {
        let mut matches: Vec<_> = self.groups.into_values().flatten().collect();
        matches.sort_by(|a, b| {
            a.root
                .cmp(&b.root)
                .then_with(|| a.structure.name().cmp(b.structure.name()))
        });
        debug!(
            received = self.stats.received,
            kept = matches.len(),
            duplicates = self.stats.duplicates,
            subsumed = self.stats.subsumed,
            "matches resolved"
        );
        (matches, self.stats)
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
