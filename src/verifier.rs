//! Bounded fan-out of instantiation checks.
//!
//! One pool task per [`Target`]. Tasks only write to the results channel,
//! and the channel closes once every task has finished and the caller's
//! sender is dropped.

use std::path::PathBuf;

use crossbeam_channel::Sender;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};

use crate::crawler::Target;
use crate::error::{InsekiError, Result};
use crate::path_utils::ancestor;
use crate::structure::{Structure, instantiated_at};

/// A confirmed match.
#[derive(Debug, Clone)]
pub struct Response<'lib> {
    /// The anchor hit that led to the match.
    pub anchor: PathBuf,
    pub structure: &'lib Structure,
    /// Directory (or file) the structure was found rooted at.
    pub root: PathBuf,
}

pub struct Verifier {
    pool: ThreadPool,
}

impl Verifier {
    /// Create a verifier with `jobs` worker threads (`0` = one per CPU).
    ///
    /// # Errors
    /// Returns `ThreadPool` if the worker threads cannot be spawned.
    pub fn new(jobs: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(jobs)
            .thread_name(|i| format!("inseki-verify-{i}"))
            .build()
            .map_err(|err| InsekiError::ThreadPool(err.to_string()))?;
        debug!(threads = pool.current_num_threads(), "verifier pool ready");
        Ok(Self { pool })
    }

    #[must_use]
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Verify every target, sending confirmed matches to `results`.
    ///
    /// Blocks until all tasks are done. `results` is dropped on return, so a
    /// receiver draining concurrently sees the channel close.
    pub fn dispatch<'lib>(
        &self,
        mut targets: Vec<Target<'_, 'lib>>,
        results: Sender<Response<'lib>>,
        on_verified: &(dyn Fn() + Sync),
    ) {
        self.pool.scope(|scope| {
            while let Some(target) = targets.pop() {
                let results = results.clone();
                scope.spawn(move |_| {
                    for response in verify_target(&target) {
                        if results.send(response).is_err() {
                            break;
                        }
                    }
                    on_verified();
                });
            }
        });
    }
}

/// Try every structure associated with `target` at its candidate root.
///
/// Candidate roots that would lie above the filesystem root are skipped.
#[must_use]
pub fn verify_target<'lib>(target: &Target<'_, 'lib>) -> Vec<Response<'lib>> {
    let mut responses = Vec::new();

    for association in &target.associations {
        for member in &association.members {
            let Some(root) = ancestor(&target.path, member.hops) else {
                trace!(path = %target.path.display(), hops = member.hops, "no candidate root");
                continue;
            };

            let matched = instantiated_at(member.structure, root);
            trace!(
                structure = member.structure.name(),
                root = %root.display(),
                matched,
                "verified"
            );
            if matched {
                responses.push(Response {
                    anchor: target.path.clone(),
                    structure: member.structure,
                    root: root.to_path_buf(),
                });
            }
        }
    }

    responses
}

#[cfg(test)]
#[path = "verifier_tests.rs"]
mod tests;
