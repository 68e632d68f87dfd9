//! Detect instances of known directory-layout templates in a filesystem tree.
//!
//! Pipeline: [`structure::import_structures`] loads the template library,
//! [`index::PatternIndex`] derives anchor patterns from it, the
//! [`crawler::Crawler`] walks the tree once collecting anchor hits, the
//! [`verifier::Verifier`] confirms each hit on a worker pool and the
//! [`resolver::Resolver`] keeps the most specific match per root.
//! [`detector::Detector`] wires the stages together.

pub mod cli;
pub mod config;
pub mod crawler;
pub mod detector;
pub mod error;
pub mod ignore_list;
pub mod index;
pub mod logging;
pub mod output;
pub mod path_utils;
pub mod resolver;
pub mod structure;
pub mod verifier;

pub use error::{InsekiError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
