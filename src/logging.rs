//! Diagnostic logging through `tracing`.
//!
//! Logs go to stderr so they never mix with scan results on stdout.
//! `INSEKI_LOG` (an `EnvFilter` directive such as `inseki=debug`) takes
//! precedence over the `-v`/`-q` flags.

use tracing::Level;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "INSEKI_LOG";

/// Level selected by the command-line flags.
#[must_use]
pub const fn level_for(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn build_filter(verbose: u8, quiet: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose, quiet).as_str()))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbose: u8, quiet: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose, quiet))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
