//! Logger bootstrap for the runner binary and tests.
//!
//! Simulation targets log at `info`, or `debug` when verbose, while
//! dependencies stay at `warn` so per-tick engine chatter does not drown
//! entity lifecycle messages. `RUST_LOG` replaces the whole filter.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Filter used when `RUST_LOG` is unset.
fn default_filter(verbose: bool) -> String {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    format!("{},{}={level}", LevelFilter::Warn, env!("CARGO_CRATE_NAME"))
}

/// Installs the global logger unless one is already set.
///
/// Repeated calls, such as one per test, leave the first logger in place.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    if Builder::from_env(env)
        .format_timestamp_millis()
        .try_init()
        .is_err()
    {
        log::debug!("logger already installed");
    }
}
