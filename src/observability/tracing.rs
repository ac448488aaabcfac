//! Subscriber setup for the binary.
//!
//! `log` records from the library are bridged into `tracing`, so they are
//! printed inside the `engine` and `processor` spans they were emitted in.

use tracing_subscriber::EnvFilter;

/// Default filter for a `-v` count, used when `RUST_LOG` is unset.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Does nothing if one is already set.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if installed.is_err() {
        log::debug!("Tracing subscriber already installed");
    }
}
