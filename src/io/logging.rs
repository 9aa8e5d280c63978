//! Structured logging setup
//!
//! Log lines go to stderr alongside the progress bars. `RUST_LOG` takes
//! precedence; otherwise the verbosity count picks the level.

use tracing_subscriber::EnvFilter;

/// Log level for a `-v` count: none is `warn`, then `info`, `debug`, `trace`
pub const fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber
///
/// Returns `false` if a subscriber was already installed (for example by a
/// test harness); logging then goes to that subscriber instead.
pub fn init_logging(verbosity: u8) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
