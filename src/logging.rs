//! Process-wide logging setup
//!
//! Log output goes to stderr so that stdout stays free for violation reports.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
///
/// - Default level: INFO, or TRACE with file/line info when `verbose`
/// - `RUST_LOG` overrides the level when set
pub fn init(verbose: bool) {
    let default_level = if verbose { "trace" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_file(verbose)
        .with_line_number(verbose)
        .try_init();

    // Already installed (e.g. by a test harness)
    if result.is_err() {
        tracing::debug!("Tracing subscriber already initialized");
    }
}
