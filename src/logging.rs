//! Diagnostics setup; everything goes to stderr.

use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber.
///
/// stdout belongs to the framing protocol, so nothing may log there. The level comes from
/// `RUST_LOG` and defaults to `warn`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
