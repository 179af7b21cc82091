//! Diagnostic tracing for flowgen.
//!
//! User-facing narration goes through [`crate::output`]; this is only for
//! debugging and is written to stderr.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn`, or `debug` with `--verbose`.
///
/// ```bash
/// RUST_LOG=flowgen_git=debug flowgen good
/// ```
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
