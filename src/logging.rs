//! Logging initialization
//!
//! Diagnostics go through `tracing` to stderr so they never mix with the
//! status line on stdout. `RUST_LOG` overrides the level chosen here.

use std::io::IsTerminal;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event, for CI log collectors
    Json,
}

static INIT_ONCE: Once = Once::new();

/// Default filter directive for the given verbosity
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "release_docs_guard=debug"
    } else {
        "release_docs_guard=warn"
    }
}

/// Initialize the tracing subscriber. Later calls are no-ops.
pub fn init(format: LogFormat, verbose: bool) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .with_target(false);

        let result = match format {
            LogFormat::Text => builder.try_init(),
            LogFormat::Json => builder.json().try_init(),
        };

        // Another subscriber already installed (e.g. by a test harness).
        if result.is_err() {
            tracing::debug!("tracing subscriber already set");
        }
    });
}
