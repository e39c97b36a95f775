//! Tracing subscriber setup.

use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "classroom_service=info,tower_http=info";

/// Install the global fmt subscriber. `RUST_LOG` overrides [`DEFAULT_FILTER`].
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    fmt().with_env_filter(filter).with_target(true).init();
}

/// Verbose subscriber for tests; safe to call from every test.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("classroom_service=debug"))
        .with_test_writer()
        .try_init();
}
