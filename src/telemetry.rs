//! Log output for the CLI
//!
//! Routing decisions are emitted as `tracing` events; this installs the
//! subscriber that prints them.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Install the global subscriber; later calls do nothing
///
/// `RUST_LOG` takes precedence over `default_level` (normally
/// `observability.log_level`). Events go to stderr, leaving stdout for the
/// JSON the CLI prints.
///
/// # Example
///
/// ```no_run
/// monkeyroute::telemetry::init("info");
/// tracing::info!("Router ready");
/// ```
pub fn init(default_level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("monkeyroute={}", default_level)));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        // Second call must be a no-op rather than a double-registration panic
        init("debug");
        init("info");
        tracing::debug!("telemetry initialized twice without panicking");
    }
}
