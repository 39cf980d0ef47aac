// SPDX-License-Identifier: GPL-3.0-only

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_DIRECTIVE: &str = "arbitration=debug,warn";

/// Install a test-writer subscriber; later calls are no-ops
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let test_layer = tracing_subscriber::fmt::layer()
        .with_test_writer()
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(test_layer)
        .try_init();
}
