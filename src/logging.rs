//! Diagnostic logging setup
//!
//! Business events go to the audit log; this is for operator diagnostics.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "BUDGETWISE_LOG";

static INIT: Once = Once::new();

/// Initialize the tracing subscriber.
///
/// Reads `BUDGETWISE_LOG` for filter directives, e.g.
/// `BUDGETWISE_LOG=budgetwise::allocator=debug,budgetwise::storage=info`.
/// Falls back to `budgetwise=warn`. Output goes to stderr so it never mixes
/// with exported data on stdout.
///
/// Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("budgetwise=warn"));

        // Another subscriber may already be installed (e.g. by a test harness)
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .try_init();
    });
}
