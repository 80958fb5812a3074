use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Environment variable holding the log filter, e.g. `FORECASTS_LOG=debug`.
pub const LOG_ENV: &str = "FORECASTS_LOG";

/// Installs the stderr subscriber. Calling it again is a no-op.
///
/// Falls back to `warn` when `FORECASTS_LOG` is unset or invalid, so stdout
/// only carries reports unless more output is asked for.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .init();
    });
}
