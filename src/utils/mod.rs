pub mod paths;

use std::{env, sync::Once};

use tracing_subscriber::{fmt, EnvFilter};

/// Filter directives for this crate's logs; `RUST_LOG` is read when unset.
pub const LOG_ENV: &str = "BUDGET_TRACKER_LOG";
const DEFAULT_DIRECTIVE: &str = "budget_tracker=info";

static TRACING_INIT: Once = Once::new();

/// Installs the global subscriber once.
///
/// Logs go to stderr so script-mode output on stdout stays parseable.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let raw = env::var(LOG_ENV).or_else(|_| env::var("RUST_LOG")).ok();
        let _ = fmt()
            .with_env_filter(log_filter(raw.as_deref()))
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

/// Parses `raw` as filter directives, falling back to the crate default when
/// it is missing or malformed.
fn log_filter(raw: Option<&str>) -> EnvFilter {
    raw.filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
