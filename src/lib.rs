#![doc(test(attr(deny(warnings))))]

//! Budget Tracker keeps a running budget and an expense ledger, derives the
//! remaining balance after every change, and persists the lot to a local
//! key-value store.

pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod notify;
pub mod session;
pub mod storage;
pub mod utils;

pub use session::{InputForm, Session};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Installs logging and records which build is running.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            build = env!("BUDGET_TRACKER_BUILD_HASH"),
            profile = env!("BUDGET_TRACKER_BUILD_PROFILE"),
            "budget tracker starting"
        );
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
