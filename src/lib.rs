#![doc(test(attr(deny(warnings))))]

//! Spendifix Core offers the transaction store, validation, reporting,
//! and import/export primitives behind the Spendifix finance tracker and
//! its CLI.

pub mod cli;
pub mod csv;
pub mod currency;
pub mod errors;
pub mod import;
pub mod ledger;
pub mod settings;
pub mod storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with sensible defaults and emits a startup
/// info log. Safe to call more than once.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("spendifix_core=info".parse().unwrap());
        fmt().with_env_filter(filter).init();
        tracing::info!("Spendifix tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
