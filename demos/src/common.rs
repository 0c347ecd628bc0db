use std::sync::Arc;

use macrocorr::{SeriesConnector, SeriesSpec};

/// Environment variable that switches the demos to deterministic fixtures.
pub const USE_MOCK_ENV: &str = "MACROCORR_DEMOS_USE_MOCK";

/// Return the connectors for demos.
///
/// Yahoo serves the FX primary and FRED the macro indicators; both are wrapped
/// in the default fetch cache.
#[must_use]
pub fn get_connectors() -> Vec<Arc<dyn SeriesConnector>> {
    if std::env::var(USE_MOCK_ENV).is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        vec![Arc::new(macrocorr_mock::MockConnector::new())]
    } else {
        vec![
            macrocorr_yahoo::YahooConnector::cached().build(),
            macrocorr_fred::FredConnector::cached().build(),
        ]
    }
}

/// USD/CHF, the primary every demo correlates against.
#[must_use]
pub fn usdchf() -> SeriesSpec {
    SeriesSpec::fx("CHF=X").labeled("USDCHF")
}

/// Default macro indicator selection.
#[must_use]
pub fn default_indicators() -> Vec<SeriesSpec> {
    vec![
        SeriesSpec::macro_series("CPIAUCSL"),
        SeriesSpec::macro_series("UNRATE"),
        SeriesSpec::macro_series("DGS10"),
        SeriesSpec::macro_series("FEDFUNDS"),
    ]
}

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}
