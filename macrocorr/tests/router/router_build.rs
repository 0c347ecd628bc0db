use std::sync::Arc;
use std::time::Duration;

use macrocorr::{
    FetchStrategy, MacroCorr, MacroCorrConfig, MacroCorrError, SeriesConnector, SeriesKind,
};

use crate::helpers::{ScriptedConnector, monthly_2020, req};

#[test]
fn build_without_connectors_is_invalid() {
    let err = MacroCorr::builder().build().err().expect("must fail");
    assert!(matches!(err, MacroCorrError::InvalidArg(msg) if msg.contains("no connectors")));
}

#[test]
fn builder_setters_land_in_config() {
    let c = ScriptedConnector::builder("c").build();
    let mc = MacroCorr::builder()
        .with_connector(c)
        .fetch_strategy(FetchStrategy::Latency)
        .provider_timeout(Duration::from_millis(250))
        .request_timeout(Duration::from_secs(2))
        .rolling_window(12)
        .trim_leading_rows(true)
        .build()
        .unwrap();

    let cfg = mc.config();
    assert_eq!(cfg.fetch_strategy, FetchStrategy::Latency);
    assert_eq!(cfg.provider_timeout, Duration::from_millis(250));
    assert_eq!(cfg.request_timeout, Some(Duration::from_secs(2)));
    assert_eq!(cfg.rolling_window, Some(12));
    assert!(cfg.trim_leading_rows);
}

#[test]
fn config_replaces_defaults() {
    let cfg = MacroCorrConfig {
        rolling_window: Some(6),
        ..MacroCorrConfig::default()
    };
    let mc = MacroCorr::builder()
        .with_connector(ScriptedConnector::builder("c").build())
        .config(cfg)
        .build()
        .unwrap();
    assert_eq!(mc.config().rolling_window, Some(6));
    assert_eq!(mc.config().provider_timeout, Duration::from_secs(5));
}

#[tokio::test]
async fn priority_keys_for_unregistered_connectors_are_ignored() {
    let registered = ScriptedConnector::builder("registered")
        .returns(monthly_2020("x", |i| i as f64 + 1.0))
        .build();
    let stranger = ScriptedConnector::builder("stranger").build();

    let mc = MacroCorr::builder()
        .with_connector(registered.clone())
        .prefer_for_kind(
            SeriesKind::Macro,
            &[stranger.clone() as Arc<dyn SeriesConnector>, registered.clone()],
        )
        .build()
        .unwrap();

    let s = mc.fetch_series(&req("UNRATE", SeriesKind::Macro)).await.unwrap();
    assert_eq!(s.name(), "UNRATE");
    assert_eq!(registered.calls(), 1);
    assert_eq!(stranger.calls(), 0);
}
