use std::time::Duration;

use macrocorr::{FetchStrategy, MacroCorr, MacroCorrError, SeriesKind};

use crate::helpers::{ScriptedConnector, monthly_2020, req};

#[tokio::test]
async fn strategy_latency_returns_fastest_success() {
    let fast_ok = ScriptedConnector::builder("fast")
        .delay(Duration::from_millis(10))
        .returns(monthly_2020("x", |_| 11.0))
        .build();
    let slow_ok = ScriptedConnector::builder("slow")
        .delay(Duration::from_millis(150))
        .returns(monthly_2020("x", |_| 99.0))
        .build();

    let mc = MacroCorr::builder()
        .with_connector(slow_ok)
        .with_connector(fast_ok)
        .fetch_strategy(FetchStrategy::Latency)
        .build()
        .unwrap();

    let s = mc.fetch_series(&req("CHF=X", SeriesKind::Fx)).await.unwrap();
    assert_eq!(s.first().map(|p| p.value), Some(11.0));
}

#[tokio::test]
async fn strategy_latency_ignores_faster_failure_and_returns_first_success() {
    let fast_fail = ScriptedConnector::builder("fast_fail")
        .delay(Duration::from_millis(5))
        .fails_with(MacroCorrError::Other("boom".into()))
        .build();
    let slow_ok = ScriptedConnector::builder("slow_ok")
        .delay(Duration::from_millis(20))
        .returns(monthly_2020("x", |_| 77.0))
        .build();

    let mc = MacroCorr::builder()
        .with_connector(fast_fail)
        .with_connector(slow_ok)
        .fetch_strategy(FetchStrategy::Latency)
        .build()
        .unwrap();

    let s = mc.fetch_series(&req("CHF=X", SeriesKind::Fx)).await.unwrap();
    assert_eq!(s.first().map(|p| p.value), Some(77.0));
}

#[tokio::test]
async fn strategy_latency_all_failures_are_tagged() {
    let a = ScriptedConnector::builder("a")
        .fails_with(MacroCorrError::Other("a broke".into()))
        .build();
    let b = ScriptedConnector::builder("b")
        .fails_with(MacroCorrError::Data("bad csv".into()))
        .build();

    let mc = MacroCorr::builder()
        .with_connector(a)
        .with_connector(b)
        .fetch_strategy(FetchStrategy::Latency)
        .build()
        .unwrap();

    match mc.fetch_series(&req("CPIAUCSL", SeriesKind::Macro)).await {
        Err(MacroCorrError::AllProvidersFailed(errs)) => {
            assert_eq!(errs.len(), 2);
            let mut names: Vec<String> = errs
                .iter()
                .map(|e| match e {
                    MacroCorrError::Connector { connector, .. } => connector.clone(),
                    other => panic!("untagged error: {other:?}"),
                })
                .collect();
            names.sort();
            assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn strategy_priority_with_fallback_obeys_order_and_timeout() {
    let very_slow = ScriptedConnector::builder("first")
        .delay(Duration::from_millis(200))
        .returns(monthly_2020("x", |_| 1000.0))
        .build();
    let ok = ScriptedConnector::builder("second")
        .delay(Duration::from_millis(10))
        .returns(monthly_2020("x", |_| 42.0))
        .build();

    let mc = MacroCorr::builder()
        .with_connector(very_slow.clone())
        .with_connector(ok.clone())
        .fetch_strategy(FetchStrategy::PriorityWithFallback)
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let s = mc.fetch_series(&req("CHF=X", SeriesKind::Fx)).await.unwrap();
    assert_eq!(s.first().map(|p| p.value), Some(42.0));
    assert_eq!(very_slow.calls(), 1);
    assert_eq!(ok.calls(), 1);
}

#[tokio::test]
async fn priority_stops_at_first_success() {
    let first = ScriptedConnector::builder("first")
        .returns(monthly_2020("x", |_| 1.0))
        .build();
    let second = ScriptedConnector::builder("second")
        .returns(monthly_2020("x", |_| 2.0))
        .build();

    let mc = MacroCorr::builder()
        .with_connector(first.clone())
        .with_connector(second.clone())
        .build()
        .unwrap();

    let s = mc.fetch_series(&req("CHF=X", SeriesKind::Fx)).await.unwrap();
    assert_eq!(s.first().map(|p| p.value), Some(1.0));
    assert_eq!(second.calls(), 0);
}

#[tokio::test]
async fn all_timeouts_collapse_to_all_providers_timed_out() {
    for strategy in [FetchStrategy::PriorityWithFallback, FetchStrategy::Latency] {
        let a = ScriptedConnector::builder("a")
            .delay(Duration::from_millis(200))
            .returns(monthly_2020("x", |_| 1.0))
            .build();
        let b = ScriptedConnector::builder("b")
            .delay(Duration::from_millis(200))
            .returns(monthly_2020("x", |_| 1.0))
            .build();
        let mc = MacroCorr::builder()
            .with_connector(a)
            .with_connector(b)
            .fetch_strategy(strategy)
            .provider_timeout(Duration::from_millis(20))
            .build()
            .unwrap();

        let err = mc
            .fetch_series(&req("CHF=X", SeriesKind::Fx))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            MacroCorrError::AllProvidersTimedOut {
                capability: "series/fx".into()
            },
            "strategy {strategy:?}"
        );
    }
}
