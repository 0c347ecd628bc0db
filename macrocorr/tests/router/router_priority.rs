use std::sync::Arc;

use macrocorr::{MacroCorr, MacroCorrError, SeriesConnector, SeriesKind};

use crate::helpers::{ScriptedConnector, monthly_2020, req};

#[tokio::test]
async fn prefer_for_kind_reorders_providers() {
    let fred = ScriptedConnector::builder("fred")
        .returns(monthly_2020("x", |_| 1.0))
        .build();
    let backup = ScriptedConnector::builder("backup")
        .returns(monthly_2020("x", |_| 2.0))
        .build();

    let mc = MacroCorr::builder()
        .with_connector(fred.clone())
        .with_connector(backup.clone())
        .prefer_for_kind(SeriesKind::Macro, &[backup.clone() as Arc<dyn SeriesConnector>])
        .build()
        .unwrap();

    let macro_series = mc.fetch_series(&req("UNRATE", SeriesKind::Macro)).await.unwrap();
    assert_eq!(macro_series.first().map(|p| p.value), Some(2.0));

    // No preference for FX: registration order applies.
    let fx = mc.fetch_series(&req("CHF=X", SeriesKind::Fx)).await.unwrap();
    assert_eq!(fx.first().map(|p| p.value), Some(1.0));
    assert_eq!(fred.calls(), 1);
    assert_eq!(backup.calls(), 1);
}

#[tokio::test]
async fn connectors_are_filtered_by_kind() {
    let fx_only = ScriptedConnector::builder("fx_only")
        .kinds(&[SeriesKind::Fx])
        .returns(monthly_2020("x", |_| 1.0))
        .build();
    let macro_only = ScriptedConnector::builder("macro_only")
        .kinds(&[SeriesKind::Macro])
        .returns(monthly_2020("x", |_| 2.0))
        .build();

    let mc = MacroCorr::builder()
        .with_connector(fx_only.clone())
        .with_connector(macro_only.clone())
        .build()
        .unwrap();

    let s = mc.fetch_series(&req("CPIAUCSL", SeriesKind::Macro)).await.unwrap();
    assert_eq!(s.first().map(|p| p.value), Some(2.0));
    assert_eq!(fx_only.calls(), 0);
}

#[tokio::test]
async fn no_capable_connector_is_unsupported() {
    let fx_only = ScriptedConnector::builder("fx_only")
        .kinds(&[SeriesKind::Fx])
        .build();
    let mc = MacroCorr::builder().with_connector(fx_only).build().unwrap();

    let err = mc
        .fetch_series(&req("UNRATE", SeriesKind::Macro))
        .await
        .unwrap_err();
    assert_eq!(err, MacroCorrError::unsupported("series/macro"));
    assert!(!err.is_actionable());
}

#[tokio::test]
async fn all_not_found_collapses_to_not_found() {
    let a = ScriptedConnector::builder("a").build();
    let b = ScriptedConnector::builder("b").build();
    let mc = MacroCorr::builder()
        .with_connector(a)
        .with_connector(b)
        .build()
        .unwrap();

    let err = mc
        .fetch_series(&req("NOPE", SeriesKind::Macro))
        .await
        .unwrap_err();
    assert_eq!(err, MacroCorrError::not_found("series for NOPE"));
}

#[tokio::test]
async fn mixed_failures_are_aggregated_and_tagged() {
    let missing = ScriptedConnector::builder("missing").build();
    let broken = ScriptedConnector::builder("broken")
        .fails_with(MacroCorrError::Data("garbled payload".into()))
        .build();
    let mc = MacroCorr::builder()
        .with_connector(missing)
        .with_connector(broken)
        .build()
        .unwrap();

    let err = mc
        .fetch_series(&req("CPIAUCSL", SeriesKind::Macro))
        .await
        .unwrap_err();
    match err {
        MacroCorrError::AllProvidersFailed(errs) => {
            assert_eq!(errs.len(), 2);
            assert!(matches!(errs[0], MacroCorrError::NotFound { .. }));
            assert_eq!(
                errs[1],
                MacroCorrError::connector("broken", "data issue: garbled payload")
            );
        }
        other => panic!("unexpected: {other:?}"),
    }
}
