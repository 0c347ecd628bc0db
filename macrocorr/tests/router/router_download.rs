use std::time::Duration;

use macrocorr::{Interval, MacroCorr, MacroCorrError, SeriesSpec};
use macrocorr_mock::MockConnector;

use crate::helpers::{ScriptedConnector, monthly_2020, year_2020};

fn mock_mc() -> MacroCorr {
    MacroCorr::builder()
        .with_connector(std::sync::Arc::new(MockConnector::new()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn download_fetches_every_series_in_order() {
    let mc = mock_mc();
    let report = mc
        .download()
        .series(&[
            SeriesSpec::macro_series("CPIAUCSL"),
            SeriesSpec::macro_series("UNRATE").labeled("Unemployment"),
            SeriesSpec::fx("CHF=X"),
        ])
        .unwrap()
        .range(year_2020())
        .interval(Interval::Monthly)
        .run()
        .await
        .unwrap();

    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    let names: Vec<&str> = report.series.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["CPIAUCSL", "Unemployment", "CHF=X"]);
    assert!(report.series.iter().all(|s| s.len() == 12));
}

#[tokio::test]
async fn download_reports_failures_as_fetch_warnings() {
    let mc = mock_mc();
    let report = mc
        .download()
        .series(&[
            SeriesSpec::macro_series("UNRATE"),
            SeriesSpec::macro_series("FAIL"),
            SeriesSpec::macro_series("NOPE"),
        ])
        .unwrap()
        .range(year_2020())
        .run()
        .await
        .unwrap();

    assert_eq!(report.series.len(), 1);
    assert_eq!(report.warnings.len(), 2);
    let symbols: Vec<&str> = report
        .warnings
        .iter()
        .map(|w| match w {
            MacroCorrError::Fetch { symbol, .. } => symbol.as_str(),
            other => panic!("unexpected warning: {other:?}"),
        })
        .collect();
    assert_eq!(symbols, vec!["FAIL", "NOPE"]);
}

#[test]
fn download_rejects_duplicate_symbols() {
    let mc = mock_mc();
    let err = mc
        .download()
        .series(&[
            SeriesSpec::macro_series("UNRATE"),
            SeriesSpec::macro_series("UNRATE").labeled("again"),
        ])
        .err()
        .expect("duplicates must be rejected");
    assert!(matches!(err, MacroCorrError::InvalidArg(_)));

    let err = mc
        .download()
        .add_series(SeriesSpec::fx("CHF=X"))
        .unwrap()
        .add_series(SeriesSpec::fx("CHF=X"))
        .err()
        .expect("duplicates must be rejected");
    assert!(matches!(err, MacroCorrError::InvalidArg(_)));
}

#[tokio::test]
async fn download_without_series_is_invalid() {
    let mc = mock_mc();
    let err = mc.download().run().await.unwrap_err();
    assert!(matches!(err, MacroCorrError::InvalidArg(_)));
}

#[tokio::test]
async fn request_timeout_bounds_each_fetch() {
    let slow = ScriptedConnector::builder("slow")
        .delay(Duration::from_millis(300))
        .with_fn(|r| {
            if r.symbol == "SLOW" {
                Ok(monthly_2020(&r.symbol, |_| 1.0))
            } else {
                Err(MacroCorrError::not_found("never"))
            }
        })
        .build();
    let fast = ScriptedConnector::builder("fast")
        .with_fn(|r| {
            if r.symbol == "FAST" {
                Ok(monthly_2020(&r.symbol, |_| 2.0))
            } else {
                Err(MacroCorrError::not_found(format!("series for {}", r.symbol)))
            }
        })
        .build();

    let mc = MacroCorr::builder()
        .with_connector(fast)
        .with_connector(slow)
        .request_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let report = mc
        .download()
        .series(&[SeriesSpec::macro_series("FAST"), SeriesSpec::macro_series("SLOW")])
        .unwrap()
        .range(year_2020())
        .run()
        .await
        .unwrap();

    assert_eq!(report.series.len(), 1);
    assert_eq!(report.series[0].name(), "FAST");
    assert_eq!(
        report.warnings,
        vec![MacroCorrError::fetch(
            "SLOW",
            &MacroCorrError::request_timeout("series")
        )]
    );
}
