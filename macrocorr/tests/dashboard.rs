mod helpers;

use std::sync::Arc;
use std::time::Duration;

use macrocorr::{
    CacheConfig, Cadence, ConnectorBuilder, Interval, MacroCorr, MacroCorrError, SeriesKind,
    SeriesSpec,
};
use macrocorr_mock::{DynamicMockConnector, MockBehavior, MockConnector};

use helpers::{date, dt, monthly_2020, range, series, year_2020};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[tokio::test]
async fn mock_dashboard_end_to_end() {
    let mc = MacroCorr::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .rolling_window(12)
        .build()
        .unwrap();

    let report = mc
        .dashboard()
        .primary(SeriesSpec::fx("CHF=X").labeled("USD/CHF"))
        .secondaries(&[
            SeriesSpec::macro_series("CPIAUCSL").labeled("CPI"),
            SeriesSpec::macro_series("UNRATE"),
            SeriesSpec::macro_series("DGS10"),
            SeriesSpec::macro_series("FAIL"),
        ])
        .range(range(date(2018, 1, 1), date(2022, 12, 31)))
        .interval(Interval::Monthly)
        .normalize_primary(Cadence::Monthly)
        .run()
        .await
        .unwrap();

    let fields: Vec<&str> = report.table.field_names().collect();
    assert_eq!(fields, vec!["USD/CHF", "CPI", "UNRATE", "DGS10"]);
    assert_eq!(report.table.len(), 60);
    assert_eq!(report.table.primary_name(), "USD/CHF");

    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(
        &report.warnings[0],
        MacroCorrError::Fetch { symbol, .. } if symbol == "FAIL"
    ));

    let m = &report.matrix;
    for a in m.fields() {
        for b in m.fields() {
            assert_eq!(m.get(a, b), m.get(b, a));
        }
        if let Some(v) = m.get(a, a) {
            assert!(approx(v, 1.0));
        }
    }
    assert!(m.values().iter().flatten().flatten().all(|v| v.is_finite() && v.abs() <= 1.0));

    assert_eq!(report.rolling.window(), Some(12));
    assert_eq!(report.rolling.primary_name(), "USD/CHF");
    assert!(!report.rolling.fields().iter().any(|f| f == "USD/CHF"));
    let cpi = report.rolling.series("CPI");
    assert!(!cpi.is_empty());
    // First change is at row 1; a 12-change window first fills at row 12.
    assert!(cpi[0].0 >= report.table.index()[12]);
}

#[tokio::test]
async fn worked_example_forward_fills_single_secondary_point() {
    let (conn, controller) = DynamicMockConnector::new_with_controller("dyn");
    controller
        .set_series_behavior(
            "CHF=X",
            MockBehavior::Return(series(
                "CHF=X",
                &[
                    (dt(2020, 1, 1), 1.00),
                    (dt(2020, 1, 2), 1.01),
                    (dt(2020, 1, 3), 0.99),
                ],
            )),
        )
        .await;
    controller
        .set_series_behavior(
            "CPIAUCSL",
            MockBehavior::Return(series("CPIAUCSL", &[(dt(2020, 1, 1), 100.0)])),
        )
        .await;

    let mc = MacroCorr::builder().with_connector(conn).build().unwrap();
    let report = mc
        .dashboard()
        .primary(SeriesSpec::fx("CHF=X"))
        .add_secondary(SeriesSpec::macro_series("CPIAUCSL"))
        .range(year_2020())
        .run()
        .await
        .unwrap();

    assert!(report.warnings.is_empty());
    assert_eq!(
        report.table.column("CPIAUCSL"),
        Some(&[Some(100.0), Some(100.0), Some(100.0)][..])
    );
    assert_eq!(report.matrix.get("CHF=X", "CPIAUCSL"), None);
    assert_eq!(report.matrix.get("CPIAUCSL", "CPIAUCSL"), None);
    assert!(report.rolling.is_empty());
    assert_eq!(report.rolling.window(), None);
}

#[tokio::test]
async fn failing_primary_is_a_fetch_error() {
    let mc = MacroCorr::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();

    let err = mc
        .dashboard()
        .primary(SeriesSpec::fx("FAIL"))
        .add_secondary(SeriesSpec::macro_series("UNRATE"))
        .range(year_2020())
        .run()
        .await
        .unwrap_err();
    match err {
        MacroCorrError::Fetch { symbol, cause } => {
            assert_eq!(symbol, "FAIL");
            assert!(cause.contains("forced failure"), "{cause}");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn empty_primary_and_missing_primary() {
    let mc = MacroCorr::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();

    let err = mc
        .dashboard()
        .primary(SeriesSpec::fx("EMPTY"))
        .range(year_2020())
        .run()
        .await
        .unwrap_err();
    assert_eq!(err, MacroCorrError::EmptyPrimarySeries);

    let err = mc
        .dashboard()
        .add_secondary(SeriesSpec::macro_series("UNRATE"))
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, MacroCorrError::InvalidArg(_)));
}

#[tokio::test]
async fn secondary_problems_become_warnings() {
    let (conn, controller) = DynamicMockConnector::new_with_controller("dyn");
    controller
        .set_series_behavior(
            "CHF=X",
            MockBehavior::Return(monthly_2020("CHF=X", |i| 0.9 + 0.01 * i as f64)),
        )
        .await;
    controller
        .set_series_behavior(
            "UNRATE",
            MockBehavior::Return(monthly_2020("UNRATE", |i| 3.5 + (i % 3) as f64)),
        )
        .await;
    controller
        .set_series_behavior(
            "BROKEN",
            MockBehavior::Fail(MacroCorrError::Other("upstream 500".into())),
        )
        .await;
    controller
        .set_series_behavior("HOLLOW", MockBehavior::Return(series("HOLLOW", &[])))
        .await;
    controller.set_series_behavior("STUCK", MockBehavior::Hang).await;

    let mc = MacroCorr::builder()
        .with_connector(conn)
        .request_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let report = mc
        .dashboard()
        .primary(SeriesSpec::fx("CHF=X"))
        .secondaries(&[
            SeriesSpec::macro_series("UNRATE"),
            SeriesSpec::macro_series("BROKEN"),
            SeriesSpec::macro_series("HOLLOW"),
            SeriesSpec::macro_series("STUCK"),
            SeriesSpec::macro_series("UNRATE"),
        ])
        .range(year_2020())
        .run()
        .await
        .unwrap();

    let fields: Vec<&str> = report.table.field_names().collect();
    assert_eq!(fields, vec!["CHF=X", "UNRATE"]);
    assert_eq!(report.table.len(), 12);

    let fetch_failed: Vec<&str> = report
        .warnings
        .iter()
        .filter_map(|w| match w {
            MacroCorrError::Fetch { symbol, .. } => Some(symbol.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(fetch_failed, vec!["BROKEN", "STUCK"]);
    // Empty and repeated secondaries are reported by the aligner.
    let data_warnings = report
        .warnings
        .iter()
        .filter(|w| matches!(w, MacroCorrError::Data(_)))
        .count();
    assert_eq!(data_warnings, 2);
}

#[tokio::test]
async fn trimming_drops_rows_before_secondaries_start() {
    let (conn, controller) = DynamicMockConnector::new_with_controller("dyn");
    controller
        .set_series_behavior(
            "CHF=X",
            MockBehavior::Return(monthly_2020("CHF=X", |i| 1.0 + 0.02 * i as f64)),
        )
        .await;
    controller
        .set_series_behavior(
            "LATE",
            MockBehavior::Return(series("LATE", &[(dt(2020, 4, 1), 10.0), (dt(2020, 8, 1), 12.0)])),
        )
        .await;
    controller
        .set_series_behavior(
            "FUTURE",
            MockBehavior::Return(series("FUTURE", &[(dt(2021, 6, 1), 5.0)])),
        )
        .await;

    let mc = MacroCorr::builder()
        .with_connector(conn)
        .trim_leading_rows(true)
        .build()
        .unwrap();

    let report = mc
        .dashboard()
        .primary(SeriesSpec::fx("CHF=X"))
        .add_secondary(SeriesSpec::macro_series("LATE"))
        .range(year_2020())
        .run()
        .await
        .unwrap();
    assert_eq!(report.table.index().first(), Some(&dt(2020, 4, 1)));
    assert_eq!(report.table.len(), 9);

    let untrimmed = mc
        .dashboard()
        .primary(SeriesSpec::fx("CHF=X"))
        .add_secondary(SeriesSpec::macro_series("LATE"))
        .range(year_2020())
        .trim_leading(false)
        .run()
        .await
        .unwrap();
    assert_eq!(untrimmed.table.len(), 12);

    let err = mc
        .dashboard()
        .primary(SeriesSpec::fx("CHF=X"))
        .add_secondary(SeriesSpec::macro_series("FUTURE"))
        .range(year_2020())
        .run()
        .await
        .unwrap_err();
    assert_eq!(err, MacroCorrError::EmptyTable);
}

#[tokio::test]
async fn rolling_window_defaults_from_builder_and_can_be_disabled() {
    let mc = MacroCorr::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .rolling_window(3)
        .build()
        .unwrap();

    let mc = &mc;
    let run = move |window: Option<Option<usize>>| {
        let mut b = mc
            .dashboard()
            .primary(SeriesSpec::fx("CHF=X"))
            .add_secondary(SeriesSpec::macro_series("CPIAUCSL"))
            .range(year_2020())
            .interval(Interval::Monthly);
        if let Some(w) = window {
            b = b.rolling_window(w);
        }
        b.run()
    };

    let with_default = run(None).await.unwrap();
    assert_eq!(with_default.rolling.window(), Some(3));
    // Twelve rows give eleven changes; a 3-change window emits from the third.
    assert_eq!(with_default.rolling.series("CPIAUCSL").len(), 9);

    let disabled = run(Some(None)).await.unwrap();
    assert_eq!(disabled.rolling.window(), None);
    assert!(disabled.rolling.is_empty());
}

#[tokio::test]
async fn cached_connector_avoids_second_provider_call() {
    let (raw, controller) =
        DynamicMockConnector::new_with_controller_for("dyn", &[SeriesKind::Fx, SeriesKind::Macro]);
    controller
        .set_series_behavior(
            "CHF=X",
            MockBehavior::Return(monthly_2020("CHF=X", |i| 0.9 + 0.01 * i as f64)),
        )
        .await;
    controller
        .set_series_behavior(
            "CPIAUCSL",
            MockBehavior::Return(monthly_2020("CPIAUCSL", |i| 250.0 + i as f64)),
        )
        .await;

    let cached = ConnectorBuilder::new(raw)
        .with_cache(&CacheConfig::default())
        .build();
    let mc = MacroCorr::builder().with_connector(cached).build().unwrap();

    for _ in 0..2 {
        let report = mc
            .dashboard()
            .primary(SeriesSpec::fx("CHF=X"))
            .add_secondary(SeriesSpec::macro_series("CPIAUCSL"))
            .range(year_2020())
            .interval(Interval::Monthly)
            .run()
            .await
            .unwrap();
        assert_eq!(report.table.len(), 12);
    }

    assert_eq!(controller.request_count("CHF=X").await, 1);
    assert_eq!(controller.request_count("CPIAUCSL").await, 1);
}
