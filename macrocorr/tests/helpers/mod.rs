// Re-export helpers so tests can `use crate::helpers::*;`
#![allow(dead_code)]

pub mod scripted;

pub use scripted::ScriptedConnector;

use chrono::{DateTime, NaiveDate, Utc};
use macrocorr::{DateRange, Interval, Observation, SeriesKind, SeriesRequest, TimeSeries};

/// Midnight UTC on the given date.
pub fn dt(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("valid date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time")
        .and_utc()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange::try_new(start, end).expect("valid range")
}

/// Calendar year 2020.
pub fn year_2020() -> DateRange {
    range(date(2020, 1, 1), date(2020, 12, 31))
}

pub fn series(name: &str, points: &[(DateTime<Utc>, f64)]) -> TimeSeries {
    TimeSeries::try_new(
        name,
        points.iter().map(|(ts, v)| Observation::new(*ts, *v)).collect(),
    )
    .expect("valid test series")
}

/// Twelve month-start observations in 2020 following `f(month_index)`.
pub fn monthly_2020(name: &str, f: impl Fn(usize) -> f64) -> TimeSeries {
    let points: Vec<(DateTime<Utc>, f64)> = (0..12)
        .map(|i| (dt(2020, u32::try_from(i + 1).expect("month"), 1), f(i)))
        .collect();
    series(name, &points)
}

pub fn req(symbol: &str, kind: SeriesKind) -> SeriesRequest {
    SeriesRequest::try_new(symbol, kind, year_2020(), Interval::Monthly).expect("valid request")
}
