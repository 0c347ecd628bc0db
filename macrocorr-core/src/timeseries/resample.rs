use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use macrocorr_types::{Observation, TimeSeries};

const DAY: i64 = 86_400;

/// Calendar period used to normalise timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cadence {
    /// Midnight UTC of the observation's day.
    Daily,
    /// Midnight UTC of the ISO week's Monday.
    Weekly,
    /// Midnight UTC of the first day of the month.
    Monthly,
}

impl Cadence {
    /// Start of the period containing `ts`.
    #[must_use]
    pub fn period_start(self, ts: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Daily => DateTime::from_timestamp(ts.timestamp().div_euclid(DAY) * DAY, 0),
            Self::Weekly => week_start_ts(ts),
            Self::Monthly => NaiveDate::from_ymd_opt(ts.year(), ts.month(), 1)
                .map(|d| d.and_time(NaiveTime::MIN).and_utc()),
        }
    }
}

const fn week_start_day(day: i64) -> i64 {
    day - ((day + 3).rem_euclid(7))
}

fn week_start_ts(ts: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let day = ts.timestamp().div_euclid(DAY);
    DateTime::from_timestamp(week_start_day(day) * DAY, 0)
}

/// Re-stamp every observation to the start of its period.
///
/// When several observations fall in one period the last one wins. The series
/// name is kept.
#[must_use]
pub fn normalize_to_cadence(series: &TimeSeries, cadence: Cadence) -> TimeSeries {
    let mut buckets: BTreeMap<DateTime<Utc>, f64> = BTreeMap::new();
    for p in series.points() {
        if let Some(start) = cadence.period_start(p.ts) {
            buckets.insert(start, p.value);
        }
    }
    TimeSeries::from_unsorted(
        series.name(),
        buckets.into_iter().map(|(ts, v)| Observation::new(ts, v)),
    )
}
