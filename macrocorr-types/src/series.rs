//! Time-indexed series and the request types used to fetch them.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MacroCorrError;

/// A single timestamped value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Observation time (UTC).
    pub ts: DateTime<Utc>,
    /// Observed value; always finite inside a [`TimeSeries`].
    pub value: f64,
}

impl Observation {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(ts: DateTime<Utc>, value: f64) -> Self {
        Self { ts, value }
    }
}

/// An ordered sequence of observations for one named value channel.
///
/// Invariants: timestamps are strictly increasing and every value is finite.
/// The series is immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    name: String,
    points: Vec<Observation>,
}

impl TimeSeries {
    /// Build a series from observations that already satisfy the invariants.
    ///
    /// # Errors
    /// Returns `InvalidArg` if timestamps are not strictly increasing or a value
    /// is NaN/infinite.
    pub fn try_new(
        name: impl Into<String>,
        points: Vec<Observation>,
    ) -> Result<Self, MacroCorrError> {
        let name = name.into();
        for (i, p) in points.iter().enumerate() {
            if !p.value.is_finite() {
                return Err(MacroCorrError::InvalidArg(format!(
                    "series '{name}' has a non-finite value at {}",
                    p.ts
                )));
            }
            if i > 0 && points[i - 1].ts >= p.ts {
                return Err(MacroCorrError::InvalidArg(format!(
                    "series '{name}' timestamps are not strictly increasing at {}",
                    p.ts
                )));
            }
        }
        Ok(Self { name, points })
    }

    /// Build a series from arbitrary observations.
    ///
    /// Observations are sorted by timestamp, non-finite values are dropped, and
    /// for duplicate timestamps the first occurrence wins.
    #[must_use]
    pub fn from_unsorted<I>(name: impl Into<String>, points: I) -> Self
    where
        I: IntoIterator<Item = Observation>,
    {
        let mut by_ts: BTreeMap<DateTime<Utc>, f64> = BTreeMap::new();
        for p in points {
            if p.value.is_finite() {
                by_ts.entry(p.ts).or_insert(p.value);
            }
        }
        Self {
            name: name.into(),
            points: by_ts
                .into_iter()
                .map(|(ts, value)| Observation { ts, value })
                .collect(),
        }
    }

    /// An empty series with the given name.
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    /// Series name (used as the field name once aligned).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Observations in ascending timestamp order.
    #[must_use]
    pub fn points(&self) -> &[Observation] {
        &self.points
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Earliest observation, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Observation> {
        self.points.first()
    }

    /// Latest observation, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Observation> {
        self.points.last()
    }

    /// Iterator over timestamps.
    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.points.iter().map(|p| p.ts)
    }

    /// Value of the most recent observation at or before `ts`.
    #[must_use]
    pub fn value_at_or_before(&self, ts: DateTime<Utc>) -> Option<f64> {
        let idx = self.points.partition_point(|p| p.ts <= ts);
        idx.checked_sub(1).map(|i| self.points[i].value)
    }

    /// Same observations under a different name.
    #[must_use]
    pub fn renamed(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: self.points,
        }
    }

    /// Keep only observations whose calendar date lies inside `range`.
    #[must_use]
    pub fn restricted_to(self, range: &DateRange) -> Self {
        let points = self
            .points
            .into_iter()
            .filter(|p| range.contains(p.ts))
            .collect();
        Self {
            name: self.name,
            points,
        }
    }
}

impl<'de> Deserialize<'de> for TimeSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            name: String,
            points: Vec<Observation>,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::try_new(raw.name, raw.points).map_err(serde::de::Error::custom)
    }
}

/// Broad class of a series, used to route requests to capable connectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SeriesKind {
    /// Foreign-exchange price series (e.g. "CHF=X").
    Fx,
    /// Macroeconomic indicator (e.g. "CPIAUCSL").
    Macro,
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fx => f.write_str("fx"),
            Self::Macro => f.write_str("macro"),
        }
    }
}

/// Sampling interval requested from a provider.
///
/// Providers with a fixed native frequency (FRED) may ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Interval {
    /// One observation per trading day.
    #[default]
    Daily,
    /// One observation per week.
    Weekly,
    /// One observation per month.
    Monthly,
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a validated range.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `start` is after `end`.
    pub fn try_new(start: NaiveDate, end: NaiveDate) -> Result<Self, MacroCorrError> {
        if start > end {
            return Err(MacroCorrError::InvalidArg(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range (inclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// True if the calendar date of `ts` (UTC) lies inside the range.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        let d = ts.date_naive();
        d >= self.start && d <= self.end
    }

    /// Midnight UTC at the start of the range.
    #[must_use]
    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    /// Midnight UTC after the last day of the range (exclusive upper bound).
    #[must_use]
    pub fn end_exclusive_utc(&self) -> DateTime<Utc> {
        let next = self.end.succ_opt().unwrap_or(self.end);
        next.and_time(chrono::NaiveTime::MIN).and_utc()
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            start: NaiveDate,
            end: NaiveDate,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::try_new(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}

/// A request for one series over a date range.
///
/// The full request (symbol, kind, range, interval) is the identity used by the
/// fetch cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesRequest {
    /// Provider symbol (e.g. "CHF=X", "UNRATE").
    pub symbol: String,
    /// Kind of series, used for routing.
    pub kind: SeriesKind,
    /// Requested date range.
    pub range: DateRange,
    /// Requested sampling interval.
    pub interval: Interval,
}

impl SeriesRequest {
    /// Build a request; the symbol is trimmed and must be non-empty.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a blank symbol.
    pub fn try_new(
        symbol: &str,
        kind: SeriesKind,
        range: DateRange,
        interval: Interval,
    ) -> Result<Self, MacroCorrError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(MacroCorrError::InvalidArg("empty series symbol".into()));
        }
        Ok(Self {
            symbol: symbol.to_string(),
            kind,
            range,
            interval,
        })
    }
}

/// What a dashboard run asks for: a symbol, its kind, and an optional display label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesSpec {
    /// Provider symbol.
    pub symbol: String,
    /// Kind of series.
    pub kind: SeriesKind,
    /// Field name to use in the aligned table; defaults to the symbol.
    pub label: Option<String>,
}

impl SeriesSpec {
    /// FX series without a label.
    pub fn fx(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            kind: SeriesKind::Fx,
            label: None,
        }
    }

    /// Macro series without a label.
    pub fn macro_series(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            kind: SeriesKind::Macro,
            label: None,
        }
    }

    /// Attach a display label.
    #[must_use]
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Field name in the aligned table.
    #[must_use]
    pub fn field_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.symbol)
    }
}
