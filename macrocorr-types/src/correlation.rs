//! Correlation result types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MacroCorrError;

/// Square matrix of pairwise correlation coefficients.
///
/// Rows and columns follow `fields`. A `None` entry means the coefficient is
/// undefined (insufficient overlap or zero variance).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    fields: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Build a matrix from field names and row-major entries.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `values` is not `fields.len()` x `fields.len()`.
    pub fn try_new(
        fields: Vec<String>,
        values: Vec<Vec<Option<f64>>>,
    ) -> Result<Self, MacroCorrError> {
        let n = fields.len();
        if values.len() != n || values.iter().any(|r| r.len() != n) {
            return Err(MacroCorrError::InvalidArg(format!(
                "correlation matrix must be {n}x{n}"
            )));
        }
        Ok(Self { fields, values })
    }

    /// Field names in row/column order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Row-major entries.
    #[must_use]
    pub fn values(&self) -> &[Vec<Option<f64>>] {
        &self.values
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the matrix has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Coefficient between fields `a` and `b`.
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        self.values[i][j]
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name)
    }
}

impl<'de> Deserialize<'de> for CorrelationMatrix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            fields: Vec<String>,
            values: Vec<Vec<Option<f64>>>,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::try_new(raw.fields, raw.values).map_err(serde::de::Error::custom)
    }
}

/// Trailing-window correlation between the primary field and each secondary field.
///
/// Keyed by timestamp; each timestamp maps secondary field names to the
/// coefficient over the window ending there. Timestamps before a field's window
/// is full carry no entry for that field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RollingCorrelationTable {
    primary: String,
    window: Option<usize>,
    rows: BTreeMap<DateTime<Utc>, BTreeMap<String, f64>>,
}

impl RollingCorrelationTable {
    /// Empty table for the given primary field and window.
    ///
    /// `window` is `None` when no rolling computation was requested.
    pub fn new(primary: impl Into<String>, window: Option<usize>) -> Self {
        Self {
            primary: primary.into(),
            window,
            rows: BTreeMap::new(),
        }
    }

    /// Record a coefficient for `field` at `ts`. Non-finite values are ignored.
    pub fn insert(&mut self, ts: DateTime<Utc>, field: impl Into<String>, value: f64) {
        if value.is_finite() {
            self.rows.entry(ts).or_default().insert(field.into(), value);
        }
    }

    /// Primary field the coefficients are computed against.
    #[must_use]
    pub fn primary_name(&self) -> &str {
        &self.primary
    }

    /// Window length in joint observations, if rolling was requested.
    #[must_use]
    pub const fn window(&self) -> Option<usize> {
        self.window
    }

    /// Number of timestamps with at least one entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no coefficient was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Coefficient for `field` at `ts`.
    #[must_use]
    pub fn get(&self, ts: DateTime<Utc>, field: &str) -> Option<f64> {
        self.rows.get(&ts).and_then(|m| m.get(field)).copied()
    }

    /// All timestamped coefficients for one field, in timestamp order.
    #[must_use]
    pub fn series(&self, field: &str) -> Vec<(DateTime<Utc>, f64)> {
        self.rows
            .iter()
            .filter_map(|(ts, m)| m.get(field).map(|v| (*ts, *v)))
            .collect()
    }

    /// Iterate over `(timestamp, {field -> coefficient})` in timestamp order.
    pub fn iter(&self) -> impl Iterator<Item = (&DateTime<Utc>, &BTreeMap<String, f64>)> {
        self.rows.iter()
    }

    /// Distinct field names that have at least one entry.
    #[must_use]
    pub fn fields(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for m in self.rows.values() {
            for k in m.keys() {
                if !out.contains(k) {
                    out.push(k.clone());
                }
            }
        }
        out.sort();
        out
    }
}
