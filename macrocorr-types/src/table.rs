//! Aligned multi-series table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MacroCorrError;

/// One named column of a [`MultiSeriesTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Field name.
    pub name: String,
    /// One cell per table row; `None` means absent.
    pub values: Vec<Option<f64>>,
}

impl Column {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Number of present cells.
    #[must_use]
    pub fn present(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// A single row materialized from a [`MultiSeriesTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Row timestamp.
    pub ts: DateTime<Utc>,
    /// Cells in table field order (primary first).
    pub values: Vec<Option<f64>>,
}

/// Timestamp-indexed table of named numeric fields.
///
/// Column 0 is the primary field, followed by the secondary fields in request
/// order. Invariants, enforced by [`MultiSeriesTable::try_new`]:
/// - the index is strictly increasing (no duplicate timestamps);
/// - every column has one cell per index entry;
/// - the primary column has a finite value in every row;
/// - field names are unique.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiSeriesTable {
    index: Vec<DateTime<Utc>>,
    columns: Vec<Column>,
}

impl MultiSeriesTable {
    /// Build a validated table.
    ///
    /// # Errors
    /// Returns `InvalidArg` if there is no primary column, column lengths differ
    /// from the index, the index is not strictly increasing, a field name is
    /// repeated, or the primary column has an absent/non-finite cell.
    pub fn try_new(
        index: Vec<DateTime<Utc>>,
        columns: Vec<Column>,
    ) -> Result<Self, MacroCorrError> {
        let Some(primary) = columns.first() else {
            return Err(MacroCorrError::InvalidArg(
                "table requires a primary column".into(),
            ));
        };
        if index.windows(2).any(|w| w[0] >= w[1]) {
            return Err(MacroCorrError::InvalidArg(
                "table index must be strictly increasing".into(),
            ));
        }
        for (i, c) in columns.iter().enumerate() {
            if c.values.len() != index.len() {
                return Err(MacroCorrError::InvalidArg(format!(
                    "column '{}' has {} cells, index has {}",
                    c.name,
                    c.values.len(),
                    index.len()
                )));
            }
            if columns[..i].iter().any(|prev| prev.name == c.name) {
                return Err(MacroCorrError::InvalidArg(format!(
                    "duplicate field '{}'",
                    c.name
                )));
            }
        }
        if primary
            .values
            .iter()
            .any(|v| !v.is_some_and(f64::is_finite))
        {
            return Err(MacroCorrError::InvalidArg(format!(
                "primary field '{}' must be present in every row",
                primary.name
            )));
        }
        Ok(Self { index, columns })
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Row timestamps in ascending order.
    #[must_use]
    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    /// All columns, primary first.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Name of the primary field.
    #[must_use]
    pub fn primary_name(&self) -> &str {
        self.columns.first().map_or("", |c| c.name.as_str())
    }

    /// Field names in table order (primary first).
    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Secondary field names in table order.
    pub fn secondary_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().skip(1).map(|c| c.name.as_str())
    }

    /// Cells of the named field.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Value of `field` at `ts`, if both exist and the cell is present.
    #[must_use]
    pub fn value(&self, ts: DateTime<Utc>, field: &str) -> Option<f64> {
        let row = self.index.binary_search(&ts).ok()?;
        self.column(field).and_then(|c| c[row])
    }

    /// Materialize row `i`.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<TableRow> {
        let ts = *self.index.get(i)?;
        Some(TableRow {
            ts,
            values: self.columns.iter().map(|c| c.values[i]).collect(),
        })
    }

    /// Iterate over materialized rows in timestamp order.
    pub fn rows(&self) -> impl Iterator<Item = TableRow> + '_ {
        (0..self.len()).filter_map(|i| self.row(i))
    }

    /// Copy of the last `n` rows (the whole table when `n >= len`).
    #[must_use]
    pub fn tail(&self, n: usize) -> Self {
        let from = self.len().saturating_sub(n);
        Self {
            index: self.index[from..].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|c| Column::new(c.name.clone(), c.values[from..].to_vec()))
                .collect(),
        }
    }
}

impl<'de> Deserialize<'de> for MultiSeriesTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            index: Vec<DateTime<Utc>>,
            columns: Vec<Column>,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::try_new(raw.index, raw.columns).map_err(serde::de::Error::custom)
    }
}
