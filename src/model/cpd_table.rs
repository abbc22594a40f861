use crate::utils::{mixed_radix_index, saturating_product};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// A dense two-dimensional table of conditional probabilities stored in row-major order.
///
/// Each row corresponds to one state of the conditioned variable, and each column to one
/// configuration of its parents (evidence). Columns enumerate parent configurations such
/// that the first parent is the most significant digit (the last parent changes the fastest).
/// A variable without parents has exactly one column.
///
/// In JSON, the table is represented as a list of rows.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct CpdTable {
    rows: usize,
    columns: usize,
    values: Vec<f64>,
}

impl CpdTable {
    /// Create a new table with the given dimensions from row-major `values`.
    pub fn new(rows: usize, columns: usize, values: Vec<f64>) -> Result<Self, CpdTableError> {
        if rows.checked_mul(columns) != Some(values.len()) {
            return Err(CpdTableError::ShapeMismatch {
                rows,
                columns,
                values: values.len(),
            });
        }
        Ok(CpdTable {
            rows,
            columns,
            values,
        })
    }

    /// Split a flat list of `values` into `rows` rows of equal length.
    ///
    /// This is how XMLBIF tables are interpreted: the number of columns is inferred
    /// from the number of values. The split fails if the values cannot be divided evenly.
    pub fn from_flat(values: Vec<f64>, rows: usize) -> Result<Self, CpdTableError> {
        if rows == 0 {
            return Err(CpdTableError::NoRows {
                values: values.len(),
            });
        }
        if values.len() % rows != 0 {
            return Err(CpdTableError::NotDivisible {
                values: values.len(),
                rows,
            });
        }
        let columns = values.len() / rows;
        Ok(CpdTable {
            rows,
            columns,
            values,
        })
    }

    /// Create a new table from a list of rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, CpdTableError> {
        let columns = rows.first().map(|it| it.len()).unwrap_or_default();
        if let Some(row) = rows.iter().position(|it| it.len() != columns) {
            return Err(CpdTableError::RaggedRow {
                row,
                length: rows[row].len(),
                columns,
            });
        }
        let height = rows.len();
        Ok(CpdTable {
            rows: height,
            columns,
            values: rows.into_iter().flatten().collect(),
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Row-major values of this table.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.values.get(row * self.columns + column).copied()
    }

    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.rows {
            return None;
        }
        Some(&self.values[row * self.columns..(row + 1) * self.columns])
    }

    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows)
            .map(|r| self.values[r * self.columns..(r + 1) * self.columns].to_vec())
            .collect()
    }

    /// Permute the columns of this table from one evidence order into another.
    ///
    /// The `from` order is the order in which the current columns enumerate parent
    /// configurations, `cardinalities` are the parent cardinalities in that same order.
    /// The `to` order must contain the same parents. The resulting table stores, for every
    /// parent configuration, the same probabilities as this table.
    pub fn reorder_columns<S: AsRef<str>>(
        &self,
        from: &[S],
        to: &[S],
        cardinalities: &[usize],
    ) -> Result<CpdTable, CpdTableError> {
        let from_names = from.iter().map(|it| it.as_ref()).collect::<Vec<_>>();
        let to_names = to.iter().map(|it| it.as_ref()).collect::<Vec<_>>();
        let unique = from_names.iter().collect::<HashSet<_>>();
        let mismatch = || CpdTableError::EvidenceMismatch {
            from: from_names.iter().map(|it| it.to_string()).collect(),
            to: to_names.iter().map(|it| it.to_string()).collect(),
        };

        if from_names.len() != cardinalities.len()
            || from_names.len() != to_names.len()
            || unique.len() != from_names.len()
        {
            return Err(mismatch());
        }

        // For every position in `to`, the position of the same parent in `from`.
        let positions = to_names
            .iter()
            .map(|name| from_names.iter().position(|it| it == name))
            .collect::<Option<Vec<usize>>>()
            .ok_or_else(mismatch)?;
        if positions.iter().collect::<HashSet<_>>().len() != positions.len() {
            return Err(mismatch());
        }

        let expected = saturating_product(cardinalities);
        if expected != self.columns {
            return Err(CpdTableError::ColumnMismatch {
                expected,
                columns: self.columns,
            });
        }

        let to_cardinalities = positions
            .iter()
            .map(|p| cardinalities[*p])
            .collect::<Vec<_>>();
        let mut assignment = vec![0usize; from_names.len()];
        let mut source_columns = Vec::with_capacity(self.columns);
        for target in 0..self.columns {
            let mut rest = target;
            for (i, cardinality) in to_cardinalities.iter().enumerate().rev() {
                assignment[positions[i]] = rest % cardinality;
                rest /= cardinality;
            }
            let source = mixed_radix_index(&assignment, cardinalities).ok_or_else(mismatch)?;
            source_columns.push(source);
        }

        let mut values = Vec::with_capacity(self.values.len());
        for r in 0..self.rows {
            let row = &self.values[r * self.columns..(r + 1) * self.columns];
            values.extend(source_columns.iter().map(|c| row[*c]));
        }

        Ok(CpdTable {
            rows: self.rows,
            columns: self.columns,
            values,
        })
    }
}

impl TryFrom<Vec<Vec<f64>>> for CpdTable {
    type Error = CpdTableError;

    fn try_from(value: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        CpdTable::from_rows(value)
    }
}

impl From<CpdTable> for Vec<Vec<f64>> {
    fn from(value: CpdTable) -> Self {
        value.to_rows()
    }
}

/// Possible errors when constructing or transforming a [`CpdTable`].
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CpdTableError {
    #[error("Table with `{values}` values cannot have `{rows}` rows and `{columns}` columns")]
    ShapeMismatch {
        rows: usize,
        columns: usize,
        values: usize,
    },
    #[error("Table with `{values}` values cannot be split into `{rows}` rows of equal length")]
    NotDivisible { values: usize, rows: usize },
    #[error("Table with `{values}` values cannot be split into zero rows")]
    NoRows { values: usize },
    #[error("Row `{row}` has `{length}` values, but `{columns}` are expected")]
    RaggedRow {
        row: usize,
        length: usize,
        columns: usize,
    },
    #[error("Evidence order {from:?} cannot be rearranged into {to:?}")]
    EvidenceMismatch { from: Vec<String>, to: Vec<String> },
    #[error("Evidence has `{expected}` configurations, but the table has `{columns}` columns")]
    ColumnMismatch { expected: usize, columns: usize },
}
