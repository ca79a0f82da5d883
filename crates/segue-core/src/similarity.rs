use std::cmp::Ordering;

use crate::error::{Error, Result};

/// A square grid of precomputed similarity scores.
///
/// Row `i` holds the similarity of song `i` to every song in the catalog,
/// itself included. The matrix is only ever read one row at a time, so it
/// does not need to be symmetric.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Build a matrix from its rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSquare`] if any row length differs from the
    /// number of rows, and [`Error::NonFiniteScore`] for NaN or infinite
    /// entries.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut scores = Vec::with_capacity(size * size);

        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(Error::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            if let Some(col) = values.iter().position(|v| !v.is_finite()) {
                return Err(Error::NonFiniteScore { row, col });
            }
            scores.extend(values);
        }

        Ok(Self { size, scores })
    }

    /// Number of rows (and columns).
    pub const fn len(&self) -> usize {
        self.size
    }

    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.size {
            return None;
        }
        let start = index * self.size;
        Some(&self.scores[start..start + self.size])
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.row(row).and_then(|r| r.get(col).copied())
    }

    /// Every `(column, score)` pair of a row, highest score first.
    ///
    /// The sort is stable, so equal scores keep ascending column order.
    pub fn ranked(&self, index: usize) -> Option<Vec<(usize, f64)>> {
        let row = self.row(index)?;
        let mut ranked: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| descending(a.1, b.1));
        Some(ranked)
    }
}

// NaN is rejected in `from_rows`, and -0.0 must tie with 0.0.
fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
