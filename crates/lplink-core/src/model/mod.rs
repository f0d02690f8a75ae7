//! Model module for building linear programs.
//!
//! This module provides the [`LpModel`] type: a row/column oriented
//! description of an LP that is accumulated freely and validated only when it
//! is prepared for an engine.
//!
//! # Module Organization
//!
//! - [`builder`]: Convenience methods for appending rows, columns, and nonzeros
//! - [`prepare`]: Dimension inference, implicit bounds, and compression into [`PreparedLp`]

mod builder;
mod prepare;

use crate::types::{Nonzero, Sense, VarType};

pub use prepare::PreparedLp;

/// A linear program in user-facing form.
///
/// Bound arrays may be left empty: an empty array requests free bounds
/// (`-inf` for lower, `+inf` for upper) for every row or column. Nothing is
/// validated until [`LpModel::prepare`] is called.
#[derive(Debug, Clone, Default)]
pub struct LpModel {
    pub sense: Sense,
    /// Constant added to the objective.
    pub offset: f64,
    pub col_costs: Vec<f64>,
    pub col_lower: Vec<f64>,
    pub col_upper: Vec<f64>,
    pub row_lower: Vec<f64>,
    pub row_upper: Vec<f64>,
    pub coefficients: Vec<Nonzero>,
    /// Per-column variable type. Empty means every column is continuous.
    pub col_integrality: Vec<VarType>,
    // widest dense row appended so far; a lower bound on the column count
    pub(crate) dense_width: usize,
}

impl LpModel {
    /// Create a new empty minimization model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of columns the model will have once prepared.
    ///
    /// The larger of the longest column array and one past the largest
    /// column index referenced by a nonzero. While no column array is set,
    /// the widest dense row also counts, so trailing zero columns survive.
    pub fn num_cols(&self) -> usize {
        let from_matrix = self
            .coefficients
            .iter()
            .map(|nz| nz.column + 1)
            .max()
            .unwrap_or(0);
        let from_arrays = [
            self.col_costs.len(),
            self.col_lower.len(),
            self.col_upper.len(),
            self.col_integrality.len(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0);
        // explicitly sized column arrays fix the width on their own
        let from_dense = if from_arrays == 0 { self.dense_width } else { 0 };
        from_arrays.max(from_dense).max(from_matrix)
    }

    /// Number of rows the model will have once prepared.
    pub fn num_rows(&self) -> usize {
        let from_matrix = self
            .coefficients
            .iter()
            .map(|nz| nz.row + 1)
            .max()
            .unwrap_or(0);
        self.row_lower
            .len()
            .max(self.row_upper.len())
            .max(from_matrix)
    }

    pub fn num_nonzeros(&self) -> usize {
        self.coefficients.len()
    }
}
