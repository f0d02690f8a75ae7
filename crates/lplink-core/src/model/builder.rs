//! Model builder methods for appending rows, columns, and nonzeros.
//!
//! None of these methods validate their input; indices and array lengths are
//! checked by [`LpModel::prepare`].

use crate::model::LpModel;
use crate::types::{Nonzero, Sense, VarType};

impl LpModel {
    /// Set the optimization sense.
    pub fn set_sense(&mut self, sense: Sense) {
        self.sense = sense;
    }

    /// Set the constant objective offset.
    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    /// Append a row `lower <= sum(coefficients[j] * x_j) <= upper`.
    ///
    /// Column `j` is the position in `coefficients`. Exact zeros add no
    /// nonzero. While no column array is set, the row still counts as
    /// spanning all of its columns when the column count is inferred.
    ///
    /// # Returns
    ///
    /// The index of the appended row.
    pub fn add_dense_row(&mut self, lower: f64, coefficients: &[f64], upper: f64) -> usize {
        let row = self.push_row_bounds(lower, upper);
        self.coefficients.extend(
            coefficients
                .iter()
                .enumerate()
                .filter(|(_, value)| **value != 0.0)
                .map(|(column, value)| Nonzero::new(row, column, *value)),
        );
        self.dense_width = self.dense_width.max(coefficients.len());
        tracing::trace!(
            component = "model",
            operation = "add_dense_row",
            status = "success",
            row,
            lower,
            upper,
            width = coefficients.len(),
            "Appended dense row"
        );
        row
    }

    /// Append a row given as `(column, coefficient)` pairs.
    ///
    /// Every pair is kept, including zeros and repeated columns.
    pub fn add_sparse_row(
        &mut self,
        lower: f64,
        terms: impl IntoIterator<Item = (usize, f64)>,
        upper: f64,
    ) -> usize {
        let row = self.push_row_bounds(lower, upper);
        self.coefficients.extend(
            terms
                .into_iter()
                .map(|(column, value)| Nonzero::new(row, column, value)),
        );
        row
    }

    /// Append a column with its cost and bounds.
    ///
    /// Earlier columns without explicit cost or bounds are filled with a zero
    /// cost and free bounds so the three column arrays stay aligned.
    ///
    /// # Returns
    ///
    /// The index of the appended column.
    pub fn add_column(&mut self, cost: f64, lower: f64, upper: f64) -> usize {
        let column = self.num_cols();
        self.col_costs.resize(column, 0.0);
        self.col_lower.resize(column, f64::NEG_INFINITY);
        self.col_upper.resize(column, f64::INFINITY);
        self.col_costs.push(cost);
        self.col_lower.push(lower);
        self.col_upper.push(upper);
        if !self.col_integrality.is_empty() {
            self.col_integrality.resize(column + 1, VarType::Continuous);
        }
        column
    }

    /// Set the variable type of `column`.
    ///
    /// Columns before it without a type become continuous.
    pub fn set_integrality(&mut self, column: usize, var_type: VarType) {
        let width = self.num_cols().max(column + 1);
        self.col_integrality.resize(width, VarType::Continuous);
        self.col_integrality[column] = var_type;
    }

    /// Append a single constraint-matrix entry.
    pub fn add_nonzero(&mut self, row: usize, column: usize, value: f64) {
        self.coefficients.push(Nonzero::new(row, column, value));
    }

    // Row bound arrays are padded to the current row count first so that
    // rows introduced only through nonzeros keep free bounds.
    fn push_row_bounds(&mut self, lower: f64, upper: f64) -> usize {
        let row = self.num_rows();
        self.row_lower.resize(row, f64::NEG_INFINITY);
        self.row_upper.resize(row, f64::INFINITY);
        self.row_lower.push(lower);
        self.row_upper.push(upper);
        row
    }
}
