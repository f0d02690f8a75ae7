//! Solution type and the translation from raw engine output.

use crate::convert::convert_floats;
use crate::status::{BasisStatus, ModelStatus};
use highs_sys::HighsInt;
use num_traits::Float;

/// Solution of one solve call.
///
/// Owns all of its data; it stays valid after the [`RawModel`](crate::RawModel)
/// that produced it has been released.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub(crate) status: ModelStatus,
    /// Primal values of columns.
    pub(crate) col_values: Vec<f64>,
    /// Reduced costs.
    pub(crate) col_duals: Vec<f64>,
    /// Row activities.
    pub(crate) row_values: Vec<f64>,
    /// Shadow prices.
    pub(crate) row_duals: Vec<f64>,
    pub(crate) col_basis: Vec<BasisStatus>,
    pub(crate) row_basis: Vec<BasisStatus>,
    /// Objective including the constant offset.
    pub(crate) objective_value: f64,
    pub(crate) simplex_iterations: u64,
    pub(crate) solve_time_seconds: f64,
}

impl Solution {
    pub fn status(&self) -> ModelStatus {
        self.status
    }

    /// Get the primal value of the column at the given index
    pub fn get_primal(&self, index: usize) -> Option<f64> {
        self.col_values.get(index).copied()
    }

    /// Get the reduced cost of the column at the given index
    pub fn get_column_dual(&self, index: usize) -> Option<f64> {
        self.col_duals.get(index).copied()
    }

    /// Get the activity of the row at the given index
    pub fn get_row_value(&self, index: usize) -> Option<f64> {
        self.row_values.get(index).copied()
    }

    /// Get the shadow price of the row at the given index
    pub fn get_row_dual(&self, index: usize) -> Option<f64> {
        self.row_duals.get(index).copied()
    }

    pub fn col_values(&self) -> &[f64] {
        &self.col_values
    }

    pub fn col_duals(&self) -> &[f64] {
        &self.col_duals
    }

    pub fn row_values(&self) -> &[f64] {
        &self.row_values
    }

    pub fn row_duals(&self) -> &[f64] {
        &self.row_duals
    }

    /// Basis status per column. Empty when the engine holds no valid basis.
    pub fn col_basis(&self) -> &[BasisStatus] {
        &self.col_basis
    }

    /// Basis status per row. Empty when the engine holds no valid basis.
    pub fn row_basis(&self) -> &[BasisStatus] {
        &self.row_basis
    }

    pub fn has_basis(&self) -> bool {
        !self.col_basis.is_empty() || !self.row_basis.is_empty()
    }

    /// Get the objective value, offset included
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    pub fn simplex_iterations(&self) -> u64 {
        self.simplex_iterations
    }

    /// Get solve time in seconds
    pub fn solve_time_seconds(&self) -> f64 {
        self.solve_time_seconds
    }

    pub fn is_optimal(&self) -> bool {
        self.status.is_optimal()
    }

    /// Check if the engine reported a usable primal point (includes optimal)
    pub fn is_feasible(&self) -> bool {
        self.status.has_solution()
    }

    pub fn is_infeasible(&self) -> bool {
        self.status.is_infeasible()
    }

    pub fn is_unbounded(&self) -> bool {
        self.status.is_unbounded()
    }

    pub fn status_string(&self) -> &'static str {
        self.status.as_str()
    }
}

/// Output of one solve exactly as the engine returned it.
///
/// `F` is the engine's floating-point width.
#[derive(Debug, Clone, Default)]
pub struct RawOutput<F = f64> {
    pub model_status: HighsInt,
    pub col_values: Vec<F>,
    pub col_duals: Vec<F>,
    pub row_values: Vec<F>,
    pub row_duals: Vec<F>,
    pub col_basis: Vec<HighsInt>,
    pub row_basis: Vec<HighsInt>,
    pub objective_value: F,
    pub simplex_iterations: u64,
    pub solve_time_seconds: f64,
}

/// Translate raw engine output into a typed [`Solution`].
///
/// Unknown model-status and basis codes map to their `Other` variants.
/// Column and row basis codes are mapped independently of each other.
pub fn translate<F: Float>(raw: RawOutput<F>) -> Solution {
    Solution {
        status: ModelStatus::from_code(raw.model_status),
        col_values: convert_floats(&raw.col_values),
        col_duals: convert_floats(&raw.col_duals),
        row_values: convert_floats(&raw.row_values),
        row_duals: convert_floats(&raw.row_duals),
        col_basis: translate_basis(&raw.col_basis),
        row_basis: translate_basis(&raw.row_basis),
        objective_value: crate::convert::normalize_float(raw.objective_value),
        simplex_iterations: raw.simplex_iterations,
        solve_time_seconds: raw.solve_time_seconds,
    }
}

fn translate_basis(codes: &[HighsInt]) -> Vec<BasisStatus> {
    codes.iter().map(|&code| BasisStatus::from_code(code)).collect()
}
