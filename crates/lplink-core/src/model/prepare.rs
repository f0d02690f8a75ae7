//! Turning an [`LpModel`] into fully materialised engine input.

use crate::error::StructuralError;
use crate::model::LpModel;
use crate::sparse::{CompressedMatrix, compress};
use crate::types::{Orientation, Sense, VarType};
use std::time::Instant;

/// An LP with every array sized and the matrix compressed.
///
/// All column arrays have length [`num_cols`](Self::num_cols) and all row
/// arrays have length [`num_rows`](Self::num_rows).
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedLp {
    sense: Sense,
    offset: f64,
    col_costs: Vec<f64>,
    col_lower: Vec<f64>,
    col_upper: Vec<f64>,
    row_lower: Vec<f64>,
    row_upper: Vec<f64>,
    col_integrality: Option<Vec<VarType>>,
    matrix: CompressedMatrix,
}

impl PreparedLp {
    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn num_cols(&self) -> usize {
        self.col_costs.len()
    }

    pub fn num_rows(&self) -> usize {
        self.row_lower.len()
    }

    pub fn col_costs(&self) -> &[f64] {
        &self.col_costs
    }

    pub fn col_lower(&self) -> &[f64] {
        &self.col_lower
    }

    pub fn col_upper(&self) -> &[f64] {
        &self.col_upper
    }

    pub fn row_lower(&self) -> &[f64] {
        &self.row_lower
    }

    pub fn row_upper(&self) -> &[f64] {
        &self.row_upper
    }

    /// Per-column variable types, or `None` for a pure LP.
    pub fn col_integrality(&self) -> Option<&[VarType]> {
        self.col_integrality.as_deref()
    }

    pub fn matrix(&self) -> &CompressedMatrix {
        &self.matrix
    }
}

impl LpModel {
    /// Infer dimensions, fill omitted arrays, and compress the matrix.
    ///
    /// Omitted costs become zeros, omitted lower bounds `-inf` and omitted
    /// upper bounds `+inf`. Integrality is kept only if some column is not
    /// continuous.
    ///
    /// # Errors
    ///
    /// Returns a [`StructuralError`] if a supplied array does not match the
    /// inferred dimension or a nonzero index is out of range.
    pub fn prepare(&self, orientation: Orientation) -> Result<PreparedLp, StructuralError> {
        let started = Instant::now();
        let num_cols = self.num_cols();
        let num_rows = self.num_rows();

        let col_costs = sized_or_default("col_costs", &self.col_costs, num_cols, 0.0)?;
        let col_lower = sized_or_default("col_lower", &self.col_lower, num_cols, f64::NEG_INFINITY)?;
        let col_upper = sized_or_default("col_upper", &self.col_upper, num_cols, f64::INFINITY)?;
        let row_lower = sized_or_default("row_lower", &self.row_lower, num_rows, f64::NEG_INFINITY)?;
        let row_upper = sized_or_default("row_upper", &self.row_upper, num_rows, f64::INFINITY)?;
        let col_integrality = integrality(&self.col_integrality, num_cols)?;

        let matrix = compress(&self.coefficients, orientation, num_rows, num_cols).inspect_err(
            |err| {
                tracing::warn!(
                    component = "model",
                    operation = "prepare",
                    status = "error",
                    code = err.code(),
                    "Constraint matrix rejected"
                );
            },
        )?;

        tracing::debug!(
            component = "model",
            operation = "prepare",
            status = "success",
            sense = self.sense.as_str(),
            orientation = orientation.as_str(),
            num_cols,
            num_rows,
            nnz = matrix.num_nonzeros(),
            mip = col_integrality.is_some(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Prepared model for engine"
        );

        Ok(PreparedLp {
            sense: self.sense,
            offset: self.offset,
            col_costs,
            col_lower,
            col_upper,
            row_lower,
            row_upper,
            col_integrality,
            matrix,
        })
    }
}

fn sized_or_default(
    field: &'static str,
    values: &[f64],
    len: usize,
    default: f64,
) -> Result<Vec<f64>, StructuralError> {
    if values.is_empty() {
        return Ok(vec![default; len]);
    }
    if values.len() != len {
        tracing::warn!(
            component = "model",
            operation = "prepare",
            status = "error",
            field,
            expected = len,
            got = values.len(),
            "Array length does not match model dimension"
        );
        return Err(StructuralError::LengthMismatch {
            field,
            expected: len,
            got: values.len(),
        });
    }
    Ok(values.to_vec())
}

fn integrality(
    values: &[VarType],
    num_cols: usize,
) -> Result<Option<Vec<VarType>>, StructuralError> {
    if values.is_empty() {
        return Ok(None);
    }
    if values.len() != num_cols {
        return Err(StructuralError::LengthMismatch {
            field: "col_integrality",
            expected: num_cols,
            got: values.len(),
        });
    }
    if values.iter().all(|var_type| var_type.is_continuous()) {
        return Ok(None);
    }
    Ok(Some(values.to_vec()))
}
