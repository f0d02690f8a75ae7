//! Model-to-engine adapter.
//!
//! Turns an [`LpModel`] into a loaded [`RawModel`]: dimensions are inferred,
//! omitted bounds become free, the matrix is compressed, every array is
//! converted to the engine's widths, and the result is passed to HiGHS.

use crate::convert::{convert_floats, engine_count, engine_indices};
use crate::error::ConversionError;
use crate::ffi::RawModel;
use highs_sys::HighsInt;
use lplink_core::{LpModel, Orientation, PreparedLp, Sense, VarType};
use std::time::Instant;
use tracing::{debug, warn};

/// An LP in exactly the form `Highs_passLp` consumes.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EngineLp {
    pub num_col: HighsInt,
    pub num_row: HighsInt,
    pub num_nz: HighsInt,
    pub a_format: HighsInt,
    pub sense: HighsInt,
    pub offset: f64,
    pub col_cost: Vec<f64>,
    pub col_lower: Vec<f64>,
    pub col_upper: Vec<f64>,
    pub row_lower: Vec<f64>,
    pub row_upper: Vec<f64>,
    pub a_start: Vec<HighsInt>,
    pub a_index: Vec<HighsInt>,
    pub a_value: Vec<f64>,
    /// Present only for models with a non-continuous column.
    pub integrality: Option<Vec<HighsInt>>,
}

impl EngineLp {
    pub(crate) fn from_prepared(lp: &PreparedLp) -> Result<Self, ConversionError> {
        let matrix = lp.matrix();
        Ok(Self {
            num_col: engine_count("num_col", lp.num_cols())?,
            num_row: engine_count("num_row", lp.num_rows())?,
            num_nz: engine_count("num_nz", matrix.num_nonzeros())?,
            a_format: matrix_format(matrix.orientation()),
            sense: objective_sense(lp.sense()),
            offset: lp.offset(),
            col_cost: lp.col_costs().to_vec(),
            col_lower: convert_floats(lp.col_lower()),
            col_upper: convert_floats(lp.col_upper()),
            row_lower: convert_floats(lp.row_lower()),
            row_upper: convert_floats(lp.row_upper()),
            a_start: engine_indices("a_start", matrix.start())?,
            a_index: engine_indices("a_index", matrix.index())?,
            a_value: matrix.value().to_vec(),
            integrality: lp
                .col_integrality()
                .map(|types| types.iter().copied().map(var_type).collect()),
        })
    }
}

fn matrix_format(orientation: Orientation) -> HighsInt {
    match orientation {
        Orientation::ColumnWise => highs_sys::MATRIX_FORMAT_COLUMN_WISE,
        Orientation::RowWise => highs_sys::MATRIX_FORMAT_ROW_WISE,
    }
}

fn var_type(var_type: VarType) -> HighsInt {
    match var_type {
        VarType::Continuous => highs_sys::kHighsVarTypeContinuous,
        VarType::Integer => highs_sys::kHighsVarTypeInteger,
        VarType::SemiContinuous => highs_sys::kHighsVarTypeSemiContinuous,
        VarType::SemiInteger => highs_sys::kHighsVarTypeSemiInteger,
        VarType::ImplicitInteger => highs_sys::kHighsVarTypeImplicitInteger,
    }
}

fn objective_sense(sense: Sense) -> HighsInt {
    match sense {
        Sense::Minimize => highs_sys::OBJECTIVE_SENSE_MINIMIZE,
        Sense::Maximize => highs_sys::OBJECTIVE_SENSE_MAXIMIZE,
    }
}

/// Build a loaded engine handle from `model` using a column-wise matrix.
pub fn to_raw_model(model: &LpModel) -> Result<RawModel, ConversionError> {
    to_raw_model_with(model, Orientation::ColumnWise)
}

/// Build a loaded engine handle from `model`, handing the matrix to the
/// engine in the given orientation.
///
/// Structural problems are reported before any engine call. On any failure
/// the handle, if one was allocated, is released before returning.
pub fn to_raw_model_with(
    model: &LpModel,
    orientation: Orientation,
) -> Result<RawModel, ConversionError> {
    let prepared = model.prepare(orientation).inspect_err(|err| {
        warn!(
            component = "adapter",
            operation = "prepare",
            status = "error",
            code = err.code(),
            "Model failed structural validation"
        );
    })?;
    load_prepared(&prepared)
}

/// Load an already prepared model into a fresh engine handle.
///
/// Models with integrality go through `Highs_passMip`, all others through
/// `Highs_passLp`.
pub fn load_prepared(prepared: &PreparedLp) -> Result<RawModel, ConversionError> {
    let started = Instant::now();
    let lp = EngineLp::from_prepared(prepared)?;

    let mut raw = RawModel::new().ok_or(ConversionError::HandleAllocation)?;
    // Engine console output stays off unless an option turns it back on.
    raw.set_bool_option("output_flag", false)?;
    if let Some(warning) = raw.pass_lp(&lp)? {
        raw.record_warning(warning);
    }

    debug!(
        component = "adapter",
        operation = "load",
        status = "success",
        num_cols = prepared.num_cols(),
        num_rows = prepared.num_rows(),
        nnz = prepared.matrix().num_nonzeros(),
        orientation = prepared.matrix().orientation().as_str(),
        sense = prepared.sense().as_str(),
        mip = lp.integrality.is_some(),
        duration_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Loaded model into HiGHS"
    );
    Ok(raw)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use lplink_core::Nonzero;

    fn small_model() -> LpModel {
        let mut model = LpModel::new();
        model.set_sense(Sense::Maximize);
        model.set_offset(3.0);
        model.col_costs = vec![1.0, 1.0];
        model.col_lower = vec![0.0, 1.0];
        model.col_upper = vec![4.0, 1.0e30];
        model.row_lower = vec![-1.0e30, 5.0, 6.0];
        model.row_upper = vec![7.0, 15.0, 1.0e30];
        model.coefficients = vec![
            Nonzero::new(0, 1, 1.0),
            Nonzero::new(1, 0, 1.0),
            Nonzero::new(1, 1, 2.0),
            Nonzero::new(2, 0, 3.0),
            Nonzero::new(2, 1, 2.0),
        ];
        model
    }

    #[test]
    fn test_engine_lp_column_wise() {
        let prepared = small_model().prepare(Orientation::ColumnWise).unwrap();
        let lp = EngineLp::from_prepared(&prepared).unwrap();
        assert_eq!(lp.num_col, 2);
        assert_eq!(lp.num_row, 3);
        assert_eq!(lp.num_nz, 5);
        assert_eq!(lp.a_format, highs_sys::MATRIX_FORMAT_COLUMN_WISE);
        assert_eq!(lp.sense, highs_sys::OBJECTIVE_SENSE_MAXIMIZE);
        assert_eq!(lp.offset, 3.0);
        assert_eq!(lp.a_start, vec![0, 2, 5]);
        assert_eq!(lp.a_index, vec![1, 2, 0, 1, 2]);
        assert_eq!(lp.a_value, vec![1.0, 3.0, 1.0, 2.0, 2.0]);
        assert!(lp.integrality.is_none());
    }

    #[test]
    fn test_engine_lp_integrality_codes() {
        let mut model = small_model();
        model.col_integrality = vec![VarType::Integer, VarType::SemiContinuous];
        let lp = EngineLp::from_prepared(&model.prepare(Orientation::ColumnWise).unwrap()).unwrap();
        assert_eq!(
            lp.integrality,
            Some(vec![
                highs_sys::kHighsVarTypeInteger,
                highs_sys::kHighsVarTypeSemiContinuous
            ])
        );
    }

    #[test]
    fn test_engine_lp_row_wise() {
        let prepared = small_model().prepare(Orientation::RowWise).unwrap();
        let lp = EngineLp::from_prepared(&prepared).unwrap();
        assert_eq!(lp.a_format, highs_sys::MATRIX_FORMAT_ROW_WISE);
        assert_eq!(lp.a_start, vec![0, 1, 3, 5]);
        assert_eq!(lp.a_index, vec![1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_engine_lp_normalizes_sentinels() {
        let prepared = small_model().prepare(Orientation::ColumnWise).unwrap();
        let lp = EngineLp::from_prepared(&prepared).unwrap();
        assert_eq!(lp.col_upper, vec![4.0, f64::INFINITY]);
        assert_eq!(lp.row_lower[0], f64::NEG_INFINITY);
        assert_eq!(lp.row_upper[2], f64::INFINITY);
    }

    #[test]
    fn test_omitted_and_explicit_free_bounds_match() {
        let mut implicit = LpModel::new();
        implicit.coefficients = vec![Nonzero::new(0, 0, 1.0), Nonzero::new(1, 1, -1.0)];
        implicit.row_lower = vec![1.0, 2.0];
        implicit.row_upper = vec![1.0, 2.0];

        let mut explicit = implicit.clone();
        explicit.col_costs = vec![0.0, 0.0];
        explicit.col_lower = vec![-1.0e30, f64::NEG_INFINITY];
        explicit.col_upper = vec![f64::INFINITY, 1.0e30];

        let a = EngineLp::from_prepared(&implicit.prepare(Orientation::ColumnWise).unwrap());
        let b = EngineLp::from_prepared(&explicit.prepare(Orientation::ColumnWise).unwrap());
        assert_eq!(a.unwrap(), b.unwrap());
    }

    #[test]
    fn test_structural_error_before_engine() {
        let mut model = small_model();
        model.row_lower.truncate(2);
        model.row_upper.truncate(2);

        let err = to_raw_model(&model).unwrap_err();
        assert!(matches!(err, ConversionError::Structural(_)));
        assert_eq!(err.code(), "MODEL_LENGTH_MISMATCH");
    }
}
