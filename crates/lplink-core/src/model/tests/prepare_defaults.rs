use super::support::minimal_api_model;
use super::*;
use crate::error::{Axis, StructuralError};
use crate::types::{Orientation, VarType};

#[test]
fn test_prepare_materializes_free_bounds() {
    let mut model = LpModel::new();
    model.add_dense_row(23.0, &[1.0, 1.0], 23.0);
    model.add_dense_row(17.0, &[1.0, -1.0], 17.0);

    let prepared = model.prepare(Orientation::ColumnWise).unwrap();
    assert_eq!(prepared.num_cols(), 2);
    assert_eq!(prepared.num_rows(), 2);
    assert_eq!(prepared.col_costs(), &[0.0, 0.0]);
    assert_eq!(prepared.col_lower(), &[f64::NEG_INFINITY; 2]);
    assert_eq!(prepared.col_upper(), &[f64::INFINITY; 2]);
    assert_eq!(prepared.row_lower(), &[23.0, 17.0]);
    assert_eq!(prepared.row_upper(), &[23.0, 17.0]);
}

#[test]
fn test_omitted_bounds_equal_explicit_free_bounds() {
    let mut implicit = LpModel::new();
    implicit.add_nonzero(0, 0, 1.0);
    implicit.add_nonzero(1, 1, 2.0);

    let mut explicit = implicit.clone();
    explicit.col_lower = vec![f64::NEG_INFINITY; 2];
    explicit.col_upper = vec![f64::INFINITY; 2];
    explicit.row_lower = vec![f64::NEG_INFINITY; 2];
    explicit.row_upper = vec![f64::INFINITY; 2];

    assert_eq!(
        implicit.prepare(Orientation::RowWise).unwrap(),
        explicit.prepare(Orientation::RowWise).unwrap()
    );
}

#[test]
fn test_prepare_keeps_sense_and_offset() {
    let mut model = minimal_api_model();
    model.set_sense(Sense::Maximize);
    let prepared = model.prepare(Orientation::ColumnWise).unwrap();
    assert_eq!(prepared.sense(), Sense::Maximize);
    assert_eq!(prepared.offset(), 3.0);
    assert_eq!(prepared.matrix().orientation(), Orientation::ColumnWise);
    assert_eq!(prepared.matrix().start(), &[0, 2, 5]);
}

#[test]
fn test_prepare_rejects_length_mismatch() {
    let mut model = minimal_api_model();
    model.row_upper.pop();
    let err = model.prepare(Orientation::ColumnWise).unwrap_err();
    assert_eq!(
        err,
        StructuralError::LengthMismatch {
            field: "row_upper",
            expected: 3,
            got: 2,
        }
    );
}

#[test]
fn test_prepare_rejects_column_beyond_bound_arrays() {
    let mut model = minimal_api_model();
    model.add_nonzero(0, 2, 1.0);
    let err = model.prepare(Orientation::RowWise).unwrap_err();
    assert_eq!(
        err,
        StructuralError::LengthMismatch {
            field: "col_costs",
            expected: 3,
            got: 2,
        }
    );
}

#[test]
fn test_prepare_empty_model() {
    let prepared = LpModel::new().prepare(Orientation::ColumnWise).unwrap();
    assert_eq!(prepared.num_cols(), 0);
    assert_eq!(prepared.num_rows(), 0);
    assert_eq!(prepared.matrix().start(), &[0]);
}

#[test]
fn test_structural_error_axis() {
    let err = StructuralError::IndexOutOfRange {
        axis: Axis::Row,
        index: 3,
        dimension: 3,
        position: 0,
    };
    assert!(err.to_string().contains("row index 3"));
}

#[test]
fn test_prepare_keeps_integrality() {
    let mut model = minimal_api_model();
    model.set_integrality(1, VarType::Integer);
    assert_eq!(model.col_integrality, vec![VarType::Continuous, VarType::Integer]);

    let prepared = model.prepare(Orientation::ColumnWise).unwrap();
    assert_eq!(
        prepared.col_integrality(),
        Some(&[VarType::Continuous, VarType::Integer][..])
    );
}

#[test]
fn test_prepare_drops_all_continuous_integrality() {
    let mut model = minimal_api_model();
    model.col_integrality = vec![VarType::Continuous; 2];
    let prepared = model.prepare(Orientation::ColumnWise).unwrap();
    assert!(prepared.col_integrality().is_none());
}

#[test]
fn test_prepare_rejects_short_integrality() {
    let mut model = minimal_api_model();
    model.col_integrality = vec![VarType::Integer];
    let err = model.prepare(Orientation::ColumnWise).unwrap_err();
    assert_eq!(
        err,
        StructuralError::LengthMismatch {
            field: "col_integrality",
            expected: 2,
            got: 1,
        }
    );
}

#[test]
fn test_add_column_extends_integrality() {
    let mut model = LpModel::new();
    model.add_column(1.0, 0.0, 1.0);
    model.set_integrality(0, VarType::SemiContinuous);
    model.add_column(1.0, 0.0, 1.0);
    assert_eq!(
        model.col_integrality,
        vec![VarType::SemiContinuous, VarType::Continuous]
    );
}
