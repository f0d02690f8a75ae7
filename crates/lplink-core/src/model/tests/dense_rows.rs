use super::support::minimal_api_model;
use super::*;
use crate::types::Orientation;

#[test]
fn test_add_dense_row_matches_explicit_triples() {
    let mut dense = LpModel::new();
    dense.set_offset(3.0);
    dense.col_costs = vec![1.0, 1.0];
    dense.col_lower = vec![0.0, 1.0];
    dense.col_upper = vec![4.0, 1.0e30];
    assert_eq!(dense.add_dense_row(-1.0e30, &[0.0, 1.0], 7.0), 0);
    assert_eq!(dense.add_dense_row(5.0, &[1.0, 2.0], 15.0), 1);
    assert_eq!(dense.add_dense_row(6.0, &[3.0, 2.0], 1.0e30), 2);

    let explicit = minimal_api_model();
    assert_eq!(dense.coefficients, explicit.coefficients);
    assert_eq!(dense.row_lower, explicit.row_lower);
    assert_eq!(dense.row_upper, explicit.row_upper);
    assert_eq!(
        dense.prepare(Orientation::ColumnWise).unwrap(),
        explicit.prepare(Orientation::ColumnWise).unwrap()
    );
}

#[test]
fn test_add_dense_row_skips_zeros_but_keeps_width() {
    let mut model = LpModel::new();
    model.add_dense_row(0.0, &[1.0, 0.0, 0.0], 1.0);
    assert_eq!(model.num_nonzeros(), 1);
    assert_eq!(model.num_cols(), 3);

    let prepared = model.prepare(Orientation::ColumnWise).unwrap();
    assert_eq!(prepared.num_cols(), 3);
    assert_eq!(prepared.matrix().start(), &[0, 1, 1, 1]);
}

#[test]
fn test_add_dense_row_all_zero_row() {
    let mut model = LpModel::new();
    model.add_dense_row(f64::NEG_INFINITY, &[0.0, 0.0], 4.0);
    assert_eq!(model.num_rows(), 1);
    assert_eq!(model.num_cols(), 2);
    assert_eq!(model.num_nonzeros(), 0);
}

#[test]
fn test_add_sparse_row_keeps_every_term() {
    let mut model = LpModel::new();
    let row = model.add_sparse_row(1.0, [(2, 0.0), (0, 4.0), (2, 1.5)], 2.0);
    assert_eq!(row, 0);
    assert_eq!(
        model.coefficients,
        vec![
            Nonzero::new(0, 2, 0.0),
            Nonzero::new(0, 0, 4.0),
            Nonzero::new(0, 2, 1.5),
        ]
    );
    assert_eq!(model.num_cols(), 3);
}

#[test]
fn test_row_after_bare_nonzero_pads_bounds() {
    let mut model = LpModel::new();
    model.add_nonzero(1, 0, 2.0);
    let row = model.add_dense_row(3.0, &[1.0], 3.0);
    assert_eq!(row, 2);
    assert_eq!(model.row_lower, vec![f64::NEG_INFINITY, f64::NEG_INFINITY, 3.0]);
    assert_eq!(model.row_upper, vec![f64::INFINITY, f64::INFINITY, 3.0]);
}

#[test]
fn test_add_column_pads_earlier_columns() {
    let mut model = LpModel::new();
    model.add_dense_row(0.0, &[1.0, 1.0], 1.0);
    let column = model.add_column(5.0, 0.0, 2.0);
    assert_eq!(column, 2);
    assert_eq!(model.col_costs, vec![0.0, 0.0, 5.0]);
    assert_eq!(model.col_lower, vec![f64::NEG_INFINITY, f64::NEG_INFINITY, 0.0]);
    assert_eq!(model.col_upper, vec![f64::INFINITY, f64::INFINITY, 2.0]);
}

#[test]
fn test_set_sense() {
    let mut model = LpModel::new();
    model.set_sense(Sense::Maximize);
    assert_eq!(model.sense, Sense::Maximize);
}

#[test]
fn test_explicit_column_arrays_fix_the_width() {
    let mut model = LpModel::new();
    model.col_costs = vec![2.0];
    model.col_lower = vec![0.0];
    model.col_upper = vec![10.0];
    model.add_dense_row(0.0, &[1.0, 0.0, 0.0], 5.0);
    assert_eq!(model.num_cols(), 1);

    let prepared = model.prepare(Orientation::ColumnWise).unwrap();
    assert_eq!(prepared.num_cols(), 1);
    assert_eq!(prepared.matrix().start(), &[0, 1]);
}

#[test]
fn test_dense_row_width_ignored_once_columns_are_added() {
    let mut model = LpModel::new();
    model.add_column(1.0, 0.0, 1.0);
    model.add_dense_row(0.0, &[1.0, 0.0], 1.0);
    assert_eq!(model.num_cols(), 1);
    assert!(model.prepare(Orientation::RowWise).is_ok());
}
