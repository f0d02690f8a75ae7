use crate::model::LpModel;
use crate::types::Nonzero;

/// The two-column, three-row LP used throughout the engine tests:
///
/// ```text
/// min    x_0 +  x_1 + 3
/// s.t.           x_1 <= 7
///     5 <=  x_0 + 2x_1 <= 15
///     6 <= 3x_0 + 2x_1
///     0 <= x_0 <= 4; 1 <= x_1
/// ```
pub(super) fn minimal_api_model() -> LpModel {
    LpModel {
        offset: 3.0,
        col_costs: vec![1.0, 1.0],
        col_lower: vec![0.0, 1.0],
        col_upper: vec![4.0, 1.0e30],
        row_lower: vec![-1.0e30, 5.0, 6.0],
        row_upper: vec![7.0, 15.0, 1.0e30],
        coefficients: vec![
            Nonzero::new(0, 1, 1.0),
            Nonzero::new(1, 0, 1.0),
            Nonzero::new(1, 1, 2.0),
            Nonzero::new(2, 0, 3.0),
            Nonzero::new(2, 1, 2.0),
        ],
        ..LpModel::default()
    }
}
