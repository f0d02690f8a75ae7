//! Deterministic synthetic LPs.

use lplink_core::LpModel;

/// Shape of a generated LP.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
    /// Probability that a given (row, column) cell holds a nonzero.
    pub density: f64,
}

impl Shape {
    pub fn case_name(&self) -> String {
        format!("r{}_c{}_d{}", self.rows, self.cols, self.density)
    }
}

// Knuth's MMIX constants.
struct Lcg(u64);

impl Lcg {
    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Build a feasible, bounded minimisation LP of the given shape.
///
/// Every column lies in `[0, 10]` with a positive cost. Row bounds are
/// placed around the activity of the all-ones point so that point is always
/// feasible. The same `shape` and `seed` give the same model.
pub fn generate(shape: Shape, seed: u64) -> LpModel {
    let mut rng = Lcg(seed ^ 0x9E37_79B9_7F4A_7C15);
    let mut model = LpModel::new();

    for _ in 0..shape.cols {
        let cost = 1.0 + rng.next_f64();
        model.add_column(cost, 0.0, 10.0);
    }

    for _ in 0..shape.rows {
        let mut terms = Vec::new();
        for column in 0..shape.cols {
            if rng.next_f64() < shape.density {
                let value = rng.next_f64() * 4.0 - 2.0;
                terms.push((column, value));
            }
        }
        let activity: f64 = terms.iter().map(|(_, value)| value).sum();
        let slack = 1.0 + activity.abs() * 0.1;
        model.add_sparse_row(activity - slack, terms, activity + slack);
    }

    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use lplink_core::Orientation;

    fn shape() -> Shape {
        Shape {
            rows: 20,
            cols: 30,
            density: 0.2,
        }
    }

    #[test]
    fn generate_is_deterministic() {
        let a = generate(shape(), 7);
        let b = generate(shape(), 7);
        assert_eq!(a.coefficients, b.coefficients);
        assert_eq!(a.row_lower, b.row_lower);
        assert_eq!(a.col_costs, b.col_costs);
    }

    #[test]
    fn generate_respects_shape() {
        let model = generate(shape(), 1);
        assert_eq!(model.num_cols(), 30);
        assert_eq!(model.num_rows(), 20);
        let prepared = model.prepare(Orientation::ColumnWise).expect("valid model");
        assert_eq!(prepared.matrix().num_nonzeros(), model.num_nonzeros());
    }

    #[test]
    fn all_ones_point_is_feasible() {
        let model = generate(shape(), 3);
        let mut activity = vec![0.0; model.num_rows()];
        for nz in &model.coefficients {
            activity[nz.row] += nz.value;
        }
        for (row, value) in activity.iter().enumerate() {
            assert!(model.row_lower[row] <= *value + 1e-9);
            assert!(*value <= model.row_upper[row] + 1e-9);
        }
    }

    #[test]
    fn case_name_encodes_shape() {
        assert_eq!(shape().case_name(), "r20_c30_d0.2");
    }
}
