//! Sparse linear-program model building.
//!
//! [`LpModel`] accumulates costs, bounds, and constraint-matrix entries;
//! [`LpModel::prepare`] validates them, fills omitted bounds, and compresses
//! the matrix into the [`PreparedLp`] layout a numeric engine loads.

pub mod error;
pub mod model;
pub mod sparse;
pub mod types;

pub use error::{Axis, StructuralError};
pub use model::{LpModel, PreparedLp};
pub use sparse::{CompressedMatrix, compress};
pub use types::{Nonzero, Orientation, Sense, VarType};
