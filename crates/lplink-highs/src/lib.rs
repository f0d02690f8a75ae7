//! HiGHS engine boundary for lplink models.
//!
//! [`to_raw_model`] loads an [`LpModel`](lplink_core::LpModel) into a
//! [`RawModel`], the owned low-level engine handle; [`RawModel::solve`] runs
//! it and translates the output into a [`Solution`]. [`Solver`] wraps both
//! steps behind a [`SolverConfig`].

pub mod adapter;
pub mod config;
pub mod convert;
pub mod error;
pub mod ffi;
pub mod solution;
pub mod solver;
pub mod status;

pub use adapter::{load_prepared, to_raw_model, to_raw_model_with};
pub use config::{OptionValue, SolverConfig, SolverMethod};
pub use error::{ConversionError, EngineError, SolveError, SolverError};
pub use ffi::{RawModel, highs_version};
pub use solution::{RawOutput, Solution, translate};
pub use solver::{Solver, apply_option};
pub use status::{BasisStatus, CallStatus, ModelStatus};
