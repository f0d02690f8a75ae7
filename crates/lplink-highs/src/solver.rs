//! HiGHS solver implementation.

use crate::adapter::to_raw_model_with;
use crate::config::{OptionValue, SolverConfig};
use crate::error::{EngineError, SolverError};
use crate::ffi::{RawModel, highs_version};
use crate::solution::Solution;
use lplink_core::{LpModel, Orientation};
use std::time::Instant;
use tracing::{debug, warn};

/// Solves [`LpModel`]s with HiGHS under one configuration.
///
/// Every call allocates its own engine handle, so one `Solver` can be used
/// for any number of models, one after another or from several threads.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    fn update_config(&mut self, update: impl FnOnce(SolverConfig) -> SolverConfig) {
        self.config = update(std::mem::take(&mut self.config));
    }

    /// Enable or disable HiGHS logging to console.
    pub fn set_log_to_console(&mut self, enabled: bool) {
        self.update_config(|config| config.with_log_to_console(enabled));
    }

    /// Set a time limit in seconds.
    pub fn set_time_limit(&mut self, seconds: f64) {
        self.update_config(|config| config.with_time_limit(seconds));
    }

    pub fn set_presolve(&mut self, enabled: bool) {
        self.update_config(|config| config.with_presolve(enabled));
    }

    /// Set a HiGHS option by name.
    pub fn set_option(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) {
        self.update_config(|config| config.with_option(name, value));
    }

    /// Get access to the current solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SolverConfig) {
        self.config = config;
    }

    /// Convert `model` and apply the configured options, without solving.
    pub fn load(&self, model: &LpModel) -> Result<RawModel, SolverError> {
        let orientation = self.config.orientation.unwrap_or(Orientation::ColumnWise);
        let mut raw = to_raw_model_with(model, orientation)?;
        for (name, value) in self.config.engine_options() {
            apply_option(&mut raw, &name, &value).map_err(|cause| {
                warn!(
                    component = "solver",
                    operation = "apply_option",
                    status = "error",
                    option = %name,
                    code = cause.code(),
                    "HiGHS rejected option"
                );
                SolverError::OptionRejected { name, cause }
            })?;
        }
        Ok(raw)
    }

    /// Convert, solve, and release the engine handle.
    ///
    /// A solve that finishes under an engine warning is returned as
    /// [`SolverError::Solve`]; the extracted solution is still available
    /// through [`SolverError::partial_solution`].
    pub fn solve(&self, model: &LpModel) -> Result<Solution, SolverError> {
        let started = Instant::now();
        let solver_version = highs_version().unwrap_or_else(|| "unknown".to_string());
        debug!(
            component = "solver",
            operation = "solve",
            status = "start",
            solver = "highs",
            solver_version = %solver_version,
            num_cols = model.num_cols(),
            num_rows = model.num_rows(),
            nnz = model.num_nonzeros(),
            "Starting solve process"
        );

        let mut raw = self.load(model)?;
        let result = raw.solve();
        raw.close();
        let solution = result?;

        if !solution.is_optimal() {
            warn!(
                component = "solver",
                operation = "solve",
                status = "warn",
                solver = "highs",
                model_status = solution.status_string(),
                "Solver did not find an optimal solution"
            );
        }
        debug!(
            component = "solver",
            operation = "solve",
            status = "success",
            solver = "highs",
            model_status = solution.status_string(),
            objective_value = solution.objective_value(),
            simplex_iterations = solution.simplex_iterations(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "HiGHS solve completed"
        );
        Ok(solution)
    }
}

/// Set one typed option on an engine handle.
pub fn apply_option(
    raw: &mut RawModel,
    name: &str,
    value: &OptionValue,
) -> Result<(), EngineError> {
    match value {
        OptionValue::Bool(v) => raw.set_bool_option(name, *v),
        OptionValue::Int(v) => raw.set_int_option(name, *v),
        OptionValue::Float(v) => raw.set_float_option(name, *v),
        OptionValue::Str(v) => raw.set_string_option(name, v),
    }
}
