//! Solver configuration types.

use highs_sys::HighsInt;
use lplink_core::Orientation;

/// Algorithm HiGHS uses for an LP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverMethod {
    /// Let HiGHS decide.
    #[default]
    Choose,
    Simplex,
    Ipm,
}

impl SolverMethod {
    /// Value of the HiGHS `solver` option.
    pub fn as_str(self) -> &'static str {
        match self {
            SolverMethod::Choose => "choose",
            SolverMethod::Simplex => "simplex",
            SolverMethod::Ipm => "ipm",
        }
    }
}

/// A typed value for a named HiGHS option.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(HighsInt),
    Float(f64),
    Str(String),
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<HighsInt> for OptionValue {
    fn from(value: HighsInt) -> Self {
        OptionValue::Int(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

/// Configuration options for a solve.
///
/// Every field left as `None` keeps the engine default. The engine runs
/// quietly unless `log_to_console` is enabled.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Time limit in seconds.
    pub time_limit: Option<f64>,
    /// Enable/disable presolve.
    pub presolve: Option<bool>,
    pub method: Option<SolverMethod>,
    pub primal_tolerance: Option<f64>,
    pub dual_tolerance: Option<f64>,
    /// Simplex iteration limit.
    pub iteration_limit: Option<HighsInt>,
    /// Log solver output to console.
    pub log_to_console: Option<bool>,
    /// Matrix layout handed to the engine. Column-wise when unset.
    pub orientation: Option<Orientation>,
    /// Raw options applied after the typed ones, in insertion order.
    pub options: Vec<(String, OptionValue)>,
}

impl SolverConfig {
    /// Create a new configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time limit in seconds.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    /// Enable or disable presolve.
    pub fn with_presolve(mut self, enabled: bool) -> Self {
        self.presolve = Some(enabled);
        self
    }

    pub fn with_method(mut self, method: SolverMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_primal_tolerance(mut self, tol: f64) -> Self {
        self.primal_tolerance = Some(tol);
        self
    }

    pub fn with_dual_tolerance(mut self, tol: f64) -> Self {
        self.dual_tolerance = Some(tol);
        self
    }

    pub fn with_iteration_limit(mut self, limit: HighsInt) -> Self {
        self.iteration_limit = Some(limit);
        self
    }

    /// Enable or disable console logging.
    pub fn with_log_to_console(mut self, enabled: bool) -> Self {
        self.log_to_console = Some(enabled);
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Set any HiGHS option by name.
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.push((name.into(), value.into()));
        self
    }

    /// Check if this configuration is completely empty (all defaults).
    pub fn is_empty(&self) -> bool {
        self.time_limit.is_none()
            && self.presolve.is_none()
            && self.method.is_none()
            && self.primal_tolerance.is_none()
            && self.dual_tolerance.is_none()
            && self.iteration_limit.is_none()
            && self.log_to_console.is_none()
            && self.orientation.is_none()
            && self.options.is_empty()
    }

    /// The options this configuration sets on the engine, in the order they
    /// are applied.
    pub fn engine_options(&self) -> Vec<(String, OptionValue)> {
        let mut options = Vec::new();
        if let Some(enabled) = self.log_to_console {
            options.push(("output_flag".to_string(), OptionValue::Bool(enabled)));
            options.push(("log_to_console".to_string(), OptionValue::Bool(enabled)));
        }
        if let Some(limit) = self.time_limit {
            options.push(("time_limit".to_string(), OptionValue::Float(limit)));
        }
        if let Some(presolve) = self.presolve {
            let value = if presolve { "on" } else { "off" };
            options.push(("presolve".to_string(), value.into()));
        }
        if let Some(method) = self.method {
            options.push(("solver".to_string(), method.as_str().into()));
        }
        if let Some(tol) = self.primal_tolerance {
            options.push((
                "primal_feasibility_tolerance".to_string(),
                OptionValue::Float(tol),
            ));
        }
        if let Some(tol) = self.dual_tolerance {
            options.push((
                "dual_feasibility_tolerance".to_string(),
                OptionValue::Float(tol),
            ));
        }
        if let Some(limit) = self.iteration_limit {
            options.push((
                "simplex_iteration_limit".to_string(),
                OptionValue::Int(limit),
            ));
        }
        options.extend(self.options.iter().cloned());
        options
    }
}
