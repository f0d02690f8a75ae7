//! Engine status codes and their typed counterparts.
//!
//! HiGHS reports three kinds of integer codes: the three-valued return code of
//! every API call, the model (termination) status, and a per-row/per-column
//! basis status. Codes this crate does not know map to an `Other`/`Unknown`
//! variant, never to success.

use crate::error::EngineError;
use highs_sys::HighsInt;

/// Outcome of a single engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStatus {
    Ok,
    /// The call completed but the result carries reduced confidence.
    Warning,
    /// The call failed; any result is unusable.
    Error,
    /// A return code outside the documented three values.
    Unknown(HighsInt),
}

impl CallStatus {
    pub fn from_code(code: HighsInt) -> Self {
        match code {
            highs_sys::STATUS_OK => CallStatus::Ok,
            highs_sys::STATUS_WARNING => CallStatus::Warning,
            highs_sys::STATUS_ERROR => CallStatus::Error,
            other => CallStatus::Unknown(other),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CallStatus::Ok => "ok",
            CallStatus::Warning => "warning",
            CallStatus::Error => "error",
            CallStatus::Unknown(_) => "unknown",
        }
    }
}

/// Classify the return code of `call`.
///
/// `Ok(None)` on success, `Ok(Some(warning))` when the result is usable but
/// degraded, `Err` when the call failed or returned an unknown code.
pub(crate) fn check_call(
    code: HighsInt,
    call: &'static str,
) -> Result<Option<EngineError>, EngineError> {
    match CallStatus::from_code(code) {
        CallStatus::Ok => Ok(None),
        CallStatus::Warning => Ok(Some(EngineError::new(call, CallStatus::Warning))),
        status => Err(EngineError::new(call, status)),
    }
}

/// Like [`check_call`], but a warning is returned as an error too.
pub(crate) fn check_call_strict(code: HighsInt, call: &'static str) -> Result<(), EngineError> {
    match check_call(code, call)? {
        None => Ok(()),
        Some(warning) => Err(warning),
    }
}

/// Termination status of a model after a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelStatus {
    NotSet,
    LoadError,
    ModelError,
    PresolveError,
    SolveError,
    PostsolveError,
    ModelEmpty,
    Optimal,
    Infeasible,
    UnboundedOrInfeasible,
    Unbounded,
    ObjectiveBound,
    ObjectiveTarget,
    TimeLimit,
    IterationLimit,
    Unknown,
    /// A code introduced by an engine version this crate does not know.
    Other(HighsInt),
}

impl ModelStatus {
    pub fn from_code(code: HighsInt) -> Self {
        use highs_sys::{
            MODEL_STATUS_INFEASIBLE, MODEL_STATUS_LOAD_ERROR, MODEL_STATUS_MODEL_EMPTY,
            MODEL_STATUS_MODEL_ERROR, MODEL_STATUS_NOTSET, MODEL_STATUS_OBJECTIVE_BOUND,
            MODEL_STATUS_OBJECTIVE_TARGET, MODEL_STATUS_OPTIMAL, MODEL_STATUS_POSTSOLVE_ERROR,
            MODEL_STATUS_PRESOLVE_ERROR, MODEL_STATUS_REACHED_ITERATION_LIMIT,
            MODEL_STATUS_REACHED_TIME_LIMIT, MODEL_STATUS_SOLVE_ERROR, MODEL_STATUS_UNBOUNDED,
            MODEL_STATUS_UNBOUNDED_OR_INFEASIBLE, MODEL_STATUS_UNKNOWN,
        };
        match code {
            MODEL_STATUS_NOTSET => ModelStatus::NotSet,
            MODEL_STATUS_LOAD_ERROR => ModelStatus::LoadError,
            MODEL_STATUS_MODEL_ERROR => ModelStatus::ModelError,
            MODEL_STATUS_PRESOLVE_ERROR => ModelStatus::PresolveError,
            MODEL_STATUS_SOLVE_ERROR => ModelStatus::SolveError,
            MODEL_STATUS_POSTSOLVE_ERROR => ModelStatus::PostsolveError,
            MODEL_STATUS_MODEL_EMPTY => ModelStatus::ModelEmpty,
            MODEL_STATUS_OPTIMAL => ModelStatus::Optimal,
            MODEL_STATUS_INFEASIBLE => ModelStatus::Infeasible,
            MODEL_STATUS_UNBOUNDED_OR_INFEASIBLE => ModelStatus::UnboundedOrInfeasible,
            MODEL_STATUS_UNBOUNDED => ModelStatus::Unbounded,
            MODEL_STATUS_OBJECTIVE_BOUND => ModelStatus::ObjectiveBound,
            MODEL_STATUS_OBJECTIVE_TARGET => ModelStatus::ObjectiveTarget,
            MODEL_STATUS_REACHED_TIME_LIMIT => ModelStatus::TimeLimit,
            MODEL_STATUS_REACHED_ITERATION_LIMIT => ModelStatus::IterationLimit,
            MODEL_STATUS_UNKNOWN => ModelStatus::Unknown,
            other => ModelStatus::Other(other),
        }
    }

    pub fn is_optimal(self) -> bool {
        matches!(self, ModelStatus::Optimal)
    }

    pub fn is_infeasible(self) -> bool {
        matches!(self, ModelStatus::Infeasible)
    }

    pub fn is_unbounded(self) -> bool {
        matches!(self, ModelStatus::Unbounded)
    }

    /// Statuses after which the engine may hold a usable primal point.
    pub fn has_solution(self) -> bool {
        matches!(
            self,
            ModelStatus::Optimal
                | ModelStatus::ObjectiveBound
                | ModelStatus::ObjectiveTarget
                | ModelStatus::TimeLimit
                | ModelStatus::IterationLimit
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModelStatus::NotSet => "not_set",
            ModelStatus::LoadError => "load_error",
            ModelStatus::ModelError => "model_error",
            ModelStatus::PresolveError => "presolve_error",
            ModelStatus::SolveError => "solve_error",
            ModelStatus::PostsolveError => "postsolve_error",
            ModelStatus::ModelEmpty => "model_empty",
            ModelStatus::Optimal => "optimal",
            ModelStatus::Infeasible => "infeasible",
            ModelStatus::UnboundedOrInfeasible => "unbounded_or_infeasible",
            ModelStatus::Unbounded => "unbounded",
            ModelStatus::ObjectiveBound => "objective_bound",
            ModelStatus::ObjectiveTarget => "objective_target",
            ModelStatus::TimeLimit => "time_limit",
            ModelStatus::IterationLimit => "iteration_limit",
            ModelStatus::Unknown => "unknown",
            ModelStatus::Other(_) => "other",
        }
    }
}

impl std::fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelStatus::Other(code) => write!(f, "other({code})"),
            status => write!(f, "{}", status.as_str()),
        }
    }
}

/// Simplex classification of one column or row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasisStatus {
    /// Nonbasic at its lower bound.
    Lower,
    Basic,
    /// Nonbasic at its upper bound.
    Upper,
    /// Nonbasic free variable at zero.
    Zero,
    Nonbasic,
    Other(HighsInt),
}

impl BasisStatus {
    #[allow(non_upper_case_globals)]
    pub fn from_code(code: HighsInt) -> Self {
        use highs_sys::{
            kHighsBasisStatusBasic, kHighsBasisStatusLower, kHighsBasisStatusNonbasic,
            kHighsBasisStatusUpper, kHighsBasisStatusZero,
        };
        match code {
            kHighsBasisStatusLower => BasisStatus::Lower,
            kHighsBasisStatusBasic => BasisStatus::Basic,
            kHighsBasisStatusUpper => BasisStatus::Upper,
            kHighsBasisStatusZero => BasisStatus::Zero,
            kHighsBasisStatusNonbasic => BasisStatus::Nonbasic,
            other => BasisStatus::Other(other),
        }
    }

    pub fn is_basic(self) -> bool {
        matches!(self, BasisStatus::Basic)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BasisStatus::Lower => "lower",
            BasisStatus::Basic => "basic",
            BasisStatus::Upper => "upper",
            BasisStatus::Zero => "zero",
            BasisStatus::Nonbasic => "nonbasic",
            BasisStatus::Other(_) => "other",
        }
    }
}
