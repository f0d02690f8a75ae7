//! Engine-boundary error types.

use crate::solution::Solution;
use crate::status::CallStatus;
use lplink_core::StructuralError;

/// A non-`Ok` return code from a named engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError {
    call: &'static str,
    status: CallStatus,
    detail: Option<String>,
}

impl EngineError {
    pub(crate) fn new(call: &'static str, status: CallStatus) -> Self {
        Self {
            call,
            status,
            detail: None,
        }
    }

    /// An error raised before `call` could be made at all.
    pub(crate) fn rejected(call: &'static str, detail: impl Into<String>) -> Self {
        Self {
            call,
            status: CallStatus::Error,
            detail: Some(detail.into()),
        }
    }

    /// Name of the engine function that reported the status.
    pub fn call(&self) -> &'static str {
        self.call
    }

    pub fn status(&self) -> CallStatus {
        self.status
    }

    /// True when the call completed and its result may still be used.
    pub fn is_warning(&self) -> bool {
        self.status == CallStatus::Warning
    }

    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self.status {
            CallStatus::Warning => "ENGINE_WARNING",
            CallStatus::Unknown(_) => "ENGINE_UNKNOWN_STATUS",
            CallStatus::Ok | CallStatus::Error => "ENGINE_ERROR",
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            CallStatus::Warning => write!(f, "[{}] {} returned a warning", self.code(), self.call),
            CallStatus::Unknown(code) => write!(
                f,
                "[{}] {} returned unknown status {}",
                self.code(),
                self.call,
                code
            ),
            CallStatus::Ok | CallStatus::Error => match &self.detail {
                Some(detail) => write!(f, "[{}] {} not called: {}", self.code(), self.call, detail),
                None => write!(f, "[{}] {} failed with an error", self.code(), self.call),
            },
        }
    }
}

impl std::error::Error for EngineError {}

/// Errors raised while turning a model into a loaded engine handle.
///
/// No handle survives a conversion error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// The model itself is inconsistent; the engine was never called.
    Structural(StructuralError),
    /// A count or index does not fit the engine's integer width.
    Width { field: &'static str, value: usize },
    /// The engine could not allocate a handle.
    HandleAllocation,
    /// The engine rejected the model.
    Engine(EngineError),
}

impl ConversionError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ConversionError::Structural(err) => err.code(),
            ConversionError::Width { .. } => "CONVERSION_WIDTH_OVERFLOW",
            ConversionError::HandleAllocation => "ENGINE_HANDLE_ALLOCATION",
            ConversionError::Engine(err) => err.code(),
        }
    }
}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionError::Structural(err) => write!(f, "{err}"),
            ConversionError::Width { field, value } => write!(
                f,
                "[{}] {} value {} does not fit the engine integer type",
                self.code(),
                field,
                value
            ),
            ConversionError::HandleAllocation => {
                write!(f, "[{}] Engine returned a null handle", self.code())
            }
            ConversionError::Engine(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ConversionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConversionError::Structural(err) => Some(err),
            ConversionError::Engine(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StructuralError> for ConversionError {
    fn from(err: StructuralError) -> Self {
        ConversionError::Structural(err)
    }
}

impl From<EngineError> for ConversionError {
    fn from(err: EngineError) -> Self {
        ConversionError::Engine(err)
    }
}

/// Errors raised by [`RawModel::solve`](crate::RawModel::solve).
#[derive(Debug, Clone)]
pub enum SolveError {
    /// The engine finished with a warning. The solution was still extracted
    /// and may be inspected.
    Warning {
        solution: Box<Solution>,
        cause: EngineError,
    },
    /// The engine failed; there is no usable solution.
    Failed(EngineError),
}

impl SolveError {
    /// The engine status behind this error.
    pub fn cause(&self) -> &EngineError {
        match self {
            SolveError::Warning { cause, .. } => cause,
            SolveError::Failed(cause) => cause,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, SolveError::Warning { .. })
    }

    /// The solution extracted despite a warning, if any.
    pub fn partial_solution(&self) -> Option<&Solution> {
        match self {
            SolveError::Warning { solution, .. } => Some(solution.as_ref()),
            SolveError::Failed(_) => None,
        }
    }

    pub fn into_partial_solution(self) -> Option<Solution> {
        match self {
            SolveError::Warning { solution, .. } => Some(*solution),
            SolveError::Failed(_) => None,
        }
    }

    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SolveError::Warning { .. } => "SOLVE_WARNING",
            SolveError::Failed(_) => "SOLVE_FAILED",
        }
    }
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::Warning { solution, cause } => write!(
                f,
                "[{}] Solve finished with status {} under a warning: {}",
                self.code(),
                solution.status(),
                cause
            ),
            SolveError::Failed(cause) => write!(f, "[{}] Solve failed: {}", self.code(), cause),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.cause())
    }
}

/// Error type for [`Solver`](crate::Solver) operations.
#[derive(Debug, Clone)]
pub enum SolverError {
    Conversion(ConversionError),
    /// A configured option was not accepted.
    OptionRejected { name: String, cause: EngineError },
    Solve(SolveError),
}

impl SolverError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::Conversion(err) => err.code(),
            SolverError::OptionRejected { .. } => "SOLVER_OPTION_REJECTED",
            SolverError::Solve(err) => err.code(),
        }
    }

    /// The solution extracted despite a warning, if any.
    pub fn partial_solution(&self) -> Option<&Solution> {
        match self {
            SolverError::Solve(err) => err.partial_solution(),
            _ => None,
        }
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::Conversion(err) => write!(f, "{err}"),
            SolverError::OptionRejected { name, cause } => write!(
                f,
                "[{}] Option '{}' rejected: {}",
                self.code(),
                name,
                cause
            ),
            SolverError::Solve(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverError::Conversion(err) => Some(err),
            SolverError::OptionRejected { cause, .. } => Some(cause),
            SolverError::Solve(err) => Some(err),
        }
    }
}

impl From<ConversionError> for SolverError {
    fn from(err: ConversionError) -> Self {
        SolverError::Conversion(err)
    }
}

impl From<SolveError> for SolverError {
    fn from(err: SolveError) -> Self {
        SolverError::Solve(err)
    }
}
