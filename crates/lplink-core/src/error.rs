//! Structural error types.

/// Which axis an index or dimension refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Row => "row",
            Axis::Column => "column",
        }
    }
}

/// Errors detected before any engine call is made.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuralError {
    /// A nonzero references a row or column outside the declared dimension.
    IndexOutOfRange {
        axis: Axis,
        index: usize,
        dimension: usize,
        position: usize,
    },
    /// A per-row or per-column array has the wrong length.
    LengthMismatch {
        field: &'static str,
        expected: usize,
        got: usize,
    },
    /// Compressed arrays are internally inconsistent.
    MalformedMatrix { reason: String },
}

impl StructuralError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            StructuralError::IndexOutOfRange { axis, .. } => match axis {
                Axis::Row => "MATRIX_ROW_OUT_OF_RANGE",
                Axis::Column => "MATRIX_COLUMN_OUT_OF_RANGE",
            },
            StructuralError::LengthMismatch { .. } => "MODEL_LENGTH_MISMATCH",
            StructuralError::MalformedMatrix { .. } => "MATRIX_MALFORMED",
        }
    }
}

impl std::fmt::Display for StructuralError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructuralError::IndexOutOfRange {
                axis,
                index,
                dimension,
                position,
            } => write!(
                f,
                "[{}] Nonzero {} has {} index {} but the model has {} {}s",
                self.code(),
                position,
                axis.as_str(),
                index,
                dimension,
                axis.as_str()
            ),
            StructuralError::LengthMismatch {
                field,
                expected,
                got,
            } => write!(
                f,
                "[{}] {} has length {} (expected {})",
                self.code(),
                field,
                got,
                expected
            ),
            StructuralError::MalformedMatrix { reason } => {
                write!(f, "[{}] Compressed matrix invalid: {}", self.code(), reason)
            }
        }
    }
}

impl std::error::Error for StructuralError {}
