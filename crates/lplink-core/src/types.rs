/// Optimization sense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sense {
    #[default]
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        }
    }
}

/// Axis along which a sparse matrix is compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Compressed sparse row: one segment per row, column indices inside.
    RowWise,
    /// Compressed sparse column: one segment per column, row indices inside.
    #[default]
    ColumnWise,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::RowWise => "row_wise",
            Orientation::ColumnWise => "column_wise",
        }
    }
}

/// Variable type of a column.
///
/// Semi-continuous and semi-integer columns take either zero or a value
/// within their bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VarType {
    #[default]
    Continuous,
    Integer,
    SemiContinuous,
    SemiInteger,
    ImplicitInteger,
}

impl VarType {
    pub fn as_str(self) -> &'static str {
        match self {
            VarType::Continuous => "continuous",
            VarType::Integer => "integer",
            VarType::SemiContinuous => "semi_continuous",
            VarType::SemiInteger => "semi_integer",
            VarType::ImplicitInteger => "implicit_integer",
        }
    }

    pub fn is_continuous(self) -> bool {
        self == VarType::Continuous
    }
}

/// A single constraint-matrix entry.
///
/// Duplicate `(row, column)` pairs are kept as separate entries; how they
/// combine is left to the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nonzero {
    pub row: usize,
    pub column: usize,
    pub value: f64,
}

impl Nonzero {
    pub fn new(row: usize, column: usize, value: f64) -> Self {
        Self { row, column, value }
    }

    /// Index along the compressed axis for `orientation`.
    pub(crate) fn major(&self, orientation: Orientation) -> usize {
        match orientation {
            Orientation::RowWise => self.row,
            Orientation::ColumnWise => self.column,
        }
    }

    /// Index along the free axis for `orientation`.
    pub(crate) fn minor(&self, orientation: Orientation) -> usize {
        match orientation {
            Orientation::RowWise => self.column,
            Orientation::ColumnWise => self.row,
        }
    }
}

impl From<(usize, usize, f64)> for Nonzero {
    fn from((row, column, value): (usize, usize, f64)) -> Self {
        Self::new(row, column, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonzero_from_tuple() {
        let entries: Vec<Nonzero> = [(0, 2, 1.5), (3, 0, -2.0)]
            .into_iter()
            .map(Nonzero::from)
            .collect();
        assert_eq!(entries[0], Nonzero::new(0, 2, 1.5));
        assert_eq!(entries[1].major(Orientation::RowWise), 3);
        assert_eq!(entries[1].minor(Orientation::RowWise), 0);
    }

    #[test]
    fn test_var_type_default_is_continuous() {
        assert!(VarType::default().is_continuous());
        assert!(!VarType::SemiInteger.is_continuous());
        assert_eq!(VarType::ImplicitInteger.as_str(), "implicit_integer");
    }
}
