//! Compressed sparse row/column conversion.
//!
//! [`compress`] groups a list of [`Nonzero`] triples by the compressed axis
//! without sorting inside a group: entries keep the order they were supplied
//! in. The result is the `(start, index, value)` triple the engine loads.

use crate::error::{Axis, StructuralError};
use crate::types::{Nonzero, Orientation};
use std::time::Instant;

/// A constraint matrix in compressed sparse form.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedMatrix {
    orientation: Orientation,
    num_rows: usize,
    num_cols: usize,
    start: Vec<usize>,
    index: Vec<usize>,
    value: Vec<f64>,
}

impl CompressedMatrix {
    /// An `num_rows x num_cols` matrix without nonzeros.
    pub fn empty(orientation: Orientation, num_rows: usize, num_cols: usize) -> Self {
        let major = match orientation {
            Orientation::RowWise => num_rows,
            Orientation::ColumnWise => num_cols,
        };
        Self {
            orientation,
            num_rows,
            num_cols,
            start: vec![0; major + 1],
            index: Vec::new(),
            value: Vec::new(),
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Length of the compressed axis.
    pub fn major_dim(&self) -> usize {
        self.start.len() - 1
    }

    /// Length of the free axis.
    pub fn minor_dim(&self) -> usize {
        match self.orientation {
            Orientation::RowWise => self.num_cols,
            Orientation::ColumnWise => self.num_rows,
        }
    }

    pub fn num_nonzeros(&self) -> usize {
        self.value.len()
    }

    /// Segment offsets, `major_dim() + 1` entries.
    pub fn start(&self) -> &[usize] {
        &self.start
    }

    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn value(&self) -> &[f64] {
        &self.value
    }

    /// Free-axis indices and values stored for compressed-axis slot `i`.
    ///
    /// Returns `None` when `i` is out of range.
    pub fn segment(&self, i: usize) -> Option<(&[usize], &[f64])> {
        let begin = *self.start.get(i)?;
        let end = *self.start.get(i + 1)?;
        Some((&self.index[begin..end], &self.value[begin..end]))
    }

    /// Expand back into triples, grouped by the compressed axis.
    pub fn to_triples(&self) -> Vec<Nonzero> {
        let mut triples = Vec::with_capacity(self.num_nonzeros());
        for major in 0..self.major_dim() {
            let Some((indices, values)) = self.segment(major) else {
                continue;
            };
            for (&minor, &value) in indices.iter().zip(values) {
                let (row, column) = match self.orientation {
                    Orientation::RowWise => (major, minor),
                    Orientation::ColumnWise => (minor, major),
                };
                triples.push(Nonzero::new(row, column, value));
            }
        }
        triples
    }

    /// Verify the compressed arrays are consistent with each other and with
    /// the declared dimensions.
    pub fn check_format(&self) -> Result<(), StructuralError> {
        if self.index.len() != self.value.len() {
            return Err(StructuralError::MalformedMatrix {
                reason: format!(
                    "index length {} differs from value length {}",
                    self.index.len(),
                    self.value.len()
                ),
            });
        }
        if self.start.first().copied() != Some(0) {
            return Err(StructuralError::MalformedMatrix {
                reason: "start must begin at 0".to_string(),
            });
        }
        if self.start.last().copied() != Some(self.value.len()) {
            return Err(StructuralError::MalformedMatrix {
                reason: "start last entry must equal the number of nonzeros".to_string(),
            });
        }
        if let Some(slot) = self.start.windows(2).position(|w| w[0] > w[1]) {
            return Err(StructuralError::MalformedMatrix {
                reason: format!("start must be non-decreasing (slot {slot})"),
            });
        }
        let minor_dim = self.minor_dim();
        if let Some(position) = self.index.iter().position(|&i| i >= minor_dim) {
            let axis = match self.orientation {
                Orientation::RowWise => Axis::Column,
                Orientation::ColumnWise => Axis::Row,
            };
            return Err(StructuralError::IndexOutOfRange {
                axis,
                index: self.index[position],
                dimension: minor_dim,
                position,
            });
        }
        Ok(())
    }
}

/// Compress `entries` along `orientation`.
///
/// Every row index must be below `num_rows` and every column index below
/// `num_cols`. Within a segment, entries appear in input order.
pub fn compress(
    entries: &[Nonzero],
    orientation: Orientation,
    num_rows: usize,
    num_cols: usize,
) -> Result<CompressedMatrix, StructuralError> {
    let started = Instant::now();

    for (position, entry) in entries.iter().enumerate() {
        if entry.row >= num_rows {
            return Err(StructuralError::IndexOutOfRange {
                axis: Axis::Row,
                index: entry.row,
                dimension: num_rows,
                position,
            });
        }
        if entry.column >= num_cols {
            return Err(StructuralError::IndexOutOfRange {
                axis: Axis::Column,
                index: entry.column,
                dimension: num_cols,
                position,
            });
        }
    }

    let mut matrix = CompressedMatrix::empty(orientation, num_rows, num_cols);
    let major_dim = matrix.major_dim();

    // count entries per slot, then turn counts into offsets
    let mut counts = vec![0usize; major_dim];
    for entry in entries {
        counts[entry.major(orientation)] += 1;
    }
    let mut running = 0;
    for (slot, count) in counts.iter().enumerate() {
        matrix.start[slot] = running;
        running += count;
    }
    matrix.start[major_dim] = running;

    // each slot's cursor advances independently as its entries are placed
    let mut cursor = matrix.start[..major_dim].to_vec();
    matrix.index = vec![0; entries.len()];
    matrix.value = vec![0.0; entries.len()];
    for entry in entries {
        let slot = entry.major(orientation);
        let dest = cursor[slot];
        matrix.index[dest] = entry.minor(orientation);
        matrix.value[dest] = entry.value;
        cursor[slot] += 1;
    }

    tracing::trace!(
        component = "sparse",
        operation = "compress",
        status = "success",
        orientation = orientation.as_str(),
        num_rows,
        num_cols,
        nnz = entries.len(),
        duration_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Compressed nonzeros"
    );

    Ok(matrix)
}
