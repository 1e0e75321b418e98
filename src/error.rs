//! Error types for sparse storage and the solver.

use thiserror::Error;

/// Result type alias using [`SparseError`].
pub type Result<T> = core::result::Result<T, SparseError>;

/// Structural misuse of a sparse vector, matrix, or solution.
///
/// An inconsistent linear system is *not* an error: [`solve`](crate::SparseMatrix::solve)
/// reports it as `Ok(None)`.
///
/// ```
/// use nzsolve::{SparseError, SparseVector};
///
/// let v = SparseVector::from_slice(&[1.0_f64, 0.0]);
/// assert_eq!(v.at(2), Err(SparseError::IndexOutOfBounds { index: 2, len: 2 }));
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparseError {
    /// Logical position past the end of a vector.
    #[error("index {index} out of bounds for sparse vector of length {len}")]
    IndexOutOfBounds {
        /// Requested logical position
        index: usize,
        /// Logical length of the vector
        len: usize,
    },

    /// Row index past the last row of a matrix.
    #[error("row {row} out of bounds for matrix with {nrows} rows")]
    RowOutOfBounds {
        /// Requested row
        row: usize,
        /// Number of rows
        nrows: usize,
    },

    /// Operand length does not match the dimension it pairs with.
    #[error("dimension mismatch: expected length {expected}, got {got}")]
    DimensionMismatch {
        /// Required length
        expected: usize,
        /// Supplied length
        got: usize,
    },
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = SparseError::IndexOutOfBounds { index: 5, len: 3 };
        assert_eq!(
            e.to_string(),
            "index 5 out of bounds for sparse vector of length 3"
        );
        let e = SparseError::RowOutOfBounds { row: 2, nrows: 2 };
        assert_eq!(e.to_string(), "row 2 out of bounds for matrix with 2 rows");
        let e = SparseError::DimensionMismatch { expected: 4, got: 3 };
        assert_eq!(e.to_string(), "dimension mismatch: expected length 4, got 3");
    }
}
