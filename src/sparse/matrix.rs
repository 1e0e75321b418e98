use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::error::{Result, SparseError};
use crate::traits::Scalar;

use super::SparseVector;

/// Matrix stored as an ordered sequence of [`SparseVector`] rows.
///
/// The row count is the number of rows; the column count is the longest
/// row's logical length. Shorter rows read as zero-padded on the right.
///
/// # Examples
///
/// ```
/// use nzsolve::SparseMatrix;
///
/// let m = SparseMatrix::from_rows(&[vec![2.0_f64, 0.0, 1.0], vec![0.0, 3.0]]);
/// assert_eq!(m.nrows(), 2);
/// assert_eq!(m.ncols(), 3);
/// assert_eq!(m.nnz(), 3);
/// assert_eq!(m.get(1, 2).unwrap(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix<T> {
    rows: Vec<SparseVector<T>>,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T> SparseMatrix<T> {
    /// Create a matrix with no rows.
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Create an empty matrix with room for `nrows` rows.
    pub fn with_capacity(nrows: usize) -> Self {
        Self {
            rows: Vec::with_capacity(nrows),
        }
    }
}

impl<T: Scalar> SparseMatrix<T> {
    /// Create a matrix from dense rows, storing only non-zero entries.
    ///
    /// Rows may have different lengths.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Self {
        rows.iter()
            .map(|r| SparseVector::from_slice(r.as_ref()))
            .collect()
    }

    /// Create an `nrows x ncols` matrix by calling `f(row, col)` for each element.
    ///
    /// ```
    /// use nzsolve::SparseMatrix;
    /// let m = SparseMatrix::from_fn(3, 3, |i, j| if i == j { 1.0_f64 } else { 0.0 });
    /// assert_eq!(m.nnz(), 3);
    /// assert_eq!(m.ncols(), 3);
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        (0..nrows)
            .map(|i| (0..ncols).map(|j| f(i, j)).collect())
            .collect()
    }
}

impl<T> Default for SparseMatrix<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Shape & row access ──────────────────────────────────────────────

impl<T> SparseMatrix<T> {
    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns: the longest row's logical length.
    pub fn ncols(&self) -> usize {
        self.rows.iter().map(SparseVector::len).max().unwrap_or(0)
    }

    /// Whether the matrix has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of stored entries.
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(SparseVector::nnz).sum()
    }

    /// Reserve room for `additional` more rows.
    pub fn reserve(&mut self, additional: usize) {
        self.rows.reserve(additional);
    }

    /// Remove all rows, keeping capacity.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Append a row.
    pub fn push_row(&mut self, row: SparseVector<T>) {
        self.rows.push(row);
    }

    /// Row `i`, or [`SparseError::RowOutOfBounds`].
    pub fn row(&self, i: usize) -> Result<&SparseVector<T>> {
        let nrows = self.nrows();
        self.rows
            .get(i)
            .ok_or(SparseError::RowOutOfBounds { row: i, nrows })
    }

    /// Mutable row `i`, or [`SparseError::RowOutOfBounds`].
    pub fn row_mut(&mut self, i: usize) -> Result<&mut SparseVector<T>> {
        let nrows = self.nrows();
        self.rows
            .get_mut(i)
            .ok_or(SparseError::RowOutOfBounds { row: i, nrows })
    }

    /// Put `row` in slot `i`, returning the row it replaces.
    pub fn replace_row(&mut self, i: usize, row: SparseVector<T>) -> Result<SparseVector<T>> {
        Ok(core::mem::replace(self.row_mut(i)?, row))
    }

    /// All rows as a slice.
    #[inline]
    pub fn as_rows(&self) -> &[SparseVector<T>] {
        &self.rows
    }

    /// Iterate over rows.
    pub fn iter(&self) -> core::slice::Iter<'_, SparseVector<T>> {
        self.rows.iter()
    }

    /// Iterate mutably over rows.
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, SparseVector<T>> {
        self.rows.iter_mut()
    }
}

impl<T: Scalar> SparseMatrix<T> {
    /// Element at `(i, j)`.
    ///
    /// Columns past the end of a short row but inside [`ncols`](Self::ncols)
    /// read as zero.
    pub fn get(&self, i: usize, j: usize) -> Result<T> {
        let row = self.row(i)?;
        if let Some(x) = row.get(j) {
            return Ok(x);
        }
        let ncols = self.ncols();
        if j < ncols {
            Ok(T::zero())
        } else {
            Err(SparseError::IndexOutOfBounds { index: j, len: ncols })
        }
    }

    /// Sparse matrix–vector product `A * x`.
    ///
    /// Fails with [`SparseError::DimensionMismatch`] if `x.len() != ncols()`.
    ///
    /// ```
    /// use nzsolve::SparseMatrix;
    /// let a = SparseMatrix::from_rows(&[[2.0_f64, 0.0], [1.0, 3.0]]);
    /// let b = a.mul_vec(&[2.0, 3.0]).unwrap();
    /// assert_eq!(b.to_dense(), vec![4.0, 11.0]);
    /// ```
    pub fn mul_vec(&self, x: &[T]) -> Result<SparseVector<T>> {
        let ncols = self.ncols();
        if x.len() != ncols {
            return Err(SparseError::DimensionMismatch {
                expected: ncols,
                got: x.len(),
            });
        }
        Ok(self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .fold(T::zero(), |sum, (p, &a)| sum + a * x[p])
            })
            .collect())
    }

    /// Materialize as dense rows, each `ncols()` wide.
    pub fn to_dense(&self) -> Vec<Vec<T>> {
        let ncols = self.ncols();
        self.rows
            .iter()
            .map(|row| {
                let mut dense = row.to_dense();
                dense.resize(ncols, T::zero());
                dense
            })
            .collect()
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<usize> for SparseMatrix<T> {
    type Output = SparseVector<T>;

    #[inline]
    fn index(&self, i: usize) -> &SparseVector<T> {
        &self.rows[i]
    }
}

impl<T> IndexMut<usize> for SparseMatrix<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut SparseVector<T> {
        &mut self.rows[i]
    }
}

// ── Conversions & iteration ─────────────────────────────────────────

impl<T> From<Vec<SparseVector<T>>> for SparseMatrix<T> {
    fn from(rows: Vec<SparseVector<T>>) -> Self {
        Self { rows }
    }
}

impl<T> FromIterator<SparseVector<T>> for SparseMatrix<T> {
    fn from_iter<I: IntoIterator<Item = SparseVector<T>>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<SparseVector<T>> for SparseMatrix<T> {
    fn extend<I: IntoIterator<Item = SparseVector<T>>>(&mut self, iter: I) {
        self.rows.extend(iter);
    }
}

impl<T> IntoIterator for SparseMatrix<T> {
    type Item = SparseVector<T>;
    type IntoIter = alloc::vec::IntoIter<SparseVector<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a SparseMatrix<T> {
    type Item = &'a SparseVector<T>;
    type IntoIter = core::slice::Iter<'a, SparseVector<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SparseMatrix<T> {
    type Item = &'a mut SparseVector<T>;
    type IntoIter = core::slice::IterMut<'a, SparseVector<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter_mut()
    }
}
