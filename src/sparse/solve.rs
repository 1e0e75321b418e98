use alloc::vec;
use alloc::vec::Vec;

use log::{debug, trace};

use crate::error::{Result, SparseError};
use crate::traits::{LinalgScalar, Scalar};

use super::{SparseMatrix, SparseVector};

// ── Solution ────────────────────────────────────────────────────────

/// Solution set of a consistent linear system, as affine expressions.
///
/// Every pivot variable is written in terms of the free parameters:
///
/// ```text
/// x[pivots[i]] = coefficients[i][0] + Σ_j coefficients[i][j + 1] * x[free[j]]
/// ```
///
/// `pivots` and `free` are both strictly increasing and together cover
/// every column exactly once. With no free parameters every row holds
/// only its constant, and the solution is unique.
///
/// # Example
///
/// ```
/// use nzsolve::{SparseMatrix, SparseVector};
///
/// // x0 + x1 = 1
/// let a = SparseMatrix::from_rows(&[[1.0_f64, 1.0]]);
/// let b = SparseVector::from_slice(&[1.0]);
/// let sol = a.solve(&b).unwrap().unwrap();
/// assert_eq!(sol.pivots(), &[0]);
/// assert_eq!(sol.free_parameters(), &[1]);
/// assert_eq!(sol.coefficients(), &[vec![1.0, -1.0]]);
/// assert_eq!(sol.evaluate(&[0.25]).unwrap(), vec![0.75, 0.25]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<T> {
    coefficients: Vec<Vec<T>>,
    pivots: Vec<usize>,
    free: Vec<usize>,
}

impl<T> Solution<T> {
    /// One affine row `[constant, c_1, …, c_k]` per pivot variable.
    #[inline]
    pub fn coefficients(&self) -> &[Vec<T>] {
        &self.coefficients
    }

    /// Columns determined by the reduced system, in table-row order.
    #[inline]
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    /// Columns with no pivot, in increasing order.
    #[inline]
    pub fn free_parameters(&self) -> &[usize] {
        &self.free
    }

    /// Rank of the coefficient matrix.
    #[inline]
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    /// Number of unknowns.
    #[inline]
    pub fn nvars(&self) -> usize {
        self.pivots.len() + self.free.len()
    }

    /// Whether the system has exactly one solution.
    #[inline]
    pub fn is_unique(&self) -> bool {
        self.free.is_empty()
    }

    /// Split into `(coefficient_table, pivot_indices)`.
    pub fn into_parts(self) -> (Vec<Vec<T>>, Vec<usize>) {
        (self.coefficients, self.pivots)
    }
}

impl<T: Scalar> Solution<T> {
    /// Full solution vector for the given free-parameter values.
    ///
    /// `params[j]` is the value of `x[free_parameters()[j]]`. Fails with
    /// [`SparseError::DimensionMismatch`] if the count is wrong.
    pub fn evaluate(&self, params: &[T]) -> Result<Vec<T>> {
        if params.len() != self.free.len() {
            return Err(SparseError::DimensionMismatch {
                expected: self.free.len(),
                got: params.len(),
            });
        }
        let mut x = vec![T::zero(); self.nvars()];
        for (&col, &value) in self.free.iter().zip(params) {
            x[col] = value;
        }
        for (&col, row) in self.pivots.iter().zip(&self.coefficients) {
            x[col] = row[1..]
                .iter()
                .zip(params)
                .fold(row[0], |acc, (&c, &p)| acc + c * p);
        }
        Ok(x)
    }

    /// The solution with every free parameter set to zero.
    pub fn particular(&self) -> Vec<T> {
        let mut x = vec![T::zero(); self.nvars()];
        for (&col, row) in self.pivots.iter().zip(&self.coefficients) {
            x[col] = row[0];
        }
        x
    }
}

// ── Elimination phases ──────────────────────────────────────────────

/// Copy the coefficient rows, pad each to `ncols`, and append the
/// constant term at column `ncols`.
fn augment<T: Scalar>(
    a: &SparseMatrix<T>,
    constants: &SparseVector<T>,
    ncols: usize,
) -> Result<Vec<SparseVector<T>>> {
    a.iter()
        .enumerate()
        .map(|(i, row)| -> Result<SparseVector<T>> {
            let mut work = row.clone();
            work.resize(ncols);
            work.push(constants.at(i)?);
            Ok(work)
        })
        .collect()
}

/// Find the next pivot among `rows[from..]`.
///
/// Returns `(row, col)` for the leftmost column `< ncols` holding a stored
/// entry in any candidate row; ties go to the first such row. Columns are
/// scanned left to right, so this is first-nonzero pivoting rather than
/// magnitude pivoting. `None` means the remaining rows have no coefficients.
pub(crate) fn find_pivot<T>(
    rows: &[SparseVector<T>],
    from: usize,
    ncols: usize,
) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    for (offset, row) in rows[from..].iter().enumerate() {
        let Some(col) = row.first_position() else {
            continue;
        };
        if col < ncols && best.map_or(true, |(_, c)| col < c) {
            best = Some((from + offset, col));
        }
    }
    best
}

/// Normalize `rows[pivot_row]` so its entry at `col` is one, then clear
/// column `col` from every other row.
///
/// Reduction is full (above and below the pivot) and uses sparse row
/// arithmetic only. Returns `false`, leaving `rows` untouched, if the pivot
/// row has no stored entry at `col`.
pub(crate) fn reduce_column<T: LinalgScalar>(
    rows: &mut [SparseVector<T>],
    pivot_row: usize,
    col: usize,
) -> bool {
    let Some(idx) = rows[pivot_row].plain_to_nonzero(col) else {
        return false;
    };
    let mut pivot = core::mem::take(&mut rows[pivot_row]);
    let inv_pivot = T::one() / pivot.values[idx];
    pivot.scale(inv_pivot);
    if let Some(idx) = pivot.plain_to_nonzero(col) {
        pivot.values[idx] = T::one();
    }

    for (i, row) in rows.iter_mut().enumerate() {
        if i == pivot_row {
            continue;
        }
        let Some(idx) = row.plain_to_nonzero(col) else {
            continue;
        };
        let factor = row.values[idx];
        row.sub_scaled(factor, &pivot);
        row.remove(col);
    }

    rows[pivot_row] = pivot;
    true
}

/// Columns in `0..ncols` absent from the (increasing) pivot list.
pub(crate) fn free_columns(pivots: &[usize], ncols: usize) -> Vec<usize> {
    (0..ncols)
        .filter(|c| pivots.binary_search(c).is_err())
        .collect()
}

/// Affine row `[constant, -a_{f_1}, …, -a_{f_k}]` for a reduced pivot row.
///
/// The constant is the reduced right-hand side as-is; free-parameter
/// coefficients are negated because they move to the right-hand side.
fn affine_row<T: Scalar>(row: &SparseVector<T>, free: &[usize], ncols: usize) -> Vec<T> {
    let mut out = vec![T::zero(); free.len() + 1];
    for (p, &x) in row.iter() {
        if p == ncols {
            out[0] = x;
        } else if let Ok(k) = free.binary_search(&p) {
            out[k + 1] = T::zero() - x;
        }
    }
    out
}

// ── Solve ───────────────────────────────────────────────────────────

impl<T: LinalgScalar> SparseMatrix<T> {
    /// Solve `A x = b` by sparse Gauss–Jordan elimination.
    ///
    /// Returns:
    /// - `Ok(Some(solution))` for a consistent system, unique or
    ///   parametrized (see [`Solution`])
    /// - `Ok(None)` if the system is inconsistent
    /// - `Err(DimensionMismatch)` if `constants.len() != nrows()`
    ///
    /// `self` and `constants` are not modified; elimination runs on a
    /// private augmented copy.
    ///
    /// Zero tests use the absolute [`ZERO_TOLERANCE_SCALE`](crate::ZERO_TOLERANCE_SCALE)
    /// threshold. For floating-point rows whose entries are not exactly
    /// representable, the cancellation that should empty a dependent row
    /// can leave residue above it; that residue becomes a pivot, so the
    /// reported rank is higher and the free set smaller than in exact
    /// arithmetic. Systems with exactly representable entries (integers,
    /// dyadic fractions) reduce exactly.
    ///
    /// ```
    /// use nzsolve::{SparseMatrix, SparseVector};
    ///
    /// let a = SparseMatrix::from_rows(&[[2.0_f64, 0.0], [0.0, 3.0]]);
    /// let b = SparseVector::from_slice(&[4.0, 9.0]);
    /// let (table, pivots) = a.solve(&b).unwrap().unwrap().into_parts();
    /// assert_eq!(pivots, vec![0, 1]);
    /// assert_eq!(table, vec![vec![2.0], vec![3.0]]);
    ///
    /// // x0 = 1 and x0 = 2
    /// let a = SparseMatrix::from_rows(&[[1.0_f64, 0.0], [1.0, 0.0]]);
    /// let b = SparseVector::from_slice(&[1.0, 2.0]);
    /// assert!(a.solve(&b).unwrap().is_none());
    /// ```
    pub fn solve(&self, constants: &SparseVector<T>) -> Result<Option<Solution<T>>> {
        let nrows = self.nrows();
        if constants.len() != nrows {
            return Err(SparseError::DimensionMismatch {
                expected: nrows,
                got: constants.len(),
            });
        }
        let ncols = self.ncols();
        debug!(
            "solving {}x{} sparse system ({} stored coefficients)",
            nrows,
            ncols,
            self.nnz()
        );

        let mut rows = augment(self, constants, ncols)?;
        let mut pivots = Vec::with_capacity(nrows.min(ncols));

        while pivots.len() < nrows {
            let r = pivots.len();
            let Some((row, col)) = find_pivot(&rows, r, ncols) else {
                break;
            };
            rows.swap(r, row);
            trace!(
                "pivot row {} (from {}) column {}, |p| = {:?}",
                r,
                row,
                col,
                rows[r].get(col).map(LinalgScalar::modulus)
            );
            // find_pivot only reports stored entries
            if !reduce_column(&mut rows, r, col) {
                return Err(SparseError::IndexOutOfBounds { index: col, len: ncols });
            }
            pivots.push(col);
        }

        let rank = pivots.len();
        // Rows past the rank have no coefficients left; a stored entry
        // there can only be a constant term.
        if let Some(k) = rows[rank..].iter().position(|row| row.nnz() > 0) {
            debug!("inconsistent system: row {} reduces to 0 = c", rank + k);
            return Ok(None);
        }

        let free = free_columns(&pivots, ncols);
        let coefficients = rows[..rank]
            .iter()
            .map(|row| affine_row(row, &free, ncols))
            .collect();
        debug!("rank {}, {} free parameters", rank, free.len());

        Ok(Some(Solution {
            coefficients,
            pivots,
            free,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[f64]]) -> Vec<SparseVector<f64>> {
        data.iter().map(|r| SparseVector::from_slice(r)).collect()
    }

    fn solve(a: &[&[f64]], b: &[f64]) -> Option<Solution<f64>> {
        let a: SparseMatrix<f64> = rows(a).into();
        a.solve(&SparseVector::from_slice(b)).unwrap()
    }

    // ── find_pivot ──────────────────────────────────────────────────

    #[test]
    fn pivot_is_leftmost_column_first_row() {
        let r = rows(&[&[0.0, 0.0, 5.0], &[0.0, 2.0, 1.0], &[0.0, 3.0, 0.0]]);
        assert_eq!(find_pivot(&r, 0, 3), Some((1, 1)));
    }

    #[test]
    fn pivot_ignores_rows_above_start() {
        let r = rows(&[&[1.0, 0.0], &[0.0, 0.0], &[0.0, 4.0]]);
        assert_eq!(find_pivot(&r, 1, 2), Some((2, 1)));
    }

    #[test]
    fn pivot_ignores_constant_column() {
        // Column 2 is the augmented constant term
        let r = rows(&[&[0.0, 0.0, 1.0]]);
        assert_eq!(find_pivot(&r, 0, 2), None);
        assert_eq!(find_pivot(&r[..0], 0, 2), None);
    }

    // ── reduce_column ───────────────────────────────────────────────

    #[test]
    fn reduce_clears_column_everywhere() {
        let mut r = rows(&[&[1.0, 2.0, 3.0], &[2.0, 1.0, 0.0], &[4.0, 0.0, 4.0]]);
        assert!(reduce_column(&mut r, 1, 0));
        assert_eq!(r[1].to_dense(), vec![1.0, 0.5, 0.0]);
        assert_eq!(r[0].to_dense(), vec![0.0, 1.5, 3.0]);
        assert_eq!(r[2].to_dense(), vec![0.0, -2.0, 4.0]);
    }

    #[test]
    fn reduce_sets_exact_unit_pivot() {
        let mut r = rows(&[&[3.0, 1.0]]);
        assert!(reduce_column(&mut r, 0, 0));
        assert_eq!(r[0].at(0).unwrap(), 1.0);
    }

    #[test]
    fn reduce_refuses_missing_pivot_entry() {
        let mut r = rows(&[&[0.0, 2.0], &[1.0, 1.0]]);
        assert!(!reduce_column(&mut r, 0, 0));
        assert_eq!(r[0].to_dense(), vec![0.0, 2.0]);
        assert_eq!(r[1].to_dense(), vec![1.0, 1.0]);
    }

    // ── free_columns ────────────────────────────────────────────────

    #[test]
    fn free_is_complement_of_pivots() {
        assert_eq!(free_columns(&[0, 2, 3], 6), vec![1, 4, 5]);
        assert_eq!(free_columns(&[], 3), vec![0, 1, 2]);
        assert_eq!(free_columns(&[0, 1], 2), Vec::<usize>::new());
    }

    #[test]
    fn affine_row_negates_free_coefficients() {
        // x0 + 2 x2 - x3 = 5 with x1 pivot elsewhere, ncols = 4
        let row = SparseVector::from_slice(&[1.0, 0.0, 2.0, -1.0, 5.0]);
        assert_eq!(affine_row(&row, &[2, 3], 4), vec![5.0, -2.0, 1.0]);
    }

    // ── solve ───────────────────────────────────────────────────────

    #[test]
    fn diagonal_unique() {
        let sol = solve(&[&[2.0, 0.0], &[0.0, 3.0]], &[4.0, 9.0]).unwrap();
        assert!(sol.is_unique());
        assert_eq!(sol.pivots(), &[0, 1]);
        assert_eq!(sol.coefficients(), &[vec![2.0], vec![3.0]]);
    }

    #[test]
    fn contradictory_rows() {
        assert!(solve(&[&[1.0, 0.0], &[1.0, 0.0]], &[1.0, 2.0]).is_none());
    }

    #[test]
    fn single_equation_two_unknowns() {
        let sol = solve(&[&[1.0, 1.0]], &[1.0]).unwrap();
        assert_eq!(sol.pivots(), &[0]);
        assert_eq!(sol.free_parameters(), &[1]);
        assert_eq!(sol.coefficients(), &[vec![1.0, -1.0]]);
    }

    #[test]
    fn redundant_row_is_dropped() {
        let sol = solve(&[&[1.0, 1.0], &[2.0, 2.0]], &[1.0, 2.0]).unwrap();
        assert_eq!(sol.rank(), 1);
        assert_eq!(sol.coefficients(), &[vec![1.0, -1.0]]);
    }

    #[test]
    fn swap_needed_for_zero_leading_entry() {
        let sol = solve(&[&[0.0, 2.0], &[1.0, 1.0]], &[4.0, 3.0]).unwrap();
        assert_eq!(sol.pivots(), &[0, 1]);
        assert_eq!(sol.particular(), vec![1.0, 2.0]);
    }

    #[test]
    fn leading_free_column() {
        // x0 never appears: it is free, x1 = 3
        let sol = solve(&[&[0.0, 1.0]], &[3.0]).unwrap();
        assert_eq!(sol.pivots(), &[1]);
        assert_eq!(sol.free_parameters(), &[0]);
        assert_eq!(sol.coefficients(), &[vec![3.0, 0.0]]);
    }

    #[test]
    fn zero_equations() {
        let a = SparseMatrix::<f64>::new();
        let sol = a.solve(&SparseVector::new()).unwrap().unwrap();
        assert_eq!(sol.rank(), 0);
        assert_eq!(sol.nvars(), 0);
        assert!(sol.coefficients().is_empty());
    }

    #[test]
    fn all_zero_row_keeps_every_column_free() {
        let a: SparseMatrix<f64> = rows(&[&[0.0, 0.0, 0.0]]).into();
        let sol = a.solve(&SparseVector::from_slice(&[0.0])).unwrap().unwrap();
        assert_eq!(sol.rank(), 0);
        assert_eq!(sol.nvars(), 3);
        assert_eq!(sol.free_parameters(), &[0, 1, 2]);
        assert!(sol.coefficients().is_empty());
    }

    #[test]
    fn zero_unknowns() {
        let a: SparseMatrix<f64> = rows(&[&[], &[]]).into();
        let ok = a.solve(&SparseVector::from_slice(&[0.0, 0.0])).unwrap();
        assert_eq!(ok.map(|s| s.nvars()), Some(0));
        let bad = a.solve(&SparseVector::from_slice(&[0.0, 1.0])).unwrap();
        assert!(bad.is_none());
    }

    #[test]
    fn constants_length_mismatch() {
        let a: SparseMatrix<f64> = rows(&[&[1.0]]).into();
        assert_eq!(
            a.solve(&SparseVector::from_slice(&[1.0, 2.0])),
            Err(SparseError::DimensionMismatch { expected: 1, got: 2 })
        );
    }

    #[test]
    fn inputs_are_not_modified() {
        let a = SparseMatrix::from_rows(&[[0.0_f64, 2.0], [1.0, 1.0]]);
        let b = SparseVector::from_slice(&[4.0, 3.0]);
        let (a0, b0) = (a.clone(), b.clone());
        a.solve(&b).unwrap();
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn evaluate_checks_parameter_count() {
        let sol = solve(&[&[1.0, 1.0, 1.0]], &[6.0]).unwrap();
        assert_eq!(sol.evaluate(&[1.0, 2.0]).unwrap(), vec![3.0, 1.0, 2.0]);
        assert_eq!(
            sol.evaluate(&[1.0]),
            Err(SparseError::DimensionMismatch { expected: 2, got: 1 })
        );
    }
}
