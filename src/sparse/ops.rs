use alloc::vec::Vec;
use core::cmp::Ordering;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::traits::Scalar;

use super::SparseVector;

// ── Sparse merge ────────────────────────────────────────────────────

impl<T: Scalar> SparseVector<T> {
    /// Combine two vectors entry-wise over the union of their stored positions.
    ///
    /// `f(a, b)` receives zero for a side without an entry. Only stored
    /// positions are visited, so the cost is `O(nnz(self) + nnz(rhs))`.
    /// The result has the larger of the two logical lengths.
    fn merge(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Self {
        let zero = T::zero();
        let mut values = Vec::with_capacity(self.nnz() + rhs.nnz());
        let mut positions = Vec::with_capacity(self.nnz() + rhs.nnz() + 1);
        let mut emit = |pos: usize, x: T| {
            if !x.is_near_zero() {
                values.push(x);
                positions.push(pos);
            }
        };

        let (mut i, mut j) = (0, 0);
        while i < self.nnz() && j < rhs.nnz() {
            let (pa, pb) = (self.positions[i], rhs.positions[j]);
            match pa.cmp(&pb) {
                Ordering::Less => {
                    emit(pa, f(self.values[i], zero));
                    i += 1;
                }
                Ordering::Greater => {
                    emit(pb, f(zero, rhs.values[j]));
                    j += 1;
                }
                Ordering::Equal => {
                    emit(pa, f(self.values[i], rhs.values[j]));
                    i += 1;
                    j += 1;
                }
            }
        }
        for k in i..self.nnz() {
            emit(self.positions[k], f(self.values[k], zero));
        }
        for k in j..rhs.nnz() {
            emit(rhs.positions[k], f(zero, rhs.values[k]));
        }

        positions.push(self.len().max(rhs.len()));
        SparseVector { values, positions }
    }

    /// In-place `self -= factor * rhs`, touching only stored entries.
    ///
    /// This is the row operation of Gaussian elimination. Entries that
    /// cancel to near zero are dropped.
    ///
    /// ```
    /// use nzsolve::SparseVector;
    /// let mut a = SparseVector::from_slice(&[2.0_f64, 0.0, 4.0]);
    /// let b = SparseVector::from_slice(&[1.0_f64, 1.0, 0.0]);
    /// a.sub_scaled(2.0, &b);
    /// assert_eq!(a.to_dense(), vec![0.0, -2.0, 4.0]);
    /// assert_eq!(a.nnz(), 2);
    /// ```
    pub fn sub_scaled(&mut self, factor: T, rhs: &Self) {
        if factor.is_near_zero() {
            return;
        }
        *self = self.merge(rhs, |a, b| a - factor * b);
    }

    /// Multiply every stored entry by `factor` in place.
    ///
    /// Products that fall to near zero are dropped; the logical length is
    /// unchanged.
    pub fn scale(&mut self, factor: T) {
        let len = self.len();
        let mut kept = 0;
        for k in 0..self.nnz() {
            let x = self.values[k] * factor;
            if !x.is_near_zero() {
                self.values[kept] = x;
                self.positions[kept] = self.positions[k];
                kept += 1;
            }
        }
        self.values.truncate(kept);
        self.positions.truncate(kept);
        self.positions.push(len);
    }

    /// Sparse dot product `Σ self[i] * rhs[i]`.
    ///
    /// Logical lengths may differ; the shorter vector reads as zero-padded.
    ///
    /// ```
    /// use nzsolve::SparseVector;
    /// let a = SparseVector::from_slice(&[1.0_f64, 0.0, 3.0]);
    /// let b = SparseVector::from_slice(&[4.0_f64, 5.0, 6.0]);
    /// assert_eq!(a.dot(&b), 22.0);
    /// ```
    pub fn dot(&self, rhs: &Self) -> T {
        let mut sum = T::zero();
        let (mut i, mut j) = (0, 0);
        while i < self.nnz() && j < rhs.nnz() {
            match self.positions[i].cmp(&rhs.positions[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    sum = sum + self.values[i] * rhs.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

// ── Addition ────────────────────────────────────────────────────────

impl<T: Scalar> Add<&SparseVector<T>> for &SparseVector<T> {
    type Output = SparseVector<T>;
    fn add(self, rhs: &SparseVector<T>) -> SparseVector<T> {
        self.merge(rhs, |a, b| a + b)
    }
}

impl<T: Scalar> Add for SparseVector<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        &self + &rhs
    }
}

impl<T: Scalar> AddAssign<&SparseVector<T>> for SparseVector<T> {
    fn add_assign(&mut self, rhs: &SparseVector<T>) {
        *self = &*self + rhs;
    }
}

// ── Subtraction ─────────────────────────────────────────────────────

impl<T: Scalar> Sub<&SparseVector<T>> for &SparseVector<T> {
    type Output = SparseVector<T>;
    fn sub(self, rhs: &SparseVector<T>) -> SparseVector<T> {
        self.merge(rhs, |a, b| a - b)
    }
}

impl<T: Scalar> Sub for SparseVector<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        &self - &rhs
    }
}

impl<T: Scalar> SubAssign<&SparseVector<T>> for SparseVector<T> {
    fn sub_assign(&mut self, rhs: &SparseVector<T>) {
        *self = &*self - rhs;
    }
}

// ── Scalar multiplication ───────────────────────────────────────────

impl<T: Scalar> Mul<T> for SparseVector<T> {
    type Output = Self;
    fn mul(mut self, rhs: T) -> Self {
        self.scale(rhs);
        self
    }
}

impl<T: Scalar> MulAssign<T> for SparseVector<T> {
    fn mul_assign(&mut self, rhs: T) {
        self.scale(rhs);
    }
}

impl<T: Scalar> Neg for SparseVector<T> {
    type Output = Self;
    fn neg(mut self) -> Self {
        for x in self.values.iter_mut() {
            *x = T::zero() - *x;
        }
        self
    }
}
