use alloc::vec;
use alloc::vec::Vec;

use crate::error::{Result, SparseError};
use crate::traits::Scalar;

/// Growable vector that stores only its non-zero entries.
///
/// Two parallel sequences back the storage: `values` holds the non-zero
/// entries in increasing logical position, and `positions` holds their
/// logical positions followed by a trailing sentinel equal to the logical
/// length. So `positions.len() == values.len() + 1` always, and lookups are
/// a binary search over the stored positions.
///
/// Whether a value is "zero" is decided by [`NearZero`](crate::NearZero):
/// writing a near-zero value removes the entry instead of storing it.
///
/// # Examples
///
/// ```
/// use nzsolve::SparseVector;
///
/// let mut v = SparseVector::from_slice(&[0.0_f64, 7.3, 0.0, 4.5, 0.0, 0.0]);
/// assert_eq!(v.len(), 6);
/// assert_eq!(v.nnz(), 2);
/// assert_eq!(v.at(3).unwrap(), 4.5);
/// assert_eq!(v.at(5).unwrap(), 0.0);
///
/// v.set(0, 1.0).unwrap();
/// v.set(3, 0.0).unwrap();
/// assert_eq!(v.positions(), &[0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector<T> {
    pub(crate) values: Vec<T>,
    pub(crate) positions: Vec<usize>,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T> SparseVector<T> {
    /// Create an empty vector of logical length zero.
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            positions: vec![0],
        }
    }

    /// Create an empty vector with room for `capacity` stored entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut positions = Vec::with_capacity(capacity + 1);
        positions.push(0);
        Self {
            values: Vec::with_capacity(capacity),
            positions,
        }
    }

    /// Create an all-zero vector of logical length `len`.
    ///
    /// No entries are stored.
    ///
    /// ```
    /// use nzsolve::SparseVector;
    /// let v = SparseVector::<f64>::zeros(4);
    /// assert_eq!(v.len(), 4);
    /// assert_eq!(v.nnz(), 0);
    /// ```
    pub fn zeros(len: usize) -> Self {
        Self {
            values: Vec::new(),
            positions: vec![len],
        }
    }
}

impl<T> Default for SparseVector<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Size & housekeeping ─────────────────────────────────────────────

impl<T> SparseVector<T> {
    /// Logical length, counting implicit zeros.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions[self.values.len()]
    }

    /// Whether the logical length is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of stored (non-zero) entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Reserve room for `additional` more stored entries.
    pub fn reserve(&mut self, additional: usize) {
        self.values.reserve(additional);
        self.positions.reserve(additional);
    }

    /// Remove every entry and reset the logical length to zero.
    ///
    /// Allocated capacity is kept.
    pub fn clear(&mut self) {
        self.values.clear();
        self.positions.clear();
        self.positions.push(0);
    }

    /// Change the logical length.
    ///
    /// Growing appends implicit zeros; shrinking drops every stored entry
    /// at a position `>= len`.
    ///
    /// ```
    /// use nzsolve::SparseVector;
    /// let mut v = SparseVector::from_slice(&[1.0_f64, 0.0, 3.0]);
    /// v.resize(2);
    /// assert_eq!(v.nnz(), 1);
    /// v.resize(5);
    /// assert_eq!(v.len(), 5);
    /// assert_eq!(v.at(2).unwrap(), 0.0);
    /// ```
    pub fn resize(&mut self, len: usize) {
        let nnz = self.nnz();
        if len < self.len() {
            let keep = self.positions[..nnz].partition_point(|&p| p < len);
            self.values.truncate(keep);
            self.positions.truncate(keep);
            self.positions.push(len);
        } else {
            self.positions[nnz] = len;
        }
    }

    /// Stored values in increasing position order.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Logical positions of the stored values (sentinel excluded).
    #[inline]
    pub fn positions(&self) -> &[usize] {
        &self.positions[..self.values.len()]
    }

    /// Iterate over `(position, &value)` for every stored entry.
    ///
    /// ```
    /// use nzsolve::SparseVector;
    /// let v = SparseVector::from_slice(&[0, 5, 0, 7]);
    /// let entries: Vec<_> = v.iter().map(|(p, &x)| (p, x)).collect();
    /// assert_eq!(entries, vec![(1, 5), (3, 7)]);
    /// ```
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, &T)> + ExactSizeIterator {
        self.positions().iter().copied().zip(self.values.iter())
    }

    /// Logical position of the first stored entry, if any.
    #[inline]
    pub fn first_position(&self) -> Option<usize> {
        self.positions().first().copied()
    }

    /// Offset into [`values`](Self::values) of the entry at logical position `pos`.
    ///
    /// Returns `None` for an implicit zero, including any `pos` at or past
    /// the logical length.
    ///
    /// ```
    /// use nzsolve::SparseVector;
    /// let v = SparseVector::from_slice(&[0.0_f64, 7.3, 0.0, 4.5, 0.0, 0.0]);
    /// assert_eq!(v.plain_to_nonzero(3), Some(1));
    /// assert_eq!(v.plain_to_nonzero(5), None);
    /// assert_eq!(v.plain_to_nonzero(6), None);
    /// ```
    #[inline]
    pub fn plain_to_nonzero(&self, pos: usize) -> Option<usize> {
        self.search(pos).ok()
    }

    /// Logical position of the stored entry at offset `idx`.
    ///
    /// Inverse of [`plain_to_nonzero`](Self::plain_to_nonzero).
    #[inline]
    pub fn nonzero_to_plain(&self, idx: usize) -> Option<usize> {
        self.positions().get(idx).copied()
    }

    /// Remove the stored entry at `pos`, returning it.
    ///
    /// Returns `None` (and leaves the vector untouched) for an implicit zero.
    /// The logical length is unchanged.
    pub fn remove(&mut self, pos: usize) -> Option<T> {
        let idx = self.search(pos).ok()?;
        self.positions.remove(idx);
        Some(self.values.remove(idx))
    }

    /// Binary search over the stored positions.
    ///
    /// `Ok(idx)` if `pos` is stored at offset `idx`, `Err(idx)` with the
    /// insertion offset otherwise.
    #[inline]
    fn search(&self, pos: usize) -> core::result::Result<usize, usize> {
        self.positions().binary_search(&pos)
    }

    #[inline]
    fn check_bounds(&self, pos: usize) -> Result<()> {
        let len = self.len();
        if pos >= len {
            return Err(SparseError::IndexOutOfBounds { index: pos, len });
        }
        Ok(())
    }
}

// ── Access & mutation ───────────────────────────────────────────────

impl<T: Scalar> SparseVector<T> {
    /// Create a vector from a dense slice, storing only non-zero entries.
    pub fn from_slice(data: &[T]) -> Self {
        let mut v = Self::with_capacity(data.len());
        for &x in data {
            v.push(x);
        }
        v
    }

    /// Value at logical position `pos`, or `None` past the end.
    ///
    /// Positions without a stored entry read as zero.
    #[inline]
    pub fn get(&self, pos: usize) -> Option<T> {
        if pos >= self.len() {
            return None;
        }
        Some(match self.search(pos) {
            Ok(idx) => self.values[idx],
            Err(_) => T::zero(),
        })
    }

    /// Value at logical position `pos`.
    ///
    /// Fails with [`SparseError::IndexOutOfBounds`] if `pos >= len()`.
    pub fn at(&self, pos: usize) -> Result<T> {
        self.get(pos).ok_or(SparseError::IndexOutOfBounds {
            index: pos,
            len: self.len(),
        })
    }

    /// Write `value` at logical position `pos`.
    ///
    /// A near-zero `value` removes any stored entry; anything else inserts
    /// or overwrites one, keeping positions sorted.
    ///
    /// ```
    /// use nzsolve::SparseVector;
    /// let mut v = SparseVector::<f64>::zeros(3);
    /// v.set(2, 1.5).unwrap();
    /// v.set(0, 2.5).unwrap();
    /// assert_eq!(v.positions(), &[0, 2]);
    /// v.set(2, 0.0).unwrap();
    /// assert_eq!(v.nnz(), 1);
    /// assert!(v.set(3, 1.0).is_err());
    /// ```
    pub fn set(&mut self, pos: usize, value: T) -> Result<()> {
        self.check_bounds(pos)?;
        let slot = self.search(pos);
        self.store(slot, pos, value);
        Ok(())
    }

    /// Apply `f` to the current value at `pos` and store the result.
    ///
    /// The current value may be an implicit zero. The result is stored
    /// under the same zero policy as [`set`](Self::set).
    ///
    /// ```
    /// use nzsolve::SparseVector;
    /// let mut v = SparseVector::from_slice(&[1.0_f64, 0.0]);
    /// let correction = 3.0;
    /// v.set_with(1, |x| *x += correction).unwrap();
    /// v.set_with(0, |x| *x -= 1.0).unwrap();
    /// assert_eq!(v.to_dense(), vec![0.0, 3.0]);
    /// assert_eq!(v.nnz(), 1);
    /// ```
    pub fn set_with(&mut self, pos: usize, f: impl FnOnce(&mut T)) -> Result<()> {
        self.check_bounds(pos)?;
        let slot = self.search(pos);
        let mut value = match slot {
            Ok(idx) => self.values[idx],
            Err(_) => T::zero(),
        };
        f(&mut value);
        self.store(slot, pos, value);
        Ok(())
    }

    /// Append `value` at position `len()`.
    ///
    /// A near-zero value only extends the logical length.
    pub fn push(&mut self, value: T) {
        let nnz = self.nnz();
        if value.is_near_zero() {
            self.positions[nnz] += 1;
        } else {
            // The old sentinel becomes the new entry's position
            let len = self.positions[nnz];
            self.values.push(value);
            self.positions.push(len + 1);
        }
    }

    /// Materialize as a dense `Vec`.
    pub fn to_dense(&self) -> Vec<T> {
        let mut out = vec![T::zero(); self.len()];
        for (p, &x) in self.iter() {
            out[p] = x;
        }
        out
    }

    fn store(&mut self, slot: core::result::Result<usize, usize>, pos: usize, value: T) {
        match (slot, value.is_near_zero()) {
            (Ok(idx), true) => {
                self.values.remove(idx);
                self.positions.remove(idx);
            }
            (Ok(idx), false) => self.values[idx] = value,
            (Err(idx), false) => {
                self.values.insert(idx, value);
                self.positions.insert(idx, pos);
            }
            (Err(_), true) => {}
        }
    }
}

// ── Conversions ─────────────────────────────────────────────────────

impl<T: Scalar> From<&[T]> for SparseVector<T> {
    fn from(data: &[T]) -> Self {
        Self::from_slice(data)
    }
}

impl<T: Scalar> From<Vec<T>> for SparseVector<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_slice(&data)
    }
}

impl<T: Scalar, const N: usize> From<[T; N]> for SparseVector<T> {
    fn from(data: [T; N]) -> Self {
        Self::from_slice(&data)
    }
}

impl<T: Scalar> FromIterator<T> for SparseVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = Self::new();
        v.extend(iter);
        v
    }
}

impl<T: Scalar> Extend<T> for SparseVector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for x in iter {
            self.push(x);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SparseVector<f64> {
        SparseVector::from_slice(&[0.0, 7.3, 0.0, 4.5, 0.0, 0.0])
    }

    #[test]
    fn layout_has_sentinel() {
        let v = sample();
        assert_eq!(v.values, vec![7.3, 4.5]);
        assert_eq!(v.positions, vec![1, 3, 6]);
        assert_eq!(v.positions.len(), v.values.len() + 1);
    }

    #[test]
    fn new_is_empty() {
        let v = SparseVector::<f64>::new();
        assert_eq!(v.len(), 0);
        assert_eq!(v.nnz(), 0);
        assert!(v.is_empty());
        assert_eq!(v, SparseVector::default());
    }

    #[test]
    fn at_reads_implicit_zeros() {
        let v = sample();
        assert_eq!(v.at(0).unwrap(), 0.0);
        assert_eq!(v.at(1).unwrap(), 7.3);
        assert_eq!(v.at(5).unwrap(), 0.0);
        assert_eq!(
            v.at(6),
            Err(SparseError::IndexOutOfBounds { index: 6, len: 6 })
        );
    }

    #[test]
    fn set_insert_overwrite_remove() {
        let mut v = sample();
        v.set(4, 2.0).unwrap();
        assert_eq!(v.positions(), &[1, 3, 4]);
        v.set(0, -1.0).unwrap();
        assert_eq!(v.positions(), &[0, 1, 3, 4]);
        v.set(3, 9.0).unwrap();
        assert_eq!(v.values(), &[-1.0, 7.3, 9.0, 2.0]);
        v.set(1, 0.0).unwrap();
        assert_eq!(v.positions(), &[0, 3, 4]);
        // Zeroing an implicit zero is a no-op
        v.set(2, 0.0).unwrap();
        assert_eq!(v.nnz(), 3);
        assert_eq!(v.len(), 6);
    }

    #[test]
    fn set_out_of_bounds() {
        let mut v = sample();
        assert_eq!(
            v.set(6, 1.0),
            Err(SparseError::IndexOutOfBounds { index: 6, len: 6 })
        );
        assert_eq!(v, sample());
    }

    #[test]
    fn set_near_zero_is_dropped() {
        let mut v = SparseVector::<f64>::zeros(2);
        v.set(0, 1e-18).unwrap();
        assert_eq!(v.nnz(), 0);
    }

    #[test]
    fn set_with_mutates_current_value() {
        let mut v = sample();
        v.set_with(1, |x| *x *= 2.0).unwrap();
        assert_eq!(v.at(1).unwrap(), 14.6);
        v.set_with(2, |x| *x += 1.0).unwrap();
        assert_eq!(v.positions(), &[1, 2, 3]);
        v.set_with(3, |x| *x -= 4.5).unwrap();
        assert_eq!(v.positions(), &[1, 2]);
        assert!(v.set_with(6, |x| *x += 1.0).is_err());
    }

    #[test]
    fn push_counts_zeros_in_length() {
        let mut v = SparseVector::new();
        for x in [0.0, 1.0, 0.0, 0.0, 2.0, 0.0] {
            v.push(x);
        }
        assert_eq!(v.len(), 6);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.positions(), &[1, 4]);
        assert_eq!(v.to_dense(), vec![0.0, 1.0, 0.0, 0.0, 2.0, 0.0]);
    }

    #[test]
    fn index_mapping_is_inverse() {
        let v = sample();
        for idx in 0..v.nnz() {
            let pos = v.nonzero_to_plain(idx).unwrap();
            assert_eq!(v.plain_to_nonzero(pos), Some(idx));
        }
        assert_eq!(v.nonzero_to_plain(2), None);
        assert_eq!(v.plain_to_nonzero(0), None);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut v = SparseVector::with_capacity(16);
        v.extend([1.0_f64, 2.0, 3.0]);
        let cap = v.values.capacity();
        v.clear();
        assert_eq!(v.len(), 0);
        assert_eq!(v.nnz(), 0);
        assert_eq!(v.values.capacity(), cap);
        assert!(v.positions.capacity() >= 17);
    }

    #[test]
    fn resize_truncates_and_grows() {
        let mut v = sample();
        v.resize(3);
        assert_eq!(v.positions, vec![1, 3]);
        v.resize(10);
        assert_eq!(v.len(), 10);
        assert_eq!(v.nnz(), 1);
        v.resize(1);
        assert_eq!(v.nnz(), 0);
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn remove_entry() {
        let mut v = sample();
        assert_eq!(v.remove(3), Some(4.5));
        assert_eq!(v.remove(3), None);
        assert_eq!(v.len(), 6);
        assert_eq!(v.positions(), &[1]);
    }

    #[test]
    fn take_leaves_empty_vector() {
        let mut v = sample();
        let w = core::mem::take(&mut v);
        assert_eq!(w, sample());
        assert_eq!(v.len(), 0);
        assert_eq!(v.positions, vec![0]);
    }

    #[test]
    fn clone_is_deep() {
        let v = sample();
        let mut w = v.clone();
        w.set(1, 1.0).unwrap();
        assert_eq!(v.at(1).unwrap(), 7.3);
        assert_ne!(v, w);
    }

    #[test]
    fn integer_elements() {
        let v: SparseVector<i32> = [0, 0, 3, 0].into_iter().collect();
        assert_eq!(v.len(), 4);
        assert_eq!(v.first_position(), Some(2));
        assert_eq!(v.get(4), None);
    }

    #[test]
    fn conversions_agree() {
        let a = SparseVector::from(vec![1.0_f64, 0.0, 2.0]);
        let b = SparseVector::from([1.0_f64, 0.0, 2.0]);
        let c = SparseVector::from(&[1.0_f64, 0.0, 2.0][..]);
        assert_eq!(a, b);
        assert_eq!(b, c);
    }
}
