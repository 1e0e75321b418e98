//! Pre-defined type aliases for common `SparseVector` and `SparseMatrix` element types.

use super::{SparseMatrix, SparseVector};

#[cfg(feature = "complex")]
use num_complex::Complex;

// ── SparseVector scalar aliases ─────────────────────────────────────

/// Sparse vector with `f32` elements.
pub type SparseVectorf32 = SparseVector<f32>;
/// Sparse vector with `f64` elements.
pub type SparseVectorf64 = SparseVector<f64>;
/// Sparse vector with `Complex<f32>` elements.
#[cfg(feature = "complex")]
pub type SparseVectorz32 = SparseVector<Complex<f32>>;
/// Sparse vector with `Complex<f64>` elements.
#[cfg(feature = "complex")]
pub type SparseVectorz64 = SparseVector<Complex<f64>>;

// ── SparseMatrix scalar aliases ─────────────────────────────────────

/// Sparse matrix with `f32` elements.
pub type SparseMatrixf32 = SparseMatrix<f32>;
/// Sparse matrix with `f64` elements.
pub type SparseMatrixf64 = SparseMatrix<f64>;
/// Sparse matrix with `Complex<f32>` elements.
#[cfg(feature = "complex")]
pub type SparseMatrixz32 = SparseMatrix<Complex<f32>>;
/// Sparse matrix with `Complex<f64>` elements.
#[cfg(feature = "complex")]
pub type SparseMatrixz64 = SparseMatrix<Complex<f64>>;
