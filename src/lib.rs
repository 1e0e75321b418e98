//! # nzsolve
//!
//! Sparse linear system solver, no-std compatible. Stores coefficient
//! matrices and constant terms as sparse vectors and reports the complete
//! solution set: none, unique, or an affine family parametrized by free
//! variables.
//!
//! ## Quick start
//!
//! ```
//! use nzsolve::{SparseMatrix, SparseVector};
//!
//! // x0 + x1      = 3
//! //      x1 + x2 = 5
//! let a = SparseMatrix::from_rows(&[
//!     [1.0_f64, 1.0, 0.0],
//!     [0.0, 1.0, 1.0],
//! ]);
//! let b = SparseVector::from_slice(&[3.0, 5.0]);
//!
//! let sol = a.solve(&b).unwrap().expect("consistent");
//! // x0 = -2 + x2,  x1 = 5 - x2,  x2 free
//! assert_eq!(sol.pivots(), &[0, 1]);
//! assert_eq!(sol.free_parameters(), &[2]);
//! assert_eq!(sol.coefficients(), &[vec![-2.0, 1.0], vec![5.0, -1.0]]);
//! ```
//!
//! ## Modules
//!
//! - [`sparse`] — [`SparseVector<T>`] stores only non-zero entries as two
//!   parallel sequences (values, and positions plus a length sentinel) with
//!   binary-search lookup. [`SparseMatrix<T>`] is an ordered list of sparse
//!   rows. [`SparseMatrix::solve`] runs Gauss–Jordan elimination over sparse
//!   rows and returns a [`Solution`].
//!
//! - [`traits`] — Element trait hierarchy:
//!   - [`NearZero`] — zero-tolerance policy (exact for integers,
//!     epsilon-scaled for floats, componentwise for complex)
//!   - [`Scalar`] — all storable elements
//!   - [`FloatScalar`] — real floats
//!   - [`LinalgScalar`] — real floats and complex numbers, used by the solver
//!
//! - [`error`] — [`SparseError`] for out-of-range indices and mismatched
//!   dimensions. An inconsistent system is not an error: `solve` returns
//!   `Ok(None)`.
//!
//! ## Complex systems
//!
//! With the `complex` feature (on by default) the solver accepts
//! `Complex<f32>` / `Complex<f64>` through the same generic code path.
//!
//! ## Logging
//!
//! Elimination progress is reported through the [`log`] facade at `debug`
//! and `trace` level. Install any `log` backend to see it.
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | Hardware FPU via system libm; pure-Rust `libm` otherwise |
//! | `complex` | yes      | `Complex<f32>` / `Complex<f64>` support via `num-complex` |
//! | `all`     | no       | All features: `std` + `complex` |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub mod sparse;
pub mod traits;

pub use error::{Result, SparseError};
pub use sparse::{Solution, SparseMatrix, SparseVector};
pub use sparse::aliases::{SparseMatrixf32, SparseMatrixf64, SparseVectorf32, SparseVectorf64};
#[cfg(feature = "complex")]
pub use sparse::aliases::{SparseMatrixz32, SparseMatrixz64, SparseVectorz32, SparseVectorz64};
pub use traits::{FloatScalar, LinalgScalar, NearZero, Scalar, ZERO_TOLERANCE_SCALE};

#[cfg(feature = "complex")]
pub use num_complex::Complex;
