pub mod aliases;
mod matrix;
mod ops;
mod solve;
mod vector;

pub use aliases::*;
pub use matrix::SparseMatrix;
pub use solve::Solution;
pub use vector::SparseVector;
