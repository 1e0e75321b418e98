use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

#[cfg(feature = "complex")]
use num_complex::Complex;

/// Multiple of machine epsilon below which a floating-point value is
/// treated as zero by [`NearZero`].
///
/// The threshold is absolute: `|x| <= ZERO_TOLERANCE_SCALE * ε`, with `ε`
/// taken from [`LinalgScalar::lepsilon`]. It does not follow the magnitude
/// of the data, so elimination residue on rows with non-dyadic entries
/// (`0.1`, `3.7`, …) can survive as a stored value and be taken as a pivot.
/// A dependent row of such a system may then raise the reported rank.
pub const ZERO_TOLERANCE_SCALE: f64 = 16.0;

/// Numeric closeness to zero.
///
/// Decides whether a value is stored in a [`SparseVector`](crate::SparseVector)
/// or dropped as an implicit zero, and whether a column holds a usable pivot.
///
/// - integers: exact comparison with zero
/// - `f32` / `f64`: `|x| <= ZERO_TOLERANCE_SCALE * ε`
/// - `Complex<F>`: both components near zero, tested independently
///
/// ```
/// use nzsolve::NearZero;
///
/// assert!(0_i32.is_near_zero());
/// assert!(!1_i32.is_near_zero());
/// assert!(1e-17_f64.is_near_zero());
/// assert!(!1e-10_f64.is_near_zero());
/// ```
pub trait NearZero {
    /// Whether `self` is zero under the zero-tolerance policy.
    fn is_near_zero(&self) -> bool;
}

macro_rules! impl_near_zero_exact {
    ($($t:ty),*) => {
        $(
            impl NearZero for $t {
                #[inline]
                fn is_near_zero(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

impl_near_zero_exact!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_near_zero_float {
    ($($t:ty),*) => {
        $(
            impl NearZero for $t {
                #[inline]
                fn is_near_zero(&self) -> bool {
                    Float::abs(*self) <= <$t as LinalgScalar>::lepsilon() * ZERO_TOLERANCE_SCALE as $t
                }
            }
        )*
    };
}

impl_near_zero_float!(f32, f64);

#[cfg(feature = "complex")]
impl<T: NearZero> NearZero for Complex<T> {
    #[inline]
    fn is_near_zero(&self) -> bool {
        self.re.is_near_zero() && self.im.is_near_zero()
    }
}

/// Trait for types that can be stored in sparse vectors and matrices.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, all integer types, and (with the `complex`
/// feature) `Complex<f32>` / `Complex<f64>`.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num + NearZero {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num + NearZero> Scalar for T {}

/// Trait for real floating-point elements.
///
/// Implies `LinalgScalar<Real = Self>` since real floats are their own real type.
pub trait FloatScalar: Scalar + Float + LinalgScalar<Real = Self> {}

impl<T: Scalar + Float + LinalgScalar<Real = T>> FloatScalar for T {}

/// Trait for elements of a field the solver can eliminate over.
///
/// Covers both real floats (`f32`, `f64`) and complex numbers (`Complex<f32>`,
/// `Complex<f64>`). Integer types are storable but not solvable, since
/// elimination divides by the pivot.
pub trait LinalgScalar: Scalar {
    /// The real component type (`Self` for reals, `T` for `Complex<T>`).
    type Real: FloatScalar;

    /// Absolute value / modulus: `|z|` for complex, `.abs()` for real.
    fn modulus(self) -> Self::Real;

    /// Machine epsilon of the underlying real type; the unit of the
    /// zero tolerance.
    fn lepsilon() -> Self::Real;

    /// Promote a real value into `Self`.
    fn from_real(r: Self::Real) -> Self;
}

macro_rules! impl_linalg_scalar_real {
    ($($t:ty),*) => {
        $(
            impl LinalgScalar for $t {
                type Real = $t;

                #[inline] fn modulus(self) -> $t { Float::abs(self) }
                #[inline] fn lepsilon() -> $t { <$t as Float>::epsilon() }
                #[inline] fn from_real(r: $t) -> $t { r }
            }
        )*
    };
}

impl_linalg_scalar_real!(f32, f64);

#[cfg(feature = "complex")]
impl<T: FloatScalar> LinalgScalar for Complex<T> {
    type Real = T;

    #[inline]
    fn modulus(self) -> T {
        self.norm()
    }

    #[inline]
    fn lepsilon() -> T {
        T::epsilon()
    }

    #[inline]
    fn from_real(r: T) -> Self {
        Complex::new(r, T::zero())
    }
}
