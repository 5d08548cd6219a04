//! Scalar bounds and small value types shared by the evaluators.
//!
//! - `Scalar`: ring operations only (floats, exact rationals, polynomials).
//! - `FieldScalar`: adds division (floats, exact rationals).
//! - `Complex`: plane rotations as complex numbers over any `Scalar`.
//! - `Offset`, `Apex`: plain coordinate pairs.

use std::fmt::Debug;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

use nalgebra::Vector2;
use num_traits::{One, Zero};

/// Coefficient ring for offsets. Blanket-implemented.
pub trait Scalar:
    Clone
    + PartialEq
    + Debug
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
}

impl<T> Scalar for T where
    T: Clone
        + PartialEq
        + Debug
        + Zero
        + One
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Neg<Output = T>
{
}

/// Scalars that can also divide (needed to normalise rotations up front).
pub trait FieldScalar: Scalar + Div<Output = Self> {}

impl<T> FieldScalar for T where T: Scalar + Div<Output = T> {}

/// Complex number over a `Scalar`.
///
/// `num_complex::Complex` needs `num_traits::Num` for its arithmetic, which
/// polynomial coefficients cannot provide, so rotations use this instead.
#[derive(Clone, Debug, PartialEq)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T: Scalar> Complex<T> {
    #[inline]
    pub fn new(re: T, im: T) -> Self {
        Self { re, im }
    }

    #[inline]
    pub fn one() -> Self {
        Self::new(T::one(), T::zero())
    }

    #[inline]
    pub fn conj(&self) -> Self {
        Self::new(self.re.clone(), -self.im.clone())
    }

    #[inline]
    pub fn scale(&self, s: &T) -> Self {
        Self::new(self.re.clone() * s.clone(), self.im.clone() * s.clone())
    }

    #[inline]
    pub fn norm_sqr(&self) -> T {
        self.re.clone() * self.re.clone() + self.im.clone() * self.im.clone()
    }

    #[inline]
    pub fn square(&self) -> Self {
        self * self
    }
}

impl<'a, T: Scalar> Mul<&'a Complex<T>> for &'a Complex<T> {
    type Output = Complex<T>;

    #[inline]
    fn mul(self, z: &'a Complex<T>) -> Complex<T> {
        Complex::new(
            self.re.clone() * z.re.clone() - self.im.clone() * z.im.clone(),
            self.re.clone() * z.im.clone() + self.im.clone() * z.re.clone(),
        )
    }
}

impl<T: Scalar> Mul for Complex<T> {
    type Output = Complex<T>;

    #[inline]
    fn mul(self, z: Complex<T>) -> Complex<T> {
        &self * &z
    }
}

impl<T: Scalar> Neg for Complex<T> {
    type Output = Complex<T>;

    #[inline]
    fn neg(self) -> Complex<T> {
        Complex::new(-self.re, -self.im)
    }
}

/// Displacement in the unfolded plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Offset<T> {
    pub dx: T,
    pub dy: T,
}

impl<T: Scalar> Offset<T> {
    #[inline]
    pub fn new(dx: T, dy: T) -> Self {
        Self { dx, dy }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero())
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> T {
        self.dx.clone() * other.dx.clone() + self.dy.clone() * other.dy.clone()
    }

    /// Counterclockwise quarter turn: `(dx, dy) ↦ (-dy, dx)`.
    #[inline]
    pub fn quarter_turn(&self) -> Self {
        Self::new(-self.dy.clone(), self.dx.clone())
    }

    /// Componentwise product with a scalar.
    #[inline]
    pub fn scale(&self, s: &T) -> Self {
        Self::new(self.dx.clone() * s.clone(), self.dy.clone() * s.clone())
    }
}

impl<T: Scalar> From<Complex<T>> for Offset<T> {
    #[inline]
    fn from(z: Complex<T>) -> Self {
        Self::new(z.re, z.im)
    }
}

impl<T: Scalar> Add for Offset<T> {
    type Output = Offset<T>;

    #[inline]
    fn add(self, rhs: Offset<T>) -> Self::Output {
        Offset::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl<T: Scalar> Sub for Offset<T> {
    type Output = Offset<T>;

    #[inline]
    fn sub(self, rhs: Offset<T>) -> Self::Output {
        Offset::new(self.dx - rhs.dx, self.dy - rhs.dy)
    }
}

impl<T: Scalar> Neg for Offset<T> {
    type Output = Offset<T>;

    #[inline]
    fn neg(self) -> Self::Output {
        Offset::new(-self.dx, -self.dy)
    }
}

impl<T: Scalar> Sum for Offset<T> {
    fn sum<I: Iterator<Item = Offset<T>>>(iter: I) -> Self {
        iter.fold(Offset::zero(), |acc, o| acc + o)
    }
}

impl From<Offset<f64>> for Vector2<f64> {
    #[inline]
    fn from(o: Offset<f64>) -> Self {
        Vector2::new(o.dx, o.dy)
    }
}

/// Free vertex of the triangle `(0,0), (1,0), apex`.
///
/// Coordinates may be floats, exact rationals, or the symbols `x`, `y`.
/// A degenerate apex (on the base line's endpoints) is a caller error.
#[derive(Clone, Debug, PartialEq)]
pub struct Apex<T> {
    pub x: T,
    pub y: T,
}

impl<T> Apex<T> {
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl From<Vector2<f64>> for Apex<f64> {
    #[inline]
    fn from(v: Vector2<f64>) -> Self {
        Apex::new(v.x, v.y)
    }
}
