//! Apex-dependent constants shared by both rotation caches.

use super::types::{Apex, Complex, Offset, Scalar};
use crate::angle::EdgeVector;

/// Edge vectors, doubled-angle rotation generators, and their norms for one
/// apex. The generators are `(ax, ay)²` and `(1 - ax, ay)²`, i.e. rotation
/// by `2a` and `2b` scaled by the squared side lengths `norms`.
#[derive(Clone, Debug)]
pub struct TriangleFrame<T> {
    pub apex: Apex<T>,
    pub edges: [Complex<T>; 3],
    pub generators: [Complex<T>; 2],
    pub norms: [T; 2],
}

impl<T: Scalar> TriangleFrame<T> {
    pub fn new(apex: &Apex<T>) -> Self {
        let (ax, ay) = (apex.x.clone(), apex.y.clone());
        let z0 = Complex::new(ax.clone(), ay.clone());
        let z1 = Complex::new(T::one() - ax.clone(), ay.clone());
        let edges = [
            Complex::one(),
            Complex::new(ax.clone() - T::one(), ay.clone()),
            Complex::new(-ax, -ay),
        ];
        Self {
            apex: apex.clone(),
            edges,
            generators: [z0.square(), z1.square()],
            norms: [z0.norm_sqr(), z1.norm_sqr()],
        }
    }

    /// Offset of `ev` once the rotation for its base angle is known.
    ///
    /// Reflected copies see their edge mirrored before rotating; the result
    /// points backwards when exactly one of `reflected`/`clockwise` holds.
    pub fn offset_with_rotation(&self, ev: &EdgeVector, rotation: &Complex<T>) -> Offset<T> {
        let mut vec = self.edges[ev.edge.index()].clone();
        if ev.base_angle.reflected {
            vec = vec.conj();
        }
        let mut vec = &vec * rotation;
        if ev.base_angle.reflected != ev.clockwise {
            vec = -vec;
        }
        vec.into()
    }
}

/// Power `power` of a generator, conjugated when the coefficient is negative.
#[inline]
pub(crate) fn signed_power<T: Scalar>(power: &Complex<T>, coefficient: i32) -> Complex<T> {
    if coefficient < 0 {
        power.conj()
    } else {
        power.clone()
    }
}
