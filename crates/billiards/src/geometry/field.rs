//! Incremental rotation cache for scalars with division.

use tracing::trace;

use super::frame::{signed_power, TriangleFrame};
use super::types::{Apex, Complex, FieldScalar, Offset};
use crate::angle::{BaseAngle, EdgeVector};

/// Offsets for one apex, with unit rotations cached as they are needed.
///
/// The generators are normalised once at construction, so every cached
/// power is an exact unit rotation and offsets have the true edge lengths.
/// The caches grow on lookup, hence `&mut self`: share behind a lock if
/// several callers need the same instance.
#[derive(Clone, Debug)]
pub struct PathGeometryField<T> {
    frame: TriangleFrame<T>,
    unit_generators: [Complex<T>; 2],
    cached_powers: [Vec<Complex<T>>; 2],
}

impl<T: FieldScalar> PathGeometryField<T> {
    pub fn new(apex: &Apex<T>) -> Self {
        let frame = TriangleFrame::new(apex);
        let unit_generators = [0, 1].map(|k| {
            let inverse_norm = T::one() / frame.norms[k].clone();
            frame.generators[k].scale(&inverse_norm)
        });
        Self {
            frame,
            unit_generators,
            cached_powers: [vec![Complex::one()], vec![Complex::one()]],
        }
    }

    #[inline]
    pub fn apex(&self) -> &Apex<T> {
        &self.frame.apex
    }

    /// Number of powers currently cached per generator.
    pub fn cached_len(&self) -> [usize; 2] {
        [self.cached_powers[0].len(), self.cached_powers[1].len()]
    }

    fn power(&mut self, k: usize, exponent: usize) -> &Complex<T> {
        let cache = &mut self.cached_powers[k];
        if cache.len() <= exponent {
            trace!(generator = k, from = cache.len(), to = exponent + 1, "grow rotation cache");
        }
        while cache.len() <= exponent {
            let next = cache[cache.len() - 1].clone() * self.unit_generators[k].clone();
            cache.push(next);
        }
        &cache[exponent]
    }

    /// Unit rotation `ρ0^ca · ρ1^cb` (negative exponents via conjugation).
    pub fn rotation_for_base_angle(&mut self, angle: &BaseAngle) -> Complex<T> {
        let mut result = Complex::one();
        for k in 0..2 {
            let c = angle.coefficients[k];
            let rotation = signed_power(self.power(k, c.unsigned_abs() as usize), c);
            result = result * rotation;
        }
        result
    }

    pub fn offset_for_edge_vector(&mut self, ev: &EdgeVector) -> Offset<T> {
        let rotation = self.rotation_for_base_angle(&ev.base_angle);
        self.frame.offset_with_rotation(ev, &rotation)
    }
}
