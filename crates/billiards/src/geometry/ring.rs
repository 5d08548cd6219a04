//! Precomputed rotation table for scalars without division.

use std::fmt;

use super::frame::{signed_power, TriangleFrame};
use super::types::{Apex, Complex, Offset, Scalar};
use crate::angle::{BaseAngle, EdgeVector};

/// Lookup past the precomputed exponent range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeometryError {
    ExponentOutOfRange {
        angle_index: usize,
        exponent: u32,
        max: u32,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::ExponentOutOfRange {
                angle_index,
                exponent,
                max,
            } => write!(
                f,
                "angle coefficient {angle_index} needs exponent {exponent}, table holds up to {max}"
            ),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Offsets for one apex with every rotation power precomputed.
///
/// Entry `n` of table `k` is `g_k^n · N_k^(max_k - n)` where `g_k` is the
/// unnormalised generator and `N_k` its norm. All entries therefore share
/// the denominator `N_0^max_0 · N_1^max_1`: offsets come out scaled by
/// `denominator()` but never need a division, which keeps polynomial
/// coordinates polynomial. Immutable after construction.
#[derive(Clone, Debug)]
pub struct PathGeometryRing<T> {
    frame: TriangleFrame<T>,
    max_angles: [u32; 2],
    cached_powers: [Vec<Complex<T>>; 2],
}

impl<T: Scalar> PathGeometryRing<T> {
    pub fn new(apex: &Apex<T>, max_angles: [u32; 2]) -> Self {
        let frame = TriangleFrame::new(apex);
        let cached_powers = [0, 1].map(|k| {
            let max = max_angles[k] as usize;
            let mut norm_powers = Vec::with_capacity(max + 1);
            let mut rotation_powers = Vec::with_capacity(max + 1);
            norm_powers.push(T::one());
            rotation_powers.push(Complex::one());
            for n in 0..max {
                norm_powers.push(norm_powers[n].clone() * frame.norms[k].clone());
                rotation_powers.push(&rotation_powers[n] * &frame.generators[k]);
            }
            (0..=max)
                .map(|n| rotation_powers[n].scale(&norm_powers[max - n]))
                .collect::<Vec<_>>()
        });
        Self {
            frame,
            max_angles,
            cached_powers,
        }
    }

    #[inline]
    pub fn apex(&self) -> &Apex<T> {
        &self.frame.apex
    }

    #[inline]
    pub fn max_angles(&self) -> [u32; 2] {
        self.max_angles
    }

    /// Common scale of every offset: `N_0^max_0 · N_1^max_1`.
    pub fn denominator(&self) -> T {
        let mut d = T::one();
        for k in 0..2 {
            for _ in 0..self.max_angles[k] {
                d = d * self.frame.norms[k].clone();
            }
        }
        d
    }

    /// Scaled rotation for `angle`, or an error if a coefficient exceeds the table.
    pub fn rotation_for_base_angle(&self, angle: &BaseAngle) -> Result<Complex<T>, GeometryError> {
        let mut result = Complex::one();
        for k in 0..2 {
            let c = angle.coefficients[k];
            let exponent = c.unsigned_abs();
            let power = self.cached_powers[k].get(exponent as usize).ok_or(
                GeometryError::ExponentOutOfRange {
                    angle_index: k,
                    exponent,
                    max: self.max_angles[k],
                },
            )?;
            result = result * signed_power(power, c);
        }
        Ok(result)
    }

    pub fn offset_for_edge_vector(&self, ev: &EdgeVector) -> Result<Offset<T>, GeometryError> {
        let rotation = self.rotation_for_base_angle(&ev.base_angle)?;
        Ok(self.frame.offset_with_rotation(ev, &rotation))
    }
}
