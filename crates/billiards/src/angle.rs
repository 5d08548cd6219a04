//! Reflection bookkeeping for unfolded triangles.
//!
//! A copy of the triangle in the unfolded strip is determined, up to
//! translation, by the rotation of its base edge and its orientation. After
//! any number of reflections the rotation is an integer combination of the
//! doubled angles `2a` (at the origin) and `2b` (at `(1, 0)`), so a
//! `BaseAngle` stores just those two integer coefficients and a parity bit.

use std::fmt;

/// Edge of the reference triangle `(0,0), (1,0), apex`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TriangleEdge {
    /// Index 0: `(0,0) → (1,0)`.
    Base,
    /// Index 1: `(1,0) → apex`.
    Right,
    /// Index 2: `apex → (0,0)`.
    Left,
}

impl TriangleEdge {
    /// Edge for any integer, taken modulo 3.
    #[inline]
    pub fn from_index(index: i32) -> Self {
        match index.rem_euclid(3) {
            0 => TriangleEdge::Base,
            1 => TriangleEdge::Right,
            _ => TriangleEdge::Left,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            TriangleEdge::Base => 0,
            TriangleEdge::Right => 1,
            TriangleEdge::Left => 2,
        }
    }

    #[inline]
    pub fn is_base(self) -> bool {
        self == TriangleEdge::Base
    }
}

/// Rotation of a base edge as `ca·2a + cb·2b`, plus orientation parity.
///
/// Only base-edge rotations are representable (multiples of the doubled
/// angles), which is all the strip ever needs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BaseAngle {
    pub coefficients: [i32; 2],
    pub reflected: bool,
}

impl BaseAngle {
    #[inline]
    pub fn new(coefficients: [i32; 2], reflected: bool) -> Self {
        Self {
            coefficients,
            reflected,
        }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Counterclockwise vector along `edge` of the triangle at this angle.
    #[inline]
    pub fn triangle_edge(self, edge: TriangleEdge) -> EdgeVector {
        EdgeVector::new(edge, self, false)
    }

    /// Angle of the neighbouring copy obtained by reflecting through `edge`.
    ///
    /// The base edge only flips orientation; the other two edges add one
    /// unit of doubled angle whose sign follows the current orientation.
    pub fn reflect_through_edge(self, edge: TriangleEdge) -> Self {
        let sign = if self.reflected { -1 } else { 1 };
        let [ca, cb] = self.coefficients;
        let coefficients = match edge {
            TriangleEdge::Base => [ca, cb],
            TriangleEdge::Right => [ca, cb - sign],
            TriangleEdge::Left => [ca + sign, cb],
        };
        Self::new(coefficients, !self.reflected)
    }
}

impl fmt::Display for BaseAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BaseAngle({}, {}", self.coefficients[0], self.coefficients[1])?;
        if self.reflected {
            write!(f, ", reflected")?;
        }
        write!(f, ")")
    }
}

/// One edge of one triangle copy, with a traversal direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeVector {
    pub edge: TriangleEdge,
    pub base_angle: BaseAngle,
    /// Direction relative to the containing triangle's counterclockwise order.
    pub clockwise: bool,
}

impl EdgeVector {
    #[inline]
    pub fn new(edge: TriangleEdge, base_angle: BaseAngle, clockwise: bool) -> Self {
        Self {
            edge,
            base_angle,
            clockwise,
        }
    }

    /// Same edge of the same copy, traversed the other way.
    #[inline]
    pub fn reverse(self) -> Self {
        Self {
            clockwise: !self.clockwise,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_index_wraps_mod_three() {
        assert_eq!(TriangleEdge::from_index(-1), TriangleEdge::Left);
        assert_eq!(TriangleEdge::from_index(4), TriangleEdge::Right);
        assert_eq!(TriangleEdge::from_index(3).index(), 0);
    }

    #[test]
    fn base_reflection_only_flips_orientation() {
        let a = BaseAngle::new([2, -1], false);
        let b = a.reflect_through_edge(TriangleEdge::Base);
        assert_eq!(b, BaseAngle::new([2, -1], true));
        assert_eq!(b.reflect_through_edge(TriangleEdge::Base), a);
    }

    #[test]
    fn side_reflections_follow_orientation() {
        let z = BaseAngle::zero();
        assert_eq!(
            z.reflect_through_edge(TriangleEdge::Left),
            BaseAngle::new([1, 0], true)
        );
        assert_eq!(
            z.reflect_through_edge(TriangleEdge::Right),
            BaseAngle::new([0, -1], true)
        );
        // Reflected copies accumulate with the opposite sign.
        let r = BaseAngle::new([1, 0], true);
        assert_eq!(
            r.reflect_through_edge(TriangleEdge::Right),
            BaseAngle::new([1, 1], false)
        );
        assert_eq!(
            r.reflect_through_edge(TriangleEdge::Left),
            BaseAngle::new([0, 0], false)
        );
    }

    #[test]
    fn reflecting_twice_through_the_same_edge_is_identity() {
        let a = BaseAngle::new([-3, 2], true);
        for e in [TriangleEdge::Base, TriangleEdge::Right, TriangleEdge::Left] {
            assert_eq!(a.reflect_through_edge(e).reflect_through_edge(e), a);
        }
    }

    #[test]
    fn edge_vector_reverse_keeps_identity() {
        let ev = BaseAngle::new([1, 1], false).triangle_edge(TriangleEdge::Right);
        assert!(!ev.clockwise);
        let rev = ev.reverse();
        assert!(rev.clockwise);
        assert_eq!((rev.edge, rev.base_angle), (ev.edge, ev.base_angle));
        assert_eq!(rev.reverse(), ev);
    }

    #[test]
    fn display_matches_notation() {
        assert_eq!(BaseAngle::new([-1, 0], true).to_string(), "BaseAngle(-1, 0, reflected)");
        assert_eq!(BaseAngle::zero().to_string(), "BaseAngle(0, 0)");
    }
}
