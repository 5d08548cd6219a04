use super::*;
use crate::angle::{BaseAngle, EdgeVector, TriangleEdge};
use crate::{rational, BigRational};
use nalgebra::Vector2;
use rand::{rngs::StdRng, Rng, SeedableRng};

const EDGES: [TriangleEdge; 3] = [TriangleEdge::Base, TriangleEdge::Right, TriangleEdge::Left];

fn exact_apex() -> Apex<BigRational> {
    Apex::new(rational(1, 3), rational(1, 2))
}

fn offset(dx: BigRational, dy: BigRational) -> Offset<BigRational> {
    Offset::new(dx, dy)
}

#[test]
fn zero_angle_offsets_are_triangle_edges() {
    let mut g = PathGeometryField::new(&Apex::new(0.25, 0.5));
    let z = BaseAngle::zero();
    let base: Vector2<f64> = g.offset_for_edge_vector(&z.triangle_edge(TriangleEdge::Base)).into();
    let right: Vector2<f64> = g.offset_for_edge_vector(&z.triangle_edge(TriangleEdge::Right)).into();
    let left: Vector2<f64> = g.offset_for_edge_vector(&z.triangle_edge(TriangleEdge::Left)).into();
    assert!((base - Vector2::new(1.0, 0.0)).norm() < 1e-12);
    assert!((right - Vector2::new(-0.75, 0.5)).norm() < 1e-12);
    assert!((left - Vector2::new(-0.25, -0.5)).norm() < 1e-12);
    // The three edges close up.
    assert!((base + right + left).norm() < 1e-12);
    // Clockwise traversal negates.
    let back: Vector2<f64> = g
        .offset_for_edge_vector(&z.triangle_edge(TriangleEdge::Right).reverse())
        .into();
    assert!((back + right).norm() < 1e-12);
}

#[test]
fn unit_generators_rotate_by_doubled_angles() {
    // apex (1/3, 1/2): (apex)² / |apex|² = (-5/13, 12/13).
    let mut g = PathGeometryField::new(&exact_apex());
    let rot = g.rotation_for_base_angle(&BaseAngle::new([1, 0], false));
    assert_eq!(rot, Complex::new(rational(-5, 13), rational(12, 13)));
    let inv = g.rotation_for_base_angle(&BaseAngle::new([-1, 0], false));
    assert_eq!(rot * inv, Complex::one());
}

#[test]
fn exact_offsets_of_reflected_copies() {
    let mut g = PathGeometryField::new(&exact_apex());
    let cases = [
        (BaseAngle::new([0, -1], true), false, offset(rational(-7, 25), rational(24, 25))),
        (BaseAngle::new([-1, -1], true), true, offset(rational(-323, 325), rational(36, 325))),
        (BaseAngle::new([-1, 0], false), true, offset(rational(5, 13), rational(12, 13))),
    ];
    for (angle, clockwise, expected) in cases {
        let ev = EdgeVector::new(TriangleEdge::Base, angle, clockwise);
        assert_eq!(g.offset_for_edge_vector(&ev), expected, "{angle}");
    }
}

#[test]
fn rotations_preserve_edge_lengths() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let apex = Apex::new(rng.gen_range(0.05..0.95), rng.gen_range(0.1..1.5));
        let mut g = PathGeometryField::new(&apex);
        let lengths = [
            1.0,
            Vector2::new(apex.x - 1.0, apex.y).norm(),
            Vector2::new(apex.x, apex.y).norm(),
        ];
        for _ in 0..10 {
            let angle = BaseAngle::new(
                [rng.gen_range(-6..=6), rng.gen_range(-6..=6)],
                rng.gen::<bool>(),
            );
            for edge in EDGES {
                let v: Vector2<f64> = g
                    .offset_for_edge_vector(&EdgeVector::new(edge, angle, rng.gen::<bool>()))
                    .into();
                assert!((v.norm() - lengths[edge.index()]).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn field_cache_grows_on_demand() {
    let mut g = PathGeometryField::new(&Apex::new(0.4, 0.7));
    assert_eq!(g.cached_len(), [1, 1]);
    g.rotation_for_base_angle(&BaseAngle::new([3, -1], false));
    assert_eq!(g.cached_len(), [4, 2]);
    g.rotation_for_base_angle(&BaseAngle::new([-2, 0], true));
    assert_eq!(g.cached_len(), [4, 2]);
}

#[test]
fn ring_matches_field_up_to_common_denominator() {
    let apex = exact_apex();
    let max_angles = [2, 3];
    let ring = PathGeometryRing::new(&apex, max_angles);
    let mut field = PathGeometryField::new(&apex);
    let d = ring.denominator();
    // (13/36)^2 · (25/36)^3
    assert_eq!(d, rational(169 * 15625, 1296 * 46656));
    for ca in -2..=2 {
        for cb in -3..=3 {
            for reflected in [false, true] {
                for clockwise in [false, true] {
                    for edge in EDGES {
                        let ev = EdgeVector::new(edge, BaseAngle::new([ca, cb], reflected), clockwise);
                        let from_ring = ring.offset_for_edge_vector(&ev).unwrap();
                        let from_field = field.offset_for_edge_vector(&ev).scale(&d);
                        assert_eq!(from_ring, from_field, "{ev:?}");
                    }
                }
            }
        }
    }
}

#[test]
fn ring_rejects_exponents_past_table() {
    let ring = PathGeometryRing::new(&Apex::new(0.3, 0.6), [1, 0]);
    let ev = BaseAngle::new([1, -1], false).triangle_edge(TriangleEdge::Base);
    assert_eq!(
        ring.offset_for_edge_vector(&ev),
        Err(GeometryError::ExponentOutOfRange {
            angle_index: 1,
            exponent: 1,
            max: 0
        })
    );
    assert!(ring
        .offset_for_edge_vector(&BaseAngle::new([-1, 0], true).triangle_edge(TriangleEdge::Left))
        .is_ok());
}

#[test]
fn offset_algebra() {
    let a = Offset::new(1.0, 2.0);
    let b = Offset::new(-3.0, 0.5);
    assert_eq!(a.clone() + b.clone(), Offset::new(-2.0, 2.5));
    assert_eq!(a.quarter_turn(), Offset::new(-2.0, 1.0));
    assert_eq!(a.quarter_turn().dot(&a), 0.0);
    let total: Offset<f64> = vec![a, b].into_iter().sum();
    assert_eq!(total, Offset::new(-2.0, 2.5));
}
