use super::*;
use crate::angle::{BaseAngle, TriangleEdge};
use crate::geometry::{Apex, Offset, PathGeometryField, PathGeometryRing};
use crate::polynomial::Polynomial;
use crate::{rational, BigRational};
use num_traits::Zero;

use BoundaryVertexPosition as Pos;

fn study(s: &str) -> PathStudy {
    PathStudy::new(s.parse().unwrap())
}

fn endpoints(study: &PathStudy, id: EdgeId) -> (BoundaryVertexPosition, BoundaryVertexPosition) {
    let e = study.edge(id);
    (study.vertex(e.from).pos, study.vertex(e.to).pos)
}

fn exact_apex() -> Apex<BigRational> {
    Apex::new(rational(1, 3), rational(1, 2))
}

fn total(ring: &PathGeometryRing<BigRational>, route: &[PathEdge]) -> Offset<BigRational> {
    route
        .iter()
        .map(|e| ring.offset_for_edge_vector(&e.edge_vector).unwrap())
        .sum()
}

#[test]
fn two_turn_path_falls_back_to_last_base_edge() {
    let s = study("LR");
    assert_eq!(s.left_edges().len(), 1);
    assert_eq!(s.right_edges().len(), 1);
    assert_eq!(
        s.base_angles(),
        &[
            BaseAngle::zero(),
            BaseAngle::new([1, 0], true),
            BaseAngle::new([1, 1], false)
        ]
    );
    assert_eq!(s.max_angles(), [1, 1]);
    // base edge, r0→r1, internal, l0→l1, internal
    assert_eq!(s.diagnostics(), &[StudyDiagnostic::SpineIncomplete { last: EdgeId(3) }]);
    assert!(!s.is_well_formed());
    assert_eq!(s.spine_edges(), &[EdgeId(3)]);
    assert_eq!(endpoints(&s, EdgeId(3)), (Pos::left(0), Pos::left(1)));
    assert_eq!(s.count_form().to_string(), "0");
    // The second internal edge would point into r1, so it is reversed.
    let last_internal = s.internal_edges()[2];
    assert_eq!(endpoints(&s, last_internal), (Pos::right(1), Pos::left(1)));
    assert!(s.positions().all(|p| s.vertex_at(p).unwrap().spine_position.is_some()));
}

#[test]
fn symmetric_path_graph_and_spine() {
    let s = study("RRRLRRRLLLRLLL");
    assert!(s.is_well_formed(), "{:?}", s.diagnostics());
    assert_eq!(s.left_edges().len(), 7);
    assert_eq!(s.right_edges().len(), 7);
    assert_eq!(s.left_vertices().len(), 8);
    assert_eq!(s.base_angles().len(), 15);
    assert_eq!(s.internal_edges().len(), 15);
    assert_eq!(s.max_angles(), [2, 2]);
    let spine: Vec<_> = s.spine_edges().iter().map(|&id| endpoints(&s, id)).collect();
    assert_eq!(
        spine,
        vec![
            (Pos::left(0), Pos::right(0)),
            (Pos::right(0), Pos::right(1)),
            (Pos::right(1), Pos::left(6)),
            (Pos::left(6), Pos::left(7)),
        ]
    );
    assert_eq!(s.count_form().to_string(), "-2 -2 2 2");
    for &id in s.base_edges() {
        assert_eq!(s.edge(id).edge_vector.edge, TriangleEdge::Base);
    }
}

#[test]
fn incidence_lists_match_edges() {
    let s = study("RRRRRLRRRLLLLLRLLL");
    for pos in s.positions() {
        let id = s.vertex_id(pos).unwrap();
        let vertex = s.vertex(id);
        assert_eq!(vertex.pos, pos);
        for &e in &vertex.outgoing {
            assert_eq!(s.edge(e).from, id);
        }
        for &e in &vertex.incoming {
            assert_eq!(s.edge(e).to, id);
        }
    }
    assert_eq!(s.max_angles(), [2, 3]);
    assert_eq!(s.left_edges().len(), 9);
    assert_eq!(s.count_form().to_string(), "-3 -2 3 2");
}

#[test]
fn alternating_path_spine_vectors() {
    let s = study("RLRLRL");
    assert!(s.is_well_formed());
    assert_eq!(s.max_angles(), [1, 1]);
    let vectors: Vec<_> = s
        .spine_edges()
        .iter()
        .map(|&id| {
            let ev = s.edge(id).edge_vector;
            (ev.edge, ev.base_angle, ev.clockwise)
        })
        .collect();
    let base = TriangleEdge::Base;
    assert_eq!(
        vectors,
        vec![
            (base, BaseAngle::new([0, 0], false), false),
            (base, BaseAngle::new([0, -1], true), false),
            (base, BaseAngle::new([-1, -1], true), true),
            (base, BaseAngle::new([-1, 0], false), true),
        ]
    );
    assert_eq!(s.count_form().to_string(), "-1 -1 1 1");
}

#[test]
fn spine_total_and_constraint_at_exact_apex() {
    let s = study("RLRLRL");
    let cf = s.constraint_functions(&exact_apex()).unwrap();
    assert_eq!(cf.geometry().denominator(), rational(325, 1296));
    assert_eq!(
        cf.spine_total(),
        &Offset::new(rational(1, 36), rational(1, 2))
    );
    assert_eq!(cf.eval(0, 0).unwrap(), rational(325, 2592));

    // Field offsets of the spine are the ring's divided by the denominator.
    let mut field = PathGeometryField::new(&exact_apex());
    let field_total: Offset<BigRational> = s
        .spine_edges()
        .iter()
        .map(|&id| field.offset_for_edge_vector(&s.edge(id).edge_vector))
        .sum();
    assert_eq!(field_total, Offset::new(rational(36, 325), rational(648, 325)));
}

#[test]
fn routes_are_additive() {
    for p in ["RRRLRRRLLLRLLL", "RLRLRL", "LR"] {
        let s = study(p);
        let ring = PathGeometryRing::new(&exact_apex(), s.max_angles());
        let positions: Vec<_> = s.positions().collect();
        for &a in &positions {
            for &b in &positions {
                let ab = total(&ring, &s.spine_path(a, b).unwrap());
                let ba = total(&ring, &s.spine_path(b, a).unwrap());
                assert_eq!(ab.clone() + ba, Offset::zero(), "{p}: {a} {b}");
                for &c in positions.iter().step_by(3) {
                    let bc = total(&ring, &s.spine_path(b, c).unwrap());
                    let ac = total(&ring, &s.spine_path(a, c).unwrap());
                    assert_eq!(ab.clone() + bc, ac, "{p}: {a} {b} {c}");
                }
            }
        }
    }
}

#[test]
fn constraint_vanishes_on_same_position() {
    let s = study("RRRLRRRLLLRLLL");
    let cf = s.constraint_functions(&Apex::new(0.41, 0.77)).unwrap();
    for p in s.positions() {
        assert_eq!(cf.eval_between(p, p).unwrap(), 0.0, "{p}");
    }
    // Not to be confused with eval(i, i), which joins two different vertices.
    let exact = s.constraint_functions(&exact_apex()).unwrap();
    assert_eq!(exact.eval(0, 0).unwrap(), rational(-105625, 68024448));
}

#[test]
fn unknown_positions_are_errors() {
    let s = study("RLRLRL");
    assert_eq!(
        s.spine_path(Pos::left(0), Pos::right(9)),
        Err(StudyError::UnknownVertex(Pos::right(9)))
    );
    let cf = s.constraint_functions(&exact_apex()).unwrap();
    assert!(matches!(cf.eval(7, 0), Err(StudyError::UnknownVertex(_))));
}

fn p(c: i64) -> Polynomial {
    Polynomial::from(c)
}

#[test]
fn lower_boundary_polynomial_of_symmetric_path() {
    let s = study("RRRLRRRLLLRLLL");
    let x = Polynomial::x();
    let y = Polynomial::y();
    let cf = s.constraint_functions(&Apex::new(x.clone(), y.clone())).unwrap();

    let n0 = x.pow(2) + y.pow(2);
    let n1 = x.pow(2) - p(2) * x.clone() + y.pow(2) + p(1);
    let boundary = p(3) * x.pow(4) - p(6) * x.pow(3) + p(2) * x.pow(2) * y.pow(2) + p(3) * x.pow(2)
        - p(6) * x.clone() * y.pow(2)
        - y.pow(4)
        - y.pow(2);
    let expected = p(16) * x.clone() * y.pow(3) * (x.clone() - p(1)) * n0.pow(2) * n1.pow(2) * boundary;
    assert_eq!(cf.eval(2, 4).unwrap(), expected);

    // Left boundary: 64·x·y³·(x-1)²·(x-y)(x+y)·n0²·n1².
    let left = p(64)
        * x.clone()
        * y.pow(3)
        * (x.clone() - p(1)).pow(2)
        * (x.clone() - y.clone())
        * (x.clone() + y.clone())
        * n0.pow(2)
        * n1.pow(2);
    assert_eq!(cf.eval(7, 1).unwrap(), left);
}

#[test]
fn alternating_path_polynomial_and_float_agree() {
    let s = study("RLRLRL");
    let x = Polynomial::x();
    let y = Polynomial::y();
    let cf = s.constraint_functions(&Apex::new(x.clone(), y.clone())).unwrap();
    let n0 = x.pow(2) + y.pow(2);
    let n1 = x.pow(2) - p(2) * x.clone() + y.pow(2) + p(1);
    let expected = p(8) * x.clone() * y.pow(3) * n0.clone() * n1.clone();
    assert_eq!(cf.eval(0, 1).unwrap(), expected);
    let diagonal = p(4) * y.pow(3) * n0 * n1;
    assert_eq!(cf.eval(0, 0).unwrap(), diagonal);

    let float = s.constraint_functions(&Apex::new(0.3, 0.4)).unwrap();
    let exact = s
        .constraint_functions(&Apex::new(rational(3, 10), rational(2, 5)))
        .unwrap();
    for l in 0..s.left_vertices().len() {
        for r in 0..s.right_vertices().len() {
            let poly = cf.eval(l, r).unwrap();
            let value = float.eval(l, r).unwrap();
            assert!((poly.eval_f64(0.3, 0.4) - value).abs() < 1e-12, "({l}, {r})");
            assert_eq!(
                poly.eval(&rational(3, 10), &rational(2, 5)),
                exact.eval(l, r).unwrap()
            );
        }
    }
}

#[test]
fn ring_and_field_agree_on_every_edge() {
    let s = study("RRRRRLRRRLLLLLRLLL");
    let ring = PathGeometryRing::new(&exact_apex(), s.max_angles());
    let mut field = PathGeometryField::new(&exact_apex());
    let d = ring.denominator();
    for pos in s.positions() {
        let v = s.vertex_at(pos).unwrap();
        for &e in v.outgoing.iter().chain(&v.incoming) {
            let ev = s.edge(e).edge_vector;
            assert_eq!(
                ring.offset_for_edge_vector(&ev).unwrap(),
                field.offset_for_edge_vector(&ev).scale(&d)
            );
        }
    }
    assert!(!d.is_zero());
}

#[test]
fn canonicalizing_cfg_rotates_first() {
    let path: crate::path::EdgePath = "RLRRRLLLRLLLRR".parse().unwrap();
    let raw = PathStudy::with_cfg(path.clone(), StudyCfg::default());
    assert_eq!(raw.path(), &path);
    let s = PathStudy::with_cfg(path, StudyCfg { canonicalize: true });
    assert_eq!(s.path().to_string(), "RRRLRRRLLLRLLL");
    assert!(s.is_well_formed());
    assert_eq!(s.max_angles(), [2, 2]);
    assert_eq!(s.spine_edges().len(), 4);
    assert_eq!(s.count_form().to_string(), "-2 -2 2 2");
}
