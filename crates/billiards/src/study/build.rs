//! Boundary graph construction.

use super::types::{BoundaryVertexPosition, PathEdge};
use super::PathStudy;
use crate::angle::{BaseAngle, TriangleEdge};
use crate::path::{EdgePath, Turn};

/// Lay out the strip of `path` and collect its boundary graph.
///
/// The walk keeps the current triangle's angle, the index `b` of the edge
/// shared with the previous triangle (initially the base), and a sign that
/// alternates with the triangle's orientation. Each turn adds one boundary
/// vertex on the side opposite to the turn and one internal edge joining
/// the current ends of both chains.
///
/// The spine is left empty; see `spine::compute_spine`.
pub(super) fn compute_path_metadata(path: EdgePath) -> PathStudy {
    let mut study = PathStudy {
        path,
        vertices: Vec::new(),
        edges: Vec::new(),
        base_angles: Vec::new(),
        left_vertices: Vec::new(),
        right_vertices: Vec::new(),
        left_edges: Vec::new(),
        right_edges: Vec::new(),
        internal_edges: Vec::new(),
        base_edges: Vec::new(),
        max_angles: [0, 0],
        spine_edges: Vec::new(),
        diagnostics: Vec::new(),
    };

    let mut base_angle = BaseAngle::zero();
    study.base_angles.push(base_angle);
    let mut left = study.push_vertex(BoundaryVertexPosition::left(0));
    let mut right = study.push_vertex(BoundaryVertexPosition::right(0));
    let base = study.push_edge(PathEdge::new(
        base_angle.triangle_edge(TriangleEdge::Base),
        left,
        right,
    ));
    study.internal_edges.push(base);
    study.base_edges.push(base);
    let mut prev_internal = study.edges[base.0];

    let mut sign: i32 = 1;
    let mut base_edge_index: i32 = 0;
    let turns = study.path.turns().to_vec();
    for turn in turns {
        let new_base_edge_index = match turn {
            Turn::Left => {
                let boundary = TriangleEdge::from_index(base_edge_index + sign);
                let pos = study.vertex(right).pos.plus(1);
                let new_right = study.push_vertex(pos);
                let id = study.push_edge(PathEdge::new(
                    base_angle.triangle_edge(boundary),
                    right,
                    new_right,
                ));
                study.right_edges.push(id);
                if boundary.is_base() {
                    study.base_edges.push(id);
                }
                right = new_right;
                base_edge_index - sign
            }
            Turn::Right => {
                let boundary = TriangleEdge::from_index(base_edge_index - sign);
                let pos = study.vertex(left).pos.plus(1);
                let new_left = study.push_vertex(pos);
                let id = study.push_edge(PathEdge::new(
                    base_angle.triangle_edge(boundary).reverse(),
                    left,
                    new_left,
                ));
                study.left_edges.push(id);
                if boundary.is_base() {
                    study.base_edges.push(id);
                }
                left = new_left;
                base_edge_index + sign
            }
        }
        .rem_euclid(3);
        let shared = TriangleEdge::from_index(new_base_edge_index);

        base_angle = base_angle.reflect_through_edge(shared);
        study.base_angles.push(base_angle);

        // Oriented left to right, unless that would point back into the
        // previous internal edge.
        let mut internal = PathEdge::new(base_angle.triangle_edge(shared), left, right);
        if points_into(&internal, &prev_internal) {
            internal = internal.reverse();
        }
        let id = study.push_edge(internal);
        study.internal_edges.push(id);
        if shared.is_base() {
            study.base_edges.push(id);
        }
        prev_internal = internal;

        for k in 0..2 {
            study.max_angles[k] = study.max_angles[k].max(base_angle.coefficients[k].unsigned_abs());
        }
        sign = -sign;
        base_edge_index = new_base_edge_index;
    }
    study
}

fn points_into(edge: &PathEdge, prev: &PathEdge) -> bool {
    edge.to == prev.to || edge.to == prev.from
}
