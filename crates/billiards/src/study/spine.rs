//! Spine selection, spine positions, and routes along the spine.

use super::types::{
    BoundaryVertexPosition, EdgeId, PathEdge, SpinePosition, StudyDiagnostic, StudyError,
    VertexId,
};
use super::PathStudy;
use crate::canonical::PathCountForm;

/// Pick the spine among the base edges and give every vertex its position.
///
/// A base edge belongs to the spine when the next base edge starts at its
/// head. The spine must end at the last left vertex so that its total
/// equals the offset of the whole path; when it does not, the last base
/// edge is appended and `SpineIncomplete` is recorded.
pub(super) fn compute_spine(study: &mut PathStudy) {
    let mut spine: Vec<EdgeId> = Vec::new();
    let mut prev = study.base_edges[0];
    for &next in &study.base_edges[1..] {
        if study.edge(next).from == study.edge(prev).to {
            spine.push(prev);
        }
        prev = next;
    }

    let last_left = BoundaryVertexPosition::left(study.left_edges.len());
    let ends_at_last_left = spine
        .last()
        .is_some_and(|&id| study.vertex(study.edge(id).to).pos == last_left);
    if !ends_at_last_left {
        spine.push(prev);
        let diagnostic = StudyDiagnostic::SpineIncomplete { last: prev };
        tracing::warn!(path = %study.path, "{diagnostic}");
        study.diagnostics.push(diagnostic);
    }

    // Later assignments win: a vertex reached both as a neighbour and as a
    // spine vertex ends up on the spine.
    let first = study.edge(spine[0]).from;
    study.vertices[first.0].spine_position = Some(SpinePosition {
        index: 0,
        offset: None,
    });
    for (i, &spine_edge) in spine.iter().enumerate() {
        let PathEdge { from, to, .. } = *study.edge(spine_edge);
        assign_neighbours(study, from, i);
        study.vertices[to.0].spine_position = Some(SpinePosition {
            index: i + 1,
            offset: None,
        });
    }
    let tail = study.edge(spine[spine.len() - 1]).to;
    assign_neighbours(study, tail, spine.len());

    let missing: Vec<BoundaryVertexPosition> = study
        .vertices
        .iter()
        .filter(|v| v.spine_position.is_none())
        .map(|v| v.pos)
        .collect();
    for pos in missing {
        let diagnostic = StudyDiagnostic::MissingSpinePosition(pos);
        tracing::warn!(path = %study.path, "{diagnostic}");
        study.diagnostics.push(diagnostic);
    }

    study.spine_edges = spine;
}

fn assign_neighbours(study: &mut PathStudy, vertex: VertexId, index: usize) {
    let outgoing = study.vertices[vertex.0].outgoing.clone();
    for edge in outgoing {
        let head = study.edge(edge).to;
        study.vertices[head.0].spine_position = Some(SpinePosition {
            index,
            offset: Some(edge),
        });
    }
}

impl PathStudy {
    fn spine_position_of(&self, pos: BoundaryVertexPosition) -> Result<SpinePosition, StudyError> {
        let vertex = self.vertex_at(pos).ok_or(StudyError::UnknownVertex(pos))?;
        vertex
            .spine_position
            .ok_or(StudyError::NoSpinePosition(pos))
    }

    /// Edges leading from `from` to `to` via the spine.
    ///
    /// The route steps back from `from` onto the spine if it hangs off it,
    /// walks the spine (backwards when `to` lies earlier), and steps off to
    /// `to`. The offsets of the returned edges sum to the vector between
    /// the two vertices in the unfolded strip.
    pub fn spine_path(
        &self,
        from: BoundaryVertexPosition,
        to: BoundaryVertexPosition,
    ) -> Result<Vec<PathEdge>, StudyError> {
        let start = self.spine_position_of(from)?;
        let end = self.spine_position_of(to)?;
        let mut route = Vec::new();
        if let Some(offset) = start.offset {
            route.push(self.edge(offset).reverse());
        }
        let (lo, hi) = (start.index.min(end.index), start.index.max(end.index));
        let slice = &self.spine_edges[lo..hi];
        if start.index > end.index {
            route.extend(slice.iter().rev().map(|&id| self.edge(id).reverse()));
        } else {
            route.extend(slice.iter().map(|&id| *self.edge(id)));
        }
        if let Some(offset) = end.offset {
            route.push(*self.edge(offset));
        }
        Ok(route)
    }

    /// Angle steps between consecutive spine edges, read cyclically.
    ///
    /// Each entry is the change of the first angle coefficient, or of the
    /// second when the first is unchanged. Not the same normal form as
    /// `counts_for_edge_path`, though the two coincide on symmetric paths
    /// such as `RRRLRRRLLLRLLL`.
    pub fn count_form(&self) -> PathCountForm {
        let n = self.spine_edges.len();
        let counts = (0..n)
            .map(|i| {
                let prev = self.edge(self.spine_edges[i]).edge_vector.base_angle;
                let next = self.edge(self.spine_edges[(i + 1) % n]).edge_vector.base_angle;
                if prev.coefficients[0] != next.coefficients[0] {
                    i64::from(next.coefficients[0] - prev.coefficients[0])
                } else {
                    i64::from(next.coefficients[1] - prev.coefficients[1])
                }
            })
            .collect();
        PathCountForm::new(counts)
    }
}
