//! Path study: the unfolded strip of one billiard path as a graph.
//!
//! Purpose
//! - Rebuild the boundary of the strip of reflected triangles traced by an
//!   `EdgePath`, pick the spine (the chain of base-edge copies from the
//!   first to the last left vertex), and express vertex-to-vertex vectors as
//!   short routes along it.
//! - Combine those routes with `geometry` into constraint functions, whose
//!   sign tells on which side of the spine direction a boundary vertex lies.
//!
//! Why this design
//! - Vertices and edges live in two arenas indexed by `VertexId`/`EdgeId`;
//!   incidence lists hold ids. The strip is built once and never mutated,
//!   so there is no need for shared ownership.
//! - Anomalies (non-canonical input) are recorded as `StudyDiagnostic`s on
//!   the study and logged, rather than aborting the build: the partial graph
//!   is what one wants to look at when debugging a path.
//!
//! Layout
//! - `types.rs` (ids, vertices, edges, errors), `build.rs` (boundary graph),
//!   `spine.rs` (spine, spine positions, routes), `constraint.rs`
//!   (constraint functions).

mod build;
mod constraint;
mod spine;
mod types;

pub use constraint::ConstraintFunctions;
pub use types::{
    BoundaryVertex, BoundaryVertexPosition, EdgeId, PathEdge, Side, SpinePosition,
    StudyDiagnostic, StudyError, VertexId,
};

use crate::angle::BaseAngle;
use crate::canonical::canonicalize_edge_path;
use crate::path::EdgePath;

/// Options for `PathStudy::with_cfg`.
#[derive(Clone, Copy, Debug)]
pub struct StudyCfg {
    /// Rotate the input to its canonical form before building.
    pub canonicalize: bool,
}

impl Default for StudyCfg {
    fn default() -> Self {
        Self {
            // Off: callers that pass canonical paths get exactly their input.
            canonicalize: false,
        }
    }
}

/// Boundary graph, spine and metadata of one path.
#[derive(Clone, Debug)]
pub struct PathStudy {
    path: EdgePath,
    vertices: Vec<BoundaryVertex>,
    edges: Vec<PathEdge>,
    base_angles: Vec<BaseAngle>,
    left_vertices: Vec<VertexId>,
    right_vertices: Vec<VertexId>,
    left_edges: Vec<EdgeId>,
    right_edges: Vec<EdgeId>,
    internal_edges: Vec<EdgeId>,
    base_edges: Vec<EdgeId>,
    max_angles: [u32; 2],
    spine_edges: Vec<EdgeId>,
    diagnostics: Vec<StudyDiagnostic>,
}

impl PathStudy {
    /// Build the study of `path` as given.
    pub fn new(path: EdgePath) -> Self {
        let mut study = build::compute_path_metadata(path);
        spine::compute_spine(&mut study);
        tracing::debug!(
            path = %study.path,
            left = study.left_edges.len(),
            right = study.right_edges.len(),
            spine = study.spine_edges.len(),
            "built path study"
        );
        study
    }

    pub fn with_cfg(path: EdgePath, cfg: StudyCfg) -> Self {
        if cfg.canonicalize {
            Self::new(canonicalize_edge_path(&path))
        } else {
            Self::new(path)
        }
    }

    #[inline]
    pub fn path(&self) -> &EdgePath {
        &self.path
    }

    /// Angle of the initial triangle followed by one angle per turn.
    #[inline]
    pub fn base_angles(&self) -> &[BaseAngle] {
        &self.base_angles
    }

    #[inline]
    pub fn max_angles(&self) -> [u32; 2] {
        self.max_angles
    }

    #[inline]
    pub fn vertex(&self, id: VertexId) -> &BoundaryVertex {
        &self.vertices[id.0]
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &PathEdge {
        &self.edges[id.0]
    }

    pub fn vertex_id(&self, pos: BoundaryVertexPosition) -> Option<VertexId> {
        let chain = match pos.side {
            Side::Left => &self.left_vertices,
            Side::Right => &self.right_vertices,
        };
        chain.get(pos.index).copied()
    }

    pub fn vertex_at(&self, pos: BoundaryVertexPosition) -> Option<&BoundaryVertex> {
        self.vertex_id(pos).map(|id| self.vertex(id))
    }

    pub fn left_vertices(&self) -> &[VertexId] {
        &self.left_vertices
    }

    pub fn right_vertices(&self) -> &[VertexId] {
        &self.right_vertices
    }

    pub fn left_edges(&self) -> &[EdgeId] {
        &self.left_edges
    }

    pub fn right_edges(&self) -> &[EdgeId] {
        &self.right_edges
    }

    /// Base edge first, then one edge between the two chains per turn.
    pub fn internal_edges(&self) -> &[EdgeId] {
        &self.internal_edges
    }

    /// Every edge lying on a copy of the base edge, in discovery order.
    pub fn base_edges(&self) -> &[EdgeId] {
        &self.base_edges
    }

    pub fn spine_edges(&self) -> &[EdgeId] {
        &self.spine_edges
    }

    pub fn diagnostics(&self) -> &[StudyDiagnostic] {
        &self.diagnostics
    }

    /// No diagnostics were raised while building.
    pub fn is_well_formed(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// All boundary positions, left chain first.
    pub fn positions(&self) -> impl Iterator<Item = BoundaryVertexPosition> + '_ {
        self.left_vertices
            .iter()
            .chain(self.right_vertices.iter())
            .map(|&id| self.vertex(id).pos)
    }

    fn push_vertex(&mut self, pos: BoundaryVertexPosition) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(BoundaryVertex::new(pos));
        match pos.side {
            Side::Left => self.left_vertices.push(id),
            Side::Right => self.right_vertices.push(id),
        }
        id
    }

    /// Store `edge` and register it with both endpoints.
    fn push_edge(&mut self, edge: PathEdge) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.vertices[edge.from.0].outgoing.push(id);
        self.vertices[edge.to.0].incoming.push(id);
        self.edges.push(edge);
        id
    }
}

#[cfg(test)]
mod tests;
