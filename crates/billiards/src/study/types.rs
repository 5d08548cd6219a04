//! Graph types for the unfolded strip.
//!
//! Vertices and edges live in arenas owned by `PathStudy`; they refer to
//! each other by `VertexId`/`EdgeId`, so the incidence lists need no shared
//! ownership.

use std::fmt;

use crate::angle::EdgeVector;
use crate::geometry::GeometryError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Left,
    Right,
}

/// Address along one of the two boundary chains, counted from the base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoundaryVertexPosition {
    pub side: Side,
    pub index: usize,
}

impl BoundaryVertexPosition {
    #[inline]
    pub fn left(index: usize) -> Self {
        Self {
            side: Side::Left,
            index,
        }
    }

    #[inline]
    pub fn right(index: usize) -> Self {
        Self {
            side: Side::Right,
            index,
        }
    }

    #[inline]
    pub fn plus(self, offset: usize) -> Self {
        Self {
            index: self.index + offset,
            ..self
        }
    }
}

impl fmt::Display for BoundaryVertexPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.side {
            Side::Left => write!(f, "LeftBoundaryVertex({})", self.index),
            Side::Right => write!(f, "RightBoundaryVertex({})", self.index),
        }
    }
}

/// Where a vertex sits relative to the spine: on it (`offset == None`) or
/// one edge away from spine vertex `index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpinePosition {
    pub index: usize,
    pub offset: Option<EdgeId>,
}

#[derive(Clone, Debug)]
pub struct BoundaryVertex {
    pub pos: BoundaryVertexPosition,
    /// Discovery order.
    pub incoming: Vec<EdgeId>,
    /// Discovery order.
    pub outgoing: Vec<EdgeId>,
    pub spine_position: Option<SpinePosition>,
}

impl BoundaryVertex {
    pub(crate) fn new(pos: BoundaryVertexPosition) -> Self {
        Self {
            pos,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            spine_position: None,
        }
    }
}

/// Directed edge between two boundary vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathEdge {
    pub edge_vector: EdgeVector,
    pub from: VertexId,
    pub to: VertexId,
}

impl PathEdge {
    #[inline]
    pub fn new(edge_vector: EdgeVector, from: VertexId, to: VertexId) -> Self {
        Self {
            edge_vector,
            from,
            to,
        }
    }

    /// Same segment, opposite direction.
    #[inline]
    pub fn reverse(&self) -> Self {
        Self::new(self.edge_vector.reverse(), self.to, self.from)
    }
}

/// Anomalies found while building a study. The study is still usable for
/// inspection, but geometry derived from it should not be trusted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StudyDiagnostic {
    /// The base-edge chain did not reach the last left vertex; `last` was
    /// appended to the spine to force it. Usually a non-canonical path.
    SpineIncomplete { last: EdgeId },
    /// A boundary vertex is neither on the spine nor one edge away from it.
    MissingSpinePosition(BoundaryVertexPosition),
}

impl fmt::Display for StudyDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudyDiagnostic::SpineIncomplete { last } => write!(
                f,
                "base spine does not end at the last left vertex (forced edge {}); canonicalize the path first",
                last.0
            ),
            StudyDiagnostic::MissingSpinePosition(pos) => {
                write!(f, "{pos} has no spine position")
            }
        }
    }
}

/// Failed queries against a built study.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StudyError {
    UnknownVertex(BoundaryVertexPosition),
    NoSpinePosition(BoundaryVertexPosition),
    Geometry(GeometryError),
}

impl fmt::Display for StudyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudyError::UnknownVertex(pos) => write!(f, "{pos} is outside the strip"),
            StudyError::NoSpinePosition(pos) => write!(f, "{pos} has no spine position"),
            StudyError::Geometry(err) => write!(f, "geometry: {err}"),
        }
    }
}

impl std::error::Error for StudyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StudyError::Geometry(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GeometryError> for StudyError {
    fn from(err: GeometryError) -> Self {
        StudyError::Geometry(err)
    }
}
