//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for the CLI and
//!   experiments in this workspace; breaking changes are expected.
//! - Prefer these re-exports over deep module paths so call sites read the
//!   same across crates.

// Input words
pub use crate::path::{EdgePath, PathError, Turn};
// Reflection bookkeeping
pub use crate::angle::{BaseAngle, EdgeVector, TriangleEdge};
// Boundary graph, spine, constraints
pub use crate::study::{
    BoundaryVertexPosition, ConstraintFunctions, EdgeId, PathEdge, PathStudy, Side,
    SpinePosition, StudyCfg, StudyDiagnostic, StudyError, VertexId,
};
// Apex geometry
pub use crate::geometry::{
    Apex, GeometryError, Offset, PathGeometryField, PathGeometryRing, Scalar,
};
// Symbolic coordinates
pub use crate::polynomial::Polynomial;
// Normal forms
pub use crate::canonical::{
    canonical_rotation, canonical_starts, canonicalize_edge_path, counts_for_edge_path,
    fans_for_edge_path, pick_canonical_count_index, walk_end, CanonicalizeError, Fan,
    PathCountForm,
};
