//! Billiard paths in triangles: unfolding, spine geometry, and normal forms.
//!
//! A periodic billiard trajectory in a triangle is written as a word over
//! `{L, R}` (which non-base edge the ball crosses at each bounce). Unfolding
//! the reflections lays out a strip of triangle copies; this crate rebuilds
//! that strip combinatorially, measures it for a given apex, and reduces
//! path words to canonical representatives.
//!
//! Layout
//! - `path`: validated `{L, R}` input (`EdgePath`, `Turn`).
//! - `angle`: reflection bookkeeping (`BaseAngle`, `EdgeVector`).
//! - `study`: boundary graph, spine, and constraint functions (`PathStudy`).
//! - `geometry`: apex-dependent offsets with two caching strategies.
//! - `polynomial`: exact bivariate polynomials for symbolic apexes.
//! - `canonical`: cyclic canonical form, fans, and count forms.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API; the
//!   curated surface lives in `api` and `prelude`.

pub mod angle;
pub mod api;
pub mod canonical;
pub mod geometry;
pub mod path;
pub mod polynomial;
pub mod study;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;
pub use num_rational::BigRational;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::angle::{BaseAngle, EdgeVector, TriangleEdge};
    pub use crate::canonical::{
        canonicalize_edge_path, counts_for_edge_path, fans_for_edge_path, walk_end, Fan,
        PathCountForm,
    };
    pub use crate::geometry::{
        Apex, FieldScalar, Offset, PathGeometryField, PathGeometryRing, Scalar,
    };
    pub use crate::path::{EdgePath, PathError, Turn};
    pub use crate::polynomial::Polynomial;
    pub use crate::study::{BoundaryVertexPosition, PathStudy, Side, StudyCfg};
    pub use num_rational::BigRational;
}

/// Exact rational from a numerator/denominator pair of machine integers.
///
/// Panics if `den == 0`, like `BigRational::new`.
#[inline]
pub fn rational(num: i64, den: i64) -> BigRational {
    BigRational::new(num.into(), den.into())
}
