//! Apex-dependent geometry of unfolded triangles.
//!
//! Purpose
//! - Map an `EdgeVector` (edge of one reflected triangle copy) to its
//!   displacement in the unfolded plane for a concrete apex.
//!
//! Model
//! - The triangle is `(0,0), (1,0), apex`. A copy with base angle
//!   `(ca, cb)` is the reference triangle rotated by `ca·2a + cb·2b`
//!   (mirrored first when `reflected`). Rotations are complex numbers: the
//!   generators are `apex²` and `(1 - apex)²` (conjugated apex), each
//!   divided by its squared length.
//!
//! Two caches
//! - `PathGeometryField`: normalises once and grows power tables on demand.
//!   Needs division; the right choice when exponents are discovered while
//!   querying and many queries share one instance.
//! - `PathGeometryRing`: precomputes powers up to known maxima (e.g. a
//!   study's `max_angles`) scaled to a common denominator, so it works over
//!   rings such as polynomials. Offsets are the field offsets times
//!   `denominator()`.

mod field;
mod frame;
mod ring;
mod types;

pub use field::PathGeometryField;
pub use frame::TriangleFrame;
pub use ring::{GeometryError, PathGeometryRing};
pub use types::{Apex, Complex, FieldScalar, Offset, Scalar};

#[cfg(test)]
mod tests;
