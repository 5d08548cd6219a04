//! Normal forms of periodic paths.
//!
//! Purpose
//! - Collapse the rotations of a periodic path to one representative
//!   (`canonicalize_edge_path`), and reduce a path to the integer word of
//!   its fans (`counts_for_edge_path`), which identifies the geometric
//!   family the trajectory belongs to.
//!
//! Why this design
//! - A periodic path has no distinguished start. A start is valid when the
//!   walk state there is base edge 0 with positive orientation and the turn
//!   pair across it is `L` then `R`: the first triangle's base then lies on
//!   the spine, so the study built from that rotation is well formed. Among
//!   valid starts the lexicographically smallest rotation wins.
//! - Rotations are compared through index arithmetic on the turn slice;
//!   nothing is re-allocated per candidate.
//!
//! Closure
//! - The walk state `(b, sign)` changes by `b += sign·turn`, `sign = -sign`.
//!   A word is closed when the walk from `(0, +1)` ends at `(0, +1)`. For a
//!   closed word, rotating by a valid start leaves the set of valid starts
//!   (shifted) unchanged, so the canonical form does not depend on which
//!   valid start the input began at. Other rotations can canonicalize
//!   differently, and open words only get a best-effort rotation.

mod counts;
mod fans;

pub use counts::{array_gcd, counts_for_edge_path, pick_canonical_count_index, PathCountForm};
pub use fans::{fans_for_edge_path, Fan};

use std::cmp::Ordering;
use std::fmt;

use crate::path::{EdgePath, Turn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CanonicalizeError {
    /// No offset sits at base edge 0 with positive sign between an `L` and
    /// an `R`.
    NoValidStart,
}

impl fmt::Display for CanonicalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalizeError::NoValidStart => {
                write!(f, "no base-aligned L→R start in the path")
            }
        }
    }
}

impl std::error::Error for CanonicalizeError {}

/// Final `(base_edge, sign)` of the walk started at `(0, +1)`.
pub fn walk_end(path: &EdgePath) -> (i32, i32) {
    path.turns().iter().fold((0, 1), step)
}

#[inline]
fn step((b, sign): (i32, i32), turn: &Turn) -> (i32, i32) {
    ((b + sign * turn.sign()).rem_euclid(3), -sign)
}

/// Offsets `i` where the walk from offset 0 is at `(0, +1)` and the turns
/// at `i - 1` (cyclically) and `i` are `L`, `R`.
pub fn canonical_starts(path: &EdgePath) -> Vec<usize> {
    let mut state = (0, 1);
    let mut starts = Vec::new();
    for (i, turn) in path.turns().iter().enumerate() {
        let crossing = path.turn_at(i as isize - 1) == Turn::Left && *turn == Turn::Right;
        if state == (0, 1) && crossing {
            starts.push(i);
        }
        state = step(state, turn);
    }
    starts
}

/// Offset of the canonical rotation: the valid start whose rotation is
/// lexicographically smallest.
pub fn canonical_rotation(path: &EdgePath) -> Result<usize, CanonicalizeError> {
    canonical_starts(path)
        .into_iter()
        .min_by(|&a, &b| compare_rotations(path, a, b))
        .ok_or(CanonicalizeError::NoValidStart)
}

/// Lexicographic order of the rotations starting at `a` and `b`.
fn compare_rotations(path: &EdgePath, a: usize, b: usize) -> Ordering {
    path.rotation_iter(a).cmp(path.rotation_iter(b))
}

/// Canonical rotation of `path`, or `path` itself (with a warning) when it
/// has none.
pub fn canonicalize_edge_path(path: &EdgePath) -> EdgePath {
    match canonical_rotation(path) {
        Ok(offset) => path.rotated(offset),
        Err(err) => {
            tracing::warn!(%path, "canonicalize failed: {err}");
            path.clone()
        }
    }
}
