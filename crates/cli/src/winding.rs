//! Winding report: how far a path's turn pattern drifts around the triangle.
//!
//! Walking the word, a repeated turn reverses direction and a change of turn
//! steps one position forward (in the current direction). Six positions make
//! one full winding.

use anyhow::{Context, Result};
use billiards::api::EdgePath;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Parity (`0`/`1`) of each maximal run of equal turns.
pub fn parity_string(path: &EdgePath) -> String {
    let turns = path.turns();
    let mut out = String::new();
    let mut run = 0usize;
    for (i, turn) in turns.iter().enumerate() {
        run += 1;
        if turns.get(i + 1) != Some(turn) {
            out.push(if run % 2 == 0 { '0' } else { '1' });
            run = 0;
        }
    }
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Winding {
    /// `⌊position / 6⌋` at the end of the word.
    pub winding: i64,
    pub low: i64,
    pub high: i64,
}

pub fn winding_for_path(path: &EdgePath) -> Winding {
    let (mut position, mut low, mut high) = (0i64, 0i64, 0i64);
    let mut direction = 1i64;
    let mut prev = path.turn_at(-1);
    for &turn in path.turns() {
        if turn == prev {
            direction = -direction;
        } else {
            position += direction;
            prev = turn;
        }
        high = high.max(position);
        low = low.min(position);
    }
    Winding {
        winding: position.div_euclid(6),
        low,
        high,
    }
}

/// Representative of `path` for counting distinct data-file paths: the
/// smallest rotation starting where the running base sum `Σ (-1)^i·turn_i`
/// (not reduced mod 3) is exactly zero.
///
/// Coarser bookkeeping than `canonicalize_edge_path`: neither the sign nor
/// the turn pair at the start matters, only that the unfolded walk is back
/// on the original base edge.
pub fn base_rotation(path: &EdgePath) -> EdgePath {
    let mut base = 0i32;
    let mut best: Option<usize> = None;
    for (i, turn) in path.turns().iter().enumerate() {
        if base == 0 {
            let smaller = best.map_or(true, |b| {
                path.rotation_iter(i).cmp(path.rotation_iter(b)).is_lt()
            });
            if smaller {
                best = Some(i);
            }
        }
        base += if i % 2 == 0 { turn.sign() } else { -turn.sign() };
    }
    // Offset 0 always qualifies.
    path.rotated(best.unwrap_or(0))
}

#[derive(Debug, Default, Serialize)]
pub struct WindingReport {
    pub distinct_paths: usize,
    pub totals: BTreeMap<i64, usize>,
    /// Per winding number: histogram of `low`.
    pub lows: BTreeMap<i64, BTreeMap<i64, usize>>,
    /// Per winding number: histogram of `high`.
    pub highs: BTreeMap<i64, BTreeMap<i64, usize>>,
}

impl WindingReport {
    pub fn from_paths<'a>(paths: impl IntoIterator<Item = &'a EdgePath>) -> Self {
        let mut report = Self::default();
        let mut distinct = BTreeSet::new();
        for path in paths {
            distinct.insert(base_rotation(path));
            let w = winding_for_path(path);
            *report.totals.entry(w.winding).or_default() += 1;
            *report
                .lows
                .entry(w.winding)
                .or_default()
                .entry(w.low)
                .or_default() += 1;
            *report
                .highs
                .entry(w.winding)
                .or_default()
                .entry(w.high)
                .or_default() += 1;
        }
        report.distinct_paths = distinct.len();
        report
    }
}

/// Read one path per non-empty line.
pub fn read_paths(input: &Path) -> Result<Vec<EdgePath>> {
    let text =
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .enumerate()
        .map(|(i, l)| {
            EdgePath::parse_lenient(l)
                .with_context(|| format!("{}: line {} is not a path", input.display(), i + 1))
        })
        .collect()
}
