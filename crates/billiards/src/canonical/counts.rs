//! Count forms: one signed integer per fan.

use std::fmt;
use std::str::FromStr;

use num_integer::Integer;

use super::fans::fans_for_edge_path;
use crate::path::EdgePath;

/// Signed fan sizes of a path, alternating between the two angles.
///
/// Displays space-separated (`-2 -2 2 2`); that string is the key under
/// which statistics are aggregated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathCountForm {
    counts: Vec<i64>,
}

impl PathCountForm {
    pub fn new(counts: Vec<i64>) -> Self {
        Self { counts }
    }

    #[inline]
    pub fn counts(&self) -> &[i64] {
        &self.counts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Divide the even- and odd-indexed entries by their respective GCDs.
    ///
    /// Paths whose count form is a multiple of another's belong to the same
    /// family; this returns the smallest member. A class whose GCD is zero
    /// (empty or all zeros) is left as is.
    pub fn minimal_ancestor(&self) -> Self {
        let evens: Vec<i64> = self.counts.iter().copied().step_by(2).collect();
        let odds: Vec<i64> = self.counts.iter().copied().skip(1).step_by(2).collect();
        let gcds = [array_gcd(&evens), array_gcd(&odds)];
        if gcds == [1, 1] {
            return self.clone();
        }
        let counts = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, &c)| match gcds[i % 2] {
                0 => c,
                g => c / g,
            })
            .collect();
        Self::new(counts)
    }

    pub fn is_minimal(&self) -> bool {
        self.minimal_ancestor() == *self
    }
}

impl fmt::Display for PathCountForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.counts.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl FromStr for PathCountForm {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let counts = s
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<i64>, _>>()?;
        Ok(Self::new(counts))
    }
}

/// GCD of all values (non-negative); 0 for an empty or all-zero slice.
pub fn array_gcd(values: &[i64]) -> i64 {
    let mut gcd = 0;
    for v in values {
        gcd = v.gcd(&gcd);
        if gcd == 1 {
            break;
        }
    }
    gcd
}

/// Choose among rotation starts `indices` of `counts` by greedy elimination.
///
/// At offset `k` only the starts whose `k`-th entry is minimal survive. The
/// scan stops when one start is left, or once `k` reaches the distance
/// between the first two survivors (beyond that the rotations repeat each
/// other). Returns 0 when `indices` is empty.
pub fn pick_canonical_count_index(counts: &[i64], indices: &[usize]) -> usize {
    if indices.is_empty() || counts.is_empty() {
        return 0;
    }
    let n = counts.len();
    let value = |r: usize, offset: usize| counts[(indices[r] + offset) % n];
    let mut remaining: Vec<usize> = (0..indices.len()).collect();
    let mut offset = 0;
    while remaining.len() > 1 {
        if offset >= indices[remaining[0]].abs_diff(indices[remaining[1]]) {
            break;
        }
        let Some(min) = remaining.iter().map(|&r| value(r, offset)).min() else {
            break;
        };
        remaining.retain(|&r| value(r, offset) == min);
        offset += 1;
    }
    indices[remaining[0]]
}

/// Count form of `path`, rotated to its canonical start.
///
/// Fans with orientation `+1` on angle 0, or `-1` on angle 1, are the
/// admissible starts; among the longest of those, the start is picked on
/// the minimal ancestor so that a family shares one rotation. The returned
/// counts themselves are not reduced.
pub fn counts_for_edge_path(path: &EdgePath) -> PathCountForm {
    let fans = fans_for_edge_path(path);
    let mut counts = Vec::with_capacity(fans.len());
    let mut starts = Vec::new();
    let mut best_length = 0;
    let mut parity: i64 = 1;
    for fan in &fans {
        if fan.is_start_candidate() {
            if fan.length > best_length {
                best_length = fan.length;
                starts = vec![counts.len()];
            } else if fan.length == best_length {
                starts.push(counts.len());
            }
        }
        let offset = if fan.starts_on_base_edge { 0 } else { -1 };
        let base_length = (fan.length as i64 + offset).div_euclid(2);
        counts.push(parity * i64::from(fan.orientation) * base_length);
        parity = -parity;
    }
    let ancestor = PathCountForm::new(counts.clone()).minimal_ancestor();
    let start = pick_canonical_count_index(ancestor.counts(), &starts);
    counts.rotate_left(start);
    PathCountForm::new(counts)
}
