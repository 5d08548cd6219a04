//! Validated `{L, R}` path words.
//!
//! Everything downstream assumes a non-empty word over the two turns, so the
//! check happens once, here, when text becomes an `EdgePath`.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

/// One bounce: which non-base edge of the current triangle is crossed.
///
/// `Left < Right`, so comparing turn sequences matches comparing the
/// strings they print as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Turn {
    Left,
    Right,
}

impl Turn {
    /// `-1` for `L`, `+1` for `R`.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Turn::Left => -1,
            Turn::Right => 1,
        }
    }

    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Turn::Left => 'L',
            Turn::Right => 'R',
        }
    }

    #[inline]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'L' => Some(Turn::Left),
            'R' => Some(Turn::Right),
            _ => None,
        }
    }
}

/// Rejected path input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathError {
    /// The word has no turns, so there is no triangle to unfold.
    Empty,
    /// A character other than `L` or `R` at the given char index.
    InvalidTurn { index: usize, found: char },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::Empty => write!(f, "edge path is empty"),
            PathError::InvalidTurn { index, found } => write!(
                f,
                "invalid turn {found:?} at index {index} (expected 'L' or 'R')"
            ),
        }
    }
}

impl std::error::Error for PathError {}

/// Non-empty sequence of turns.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgePath {
    turns: Vec<Turn>,
}

impl EdgePath {
    pub fn new(turns: Vec<Turn>) -> Result<Self, PathError> {
        if turns.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self { turns })
    }

    /// Parse, dropping every character that is not `L` or `R` first.
    ///
    /// Data files carry stray punctuation around paths (e.g. a trailing `)`).
    pub fn parse_lenient(s: &str) -> Result<Self, PathError> {
        Self::new(s.chars().filter_map(Turn::from_char).collect())
    }

    /// Uniformly random word of `len` turns (`len` is clamped to at least 1).
    pub fn random<R: Rng>(rng: &mut R, len: usize) -> Self {
        let turns = (0..len.max(1))
            .map(|_| if rng.gen::<bool>() { Turn::Right } else { Turn::Left })
            .collect();
        Self { turns }
    }

    #[inline]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always `false`; kept for the `len`/`is_empty` pairing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Turn at `index` taken cyclically (negative indices wrap from the end).
    #[inline]
    pub fn turn_at(&self, index: isize) -> Turn {
        let n = self.turns.len() as isize;
        self.turns[index.rem_euclid(n) as usize]
    }

    /// Cyclic rotation starting at `offset`.
    pub fn rotated(&self, offset: usize) -> Self {
        let n = self.turns.len();
        let turns = (0..n).map(|k| self.turns[(offset + k) % n]).collect();
        Self { turns }
    }

    /// Iterator over the rotation starting at `offset`, without allocating.
    pub fn rotation_iter(&self, offset: usize) -> impl Iterator<Item = Turn> + '_ {
        let n = self.turns.len();
        (0..n).map(move |k| self.turns[(offset + k) % n])
    }
}

impl FromStr for EdgePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let turns = s
            .chars()
            .enumerate()
            .map(|(index, c)| Turn::from_char(c).ok_or(PathError::InvalidTurn { index, found: c }))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(turns)
    }
}

impl fmt::Display for EdgePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for t in &self.turns {
            write!(f, "{}", t.as_char())?;
        }
        Ok(())
    }
}
