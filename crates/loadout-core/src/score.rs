//! EdgeScore - compatibility score of one inventory unit against one demand group
//!
//! Scorers return `Option<EdgeScore>`: `None` means the unit cannot serve the
//! group at all. Dense matrix routines cannot hold an absent edge, so
//! [`EdgeScore::to_cell`] maps `None` onto the reserved [`NO_EDGE`] value and
//! [`EdgeScore::from_cell`] maps it back.

use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Reserved matrix cell value for "this unit cannot satisfy this group".
///
/// Far below any reachable score, and far enough from `i64::MIN` that a
/// row of these can be summed without overflow.
pub const NO_EDGE: i64 = -(1 << 40);

/// Largest magnitude a real edge may carry. [`EdgeScore::bounded`] clamps to
/// `-EDGE_LIMIT..=EDGE_LIMIT`, which keeps every real edge above [`NO_EDGE`].
pub const EDGE_LIMIT: i64 = (1 << 40) - 1;

/// An integer edge weight; higher is better.
///
/// # Examples
///
/// ```
/// use loadout_core::{EdgeScore, NO_EDGE};
///
/// let strong = EdgeScore::of(2_010_000);
/// let weak = EdgeScore::of(1_010_000);
/// assert!(strong > weak);
///
/// assert_eq!(EdgeScore::to_cell(None), NO_EDGE);
/// assert_eq!(EdgeScore::from_cell(NO_EDGE), None);
/// assert_eq!(EdgeScore::from_cell(strong.value()), Some(strong));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeScore(i64);

impl EdgeScore {
    /// The zero score.
    pub const ZERO: EdgeScore = EdgeScore(0);

    /// Creates a new EdgeScore.
    #[inline]
    pub const fn of(value: i64) -> Self {
        EdgeScore(value)
    }

    /// Creates an EdgeScore clamped into the real-edge range.
    #[inline]
    pub const fn bounded(value: i64) -> Self {
        if value > EDGE_LIMIT {
            EdgeScore(EDGE_LIMIT)
        } else if value < -EDGE_LIMIT {
            EdgeScore(-EDGE_LIMIT)
        } else {
            EdgeScore(value)
        }
    }

    /// Returns the raw score value.
    #[inline]
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Converts an optional edge into a dense-matrix cell.
    #[inline]
    pub fn to_cell(edge: Option<EdgeScore>) -> i64 {
        edge.map_or(NO_EDGE, |s| s.0)
    }

    /// Converts a dense-matrix cell back into an optional edge.
    #[inline]
    pub fn from_cell(cell: i64) -> Option<EdgeScore> {
        if cell <= NO_EDGE {
            None
        } else {
            Some(EdgeScore(cell))
        }
    }
}

impl Add for EdgeScore {
    type Output = EdgeScore;

    fn add(self, rhs: Self) -> Self::Output {
        EdgeScore(self.0.saturating_add(rhs.0))
    }
}

impl Sub for EdgeScore {
    type Output = EdgeScore;

    fn sub(self, rhs: Self) -> Self::Output {
        EdgeScore(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for EdgeScore {
    type Output = EdgeScore;

    fn neg(self) -> Self::Output {
        EdgeScore(self.0.saturating_neg())
    }
}

impl fmt::Debug for EdgeScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeScore({})", self.0)
    }
}

impl fmt::Display for EdgeScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
