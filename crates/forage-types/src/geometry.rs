//! Grid coordinates.
//!
//! A [`Position`] is an `(x, y)` pair on the simulation grid. Positions
//! serialize as two-element JSON arrays (`[x, y]`) because that is the
//! shape polling clients index into.

use serde::{Deserialize, Serialize};

/// A cell coordinate on the grid.
///
/// Ordering is x-major (`x` first, then `y`), which is also the order in
/// which food cells are listed in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Position {
    /// Column, `0 <= x < width`.
    pub x: i32,
    /// Row, `0 <= y < height`.
    pub y: i32,
}

impl Position {
    /// Create a position from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    ///
    /// Ranking by squared distance gives the same order as ranking by
    /// Euclidean distance without going through floating point.
    pub fn distance_squared(self, other: Self) -> i64 {
        let dx = i64::from(other.x).saturating_sub(i64::from(self.x));
        let dy = i64::from(other.y).saturating_sub(i64::from(self.y));
        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
    }

    /// Return the position shifted by `(dx, dy)`, or `None` on overflow.
    pub const fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }

    /// Unit direction from `self` toward `target` on each axis.
    ///
    /// Each component is `-1`, `0`, or `1`. Both components are non-zero
    /// when the target differs on both axes, which yields a diagonal step.
    pub const fn direction_to(self, target: Self) -> (i32, i32) {
        (
            (target.x.saturating_sub(self.x)).signum(),
            (target.y.saturating_sub(self.y)).signum(),
        )
    }

    /// Whether `other` lies in the Moore neighbourhood of `self`.
    pub const fn is_adjacent(self, other: Self) -> bool {
        let dx = other.x.saturating_sub(self.x).saturating_abs();
        let dy = other.y.saturating_sub(self.y).saturating_abs();
        dx <= 1 && dy <= 1 && !(dx == 0 && dy == 0)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for (i32, i32) {
    fn from(pos: Position) -> Self {
        (pos.x, pos.y)
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
