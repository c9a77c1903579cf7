//! Grid dimensions and cell indexing.
//!
//! Cells are stored x-major: index `x * height + y`. The same order is
//! used whenever cells are enumerated, so listings are stable across runs.

use forage_types::Position;

use crate::error::WorldError;

/// Moore neighbourhood offsets in enumeration order (dx outer, dy inner).
const OFFSETS_8: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The fixed extent of the simulation grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    width: u32,
    height: u32,
}

impl GridBounds {
    /// Largest supported side length: coordinates are `i32`.
    pub const MAX_DIM: u32 = i32::MAX.unsigned_abs();

    /// Create bounds for a `width x height` grid.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EmptyGrid`] if either side is zero, or
    /// [`WorldError::DimensionTooLarge`] if a side exceeds [`Self::MAX_DIM`].
    pub const fn new(width: u32, height: u32) -> Result<Self, WorldError> {
        if width == 0 || height == 0 {
            return Err(WorldError::EmptyGrid { width, height });
        }
        if width > Self::MAX_DIM {
            return Err(WorldError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(WorldError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        let w = usize::try_from(self.width).unwrap_or(usize::MAX);
        let h = usize::try_from(self.height).unwrap_or(usize::MAX);
        w.saturating_mul(h)
    }

    /// Whether `pos` lies on the grid.
    pub fn contains(&self, pos: Position) -> bool {
        let in_x = u32::try_from(pos.x).is_ok_and(|x| x < self.width);
        let in_y = u32::try_from(pos.y).is_ok_and(|y| y < self.height);
        in_x && in_y
    }

    /// Storage index of `pos`, or `None` if it is off the grid.
    pub fn index(&self, pos: Position) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        let h = usize::try_from(self.height).ok()?;
        x.checked_mul(h)?.checked_add(y)
    }

    /// Storage index of `pos`, failing with [`WorldError::OutOfBounds`].
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `pos` is off the grid.
    pub fn require(&self, pos: Position) -> Result<usize, WorldError> {
        self.index(pos).ok_or(WorldError::OutOfBounds(pos))
    }

    /// Position stored at `index`, the inverse of [`Self::index`].
    pub fn position_at(&self, index: usize) -> Option<Position> {
        let h = usize::try_from(self.height).ok()?;
        let x = i32::try_from(index.checked_div(h)?).ok()?;
        let y = i32::try_from(index.checked_rem(h)?).ok()?;
        let pos = Position::new(x, y);
        self.contains(pos).then_some(pos)
    }

    /// The Moore neighbourhood of `pos`, clipped to the grid.
    ///
    /// No wraparound: corner cells have 3 neighbours, edge cells 5.
    pub fn neighbors8(&self, pos: Position) -> Vec<Position> {
        OFFSETS_8
            .iter()
            .filter_map(|&(dx, dy)| pos.offset(dx, dy))
            .filter(|p| self.contains(*p))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_grid() {
        assert!(matches!(
            GridBounds::new(0, 5),
            Err(WorldError::EmptyGrid { width: 0, height: 5 })
        ));
    }

    #[test]
    fn index_round_trips_through_position() {
        let bounds = GridBounds::new(20, 20).unwrap();
        let pos = Position::new(7, 13);
        let idx = bounds.index(pos).unwrap();
        assert_eq!(idx, 7 * 20 + 13);
        assert_eq!(bounds.position_at(idx), Some(pos));
        assert_eq!(bounds.position_at(400), None);
    }

    #[test]
    fn off_grid_positions_have_no_index() {
        let bounds = GridBounds::new(20, 20).unwrap();
        assert_eq!(bounds.index(Position::new(-1, 0)), None);
        assert_eq!(bounds.index(Position::new(0, 20)), None);
        assert!(matches!(
            bounds.require(Position::new(20, 0)),
            Err(WorldError::OutOfBounds(_))
        ));
    }

    #[test]
    fn neighbourhood_is_clipped_at_edges() {
        let bounds = GridBounds::new(20, 20).unwrap();
        assert_eq!(bounds.neighbors8(Position::new(0, 0)).len(), 3);
        assert_eq!(bounds.neighbors8(Position::new(0, 10)).len(), 5);
        assert_eq!(bounds.neighbors8(Position::new(19, 19)).len(), 3);

        let inner = bounds.neighbors8(Position::new(10, 10));
        assert_eq!(inner.len(), 8);
        assert!(!inner.contains(&Position::new(10, 10)));
        assert_eq!(inner.first(), Some(&Position::new(9, 9)));
        assert_eq!(inner.last(), Some(&Position::new(11, 11)));
    }
}
