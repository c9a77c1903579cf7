//! Per-cell food counts and the deposit.
//!
//! The [`FoodField`] stores an unsigned count per cell. The deposit is
//! fixed at construction and is not a count at all: reads of the deposit
//! cell return [`CellReading::Deposit`], and every write to it is refused.
//! A count never goes below zero; an attempt to do so is reported as
//! [`WorldError::FoodUnderflow`] rather than clamped.

use forage_types::{CellReading, Position};
use tracing::trace;

use crate::bounds::GridBounds;
use crate::error::WorldError;

/// The food layer of the world.
#[derive(Debug, Clone)]
pub struct FoodField {
    bounds: GridBounds,
    /// Food count per cell, x-major. The deposit's slot is always zero.
    counts: Vec<u32>,
    deposit: Position,
}

impl FoodField {
    /// Create an empty field with the deposit at `deposit`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if the deposit is off the grid.
    pub fn new(bounds: GridBounds, deposit: Position) -> Result<Self, WorldError> {
        bounds.require(deposit)?;
        Ok(Self {
            bounds,
            counts: vec![0; bounds.cell_count()],
            deposit,
        })
    }

    /// The grid's dimensions.
    pub const fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// The deposit cell.
    pub const fn deposit(&self) -> Position {
        self.deposit
    }

    /// Read the contents of `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `pos` is off the grid.
    pub fn get(&self, pos: Position) -> Result<CellReading, WorldError> {
        let idx = self.bounds.require(pos)?;
        if pos == self.deposit {
            return Ok(CellReading::Deposit);
        }
        Ok(CellReading::Food(self.counts.get(idx).copied().unwrap_or(0)))
    }

    /// Food count at `pos`; zero for the deposit and for off-grid cells.
    pub fn food_at(&self, pos: Position) -> u32 {
        self.get(pos).map_or(0, CellReading::food)
    }

    /// Add one food unit to `pos`. Returns the new count.
    ///
    /// # Errors
    ///
    /// - [`WorldError::OutOfBounds`] if `pos` is off the grid.
    /// - [`WorldError::DepositCell`] if `pos` is the deposit.
    /// - [`WorldError::ArithmeticOverflow`] if the count would overflow.
    pub fn increment(&mut self, pos: Position) -> Result<u32, WorldError> {
        let slot = self.food_slot_mut(pos)?;
        *slot = slot.checked_add(1).ok_or(WorldError::ArithmeticOverflow)?;
        let count = *slot;
        trace!(%pos, count, "Food added");
        Ok(count)
    }

    /// Remove one food unit from `pos`. Returns the new count.
    ///
    /// # Errors
    ///
    /// - [`WorldError::OutOfBounds`] if `pos` is off the grid.
    /// - [`WorldError::DepositCell`] if `pos` is the deposit.
    /// - [`WorldError::FoodUnderflow`] if the cell holds no food.
    pub fn decrement(&mut self, pos: Position) -> Result<u32, WorldError> {
        let slot = self.food_slot_mut(pos)?;
        *slot = slot.checked_sub(1).ok_or(WorldError::FoodUnderflow(pos))?;
        let count = *slot;
        trace!(%pos, count, "Food removed");
        Ok(count)
    }

    /// Sum of all food counts on the field.
    pub fn total_food(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Cells holding at least one food unit, x-major order.
    pub fn food_cells(&self) -> Vec<Position> {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .filter_map(|(idx, _)| self.bounds.position_at(idx))
            .collect()
    }

    /// The field flattened to numbers, indexed `[x][y]`.
    ///
    /// Food cells hold their count; the deposit holds
    /// [`DEPOSIT_SENTINEL`](forage_types::DEPOSIT_SENTINEL).
    pub fn raw_matrix(&self) -> Vec<Vec<i64>> {
        let width = i32::try_from(self.bounds.width()).unwrap_or(i32::MAX);
        let height = i32::try_from(self.bounds.height()).unwrap_or(i32::MAX);
        (0..width)
            .map(|x| {
                (0..height)
                    .map(|y| {
                        self.get(Position::new(x, y))
                            .map_or(0, CellReading::raw)
                    })
                    .collect()
            })
            .collect()
    }

    fn food_slot_mut(&mut self, pos: Position) -> Result<&mut u32, WorldError> {
        let idx = self.bounds.require(pos)?;
        if pos == self.deposit {
            return Err(WorldError::DepositCell(pos));
        }
        self.counts.get_mut(idx).ok_or(WorldError::OutOfBounds(pos))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use forage_types::DEPOSIT_SENTINEL;

    use super::*;

    fn field() -> FoodField {
        FoodField::new(GridBounds::new(20, 20).unwrap(), Position::new(4, 9)).unwrap()
    }

    #[test]
    fn new_field_is_empty_apart_from_deposit() {
        let f = field();
        assert_eq!(f.total_food(), 0);
        assert!(f.food_cells().is_empty());
        assert_eq!(f.get(Position::new(4, 9)).unwrap(), CellReading::Deposit);
        assert_eq!(f.get(Position::new(0, 0)).unwrap(), CellReading::Food(0));
    }

    #[test]
    fn deposit_must_be_on_grid() {
        let bounds = GridBounds::new(20, 20).unwrap();
        assert!(FoodField::new(bounds, Position::new(20, 0)).is_err());
    }

    #[test]
    fn increment_stacks_food() {
        let mut f = field();
        let pos = Position::new(1, 1);
        assert_eq!(f.increment(pos).unwrap(), 1);
        assert_eq!(f.increment(pos).unwrap(), 2);
        assert_eq!(f.get(pos).unwrap(), CellReading::Food(2));
        assert_eq!(f.total_food(), 2);
    }

    #[test]
    fn deposit_is_never_written() {
        let mut f = field();
        let deposit = f.deposit();
        assert!(matches!(f.increment(deposit), Err(WorldError::DepositCell(_))));
        assert!(matches!(f.decrement(deposit), Err(WorldError::DepositCell(_))));
        assert_eq!(f.get(deposit).unwrap(), CellReading::Deposit);
    }

    #[test]
    fn decrement_below_zero_is_refused() {
        let mut f = field();
        let pos = Position::new(2, 3);
        assert!(matches!(f.decrement(pos), Err(WorldError::FoodUnderflow(_))));

        f.increment(pos).unwrap();
        assert_eq!(f.decrement(pos).unwrap(), 0);
        assert!(matches!(f.decrement(pos), Err(WorldError::FoodUnderflow(_))));
    }

    #[test]
    fn food_cells_are_listed_x_major() {
        let mut f = field();
        f.increment(Position::new(5, 0)).unwrap();
        f.increment(Position::new(0, 7)).unwrap();
        f.increment(Position::new(0, 2)).unwrap();

        assert_eq!(
            f.food_cells(),
            vec![Position::new(0, 2), Position::new(0, 7), Position::new(5, 0)]
        );
    }

    #[test]
    fn raw_matrix_marks_deposit_with_sentinel() {
        let mut f = field();
        f.increment(Position::new(0, 1)).unwrap();
        let m = f.raw_matrix();

        assert_eq!(m.len(), 20);
        let cell = |x: usize, y: usize| m.get(x).and_then(|col| col.get(y)).copied();
        assert_eq!(cell(4, 9), Some(DEPOSIT_SENTINEL));
        assert_eq!(cell(0, 1), Some(1));
        assert_eq!(cell(0, 0), Some(0));
    }
}
