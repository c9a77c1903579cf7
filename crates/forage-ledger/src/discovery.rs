//! The shared discovery ledger.
//!
//! Holds what the fleet collectively knows: the set of food cells that
//! have been seen with food on them, and whether the deposit has been
//! found. The deposit's location is fixed at construction but is only
//! handed out once the latch has flipped.
//!
//! Known food cells keep insertion order. Nearest-food ties are broken in
//! favour of the cell that was recorded first, which keeps the choice
//! deterministic for a given seed.

use indexmap::IndexSet;
use tracing::{debug, info};

use forage_types::Position;
use forage_world::FoodField;

/// Shared knowledge of food sightings and the deposit.
#[derive(Debug, Clone)]
pub struct DiscoveryLedger {
    known_food: IndexSet<Position>,
    deposit: Position,
    deposit_known: bool,
}

impl DiscoveryLedger {
    /// Create an empty ledger for a world whose deposit is at `deposit`.
    pub fn new(deposit: Position) -> Self {
        Self {
            known_food: IndexSet::new(),
            deposit,
            deposit_known: false,
        }
    }

    /// Record that `pos` has been seen.
    ///
    /// The cell is added only if the field currently holds food there.
    /// Recording a cell that is already known is a no-op. Returns whether
    /// the cell was newly added.
    pub fn record_food_sighting(&mut self, pos: Position, field: &FoodField) -> bool {
        if field.food_at(pos) == 0 {
            return false;
        }
        let added = self.known_food.insert(pos);
        if added {
            debug!(%pos, known = self.known_food.len(), "Food sighting recorded");
        }
        added
    }

    /// Drop `pos` from the known set once the field shows it empty.
    ///
    /// A cell that still holds food stays known. Returns whether the cell
    /// was removed.
    pub fn clear_food_sighting(&mut self, pos: Position, field: &FoodField) -> bool {
        if field.food_at(pos) > 0 {
            return false;
        }
        // shift_remove keeps the insertion order of the remaining cells.
        let removed = self.known_food.shift_remove(&pos);
        if removed {
            debug!(%pos, known = self.known_food.len(), "Food sighting cleared");
        }
        removed
    }

    /// The known food cell closest to `from`.
    ///
    /// Distance is Euclidean, compared as squared integer distance. On a
    /// tie the earliest recorded cell wins.
    pub fn nearest_known_food(&self, from: Position) -> Option<Position> {
        let mut best: Option<(i64, Position)> = None;
        for &cell in &self.known_food {
            let d = from.distance_squared(cell);
            if best.is_none_or(|(best_d, _)| d < best_d) {
                best = Some((d, cell));
            }
        }
        best.map(|(_, cell)| cell)
    }

    /// Latch the deposit as found.
    ///
    /// Returns `true` only for the call that flipped the latch.
    pub fn mark_deposit_found(&mut self) -> bool {
        if self.deposit_known {
            return false;
        }
        self.deposit_known = true;
        info!(deposit = %self.deposit, "Deposit discovered");
        true
    }

    /// Whether the deposit has been found.
    pub const fn deposit_known(&self) -> bool {
        self.deposit_known
    }

    /// The deposit location, if it has been found.
    pub const fn deposit_if_known(&self) -> Option<Position> {
        if self.deposit_known {
            Some(self.deposit)
        } else {
            None
        }
    }

    /// Known food cells in the order they were first recorded.
    pub fn known_food_cells(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.known_food.iter().copied()
    }

    /// Whether `pos` is in the known food set.
    pub fn is_known_food(&self, pos: Position) -> bool {
        self.known_food.contains(&pos)
    }
}
