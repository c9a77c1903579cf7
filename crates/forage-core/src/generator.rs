//! Periodic food generation.
//!
//! Every `interval` ticks the generator drops a batch of food onto random
//! cells. A cell qualifies if it is not the deposit and no agent stands on
//! it; several units may stack on one cell. Generation stops for good once
//! the run's food budget has been produced.

use rand::Rng;
use tracing::{debug, warn};

use forage_ledger::FoodAccount;
use forage_types::Position;
use forage_world::{FoodField, Grid};

use crate::config::FoodConfig;
use crate::tick::TickError;

/// What one generation pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Cells that received a unit, in placement order.
    pub placed: Vec<Position>,
    /// Units whose placement ran out of attempts.
    pub skipped: u32,
}

/// Drops food onto the field on a fixed schedule.
#[derive(Debug, Clone)]
pub struct FoodGenerator {
    interval: u64,
    batch_min: u32,
    batch_max: u32,
    placement_attempts: u32,
}

impl FoodGenerator {
    /// Create a generator from the food configuration.
    pub const fn new(config: &FoodConfig) -> Self {
        Self {
            interval: config.interval,
            batch_min: config.batch_min,
            batch_max: config.batch_max,
            placement_attempts: config.placement_attempts,
        }
    }

    /// Whether `tick` is a generation tick.
    pub fn is_generation_tick(&self, tick: u64) -> bool {
        tick.checked_rem(self.interval) == Some(0)
    }

    /// Run one generation pass for `tick`.
    ///
    /// Does nothing off-schedule or once the budget is spent. Otherwise
    /// draws a batch size in `batch_min..=batch_max` and places up to that
    /// many units, never exceeding the budget.
    ///
    /// # Errors
    ///
    /// Returns [`TickError`] if the field or the account rejects a unit.
    pub fn generate(
        &self,
        tick: u64,
        field: &mut FoodField,
        grid: &Grid,
        account: &mut FoodAccount,
        rng: &mut impl Rng,
    ) -> Result<GenerationReport, TickError> {
        let mut report = GenerationReport::default();
        if !self.is_generation_tick(tick) || account.remaining_budget() == 0 {
            return Ok(report);
        }

        let batch: u32 = rng.random_range(self.batch_min..=self.batch_max);
        for _ in 0..batch {
            if account.remaining_budget() == 0 {
                break;
            }
            match self.pick_cell(field, grid, rng) {
                Some(pos) => {
                    field.increment(pos)?;
                    account.record_generated(1)?;
                    report.placed.push(pos);
                }
                None => {
                    warn!(
                        tick,
                        attempts = self.placement_attempts,
                        "No eligible cell for food unit, skipping"
                    );
                    report.skipped = report.skipped.saturating_add(1);
                }
            }
        }

        debug!(
            tick,
            batch,
            placed = report.placed.len(),
            skipped = report.skipped,
            generated = account.generated(),
            "Food generated"
        );
        Ok(report)
    }

    /// Sample cells until one is neither the deposit nor occupied.
    fn pick_cell(&self, field: &FoodField, grid: &Grid, rng: &mut impl Rng) -> Option<Position> {
        let bounds = field.bounds();
        let width = i32::try_from(bounds.width()).ok()?;
        let height = i32::try_from(bounds.height()).ok()?;
        for _ in 0..self.placement_attempts {
            let pos = Position::new(rng.random_range(0..width), rng.random_range(0..height));
            if pos != field.deposit() && grid.is_empty(pos) {
                return Some(pos);
            }
        }
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use forage_types::AgentId;
    use forage_world::GridBounds;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn setup(width: u32, height: u32, deposit: Position) -> (FoodField, Grid) {
        let bounds = GridBounds::new(width, height).unwrap();
        (FoodField::new(bounds, deposit).unwrap(), Grid::new(bounds))
    }

    #[test]
    fn generates_only_on_schedule() {
        let generator = FoodGenerator::new(&FoodConfig::default());
        let (mut field, grid) = setup(20, 20, Position::new(3, 3));
        let mut account = FoodAccount::new(47);
        let mut rng = StdRng::seed_from_u64(1);

        for tick in 1..5 {
            let report = generator
                .generate(tick, &mut field, &grid, &mut account, &mut rng)
                .unwrap();
            assert!(report.placed.is_empty());
        }
        assert_eq!(account.generated(), 0);

        let report = generator
            .generate(0, &mut field, &grid, &mut account, &mut rng)
            .unwrap();
        let placed = u32::try_from(report.placed.len()).unwrap();
        assert!((2..=5).contains(&placed));
        assert_eq!(account.generated(), placed);
        assert_eq!(field.total_food(), u64::from(placed));
    }

    #[test]
    fn never_exceeds_budget() {
        let generator = FoodGenerator::new(&FoodConfig::default());
        let (mut field, grid) = setup(20, 20, Position::new(3, 3));
        let mut account = FoodAccount::new(7);
        let mut rng = StdRng::seed_from_u64(2);

        for tick in (0..200).step_by(5) {
            generator
                .generate(tick, &mut field, &grid, &mut account, &mut rng)
                .unwrap();
        }
        assert_eq!(account.generated(), 7);
        assert_eq!(field.total_food(), 7);
    }

    #[test]
    fn avoids_deposit_and_occupied_cells() {
        // 2x1 grid: one deposit, one occupied cell, nowhere to place.
        let (mut field, mut grid) = setup(2, 1, Position::new(0, 0));
        grid.place(AgentId::new(0), Position::new(1, 0)).unwrap();
        let mut account = FoodAccount::new(47);
        let mut rng = StdRng::seed_from_u64(3);
        let generator = FoodGenerator::new(&FoodConfig {
            placement_attempts: 20,
            ..FoodConfig::default()
        });

        let report = generator
            .generate(0, &mut field, &grid, &mut account, &mut rng)
            .unwrap();
        assert!(report.placed.is_empty());
        assert!((2..=5).contains(&report.skipped));
        assert_eq!(account.generated(), 0);
    }

    #[test]
    fn units_stack_on_the_only_free_cell() {
        let (mut field, grid) = setup(2, 1, Position::new(0, 0));
        let mut account = FoodAccount::new(47);
        let mut rng = StdRng::seed_from_u64(4);
        let generator = FoodGenerator::new(&FoodConfig {
            batch_min: 3,
            batch_max: 3,
            ..FoodConfig::default()
        });

        generator
            .generate(0, &mut field, &grid, &mut account, &mut rng)
            .unwrap();
        assert_eq!(field.food_at(Position::new(1, 0)), 3);
    }
}
