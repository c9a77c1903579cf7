//! Whole-run properties of the Forage simulation.
//!
//! These tests drive complete runs through the public API and check the
//! invariants that must hold after every tick.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;

use forage_core::runner::{HistoryRecorder, TickCallback, run_to_end};
use forage_core::simulation::{Simulation, TickOutcome};
use forage_core::SimulationConfig;
use forage_types::{Position, SimulationEndReason, TickSnapshot};

/// Checks per-tick invariants against the live state.
#[derive(Default)]
struct InvariantChecker {
    previous: Option<TickSnapshot>,
    ticks: u64,
    deposit_seen_known: bool,
}

impl TickCallback for InvariantChecker {
    fn on_tick(&mut self, snap: &TickSnapshot, sim: &Simulation) {
        let state = sim.state();

        // No two agents share a cell.
        let cells: BTreeSet<Position> = snap.agents.iter().map(|a| a.position).collect();
        assert_eq!(cells.len(), snap.agents.len(), "collision at step {}", snap.step);

        // Food conservation.
        let carried = u64::try_from(snap.carried_count()).unwrap();
        assert_eq!(
            state.field.total_food() + carried,
            u64::from(snap.food_generated - snap.food_deposited),
            "conservation broken at step {}",
            snap.step
        );

        // Budget and completion.
        assert!(snap.food_generated <= sim.food_budget());
        assert_eq!(snap.completed, snap.food_deposited == sim.food_budget());

        // Known food cells always hold food.
        for cell in state.ledger.known_food_cells() {
            assert!(
                state.field.food_at(cell) > 0,
                "stale sighting {cell} at step {}",
                snap.step
            );
        }

        // The deposit never holds food.
        assert!(!snap.food.contains(&snap.deposit_cell));

        // Deposit latch is one-way.
        if self.deposit_seen_known {
            assert!(state.ledger.deposit_known());
        }
        self.deposit_seen_known = state.ledger.deposit_known();

        if let Some(prev) = &self.previous {
            assert_eq!(snap.step, prev.step + 1);
            assert!(snap.food_generated >= prev.food_generated);
            assert!(snap.food_deposited >= prev.food_deposited);
            if prev.completed {
                assert!(snap.completed);
            }
            // Single-step moves only.
            for (before, after) in prev.agents.iter().zip(&snap.agents) {
                assert_eq!(before.id, after.id);
                assert!(
                    before.position == after.position
                        || before.position.is_adjacent(after.position),
                    "agent {} jumped from {} to {}",
                    after.id,
                    before.position,
                    after.position
                );
            }
        }

        self.ticks += 1;
        self.previous = Some(snap.clone());
    }
}

#[test]
fn invariants_hold_for_every_tick() {
    for seed in [1, 7, 12345, 99_999] {
        let mut config = SimulationConfig::default();
        config.world.seed = seed;
        let mut sim = Simulation::new(&config).unwrap();
        let mut checker = InvariantChecker::default();

        let report = run_to_end(&mut sim, &mut checker).unwrap();
        assert_eq!(checker.ticks, report.steps);
    }
}

#[test]
fn reference_scenario_completes_within_budget() {
    let config = SimulationConfig::default();
    let mut sim = Simulation::new(&config).unwrap();
    let report = run_to_end(&mut sim, &mut InvariantChecker::default()).unwrap();

    assert_eq!(report.end_reason, SimulationEndReason::Completed);
    assert!(report.steps < 1500);
    assert_eq!(report.food_generated, 47);
    assert_eq!(report.food_deposited, 47);
    assert!(report.final_snapshot.completed);
    assert!(report.final_snapshot.food.is_empty());
    assert_eq!(report.final_snapshot.carried_count(), 0);
}

#[test]
fn same_seed_same_run() {
    let mut config = SimulationConfig::default();
    config.simulation.max_steps = 300;

    let mut first = HistoryRecorder::new();
    run_to_end(&mut Simulation::new(&config).unwrap(), &mut first).unwrap();
    let mut second = HistoryRecorder::new();
    run_to_end(&mut Simulation::new(&config).unwrap(), &mut second).unwrap();

    assert_eq!(first.len(), second.len());
    assert!(first.snapshots().eq(second.snapshots()));
}

#[test]
fn tick_zero_has_no_food() {
    let sim = Simulation::new(&SimulationConfig::default()).unwrap();
    assert_eq!(sim.current_step(), 0);
    assert_eq!(sim.food_generated(), 0);
    assert_eq!(sim.state().field.total_food(), 0);
    assert!(sim.snapshot().food.is_empty());
}

#[test]
fn completed_run_refuses_to_advance() {
    let mut sim = Simulation::new(&SimulationConfig::default()).unwrap();
    run_to_end(&mut sim, &mut InvariantChecker::default()).unwrap();
    let step = sim.current_step();
    let before = sim.snapshot();

    let outcome = sim.advance_one_tick().unwrap();
    assert!(matches!(outcome, TickOutcome::Finished(_)));
    assert_eq!(sim.current_step(), step);
    assert_eq!(sim.snapshot(), before);
}

#[test]
fn generation_follows_the_schedule() {
    let mut config = SimulationConfig::default();
    config.simulation.max_steps = 60;
    let mut sim = Simulation::new(&config).unwrap();
    let mut recorder = HistoryRecorder::new();
    run_to_end(&mut sim, &mut recorder).unwrap();

    let mut previous = 0;
    for snap in recorder.snapshots() {
        // Snapshot `step` follows tick `step - 1`.
        let tick = snap.step - 1;
        if tick % 5 == 0 && previous < 47 {
            let batch = snap.food_generated - previous;
            assert!((2..=5).contains(&batch) || snap.food_generated == 47);
        } else {
            assert_eq!(snap.food_generated, previous, "off-schedule food at tick {tick}");
        }
        previous = snap.food_generated;
    }
}

#[test]
fn single_agent_still_makes_progress() {
    let mut config = SimulationConfig::default();
    config.population.agents = 1;
    config.food.budget = 5;
    config.simulation.max_steps = 400;
    let mut sim = Simulation::new(&config).unwrap();

    let report = run_to_end(&mut sim, &mut InvariantChecker::default()).unwrap();
    assert_eq!(report.food_generated, 5);
    assert!(report.steps <= 400);
}
