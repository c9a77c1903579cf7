//! Tick cycle: the phase loop that drives the Forage simulation.
//!
//! Each tick runs through these phases:
//!
//! 1. **Perception** -- assemble a [`Perception`] for every agent from the
//!    start-of-tick state. All agents see the same snapshot.
//!
//! 2. **Decision** -- run each agent's role rule on its perception. This
//!    is pure: nothing in the world changes.
//!
//! 3. **Resolution** -- in ascending agent id, apply each agent's effects
//!    to the field, ledger, and accounts, then resolve its move against the
//!    live grid. Lower ids win contested cells.
//!
//! 4. **Generation** -- drop food if this is a generation tick.
//!
//! 5. **Audit** -- verify food conservation and the agent/grid mirror.
//!
//! The tick number is the step count before the tick runs, so the very
//! first tick is tick 0 and generates food.
//!
//! The cycle is deterministic given the same initial state and RNG seed.
//!
//! [`Perception`]: forage_types::Perception

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use forage_agents::movement::resolve_step;
use forage_agents::{Agent, AgentError, Decision, Effect};
use forage_ledger::conservation::{ConservationResult, verify_conservation};
use forage_ledger::{DiscoveryLedger, FoodAccount, FoodAnomaly, LedgerError};
use forage_types::{AgentId, Perception, Position};
use forage_world::{FoodField, Grid, GridBounds, WorldError};

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::generator::{FoodGenerator, GenerationReport};
use crate::perception::assemble_perception;
use crate::spawn::spawn_agents;

/// Errors that can occur during tick execution.
///
/// Every variant is an invariant violation. The run cannot continue past
/// one.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A world operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// A food account update failed.
    #[error("ledger error: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: LedgerError,
    },

    /// An agent state change failed.
    #[error("agent error for {agent_id}: {source}")]
    Agent {
        /// The agent that caused the error.
        agent_id: AgentId,
        /// The underlying agent error.
        source: AgentError,
    },

    /// A decision referred to an agent that does not exist.
    #[error("agent {0} not found")]
    AgentMissing(AgentId),

    /// An agent's recorded position disagrees with the grid.
    #[error("agent {agent_id} records {recorded} but the grid has {on_grid:?}")]
    PositionMismatch {
        /// The agent.
        agent_id: AgentId,
        /// Position stored on the agent.
        recorded: Position,
        /// Position stored on the grid.
        on_grid: Option<Position>,
    },

    /// Food was created or destroyed outside generation and delivery.
    #[error("conservation violated: {anomaly}")]
    Conservation {
        /// The anomaly report.
        anomaly: FoodAnomaly,
    },

    /// The step counter overflowed.
    #[error("step counter overflow")]
    StepOverflow,
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Food units picked up this tick.
    pub pickups: u32,
    /// Food units delivered this tick.
    pub deliveries: u32,
    /// Whether the deposit was found this tick.
    pub deposit_discovered: bool,
    /// Agents that could not move this tick.
    pub stayed: u32,
    /// Food placed by the generator.
    pub generation: GenerationReport,
}

/// The mutable simulation state passed through the tick cycle.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Agent occupancy.
    pub grid: Grid,
    /// Food counts and the deposit.
    pub field: FoodField,
    /// Shared discovery ledger.
    pub ledger: DiscoveryLedger,
    /// Generated and deposited totals.
    pub account: FoodAccount,
    /// Agents by id.
    pub agents: BTreeMap<AgentId, Agent>,
    /// Food schedule.
    pub generator: FoodGenerator,
    /// The run's only source of randomness.
    pub rng: StdRng,
    /// Ticks executed so far.
    pub step: u64,
}

impl SimulationState {
    /// Build the initial state from configuration.
    ///
    /// The deposit is drawn from the seeded RNG before anything else, so
    /// the same seed always hides it in the same place. It may share a
    /// cell with a spawn point.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError`] if the configuration is invalid or the
    /// fleet cannot be placed.
    pub fn new(config: &SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let bounds = GridBounds::new(config.world.width, config.world.height)?;
        let mut rng = StdRng::seed_from_u64(config.world.seed);
        let deposit = random_cell(bounds, &mut rng)?;
        Self::build(config, bounds, deposit, rng)
    }

    /// Build the initial state with the deposit at a chosen cell.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError`] if the configuration is invalid, the
    /// deposit is off the grid, or the fleet cannot be placed.
    pub fn with_deposit(
        config: &SimulationConfig,
        deposit: Position,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let bounds = GridBounds::new(config.world.width, config.world.height)?;
        let rng = StdRng::seed_from_u64(config.world.seed);
        Self::build(config, bounds, deposit, rng)
    }

    fn build(
        config: &SimulationConfig,
        bounds: GridBounds,
        deposit: Position,
        rng: StdRng,
    ) -> Result<Self, SimulationError> {
        let field = FoodField::new(bounds, deposit)?;
        let mut grid = Grid::new(bounds);
        let mut agents = BTreeMap::new();
        for agent in spawn_agents(config.population.agents, bounds)? {
            grid.place(agent.id(), agent.position())?;
            agents.insert(agent.id(), agent);
        }

        info!(
            width = bounds.width(),
            height = bounds.height(),
            agents = agents.len(),
            %deposit,
            budget = config.food.budget,
            seed = config.world.seed,
            "Simulation state initialized"
        );

        Ok(Self {
            grid,
            field,
            ledger: DiscoveryLedger::new(deposit),
            account: FoodAccount::new(config.food.budget),
            agents,
            generator: FoodGenerator::new(&config.food),
            rng,
            step: 0,
        })
    }

    /// Number of agents currently holding food.
    pub fn carried_count(&self) -> u64 {
        let carrying = self.agents.values().filter(|a| a.carrying()).count();
        u64::try_from(carrying).unwrap_or(u64::MAX)
    }
}

/// Draw a uniformly random cell of the grid.
fn random_cell(bounds: GridBounds, rng: &mut impl Rng) -> Result<Position, WorldError> {
    let width = i32::try_from(bounds.width()).map_err(|_| WorldError::ArithmeticOverflow)?;
    let height = i32::try_from(bounds.height()).map_err(|_| WorldError::ArithmeticOverflow)?;
    Ok(Position::new(
        rng.random_range(0..width),
        rng.random_range(0..height),
    ))
}

/// Execute one complete tick of the simulation.
///
/// Runs every phase in sequence and advances the step counter. On error
/// the state is left partially updated; callers must not run further
/// ticks on it.
///
/// # Errors
///
/// Returns [`TickError`] on any invariant violation.
pub fn run_tick(state: &mut SimulationState) -> Result<TickSummary, TickError> {
    let tick = state.step;
    debug!(tick, "Tick started");

    // --- Phase 1: Perception ---
    let perceptions = phase_perception(state, tick)?;

    // --- Phase 2: Decision ---
    let decisions = phase_decision(state, &perceptions);

    // --- Phase 3: Resolution ---
    let mut summary = phase_resolution(state, tick, &decisions)?;

    // --- Phase 4: Generation ---
    summary.generation = state.generator.generate(
        tick,
        &mut state.field,
        &state.grid,
        &mut state.account,
        &mut state.rng,
    )?;

    // --- Phase 5: Audit ---
    phase_audit(state, tick)?;

    state.step = state.step.checked_add(1).ok_or(TickError::StepOverflow)?;
    debug!(
        tick,
        pickups = summary.pickups,
        deliveries = summary.deliveries,
        generated = state.account.generated(),
        deposited = state.account.deposited(),
        "Tick complete"
    );
    Ok(summary)
}

/// Phase 1: Perception.
///
/// Builds every perception before any agent acts.
fn phase_perception(
    state: &SimulationState,
    tick: u64,
) -> Result<BTreeMap<AgentId, Perception>, TickError> {
    let mut perceptions = BTreeMap::new();
    for (&agent_id, agent) in &state.agents {
        let p = assemble_perception(tick, agent, &state.field, &state.ledger)?;
        perceptions.insert(agent_id, p);
    }
    Ok(perceptions)
}

/// Phase 2: Decision.
fn phase_decision(
    state: &SimulationState,
    perceptions: &BTreeMap<AgentId, Perception>,
) -> BTreeMap<AgentId, Decision> {
    let mut decisions = BTreeMap::new();
    for (&agent_id, perception) in perceptions {
        let Some(agent) = state.agents.get(&agent_id) else {
            continue;
        };
        let decision = agent.role().decide(perception);
        debug!(
            tick = perception.tick,
            agent = %agent_id,
            behavior = ?decision.behavior,
            effects = ?decision.effects,
            "Agent decided"
        );
        decisions.insert(agent_id, decision);
    }
    decisions
}

/// Phase 3: Resolution.
///
/// Applies effects and moves one agent at a time in ascending id order.
/// Each move sees the grid as left by the agents before it.
fn phase_resolution(
    state: &mut SimulationState,
    tick: u64,
    decisions: &BTreeMap<AgentId, Decision>,
) -> Result<TickSummary, TickError> {
    let mut summary = TickSummary {
        tick,
        ..TickSummary::default()
    };

    for (&agent_id, decision) in decisions {
        let agent = state
            .agents
            .get_mut(&agent_id)
            .ok_or(TickError::AgentMissing(agent_id))?;
        let at = agent.position();

        for effect in &decision.effects {
            match effect {
                Effect::RevealDeposit => {
                    if state.ledger.mark_deposit_found() {
                        summary.deposit_discovered = true;
                    }
                }
                Effect::RecordSighting => {
                    state.ledger.record_food_sighting(at, &state.field);
                }
                Effect::PickUp => {
                    agent
                        .pick_up()
                        .map_err(|source| TickError::Agent { agent_id, source })?;
                    state.field.decrement(at)?;
                    summary.pickups = summary.pickups.saturating_add(1);
                }
                Effect::Deliver => {
                    agent
                        .deliver()
                        .map_err(|source| TickError::Agent { agent_id, source })?;
                    let deposited = state.account.record_deposited()?;
                    summary.deliveries = summary.deliveries.saturating_add(1);
                    info!(tick, agent = %agent_id, deposited, "Food delivered");
                }
                Effect::ClearSighting => {
                    state.ledger.clear_food_sighting(at, &state.field);
                }
            }
        }
        agent.settle(decision);

        match resolve_step(agent_id, &decision.plan, &state.grid, at, &mut state.rng) {
            Some(to) => {
                state.grid.move_agent(agent_id, to)?;
                agent.relocate(to);
            }
            None => summary.stayed = summary.stayed.saturating_add(1),
        }
    }

    Ok(summary)
}

/// Phase 5: Audit.
fn phase_audit(state: &SimulationState, tick: u64) -> Result<(), TickError> {
    for (&agent_id, agent) in &state.agents {
        let on_grid = state.grid.position_of(agent_id);
        if on_grid != Some(agent.position()) {
            return Err(TickError::PositionMismatch {
                agent_id,
                recorded: agent.position(),
                on_grid,
            });
        }
    }

    match verify_conservation(
        tick,
        &state.account,
        state.field.total_food(),
        state.carried_count(),
    ) {
        ConservationResult::Balanced => Ok(()),
        ConservationResult::Anomaly(anomaly) => Err(TickError::Conservation { anomaly }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use forage_types::Behavior;

    use super::*;

    /// Default config with generation pushed far into the future.
    fn quiet_config() -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.food.interval = 1_000_000;
        config
    }

    fn quiet_state(deposit: Position) -> SimulationState {
        let mut state = SimulationState::with_deposit(&quiet_config(), deposit).unwrap();
        // Skip tick 0 so the generator stays idle.
        state.step = 1;
        state
    }

    #[test]
    fn initial_state_is_empty_of_food() {
        let state = SimulationState::new(&SimulationConfig::default()).unwrap();
        assert_eq!(state.step, 0);
        assert_eq!(state.account.generated(), 0);
        assert_eq!(state.field.total_food(), 0);
        assert_eq!(state.agents.len(), 5);
        assert_eq!(state.grid.agent_count(), 5);
    }

    #[test]
    fn same_seed_hides_deposit_in_same_cell() {
        let a = SimulationState::new(&SimulationConfig::default()).unwrap();
        let b = SimulationState::new(&SimulationConfig::default()).unwrap();
        assert_eq!(a.field.deposit(), b.field.deposit());
    }

    #[test]
    fn first_tick_generates_food() {
        let mut state = SimulationState::new(&SimulationConfig::default()).unwrap();
        let summary = run_tick(&mut state).unwrap();
        assert_eq!(summary.tick, 0);
        assert!(!summary.generation.placed.is_empty());
        assert_eq!(state.step, 1);
    }

    #[test]
    fn single_unit_pickup_clears_sighting_in_same_tick() {
        let mut state = quiet_state(Position::new(15, 15));
        let cell = Position::new(0, 0);
        state.field.increment(cell).unwrap();
        state.account.record_generated(1).unwrap();

        run_tick(&mut state).unwrap();

        let agent = state.agents.get(&AgentId::new(0)).unwrap();
        assert!(agent.carrying());
        assert_eq!(state.field.food_at(cell), 0);
        assert!(!state.ledger.is_known_food(cell));
        assert_eq!(state.ledger.known_food_cells().len(), 0);
    }

    #[test]
    fn stacked_food_stays_known_after_pickup() {
        let mut state = quiet_state(Position::new(15, 15));
        let cell = Position::new(0, 0);
        state.field.increment(cell).unwrap();
        state.field.increment(cell).unwrap();
        state.account.record_generated(2).unwrap();

        run_tick(&mut state).unwrap();

        assert_eq!(state.field.food_at(cell), 1);
        assert!(state.ledger.is_known_food(cell));
    }

    #[test]
    fn agent_on_hidden_deposit_reveals_it() {
        // Agent 0 spawns on (0, 0).
        let mut state = quiet_state(Position::new(0, 0));
        let summary = run_tick(&mut state).unwrap();
        assert!(summary.deposit_discovered);
        assert_eq!(state.ledger.deposit_if_known(), Some(Position::new(0, 0)));
    }

    #[test]
    fn delivery_updates_account_and_sets_rally() {
        let deposit = Position::new(10, 10);
        let mut state = quiet_state(deposit);
        state.ledger.mark_deposit_found();
        // Agent 4 spawns on the centre cell, which is the deposit.
        state.account.record_generated(1).unwrap();
        state.agents.get_mut(&AgentId::new(4)).unwrap().pick_up().unwrap();

        let summary = run_tick(&mut state).unwrap();

        assert_eq!(summary.deliveries, 1);
        assert_eq!(state.account.deposited(), 1);
        let agent = state.agents.get(&AgentId::new(4)).unwrap();
        assert!(!agent.carrying());
        // Home corner is the deposit cell itself, so the rally clears at once.
        assert_eq!(agent.rally(), None);
        assert_eq!(agent.behavior(), Behavior::AtHome);
    }

    #[test]
    fn lower_id_wins_contested_cell() {
        let mut config = quiet_config();
        config.population.agents = 2;
        config.world.width = 3;
        config.world.height = 3;
        // Spawns: agent 0 at (0, 0), agent 1 at (0, 2).
        let mut state = SimulationState::with_deposit(&config, Position::new(2, 2)).unwrap();
        state.step = 1;
        state.field.increment(Position::new(1, 1)).unwrap();
        state.account.record_generated(1).unwrap();
        state.ledger.record_food_sighting(Position::new(1, 1), &state.field);

        run_tick(&mut state).unwrap();

        assert_eq!(
            state.grid.occupant(Position::new(1, 1)),
            Some(AgentId::new(0))
        );
        let second = state.grid.position_of(AgentId::new(1)).unwrap();
        assert_ne!(second, Position::new(1, 1));
    }

    #[test]
    fn conservation_anomaly_aborts_tick() {
        let mut state = quiet_state(Position::new(15, 15));
        // Food appears on the field without passing through the account.
        state.field.increment(Position::new(7, 7)).unwrap();

        let result = run_tick(&mut state);
        assert!(matches!(result, Err(TickError::Conservation { .. })));
    }

    #[test]
    fn carrying_agent_picks_up_nothing() {
        let mut state = quiet_state(Position::new(15, 15));
        let cell = Position::new(0, 0);
        state.field.increment(cell).unwrap();
        state.account.record_generated(2).unwrap();
        state.agents.get_mut(&AgentId::new(0)).unwrap().pick_up().unwrap();

        run_tick(&mut state).unwrap();

        assert_eq!(state.field.food_at(cell), 1);
        assert!(state.ledger.is_known_food(cell));
    }
}
