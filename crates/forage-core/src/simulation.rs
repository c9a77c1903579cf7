//! The simulation driver.
//!
//! [`Simulation`] owns the state and enforces the run's lifecycle: ticks
//! advance until the food budget has been delivered or the step budget is
//! spent, and a tick that hits an invariant violation poisons the run.

use tracing::{error, info};

use forage_agents::Agent;
use forage_types::{GridDump, Position, SimulationEndReason, TickSnapshot};

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::tick::{self, SimulationState};

/// Result of asking the simulation to advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// One tick ran; this is the state it left behind.
    Advanced(TickSnapshot),
    /// The run is over; nothing changed.
    Finished(SimulationEndReason),
}

/// A complete simulation run.
#[derive(Debug, Clone)]
pub struct Simulation {
    state: SimulationState,
    max_steps: u64,
    completed: bool,
    poisoned: bool,
}

impl Simulation {
    /// Build a simulation from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError`] if the configuration is invalid or the
    /// world cannot be set up.
    pub fn new(config: &SimulationConfig) -> Result<Self, SimulationError> {
        Ok(Self::from_state(
            SimulationState::new(config)?,
            config.simulation.max_steps,
        ))
    }

    /// Build a simulation with the deposit at a chosen cell.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError`] if the configuration is invalid, the
    /// deposit is off the grid, or the world cannot be set up.
    pub fn with_deposit(
        config: &SimulationConfig,
        deposit: Position,
    ) -> Result<Self, SimulationError> {
        Ok(Self::from_state(
            SimulationState::with_deposit(config, deposit)?,
            config.simulation.max_steps,
        ))
    }

    fn from_state(state: SimulationState, max_steps: u64) -> Self {
        let completed = state.account.is_complete();
        Self {
            state,
            max_steps,
            completed,
            poisoned: false,
        }
    }

    /// Run one tick unconditionally and return the resulting snapshot.
    ///
    /// Ignores completion and the step budget; use
    /// [`advance_one_tick`](Self::advance_one_tick) to respect them.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Tick`] if the tick hits an invariant
    /// violation, after which the simulation is poisoned, and
    /// [`SimulationError::Aborted`] for every call on a poisoned run.
    pub fn step(&mut self) -> Result<TickSnapshot, SimulationError> {
        if self.poisoned {
            return Err(SimulationError::Aborted {
                step: self.state.step,
            });
        }

        let tick = self.state.step;
        match tick::run_tick(&mut self.state) {
            Ok(summary) => {
                if !self.completed && self.state.account.is_complete() {
                    self.completed = true;
                    info!(
                        tick = summary.tick,
                        deposited = self.state.account.deposited(),
                        "All food delivered"
                    );
                }
                Ok(self.snapshot())
            }
            Err(source) => {
                self.poisoned = true;
                error!(tick, error = %source, "Tick failed, simulation aborted");
                Err(SimulationError::Tick { tick, source })
            }
        }
    }

    /// Advance one tick unless the run is over.
    ///
    /// # Errors
    ///
    /// Same as [`step`](Self::step).
    pub fn advance_one_tick(&mut self) -> Result<TickOutcome, SimulationError> {
        if self.poisoned {
            return Err(SimulationError::Aborted {
                step: self.state.step,
            });
        }
        if let Some(reason) = self.end_reason() {
            return Ok(TickOutcome::Finished(reason));
        }
        self.step().map(TickOutcome::Advanced)
    }

    /// Why the run will not advance, or `None` if it can.
    pub const fn end_reason(&self) -> Option<SimulationEndReason> {
        if self.completed {
            Some(SimulationEndReason::Completed)
        } else if self.state.step >= self.max_steps {
            Some(SimulationEndReason::StepBudgetExhausted)
        } else {
            None
        }
    }

    /// Whether the whole food budget has been delivered.
    pub const fn is_complete(&self) -> bool {
        self.completed
    }

    /// Whether an earlier tick failed.
    pub const fn is_aborted(&self) -> bool {
        self.poisoned
    }

    /// Ticks executed so far.
    pub const fn current_step(&self) -> u64 {
        self.state.step
    }

    /// The step budget.
    pub const fn max_steps(&self) -> u64 {
        self.max_steps
    }

    /// Food units generated so far.
    pub const fn food_generated(&self) -> u32 {
        self.state.account.generated()
    }

    /// Food units delivered so far.
    pub const fn food_deposited(&self) -> u32 {
        self.state.account.deposited()
    }

    /// Total food units the run will generate.
    pub const fn food_budget(&self) -> u32 {
        self.state.account.budget()
    }

    /// Read-only access to the full state.
    pub const fn state(&self) -> &SimulationState {
        &self.state
    }

    /// The current state as an owned snapshot.
    pub fn snapshot(&self) -> TickSnapshot {
        TickSnapshot {
            step: self.state.step,
            agents: self.state.agents.values().map(Agent::view).collect(),
            food: self.state.field.food_cells(),
            deposit_cell: self.state.field.deposit(),
            food_generated: self.state.account.generated(),
            food_deposited: self.state.account.deposited(),
            completed: self.completed,
        }
    }

    /// Numeric dump of the food layer with an agent overlay.
    pub fn grid_dump(&self) -> GridDump {
        let food = self.state.field.raw_matrix();
        let mut agents = food.clone();
        for (_, pos) in self.state.grid.agents() {
            let cell = usize::try_from(pos.x)
                .ok()
                .zip(usize::try_from(pos.y).ok())
                .and_then(|(x, y)| agents.get_mut(x).and_then(|col| col.get_mut(y)));
            if let Some(value) = cell {
                *value = value.saturating_add(10);
            }
        }
        GridDump { food, agents }
    }
}
