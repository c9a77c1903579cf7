//! Enumeration types for the Forage simulation.

use serde::{Deserialize, Serialize};

/// Raw value used for the deposit cell in grid dumps.
///
/// Inside the engine the deposit is a dedicated [`CellReading`] variant;
/// the sentinel only appears when a field is flattened into numbers for
/// external consumers.
pub const DEPOSIT_SENTINEL: i64 = -1;

// ---------------------------------------------------------------------------
// Cell contents
// ---------------------------------------------------------------------------

/// What an agent reads when it observes a single cell of the food field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellReading {
    /// The cell is the deposit. It never holds food.
    Deposit,
    /// The cell holds this many food units (possibly zero).
    Food(u32),
}

impl CellReading {
    /// Number of food units in the cell. The deposit holds none.
    pub const fn food(self) -> u32 {
        match self {
            Self::Deposit => 0,
            Self::Food(n) => n,
        }
    }

    /// Whether this is the deposit cell.
    pub const fn is_deposit(self) -> bool {
        matches!(self, Self::Deposit)
    }

    /// Flattened numeric value: the food count, or [`DEPOSIT_SENTINEL`].
    pub fn raw(self) -> i64 {
        match self {
            Self::Deposit => DEPOSIT_SENTINEL,
            Self::Food(n) => i64::from(n),
        }
    }
}

// ---------------------------------------------------------------------------
// Agent behaviour
// ---------------------------------------------------------------------------

/// The behaviour an agent settled on during its last decision.
///
/// Behaviour is recomputed every tick from the agent's carrying flag, its
/// rally waypoint, and the shared discovery ledger. It is reported in
/// snapshots but never fed back into the next decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    /// No target known; random walk.
    #[default]
    Wander,
    /// Moving toward the nearest known food cell, hands empty.
    Seeking,
    /// Carrying food toward the known deposit.
    Returning,
    /// Walking back to the home corner after a delivery.
    Rallying,
    /// Standing on the home corner with nothing to fetch; random walk.
    AtHome,
}

// ---------------------------------------------------------------------------
// Run termination
// ---------------------------------------------------------------------------

/// Why a simulation run refuses to advance further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationEndReason {
    /// Every unit of the food budget has been deposited.
    Completed,
    /// The configured step budget has been used up.
    StepBudgetExhausted,
}

impl core::fmt::Display for SimulationEndReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::StepBudgetExhausted => write!(f, "step budget exhausted"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn deposit_reads_as_sentinel() {
        assert_eq!(CellReading::Deposit.raw(), DEPOSIT_SENTINEL);
        assert_eq!(CellReading::Deposit.food(), 0);
        assert!(CellReading::Deposit.is_deposit());
        assert_eq!(CellReading::Food(3).raw(), 3);
        assert!(!CellReading::Food(0).is_deposit());
    }

    #[test]
    fn behavior_uses_snake_case() {
        let json = serde_json::to_string(&Behavior::AtHome).unwrap();
        assert_eq!(json, "\"at_home\"");
    }
}
