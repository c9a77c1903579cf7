//! The per-tick decision rule.
//!
//! [`decide`] is a pure function of a [`Perception`]. It never touches the
//! world: it returns the effects the agent wants applied to its own cell,
//! a movement plan, and the state the agent will be in once resolution
//! has applied them.
//!
//! The rule runs in three steps:
//!
//! 1. **Observe** the cell underfoot. Standing on an undiscovered deposit
//!    reveals it. Food is reported to the shared ledger and, if the agent
//!    has free hands, picked up. A carried unit is delivered on the deposit.
//! 2. **Target** from the post-observation state: deposit when carrying,
//!    nearest known food when not, then the home corner if a rally is
//!    pending.
//! 3. **Plan** a greedy step toward the target, or a random walk.

use serde::Serialize;

use forage_types::{Behavior, CellReading, Perception, Position};

use crate::movement::greedy_candidates;

/// A change the agent asks resolution to make at its own cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Latch the deposit as found in the shared ledger.
    RevealDeposit,
    /// Add the cell to the shared known-food set.
    RecordSighting,
    /// Take one unit from the cell.
    PickUp,
    /// Hand the carried unit to the deposit.
    Deliver,
    /// Remove the cell from the known-food set if it is empty.
    ClearSighting,
}

/// How the agent intends to move this tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MovePlan {
    /// Step toward `target`, trying `candidates` in order.
    ///
    /// If every candidate is taken at resolution time the agent falls back
    /// to a random walk.
    Toward {
        /// The cell being approached.
        target: Position,
        /// Neighbouring cells to try, best first.
        candidates: Vec<Position>,
    },
    /// Step to a uniformly chosen empty neighbour.
    Wander,
}

/// Everything an agent decided for one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// The cell the effects apply to.
    pub at: Position,
    /// Effects to apply, in order.
    pub effects: Vec<Effect>,
    /// Movement intention.
    pub plan: MovePlan,
    /// Behaviour the agent settled on.
    pub behavior: Behavior,
    /// Whether the agent will be holding food after the effects.
    pub carrying: bool,
    /// Rally waypoint after this tick.
    pub rally: Option<Position>,
}

impl Decision {
    /// Whether the decision includes `effect`.
    pub fn has_effect(&self, effect: Effect) -> bool {
        self.effects.contains(&effect)
    }
}

/// Decide what an agent does this tick.
pub fn decide(p: &Perception) -> Decision {
    let mut effects = Vec::new();
    let mut carrying = p.carrying;
    let mut rally = p.rally;
    let mut deposit = p.known_deposit;

    // Observe.
    if deposit.is_none() && p.cell.is_deposit() {
        effects.push(Effect::RevealDeposit);
        deposit = Some(p.position);
    }
    match p.cell {
        CellReading::Food(n) if n > 0 => {
            effects.push(Effect::RecordSighting);
            if !carrying {
                effects.push(Effect::PickUp);
                carrying = true;
                if n == 1 {
                    effects.push(Effect::ClearSighting);
                }
            }
        }
        CellReading::Food(_) => effects.push(Effect::ClearSighting),
        CellReading::Deposit => {
            if carrying {
                effects.push(Effect::Deliver);
                carrying = false;
                rally = Some(p.home_corner);
            }
        }
    }

    // A stale nearest-food entry for this very cell is useless once the
    // cell has been emptied or the agent's hands are full.
    let nearest_food = p.nearest_known_food.filter(|&cell| cell != p.position);

    // Target.
    if rally == Some(p.position) {
        rally = None;
    }
    let (target, behavior) = match (carrying, deposit, nearest_food, rally) {
        (true, Some(dep), _, _) => (Some(dep), Behavior::Returning),
        (false, _, Some(food), _) => (Some(food), Behavior::Seeking),
        (_, _, _, Some(home)) => (Some(home), Behavior::Rallying),
        _ if p.position == p.home_corner => (None, Behavior::AtHome),
        _ => (None, Behavior::Wander),
    };

    // Plan.
    let plan = target.map_or(MovePlan::Wander, |target| MovePlan::Toward {
        target,
        candidates: greedy_candidates(p.position, target),
    });

    Decision {
        at: p.position,
        effects,
        plan,
        behavior,
        carrying,
        rally,
    }
}
