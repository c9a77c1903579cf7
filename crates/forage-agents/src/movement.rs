//! Greedy step planning and move resolution.
//!
//! Movement is a single step into the Moore neighbourhood. A targeted agent
//! lists the cells that close the distance, best first; resolution takes
//! the first one that is still empty on the live grid. Anything else is a
//! random walk over the empty neighbours, and an agent boxed in on all
//! sides stays where it is.

use rand::Rng;
use tracing::debug;

use forage_types::{AgentId, Position};
use forage_world::Grid;

use crate::decision::MovePlan;

/// Cells that step from `from` toward `target`, best first.
///
/// The order is: both axes at once, horizontal only, vertical only.
/// Duplicates and `from` itself are dropped, so an agent level with its
/// target on one axis gets a single candidate, and an agent already on
/// its target gets none.
pub fn greedy_candidates(from: Position, target: Position) -> Vec<Position> {
    let (dx, dy) = from.direction_to(target);
    let steps = [(dx, dy), (dx, 0), (0, dy)];

    let mut candidates: Vec<Position> = Vec::with_capacity(steps.len());
    for (sx, sy) in steps {
        let Some(cell) = from.offset(sx, sy) else {
            continue;
        };
        if cell != from && !candidates.contains(&cell) {
            candidates.push(cell);
        }
    }
    candidates
}

/// Pick a uniformly random empty neighbour of `from`.
pub fn random_step(grid: &Grid, from: Position, rng: &mut impl Rng) -> Option<Position> {
    let empty = grid.empty_neighbors8(from);
    if empty.is_empty() {
        return None;
    }
    let idx: usize = rng.random_range(0..empty.len());
    empty.get(idx).copied()
}

/// Resolve a movement plan against the live grid.
///
/// Returns the cell the agent should move to, or `None` if it stays put.
pub fn resolve_step(
    agent_id: AgentId,
    plan: &MovePlan,
    grid: &Grid,
    from: Position,
    rng: &mut impl Rng,
) -> Option<Position> {
    if let MovePlan::Toward { candidates, target } = plan {
        if let Some(&cell) = candidates.iter().find(|c| grid.is_empty(**c)) {
            return Some(cell);
        }
        debug!(agent = %agent_id, %from, %target, "Greedy step blocked, wandering instead");
    }
    let step = random_step(grid, from, rng);
    if step.is_none() {
        debug!(agent = %agent_id, %from, "No empty neighbour, staying put");
    }
    step
}
