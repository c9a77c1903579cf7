//! Initial agent placement.
//!
//! Agents start in the four corners and the centre of the grid, in that
//! order. Each agent's spawn cell is also its home corner.

use tracing::debug;

use forage_agents::{Agent, AgentRole};
use forage_types::{AgentId, Position};
use forage_world::GridBounds;

/// Errors that can occur when spawning the fleet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpawnError {
    /// More agents were requested than there are spawn points.
    #[error("cannot spawn {requested} agents: only {available} spawn points")]
    TooManyAgents {
        /// Agents requested by the configuration.
        requested: u32,
        /// Spawn points available.
        available: usize,
    },
}

/// The spawn points of a grid, in assignment order.
///
/// On very small grids some of these coincide; placing a second agent on
/// an occupied spawn point fails when the fleet is put on the grid.
pub fn spawn_points(bounds: GridBounds) -> [Position; 5] {
    let max_x = i32::try_from(bounds.width().saturating_sub(1)).unwrap_or(i32::MAX);
    let max_y = i32::try_from(bounds.height().saturating_sub(1)).unwrap_or(i32::MAX);
    let mid_x = i32::try_from(bounds.width().checked_div(2).unwrap_or(0)).unwrap_or(0);
    let mid_y = i32::try_from(bounds.height().checked_div(2).unwrap_or(0)).unwrap_or(0);
    [
        Position::new(0, 0),
        Position::new(0, max_y),
        Position::new(max_x, 0),
        Position::new(max_x, max_y),
        Position::new(mid_x, mid_y),
    ]
}

/// Create `count` generalist agents on the grid's spawn points.
///
/// # Errors
///
/// Returns [`SpawnError::TooManyAgents`] if `count` exceeds the number of
/// spawn points.
pub fn spawn_agents(count: u32, bounds: GridBounds) -> Result<Vec<Agent>, SpawnError> {
    let points = spawn_points(bounds);
    let requested = usize::try_from(count).unwrap_or(usize::MAX);
    if requested > points.len() {
        return Err(SpawnError::TooManyAgents {
            requested: count,
            available: points.len(),
        });
    }

    let agents: Vec<Agent> = (0..count)
        .zip(points)
        .map(|(id, spawn)| {
            let agent = Agent::new(AgentId::new(id), AgentRole::Generalist, spawn);
            debug!(agent = %agent.id(), %spawn, "Agent spawned");
            agent
        })
        .collect();
    Ok(agents)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_spawn_points() {
        let points = spawn_points(GridBounds::new(20, 20).unwrap());
        assert_eq!(
            points,
            [
                Position::new(0, 0),
                Position::new(0, 19),
                Position::new(19, 0),
                Position::new(19, 19),
                Position::new(10, 10),
            ]
        );
    }

    #[test]
    fn agents_take_spawn_points_in_order() {
        let agents = spawn_agents(3, GridBounds::new(20, 20).unwrap()).unwrap();
        assert_eq!(agents.len(), 3);
        let homes: Vec<Position> = agents.iter().map(Agent::home_corner).collect();
        assert_eq!(
            homes,
            vec![Position::new(0, 0), Position::new(0, 19), Position::new(19, 0)]
        );
        assert_eq!(agents.last().map(Agent::id), Some(AgentId::new(2)));
    }

    #[test]
    fn six_agents_is_an_error() {
        let result = spawn_agents(6, GridBounds::new(20, 20).unwrap());
        assert_eq!(
            result,
            Err(SpawnError::TooManyAgents {
                requested: 6,
                available: 5
            })
        );
    }

    #[test]
    fn zero_agents_is_allowed() {
        assert!(spawn_agents(0, GridBounds::new(20, 20).unwrap()).unwrap().is_empty());
    }
}
