//! Single-occupancy agent grid.
//!
//! The [`Grid`] is the only structure allowed to change where an agent
//! stands. It keeps two views in lockstep: a cell array answering "who is
//! here?" and a map answering "where is this agent?". Every mutation
//! updates both or neither.

use std::collections::BTreeMap;

use forage_types::{AgentId, Position};
use tracing::trace;

use crate::bounds::GridBounds;
use crate::error::WorldError;

/// A fixed-size grid on which each cell holds at most one agent.
#[derive(Debug, Clone)]
pub struct Grid {
    bounds: GridBounds,
    /// Occupant per cell, x-major.
    cells: Vec<Option<AgentId>>,
    /// Reverse index: agent -> cell.
    positions: BTreeMap<AgentId, Position>,
}

impl Grid {
    /// Create an empty grid with the given bounds.
    pub fn new(bounds: GridBounds) -> Self {
        Self {
            bounds,
            cells: vec![None; bounds.cell_count()],
            positions: BTreeMap::new(),
        }
    }

    /// The grid's dimensions.
    pub const fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Whether `pos` is on the grid and holds no agent.
    ///
    /// Off-grid positions are never empty, so callers can feed raw
    /// candidate positions straight into this check.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.bounds
            .index(pos)
            .and_then(|idx| self.cells.get(idx))
            .is_some_and(Option::is_none)
    }

    /// The agent standing on `pos`, if any.
    pub fn occupant(&self, pos: Position) -> Option<AgentId> {
        self.bounds
            .index(pos)
            .and_then(|idx| self.cells.get(idx))
            .copied()
            .flatten()
    }

    /// Where `agent` stands, if it has been placed.
    pub fn position_of(&self, agent: AgentId) -> Option<Position> {
        self.positions.get(&agent).copied()
    }

    /// Number of agents on the grid.
    pub fn agent_count(&self) -> usize {
        self.positions.len()
    }

    /// All placed agents with their positions, in ascending id order.
    pub fn agents(&self) -> impl Iterator<Item = (AgentId, Position)> + '_ {
        self.positions.iter().map(|(&id, &pos)| (id, pos))
    }

    /// Put `agent` on the grid at `pos`.
    ///
    /// # Errors
    ///
    /// - [`WorldError::AgentAlreadyPlaced`] if the agent is already on the grid.
    /// - [`WorldError::OutOfBounds`] if `pos` is off the grid.
    /// - [`WorldError::CellOccupied`] if another agent stands on `pos`.
    pub fn place(&mut self, agent: AgentId, pos: Position) -> Result<(), WorldError> {
        if self.positions.contains_key(&agent) {
            return Err(WorldError::AgentAlreadyPlaced(agent));
        }
        let idx = self.claim(pos)?;
        if let Some(slot) = self.cells.get_mut(idx) {
            *slot = Some(agent);
        }
        self.positions.insert(agent, pos);
        trace!(%agent, %pos, "Agent placed");
        Ok(())
    }

    /// Relocate `agent` to `to`.
    ///
    /// Adjacency is not checked here; the tick driver only requests moves
    /// into the agent's Moore neighbourhood.
    ///
    /// # Errors
    ///
    /// - [`WorldError::AgentNotPlaced`] if the agent is not on the grid.
    /// - [`WorldError::OutOfBounds`] if `to` is off the grid.
    /// - [`WorldError::CellOccupied`] if another agent stands on `to`.
    pub fn move_agent(&mut self, agent: AgentId, to: Position) -> Result<(), WorldError> {
        let from = self
            .positions
            .get(&agent)
            .copied()
            .ok_or(WorldError::AgentNotPlaced(agent))?;
        let to_idx = self.claim(to)?;
        let from_idx = self.bounds.require(from)?;

        if let Some(slot) = self.cells.get_mut(from_idx) {
            *slot = None;
        }
        if let Some(slot) = self.cells.get_mut(to_idx) {
            *slot = Some(agent);
        }
        self.positions.insert(agent, to);
        trace!(%agent, %from, %to, "Agent moved");
        Ok(())
    }

    /// The Moore neighbourhood of `pos`, clipped to the grid.
    pub fn neighbors8(&self, pos: Position) -> Vec<Position> {
        self.bounds.neighbors8(pos)
    }

    /// The empty cells in the Moore neighbourhood of `pos`.
    pub fn empty_neighbors8(&self, pos: Position) -> Vec<Position> {
        self.bounds
            .neighbors8(pos)
            .into_iter()
            .filter(|p| self.is_empty(*p))
            .collect()
    }

    /// Check that `pos` can receive an agent and return its index.
    fn claim(&self, pos: Position) -> Result<usize, WorldError> {
        let idx = self.bounds.require(pos)?;
        match self.cells.get(idx).copied().flatten() {
            Some(occupant) => Err(WorldError::CellOccupied {
                position: pos,
                occupant,
            }),
            None => Ok(idx),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(GridBounds::new(20, 20).unwrap())
    }

    #[test]
    fn place_marks_cell_occupied() {
        let mut g = grid();
        let a = AgentId::new(0);
        let pos = Position::new(3, 4);

        assert!(g.is_empty(pos));
        g.place(a, pos).unwrap();
        assert!(!g.is_empty(pos));
        assert_eq!(g.occupant(pos), Some(a));
        assert_eq!(g.position_of(a), Some(pos));
    }

    #[test]
    fn place_rejects_occupied_cell() {
        let mut g = grid();
        let pos = Position::new(0, 0);
        g.place(AgentId::new(0), pos).unwrap();

        let result = g.place(AgentId::new(1), pos);
        assert!(matches!(
            result,
            Err(WorldError::CellOccupied { occupant, .. }) if occupant == AgentId::new(0)
        ));
        assert_eq!(g.agent_count(), 1);
    }

    #[test]
    fn place_rejects_second_placement_of_same_agent() {
        let mut g = grid();
        let a = AgentId::new(0);
        g.place(a, Position::new(0, 0)).unwrap();
        assert!(matches!(
            g.place(a, Position::new(1, 1)),
            Err(WorldError::AgentAlreadyPlaced(_))
        ));
    }

    #[test]
    fn move_frees_origin_and_fills_destination() {
        let mut g = grid();
        let a = AgentId::new(0);
        g.place(a, Position::new(5, 5)).unwrap();
        g.move_agent(a, Position::new(6, 6)).unwrap();

        assert!(g.is_empty(Position::new(5, 5)));
        assert_eq!(g.occupant(Position::new(6, 6)), Some(a));
        assert_eq!(g.position_of(a), Some(Position::new(6, 6)));
    }

    #[test]
    fn move_into_occupied_cell_leaves_grid_unchanged() {
        let mut g = grid();
        let a = AgentId::new(0);
        let b = AgentId::new(1);
        g.place(a, Position::new(5, 5)).unwrap();
        g.place(b, Position::new(6, 5)).unwrap();

        assert!(g.move_agent(a, Position::new(6, 5)).is_err());
        assert_eq!(g.position_of(a), Some(Position::new(5, 5)));
        assert_eq!(g.occupant(Position::new(6, 5)), Some(b));
    }

    #[test]
    fn move_of_unknown_agent_fails() {
        let mut g = grid();
        assert!(matches!(
            g.move_agent(AgentId::new(9), Position::new(1, 1)),
            Err(WorldError::AgentNotPlaced(_))
        ));
    }

    #[test]
    fn off_grid_is_never_empty() {
        let g = grid();
        assert!(!g.is_empty(Position::new(-1, 3)));
        assert!(!g.is_empty(Position::new(20, 3)));
    }

    #[test]
    fn empty_neighbours_skip_occupied_cells() {
        let mut g = grid();
        g.place(AgentId::new(0), Position::new(0, 0)).unwrap();
        g.place(AgentId::new(1), Position::new(1, 1)).unwrap();

        let empty = g.empty_neighbors8(Position::new(0, 0));
        assert_eq!(empty, vec![Position::new(0, 1), Position::new(1, 0)]);
    }

    #[test]
    fn agents_iterate_in_id_order() {
        let mut g = grid();
        g.place(AgentId::new(2), Position::new(2, 2)).unwrap();
        g.place(AgentId::new(0), Position::new(0, 0)).unwrap();
        g.place(AgentId::new(1), Position::new(1, 1)).unwrap();

        let ids: Vec<u32> = g.agents().map(|(id, _)| id.into_inner()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
