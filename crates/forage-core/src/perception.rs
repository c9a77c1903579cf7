//! Perception assembly for the Perception phase of the tick cycle.
//!
//! Each agent gets a [`Perception`] built from the start-of-tick state:
//! its own record, the contents of the cell it stands on, and what the
//! shared ledger has latched so far. Agents never see food on other cells
//! except through the ledger, and never see the deposit until it is found.

use forage_agents::Agent;
use forage_ledger::DiscoveryLedger;
use forage_types::Perception;
use forage_world::{FoodField, WorldError};

/// Build the perception payload for one agent.
///
/// # Errors
///
/// Returns [`WorldError::OutOfBounds`] if the agent's recorded position is
/// off the grid.
pub fn assemble_perception(
    tick: u64,
    agent: &Agent,
    field: &FoodField,
    ledger: &DiscoveryLedger,
) -> Result<Perception, WorldError> {
    let position = agent.position();
    Ok(Perception {
        tick,
        agent_id: agent.id(),
        position,
        carrying: agent.carrying(),
        home_corner: agent.home_corner(),
        rally: agent.rally(),
        cell: field.get(position)?,
        known_deposit: ledger.deposit_if_known(),
        nearest_known_food: ledger.nearest_known_food(position),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use forage_agents::AgentRole;
    use forage_types::{AgentId, CellReading, Position};
    use forage_world::GridBounds;

    use super::*;

    #[test]
    fn deposit_hidden_until_latched() {
        let deposit = Position::new(9, 9);
        let field = FoodField::new(GridBounds::new(20, 20).unwrap(), deposit).unwrap();
        let mut ledger = DiscoveryLedger::new(deposit);
        let agent = Agent::new(AgentId::new(0), AgentRole::Generalist, Position::new(0, 0));

        let p = assemble_perception(4, &agent, &field, &ledger).unwrap();
        assert_eq!(p.tick, 4);
        assert_eq!(p.known_deposit, None);
        assert_eq!(p.cell, CellReading::Food(0));

        ledger.mark_deposit_found();
        let p = assemble_perception(5, &agent, &field, &ledger).unwrap();
        assert_eq!(p.known_deposit, Some(deposit));
    }

    #[test]
    fn nearest_food_comes_from_ledger() {
        let deposit = Position::new(9, 9);
        let mut field = FoodField::new(GridBounds::new(20, 20).unwrap(), deposit).unwrap();
        let mut ledger = DiscoveryLedger::new(deposit);
        field.increment(Position::new(4, 1)).unwrap();
        field.increment(Position::new(1, 1)).unwrap();

        let agent = Agent::new(AgentId::new(0), AgentRole::Generalist, Position::new(0, 0));
        let p = assemble_perception(0, &agent, &field, &ledger).unwrap();
        assert_eq!(p.nearest_known_food, None);

        ledger.record_food_sighting(Position::new(4, 1), &field);
        ledger.record_food_sighting(Position::new(1, 1), &field);
        let p = assemble_perception(0, &agent, &field, &ledger).unwrap();
        assert_eq!(p.nearest_known_food, Some(Position::new(1, 1)));
    }
}
