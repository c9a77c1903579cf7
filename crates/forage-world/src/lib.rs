//! Grid occupancy and the food field for the Forage simulation.
//!
//! This crate models the physical world: a fixed `width x height` grid on
//! which every cell holds at most one agent, and a parallel food layer in
//! which exactly one cell is the deposit.
//!
//! # Modules
//!
//! - [`bounds`] -- Grid dimensions, bounds checks, and cell indexing.
//! - [`error`] -- Error types for world operations.
//! - [`food`] -- [`FoodField`]: per-cell food counts plus the deposit.
//! - [`grid`] -- [`Grid`]: single-occupancy agent placement and movement.
//!
//! Neither structure knows about ticks or agents' intentions. Callers are
//! responsible for only requesting legal moves; the structures reject
//! anything that would break their invariants.

pub mod bounds;
pub mod error;
pub mod food;
pub mod grid;

// Re-export primary types at crate root.
pub use bounds::GridBounds;
pub use error::WorldError;
pub use food::FoodField;
pub use grid::Grid;
