//! Shared discovery ledger and food accounting for the Forage simulation.
//!
//! Agents do not talk to each other. The only thing they share is what
//! this crate records: which food cells have been seen and whether the
//! deposit has been found. The same crate keeps the run's food accounts
//! and checks them against the world after every tick.
//!
//! # Architecture
//!
//! - [`discovery`] -- The [`DiscoveryLedger`]: known food cells and the
//!   deposit-known latch.
//! - [`account`] -- The [`FoodAccount`]: generated and deposited counters,
//!   capped by the food budget.
//! - [`conservation`] -- The food conservation check and anomaly report.
//!
//! # Conservation Law
//!
//! At the end of every tick:
//!
//! ```text
//! food on the field + food carried by agents == generated - deposited
//! ```
//!
//! A violation produces a [`FoodAnomaly`]. The ledger never panics; it
//! returns errors.
//!
//! # Usage
//!
//! ```
//! use forage_ledger::{FoodAccount, conservation::{verify_conservation, ConservationResult}};
//!
//! let mut account = FoodAccount::new(47);
//! account.record_generated(3).ok();
//! account.record_deposited().ok();
//!
//! // Two units left: one lying on the field, one in an agent's hands.
//! assert_eq!(verify_conservation(1, &account, 1, 1), ConservationResult::Balanced);
//! ```

pub mod account;
pub mod conservation;
pub mod discovery;

// Re-export primary types at crate root.
pub use account::FoodAccount;
pub use conservation::ConservationResult;
pub use discovery::DiscoveryLedger;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when updating food accounts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Generation would push the total past the food budget.
    #[error("food budget exceeded: {generated} generated + {requested} requested > {budget}")]
    BudgetExceeded {
        /// Units generated so far.
        generated: u32,
        /// Units the caller tried to add.
        requested: u32,
        /// The run's food budget.
        budget: u32,
    },

    /// A delivery was recorded with no undelivered food outstanding.
    #[error("deposit recorded with nothing outstanding: {deposited} deposited of {generated} generated")]
    NothingOutstanding {
        /// Units generated so far.
        generated: u32,
        /// Units deposited so far.
        deposited: u32,
    },

    /// A counter overflowed.
    #[error("food counter overflow")]
    Overflow,
}

// ---------------------------------------------------------------------------
// Anomaly type
// ---------------------------------------------------------------------------

/// A food conservation violation detected at the end of a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoodAnomaly {
    /// The tick where the anomaly was detected.
    pub tick: u64,
    /// Food counted on the field.
    pub on_field: u64,
    /// Food counted in agents' hands.
    pub carried: u64,
    /// Food the accounts say is still in the world.
    pub expected: u64,
    /// Human-readable description of the anomaly.
    pub message: String,
}

impl core::fmt::Display for FoodAnomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}
