//! Food conservation check.
//!
//! Food enters the world only through the generator and leaves it only
//! through deliveries. Every unit in between is either lying on a cell or
//! held by exactly one agent. For each tick the check is:
//!
//! ```text
//! field_total + carried == generated - deposited
//! ```
//!
//! Pickups and deliveries move a unit between the field, an agent, and the
//! account in a single resolution step, so the check holds by construction.
//! A failure means a bug in resolution.

use tracing::error;

use crate::{FoodAccount, FoodAnomaly};

/// The result of a conservation check for a single tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConservationResult {
    /// Every generated, undelivered unit is accounted for.
    Balanced,
    /// The world and the accounts disagree.
    Anomaly(FoodAnomaly),
}

impl ConservationResult {
    /// Whether the check passed.
    pub const fn is_balanced(&self) -> bool {
        matches!(self, Self::Balanced)
    }
}

/// Verify food conservation at the end of `tick`.
///
/// `field_total` is the sum of all cell counts and `carried` the number of
/// agents holding a unit.
pub fn verify_conservation(
    tick: u64,
    account: &FoodAccount,
    field_total: u64,
    carried: u64,
) -> ConservationResult {
    let expected = u64::from(account.outstanding());
    let observed = field_total.checked_add(carried);

    if observed == Some(expected) {
        return ConservationResult::Balanced;
    }

    let message = format!(
        "FOOD_ANOMALY at tick {tick}: field {field_total} + carried {carried} != \
         generated {} - deposited {}",
        account.generated(),
        account.deposited(),
    );
    error!(tick, field_total, carried, expected, "{message}");
    ConservationResult::Anomaly(FoodAnomaly {
        tick,
        on_field: field_total,
        carried,
        expected,
        message,
    })
}
