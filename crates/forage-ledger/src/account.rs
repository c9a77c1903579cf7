//! Run-level food counters.
//!
//! Both counters only ever grow. `generated` never exceeds the budget and
//! `deposited` never exceeds `generated`; any attempt to break either bound
//! is an error rather than a silent clamp.

use serde::Serialize;

use crate::LedgerError;

/// Generated and deposited food totals for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FoodAccount {
    budget: u32,
    generated: u32,
    deposited: u32,
}

impl FoodAccount {
    /// Create an empty account for a run with the given food budget.
    pub const fn new(budget: u32) -> Self {
        Self {
            budget,
            generated: 0,
            deposited: 0,
        }
    }

    /// Total food units the run will ever generate.
    pub const fn budget(&self) -> u32 {
        self.budget
    }

    /// Food units generated so far.
    pub const fn generated(&self) -> u32 {
        self.generated
    }

    /// Food units delivered to the deposit so far.
    pub const fn deposited(&self) -> u32 {
        self.deposited
    }

    /// Units the generator may still create.
    pub const fn remaining_budget(&self) -> u32 {
        self.budget.saturating_sub(self.generated)
    }

    /// Units generated but not yet delivered.
    pub const fn outstanding(&self) -> u32 {
        self.generated.saturating_sub(self.deposited)
    }

    /// Whether every unit of the budget has been delivered.
    pub const fn is_complete(&self) -> bool {
        self.deposited == self.budget
    }

    /// Record `count` newly generated units.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::BudgetExceeded`] if the total would pass the
    /// budget, or [`LedgerError::Overflow`] on counter overflow.
    pub fn record_generated(&mut self, count: u32) -> Result<u32, LedgerError> {
        let total = self
            .generated
            .checked_add(count)
            .ok_or(LedgerError::Overflow)?;
        if total > self.budget {
            return Err(LedgerError::BudgetExceeded {
                generated: self.generated,
                requested: count,
                budget: self.budget,
            });
        }
        self.generated = total;
        Ok(total)
    }

    /// Record one delivery to the deposit.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NothingOutstanding`] if every generated unit
    /// has already been delivered.
    pub fn record_deposited(&mut self) -> Result<u32, LedgerError> {
        if self.deposited >= self.generated {
            return Err(LedgerError::NothingOutstanding {
                generated: self.generated,
                deposited: self.deposited,
            });
        }
        self.deposited = self
            .deposited
            .checked_add(1)
            .ok_or(LedgerError::Overflow)?;
        Ok(self.deposited)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_capped_by_budget() {
        let mut account = FoodAccount::new(5);
        assert_eq!(account.record_generated(4).unwrap(), 4);
        assert_eq!(account.remaining_budget(), 1);

        let result = account.record_generated(2);
        assert!(matches!(
            result,
            Err(LedgerError::BudgetExceeded {
                generated: 4,
                requested: 2,
                budget: 5
            })
        ));
        assert_eq!(account.generated(), 4);
    }

    #[test]
    fn cannot_deposit_more_than_generated() {
        let mut account = FoodAccount::new(5);
        assert!(account.record_deposited().is_err());

        account.record_generated(1).unwrap();
        assert_eq!(account.record_deposited().unwrap(), 1);
        assert!(matches!(
            account.record_deposited(),
            Err(LedgerError::NothingOutstanding { .. })
        ));
    }

    #[test]
    fn completes_when_budget_delivered() {
        let mut account = FoodAccount::new(2);
        account.record_generated(2).unwrap();
        account.record_deposited().unwrap();
        assert!(!account.is_complete());
        assert_eq!(account.outstanding(), 1);

        account.record_deposited().unwrap();
        assert!(account.is_complete());
        assert_eq!(account.outstanding(), 0);
    }

    #[test]
    fn zero_budget_is_complete_from_the_start() {
        let account = FoodAccount::new(0);
        assert!(account.is_complete());
    }
}
