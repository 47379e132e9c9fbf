// src/interfaces/custodian_interface.rs
//! Asset custodian interface
//!
//! The rollup core never moves the underlying assets itself. Deposits and
//! withdrawals hand the asset side of the operation to a custodian, an
//! external collaborator that takes units into custody and releases them
//! back out. A refusal from the custodian aborts the operation before the
//! ledger is touched.

use solana_program::pubkey::Pubkey;

use crate::error_handling::RollupError;

/// Interface to the collaborator holding the deposited assets
pub trait AssetCustodian: Send + Sync {
    /// Take custody of `amount` units from `account`
    fn collect(&mut self, account: &Pubkey, amount: u64) -> Result<(), RollupError>;

    /// Release `amount` units from custody back to `account`
    fn release(&mut self, account: &Pubkey, amount: u64) -> Result<(), RollupError>;

    /// Total units currently in custody
    fn holdings(&self) -> u64;
}

/// Custodian keeping a simple in-memory tally of custody
///
/// Stands in for the external asset contract. It accepts any collect that
/// does not overflow its tally and refuses to release more than it holds,
/// which is exactly the behavior the ledger invariant relies on.
pub struct InMemoryCustodian {
    /// Units currently in custody
    held: u64,
}

impl InMemoryCustodian {
    /// Create a custodian holding nothing
    pub fn new() -> Self {
        InMemoryCustodian { held: 0 }
    }
}

impl AssetCustodian for InMemoryCustodian {
    fn collect(&mut self, account: &Pubkey, amount: u64) -> Result<(), RollupError> {
        self.held = self.held.checked_add(amount).ok_or_else(|| {
            RollupError::CustodyFailure(format!("custody tally overflow collecting {} from {}", amount, account))
        })?;
        Ok(())
    }

    fn release(&mut self, account: &Pubkey, amount: u64) -> Result<(), RollupError> {
        if amount > self.held {
            return Err(RollupError::CustodyFailure(format!(
                "custody holds {}, release of {} to {} refused",
                self.held, amount, account
            )));
        }

        self.held -= amount;
        Ok(())
    }

    fn holdings(&self) -> u64 {
        self.held
    }
}
