// src/rollup/ledger.rs
//! Account balance ledger for the rollup
//!
//! The ledger tracks how many base units each account holds inside the
//! rollup. It only moves balances; taking and releasing custody of the
//! underlying assets is the custodian collaborator's job.

use std::collections::HashMap;

use solana_program::pubkey::Pubkey;

use crate::error_handling::RollupError;

/// Balance ledger for rollup accounts
///
/// Accounts are created lazily on first credit and never deleted; a
/// balance may reach zero and stay there. Every mutation either applies
/// fully or leaves the ledger untouched.
pub struct Ledger {
    /// Mapping of accounts to balances
    balances: HashMap<Pubkey, u64>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Ledger {
            balances: HashMap::new(),
        }
    }

    /// Check that a credit would be accepted, returning the new balance
    pub fn check_credit(&self, account: &Pubkey, amount: u64) -> Result<u64, RollupError> {
        if amount == 0 {
            return Err(RollupError::InvalidAmount);
        }

        self.balance_of(account)
            .checked_add(amount)
            .ok_or(RollupError::BalanceOverflow { account: *account })
    }

    /// Increase an account balance
    pub fn credit(&mut self, account: Pubkey, amount: u64) -> Result<(), RollupError> {
        let updated = self.check_credit(&account, amount)?;
        self.balances.insert(account, updated);

        log::debug!("credited {} to {}, balance now {}", amount, account, updated);
        Ok(())
    }

    /// Check that a debit would be accepted, returning the new balance
    pub fn check_debit(&self, account: &Pubkey, amount: u64) -> Result<u64, RollupError> {
        if amount == 0 {
            return Err(RollupError::InvalidAmount);
        }

        let balance = self.balance_of(account);
        if amount > balance {
            return Err(RollupError::InsufficientFunds {
                balance,
                requested: amount,
            });
        }

        Ok(balance - amount)
    }

    /// Decrease an account balance
    pub fn debit(&mut self, account: Pubkey, amount: u64) -> Result<(), RollupError> {
        let updated = self.check_debit(&account, amount)?;
        self.balances.insert(account, updated);

        log::debug!("debited {} from {}, balance now {}", amount, account, updated);
        Ok(())
    }

    /// Get an account balance, zero for accounts never seen
    pub fn balance_of(&self, account: &Pubkey) -> u64 {
        *self.balances.get(account).unwrap_or(&0)
    }

    /// Sum of all balances in the ledger
    pub fn total_supply(&self) -> u64 {
        self.balances.values().sum()
    }
}
