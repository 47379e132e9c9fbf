// src/interfaces/rollup_interface.rs
//! Rollup interface
//!
//! This module defines the interface for interacting with the optimistic
//! rollup from shared-ownership callers. All writes take the lock
//! exclusively, so commits, challenges, and rollbacks serialize against
//! each other; queries share it.

use std::sync::{Arc, RwLock};

use solana_program::pubkey::Pubkey;

use crate::error_handling::RollupError;
use crate::fraud_proof_system::FraudProofSubmission;
use crate::rollup::{Challenge, ChallengeStatus, Commitment, OptimisticRollup};

/// Interface for interacting with the optimistic rollup
pub trait RollupInterface {
    /// Deposit units into an account
    fn deposit(&self, account: Pubkey, amount: u64) -> Result<(), RollupError>;

    /// Withdraw units from an account
    fn withdraw(&self, account: Pubkey, amount: u64) -> Result<(), RollupError>;

    /// Commit a new state root, returning its index
    fn update_state(&self, new_root: [u8; 32]) -> Result<u64, RollupError>;

    /// Open a challenge against a committed root
    fn challenge_state(&self, challenger: Pubkey, root: [u8; 32]) -> Result<(), RollupError>;

    /// Submit a fraud proof, returning the challenge outcome
    fn submit_fraud_proof(&self, submission: FraudProofSubmission) -> Result<ChallengeStatus, RollupError>;

    /// Get an account balance
    fn balance_of(&self, account: &Pubkey) -> u64;

    /// Get the latest committed state root
    fn latest_state_root(&self) -> Result<[u8; 32], RollupError>;

    /// Get the commitment at an index
    fn get_commitment(&self, index: u64) -> Option<Commitment>;

    /// Get the challenge history for a root
    fn get_challenges(&self, root: &[u8; 32]) -> Option<Vec<Challenge>>;
}

/// Implementation of the rollup interface over a shared rollup instance
pub struct RollupInterfaceImpl {
    /// The underlying rollup instance
    rollup: Arc<RwLock<OptimisticRollup>>,
}

impl RollupInterfaceImpl {
    /// Create a new rollup interface instance
    pub fn new(rollup: Arc<RwLock<OptimisticRollup>>) -> Self {
        RollupInterfaceImpl { rollup }
    }
}

impl RollupInterface for RollupInterfaceImpl {
    fn deposit(&self, account: Pubkey, amount: u64) -> Result<(), RollupError> {
        let mut rollup = self.rollup.write().unwrap();
        rollup.deposit(account, amount)
    }

    fn withdraw(&self, account: Pubkey, amount: u64) -> Result<(), RollupError> {
        let mut rollup = self.rollup.write().unwrap();
        rollup.withdraw(account, amount)
    }

    fn update_state(&self, new_root: [u8; 32]) -> Result<u64, RollupError> {
        let mut rollup = self.rollup.write().unwrap();
        rollup.update_state(new_root)
    }

    fn challenge_state(&self, challenger: Pubkey, root: [u8; 32]) -> Result<(), RollupError> {
        let mut rollup = self.rollup.write().unwrap();
        rollup.challenge_state(challenger, root)
    }

    fn submit_fraud_proof(&self, submission: FraudProofSubmission) -> Result<ChallengeStatus, RollupError> {
        let mut rollup = self.rollup.write().unwrap();
        rollup.submit_fraud_proof(submission)
    }

    fn balance_of(&self, account: &Pubkey) -> u64 {
        let rollup = self.rollup.read().unwrap();
        rollup.balance_of(account)
    }

    fn latest_state_root(&self) -> Result<[u8; 32], RollupError> {
        let rollup = self.rollup.read().unwrap();
        rollup.latest_state_root()
    }

    fn get_commitment(&self, index: u64) -> Option<Commitment> {
        let rollup = self.rollup.read().unwrap();
        rollup.get_commitment(index).cloned()
    }

    fn get_challenges(&self, root: &[u8; 32]) -> Option<Vec<Challenge>> {
        let rollup = self.rollup.read().unwrap();
        rollup.get_challenges(root).cloned()
    }
}
