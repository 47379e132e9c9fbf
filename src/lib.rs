// src/lib.rs
//! Optimistic rollup core
//!
//! This crate implements the trust-minimization core of an optimistic
//! rollup:
//! - A balance ledger fed by deposits and withdrawals
//! - An append-only chain of committed state roots
//! - A challenge game adjudicated by fraud proof verification
//!
//! State roots are committed without validation. Any party may challenge a
//! non-latest root and any party may settle the challenge with a fraud
//! proof; an upheld challenge rolls the chain back to the challenged root.

pub mod error_handling;
pub mod fraud_proof_system;
pub mod interfaces;
pub mod rollup;

pub use error_handling::RollupError;
pub use fraud_proof_system::{
    derive_next_root, fold_proof, FraudProofSubmission, ProofVerificationResult,
};
pub use interfaces::{
    AssetCustodian, EventSink, InMemoryCustodian, LogEventSink, RecordingEventSink,
    RollupInterface, RollupInterfaceImpl,
};
pub use rollup::{
    Challenge, ChallengeStatus, Commitment, OptimisticRollup, RollupConfig, RollupEvent,
};

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

/// Instruction types for the rollup
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum RollupInstruction {
    /// Deposit units into the caller's account
    Deposit {
        /// Amount in base units
        amount: u64,
    },

    /// Withdraw units from the caller's account
    Withdraw {
        /// Amount in base units
        amount: u64,
    },

    /// Commit a new state root
    UpdateState {
        /// The candidate state root
        new_root: [u8; 32],
    },

    /// Open a challenge against a committed root
    ChallengeState {
        /// The root to challenge
        root: [u8; 32],
    },

    /// Submit a fraud proof for a challenged transition
    SubmitFraudProof {
        /// Root the transition started from
        claimed_old_root: [u8; 32],
        /// Root the transition claims to have produced
        claimed_new_root: [u8; 32],
        /// Ordered sibling digests
        proof: Vec<[u8; 32]>,
    },
}

impl RollupInstruction {
    /// Decode an instruction from bytes
    pub fn unpack(data: &[u8]) -> Result<Self, RollupError> {
        RollupInstruction::try_from_slice(data)
            .map_err(|error| RollupError::InvalidInstruction(error.to_string()))
    }

    /// Encode the instruction to bytes
    pub fn pack(&self) -> Result<Vec<u8>, RollupError> {
        self.try_to_vec()
            .map_err(|error| RollupError::InvalidInstruction(error.to_string()))
    }
}

/// Process a rollup instruction on behalf of `caller`
pub fn process_instruction(
    rollup: &mut OptimisticRollup,
    caller: Pubkey,
    instruction: RollupInstruction,
) -> Result<(), RollupError> {
    match instruction {
        RollupInstruction::Deposit { amount } => rollup.deposit(caller, amount),
        RollupInstruction::Withdraw { amount } => rollup.withdraw(caller, amount),
        RollupInstruction::UpdateState { new_root } => {
            rollup.update_state(new_root)?;
            Ok(())
        }
        RollupInstruction::ChallengeState { root } => rollup.challenge_state(caller, root),
        RollupInstruction::SubmitFraudProof {
            claimed_old_root,
            claimed_new_root,
            proof,
        } => {
            let submission = FraudProofSubmission::new(claimed_old_root, claimed_new_root, proof);
            rollup.submit_fraud_proof(submission)?;
            Ok(())
        }
    }
}
