// src/error_handling/error_types.rs
//! Error types for the optimistic rollup core
//!
//! This module defines the error type shared by all rollup components so
//! that every failure is reported consistently, with a stable numeric code
//! for callers that consume errors across a program boundary.

use solana_program::program_error::ProgramError;
use solana_program::pubkey::Pubkey;
use thiserror::Error;

/// Errors produced by the rollup core
///
/// Every variant is recoverable: the operation that failed left all rollup
/// state exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RollupError {
    /// Deposit or withdrawal of zero units
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// Withdrawal exceeds the account balance
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Balance held by the account
        balance: u64,
        /// Amount the caller asked to withdraw
        requested: u64,
    },

    /// Credit would overflow the account balance
    #[error("balance overflow for account {account}")]
    BalanceOverflow {
        /// Account whose balance would overflow
        account: Pubkey,
    },

    /// Query against a state chain with no commitments
    #[error("state chain is empty")]
    EmptyChain,

    /// Rollback target index is not a committed position
    #[error("no commitment at index {index}")]
    CommitmentNotFound {
        /// Index that was requested
        index: u64,
    },

    /// Challenge against a root that was never committed
    #[error("unknown state root {}", hex::encode(.root))]
    UnknownRoot {
        /// Root that was requested
        root: [u8; 32],
    },

    /// Challenge against the latest committed root
    #[error("cannot challenge the latest state root {}", hex::encode(.root))]
    LatestRootChallenge {
        /// Root at the head of the chain
        root: [u8; 32],
    },

    /// Challenge against a root that already has an open challenge
    #[error("state root {} already has an open challenge", hex::encode(.root))]
    DuplicateChallenge {
        /// Root that is already disputed
        root: [u8; 32],
    },

    /// Fraud proof for a root with no open challenge to resolve
    #[error("no open challenge for state root {}", hex::encode(.root))]
    ChallengeNotFound {
        /// Root the proof named as its old root
        root: [u8; 32],
    },

    /// Malformed or unusable fraud proof
    #[error("invalid proof: {0}")]
    InvalidProof(String),

    /// The asset custodian refused a collect or release
    #[error("custody failure: {0}")]
    CustodyFailure(String),

    /// Configuration could not be parsed or applied
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Instruction bytes could not be decoded
    #[error("invalid instruction encoding: {0}")]
    InvalidInstruction(String),
}

impl RollupError {
    /// Convert to a stable error code
    ///
    /// Codes are grouped by component: 1000s ledger, 2000s state chain,
    /// 3000s challenges, 4000s proofs, 5000s custody, 6000s input decoding.
    pub fn error_code(&self) -> u32 {
        match self {
            RollupError::InvalidAmount => 1000,
            RollupError::InsufficientFunds { .. } => 1001,
            RollupError::BalanceOverflow { .. } => 1002,
            RollupError::EmptyChain => 2000,
            RollupError::CommitmentNotFound { .. } => 2001,
            RollupError::UnknownRoot { .. } => 3000,
            RollupError::LatestRootChallenge { .. } => 3001,
            RollupError::DuplicateChallenge { .. } => 3002,
            RollupError::ChallengeNotFound { .. } => 3003,
            RollupError::InvalidProof(_) => 4000,
            RollupError::CustodyFailure(_) => 5000,
            RollupError::InvalidConfig(_) => 6000,
            RollupError::InvalidInstruction(_) => 6001,
        }
    }
}

impl From<RollupError> for ProgramError {
    fn from(error: RollupError) -> Self {
        ProgramError::Custom(error.error_code())
    }
}
