// src/rollup/mod.rs
//! Rollup core for the optimistic rollup system
//!
//! This module provides the trust-minimization core of the rollup: the
//! account ledger, the chain of committed state roots, the challenge
//! lifecycle, and the service object that ties them to the fraud proof
//! system.

pub mod challenge_manager;
pub mod ledger;
pub mod optimistic_rollup;
pub mod state_chain;

pub use challenge_manager::{Challenge, ChallengeManager, ChallengeStatus};
pub use ledger::Ledger;
pub use optimistic_rollup::{OptimisticRollup, RollupConfig, RollupEvent};
pub use state_chain::{Commitment, StateChain};
