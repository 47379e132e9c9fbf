// src/fraud_proof_system/mod.rs
//! Fraud proof system for the optimistic rollup
//!
//! This module holds everything needed to adjudicate a disputed state
//! transition:
//! - Keccak-256 hashing of leaves and nodes
//! - The canonical proof fold shared by proposers and the verifier
//! - Stateless verification of a claimed transition

pub mod hasher;
pub mod proof;
pub mod verification;

pub use proof::{derive_next_root, fold_proof, FraudProofSubmission};
pub use verification::{verify_state_transition, ProofVerificationResult};
