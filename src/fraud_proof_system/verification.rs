// src/fraud_proof_system/verification.rs
//! Verification of claimed state transitions
//!
//! This module decides whether a fraud proof demonstrates that a committed
//! state transition was fraudulent. It is pure: it replays the proof fold
//! and compares digests, and never touches rollup state.

use std::fmt;

use super::proof::{self, FraudProofSubmission};

/// Result of replaying a fraud proof against a committed root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofVerificationResult {
    /// The fold reproduces the committed root; the transition stands
    TransitionValid,

    /// The fold does not reproduce the committed root; the commitment is fraudulent
    TransitionFraudulent,
}

impl fmt::Display for ProofVerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProofVerificationResult::TransitionValid => write!(f, "transition valid"),
            ProofVerificationResult::TransitionFraudulent => write!(f, "transition fraudulent"),
        }
    }
}

/// Verify a claimed transition against the root the chain actually holds
///
/// Folds the submission's siblings onto its claimed old root and compares
/// the result with `committed_new_root`. Equality means the proof
/// reconstructs the commitment, so the transition was honest and the
/// dispute fails; any mismatch means the committed root cannot be derived
/// from the claimed old root by the claimed steps.
pub fn verify_state_transition(
    committed_new_root: &[u8; 32],
    submission: &FraudProofSubmission,
) -> ProofVerificationResult {
    let recomputed = proof::fold_proof(&submission.claimed_old_root, &submission.proof);

    if recomputed == *committed_new_root {
        ProofVerificationResult::TransitionValid
    } else {
        ProofVerificationResult::TransitionFraudulent
    }
}
