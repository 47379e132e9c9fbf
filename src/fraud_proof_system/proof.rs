// src/fraud_proof_system/proof.rs
//! Transition proofs for the fraud proof system
//!
//! A state transition is committed to by folding the digests of its
//! execution steps onto the previous state root. A fraud proof replays
//! that fold: it names the two roots of a committed transition and carries
//! the ordered sibling digests that should reproduce the new root from the
//! old one. Proof generation and verification share the fold defined here.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use super::hasher;

/// A fraud proof submitted against a committed state transition
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct FraudProofSubmission {
    /// Root the transition started from; this is the challenged root
    pub claimed_old_root: [u8; 32],
    /// Root the transition claims to have produced
    pub claimed_new_root: [u8; 32],
    /// Ordered sibling digests folded onto the old root
    pub proof: Vec<[u8; 32]>,
}

impl FraudProofSubmission {
    /// Create a new fraud proof submission
    pub fn new(claimed_old_root: [u8; 32], claimed_new_root: [u8; 32], proof: Vec<[u8; 32]>) -> Self {
        Self {
            claimed_old_root,
            claimed_new_root,
            proof,
        }
    }

    /// Whether the submission carries no sibling digests
    pub fn is_empty(&self) -> bool {
        self.proof.is_empty()
    }
}

/// Fold a proof's sibling digests onto a starting root
///
/// The accumulator starts at the keccak-256 digest of the old root and
/// absorbs each sibling in submission order, accumulator on the left. The
/// fold commits to both the content and the order of the siblings.
pub fn fold_proof(old_root: &[u8; 32], siblings: &[[u8; 32]]) -> [u8; 32] {
    let mut accumulator = hasher::hash_leaf(old_root);
    for sibling in siblings {
        accumulator = hasher::hash_nodes(&accumulator, sibling);
    }
    accumulator
}

/// Derive the state root produced by applying a transition to a root
///
/// Proposers call this off-chain with the step digests of the transition
/// they executed; the verifier replays the same fold from the submitted
/// proof. The two agree exactly when the submitted siblings match the
/// executed steps.
pub fn derive_next_root(previous_root: &[u8; 32], step_digests: &[[u8; 32]]) -> [u8; 32] {
    fold_proof(previous_root, step_digests)
}
