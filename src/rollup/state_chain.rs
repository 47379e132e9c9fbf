// src/rollup/state_chain.rs
//! Append-only chain of committed state roots
//!
//! Proposers commit candidate state roots here without any validation;
//! this is the optimistic half of the protocol, where commits are cheap
//! and unchecked. Fraud proof resolution is the only caller allowed to
//! shorten the chain, by rolling back past a disproved transition.

use std::time::{SystemTime, UNIX_EPOCH};

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::error_handling::RollupError;

/// A committed state root and its position in the chain
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Commitment {
    /// Position in the chain, dense from zero
    pub index: u64,
    /// The committed state root
    pub root: [u8; 32],
    /// Unix timestamp when the root was submitted
    pub submitted_at: u64,
}

/// The chain of committed state roots
pub struct StateChain {
    /// Commitments in submission order
    commitments: Vec<Commitment>,
}

impl StateChain {
    /// Create an empty chain
    pub fn new() -> Self {
        StateChain {
            commitments: Vec::new(),
        }
    }

    /// Append a state root, returning its index
    ///
    /// The root is accepted as-is. The same root value may be committed at
    /// several indices; queries by value bind to the most recent one.
    pub fn commit(&mut self, root: [u8; 32]) -> u64 {
        let index = self.commitments.len() as u64;
        self.commitments.push(Commitment {
            index,
            root,
            submitted_at: now_unix(),
        });

        log::info!("state root {} committed at index {}", hex::encode(root), index);
        index
    }

    /// Get the root of the highest-index commitment
    pub fn latest_root(&self) -> Result<[u8; 32], RollupError> {
        self.commitments
            .last()
            .map(|commitment| commitment.root)
            .ok_or(RollupError::EmptyChain)
    }

    /// Whether a root is the one at the head of the chain
    ///
    /// False on an empty chain.
    pub fn is_latest(&self, root: &[u8; 32]) -> bool {
        match self.commitments.last() {
            Some(commitment) => commitment.root == *root,
            None => false,
        }
    }

    /// Whether a root was committed at any index
    pub fn contains_root(&self, root: &[u8; 32]) -> bool {
        self.commitments.iter().any(|commitment| commitment.root == *root)
    }

    /// Get the most recent commitment bearing a root value
    pub fn find_commitment(&self, root: &[u8; 32]) -> Option<&Commitment> {
        self.commitments.iter().rev().find(|commitment| commitment.root == *root)
    }

    /// Get the commitment at an index
    pub fn get_commitment(&self, index: u64) -> Option<&Commitment> {
        self.commitments.get(index as usize)
    }

    /// Number of commitments in the chain
    pub fn len(&self) -> usize {
        self.commitments.len()
    }

    /// Whether the chain has no commitments
    pub fn is_empty(&self) -> bool {
        self.commitments.is_empty()
    }

    /// Discard every commitment after `index`, making it the new head
    pub fn rollback_to(&mut self, index: u64) -> Result<(), RollupError> {
        if index as usize >= self.commitments.len() {
            return Err(RollupError::CommitmentNotFound { index });
        }

        let discarded = self.commitments.len() - (index as usize + 1);
        self.commitments.truncate(index as usize + 1);

        log::warn!("rolled back to index {}, discarded {} commitment(s)", index, discarded);
        Ok(())
    }
}

/// Current Unix timestamp in seconds
fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
