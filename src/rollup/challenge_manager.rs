// src/rollup/challenge_manager.rs
//! Challenge lifecycle for committed state roots
//!
//! A challenge disputes the transition from a committed root to its
//! successor. Each challenge moves through a small state machine: it is
//! opened, then resolved exactly once as upheld or dismissed by fraud
//! proof verification. Resolved challenges are kept as history.

use std::collections::HashMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::error_handling::RollupError;

/// Status of a challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub enum ChallengeStatus {
    /// Awaiting a fraud proof
    Open,
    /// A fraud proof showed the challenged transition was fraudulent
    Upheld,
    /// A fraud proof showed the challenged transition was honest
    Dismissed,
}

impl fmt::Display for ChallengeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChallengeStatus::Open => write!(f, "open"),
            ChallengeStatus::Upheld => write!(f, "upheld"),
            ChallengeStatus::Dismissed => write!(f, "dismissed"),
        }
    }
}

/// A challenge against a committed state root
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Challenge {
    /// Root whose outgoing transition is disputed
    pub challenged_root: [u8; 32],
    /// Account that opened the challenge
    pub challenger: Pubkey,
    /// Unix timestamp when the challenge was opened
    pub opened_at: u64,
    /// Current status
    pub status: ChallengeStatus,
}

/// Tracks challenges by the root value they dispute
///
/// At most one challenge per root is open at a time; a root whose last
/// challenge was resolved may be challenged again.
pub struct ChallengeManager {
    /// Mapping of challenged roots to their challenge history
    challenges: HashMap<[u8; 32], Vec<Challenge>>,
}

impl ChallengeManager {
    /// Create a manager with no challenges
    pub fn new() -> Self {
        ChallengeManager {
            challenges: HashMap::new(),
        }
    }

    /// Open a challenge against a root
    ///
    /// The caller is responsible for checking that the root is a committed,
    /// non-latest root; this manager only enforces that no second challenge
    /// is opened while one is already open.
    pub fn open_challenge(&mut self, root: [u8; 32], challenger: Pubkey) -> Result<(), RollupError> {
        if self.has_open_challenge(&root) {
            return Err(RollupError::DuplicateChallenge { root });
        }

        let challenge = Challenge {
            challenged_root: root,
            challenger,
            opened_at: now_unix(),
            status: ChallengeStatus::Open,
        };
        self.challenges.entry(root).or_insert_with(Vec::new).push(challenge);

        log::info!("challenge opened against state root {} by {}", hex::encode(root), challenger);
        Ok(())
    }

    /// Resolve the open challenge for a root
    ///
    /// Flips the challenge to its terminal status. Fails when the root has
    /// no open challenge.
    pub fn resolve_challenge(&mut self, root: &[u8; 32], outcome: ChallengeStatus) -> Result<(), RollupError> {
        let challenge = self
            .challenges
            .get_mut(root)
            .and_then(|history| {
                history
                    .iter_mut()
                    .rev()
                    .find(|challenge| challenge.status == ChallengeStatus::Open)
            })
            .ok_or(RollupError::ChallengeNotFound { root: *root })?;

        challenge.status = outcome;

        log::info!("challenge against state root {} resolved: {}", hex::encode(root), outcome);
        Ok(())
    }

    /// Whether a root currently has an open challenge
    pub fn has_open_challenge(&self, root: &[u8; 32]) -> bool {
        self.challenges
            .get(root)
            .map(|history| history.iter().any(|challenge| challenge.status == ChallengeStatus::Open))
            .unwrap_or(false)
    }

    /// Get the open challenge for a root
    pub fn get_open_challenge(&self, root: &[u8; 32]) -> Option<&Challenge> {
        self.challenges
            .get(root)?
            .iter()
            .rev()
            .find(|challenge| challenge.status == ChallengeStatus::Open)
    }

    /// Get the full challenge history for a root
    pub fn get_challenges(&self, root: &[u8; 32]) -> Option<&Vec<Challenge>> {
        self.challenges.get(root)
    }
}

/// Current Unix timestamp in seconds
fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
