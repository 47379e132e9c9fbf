// src/rollup/optimistic_rollup.rs
//! Optimistic rollup service object
//!
//! This module ties the rollup components together: the balance ledger,
//! the chain of committed state roots, and the challenge game that lets
//! any party dispute a committed transition. Commits are accepted without
//! validation; a commitment only falls when a challenge against it is
//! upheld by fraud proof verification, which rolls the chain back to the
//! challenged root.

use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::error_handling::RollupError;
use crate::fraud_proof_system::{verify_state_transition, FraudProofSubmission, ProofVerificationResult};
use crate::interfaces::{AssetCustodian, EventSink, InMemoryCustodian, LogEventSink};
use crate::rollup::challenge_manager::{Challenge, ChallengeManager, ChallengeStatus};
use crate::rollup::ledger::Ledger;
use crate::rollup::state_chain::{Commitment, StateChain};

/// Events emitted after successful state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollupEvent {
    /// A state root was appended to the chain
    StateRootCommitted {
        /// Index the root was committed at
        index: u64,
        /// The committed root
        root: [u8; 32],
    },

    /// A challenge was opened against a committed root
    ChallengeOpened {
        /// The challenged root
        root: [u8; 32],
        /// Account that opened the challenge
        challenger: Pubkey,
    },

    /// The open challenge for a root was resolved
    ChallengeResolved {
        /// The challenged root
        root: [u8; 32],
        /// Terminal status the challenge ended in
        outcome: ChallengeStatus,
    },
}

/// Rollup configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RollupConfig {
    /// Balances credited at genesis, funded through the custodian
    #[serde(default)]
    pub initial_balances: Vec<(Pubkey, u64)>,
}

impl RollupConfig {
    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, RollupError> {
        serde_json::from_str(json).map_err(|error| RollupError::InvalidConfig(error.to_string()))
    }
}

/// The optimistic rollup service
///
/// Owns all rollup state plus the two collaborator ports: the asset
/// custodian backing deposits and withdrawals, and the event sink
/// observers subscribe through. Every operation is synchronous and either
/// applies fully or fails with prior state intact.
pub struct OptimisticRollup {
    /// Account balances
    ledger: Ledger,
    /// Committed state roots
    state_chain: StateChain,
    /// Challenges by challenged root
    challenges: ChallengeManager,
    /// Collaborator holding the deposited assets
    custodian: Box<dyn AssetCustodian>,
    /// Collaborator receiving emitted events
    events: Box<dyn EventSink>,
}

impl OptimisticRollup {
    /// Create a rollup with the default collaborators
    pub fn new(config: RollupConfig) -> Result<Self, RollupError> {
        Self::with_collaborators(config, Box::new(InMemoryCustodian::new()), Box::new(LogEventSink))
    }

    /// Create a rollup with injected collaborators
    pub fn with_collaborators(
        config: RollupConfig,
        custodian: Box<dyn AssetCustodian>,
        events: Box<dyn EventSink>,
    ) -> Result<Self, RollupError> {
        let mut rollup = OptimisticRollup {
            ledger: Ledger::new(),
            state_chain: StateChain::new(),
            challenges: ChallengeManager::new(),
            custodian,
            events,
        };

        // Genesis balances are funded like ordinary deposits
        for (account, balance) in &config.initial_balances {
            if *balance == 0 {
                continue;
            }
            rollup.custodian.collect(account, *balance)?;
            rollup.ledger.credit(*account, *balance)?;
        }

        Ok(rollup)
    }

    /// Deposit `amount` units into `account`
    ///
    /// The custodian takes the units into custody, then the ledger credits
    /// them. A refusal from either side leaves both untouched.
    pub fn deposit(&mut self, account: Pubkey, amount: u64) -> Result<(), RollupError> {
        // Validate the credit before taking custody
        self.ledger.check_credit(&account, amount)?;
        self.custodian.collect(&account, amount)?;
        self.ledger.credit(account, amount)?;

        log::info!("deposit of {} for {}", amount, account);
        Ok(())
    }

    /// Withdraw `amount` units from `account`
    ///
    /// The withdrawal is all-or-nothing: an amount above the balance fails
    /// without touching it.
    pub fn withdraw(&mut self, account: Pubkey, amount: u64) -> Result<(), RollupError> {
        // Validate the debit before releasing custody
        self.ledger.check_debit(&account, amount)?;
        self.custodian.release(&account, amount)?;
        self.ledger.debit(account, amount)?;

        log::info!("withdrawal of {} for {}", amount, account);
        Ok(())
    }

    /// Commit a new state root, returning its index
    ///
    /// The root is not validated in any way; disputing it afterwards is
    /// what the challenge game is for.
    pub fn update_state(&mut self, new_root: [u8; 32]) -> Result<u64, RollupError> {
        let index = self.state_chain.commit(new_root);
        self.events.emit(RollupEvent::StateRootCommitted { index, root: new_root });
        Ok(index)
    }

    /// Open a challenge against a committed root
    ///
    /// Challenging a root disputes the transition from it to its successor.
    /// The latest root has no successor yet, so it cannot be challenged.
    pub fn challenge_state(&mut self, challenger: Pubkey, root: [u8; 32]) -> Result<(), RollupError> {
        // The root must have been committed
        if !self.state_chain.contains_root(&root) {
            return Err(RollupError::UnknownRoot { root });
        }

        // The head of the chain has no successor to dispute
        if self.state_chain.is_latest(&root) {
            return Err(RollupError::LatestRootChallenge { root });
        }

        self.challenges.open_challenge(root, challenger)?;
        self.events.emit(RollupEvent::ChallengeOpened { root, challenger });
        Ok(())
    }

    /// Submit a fraud proof settling the open challenge on its old root
    ///
    /// Anyone may submit; verification is purely cryptographic. The proof
    /// names a committed transition by its two adjacent roots. If the fold
    /// reproduces the committed new root the challenge is dismissed and
    /// the commitment stands; otherwise the challenge is upheld and the
    /// chain rolls back so the challenged root is the latest again.
    pub fn submit_fraud_proof(&mut self, submission: FraudProofSubmission) -> Result<ChallengeStatus, RollupError> {
        // An empty proof is malformed, rejected before any lookup
        if submission.is_empty() {
            return Err(RollupError::InvalidProof("proof contains no sibling digests".to_string()));
        }

        // Bind the claimed transition to a pair of adjacent commitments
        let committed = self
            .state_chain
            .find_commitment(&submission.claimed_new_root)
            .ok_or_else(|| {
                RollupError::InvalidProof(format!(
                    "claimed new root {} is not committed",
                    hex::encode(submission.claimed_new_root)
                ))
            })?;
        let new_index = committed.index;
        let committed_root = committed.root;

        if new_index == 0 {
            return Err(RollupError::InvalidProof(format!(
                "claimed new root {} has no predecessor",
                hex::encode(submission.claimed_new_root)
            )));
        }
        let old_index = new_index - 1;

        let predecessor = self.state_chain.get_commitment(old_index).map(|c| c.root);
        if predecessor != Some(submission.claimed_old_root) {
            return Err(RollupError::InvalidProof(format!(
                "claimed old root {} does not precede the claimed new root",
                hex::encode(submission.claimed_old_root)
            )));
        }

        // A proof only exists to settle an open challenge
        if !self.challenges.has_open_challenge(&submission.claimed_old_root) {
            return Err(RollupError::ChallengeNotFound {
                root: submission.claimed_old_root,
            });
        }

        // Replay the fold against the root the chain actually holds
        let outcome = match verify_state_transition(&committed_root, &submission) {
            ProofVerificationResult::TransitionValid => ChallengeStatus::Dismissed,
            ProofVerificationResult::TransitionFraudulent => ChallengeStatus::Upheld,
        };

        self.challenges.resolve_challenge(&submission.claimed_old_root, outcome)?;

        if outcome == ChallengeStatus::Upheld {
            log::warn!(
                "state root {} proven fraudulent, rolling back to index {}",
                hex::encode(committed_root),
                old_index
            );
            self.state_chain.rollback_to(old_index)?;
        }

        self.events.emit(RollupEvent::ChallengeResolved {
            root: submission.claimed_old_root,
            outcome,
        });

        Ok(outcome)
    }

    /// Get an account balance
    pub fn balance_of(&self, account: &Pubkey) -> u64 {
        self.ledger.balance_of(account)
    }

    /// Get the latest committed state root
    pub fn latest_state_root(&self) -> Result<[u8; 32], RollupError> {
        self.state_chain.latest_root()
    }

    /// Number of commitments in the chain
    pub fn chain_len(&self) -> usize {
        self.state_chain.len()
    }

    /// Get the commitment at an index
    pub fn get_commitment(&self, index: u64) -> Option<&Commitment> {
        self.state_chain.get_commitment(index)
    }

    /// Get the challenge history for a root
    pub fn get_challenges(&self, root: &[u8; 32]) -> Option<&Vec<Challenge>> {
        self.challenges.get_challenges(root)
    }

    /// Get the open challenge for a root
    pub fn get_open_challenge(&self, root: &[u8; 32]) -> Option<&Challenge> {
        self.challenges.get_open_challenge(root)
    }

    /// Sum of all ledger balances
    pub fn total_supply(&self) -> u64 {
        self.ledger.total_supply()
    }

    /// Units the custodian currently holds
    pub fn custodian_holdings(&self) -> u64 {
        self.custodian.holdings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fraud_proof_system::derive_next_root;

    /// Custodian that refuses every operation
    struct RefusingCustodian;

    impl AssetCustodian for RefusingCustodian {
        fn collect(&mut self, _account: &Pubkey, _amount: u64) -> Result<(), RollupError> {
            Err(RollupError::CustodyFailure("collect refused".to_string()))
        }

        fn release(&mut self, _account: &Pubkey, _amount: u64) -> Result<(), RollupError> {
            Err(RollupError::CustodyFailure("release refused".to_string()))
        }

        fn holdings(&self) -> u64 {
            0
        }
    }

    fn new_rollup() -> OptimisticRollup {
        OptimisticRollup::new(RollupConfig::default()).unwrap()
    }

    #[test]
    fn test_deposit_then_withdraw() {
        let mut rollup = new_rollup();
        let account = Pubkey::new_unique();

        rollup.deposit(account, 1000).unwrap();
        rollup.withdraw(account, 300).unwrap();

        assert_eq!(rollup.balance_of(&account), 700);
        assert_eq!(rollup.total_supply(), 700);
        assert_eq!(rollup.custodian_holdings(), 700);
    }

    #[test]
    fn test_withdraw_more_than_balance() {
        let mut rollup = new_rollup();
        let account = Pubkey::new_unique();
        rollup.deposit(account, 100).unwrap();

        let result = rollup.withdraw(account, 200);
        assert_eq!(
            result,
            Err(RollupError::InsufficientFunds {
                balance: 100,
                requested: 200,
            })
        );
        assert_eq!(rollup.balance_of(&account), 100);
        assert_eq!(rollup.custodian_holdings(), 100);
    }

    #[test]
    fn test_custodian_refusal_aborts_the_deposit() {
        let mut rollup = OptimisticRollup::with_collaborators(
            RollupConfig::default(),
            Box::new(RefusingCustodian),
            Box::new(LogEventSink),
        )
        .unwrap();
        let account = Pubkey::new_unique();

        let result = rollup.deposit(account, 50);
        assert!(matches!(result, Err(RollupError::CustodyFailure(_))));
        assert_eq!(rollup.balance_of(&account), 0);
        assert_eq!(rollup.total_supply(), 0);
    }

    #[test]
    fn test_genesis_balances_are_funded() {
        let account = Pubkey::new_unique();
        let config = RollupConfig {
            initial_balances: vec![(account, 500)],
        };
        let mut rollup = OptimisticRollup::new(config).unwrap();

        assert_eq!(rollup.balance_of(&account), 500);
        assert_eq!(rollup.custodian_holdings(), 500);

        // Genesis funds are withdrawable like any deposit
        rollup.withdraw(account, 500).unwrap();
        assert_eq!(rollup.balance_of(&account), 0);
        assert_eq!(rollup.custodian_holdings(), 0);
    }

    #[test]
    fn test_update_state_commits_in_order() {
        let mut rollup = new_rollup();

        assert_eq!(rollup.update_state([1; 32]).unwrap(), 0);
        assert_eq!(rollup.update_state([2; 32]).unwrap(), 1);
        assert_eq!(rollup.latest_state_root().unwrap(), [2; 32]);
        assert_eq!(rollup.chain_len(), 2);
    }

    #[test]
    fn test_challenge_preconditions() {
        let mut rollup = new_rollup();
        let challenger = Pubkey::new_unique();
        rollup.update_state([1; 32]).unwrap();
        rollup.update_state([2; 32]).unwrap();

        // Unknown roots are rejected before the latest-root check
        assert_eq!(
            rollup.challenge_state(challenger, [9; 32]),
            Err(RollupError::UnknownRoot { root: [9; 32] })
        );

        // The latest root cannot be challenged
        assert_eq!(
            rollup.challenge_state(challenger, [2; 32]),
            Err(RollupError::LatestRootChallenge { root: [2; 32] })
        );

        // An older root can
        rollup.challenge_state(challenger, [1; 32]).unwrap();
        assert!(rollup.get_open_challenge(&[1; 32]).is_some());

        // But only once while the challenge is open
        assert_eq!(
            rollup.challenge_state(challenger, [1; 32]),
            Err(RollupError::DuplicateChallenge { root: [1; 32] })
        );
    }

    #[test]
    fn test_empty_proof_is_rejected_without_state_change() {
        let mut rollup = new_rollup();
        rollup.update_state([1; 32]).unwrap();
        rollup.update_state([2; 32]).unwrap();
        rollup.challenge_state(Pubkey::new_unique(), [1; 32]).unwrap();

        let submission = FraudProofSubmission::new([1; 32], [2; 32], vec![]);
        let result = rollup.submit_fraud_proof(submission);
        assert!(matches!(result, Err(RollupError::InvalidProof(_))));

        // Nothing moved
        assert_eq!(rollup.chain_len(), 2);
        assert!(rollup.get_open_challenge(&[1; 32]).is_some());
    }

    #[test]
    fn test_honest_transition_dismisses_the_challenge() {
        let mut rollup = new_rollup();
        let old_root = [1; 32];
        let steps = vec![[7; 32], [8; 32]];
        let new_root = derive_next_root(&old_root, &steps);

        rollup.update_state(old_root).unwrap();
        rollup.update_state(new_root).unwrap();
        rollup.challenge_state(Pubkey::new_unique(), old_root).unwrap();

        let submission = FraudProofSubmission::new(old_root, new_root, steps);
        let outcome = rollup.submit_fraud_proof(submission).unwrap();

        assert_eq!(outcome, ChallengeStatus::Dismissed);
        assert_eq!(rollup.latest_state_root().unwrap(), new_root);
        assert_eq!(rollup.chain_len(), 2);
        assert!(rollup.get_open_challenge(&old_root).is_none());
    }

    #[test]
    fn test_fraudulent_transition_is_rolled_back() {
        let mut rollup = new_rollup();
        let old_root = [1; 32];
        let fraudulent_root = [66; 32];

        rollup.update_state(old_root).unwrap();
        rollup.update_state(fraudulent_root).unwrap();
        rollup.challenge_state(Pubkey::new_unique(), old_root).unwrap();

        // Any fold from the old root fails to reproduce the invented root
        let submission = FraudProofSubmission::new(old_root, fraudulent_root, vec![[7; 32]]);
        let outcome = rollup.submit_fraud_proof(submission).unwrap();

        assert_eq!(outcome, ChallengeStatus::Upheld);
        assert_eq!(rollup.latest_state_root().unwrap(), old_root);
        assert_eq!(rollup.chain_len(), 1);

        let history = rollup.get_challenges(&old_root).unwrap();
        assert_eq!(history[0].status, ChallengeStatus::Upheld);
    }

    #[test]
    fn test_proof_for_non_adjacent_roots_is_rejected() {
        let mut rollup = new_rollup();
        rollup.update_state([1; 32]).unwrap();
        rollup.update_state([2; 32]).unwrap();
        rollup.update_state([3; 32]).unwrap();
        rollup.challenge_state(Pubkey::new_unique(), [1; 32]).unwrap();

        // [1; 32] does not immediately precede [3; 32]
        let submission = FraudProofSubmission::new([1; 32], [3; 32], vec![[7; 32]]);
        let result = rollup.submit_fraud_proof(submission);
        assert!(matches!(result, Err(RollupError::InvalidProof(_))));
        assert!(rollup.get_open_challenge(&[1; 32]).is_some());
    }

    #[test]
    fn test_proof_without_challenge_is_rejected() {
        let mut rollup = new_rollup();
        rollup.update_state([1; 32]).unwrap();
        rollup.update_state([2; 32]).unwrap();

        let submission = FraudProofSubmission::new([1; 32], [2; 32], vec![[7; 32]]);
        let result = rollup.submit_fraud_proof(submission);
        assert_eq!(result, Err(RollupError::ChallengeNotFound { root: [1; 32] }));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = RollupConfig {
            initial_balances: vec![(Pubkey::new_unique(), 42)],
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed = RollupConfig::from_json(&json).unwrap();
        assert_eq!(parsed.initial_balances, config.initial_balances);
    }

    #[test]
    fn test_malformed_config_is_rejected() {
        let result = RollupConfig::from_json("{ not json");
        assert!(matches!(result, Err(RollupError::InvalidConfig(_))));
    }
}
