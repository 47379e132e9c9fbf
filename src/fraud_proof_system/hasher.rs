// src/fraud_proof_system/hasher.rs
//! Keccak-256 hashing for state roots and fraud proofs
//!
//! All digests in the rollup core are produced here. Leaves are hashed
//! directly; interior nodes are hashed as the concatenation of their two
//! children, left operand first.

use solana_program::keccak;

/// Hash arbitrary bytes into a 32-byte digest
pub fn hash_leaf(data: &[u8]) -> [u8; 32] {
    keccak::hash(data).to_bytes()
}

/// Hash two digests into their parent digest
///
/// The operands are not commutative: the accumulator side of a proof fold
/// is always the left operand.
pub fn hash_nodes(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    let mut input = Vec::with_capacity(64);
    input.extend_from_slice(left);
    input.extend_from_slice(right);
    keccak::hash(&input).to_bytes()
}
