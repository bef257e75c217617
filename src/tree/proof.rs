//! Inclusion proofs and tree-independent verification

use crate::model::{encode_leaf, Hash};
use crate::{Error, Result};
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Sibling hashes from a leaf up to the root
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Proof(Vec<Hash>);

impl Proof {
    pub fn new(hashes: Vec<Hash>) -> Self {
        Proof(hashes)
    }

    /// Parse a proof from hex-encoded sibling hashes
    pub fn from_hex<S: AsRef<str>>(parts: &[S]) -> Result<Self> {
        parts
            .iter()
            .map(|p| {
                Hash::from_hex(p.as_ref())
                    .map_err(|e| Error::InvalidProof(format!("{:?}: {}", p.as_ref(), e)))
            })
            .collect::<Result<Vec<_>>>()
            .map(Proof)
    }

    pub fn hashes(&self) -> &[Hash] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hex strings in the form a Solidity `bytes32[]` argument expects
    pub fn to_hex_vec(&self) -> Vec<String> {
        self.0.iter().map(Hash::to_hex).collect()
    }

    pub fn into_inner(self) -> Vec<Hash> {
        self.0
    }
}

/// Hash two sibling nodes into their parent.
///
/// The pair is sorted before hashing, so a verifier never needs to know
/// whether a sibling sat on the left or the right.
pub fn hash_pair(a: &Hash, b: &Hash) -> Hash {
    if a <= b {
        Hash::digest_concat(a, b)
    } else {
        Hash::digest_concat(b, a)
    }
}

/// Fold a proof over a leaf hash, returning the root it implies
pub fn process_proof(leaf_hash: Hash, proof: &Proof) -> Hash {
    proof
        .hashes()
        .iter()
        .fold(leaf_hash, |computed, sibling| hash_pair(&computed, sibling))
}

/// Check a proof for an already-hashed leaf
pub fn verify_leaf(leaf_hash: Hash, proof: &Proof, root: &Hash) -> bool {
    process_proof(leaf_hash, proof) == *root
}

/// Check that `(address, price)` is committed under `root`.
///
/// Needs no tree: the leaf is rebuilt from its inputs and the proof folded
/// with the same sorted-pair rule the on-chain verifier uses.
pub fn verify(address: &Address, price: U256, proof: &Proof, root: &Hash) -> bool {
    verify_leaf(encode_leaf(address, &price).hash(), proof, root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_pair_is_order_independent() {
        let a = Hash::digest(b"left");
        let b = Hash::digest(b"right");
        assert_eq!(hash_pair(&a, &b), hash_pair(&b, &a));
    }

    #[test]
    fn test_hash_pair_sorts_before_concat() {
        let low = Hash::from_bytes([1u8; 32]);
        let high = Hash::from_bytes([2u8; 32]);
        assert_eq!(hash_pair(&high, &low), Hash::digest_concat(&low, &high));
    }

    #[test]
    fn test_process_empty_proof_returns_leaf() {
        let leaf = Hash::digest(b"leaf");
        assert_eq!(process_proof(leaf, &Proof::default()), leaf);
        assert!(verify_leaf(leaf, &Proof::default(), &leaf));
    }

    #[test]
    fn test_process_proof_folds_in_order() {
        let leaf = Hash::digest(b"leaf");
        let s1 = Hash::digest(b"s1");
        let s2 = Hash::digest(b"s2");
        let proof = Proof::new(vec![s1, s2]);
        let expected = hash_pair(&hash_pair(&leaf, &s1), &s2);
        assert_eq!(process_proof(leaf, &proof), expected);
    }

    #[test]
    fn test_proof_hex_roundtrip() {
        let proof = Proof::new(vec![Hash::digest(b"a"), Hash::digest(b"b")]);
        let parsed = Proof::from_hex(&proof.to_hex_vec()).unwrap();
        assert_eq!(parsed, proof);
    }

    #[test]
    fn test_proof_from_hex_rejects_garbage() {
        let result = Proof::from_hex(&["0xnothex"]);
        assert!(matches!(result, Err(Error::InvalidProof(_))));
    }

    #[test]
    fn test_proof_serializes_as_hex_array() {
        let h = Hash::digest(b"x");
        let json = serde_json::to_string(&Proof::new(vec![h])).unwrap();
        assert_eq!(json, format!("[\"{}\"]", h.to_hex()));
    }
}
