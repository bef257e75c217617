//! Binary keccak-256 merkle tree over allowlist entries

use super::proof::{hash_pair, Proof};
use super::state::Eligibility;
use crate::model::{AllowlistEntry, Hash};
use crate::{Error, Result};
use alloy_primitives::Address;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A merkle tree committing to a set of allowlist entries
///
/// Layout rules:
/// - level 0 holds `keccak256(leaf)` for every entry, sorted ascending, so
///   the root depends only on the entry set and not on input order
/// - parents hash their two children with [`hash_pair`] (sorted pair)
/// - an unpaired last node is promoted to the next level unchanged
///
/// The tree is immutable once built and can be shared freely across threads.
#[derive(Clone, Debug)]
pub struct AllowlistTree {
    /// Entries in leaf order
    entries: Vec<AllowlistEntry>,
    /// Address → leaf index
    positions: HashMap<Address, usize>,
    /// `levels[0]` are the leaf hashes, the last level holds only the root
    levels: Vec<Vec<Hash>>,
    root: Hash,
}

impl AllowlistTree {
    /// Build a tree from the full allowlist dataset.
    ///
    /// # Errors
    /// - [`Error::EmptyAllowlist`] if there are no entries
    /// - [`Error::DuplicateEntry`] if an address appears more than once
    pub fn build(entries: impl IntoIterator<Item = AllowlistEntry>) -> Result<Self> {
        let mut hashed: Vec<(Hash, AllowlistEntry)> = Vec::new();
        let mut seen: HashSet<Address> = HashSet::new();

        for entry in entries {
            if !seen.insert(entry.address) {
                return Err(Error::DuplicateEntry(entry.address));
            }
            hashed.push((entry.leaf().hash(), entry));
        }

        if hashed.is_empty() {
            return Err(Error::EmptyAllowlist);
        }

        hashed.sort_by(|a, b| a.0.cmp(&b.0));

        let positions = hashed
            .iter()
            .enumerate()
            .map(|(index, (_, entry))| (entry.address, index))
            .collect();
        let (leaves, entries): (Vec<Hash>, Vec<AllowlistEntry>) = hashed.into_iter().unzip();

        let levels = build_levels(leaves);
        let root = levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .ok_or(Error::EmptyAllowlist)?;

        debug!(
            entries = entries.len(),
            depth = levels.len() - 1,
            root = %root,
            "built allowlist tree"
        );

        Ok(AllowlistTree {
            entries,
            positions,
            levels,
            root,
        })
    }

    /// The root hash: the public commitment to the whole allowlist
    pub fn root(&self) -> Hash {
        self.root
    }

    /// Number of leaves
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a built tree
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of levels above the leaves
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Entries in leaf order
    pub fn entries(&self) -> &[AllowlistEntry] {
        &self.entries
    }

    pub fn entry(&self, address: &Address) -> Option<&AllowlistEntry> {
        self.positions.get(address).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.positions.contains_key(address)
    }

    /// Look up an address and return its price and inclusion proof
    pub fn proof_for(&self, address: &Address) -> Eligibility {
        match self.positions.get(address) {
            Some(&index) => Eligibility::Eligible {
                price: self.entries[index].price,
                proof: self.collect_proof(index),
            },
            None => Eligibility::NotEligible,
        }
    }

    /// Proof for the leaf at `index` in leaf order
    pub fn proof_for_leaf(&self, index: usize) -> Result<Proof> {
        if index >= self.entries.len() {
            return Err(Error::LeafIndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.collect_proof(index))
    }

    fn collect_proof(&self, leaf_index: usize) -> Proof {
        let mut proof = Vec::with_capacity(self.depth());
        let mut current_index = leaf_index;

        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_index = current_index ^ 1;
            // A promoted node has no sibling at this level
            if sibling_index < level.len() {
                proof.push(level[sibling_index]);
            }
            current_index /= 2;
        }

        Proof::new(proof)
    }
}

fn build_levels(leaves: Vec<Hash>) -> Vec<Vec<Hash>> {
    let mut levels = vec![leaves];

    loop {
        let next_level: Vec<Hash> = match levels.last() {
            Some(level) if level.len() > 1 => level
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_pair(left, right),
                    _ => pair[0],
                })
                .collect(),
            _ => break,
        };
        levels.push(next_level);
    }

    levels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::verify;
    use alloy_primitives::U256;

    fn entry(seed: u8, price: u64) -> AllowlistEntry {
        AllowlistEntry::new(Address::from([seed; 20]), U256::from(price))
    }

    #[test]
    fn test_build_single_leaf() {
        let e = entry(1, 100);
        let tree = AllowlistTree::build(vec![e]).unwrap();

        assert_eq!(tree.root(), e.leaf().hash(), "single leaf is the root");
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.proof_for_leaf(0).unwrap(), Proof::default());
    }

    #[test]
    fn test_build_two_leaves() {
        let a = entry(1, 100);
        let b = entry(2, 200);
        let tree = AllowlistTree::build(vec![a, b]).unwrap();

        assert_eq!(tree.root(), hash_pair(&a.leaf().hash(), &b.leaf().hash()));
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_build_rejects_empty() {
        let result = AllowlistTree::build(Vec::new());
        assert!(matches!(result, Err(Error::EmptyAllowlist)));
    }

    #[test]
    fn test_build_rejects_duplicate_address() {
        let result = AllowlistTree::build(vec![entry(1, 100), entry(2, 200), entry(1, 300)]);
        match result {
            Err(Error::DuplicateEntry(addr)) => assert_eq!(addr, Address::from([1u8; 20])),
            other => panic!("expected DuplicateEntry, got {:?}", other),
        }
    }

    #[test]
    fn test_odd_node_is_promoted() {
        let entries = vec![entry(1, 1), entry(2, 2), entry(3, 3)];
        let tree = AllowlistTree::build(entries).unwrap();

        let leaves = &tree.levels[0];
        let expected = hash_pair(&hash_pair(&leaves[0], &leaves[1]), &leaves[2]);
        assert_eq!(tree.root(), expected);
        assert_eq!(tree.levels[1][1], leaves[2], "unpaired node carried up as-is");

        // The promoted leaf skips a level, so its proof is one element short
        assert_eq!(tree.proof_for_leaf(2).unwrap().len(), 1);
        assert_eq!(tree.proof_for_leaf(0).unwrap().len(), 2);
    }

    #[test]
    fn test_leaves_are_sorted() {
        let tree = AllowlistTree::build((1..=9).map(|i| entry(i, i as u64))).unwrap();
        let leaves = &tree.levels[0];
        assert!(leaves.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_every_leaf_verifies() {
        for size in 1..=17u8 {
            let entries: Vec<_> = (1..=size).map(|i| entry(i, i as u64 * 10)).collect();
            let tree = AllowlistTree::build(entries.clone()).unwrap();
            for e in &entries {
                match tree.proof_for(&e.address) {
                    Eligibility::Eligible { price, proof } => {
                        assert_eq!(price, e.price);
                        assert!(
                            verify(&e.address, price, &proof, &tree.root()),
                            "size {} entry {:?} should verify",
                            size,
                            e.address
                        );
                    }
                    Eligibility::NotEligible => panic!("entry should be eligible"),
                }
            }
        }
    }

    #[test]
    fn test_proof_for_unknown_address() {
        let tree = AllowlistTree::build(vec![entry(1, 100), entry(2, 200)]).unwrap();
        assert_eq!(
            tree.proof_for(&Address::from([9u8; 20])),
            Eligibility::NotEligible
        );
    }

    #[test]
    fn test_proof_for_leaf_out_of_range() {
        let tree = AllowlistTree::build(vec![entry(1, 100)]).unwrap();
        assert!(matches!(
            tree.proof_for_leaf(1),
            Err(Error::LeafIndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_entry_lookup() {
        let tree = AllowlistTree::build(vec![entry(1, 100), entry(2, 200)]).unwrap();
        assert!(tree.contains(&Address::from([2u8; 20])));
        assert_eq!(
            tree.entry(&Address::from([2u8; 20])).map(|e| e.price),
            Some(U256::from(200u64))
        );
        assert_eq!(tree.len(), 2);
    }
}
