//! Pinned-root initialization and the query interface

use super::builder::AllowlistTree;
use super::proof::Proof;
use crate::model::{AllowlistEntry, Hash};
use crate::{Error, Result};
use alloy_primitives::{Address, U256};
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{error, info};

/// Outcome of an allowlist lookup
///
/// `NotEligible` is an ordinary answer, not a failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Eligibility {
    Eligible { price: U256, proof: Proof },
    NotEligible,
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible { .. })
    }

    pub fn price(&self) -> Option<U256> {
        match self {
            Eligibility::Eligible { price, .. } => Some(*price),
            Eligibility::NotEligible => None,
        }
    }

    pub fn proof(&self) -> Option<&Proof> {
        match self {
            Eligibility::Eligible { proof, .. } => Some(proof),
            Eligibility::NotEligible => None,
        }
    }
}

/// Serializes as `{"eligible": true, "price": "<wei>", "proof": [..]}` or
/// `{"eligible": false}`
impl Serialize for Eligibility {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Eligibility::Eligible { price, proof } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("eligible", &true)?;
                map.serialize_entry("price", &price.to_string())?;
                map.serialize_entry("proof", proof)?;
                map.end()
            }
            Eligibility::NotEligible => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("eligible", &false)?;
                map.end()
            }
        }
    }
}

/// A tree that has been checked against its pinned root
#[derive(Clone, Debug)]
pub enum TreeState {
    /// Root matches; proofs may be served
    Ready(AllowlistTree),
    /// Root mismatch; every query is refused
    Corrupted { expected: Hash, computed: Hash },
}

/// Build the tree and check it against the externally pinned root.
///
/// Build errors (empty, duplicate, ...) are returned as `Err`. A root
/// mismatch is not an error here: it produces [`TreeState::Corrupted`],
/// which then refuses every query.
pub fn initialize(
    entries: impl IntoIterator<Item = AllowlistEntry>,
    expected_root: Hash,
) -> Result<TreeState> {
    let tree = AllowlistTree::build(entries)?;
    Ok(TreeState::pin(tree, expected_root))
}

impl TreeState {
    /// Compare a built tree's root with the expected one
    pub fn pin(tree: AllowlistTree, expected_root: Hash) -> Self {
        let computed = tree.root();
        if computed == expected_root {
            info!(root = %computed, entries = tree.len(), "allowlist tree ready");
            TreeState::Ready(tree)
        } else {
            error!(
                expected = %expected_root,
                computed = %computed,
                "merkle root mismatch, refusing to serve proofs"
            );
            TreeState::Corrupted {
                expected: expected_root,
                computed,
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, TreeState::Ready(_))
    }

    /// The computed root, whichever state the tree is in
    pub fn root(&self) -> Hash {
        match self {
            TreeState::Ready(tree) => tree.root(),
            TreeState::Corrupted { computed, .. } => *computed,
        }
    }

    /// Access the tree, failing closed if it is corrupted
    pub fn tree(&self) -> Result<&AllowlistTree> {
        match self {
            TreeState::Ready(tree) => Ok(tree),
            TreeState::Corrupted { expected, computed } => Err(Error::RootMismatch {
                expected: *expected,
                computed: *computed,
            }),
        }
    }

    /// Eligibility of `address`, or [`Error::RootMismatch`] if corrupted
    pub fn query(&self, address: &Address) -> Result<Eligibility> {
        Ok(self.tree()?.proof_for(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::verify;

    fn entries() -> Vec<AllowlistEntry> {
        vec![
            AllowlistEntry::new(Address::from([1u8; 20]), U256::from(100u64)),
            AllowlistEntry::new(Address::from([2u8; 20]), U256::from(200u64)),
            AllowlistEntry::new(Address::from([3u8; 20]), U256::from(300u64)),
        ]
    }

    fn expected_root() -> Hash {
        AllowlistTree::build(entries()).unwrap().root()
    }

    #[test]
    fn test_initialize_ready() {
        let state = initialize(entries(), expected_root()).unwrap();
        assert!(state.is_ready());

        let eligibility = state.query(&Address::from([2u8; 20])).unwrap();
        assert_eq!(eligibility.price(), Some(U256::from(200u64)));
        let proof = eligibility.proof().unwrap();
        assert!(verify(
            &Address::from([2u8; 20]),
            U256::from(200u64),
            proof,
            &state.root()
        ));
    }

    #[test]
    fn test_initialize_corrupted_refuses_queries() {
        let wrong = Hash::digest(b"not the root");
        let state = initialize(entries(), wrong).unwrap();
        assert!(!state.is_ready());
        assert_eq!(state.root(), expected_root());

        // Refused even for addresses that are on the list
        let result = state.query(&Address::from([1u8; 20]));
        match result {
            Err(Error::RootMismatch { expected, computed }) => {
                assert_eq!(expected, wrong);
                assert_eq!(computed, expected_root());
            }
            other => panic!("expected RootMismatch, got {:?}", other),
        }
        assert!(state.query(&Address::from([9u8; 20])).is_err());
        assert!(state.tree().is_err());
    }

    #[test]
    fn test_initialize_propagates_build_errors() {
        let result = initialize(Vec::new(), Hash::ZERO);
        assert!(matches!(result, Err(Error::EmptyAllowlist)));
    }

    #[test]
    fn test_not_eligible_is_a_value() {
        let state = initialize(entries(), expected_root()).unwrap();
        let eligibility = state.query(&Address::from([9u8; 20])).unwrap();
        assert!(!eligibility.is_eligible());
        assert_eq!(eligibility.price(), None);
        assert!(eligibility.proof().is_none());
    }

    #[test]
    fn test_eligibility_json_shape() {
        let not = serde_json::to_value(Eligibility::NotEligible).unwrap();
        assert_eq!(not, serde_json::json!({ "eligible": false }));

        let sibling = Hash::digest(b"sibling");
        let yes = serde_json::to_value(Eligibility::Eligible {
            price: U256::from(5u64),
            proof: Proof::new(vec![sibling]),
        })
        .unwrap();
        assert_eq!(
            yes,
            serde_json::json!({
                "eligible": true,
                "price": "5",
                "proof": [sibling.to_hex()]
            })
        );
    }
}
