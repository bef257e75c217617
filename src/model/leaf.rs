//! Leaf encoding: `abi.encodePacked(address, uint256)`

use crate::model::Hash;
use alloy_primitives::{Address, U256};

/// Byte length of an encoded leaf: 20 address bytes + 32 price bytes
pub const LEAF_LEN: usize = 20 + 32;

/// The fixed-width encoding of one allowlist entry
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Leaf([u8; LEAF_LEN]);

impl Leaf {
    pub fn as_bytes(&self) -> &[u8; LEAF_LEN] {
        &self.0
    }

    /// The level-0 tree node for this leaf
    pub fn hash(&self) -> Hash {
        Hash::digest(&self.0)
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl std::fmt::Debug for Leaf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Leaf({})", self.to_hex())
    }
}

/// Encodes an (address, price) pair into leaf bytes.
///
/// The address is written as its raw 20 bytes, followed by the price as a
/// 32-byte big-endian integer, matching Solidity's packed encoding so the
/// on-chain verifier can rebuild the leaf from `msg.sender` and the price.
pub fn encode_leaf(address: &Address, price: &U256) -> Leaf {
    let mut out = [0u8; LEAF_LEN];
    out[..20].copy_from_slice(address.as_slice());
    out[20..].copy_from_slice(&price.to_be_bytes::<32>());
    Leaf(out)
}
