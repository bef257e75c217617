//! Allowlist merkle tree
//!
//! - leaves are `keccak256(abi.encodePacked(address, uint256 price))`
//! - sibling pairs are sorted before hashing
//! - an odd node at the end of a level is promoted unchanged
//!
//! These rules match OpenZeppelin's `MerkleProof.verify`, so roots and
//! proofs produced here can be checked by the mint contract directly.

mod builder;
mod proof;
mod state;

pub use builder::AllowlistTree;
pub use proof::{hash_pair, process_proof, verify, verify_leaf, Proof};
pub use state::{initialize, Eligibility, TreeState};
