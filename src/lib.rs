//! # mintlist
//!
//! Merkle allowlist commitments for NFT mints.
//!
//! An allowlist of `(address, price)` pairs is committed to a single
//! keccak-256 merkle root. The root is published to the mint contract;
//! each eligible wallet gets a short inclusion proof that the contract (or
//! anyone else) can check without seeing the rest of the list.
//!
//! ## Core Concepts
//!
//! - **Entries**: an address and the price it mints at, in wei
//! - **Leaves**: `abi.encodePacked(address, uint256)`, hashed with keccak-256
//! - **Tree**: sorted-pair binary merkle tree, odd nodes promoted
//! - **Tree state**: `Ready` when the root matches the pinned value,
//!   `Corrupted` otherwise (every query refused)
//! - **Sessions**: per-wallet memo of the eligibility answer
//!
//! ## Example
//!
//! ```ignore
//! use mintlist::{dataset, initialize, parse_address};
//!
//! let entries = dataset::load_entries("allowlist.csv")?;
//! let state = initialize(entries, expected_root)?;
//! let eligibility = state.query(&parse_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")?)?;
//! ```

pub mod config;
pub mod dataset;
pub mod model;
pub mod network;
pub mod session;
pub mod tree;

mod error;

pub use config::Config;
pub use error::{Error, Result};
pub use model::{encode_leaf, parse_address, parse_price, AllowlistEntry, Hash, Leaf};
pub use network::{ContractRegistry, Network};
pub use session::ProofSession;
pub use tree::{initialize, verify, AllowlistTree, Eligibility, Proof, TreeState};

pub use alloy_primitives::{Address, U256};
