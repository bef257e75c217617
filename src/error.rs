//! Error types for mintlist

use crate::model::Hash;
use alloy_primitives::Address;
use thiserror::Error;

/// Result type alias for mintlist operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mintlist operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid address format: {0}")]
    InvalidAddressFormat(String),

    #[error("Invalid price value: {0}")]
    InvalidPriceValue(String),

    #[error("Duplicate allowlist entry for address {0}")]
    DuplicateEntry(Address),

    #[error("Allowlist is empty")]
    EmptyAllowlist,

    #[error("Merkle root mismatch: expected {expected}, computed {computed}")]
    RootMismatch { expected: Hash, computed: Hash },

    #[error("Invalid proof: {0}")]
    InvalidProof(String),

    #[error("Leaf index {index} is out of range for tree with {len} leaves")]
    LeafIndexOutOfRange { index: usize, len: usize },

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Contract {contract} is not deployed on {network}")]
    UnknownContract { contract: String, network: String },

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
