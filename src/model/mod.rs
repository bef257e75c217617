//! Core data model types for mintlist

mod entry;
mod hash;
mod leaf;

pub use entry::{parse_address, parse_price, AllowlistEntry};
pub use hash::Hash;
pub use leaf::{encode_leaf, Leaf, LEAF_LEN};
