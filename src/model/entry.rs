//! Allowlist entries and textual input parsing

use crate::model::leaf::{encode_leaf, Leaf};
use crate::{Error, Result};
use alloy_primitives::{Address, U256};
use std::str::FromStr;

/// One eligible minter and the price they pay, in wei
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AllowlistEntry {
    pub address: Address,
    pub price: U256,
}

impl AllowlistEntry {
    pub fn new(address: Address, price: U256) -> Self {
        AllowlistEntry { address, price }
    }

    /// Parse an entry from its textual address and price
    pub fn parse(address: &str, price: &str) -> Result<Self> {
        Ok(AllowlistEntry {
            address: parse_address(address)?,
            price: parse_price(price)?,
        })
    }

    /// Encode this entry into its leaf bytes
    pub fn leaf(&self) -> Leaf {
        encode_leaf(&self.address, &self.price)
    }
}

/// Parses an Ethereum address from a hex string.
///
/// The `0x` prefix is optional. All-lowercase and all-uppercase forms are
/// accepted without a checksum; mixed case must be a valid EIP-55 checksum.
///
/// # Errors
/// Returns [`Error::InvalidAddressFormat`] if the address is not 40 hex
/// characters or carries a bad checksum.
pub fn parse_address(addr_str: &str) -> Result<Address> {
    let trimmed = addr_str.trim();
    let cleaned = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if cleaned.len() != 40 {
        return Err(Error::InvalidAddressFormat(format!(
            "expected 40 hex chars, got {} in {:?}",
            cleaned.len(),
            addr_str
        )));
    }

    let mut bytes = [0u8; 20];
    hex::decode_to_slice(cleaned, &mut bytes)
        .map_err(|e| Error::InvalidAddressFormat(format!("{:?}: {}", addr_str, e)))?;

    let has_lower = cleaned.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = cleaned.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        Address::parse_checksummed(format!("0x{}", cleaned), None).map_err(|_| {
            Error::InvalidAddressFormat(format!("bad EIP-55 checksum in {:?}", addr_str))
        })?;
    }

    Ok(Address::from(bytes))
}

/// Parses a price in wei.
///
/// Accepts a decimal integer or a `0x`-prefixed hex integer that fits in
/// 256 bits.
///
/// # Errors
/// Returns [`Error::InvalidPriceValue`] for empty, negative, fractional or
/// out-of-range values.
pub fn parse_price(price_str: &str) -> Result<U256> {
    let trimmed = price_str.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidPriceValue("empty price".into()));
    }
    if trimmed.starts_with('-') {
        return Err(Error::InvalidPriceValue(format!(
            "negative price {:?}",
            price_str
        )));
    }
    if trimmed.contains('_') {
        return Err(Error::InvalidPriceValue(format!("{:?}", price_str)));
    }
    U256::from_str(trimmed)
        .map_err(|e| Error::InvalidPriceValue(format!("{:?}: {}", price_str, e)))
}
