//! Chain identifiers used to key per-chain transaction maps.
//!
//! Chain ids serialize as plain integers. When used as JSON object keys they
//! appear as decimal strings, which `serde_json` converts transparently.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Network identifier (EIP-155 chain id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
	pub const MAINNET: ChainId = ChainId(1);
	pub const OPTIMISM: ChainId = ChainId(10);
	pub const POLYGON: ChainId = ChainId(137);
	pub const BASE: ChainId = ChainId(8453);
}

impl fmt::Display for ChainId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<u64> for ChainId {
	fn from(id: u64) -> Self {
		Self(id)
	}
}

/// Error returned when a chain id string is neither decimal nor `0x` hex.
#[derive(Debug, Error)]
#[error("Invalid chain_id '{input}': {reason}")]
pub struct ParseChainIdError {
	pub input: String,
	pub reason: String,
}

impl FromStr for ChainId {
	type Err = ParseChainIdError;

	/// Accepts decimal ("137") and hex ("0x89") forms.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let trimmed = s.trim();
		let parsed = match trimmed
			.strip_prefix("0x")
			.or_else(|| trimmed.strip_prefix("0X"))
		{
			Some(hex) => u64::from_str_radix(hex, 16),
			None => trimmed.parse::<u64>(),
		};

		parsed.map(ChainId).map_err(|e| ParseChainIdError {
			input: s.to_string(),
			reason: e.to_string(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_decimal_and_hex() {
		assert_eq!("137".parse::<ChainId>().unwrap(), ChainId::POLYGON);
		assert_eq!("0x89".parse::<ChainId>().unwrap(), ChainId::POLYGON);
		assert_eq!(" 1 ".parse::<ChainId>().unwrap(), ChainId::MAINNET);
	}

	#[test]
	fn test_parse_invalid() {
		let err = "mainnet".parse::<ChainId>().unwrap_err();
		assert!(err.to_string().contains("mainnet"));
	}
}
