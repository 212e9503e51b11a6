//! Transaction record types for the wallet state layer.
//!
//! Records are stored in a three level mapping: address, then chain, then
//! transaction key. No ordering is implied by the mapping; `BTreeMap` is used
//! so iteration is deterministic.

use crate::{Address, ChainId};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Lifecycle status of a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionStatus {
	Pending,
	/// Mined and successful.
	#[serde(rename = "confirmed", alias = "success")]
	Success,
	Failed,
	Cancelling,
	Cancelled,
	/// Any status this crate does not model.
	#[serde(other)]
	Unknown,
}

impl fmt::Display for TransactionStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TransactionStatus::Pending => write!(f, "Pending"),
			TransactionStatus::Success => write!(f, "Success"),
			TransactionStatus::Failed => write!(f, "Failed"),
			TransactionStatus::Cancelling => write!(f, "Cancelling"),
			TransactionStatus::Cancelled => write!(f, "Cancelled"),
			TransactionStatus::Unknown => write!(f, "Unknown"),
		}
	}
}

/// Receipt observed once a transaction is included in a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
	pub block_hash: String,
	pub block_number: u64,
	pub transaction_index: u64,
	/// Milliseconds since the epoch when the receipt was observed.
	pub confirmed_time: u64,
	pub gas_used: u64,
	/// Effective gas price as a string in wei.
	pub effective_gas_price: String,
}

/// Operation-specific payload of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TransactionTypeInfo {
	Approve {
		#[serde(rename = "tokenAddress")]
		token_address: Address,
		spender: Address,
	},
	Swap {
		#[serde(rename = "inputCurrencyId")]
		input_currency_id: String,
		#[serde(rename = "outputCurrencyId")]
		output_currency_id: String,
		#[serde(rename = "inputCurrencyAmountRaw")]
		input_currency_amount_raw: String,
		#[serde(rename = "outputCurrencyAmountRaw")]
		output_currency_amount_raw: String,
	},
	Wrap {
		unwrapped: bool,
		#[serde(rename = "currencyAmountRaw")]
		currency_amount_raw: String,
	},
	Send {
		#[serde(rename = "tokenAddress")]
		token_address: Address,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		recipient: Option<Address>,
		#[serde(
			rename = "currencyAmountRaw",
			default,
			skip_serializing_if = "Option::is_none"
		)]
		currency_amount_raw: Option<String>,
	},
	Receive {
		#[serde(rename = "tokenAddress")]
		token_address: Address,
		sender: Address,
		#[serde(
			rename = "currencyAmountRaw",
			default,
			skip_serializing_if = "Option::is_none"
		)]
		currency_amount_raw: Option<String>,
	},
	Unknown {
		#[serde(rename = "toAddress", default, skip_serializing_if = "Option::is_none")]
		to_address: Option<Address>,
	},
}

/// One on-chain or queued operation for one address on one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
	/// Internal identifier, stable across resubmission and speed-up.
	pub id: String,
	pub chain_id: ChainId,
	/// Chain transaction hash. Matched case-insensitively.
	pub hash: String,
	pub from: Address,
	pub status: TransactionStatus,
	/// Milliseconds since the epoch when the record was added.
	pub added_time: u64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub receipt: Option<TransactionReceipt>,
	#[serde(deserialize_with = "deserialize_type_info")]
	pub type_info: TransactionTypeInfo,
}

const KNOWN_TYPE_TAGS: &[&str] = &["approve", "swap", "wrap", "send", "receive", "unknown"];

/// Payloads with a type tag outside [`KNOWN_TYPE_TAGS`] decode as
/// [`TransactionTypeInfo::Unknown`] so one record cannot fail a whole snapshot.
/// Malformed payloads of a known type are still rejected.
fn deserialize_type_info<'de, D>(deserializer: D) -> Result<TransactionTypeInfo, D::Error>
where
	D: Deserializer<'de>,
{
	let value = serde_json::Value::deserialize(deserializer)?;
	let tag = value.get("type").and_then(|tag| tag.as_str());

	match tag {
		Some(tag) if KNOWN_TYPE_TAGS.contains(&tag) => {
			TransactionTypeInfo::deserialize(&value).map_err(de::Error::custom)
		},
		_ => Ok(TransactionTypeInfo::Unknown {
			to_address: value
				.get("toAddress")
				.and_then(|address| address.as_str())
				.map(Address::from),
		}),
	}
}

impl TransactionDetails {
	pub fn new(
		id: impl Into<String>,
		chain_id: ChainId,
		hash: impl Into<String>,
		from: impl Into<Address>,
		type_info: TransactionTypeInfo,
	) -> Self {
		Self {
			id: id.into(),
			chain_id,
			hash: hash.into(),
			from: from.into(),
			status: TransactionStatus::Pending,
			added_time: 0,
			receipt: None,
			type_info,
		}
	}

	pub fn with_status(mut self, status: TransactionStatus) -> Self {
		self.status = status;
		self
	}

	pub fn with_added_time(mut self, added_time: u64) -> Self {
		self.added_time = added_time;
		self
	}

	pub fn with_receipt(mut self, receipt: TransactionReceipt) -> Self {
		self.receipt = Some(receipt);
		self
	}

	/// A transaction is incomplete when no receipt has been observed and it
	/// has not failed.
	pub fn is_incomplete(&self) -> bool {
		self.receipt.is_none() && self.status != TransactionStatus::Failed
	}

	/// Recipient of a send, if this is one and the recipient is set.
	pub fn send_recipient(&self) -> Option<&Address> {
		match &self.type_info {
			TransactionTypeInfo::Send {
				recipient: Some(recipient),
				..
			} if !recipient.is_empty() => Some(recipient),
			_ => None,
		}
	}

	pub fn hash_matches(&self, hash: &str) -> bool {
		self.hash.eq_ignore_ascii_case(hash)
	}
}

/// Transactions of one address on one chain, keyed by transaction key.
pub type ChainTransactions = BTreeMap<String, TransactionDetails>;
/// Transactions of one address, keyed by chain.
pub type AddressTransactions = BTreeMap<ChainId, ChainTransactions>;
/// All transactions, keyed by address.
pub type TransactionsState = BTreeMap<Address, AddressTransactions>;

/// Key of a record after flattening an address's per-chain maps.
///
/// Carries the chain so records from different chains never collide.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionKey {
	pub chain_id: ChainId,
	pub key: String,
}

impl fmt::Display for TransactionKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.chain_id, self.key)
	}
}

/// Past recipient offered by recipient search.
///
/// `name` is left empty; display names are resolved by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchableRecipient {
	pub address: Address,
	pub name: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn send(recipient: Option<&str>) -> TransactionDetails {
		TransactionDetails::new(
			"tx-1",
			ChainId::MAINNET,
			"0xABC",
			"0x01",
			TransactionTypeInfo::Send {
				token_address: "0xeeee".into(),
				recipient: recipient.map(Address::from),
				currency_amount_raw: Some("1000".into()),
			},
		)
	}

	fn receipt() -> TransactionReceipt {
		TransactionReceipt {
			block_hash: "0xblock".into(),
			block_number: 10,
			transaction_index: 0,
			confirmed_time: 1_000,
			gas_used: 21_000,
			effective_gas_price: "1000000000".into(),
		}
	}

	#[test]
	fn test_is_incomplete() {
		assert!(send(None).is_incomplete());
		assert!(!send(None)
			.with_status(TransactionStatus::Failed)
			.is_incomplete());
		assert!(!send(None)
			.with_status(TransactionStatus::Success)
			.with_receipt(receipt())
			.is_incomplete());
		// A failed record is never incomplete, receipt or not
		assert!(!send(None)
			.with_status(TransactionStatus::Failed)
			.with_receipt(receipt())
			.is_incomplete());
		assert!(send(None)
			.with_status(TransactionStatus::Cancelling)
			.is_incomplete());
	}

	#[test]
	fn test_unmodelled_status_and_type_decode_as_unknown() {
		let json = r#"{
			"id": "nft",
			"chainId": 1,
			"hash": "0x2",
			"from": "0x01",
			"status": "replacing",
			"addedTime": 7,
			"typeInfo": { "type": "nft-mint", "toAddress": "0x03", "nftSummaryInfo": {} }
		}"#;
		let tx: TransactionDetails = serde_json::from_str(json).unwrap();
		assert_eq!(tx.status, TransactionStatus::Unknown);
		assert_eq!(
			tx.type_info,
			TransactionTypeInfo::Unknown {
				to_address: Some("0x03".into())
			}
		);
		assert!(tx.is_incomplete());
	}

	#[test]
	fn test_malformed_known_type_is_rejected() {
		let json = r#"{
			"id": "bad",
			"chainId": 1,
			"hash": "0x3",
			"from": "0x01",
			"status": "pending",
			"addedTime": 1,
			"typeInfo": { "type": "send" }
		}"#;
		assert!(serde_json::from_str::<TransactionDetails>(json).is_err());
	}

	#[test]
	fn test_send_recipient() {
		assert_eq!(
			send(Some("0x02")).send_recipient(),
			Some(&Address::from("0x02"))
		);
		assert_eq!(send(None).send_recipient(), None);
		assert_eq!(send(Some("")).send_recipient(), None);
	}

	#[test]
	fn test_hash_matches_ignores_case() {
		assert!(send(None).hash_matches("0xabc"));
		assert!(!send(None).hash_matches("0xabd"));
	}

	#[test]
	fn test_wire_shape() {
		let json = r#"{
			"id": "abc",
			"chainId": 137,
			"hash": "0x1",
			"from": "0x01",
			"status": "confirmed",
			"addedTime": 5,
			"typeInfo": { "type": "wrap", "unwrapped": false, "currencyAmountRaw": "1" }
		}"#;
		let tx: TransactionDetails = serde_json::from_str(json).unwrap();
		assert_eq!(tx.chain_id, ChainId::POLYGON);
		assert_eq!(tx.status, TransactionStatus::Success);
		assert!(matches!(
			tx.type_info,
			TransactionTypeInfo::Wrap {
				unwrapped: false,
				..
			}
		));
	}
}
