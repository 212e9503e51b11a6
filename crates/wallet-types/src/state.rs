//! The root state tree read by the selector layer.
//!
//! Every sub-tree sits behind an `Arc`. Updates never mutate in place: the
//! `with_*` helpers build a new state that shares every untouched sub-tree
//! with the previous one. Selectors detect change by comparing those `Arc`s.

use crate::{AccountsMap, Address, TransactionsState, WalletSettings};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while decoding or encoding a state snapshot.
#[derive(Debug, Error)]
pub enum StateError {
	/// The snapshot is not valid JSON or does not match the state shape.
	#[error("Serialization error: {0}")]
	Serialization(String),
}

/// Wallet slice of the state tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletState {
	#[serde(default)]
	pub accounts: Arc<AccountsMap>,
	/// Weak pointer into `accounts`; may name an address that is not present.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub active_account_address: Option<Address>,
	#[serde(default)]
	pub settings: Arc<WalletSettings>,
	#[serde(default)]
	pub finished_onboarding: bool,
	#[serde(default)]
	pub flashbots_enabled: bool,
}

impl WalletState {
	pub fn with_accounts(&self, accounts: AccountsMap) -> Self {
		Self {
			accounts: Arc::new(accounts),
			..self.clone()
		}
	}

	pub fn with_active_account(&self, address: Option<Address>) -> Self {
		Self {
			active_account_address: address,
			..self.clone()
		}
	}

	pub fn with_settings(&self, settings: WalletSettings) -> Self {
		Self {
			settings: Arc::new(settings),
			..self.clone()
		}
	}
}

/// Root of the normalized state tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootState {
	#[serde(default)]
	pub wallet: Arc<WalletState>,
	#[serde(default)]
	pub transactions: Arc<TransactionsState>,
}

impl RootState {
	pub fn new(wallet: WalletState, transactions: TransactionsState) -> Self {
		Self {
			wallet: Arc::new(wallet),
			transactions: Arc::new(transactions),
		}
	}

	/// Decodes a state snapshot from JSON bytes.
	pub fn from_json(bytes: &[u8]) -> Result<Self, StateError> {
		serde_json::from_slice(bytes).map_err(|e| StateError::Serialization(e.to_string()))
	}

	/// Encodes the state as JSON bytes.
	pub fn to_json(&self) -> Result<Vec<u8>, StateError> {
		serde_json::to_vec(self).map_err(|e| StateError::Serialization(e.to_string()))
	}

	pub fn with_wallet(&self, wallet: WalletState) -> Self {
		Self {
			wallet: Arc::new(wallet),
			transactions: Arc::clone(&self.transactions),
		}
	}

	pub fn with_accounts(&self, accounts: AccountsMap) -> Self {
		self.with_wallet(self.wallet.with_accounts(accounts))
	}

	pub fn with_active_account(&self, address: Option<Address>) -> Self {
		self.with_wallet(self.wallet.with_active_account(address))
	}

	pub fn with_settings(&self, settings: WalletSettings) -> Self {
		self.with_wallet(self.wallet.with_settings(settings))
	}

	pub fn with_transactions(&self, transactions: TransactionsState) -> Self {
		Self {
			wallet: Arc::clone(&self.wallet),
			transactions: Arc::new(transactions),
		}
	}
}
