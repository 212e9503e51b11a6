//! Account types for the wallet state layer.
//!
//! An account is one wallet key or watched address. Accounts are stored in a
//! map keyed by address, so an address appears at most once.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

/// Checksummed account address.
///
/// Stored exactly as the producer wrote it. Map lookups and comparisons are
/// exact.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
	pub fn new(address: impl Into<String>) -> Self {
		Self(address.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for Address {
	fn from(address: &str) -> Self {
		Self(address.to_string())
	}
}

impl From<String> for Address {
	fn from(address: String) -> Self {
		Self(address)
	}
}

impl Borrow<str> for Address {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for Address {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// The kind of key backing an account.
///
/// Only mnemonic-derived signers carry a derivation index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AccountKind {
	/// Signer derived from a stored mnemonic.
	#[serde(rename = "signerMnemonic")]
	SignerMnemonic {
		#[serde(rename = "derivationIndex")]
		derivation_index: u32,
		#[serde(rename = "mnemonicId")]
		mnemonic_id: String,
	},
	/// Signer imported from a raw private key.
	#[serde(rename = "signerPrivateKey")]
	SignerPrivateKey,
	/// Watched address without signing capability.
	#[serde(rename = "readonly")]
	Readonly,
}

/// Color palette chosen for an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
	pub primary: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub secondary: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub background: Option<String>,
}

/// Local, per-device presentation choices for an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCustomizations {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub palette: Option<Palette>,
	/// Reference to a locally stored profile picture.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub local_pfp: Option<String>,
}

/// One wallet key or watched address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
	pub address: Address,
	#[serde(flatten)]
	pub kind: AccountKind,
	/// User-assigned nickname.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Milliseconds since the epoch when the account was imported.
	#[serde(default)]
	pub time_imported_ms: u64,
	/// Account exists but onboarding has not completed for it.
	#[serde(default)]
	pub pending: bool,
	#[serde(default)]
	pub push_notifications_enabled: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub customizations: Option<AccountCustomizations>,
}

/// Accounts keyed by address.
pub type AccountsMap = BTreeMap<Address, Account>;

impl Account {
	pub fn new(address: impl Into<Address>, kind: AccountKind) -> Self {
		Self {
			address: address.into(),
			kind,
			name: None,
			time_imported_ms: 0,
			pending: false,
			push_notifications_enabled: false,
			customizations: None,
		}
	}

	pub fn with_pending(mut self, pending: bool) -> Self {
		self.pending = pending;
		self
	}

	pub fn with_push_notifications(mut self, enabled: bool) -> Self {
		self.push_notifications_enabled = enabled;
		self
	}

	pub fn with_customizations(mut self, customizations: AccountCustomizations) -> Self {
		self.customizations = Some(customizations);
		self
	}

	/// True for any account that can sign.
	pub fn is_signer(&self) -> bool {
		match self.kind {
			AccountKind::SignerMnemonic { .. } | AccountKind::SignerPrivateKey => true,
			AccountKind::Readonly => false,
		}
	}

	pub fn is_signer_mnemonic(&self) -> bool {
		matches!(self.kind, AccountKind::SignerMnemonic { .. })
	}

	/// Derivation index for mnemonic signers, `None` for everything else.
	pub fn derivation_index(&self) -> Option<u32> {
		match self.kind {
			AccountKind::SignerMnemonic {
				derivation_index, ..
			} => Some(derivation_index),
			AccountKind::SignerPrivateKey | AccountKind::Readonly => None,
		}
	}

	pub fn palette(&self) -> Option<&Palette> {
		self.customizations.as_ref()?.palette.as_ref()
	}

	pub fn local_pfp(&self) -> Option<&str> {
		self.customizations.as_ref()?.local_pfp.as_deref()
	}
}
