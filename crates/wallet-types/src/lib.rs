//! Common types module for the wallet state layer.
//!
//! This module defines the normalized state tree that the selector layer reads:
//! accounts keyed by address, wallet settings, and transactions keyed by
//! address, then chain, then transaction key. It provides a centralized
//! location for shared types so every consumer agrees on the same shape.

/// Account types: addresses, account kinds and per-account customizations.
pub mod account;
/// Chain identifiers and well-known networks.
pub mod chains;
/// Wallet-level display settings and their orderings.
pub mod settings;
/// The root state tree and its copy-on-write update helpers.
pub mod state;
/// Transaction records, statuses, receipts and operation payloads.
pub mod transaction;
/// Settings defaults and the demo account address.
pub mod utils;

/// Fixtures for building accounts, transactions and states in tests.
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export all types for convenient access
pub use account::*;
pub use chains::{ChainId, ParseChainIdError};
pub use settings::*;
pub use state::*;
pub use transaction::*;
pub use utils::{
	DEFAULT_NFT_VIEW_TYPE, DEFAULT_TOKENS_METADATA_DISPLAY_TYPE, DEFAULT_TOKENS_ORDER_BY,
	DEMO_ACCOUNT_ADDRESS,
};
