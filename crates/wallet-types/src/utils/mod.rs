//! Utility constants.
//!
//! This module provides the defaults the selector layer falls back to.

pub mod constants;

pub use constants::{
	DEFAULT_NFT_VIEW_TYPE, DEFAULT_TOKENS_METADATA_DISPLAY_TYPE, DEFAULT_TOKENS_ORDER_BY,
	DEMO_ACCOUNT_ADDRESS,
};
