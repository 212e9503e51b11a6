//! Shared constants.

use crate::{NftViewType, TokensOrderBy};

/// Address of the built-in demo account. Excluded from mnemonic account
/// listings so it never interferes with account creation.
pub const DEMO_ACCOUNT_ADDRESS: &str = "0xdd0E380579dF30E38524F9477808d9eE37E2dEa6";

pub const DEFAULT_NFT_VIEW_TYPE: NftViewType = NftViewType::Grid;

pub const DEFAULT_TOKENS_ORDER_BY: TokensOrderBy = TokensOrderBy::MarketCapDesc;

pub const DEFAULT_TOKENS_METADATA_DISPLAY_TYPE: TokensOrderBy =
	TokensOrderBy::PriceChangePercentage24hDesc;
