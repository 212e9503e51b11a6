//! Wallet-level display settings.

use serde::{Deserialize, Serialize};

/// How NFTs are laid out on the portfolio screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NftViewType {
	#[default]
	Grid,
	Collection,
}

/// Orderings for token lists.
///
/// The first four are computed by the market data provider; the price-change
/// orderings are applied client side. Both token ordering and the metadata
/// column use this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokensOrderBy {
	MarketCapAsc,
	MarketCapDesc,
	VolumeAsc,
	VolumeDesc,
	#[serde(rename = "price_change_percentage_24h_asc")]
	PriceChangePercentage24hAsc,
	#[serde(rename = "price_change_percentage_24h_desc")]
	PriceChangePercentage24hDesc,
}

/// Stored wallet settings. Unset options fall back to defaults in the
/// selector layer, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSettings {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub nft_view_type: Option<NftViewType>,
	#[serde(default)]
	pub show_small_balances: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tokens_order_by: Option<TokensOrderBy>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tokens_metadata_display_type: Option<TokensOrderBy>,
}
