//! Account selectors.
//!
//! Read-only views of the accounts map, the active account pointer and the
//! wallet settings. Direct field reads are plain functions; derived views are
//! memoized on the accounts `Arc` (and the active address where relevant).

use crate::memo::Selector;
use crate::registry::SelectorRegistry;
use once_cell::sync::Lazy;
use std::sync::Arc;
use wallet_types::{
	Account, AccountsMap, Address, NftViewType, Palette, RootState, TokensOrderBy,
	DEFAULT_NFT_VIEW_TYPE, DEFAULT_TOKENS_METADATA_DISPLAY_TYPE, DEFAULT_TOKENS_ORDER_BY,
	DEMO_ACCOUNT_ADDRESS,
};

/// Selector memoized on the accounts map alone.
pub type AccountsSelector<O> = Selector<Arc<AccountsMap>, O>;

type ActiveInputs = (Arc<AccountsMap>, Option<Address>);

pub fn select_accounts(state: &RootState) -> Arc<AccountsMap> {
	Arc::clone(&state.wallet.accounts)
}

fn filter_accounts(accounts: &AccountsMap, keep: impl Fn(&Account) -> bool) -> AccountsMap {
	accounts
		.iter()
		.filter(|(_, account)| keep(account))
		.map(|(address, account)| (address.clone(), account.clone()))
		.collect()
}

// The demo account is excluded to avoid account creation issues.
fn is_mnemonic_signer_excluding_demo(account: &Account) -> bool {
	account.is_signer_mnemonic() && account.address.as_str() != DEMO_ACCOUNT_ADDRESS
}

static NON_PENDING_ACCOUNTS: Lazy<AccountsSelector<AccountsMap>> = Lazy::new(|| {
	Selector::new("select_non_pending_accounts", select_accounts, |accounts| {
		filter_accounts(accounts, |account| !account.pending)
	})
});

static PENDING_ACCOUNTS: Lazy<AccountsSelector<AccountsMap>> = Lazy::new(|| {
	Selector::new("select_pending_accounts", select_accounts, |accounts| {
		filter_accounts(accounts, |account| account.pending)
	})
});

static SIGNER_ACCOUNTS: Lazy<AccountsSelector<Vec<Account>>> = Lazy::new(|| {
	Selector::new("select_signer_accounts", select_accounts, |accounts| {
		accounts
			.values()
			.filter(|account| account.is_signer())
			.cloned()
			.collect()
	})
});

static SORTED_SIGNER_MNEMONIC_ACCOUNTS: Lazy<AccountsSelector<Vec<Account>>> = Lazy::new(|| {
	Selector::new(
		"select_sorted_signer_mnemonic_accounts",
		select_accounts,
		|accounts| {
			let mut mnemonic_accounts: Vec<Account> = accounts
				.values()
				.filter(|account| is_mnemonic_signer_excluding_demo(account))
				.cloned()
				.collect();
			// Stable: equal indices keep address order
			mnemonic_accounts.sort_by_key(|account| account.derivation_index());
			mnemonic_accounts
		},
	)
});

static SIGNER_MNEMONIC_ACCOUNT_EXISTS: Lazy<Selector<Arc<AccountsMap>, bool>> = Lazy::new(|| {
	Selector::new(
		"select_signer_mnemonic_account_exists",
		select_non_pending_accounts,
		|accounts| accounts.values().any(is_mnemonic_signer_excluding_demo),
	)
});

static ACTIVE_ACCOUNT: Lazy<Selector<ActiveInputs, Option<Account>>> = Lazy::new(|| {
	Selector::new(
		"select_active_account",
		|state: &RootState| (select_accounts(state), select_active_account_address(state)),
		|(accounts, active_address)| {
			active_address
				.as_ref()
				.and_then(|address| accounts.get(address))
				.cloned()
		},
	)
});

static USER_PALETTE: Lazy<Selector<Arc<Option<Account>>, Option<Palette>>> = Lazy::new(|| {
	Selector::new("select_user_palette", select_active_account, |account| {
		(**account).as_ref().and_then(Account::palette).cloned()
	})
});

static INACTIVE_ACCOUNT_ADDRESSES: Lazy<Selector<ActiveInputs, Vec<Address>>> = Lazy::new(|| {
	Selector::new(
		"select_inactive_account_addresses",
		|state: &RootState| (select_accounts(state), select_active_account_address(state)),
		|(accounts, active_address)| {
			accounts
				.keys()
				.filter(|address| Some(*address) != active_address.as_ref())
				.cloned()
				.collect()
		},
	)
});

static INACTIVE_ACCOUNTS: Lazy<Selector<ActiveInputs, Vec<Account>>> = Lazy::new(|| {
	Selector::new(
		"select_inactive_accounts",
		|state: &RootState| (select_accounts(state), select_active_account_address(state)),
		|(accounts, active_address)| {
			accounts
				.values()
				.filter(|account| Some(&account.address) != active_address.as_ref())
				.cloned()
				.collect()
		},
	)
});

static LOCAL_PFP_SELECTORS: Lazy<SelectorRegistry<Address, AccountsSelector<Option<String>>>> =
	Lazy::new(|| SelectorRegistry::new("local_pfp"));

static NOTIFICATION_SETTING_SELECTORS: Lazy<SelectorRegistry<Address, AccountsSelector<bool>>> =
	Lazy::new(|| SelectorRegistry::new("account_notification_setting"));

/// Accounts that have finished onboarding.
pub fn select_non_pending_accounts(state: &RootState) -> Arc<AccountsMap> {
	NON_PENDING_ACCOUNTS.select(state)
}

/// Accounts still being onboarded. Together with
/// [`select_non_pending_accounts`] this partitions the accounts map.
pub fn select_pending_accounts(state: &RootState) -> Arc<AccountsMap> {
	PENDING_ACCOUNTS.select(state)
}

/// Every account that can sign.
pub fn select_signer_accounts(state: &RootState) -> Arc<Vec<Account>> {
	SIGNER_ACCOUNTS.select(state)
}

/// Mnemonic signers other than the demo account, ascending by derivation
/// index.
pub fn select_sorted_signer_mnemonic_accounts(state: &RootState) -> Arc<Vec<Account>> {
	SORTED_SIGNER_MNEMONIC_ACCOUNTS.select(state)
}

/// Whether a non-pending mnemonic signer other than the demo account exists.
pub fn select_signer_mnemonic_account_exists(state: &RootState) -> bool {
	*SIGNER_MNEMONIC_ACCOUNT_EXISTS.select(state)
}

pub fn select_active_account_address(state: &RootState) -> Option<Address> {
	state.wallet.active_account_address.clone()
}

/// The account the active pointer names, if it exists.
pub fn select_active_account(state: &RootState) -> Arc<Option<Account>> {
	ACTIVE_ACCOUNT.select(state)
}

pub fn select_user_palette(state: &RootState) -> Arc<Option<Palette>> {
	USER_PALETTE.select(state)
}

pub fn make_select_local_pfp(address: Address) -> AccountsSelector<Option<String>> {
	Selector::new(
		format!("make_select_local_pfp({})", address),
		select_accounts,
		move |accounts| {
			accounts
				.get(&address)
				.and_then(Account::local_pfp)
				.map(str::to_string)
		},
	)
}

/// Local profile picture of `address`, through a shared per-address selector.
pub fn select_local_pfp(state: &RootState, address: &Address) -> Arc<Option<String>> {
	LOCAL_PFP_SELECTORS
		.get_or_insert_with(address.clone(), |address| {
			make_select_local_pfp(address.clone())
		})
		.select(state)
}

pub fn select_finished_onboarding(state: &RootState) -> bool {
	state.wallet.finished_onboarding
}

pub fn select_flashbots_enabled(state: &RootState) -> bool {
	state.wallet.flashbots_enabled
}

pub fn select_nft_view_type(state: &RootState) -> NftViewType {
	state
		.wallet
		.settings
		.nft_view_type
		.unwrap_or(DEFAULT_NFT_VIEW_TYPE)
}

pub fn select_hide_small_balances(state: &RootState) -> bool {
	!state.wallet.settings.show_small_balances
}

pub fn select_tokens_order_by(state: &RootState) -> TokensOrderBy {
	state
		.wallet
		.settings
		.tokens_order_by
		.unwrap_or(DEFAULT_TOKENS_ORDER_BY)
}

pub fn select_tokens_metadata_display_type(state: &RootState) -> TokensOrderBy {
	state
		.wallet
		.settings
		.tokens_metadata_display_type
		.unwrap_or(DEFAULT_TOKENS_METADATA_DISPLAY_TYPE)
}

/// Addresses of every account except the active one.
pub fn select_inactive_account_addresses(state: &RootState) -> Arc<Vec<Address>> {
	INACTIVE_ACCOUNT_ADDRESSES.select(state)
}

pub fn select_inactive_accounts(state: &RootState) -> Arc<Vec<Account>> {
	INACTIVE_ACCOUNTS.select(state)
}

/// `false` both when the account is missing and when notifications are off.
pub fn make_select_account_notification_setting(address: Address) -> AccountsSelector<bool> {
	Selector::new(
		format!("make_select_account_notification_setting({})", address),
		select_accounts,
		move |accounts| {
			accounts
				.get(&address)
				.is_some_and(|account| account.push_notifications_enabled)
		},
	)
}

pub fn select_account_notification_setting(state: &RootState, address: &Address) -> bool {
	*NOTIFICATION_SETTING_SELECTORS
		.get_or_insert_with(address.clone(), |address| {
			make_select_account_notification_setting(address.clone())
		})
		.select(state)
}

#[cfg(test)]
mod tests {
	use super::*;
	use wallet_types::testing::{
		mnemonic_account, palette, private_key_account, readonly_account, state_with,
	};
	use wallet_types::{AccountCustomizations, WalletSettings};

	const A1: &str = "0x1111111111111111111111111111111111111111";
	const A2: &str = "0x2222222222222222222222222222222222222222";
	const A3: &str = "0x3333333333333333333333333333333333333333";
	const A4: &str = "0x4444444444444444444444444444444444444444";

	fn mixed_state() -> RootState {
		state_with(
			[
				mnemonic_account(A1, 0),
				mnemonic_account(A2, 1).with_pending(true),
				private_key_account(A3),
				readonly_account(A4).with_pending(true),
			],
			Some(A1),
			[],
		)
	}

	#[test]
	fn test_select_accounts_is_identity() {
		let state = mixed_state();
		assert!(Arc::ptr_eq(&select_accounts(&state), &state.wallet.accounts));
	}

	#[test]
	fn test_pending_partition() {
		let state = mixed_state();
		let non_pending = select_non_pending_accounts(&state);
		let pending = select_pending_accounts(&state);

		assert!(non_pending.keys().all(|address| !pending.contains_key(address)));
		let mut union = (*non_pending).clone();
		union.extend(pending.iter().map(|(k, v)| (k.clone(), v.clone())));
		assert_eq!(union, *state.wallet.accounts);

		assert_eq!(
			non_pending.keys().map(Address::as_str).collect::<Vec<_>>(),
			vec![A1, A3]
		);
		assert_eq!(
			pending.keys().map(Address::as_str).collect::<Vec<_>>(),
			vec![A2, A4]
		);
	}

	#[test]
	fn test_signer_accounts_exclude_readonly() {
		let state = mixed_state();
		let signers = select_signer_accounts(&state);

		assert_eq!(signers.len(), 3);
		assert!(signers.iter().all(Account::is_signer));
		let excluded: Vec<_> = state
			.wallet
			.accounts
			.values()
			.filter(|account| !signers.contains(account))
			.collect();
		assert_eq!(excluded.len(), 1);
		assert!(!excluded[0].is_signer());
	}

	#[test]
	fn test_sorted_signer_mnemonic_accounts() {
		let state = state_with(
			[
				mnemonic_account(A1, 3),
				mnemonic_account(A2, 1),
				mnemonic_account(A3, 2),
				private_key_account(A4),
				mnemonic_account(DEMO_ACCOUNT_ADDRESS, 0),
			],
			None,
			[],
		);

		let sorted = select_sorted_signer_mnemonic_accounts(&state);
		let indices: Vec<_> = sorted.iter().filter_map(Account::derivation_index).collect();
		assert_eq!(indices, vec![1, 2, 3]);
		assert!(sorted
			.iter()
			.all(|account| account.address.as_str() != DEMO_ACCOUNT_ADDRESS));
	}

	#[test]
	fn test_sorted_signer_mnemonic_accounts_stable_on_ties() {
		let state = state_with(
			[
				mnemonic_account(A3, 1),
				mnemonic_account(A1, 1),
				mnemonic_account(A2, 0),
			],
			None,
			[],
		);

		let sorted = select_sorted_signer_mnemonic_accounts(&state);
		let addresses: Vec<_> = sorted.iter().map(|a| a.address.as_str()).collect();
		assert_eq!(addresses, vec![A2, A1, A3]);
	}

	#[test]
	fn test_signer_mnemonic_account_exists() {
		let only_demo = state_with([mnemonic_account(DEMO_ACCOUNT_ADDRESS, 0)], None, []);
		assert!(!select_signer_mnemonic_account_exists(&only_demo));

		let only_pending = state_with([mnemonic_account(A1, 0).with_pending(true)], None, []);
		assert!(!select_signer_mnemonic_account_exists(&only_pending));

		let only_private_key = state_with([private_key_account(A1)], None, []);
		assert!(!select_signer_mnemonic_account_exists(&only_private_key));

		let present = state_with([mnemonic_account(A1, 0)], None, []);
		assert!(select_signer_mnemonic_account_exists(&present));
	}

	#[test]
	fn test_active_account() {
		let state = mixed_state();
		let active = select_active_account(&state);
		assert_eq!(
			(*active).as_ref().map(|a| a.address.as_str()),
			Some(A1)
		);

		let none = state.with_active_account(None);
		assert!(select_active_account(&none).is_none());

		let dangling = state.with_active_account(Some("0xdead".into()));
		assert!(select_active_account(&dangling).is_none());
	}

	#[test]
	fn test_user_palette() {
		let state = state_with(
			[
				mnemonic_account(A1, 0).with_customizations(palette("#FF0000")),
				mnemonic_account(A2, 1),
			],
			Some(A1),
			[],
		);
		assert_eq!(
			(*select_user_palette(&state)).as_ref().map(|p| p.primary.clone()),
			Some("#FF0000".to_string())
		);

		let other = state.with_active_account(Some(A2.into()));
		assert!(select_user_palette(&other).is_none());

		let nobody = state.with_active_account(None);
		assert!(select_user_palette(&nobody).is_none());
	}

	#[test]
	fn test_local_pfp() {
		let state = state_with(
			[
				mnemonic_account(A1, 0).with_customizations(AccountCustomizations {
					palette: None,
					local_pfp: Some("file:///a1.png".into()),
				}),
				mnemonic_account(A2, 1),
			],
			None,
			[],
		);

		let a1 = make_select_local_pfp(A1.into());
		let a2 = make_select_local_pfp(A2.into());
		assert_eq!(a1.select(&state).as_deref(), Some("file:///a1.png"));
		assert_eq!(a2.select(&state).as_deref(), None);
		assert_eq!(
			select_local_pfp(&state, &A1.into()).as_deref(),
			Some("file:///a1.png")
		);
		assert_eq!(
			select_local_pfp(&state, &Address::from("0xmissing")).as_deref(),
			None
		);
	}

	#[test]
	fn test_settings_defaults() {
		let state = RootState::default();
		assert_eq!(select_nft_view_type(&state), NftViewType::Grid);
		assert_eq!(select_tokens_order_by(&state), TokensOrderBy::MarketCapDesc);
		assert_eq!(
			select_tokens_metadata_display_type(&state),
			TokensOrderBy::PriceChangePercentage24hDesc
		);
		assert!(select_hide_small_balances(&state));
		assert!(!select_finished_onboarding(&state));
		assert!(!select_flashbots_enabled(&state));
	}

	#[test]
	fn test_settings_overrides() {
		let state = RootState::default().with_settings(WalletSettings {
			nft_view_type: Some(NftViewType::Collection),
			show_small_balances: true,
			tokens_order_by: Some(TokensOrderBy::VolumeDesc),
			tokens_metadata_display_type: Some(TokensOrderBy::MarketCapAsc),
		});
		assert_eq!(select_nft_view_type(&state), NftViewType::Collection);
		assert!(!select_hide_small_balances(&state));
		assert_eq!(select_tokens_order_by(&state), TokensOrderBy::VolumeDesc);
		assert_eq!(
			select_tokens_metadata_display_type(&state),
			TokensOrderBy::MarketCapAsc
		);
	}

	#[test]
	fn test_inactive_accounts() {
		let state = mixed_state();
		let addresses = select_inactive_account_addresses(&state);
		assert_eq!(
			addresses.iter().map(Address::as_str).collect::<Vec<_>>(),
			vec![A2, A3, A4]
		);
		let accounts = select_inactive_accounts(&state);
		assert_eq!(accounts.len(), 3);
		assert!(accounts.iter().all(|a| a.address.as_str() != A1));

		let no_active = state.with_active_account(None);
		assert_eq!(select_inactive_account_addresses(&no_active).len(), 4);
		assert_eq!(select_inactive_accounts(&no_active).len(), 4);
	}

	#[test]
	fn test_notification_setting_is_never_absent() {
		let state = state_with(
			[
				mnemonic_account(A1, 0).with_push_notifications(true),
				mnemonic_account(A2, 1),
			],
			None,
			[],
		);

		assert!(*make_select_account_notification_setting(A1.into()).select(&state));
		assert!(!*make_select_account_notification_setting(A2.into()).select(&state));
		assert!(!*make_select_account_notification_setting(A3.into()).select(&state));
		assert!(select_account_notification_setting(&state, &A1.into()));
		assert!(!select_account_notification_setting(&state, &A3.into()));
	}
}
