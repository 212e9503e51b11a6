//! Fixtures for building accounts, transactions and states in tests.

use crate::{
	Account, AccountCustomizations, AccountKind, AccountsMap, Address, ChainId, Palette,
	RootState, TransactionDetails, TransactionReceipt, TransactionTypeInfo, TransactionsState,
	WalletState,
};

pub fn mnemonic_account(address: &str, derivation_index: u32) -> Account {
	Account::new(
		address,
		AccountKind::SignerMnemonic {
			derivation_index,
			mnemonic_id: "mnemonic-1".to_string(),
		},
	)
}

pub fn private_key_account(address: &str) -> Account {
	Account::new(address, AccountKind::SignerPrivateKey)
}

pub fn readonly_account(address: &str) -> Account {
	Account::new(address, AccountKind::Readonly)
}

pub fn palette(primary: &str) -> AccountCustomizations {
	AccountCustomizations {
		palette: Some(Palette {
			primary: primary.to_string(),
			secondary: None,
			background: None,
		}),
		local_pfp: None,
	}
}

pub fn accounts_map(accounts: impl IntoIterator<Item = Account>) -> AccountsMap {
	accounts
		.into_iter()
		.map(|account| (account.address.clone(), account))
		.collect()
}

pub fn receipt() -> TransactionReceipt {
	TransactionReceipt {
		block_hash: "0xb10c".to_string(),
		block_number: 1,
		transaction_index: 0,
		confirmed_time: 1,
		gas_used: 21_000,
		effective_gas_price: "1".to_string(),
	}
}

/// Send from `from` to `recipient`, keyed and identified by `id`.
pub fn send_tx(
	id: &str,
	chain_id: ChainId,
	from: &str,
	recipient: Option<&str>,
	added_time: u64,
) -> TransactionDetails {
	TransactionDetails::new(
		id,
		chain_id,
		format!("0x{}", id),
		from,
		TransactionTypeInfo::Send {
			token_address: Address::from("0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee"),
			recipient: recipient.map(Address::from),
			currency_amount_raw: Some("1000".to_string()),
		},
	)
	.with_added_time(added_time)
}

pub fn swap_tx(id: &str, chain_id: ChainId, from: &str, added_time: u64) -> TransactionDetails {
	TransactionDetails::new(
		id,
		chain_id,
		format!("0x{}", id),
		from,
		TransactionTypeInfo::Swap {
			input_currency_id: format!("{}-ETH", chain_id),
			output_currency_id: format!("{}-USDC", chain_id),
			input_currency_amount_raw: "1000000000000000000".to_string(),
			output_currency_amount_raw: "1800000000".to_string(),
		},
	)
	.with_added_time(added_time)
}

/// Inserts `tx` under its `from` address and chain, keyed by its id.
pub fn insert_tx(transactions: &mut TransactionsState, tx: TransactionDetails) {
	transactions
		.entry(tx.from.clone())
		.or_default()
		.entry(tx.chain_id)
		.or_default()
		.insert(tx.id.clone(), tx);
}

pub fn transactions_state(txs: impl IntoIterator<Item = TransactionDetails>) -> TransactionsState {
	let mut transactions = TransactionsState::new();
	for tx in txs {
		insert_tx(&mut transactions, tx);
	}
	transactions
}

pub fn state_with(
	accounts: impl IntoIterator<Item = Account>,
	active: Option<&str>,
	txs: impl IntoIterator<Item = TransactionDetails>,
) -> RootState {
	let wallet = WalletState {
		accounts: accounts_map(accounts).into(),
		active_account_address: active.map(Address::from),
		..WalletState::default()
	};
	RootState::new(wallet, transactions_state(txs))
}
