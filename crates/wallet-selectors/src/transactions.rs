//! Transaction selectors.
//!
//! Read-only views over the address -> chain -> key transaction map. Every
//! derived selector is memoized on the transactions `Arc`.

use crate::memo::Selector;
use crate::registry::SelectorRegistry;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use wallet_types::{
	AddressTransactions, Address, ChainId, RootState, SearchableRecipient, TransactionDetails,
	TransactionKey, TransactionsState,
};

/// Selector memoized on the transactions map.
pub type TransactionsSelector<O> = Selector<Arc<TransactionsState>, O>;

/// One address's transactions across every chain.
pub type FlattenedTransactions = BTreeMap<TransactionKey, TransactionDetails>;

pub fn select_transactions(state: &RootState) -> Arc<TransactionsState> {
	Arc::clone(&state.transactions)
}

fn flatten_address_transactions(by_chain: &AddressTransactions) -> FlattenedTransactions {
	by_chain
		.iter()
		.flat_map(|(chain_id, transactions)| {
			transactions.iter().map(move |(key, tx)| {
				(
					TransactionKey {
						chain_id: *chain_id,
						key: key.clone(),
					},
					tx.clone(),
				)
			})
		})
		.collect()
}

fn all_transactions(transactions: &TransactionsState) -> impl Iterator<Item = &TransactionDetails> {
	transactions
		.values()
		.flat_map(|by_chain| by_chain.values())
		.flat_map(|by_key| by_key.values())
}

/// First record for `address` on `chain_id` matching `matches`, in key order.
fn find_transaction(
	transactions: &TransactionsState,
	address: &Address,
	chain_id: ChainId,
	matches: impl Fn(&TransactionDetails) -> bool,
) -> Option<TransactionDetails> {
	transactions
		.get(address)?
		.get(&chain_id)?
		.values()
		.find(|tx| matches(*tx))
		.cloned()
}

fn non_empty_address(address: Option<Address>) -> Option<Address> {
	address.filter(|address| !address.is_empty())
}

fn non_empty(value: Option<String>) -> Option<String> {
	value.filter(|value| !value.is_empty())
}

// Chain id 0 is never a real network and counts as absent.
fn non_zero_chain(chain_id: Option<ChainId>) -> Option<ChainId> {
	chain_id.filter(|chain_id| chain_id.0 != 0)
}

fn describe(value: Option<&impl std::fmt::Display>) -> String {
	value.map_or_else(|| "none".to_string(), |value| value.to_string())
}

static RECIPIENTS_BY_RECENCY: Lazy<TransactionsSelector<Vec<SearchableRecipient>>> =
	Lazy::new(|| {
		Selector::new(
			"select_recipients_by_recency",
			select_transactions,
			|transactions| {
				let mut sends: Vec<&TransactionDetails> = all_transactions(transactions)
					.filter(|tx| tx.send_recipient().is_some())
					.collect();
				// Newest first; stable so equal times keep collection order
				sends.sort_by(|a, b| b.added_time.cmp(&a.added_time));

				let mut seen = HashSet::new();
				sends
					.into_iter()
					.filter_map(TransactionDetails::send_recipient)
					.filter(|address| seen.insert(*address))
					.map(|address| SearchableRecipient {
						address: address.clone(),
						name: String::new(),
					})
					.collect()
			},
		)
	});

static INCOMPLETE_TRANSACTIONS: Lazy<TransactionsSelector<Vec<TransactionDetails>>> =
	Lazy::new(|| {
		Selector::new(
			"select_incomplete_transactions",
			select_transactions,
			|transactions| {
				all_transactions(transactions)
					.filter(|tx| tx.is_incomplete())
					.cloned()
					.collect()
			},
		)
	});

static ADDRESS_TRANSACTIONS_SELECTORS: Lazy<
	SelectorRegistry<Address, TransactionsSelector<Option<FlattenedTransactions>>>,
> = Lazy::new(|| SelectorRegistry::new("address_transactions"));

/// Every transaction of `address`, flattened across chains.
///
/// `None` when no address is given or the address has no transactions.
pub fn make_select_address_transactions(
	address: Option<Address>,
) -> TransactionsSelector<Option<FlattenedTransactions>> {
	let address = non_empty_address(address);
	Selector::new(
		format!("make_select_address_transactions({})", describe(address.as_ref())),
		select_transactions,
		move |transactions| {
			let by_chain = transactions.get(address.as_ref()?)?;
			Some(flatten_address_transactions(by_chain))
		},
	)
}

/// Shared per-address variant of [`make_select_address_transactions`].
pub fn select_address_transactions(
	state: &RootState,
	address: &Address,
) -> Arc<Option<FlattenedTransactions>> {
	ADDRESS_TRANSACTIONS_SELECTORS
		.get_or_insert_with(address.clone(), |address| {
			make_select_address_transactions(Some(address.clone()))
		})
		.select(state)
}

/// Looks up a transaction by hash, ignoring case.
///
/// `None` when any parameter is missing or nothing matches.
pub fn make_select_transaction(
	address: Option<Address>,
	chain_id: Option<ChainId>,
	tx_hash: Option<String>,
) -> TransactionsSelector<Option<TransactionDetails>> {
	let address = non_empty_address(address);
	let tx_hash = non_empty(tx_hash);
	let chain_id = non_zero_chain(chain_id);
	Selector::new(
		format!(
			"make_select_transaction({}, {}, {})",
			describe(address.as_ref()),
			describe(chain_id.as_ref()),
			describe(tx_hash.as_ref())
		),
		select_transactions,
		move |transactions| {
			let hash = tx_hash.as_deref()?;
			find_transaction(transactions, address.as_ref()?, chain_id?, |tx| {
				tx.hash_matches(hash)
			})
		},
	)
}

/// Looks up a transaction by its internal id (exact match).
pub fn make_select_transaction_by_id(
	address: Option<Address>,
	chain_id: Option<ChainId>,
	tx_id: Option<String>,
) -> TransactionsSelector<Option<TransactionDetails>> {
	let address = non_empty_address(address);
	let tx_id = non_empty(tx_id);
	let chain_id = non_zero_chain(chain_id);
	Selector::new(
		format!(
			"make_select_transaction_by_id({}, {}, {})",
			describe(address.as_ref()),
			describe(chain_id.as_ref()),
			describe(tx_id.as_ref())
		),
		select_transactions,
		move |transactions| {
			let id = tx_id.as_deref()?;
			find_transaction(transactions, address.as_ref()?, chain_id?, |tx| tx.id == id)
		},
	)
}

/// Past send recipients, most recent first, one entry per address.
pub fn select_recipients_by_recency(state: &RootState) -> Arc<Vec<SearchableRecipient>> {
	RECIPIENTS_BY_RECENCY.select(state)
}

/// Transactions with no receipt that have not failed, across every address
/// and chain.
pub fn select_incomplete_transactions(state: &RootState) -> Arc<Vec<TransactionDetails>> {
	INCOMPLETE_TRANSACTIONS.select(state)
}
