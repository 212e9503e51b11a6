//! Inspector commands.
//!
//! Each command runs one or more selectors against a loaded state tree and
//! returns the result as a JSON value. Parameterized commands go through the
//! shared per-address selector instances where one exists.

use crate::error::InspectorError;
use clap::{Args, Subcommand, ValueEnum};
use serde_json::{json, Map, Value};
use wallet_selectors::{
	make_select_address_transactions, make_select_transaction, make_select_transaction_by_id,
	select_account_notification_setting, select_accounts, select_active_account,
	select_active_account_address, select_address_transactions, select_finished_onboarding,
	select_flashbots_enabled, select_hide_small_balances, select_inactive_account_addresses,
	select_inactive_accounts, select_incomplete_transactions, select_local_pfp,
	select_nft_view_type, select_non_pending_accounts, select_pending_accounts,
	select_recipients_by_recency, select_signer_accounts, select_signer_mnemonic_account_exists,
	select_sorted_signer_mnemonic_accounts, select_tokens_metadata_display_type,
	select_tokens_order_by, select_user_palette, FlattenedTransactions,
};
use wallet_types::{Address, ChainId, RootState};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum AccountFilter {
	#[default]
	All,
	Pending,
	NonPending,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
	/// List accounts keyed by address
	Accounts {
		#[arg(long, value_enum, default_value_t = AccountFilter::All)]
		filter: AccountFilter,
	},
	/// Show the active account and its palette
	Active,
	/// List signer accounts
	Signers,
	/// List mnemonic accounts ordered by derivation index
	MnemonicAccounts,
	/// List every account except the active one
	Inactive,
	/// Show wallet settings with defaults applied
	Settings,
	/// Show the local profile picture of an account
	Pfp {
		#[arg(long)]
		address: Option<String>,
	},
	/// Show whether push notifications are enabled for an account
	Notifications {
		#[arg(long)]
		address: Option<String>,
	},
	/// List an address's transactions across all chains
	Transactions {
		#[arg(long)]
		address: Option<String>,
	},
	/// Look up one transaction by hash or id
	Transaction(TransactionArgs),
	/// List past send recipients, most recent first
	Recipients,
	/// List transactions still waiting for a receipt
	Incomplete,
}

#[derive(Debug, Clone, Args)]
pub struct TransactionArgs {
	#[arg(long)]
	pub address: Option<String>,
	/// Decimal or 0x-prefixed hex
	#[arg(long)]
	pub chain_id: Option<ChainId>,
	/// Transaction hash, matched ignoring case
	#[arg(long, conflicts_with = "id", required_unless_present = "id")]
	pub hash: Option<String>,
	/// Internal transaction id
	#[arg(long)]
	pub id: Option<String>,
}

impl Command {
	pub fn name(&self) -> &'static str {
		match self {
			Command::Accounts { .. } => "accounts",
			Command::Active => "active",
			Command::Signers => "signers",
			Command::MnemonicAccounts => "mnemonic-accounts",
			Command::Inactive => "inactive",
			Command::Settings => "settings",
			Command::Pfp { .. } => "pfp",
			Command::Notifications { .. } => "notifications",
			Command::Transactions { .. } => "transactions",
			Command::Transaction(_) => "transaction",
			Command::Recipients => "recipients",
			Command::Incomplete => "incomplete",
		}
	}
}

/// Runs `command` against `state`.
pub fn run(command: &Command, state: &RootState) -> Result<Value, InspectorError> {
	tracing::info!(command = command.name(), "Running command");

	let value = match command {
		Command::Accounts { filter } => {
			let accounts = match filter {
				AccountFilter::All => select_accounts(state),
				AccountFilter::Pending => select_pending_accounts(state),
				AccountFilter::NonPending => select_non_pending_accounts(state),
			};
			serde_json::to_value(&*accounts)?
		},
		Command::Active => json!({
			"address": select_active_account_address(state),
			"account": &*select_active_account(state),
			"palette": &*select_user_palette(state),
		}),
		Command::Signers => serde_json::to_value(&*select_signer_accounts(state))?,
		Command::MnemonicAccounts => json!({
			"exists": select_signer_mnemonic_account_exists(state),
			"accounts": &*select_sorted_signer_mnemonic_accounts(state),
		}),
		Command::Inactive => json!({
			"addresses": &*select_inactive_account_addresses(state),
			"accounts": &*select_inactive_accounts(state),
		}),
		Command::Settings => json!({
			"nftViewType": select_nft_view_type(state),
			"hideSmallBalances": select_hide_small_balances(state),
			"tokensOrderBy": select_tokens_order_by(state),
			"tokensMetadataDisplayType": select_tokens_metadata_display_type(state),
			"finishedOnboarding": select_finished_onboarding(state),
			"flashbotsEnabled": select_flashbots_enabled(state),
		}),
		Command::Pfp { address } => {
			let address = required_address(address)?;
			json!({
				"address": address,
				"localPfp": &*select_local_pfp(state, &address),
			})
		},
		Command::Notifications { address } => {
			let address = required_address(address)?;
			json!({
				"address": address,
				"enabled": select_account_notification_setting(state, &address),
			})
		},
		Command::Transactions { address } => {
			let flattened = match optional_address(address) {
				Some(address) => select_address_transactions(state, &address),
				None => make_select_address_transactions(None).select(state),
			};
			match flattened.as_ref() {
				Some(transactions) => transactions_by_key(transactions)?,
				None => Value::Null,
			}
		},
		Command::Transaction(args) => lookup_transaction(args, state)?,
		Command::Recipients => serde_json::to_value(&*select_recipients_by_recency(state))?,
		Command::Incomplete => serde_json::to_value(&*select_incomplete_transactions(state))?,
	};

	Ok(value)
}

/// Renders a command result for stdout.
pub fn render(value: &Value, pretty: bool) -> Result<String, InspectorError> {
	let rendered = if pretty {
		serde_json::to_string_pretty(value)?
	} else {
		serde_json::to_string(value)?
	};
	Ok(rendered)
}

fn lookup_transaction(args: &TransactionArgs, state: &RootState) -> Result<Value, InspectorError> {
	let address = optional_address(&args.address);
	let selector = match (&args.hash, &args.id) {
		(Some(hash), _) => {
			tracing::debug!(%hash, chain_id = ?args.chain_id, "Looking up transaction by hash");
			make_select_transaction(address, args.chain_id, Some(hash.clone()))
		},
		(None, Some(id)) => {
			tracing::debug!(%id, chain_id = ?args.chain_id, "Looking up transaction by id");
			make_select_transaction_by_id(address, args.chain_id, Some(id.clone()))
		},
		(None, None) => return Err(InspectorError::MissingParameter("hash or id")),
	};

	Ok(serde_json::to_value(&*selector.select(state))?)
}

/// JSON objects need string keys, so records are keyed `chain:key`.
fn transactions_by_key(transactions: &FlattenedTransactions) -> Result<Value, InspectorError> {
	let mut by_key = Map::new();
	for (key, tx) in transactions {
		by_key.insert(key.to_string(), serde_json::to_value(tx)?);
	}
	Ok(Value::Object(by_key))
}

fn optional_address(address: &Option<String>) -> Option<Address> {
	address
		.as_deref()
		.filter(|address| !address.is_empty())
		.map(Address::from)
}

fn required_address(address: &Option<String>) -> Result<Address, InspectorError> {
	optional_address(address).ok_or(InspectorError::MissingParameter("address"))
}
