//! Main entry point for the wallet inspector.
//!
//! Loads the configuration, reads the state snapshot from the configured
//! source, runs one command and prints its JSON result on stdout. Logs go to
//! stderr.

use clap::Parser;
use std::path::PathBuf;
use wallet_config::Config;
use wallet_inspector::commands::{self, Command};
use wallet_inspector::snapshot;

/// Command-line arguments for the wallet inspector.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,

	#[command(subcommand)]
	command: Command,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.init();

	let config_path = args
		.config
		.to_str()
		.ok_or("Configuration path is not valid UTF-8")?;
	let config = Config::from_file(config_path).await?;
	tracing::info!("Loaded configuration [{}]", config.inspector.id);

	let source = snapshot::create_source(&config.snapshot)?;
	let state = snapshot::load_state(source.as_ref()).await?;
	tracing::info!(
		source = %source.describe(),
		accounts = state.wallet.accounts.len(),
		addresses_with_transactions = state.transactions.len(),
		"Loaded snapshot"
	);

	let value = commands::run(&args.command, &state)?;
	println!("{}", commands::render(&value, config.output.pretty)?);

	Ok(())
}
