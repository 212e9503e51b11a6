//! Snapshot sources for the inspector.
//!
//! A snapshot is the JSON form of the root state tree. Sources are pluggable:
//! each implementation exposes a factory that builds it from its TOML table,
//! and the inspector picks one by name from the configuration.

use async_trait::async_trait;
use thiserror::Error;
use wallet_config::SnapshotConfig;
use wallet_types::RootState;

pub mod implementations {
	pub mod file;
	pub mod memory;
}

/// Errors that can occur while loading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
	/// The snapshot could not be found at its configured location.
	#[error("Snapshot not found: {0}")]
	NotFound(String),
	/// The snapshot bytes do not decode into a state tree.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// Error that occurs in the underlying source.
	#[error("Backend error: {0}")]
	Backend(String),
	/// The implementation table is missing or malformed.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Low-level interface every snapshot source implements.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
	/// Reads the raw snapshot bytes.
	async fn load_bytes(&self) -> Result<Vec<u8>, SnapshotError>;

	/// Human-readable location, used in log lines.
	fn describe(&self) -> String;
}

/// Factory signature shared by all snapshot implementations.
pub type SnapshotFactory = fn(&toml::Value) -> Result<Box<dyn SnapshotSource>, SnapshotError>;

/// Returns every registered snapshot implementation as `(name, factory)`.
pub fn get_all_implementations() -> Vec<(&'static str, SnapshotFactory)> {
	use implementations::{file, memory};

	vec![
		(file::NAME, file::create_source as SnapshotFactory),
		(memory::NAME, memory::create_source as SnapshotFactory),
	]
}

/// Builds the primary snapshot source named in the configuration.
pub fn create_source(config: &SnapshotConfig) -> Result<Box<dyn SnapshotSource>, SnapshotError> {
	let table = config.primary_config().ok_or_else(|| {
		SnapshotError::Configuration(format!(
			"No configuration for snapshot '{}'",
			config.primary
		))
	})?;

	let factory = get_all_implementations()
		.into_iter()
		.find(|(name, _)| *name == config.primary)
		.map(|(_, factory)| factory)
		.ok_or_else(|| {
			SnapshotError::Configuration(format!(
				"Unknown snapshot implementation '{}'",
				config.primary
			))
		})?;

	factory(table)
}

/// Loads and decodes the state tree from `source`.
pub async fn load_state(source: &dyn SnapshotSource) -> Result<RootState, SnapshotError> {
	let bytes = source.load_bytes().await?;
	tracing::debug!(
		source = %source.describe(),
		bytes = bytes.len(),
		"Loaded snapshot"
	);
	RootState::from_json(&bytes).map_err(|e| SnapshotError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn snapshot_config(primary: &str, table: &str) -> SnapshotConfig {
		let mut implementations = HashMap::new();
		implementations.insert(primary.to_string(), toml::from_str(table).unwrap());
		SnapshotConfig {
			primary: primary.to_string(),
			implementations,
		}
	}

	#[test]
	fn test_registered_implementations() {
		let names: Vec<_> = get_all_implementations()
			.into_iter()
			.map(|(name, _)| name)
			.collect();
		assert_eq!(names, vec!["file", "memory"]);
	}

	#[test]
	fn test_unknown_implementation() {
		let config = snapshot_config("redis", "url = \"redis://localhost\"");
		let result = create_source(&config);
		assert!(matches!(result, Err(SnapshotError::Configuration(_))));
	}

	#[test]
	fn test_missing_primary_table() {
		let mut config = snapshot_config("file", "path = \"state.json\"");
		config.primary = "memory".to_string();
		let result = create_source(&config);
		assert!(matches!(result, Err(SnapshotError::Configuration(_))));
	}

	#[tokio::test]
	async fn test_load_state_from_memory_source() {
		let config = snapshot_config(
			"memory",
			r#"json = '{"wallet": {"finishedOnboarding": true}}'"#,
		);
		let source = create_source(&config).unwrap();
		let state = load_state(source.as_ref()).await.unwrap();
		assert!(state.wallet.finished_onboarding);
		assert!(state.transactions.is_empty());
	}

	#[tokio::test]
	async fn test_load_state_rejects_malformed_json() {
		let config = snapshot_config("memory", "json = '{\"wallet\": 42}'");
		let source = create_source(&config).unwrap();
		let result = load_state(source.as_ref()).await;
		assert!(matches!(result, Err(SnapshotError::Serialization(_))));
	}
}
