use crate::snapshot::SnapshotError;
use thiserror::Error;
use wallet_config::ConfigError;

/// Errors surfaced by the inspector binary.
#[derive(Debug, Error)]
pub enum InspectorError {
	#[error("Configuration error: {0}")]
	Config(#[from] ConfigError),
	#[error("Snapshot error: {0}")]
	Snapshot(#[from] SnapshotError),
	/// A command was invoked without a parameter it cannot work without.
	#[error("Missing required parameter: {0}")]
	MissingParameter(&'static str),
	#[error("Serialization error: {0}")]
	Serialization(String),
}

impl From<serde_json::Error> for InspectorError {
	fn from(err: serde_json::Error) -> Self {
		InspectorError::Serialization(err.to_string())
	}
}
