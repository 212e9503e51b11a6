//! In-memory snapshot source.
//!
//! Holds the snapshot bytes directly, useful for testing and for inline
//! snapshots written into the configuration file.

use crate::snapshot::{SnapshotError, SnapshotSource};
use async_trait::async_trait;
use wallet_types::RootState;

pub const NAME: &str = "memory";

/// Snapshot held in memory.
pub struct MemorySnapshot {
	bytes: Vec<u8>,
}

impl MemorySnapshot {
	pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
		Self {
			bytes: bytes.into(),
		}
	}

	/// Builds a source that serves the given state.
	pub fn from_state(state: &RootState) -> Result<Self, SnapshotError> {
		let bytes = state
			.to_json()
			.map_err(|e| SnapshotError::Serialization(e.to_string()))?;
		Ok(Self::new(bytes))
	}
}

impl Default for MemorySnapshot {
	fn default() -> Self {
		Self::new(b"{}".to_vec())
	}
}

#[async_trait]
impl SnapshotSource for MemorySnapshot {
	async fn load_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
		Ok(self.bytes.clone())
	}

	fn describe(&self) -> String {
		NAME.to_string()
	}
}

/// Factory function to create a memory snapshot source from configuration.
///
/// Configuration parameters:
/// - `json`: inline snapshot (optional, defaults to an empty state)
pub fn create_source(config: &toml::Value) -> Result<Box<dyn SnapshotSource>, SnapshotError> {
	match config.get("json") {
		None => Ok(Box::new(MemorySnapshot::default())),
		Some(value) => {
			let json = value.as_str().ok_or_else(|| {
				SnapshotError::Configuration("Memory snapshot 'json' must be a string".into())
			})?;
			Ok(Box::new(MemorySnapshot::new(json.as_bytes().to_vec())))
		},
	}
}
