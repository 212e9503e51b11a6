//! File-backed snapshot source.
//!
//! Reads the persisted state JSON from a single file on disk.

use crate::snapshot::{SnapshotError, SnapshotSource};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

pub const NAME: &str = "file";

/// Snapshot stored as a JSON file.
pub struct FileSnapshot {
	path: PathBuf,
}

impl FileSnapshot {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

#[async_trait]
impl SnapshotSource for FileSnapshot {
	async fn load_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
		match fs::read(&self.path).await {
			Ok(bytes) => Ok(bytes),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				Err(SnapshotError::NotFound(self.path.display().to_string()))
			},
			Err(e) => Err(SnapshotError::Backend(e.to_string())),
		}
	}

	fn describe(&self) -> String {
		format!("file:{}", self.path.display())
	}
}

/// Factory function to create a file snapshot source from configuration.
///
/// Configuration parameters:
/// - `path`: location of the snapshot JSON (required)
pub fn create_source(config: &toml::Value) -> Result<Box<dyn SnapshotSource>, SnapshotError> {
	let path = config
		.get("path")
		.and_then(|v| v.as_str())
		.filter(|path| !path.is_empty())
		.ok_or_else(|| {
			SnapshotError::Configuration("File snapshot requires a non-empty 'path'".into())
		})?;

	Ok(Box::new(FileSnapshot::new(path)))
}
