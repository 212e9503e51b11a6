//! Configuration module for the wallet inspector.
//!
//! This module provides structures and utilities for managing inspector
//! configuration. It supports loading configuration from TOML files, resolves
//! `${VAR}` and `${VAR:-default}` environment references before parsing, and
//! validates the result.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for the wallet inspector.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Identity of this inspector instance.
	pub inspector: InspectorConfig,
	/// Where the state snapshot is read from.
	pub snapshot: SnapshotConfig,
	/// How results are printed.
	#[serde(default)]
	pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InspectorConfig {
	/// Name used in log lines.
	pub id: String,
}

/// Configuration for the snapshot source.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SnapshotConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of snapshot implementation names to their configurations.
	pub implementations: HashMap<String, toml::Value>,
}

impl SnapshotConfig {
	/// Configuration table of the primary implementation.
	pub fn primary_config(&self) -> Option<&toml::Value> {
		self.implementations.get(&self.primary)
	}
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
	/// Pretty-print JSON output.
	#[serde(default = "default_pretty")]
	pub pretty: bool,
}

impl Default for OutputConfig {
	fn default() -> Self {
		Self {
			pretty: default_pretty(),
		}
	}
}

fn default_pretty() -> bool {
	true
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB to prevent ReDoS attacks.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = input.to_string();
	let mut replacements = Vec::new();

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name.as_str()) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name.as_str()
					)));
				},
			},
		};

		replacements.push((full_match.start(), full_match.end(), value));
	}

	// Apply replacements in reverse order to maintain positions
	for (start, end, value) in replacements.iter().rev() {
		result.replace_range(start..end, value);
	}

	Ok(result)
}

impl Config {
	/// Loads configuration from a file, resolving environment variables and
	/// validating the result.
	pub async fn from_file(path: &str) -> Result<Self, ConfigError> {
		let content = tokio::fs::read_to_string(path).await?;
		content.parse()
	}

	/// Validates the configuration to ensure all required fields are properly set.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.inspector.id.is_empty() {
			return Err(ConfigError::Validation("Inspector ID cannot be empty".into()));
		}

		if self.snapshot.implementations.is_empty() {
			return Err(ConfigError::Validation(
				"At least one snapshot implementation must be configured".into(),
			));
		}
		if self.snapshot.primary.is_empty() {
			return Err(ConfigError::Validation(
				"Snapshot primary implementation cannot be empty".into(),
			));
		}
		if self.snapshot.primary_config().is_none() {
			return Err(ConfigError::Validation(format!(
				"Primary snapshot '{}' not found in implementations",
				self.snapshot.primary
			)));
		}

		Ok(())
	}
}

/// Parses TOML, resolving environment variables first and validating after.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}
