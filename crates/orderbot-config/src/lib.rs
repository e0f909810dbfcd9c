//! Configuration module for the ordering assistant.
//!
//! This module provides structures and utilities for managing service
//! configuration. It supports loading configuration from TOML files and
//! provides validation to ensure all required configuration values are
//! properly set. Every field has a default matching the built-in menu and
//! server settings, so the service also runs without a config file.

use orderbot_types::MenuItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
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
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the ordering assistant.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration for the HTTP server.
	#[serde(default)]
	pub server: ServerConfig,
	/// Configuration for the storage backend.
	#[serde(default)]
	pub storage: StorageConfig,
	/// Configuration for price calculation.
	#[serde(default)]
	pub pricing: PricingConfig,
	/// The menu catalog.
	#[serde(default)]
	pub menu: MenuConfig,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			server: ServerConfig::default(),
			storage: StorageConfig::default(),
			pricing: PricingConfig::default(),
			menu: MenuConfig::default(),
		}
	}
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
	/// Host address to bind the server to.
	#[serde(default = "default_host")]
	pub host: String,
	/// Port to bind the server to.
	#[serde(default = "default_port")]
	pub port: u16,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: default_host(),
			port: default_port(),
		}
	}
}

/// Returns the default host address of 127.0.0.1 (localhost).
fn default_host() -> String {
	"127.0.0.1".to_string()
}

/// Returns the default listening port of 3000.
fn default_port() -> u16 {
	3000
}

/// Which storage backend to use for the order log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
	/// Durable file-based storage.
	File,
	/// In-memory storage, lost on restart. Intended for development.
	Memory,
}

/// Configuration for the storage backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
	/// Which backend implementation to use.
	#[serde(default = "default_backend")]
	pub backend: StorageBackend,
	/// Base directory for the file backend.
	#[serde(default = "default_storage_path")]
	pub path: String,
}

impl Default for StorageConfig {
	fn default() -> Self {
		Self {
			backend: default_backend(),
			path: default_storage_path(),
		}
	}
}

/// Returns the default storage backend (file).
fn default_backend() -> StorageBackend {
	StorageBackend::File
}

/// Returns the default base directory for file storage.
fn default_storage_path() -> String {
	"./data/orders".to_string()
}

/// Configuration for price calculation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PricingConfig {
	/// Tax applied at confirmation, as a decimal fraction of the subtotal.
	#[serde(default = "default_tax_rate")]
	pub tax_rate: Decimal,
}

impl Default for PricingConfig {
	fn default() -> Self {
		Self {
			tax_rate: default_tax_rate(),
		}
	}
}

/// Returns the default tax rate of 18%.
fn default_tax_rate() -> Decimal {
	// 0.18
	Decimal::new(18, 2)
}

/// The menu catalog.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MenuConfig {
	/// Orderable items in display order.
	#[serde(default = "default_menu_items")]
	pub items: Vec<MenuItem>,
}

impl Default for MenuConfig {
	fn default() -> Self {
		Self {
			items: default_menu_items(),
		}
	}
}

/// Returns the built-in menu.
fn default_menu_items() -> Vec<MenuItem> {
	vec![
		MenuItem::new("chicken bucket", Decimal::new(1099, 2)),
		MenuItem::new("fries", Decimal::new(299, 2)),
		MenuItem::new("cola", Decimal::new(149, 2)),
	]
}

impl Config {
	/// Loads configuration from a TOML file.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = tokio::fs::read_to_string(path.as_ref()).await?;
		Self::from_toml_str(&content)
	}

	/// Parses and validates configuration from a TOML string.
	pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
		let config: Config = toml::from_str(content)?;
		config.validate()?;
		Ok(config)
	}

	/// Validates the configuration to ensure all fields are usable.
	///
	/// This checks:
	/// - the server port is non-zero
	/// - the file backend has a storage path
	/// - the tax rate is within `[0, 1)`
	/// - the menu is non-empty with unique, non-empty names and
	///   non-negative prices
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.server.port == 0 {
			return Err(ConfigError::Validation(
				"Server port cannot be 0".into(),
			));
		}

		if self.storage.backend == StorageBackend::File && self.storage.path.is_empty() {
			return Err(ConfigError::Validation(
				"Storage path cannot be empty for the file backend".into(),
			));
		}

		if self.pricing.tax_rate < Decimal::ZERO || self.pricing.tax_rate >= Decimal::ONE {
			return Err(ConfigError::Validation(format!(
				"Tax rate must be in [0, 1), got {}",
				self.pricing.tax_rate
			)));
		}

		if self.menu.items.is_empty() {
			return Err(ConfigError::Validation(
				"Menu must contain at least one item".into(),
			));
		}
		let mut seen = std::collections::HashSet::new();
		for item in &self.menu.items {
			if item.name.trim().is_empty() {
				return Err(ConfigError::Validation(
					"Menu item names cannot be empty".into(),
				));
			}
			if item.price < Decimal::ZERO {
				return Err(ConfigError::Validation(format!(
					"Menu item '{}' has a negative price",
					item.name
				)));
			}
			if !seen.insert(item.name.as_str()) {
				return Err(ConfigError::Validation(format!(
					"Duplicate menu item '{}'",
					item.name
				)));
			}
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_are_valid() {
		let config = Config::default();
		config.validate().unwrap();

		assert_eq!(config.server.port, 3000);
		assert_eq!(config.storage.backend, StorageBackend::File);
		assert_eq!(config.pricing.tax_rate, Decimal::new(18, 2));
		assert_eq!(config.menu.items.len(), 3);
	}

	#[test]
	fn parses_partial_config() {
		let config = Config::from_toml_str(
			r#"
			[server]
			port = 8080

			[storage]
			backend = "memory"
			"#,
		)
		.unwrap();

		assert_eq!(config.server.port, 8080);
		assert_eq!(config.storage.backend, StorageBackend::Memory);
		// Unspecified sections fall back to defaults
		assert_eq!(config.menu.items.len(), 3);
	}

	#[test]
	fn parses_custom_menu() {
		let config = Config::from_toml_str(
			r#"
			[[menu.items]]
			name = "wings"
			price = "5.49"
			"#,
		)
		.unwrap();

		assert_eq!(config.menu.items.len(), 1);
		assert_eq!(config.menu.items[0].price, Decimal::new(549, 2));
	}

	#[test]
	fn rejects_duplicate_menu_items() {
		let result = Config::from_toml_str(
			r#"
			[[menu.items]]
			name = "cola"
			price = "1.49"

			[[menu.items]]
			name = "cola"
			price = "1.99"
			"#,
		);

		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn rejects_out_of_range_tax_rate() {
		let result = Config::from_toml_str(
			r#"
			[pricing]
			tax_rate = "1.5"
			"#,
		);

		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[tokio::test]
	async fn loads_from_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		std::fs::write(
			&path,
			"[server]\nhost = \"0.0.0.0\"\nport = 8080\n",
		)
		.unwrap();

		let config = Config::from_file(&path).await.unwrap();
		assert_eq!(config.server.host, "0.0.0.0");
		assert_eq!(config.server.port, 8080);
	}

	#[tokio::test]
	async fn missing_file_is_an_io_error() {
		let result = Config::from_file("/nonexistent/config.toml").await;
		assert!(matches!(result, Err(ConfigError::Io(_))));
	}

	#[test]
	fn rejects_port_zero() {
		let result = Config::from_toml_str(
			r#"
			[server]
			port = 0
			"#,
		);

		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}
}
