// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for Tessera access control.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Consistent environment variable naming (`TESSERA_ACCESS_*`)
//! - Loading of content-type definitions (role catalogs and operation descriptors)
//! - Tracing subscriber setup
//!
//! # Usage
//!
//! ```ignore
//! use tessera_server_access_config::{load_config, load_definitions};
//!
//! let config = load_config()?;
//! let definitions = load_definitions(&config.definitions)?;
//! ```

pub mod error;
pub mod layer;
pub mod loader;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::AccessConfigLayer;
pub use loader::{load_definition_file, load_definitions, load_definitions_from_dir};
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved access configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessConfig {
	pub definitions: DefinitionsConfig,
	pub logging: LoggingConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`TESSERA_ACCESS_*`)
/// 2. Config file (`/etc/tessera/access.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<AccessConfig, ConfigError> {
	let sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	];
	load_from_sources(sources)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<AccessConfig, ConfigError> {
	let sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	];
	load_from_sources(sources)
}

/// Merge the given sources in precedence order and finalize.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<AccessConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = AccessConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: AccessConfigLayer) -> Result<AccessConfig, ConfigError> {
	let definitions = layer.definitions.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_config(&definitions, &logging)?;

	info!(
		definitions_dir = %definitions.dir.display(),
		reload_policy = %definitions.reload_policy,
		log_level = %logging.level,
		"Access configuration loaded"
	);

	Ok(AccessConfig {
		definitions,
		logging,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(
	definitions: &DefinitionsConfig,
	logging: &LoggingConfig,
) -> Result<(), ConfigError> {
	if definitions.dir.as_os_str().is_empty() {
		return Err(ConfigError::Validation(
			"definitions directory must not be empty".to_string(),
		));
	}

	if logging.level.trim().is_empty() {
		return Err(ConfigError::Validation(
			"log level must not be empty".to_string(),
		));
	}

	Ok(())
}
