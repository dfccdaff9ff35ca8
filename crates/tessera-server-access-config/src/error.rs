// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration error types.

use std::path::PathBuf;

use tessera_access_core::ContentTypeName;

/// Errors that can occur during configuration and definition loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// I/O error reading a config or definition file
	#[error("failed to read {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// TOML parsing error
	#[error("TOML parse error in {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	/// Invalid value from the environment
	#[error("invalid value for {key}: {message}")]
	InvalidValue { key: String, message: String },

	/// Validation error
	#[error("validation error: {0}")]
	Validation(String),

	/// Two definition files declare the same content type
	#[error("content type '{name}' is defined in both {first} and {second}")]
	DuplicateContentType {
		name: ContentTypeName,
		first: PathBuf,
		second: PathBuf,
	},

	/// Tracing could not be initialised
	#[error("failed to initialise logging: {0}")]
	Logging(String),
}
