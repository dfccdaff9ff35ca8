// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Content-type definition loading.
//!
//! Each `*.toml` file in the definitions directory holds exactly one
//! [`ContentTypeDefinition`]. Files are read in file-name order so repeated loads
//! of the same directory produce the same sequence.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tessera_access_core::{ContentTypeDefinition, ContentTypeName};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::sections::DefinitionsConfig;

/// Loads every definition from the configured directory.
pub fn load_definitions(config: &DefinitionsConfig) -> Result<Vec<ContentTypeDefinition>, ConfigError> {
	load_definitions_from_dir(&config.dir)
}

/// Loads every `*.toml` definition in `dir`. A missing directory yields no definitions.
pub fn load_definitions_from_dir(dir: &Path) -> Result<Vec<ContentTypeDefinition>, ConfigError> {
	if !dir.exists() {
		debug!(dir = %dir.display(), "definitions directory not found, skipping");
		return Ok(Vec::new());
	}

	let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::FileRead {
		path: dir.to_path_buf(),
		source: e,
	})?;

	let mut paths = Vec::new();
	for entry in entries {
		let entry = entry.map_err(|e| ConfigError::FileRead {
			path: dir.to_path_buf(),
			source: e,
		})?;
		let path = entry.path();
		if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
			paths.push(path);
		}
	}
	paths.sort();

	let mut seen: BTreeMap<ContentTypeName, PathBuf> = BTreeMap::new();
	let mut definitions = Vec::with_capacity(paths.len());
	for path in paths {
		let definition = load_definition_file(&path)?;
		if let Some(first) = seen.get(&definition.name) {
			return Err(ConfigError::DuplicateContentType {
				name: definition.name.clone(),
				first: first.clone(),
				second: path,
			});
		}
		seen.insert(definition.name.clone(), path);
		definitions.push(definition);
	}

	info!(
		dir = %dir.display(),
		content_types = definitions.len(),
		"loaded content-type definitions"
	);
	Ok(definitions)
}

/// Parses a single definition file.
pub fn load_definition_file(path: &Path) -> Result<ContentTypeDefinition, ConfigError> {
	debug!(path = %path.display(), "loading content-type definition");
	let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
		path: path.to_path_buf(),
		source: e,
	})?;

	toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
		path: path.to_path_buf(),
		source: e,
	})
}
