// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for snapshot publication.

use tessera_access_core::{AccessError, ContentTypeName};
use tessera_server_access_config::ConfigError;
use thiserror::Error;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Why a content type was left out of a reload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
	#[error(transparent)]
	Invalid(#[from] AccessError),

	#[error("content type '{0}' is defined more than once")]
	Duplicate(ContentTypeName),
}

impl Rejection {
	pub fn content_type(&self) -> &ContentTypeName {
		match self {
			Rejection::Invalid(err) => err.content_type(),
			Rejection::Duplicate(name) => name,
		}
	}
}

/// Errors that can occur while reloading the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
	#[error("reload rejected: {} content type(s) failed to compile", errors.len())]
	Rejected { errors: Vec<Rejection> },

	#[error("configuration error: {0}")]
	Config(#[from] ConfigError),
}
