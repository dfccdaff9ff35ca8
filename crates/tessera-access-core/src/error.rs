// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for access rule compilation.

use thiserror::Error;

use crate::descriptor::DescriptorField;
use crate::token::{ContentTypeName, RoleToken, StateToken};

/// Result type for access rule operations.
pub type Result<T> = std::result::Result<T, AccessError>;

/// Configuration errors raised while compiling access rules.
///
/// Resolution never fails; these are only produced at load or reload time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
	#[error("content type '{content_type}': {field} references undefined role '{token}'")]
	UndefinedRole {
		content_type: ContentTypeName,
		field: DescriptorField,
		token: RoleToken,
	},

	#[error("content type '{content_type}': {field} references undefined state '{state}'")]
	UndefinedState {
		content_type: ContentTypeName,
		field: DescriptorField,
		state: StateToken,
	},

	#[error("content type '{content_type}': catalog declares reserved role '{token}'")]
	ReservedRole {
		content_type: ContentTypeName,
		token: RoleToken,
	},

	#[error("content type '{content_type}': catalog declares an empty {kind} token")]
	EmptyToken {
		content_type: ContentTypeName,
		kind: &'static str,
	},
}

impl AccessError {
	/// The content type whose configuration is invalid.
	pub fn content_type(&self) -> &ContentTypeName {
		match self {
			AccessError::UndefinedRole { content_type, .. }
			| AccessError::UndefinedState { content_type, .. }
			| AccessError::ReservedRole { content_type, .. }
			| AccessError::EmptyToken { content_type, .. } => content_type,
		}
	}
}
