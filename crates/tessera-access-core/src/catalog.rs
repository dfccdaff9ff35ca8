// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per content type role and lifecycle state catalogs.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{AccessError, Result};
use crate::token::{ContentTypeName, RoleToken, StateToken};

/// A custom role declared by a content type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
	/// Human readable label.
	#[serde(default)]
	pub label: String,

	/// Granted by a purchase or subscription rather than by group membership.
	#[serde(default)]
	pub purchasable: bool,
}

impl RoleDefinition {
	/// A role granted through group membership.
	pub fn group(label: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			purchasable: false,
		}
	}

	/// A role granted through a purchase.
	pub fn privilege(label: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			purchasable: true,
		}
	}
}

/// Custom roles and valid lifecycle states for one content type.
///
/// Supplied by the content-type loader and read-only to the access subsystem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCatalog {
	#[serde(default)]
	pub roles: BTreeMap<RoleToken, RoleDefinition>,

	#[serde(default)]
	pub states: BTreeSet<StateToken>,
}

impl RoleCatalog {
	/// Creates an empty catalog.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder: declare a group-granted role.
	pub fn with_group_role(mut self, token: impl Into<RoleToken>, label: impl Into<String>) -> Self {
		self.roles.insert(token.into(), RoleDefinition::group(label));
		self
	}

	/// Builder: declare a purchase-granted role.
	pub fn with_privilege_role(
		mut self,
		token: impl Into<RoleToken>,
		label: impl Into<String>,
	) -> Self {
		self.roles.insert(token.into(), RoleDefinition::privilege(label));
		self
	}

	/// Builder: declare a lifecycle state.
	pub fn with_state(mut self, state: impl Into<StateToken>) -> Self {
		self.states.insert(state.into());
		self
	}

	/// Returns the custom role declared under `token`, if any.
	pub fn role(&self, token: &str) -> Option<&RoleDefinition> {
		self.roles.get(token)
	}

	/// Returns true if `token` is a declared custom role.
	pub fn has_role(&self, token: &str) -> bool {
		self.roles.contains_key(token)
	}

	/// Returns true if `state` is a declared lifecycle state.
	pub fn has_state(&self, state: &str) -> bool {
		self.states.contains(state)
	}

	/// Returns true if `token` is a magic role or a declared custom role.
	pub fn is_known_role(&self, token: &RoleToken) -> bool {
		token.is_magic() || self.has_role(token.as_str())
	}

	/// Checks the catalog itself before any descriptor is compiled against it.
	///
	/// Magic tokens cannot be redeclared as custom roles, and no role or state may
	/// be the empty string.
	pub fn validate(&self, content_type: &ContentTypeName) -> Result<()> {
		for token in self.roles.keys() {
			if token.is_empty() {
				return Err(AccessError::EmptyToken {
					content_type: content_type.clone(),
					kind: "role",
				});
			}
			if token.is_magic() {
				return Err(AccessError::ReservedRole {
					content_type: content_type.clone(),
					token: token.clone(),
				});
			}
		}

		if self.states.iter().any(StateToken::is_empty) {
			return Err(AccessError::EmptyToken {
				content_type: content_type.clone(),
				kind: "state",
			});
		}

		Ok(())
	}
}
