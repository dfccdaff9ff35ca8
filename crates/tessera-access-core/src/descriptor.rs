// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Declarative operation rules and content type definitions.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::catalog::RoleCatalog;
use crate::token::{ContentTypeName, OperationName, RoleToken, StateToken};

/// Which roles, in which lifecycle states, may invoke one operation.
///
/// An empty `required_states` means the operation is available in every state.
/// `per_state_roles` adds roles on top of `required_roles` for individual states.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDescriptor {
	#[serde(default)]
	pub required_roles: BTreeSet<RoleToken>,

	#[serde(default)]
	pub required_states: BTreeSet<StateToken>,

	#[serde(default)]
	pub per_state_roles: BTreeMap<StateToken, BTreeSet<RoleToken>>,
}

impl OperationDescriptor {
	/// Creates a descriptor with no requirements.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder: require a role in every permitted state.
	pub fn with_role(mut self, role: impl Into<RoleToken>) -> Self {
		self.required_roles.insert(role.into());
		self
	}

	/// Builder: restrict the operation to a lifecycle state.
	pub fn with_state(mut self, state: impl Into<StateToken>) -> Self {
		self.required_states.insert(state.into());
		self
	}

	/// Builder: grant an additional role in a single state.
	pub fn with_state_role(
		mut self,
		state: impl Into<StateToken>,
		role: impl Into<RoleToken>,
	) -> Self {
		self
			.per_state_roles
			.entry(state.into())
			.or_default()
			.insert(role.into());
		self
	}
}

/// The descriptor field an invalid token was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorField {
	RequiredRoles,
	RequiredStates,
	PerStateRoles(StateToken),
}

impl fmt::Display for DescriptorField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DescriptorField::RequiredRoles => write!(f, "requiredRoles"),
			DescriptorField::RequiredStates => write!(f, "requiredStates"),
			DescriptorField::PerStateRoles(state) => write!(f, "perStateRoles[{state}]"),
		}
	}
}

/// Everything the content-type loader supplies for one content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeDefinition {
	pub name: ContentTypeName,

	#[serde(default)]
	pub catalog: RoleCatalog,

	#[serde(default)]
	pub operations: BTreeMap<OperationName, OperationDescriptor>,
}

impl ContentTypeDefinition {
	pub fn new(name: impl Into<ContentTypeName>, catalog: RoleCatalog) -> Self {
		Self {
			name: name.into(),
			catalog,
			operations: BTreeMap::new(),
		}
	}

	/// Builder: declare an operation.
	pub fn with_operation(
		mut self,
		operation: impl Into<OperationName>,
		descriptor: OperationDescriptor,
	) -> Self {
		self.operations.insert(operation.into(), descriptor);
		self
	}
}
