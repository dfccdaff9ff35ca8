// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The object side of an access decision.
//!
//! Content types do not implement their own "is this mine" logic. They describe
//! the target through [`AccessTarget`] and let the resolver decide:
//!
//! - [`OwnershipFacts`]: who created the object and whom it represents
//! - [`RoleGrants`]: which groups and privileges satisfy which custom roles on it

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::context::AuthorizationContext;
use crate::token::{GroupId, PrivilegeId, RoleToken, StateToken, SubjectId};

/// Mapping from custom role tokens to the identifiers that satisfy them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGrants {
	#[serde(default)]
	pub groups: BTreeMap<RoleToken, BTreeSet<GroupId>>,

	#[serde(default)]
	pub privileges: BTreeMap<RoleToken, BTreeSet<PrivilegeId>>,
}

impl RoleGrants {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder: members of `group_id` hold `role`.
	pub fn grant_group(mut self, role: impl Into<RoleToken>, group_id: impl Into<GroupId>) -> Self {
		self
			.groups
			.entry(role.into())
			.or_default()
			.insert(group_id.into());
		self
	}

	/// Builder: holders of `privilege_id` hold `role`.
	pub fn grant_privilege(
		mut self,
		role: impl Into<RoleToken>,
		privilege_id: impl Into<PrivilegeId>,
	) -> Self {
		self
			.privileges
			.entry(role.into())
			.or_default()
			.insert(privilege_id.into());
		self
	}

	/// Role tokens satisfied by the caller's group memberships.
	pub fn group_roles<'a>(
		&'a self,
		ctx: &'a AuthorizationContext,
	) -> impl Iterator<Item = &'a RoleToken> + 'a {
		self
			.groups
			.iter()
			.filter(|(_, ids)| !ids.is_disjoint(&ctx.group_ids))
			.map(|(role, _)| role)
	}

	/// Role tokens satisfied by the caller's purchased privileges.
	pub fn privilege_roles<'a>(
		&'a self,
		ctx: &'a AuthorizationContext,
	) -> impl Iterator<Item = &'a RoleToken> + 'a {
		self
			.privileges
			.iter()
			.filter(|(_, ids)| !ids.is_disjoint(&ctx.privilege_ids))
			.map(|(role, _)| role)
	}

	/// Returns true if the caller's groups satisfy `role`.
	pub fn group_satisfies(&self, role: &RoleToken, ctx: &AuthorizationContext) -> bool {
		self
			.groups
			.get(role)
			.is_some_and(|ids| !ids.is_disjoint(&ctx.group_ids))
	}

	/// Returns true if the caller's privileges satisfy `role`.
	pub fn privilege_satisfies(&self, role: &RoleToken, ctx: &AuthorizationContext) -> bool {
		self
			.privileges
			.get(role)
			.is_some_and(|ids| !ids.is_disjoint(&ctx.privilege_ids))
	}
}

/// Read-only facts about one object instance, supplied by the object store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipFacts {
	pub author_id: Option<SubjectId>,
	pub represented_subject_id: Option<SubjectId>,
	#[serde(default)]
	pub grants: RoleGrants,
}

impl OwnershipFacts {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder: set the creator.
	pub fn with_author(mut self, author_id: impl Into<SubjectId>) -> Self {
		self.author_id = Some(author_id.into());
		self
	}

	/// Builder: set the subject this object represents.
	pub fn representing(mut self, subject_id: impl Into<SubjectId>) -> Self {
		self.represented_subject_id = Some(subject_id.into());
		self
	}

	/// Builder: attach role grants.
	pub fn with_grants(mut self, grants: RoleGrants) -> Self {
		self.grants = grants;
		self
	}

	/// Returns true if the caller created this object.
	pub fn is_authored_by(&self, ctx: &AuthorizationContext) -> bool {
		same_subject(ctx.subject(), self.author_id.as_ref())
	}

	/// Returns true if this object represents the caller.
	pub fn represents(&self, ctx: &AuthorizationContext) -> bool {
		same_subject(ctx.subject(), self.represented_subject_id.as_ref())
	}
}

fn same_subject(caller: Option<&SubjectId>, fact: Option<&SubjectId>) -> bool {
	match (caller, fact) {
		(Some(caller), Some(fact)) => !fact.is_empty() && caller == fact,
		_ => false,
	}
}

/// Capability interface every access-controlled content type implements.
pub trait AccessTarget {
	/// The object's current lifecycle state.
	fn current_state(&self) -> &StateToken;

	/// The object's ownership facts.
	fn ownership_facts(&self) -> &OwnershipFacts;
}
