// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The caller side of an access decision.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::token::{GroupId, PrivilegeId, SubjectId};

/// A caller's resolved claims, produced by the authentication boundary.
///
/// The boundary verifies the token and its expiry before the context reaches the
/// resolver; the resolver trusts every field and never looks at `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationContext {
	pub subject_id: Option<SubjectId>,
	pub group_ids: BTreeSet<GroupId>,
	pub privilege_ids: BTreeSet<PrivilegeId>,
	pub is_authenticated: bool,
	pub is_owner: bool,
	pub expires_at: DateTime<Utc>,
}

impl AuthorizationContext {
	/// A caller with no identity.
	pub fn anonymous(expires_at: DateTime<Utc>) -> Self {
		Self {
			subject_id: None,
			group_ids: BTreeSet::new(),
			privilege_ids: BTreeSet::new(),
			is_authenticated: false,
			is_owner: false,
			expires_at,
		}
	}

	/// An identified caller with no memberships.
	pub fn authenticated(subject_id: impl Into<SubjectId>, expires_at: DateTime<Utc>) -> Self {
		Self {
			subject_id: Some(subject_id.into()),
			is_authenticated: true,
			..Self::anonymous(expires_at)
		}
	}

	/// Builder: add a group membership.
	pub fn with_group(mut self, group_id: impl Into<GroupId>) -> Self {
		self.group_ids.insert(group_id.into());
		self
	}

	/// Builder: add a purchased privilege.
	pub fn with_privilege(mut self, privilege_id: impl Into<PrivilegeId>) -> Self {
		self.privilege_ids.insert(privilege_id.into());
		self
	}

	/// Builder: mark the caller as an owner, bypassing every allow-set.
	pub fn as_owner(mut self) -> Self {
		self.is_owner = true;
		self
	}

	/// The caller's subject id, if it is present and non-empty.
	pub fn subject(&self) -> Option<&SubjectId> {
		self.subject_id.as_ref().filter(|id| !id.is_empty())
	}

	/// Returns true if the context is no longer valid at `now`.
	pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
		now >= self.expires_at
	}
}
