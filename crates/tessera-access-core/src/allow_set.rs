// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Compiled allow-sets.
//!
//! An [`AllowSet`] records, for one operation in one lifecycle state, which magic
//! conditions and which custom roles satisfy the operation. An [`AccessList`] holds
//! one allow-set for every state declared by the owning catalog.
//!
//! Both are built once by the compiler and never mutated afterwards; a reload
//! produces new values instead.

use serde::{Deserialize, Serialize};
use std::collections::{btree_map, BTreeMap, BTreeSet};

use crate::token::{RoleToken, StateToken};

/// Which callers satisfy an operation in a single lifecycle state.
///
/// When `allow_anonymous` is set every other field is irrelevant. The default value
/// is the empty allow-set, which denies everyone except owners.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowSet {
	pub allow_anonymous: bool,
	pub allow_authenticated: bool,
	pub allow_author: bool,
	pub allow_self: bool,
	pub group_roles: BTreeSet<RoleToken>,
	pub privilege_roles: BTreeSet<RoleToken>,
}

impl AllowSet {
	/// Allows everyone.
	pub fn anonymous() -> Self {
		Self {
			allow_anonymous: true,
			..Self::default()
		}
	}

	/// Allows every identified caller.
	pub fn authenticated() -> Self {
		Self {
			allow_authenticated: true,
			..Self::default()
		}
	}

	/// Returns true if no caller other than an owner can satisfy this allow-set.
	pub fn is_empty(&self) -> bool {
		!self.allow_anonymous
			&& !self.allow_authenticated
			&& !self.allow_author
			&& !self.allow_self
			&& self.group_roles.is_empty()
			&& self.privilege_roles.is_empty()
	}
}

/// Compiled allow-sets for one operation, keyed by lifecycle state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessList(BTreeMap<StateToken, AllowSet>);

impl AccessList {
	pub(crate) fn from_map(map: BTreeMap<StateToken, AllowSet>) -> Self {
		Self(map)
	}

	/// Returns the allow-set for `state`, if the state was compiled.
	pub fn get(&self, state: &str) -> Option<&AllowSet> {
		self.0.get(state)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// States covered by this list, in order.
	pub fn states(&self) -> impl Iterator<Item = &StateToken> {
		self.0.keys()
	}

	pub fn iter(&self) -> btree_map::Iter<'_, StateToken, AllowSet> {
		self.0.iter()
	}
}

impl<'a> IntoIterator for &'a AccessList {
	type Item = (&'a StateToken, &'a AllowSet);
	type IntoIter = btree_map::Iter<'a, StateToken, AllowSet>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}
