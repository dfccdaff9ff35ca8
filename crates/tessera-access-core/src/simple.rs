// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role evaluation for content types that only care whether a record is the caller's own.

use std::collections::BTreeSet;

use crate::context::AuthorizationContext;
use crate::facts::OwnershipFacts;
use crate::token::RoleToken;

/// Returns the role tokens the caller satisfies on a private-by-default record.
///
/// Only `SELF` can be matched. `ANONYMOUS`, `AUTHENTICATED` and `OWNER` are never
/// included: owners are let through by the resolver's bypass at the call site.
/// An empty set means deny.
pub fn matched_roles(ctx: &AuthorizationContext, facts: &OwnershipFacts) -> BTreeSet<RoleToken> {
	let mut roles = BTreeSet::new();
	if facts.represents(ctx) {
		roles.insert(RoleToken::self_role());
	}
	roles
}
