// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access resolver.
//!
//! This module contains the per-request evaluation. It is a pure default-deny
//! function: clauses are checked in a fixed order, the first match allows, and
//! falling through every clause denies. There is no explicit deny rule and no
//! error path; a missing or empty allow-set simply denies.
//!
//! Evaluation order:
//!
//! 1. **Owner bypass**: owners are never subject to allow-sets
//! 2. **State lookup**: no allow-set for the current state denies
//! 3. **Magic conditions**: anonymous, authenticated, author, self
//! 4. **Custom roles**: group roles, then privilege roles

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::allow_set::AccessList;
use crate::context::AuthorizationContext;
use crate::facts::{AccessTarget, OwnershipFacts};
use crate::token::RoleToken;

/// Why a decision came out the way it did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecisionReason {
	Owner,
	Anonymous,
	Authenticated,
	Author,
	SelfMatch,
	GroupRole { role: RoleToken },
	PrivilegeRole { role: RoleToken },
	UndefinedOperation,
	UndefinedState,
	NoMatch,
}

impl DecisionReason {
	/// Returns true if this reason grants access.
	pub fn allows(&self) -> bool {
		!matches!(
			self,
			DecisionReason::UndefinedOperation
				| DecisionReason::UndefinedState
				| DecisionReason::NoMatch
		)
	}
}

/// The outcome of one access check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
	pub reason: DecisionReason,
}

impl AccessDecision {
	pub fn new(reason: DecisionReason) -> Self {
		Self { reason }
	}

	/// A denial for an operation the content type never declared.
	pub fn undefined_operation() -> Self {
		Self::new(DecisionReason::UndefinedOperation)
	}

	pub fn is_allowed(&self) -> bool {
		self.reason.allows()
	}
}

/// Evaluates whether the caller may perform the compiled operation on an object
/// that is currently in `current_state`.
#[instrument(
	level = "debug",
	skip(ctx, access, facts),
	fields(
		subject = ?ctx.subject_id,
		authenticated = ctx.is_authenticated,
		owner = ctx.is_owner,
	)
)]
pub fn resolve(
	ctx: &AuthorizationContext,
	access: &AccessList,
	current_state: &str,
	facts: &OwnershipFacts,
) -> AccessDecision {
	let reason = evaluate(ctx, access, current_state, facts);
	debug!(allowed = reason.allows(), reason = ?reason, "access decision");
	AccessDecision::new(reason)
}

/// Shorthand for [`resolve`] when only the verdict matters.
pub fn is_allowed(
	ctx: &AuthorizationContext,
	access: &AccessList,
	current_state: &str,
	facts: &OwnershipFacts,
) -> bool {
	resolve(ctx, access, current_state, facts).is_allowed()
}

/// Resolves against any [`AccessTarget`], reading its state and facts once.
pub fn authorize<T: AccessTarget + ?Sized>(
	ctx: &AuthorizationContext,
	access: &AccessList,
	target: &T,
) -> AccessDecision {
	resolve(
		ctx,
		access,
		target.current_state().as_str(),
		target.ownership_facts(),
	)
}

fn evaluate(
	ctx: &AuthorizationContext,
	access: &AccessList,
	current_state: &str,
	facts: &OwnershipFacts,
) -> DecisionReason {
	if ctx.is_owner {
		return DecisionReason::Owner;
	}

	let Some(allow_set) = access.get(current_state) else {
		return DecisionReason::UndefinedState;
	};

	if allow_set.allow_anonymous {
		return DecisionReason::Anonymous;
	}

	if allow_set.allow_authenticated && ctx.is_authenticated {
		return DecisionReason::Authenticated;
	}

	if allow_set.allow_author && facts.is_authored_by(ctx) {
		return DecisionReason::Author;
	}

	if allow_set.allow_self && facts.represents(ctx) {
		return DecisionReason::SelfMatch;
	}

	if let Some(role) = allow_set
		.group_roles
		.iter()
		.find(|role| facts.grants.group_satisfies(role, ctx))
	{
		return DecisionReason::GroupRole { role: role.clone() };
	}

	if let Some(role) = allow_set
		.privilege_roles
		.iter()
		.find(|role| facts.grants.privilege_satisfies(role, ctx))
	{
		return DecisionReason::PrivilegeRole { role: role.clone() };
	}

	DecisionReason::NoMatch
}
