// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared fixtures for access integration tests.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use tessera_access_core::{
	AccessTarget, AuthorizationContext, ContentTypeDefinition, OperationDescriptor, OwnershipFacts,
	RoleCatalog, RoleGrants, StateToken,
};

pub const EDITORS: &str = "g-editors";
pub const GOLD_PLAN: &str = "plan-gold";

pub fn article_catalog() -> RoleCatalog {
	RoleCatalog::new()
		.with_group_role("editor", "Editor")
		.with_privilege_role("subscriber", "Subscriber")
		.with_state("draft")
		.with_state("published")
		.with_state("archived")
}

/// An article type exercising every kind of role token.
pub fn article() -> ContentTypeDefinition {
	ContentTypeDefinition::new("article", article_catalog())
		.with_operation(
			"view",
			OperationDescriptor::new()
				.with_state("published")
				.with_role("ANONYMOUS"),
		)
		.with_operation(
			"read-full",
			OperationDescriptor::new()
				.with_state("published")
				.with_role("subscriber"),
		)
		.with_operation(
			"edit",
			OperationDescriptor::new()
				.with_role("editor")
				.with_state_role("draft", "AUTHOR"),
		)
		.with_operation(
			"publish",
			OperationDescriptor::new()
				.with_state("published")
				.with_role("editor"),
		)
}

/// A profile type whose only rule is "the caller's own record".
pub fn profile() -> ContentTypeDefinition {
	ContentTypeDefinition::new("profile", RoleCatalog::new().with_state("active"))
		.with_operation("edit", OperationDescriptor::new().with_role("SELF"))
		.with_operation("view", OperationDescriptor::new().with_role("AUTHENTICATED"))
}

pub fn anonymous() -> AuthorizationContext {
	AuthorizationContext::anonymous(Utc::now() + Duration::hours(1))
}

pub fn user(id: &str) -> AuthorizationContext {
	AuthorizationContext::authenticated(id, Utc::now() + Duration::hours(1))
}

pub fn article_grants() -> RoleGrants {
	RoleGrants::new()
		.grant_group("editor", EDITORS)
		.grant_privilege("subscriber", GOLD_PLAN)
}

/// An article instance as the object store would hand it over.
#[derive(Debug, Clone)]
pub struct StoredArticle {
	pub state: StateToken,
	pub facts: OwnershipFacts,
}

impl StoredArticle {
	pub fn new(state: &str, author: &str) -> Self {
		Self {
			state: StateToken::from(state),
			facts: OwnershipFacts::new()
				.with_author(author)
				.with_grants(article_grants()),
		}
	}
}

impl AccessTarget for StoredArticle {
	fn current_state(&self) -> &StateToken {
		&self.state
	}

	fn ownership_facts(&self) -> &OwnershipFacts {
		&self.facts
	}
}
