// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end access properties, checked through a published snapshot.

mod support;

use proptest::prelude::*;
use tessera_access_core::{
	AccessError, AuthorizationContext, ContentTypeDefinition, DecisionReason, OperationDescriptor,
	OwnershipFacts, RoleCatalog,
};
use tessera_server_access::{AccessRegistry, AccessSnapshot, RegistryError, Rejection};
use tessera_server_access_config::ReloadPolicy;

use support::{anonymous, article, article_catalog, article_grants, profile, user, StoredArticle};

const STATES: [&str; 3] = ["draft", "published", "archived"];

fn publish(definitions: Vec<ContentTypeDefinition>) -> std::sync::Arc<AccessSnapshot> {
	let registry = AccessRegistry::new();
	let report = registry.reload(definitions).unwrap();
	assert!(report.is_clean(), "unexpected rejections: {:?}", report.rejected);
	registry.snapshot()
}

fn with_operation(descriptor: OperationDescriptor) -> ContentTypeDefinition {
	ContentTypeDefinition::new("article", article_catalog()).with_operation("op", descriptor)
}

// ============================================================================
// Generated Descriptors
// ============================================================================

fn role_strategy() -> impl Strategy<Value = &'static str> {
	prop::sample::select(vec![
		"editor",
		"subscriber",
		"ANONYMOUS",
		"AUTHENTICATED",
		"AUTHOR",
		"SELF",
	])
}

fn state_strategy() -> impl Strategy<Value = &'static str> {
	prop::sample::select(STATES.to_vec())
}

fn descriptor_strategy() -> impl Strategy<Value = OperationDescriptor> {
	(
		prop::collection::vec(role_strategy(), 0..4),
		prop::collection::vec(state_strategy(), 0..3),
		prop::collection::vec((state_strategy(), role_strategy()), 0..4),
	)
		.prop_map(|(roles, states, per_state)| {
			let mut descriptor = OperationDescriptor::new();
			for role in roles {
				descriptor = descriptor.with_role(role);
			}
			for state in states {
				descriptor = descriptor.with_state(state);
			}
			for (state, role) in per_state {
				descriptor = descriptor.with_state_role(state, role);
			}
			descriptor
		})
}

fn context_strategy() -> impl Strategy<Value = AuthorizationContext> {
	(
		prop::option::of("[a-z]{0,6}"),
		any::<bool>(),
		any::<bool>(),
	)
		.prop_map(|(subject, editor, gold)| {
			let mut ctx = match subject {
				Some(id) => user(&id),
				None => anonymous(),
			};
			if editor {
				ctx = ctx.with_group(support::EDITORS);
			}
			if gold {
				ctx = ctx.with_privilege(support::GOLD_PLAN);
			}
			ctx
		})
}

proptest! {
	#[test]
	fn every_declared_state_gets_an_allow_set(descriptor in descriptor_strategy()) {
		let snapshot = publish(vec![with_operation(descriptor)]);
		let access = snapshot.access("article", "op").unwrap();

		prop_assert_eq!(access.len(), STATES.len());
		for state in STATES {
			prop_assert!(access.get(state).is_some());
		}
	}

	#[test]
	fn anonymous_role_admits_every_caller(
		descriptor in descriptor_strategy(),
		ctx in context_strategy(),
		state in state_strategy(),
	) {
		let descriptor = OperationDescriptor {
			required_states: Default::default(),
			..descriptor.with_role("ANONYMOUS")
		};
		let snapshot = publish(vec![with_operation(descriptor)]);
		let access = snapshot.access("article", "op").unwrap();

		prop_assert!(access.get(state).unwrap().allow_anonymous);
		prop_assert!(snapshot.is_allowed(&ctx, "article", "op", state, &OwnershipFacts::new()));
	}

	#[test]
	fn publishing_is_deterministic(descriptor in descriptor_strategy()) {
		let first = publish(vec![with_operation(descriptor.clone())]);
		let second = publish(vec![with_operation(descriptor)]);

		prop_assert_eq!(
			first.access("article", "op").unwrap(),
			second.access("article", "op").unwrap()
		);
	}

	#[test]
	fn owners_are_allowed_everywhere(
		descriptor in descriptor_strategy(),
		ctx in context_strategy(),
		state in state_strategy(),
	) {
		let snapshot = publish(vec![with_operation(descriptor)]);
		let decision = snapshot.resolve(&ctx.as_owner(), "article", "op", state, &OwnershipFacts::new());
		prop_assert_eq!(decision.reason, DecisionReason::Owner);
	}
}

// ============================================================================
// Concrete Cases
// ============================================================================

#[test]
fn restricted_state_with_no_roles_admits_only_owners() {
	let snapshot = publish(vec![with_operation(
		OperationDescriptor::new().with_state("published"),
	)]);
	let access = snapshot.access("article", "op").unwrap();
	let facts = OwnershipFacts::new();

	assert!(access.get("draft").unwrap().is_empty());
	assert!(access.get("published").unwrap().is_empty());
	assert!(!snapshot.is_allowed(&user("alice"), "article", "op", "draft", &facts));
	assert!(!snapshot.is_allowed(&user("alice"), "article", "op", "published", &facts));
	assert!(snapshot.is_allowed(&user("alice").as_owner(), "article", "op", "published", &facts));
}

#[test]
fn purchasable_role_compiles_to_privilege_role() {
	let snapshot = publish(vec![article()]);
	let access = snapshot.access("article", "read-full").unwrap();
	let published = access.get("published").unwrap();

	assert_eq!(
		published.privilege_roles.iter().map(|r| r.as_str()).collect::<Vec<_>>(),
		vec!["subscriber"]
	);
	assert!(published.group_roles.is_empty());

	let facts = OwnershipFacts::new().with_grants(article_grants());
	let subscriber = user("alice").with_privilege(support::GOLD_PLAN);
	assert!(snapshot.is_allowed(&subscriber, "article", "read-full", "published", &facts));
	assert!(!snapshot.is_allowed(&user("bob"), "article", "read-full", "published", &facts));
}

#[test]
fn undeclared_role_fails_compilation() {
	let definition = with_operation(OperationDescriptor::new().with_role("ghost-role"));
	let registry = AccessRegistry::with_policy(ReloadPolicy::AllOrNothing);

	let err = registry.reload(vec![definition]).unwrap_err();

	let RegistryError::Rejected { errors } = err else {
		panic!("expected rejection, got {err:?}");
	};
	assert!(matches!(
		&errors[..],
		[Rejection::Invalid(AccessError::UndefinedRole { token, .. })] if token.as_str() == "ghost-role"
	));
	assert!(errors[0].to_string().contains("ghost-role"));
	assert!(registry.snapshot().is_empty());
}

#[test]
fn undefined_operation_is_denied_with_reason() {
	let snapshot = publish(vec![article()]);
	let decision = snapshot.resolve(&user("alice"), "article", "delete", "draft", &OwnershipFacts::new());
	assert_eq!(decision.reason, DecisionReason::UndefinedOperation);
}

// ============================================================================
// Access Targets
// ============================================================================

#[test]
fn authors_may_edit_their_own_drafts() {
	let snapshot = publish(vec![article()]);
	let draft = StoredArticle::new("draft", "alice");

	let decision = snapshot.authorize(&user("alice"), "article", "edit", &draft);
	assert_eq!(decision.reason, DecisionReason::Author);
	assert!(!snapshot.authorize(&user("bob"), "article", "edit", &draft).is_allowed());

	let published = StoredArticle::new("published", "alice");
	assert!(!snapshot.authorize(&user("alice"), "article", "edit", &published).is_allowed());
}

#[test]
fn editors_may_edit_in_any_state() {
	let snapshot = publish(vec![article()]);
	let editor = user("carol").with_group(support::EDITORS);

	for state in STATES {
		let target = StoredArticle::new(state, "alice");
		let decision = snapshot.authorize(&editor, "article", "edit", &target);
		assert!(
			matches!(decision.reason, DecisionReason::GroupRole { ref role } if role.as_str() == "editor"),
			"state {state}: {decision:?}"
		);
	}
}

#[test]
fn anonymous_readers_see_only_published_articles() {
	let snapshot = publish(vec![article()]);

	let published = StoredArticle::new("published", "alice");
	let draft = StoredArticle::new("draft", "alice");
	assert!(snapshot.authorize(&anonymous(), "article", "view", &published).is_allowed());
	assert!(!snapshot.authorize(&anonymous(), "article", "view", &draft).is_allowed());
}

#[test]
fn profiles_are_editable_only_by_their_subject() {
	let snapshot = publish(vec![profile()]);
	let facts = OwnershipFacts::new().representing("alice");

	assert!(snapshot.is_allowed(&user("alice"), "profile", "edit", "active", &facts));
	assert!(!snapshot.is_allowed(&user("bob"), "profile", "edit", "active", &facts));
	assert!(snapshot.is_allowed(&user("bob"), "profile", "view", "active", &facts));
	assert!(!snapshot.is_allowed(&anonymous(), "profile", "view", "active", &facts));
}

#[test]
fn unknown_state_is_denied() {
	let snapshot = publish(vec![article()]);
	let decision = snapshot.resolve(&anonymous(), "article", "view", "deleted", &OwnershipFacts::new());
	assert_eq!(decision.reason, DecisionReason::UndefinedState);
}

#[test]
fn catalog_without_states_yields_empty_access_lists() {
	let definition = ContentTypeDefinition::new("note", RoleCatalog::new())
		.with_operation("view", OperationDescriptor::new().with_role("ANONYMOUS"));
	let snapshot = publish(vec![definition]);

	assert!(snapshot.access("note", "view").unwrap().is_empty());
	assert!(!snapshot.is_allowed(&anonymous(), "note", "view", "draft", &OwnershipFacts::new()));
}
