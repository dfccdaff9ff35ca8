// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reload behaviour: concurrent readers and configuration-driven loading.

mod support;

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use tempfile::TempDir;
use tessera_access_core::{ContentTypeDefinition, OperationDescriptor, OwnershipFacts};
use tessera_server_access::{AccessRegistry, RegistryError};
use tessera_server_access_config::{
	AccessConfig, ConfigError, DefinitionsConfig, LoggingConfig, ReloadPolicy,
};

use support::{anonymous, article_catalog, user};

/// Odd versions let anyone view drafts; even versions restrict drafts to editors.
fn generation(version: u64) -> ContentTypeDefinition {
	let role = if version % 2 == 1 { "ANONYMOUS" } else { "editor" };
	ContentTypeDefinition::new("article", article_catalog())
		.with_operation("view", OperationDescriptor::new().with_role(role))
		.with_operation("edit", OperationDescriptor::new().with_role(role))
}

// ============================================================================
// Concurrent Readers
// ============================================================================

#[test]
fn readers_never_observe_a_mixed_snapshot() {
	const RELOADS: u64 = 200;
	const READERS: usize = 4;

	let registry = AccessRegistry::new();
	registry.reload(vec![generation(1)]).unwrap();
	let done = AtomicBool::new(false);

	thread::scope(|scope| {
		for _ in 0..READERS {
			scope.spawn(|| {
				let ctx = anonymous();
				let facts = OwnershipFacts::new();
				let mut last_version = 0;
				let mut observed = 0u64;

				while !done.load(Ordering::Acquire) || observed == 0 {
					let snapshot = registry.snapshot();
					let version = snapshot.version();
					assert!(version >= last_version, "version went backwards");
					last_version = version;

					let expected = version % 2 == 1;
					let view = snapshot.is_allowed(&ctx, "article", "view", "draft", &facts);
					let edit = snapshot.is_allowed(&ctx, "article", "edit", "draft", &facts);
					assert_eq!(view, expected, "view disagrees with version {version}");
					assert_eq!(edit, expected, "edit disagrees with version {version}");
					observed += 1;
				}
			});
		}

		for version in 2..=RELOADS {
			let report = registry.reload(vec![generation(version)]).unwrap();
			assert_eq!(report.version, version);
		}
		done.store(true, Ordering::Release);
	});

	assert_eq!(registry.version(), RELOADS);
}

#[test]
fn concurrent_reloads_are_serialized() {
	const WRITERS: u64 = 4;
	const RELOADS_PER_WRITER: u64 = 25;

	let registry = AccessRegistry::new();

	thread::scope(|scope| {
		for _ in 0..WRITERS {
			scope.spawn(|| {
				for _ in 0..RELOADS_PER_WRITER {
					registry.reload(vec![generation(1)]).unwrap();
				}
			});
		}
	});

	assert_eq!(registry.version(), WRITERS * RELOADS_PER_WRITER);
}

// ============================================================================
// Configuration-Driven Loading
// ============================================================================

const ARTICLE: &str = r#"
name = "article"

[catalog]
states = ["draft", "published"]

[catalog.roles.editor]
label = "Editor"

[catalog.roles.subscriber]
label = "Subscriber"
purchasable = true

[operations.view]
requiredRoles = ["ANONYMOUS"]
requiredStates = ["published"]

[operations.edit]
requiredRoles = ["editor"]

[operations.edit.perStateRoles]
draft = ["AUTHOR"]
"#;

const PROFILE: &str = r#"
name = "profile"

[catalog]
states = ["active"]

[operations.edit]
requiredRoles = ["SELF"]
"#;

const BROKEN_ARTICLE: &str = r#"
name = "article"

[catalog]
states = ["draft", "published"]

[operations.view]
requiredRoles = ["ghost-role"]
"#;

fn write(dir: &Path, name: &str, content: &str) {
	std::fs::write(dir.join(name), content).unwrap();
}

fn config(dir: &Path, reload_policy: ReloadPolicy) -> AccessConfig {
	AccessConfig {
		definitions: DefinitionsConfig {
			dir: dir.to_path_buf(),
			reload_policy,
		},
		logging: LoggingConfig::default(),
	}
}

#[test]
fn from_config_loads_definitions_directory() {
	let dir = TempDir::new().unwrap();
	write(dir.path(), "article.toml", ARTICLE);
	write(dir.path(), "profile.toml", PROFILE);

	let registry = AccessRegistry::from_config(&config(dir.path(), ReloadPolicy::default())).unwrap();
	let snapshot = registry.snapshot();

	assert_eq!(snapshot.version(), 1);
	assert_eq!(snapshot.len(), 2);
	assert!(snapshot.is_allowed(&anonymous(), "article", "view", "published", &OwnershipFacts::new()));

	let mine = OwnershipFacts::new().with_author("alice");
	assert!(snapshot.is_allowed(&user("alice"), "article", "edit", "draft", &mine));
	assert!(!snapshot.is_allowed(&user("alice"), "article", "edit", "published", &mine));
}

#[test]
fn missing_directory_publishes_empty_snapshot() {
	let dir = TempDir::new().unwrap();
	let registry =
		AccessRegistry::from_config(&config(&dir.path().join("absent"), ReloadPolicy::default()))
			.unwrap();

	assert_eq!(registry.version(), 1);
	assert!(registry.snapshot().is_empty());
}

#[test]
fn reload_from_config_keeps_previous_rules_for_broken_file() {
	let dir = TempDir::new().unwrap();
	write(dir.path(), "article.toml", ARTICLE);
	write(dir.path(), "profile.toml", PROFILE);
	let config = config(dir.path(), ReloadPolicy::PerContentType);
	let registry = AccessRegistry::from_config(&config).unwrap();

	write(dir.path(), "article.toml", BROKEN_ARTICLE);
	let report = registry.reload_from_config(&config.definitions).unwrap();

	assert_eq!(report.version, 2);
	assert_eq!(report.retained.len(), 1);
	assert_eq!(report.retained[0].as_str(), "article");
	assert!(registry.is_allowed(&anonymous(), "article", "view", "published", &OwnershipFacts::new()));
}

#[test]
fn reload_from_config_all_or_nothing_rejects_broken_file() {
	let dir = TempDir::new().unwrap();
	write(dir.path(), "article.toml", ARTICLE);
	let config = config(dir.path(), ReloadPolicy::AllOrNothing);
	let registry = AccessRegistry::from_config(&config).unwrap();

	write(dir.path(), "article.toml", BROKEN_ARTICLE);
	write(dir.path(), "profile.toml", PROFILE);
	let err = registry.reload_from_config(&config.definitions).unwrap_err();

	assert!(matches!(err, RegistryError::Rejected { .. }));
	assert_eq!(registry.version(), 1);
	assert!(registry.snapshot().content_type("profile").is_none());
}

#[test]
fn unreadable_definitions_surface_config_errors() {
	let dir = TempDir::new().unwrap();
	write(dir.path(), "article.toml", ARTICLE);
	let config = config(dir.path(), ReloadPolicy::default());
	let registry = AccessRegistry::from_config(&config).unwrap();

	write(dir.path(), "copy.toml", ARTICLE);
	let err = registry.reload_from_config(&config.definitions).unwrap_err();

	assert!(matches!(
		err,
		RegistryError::Config(ConfigError::DuplicateContentType { .. })
	));
	assert_eq!(registry.version(), 1);
}
