// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The published access snapshot and its reload path.
//!
//! Readers call [`AccessRegistry::snapshot`] once per decision and keep the returned
//! [`Arc`] for the rest of it. Loading never blocks. Reloads compile into a fresh
//! [`AccessSnapshot`] and publish it with a single store, so a reader sees either the
//! old snapshot or the new one and never a mixture.

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use tessera_access_core::{
	AccessDecision, AccessTarget, AuthorizationContext, ContentTypeDefinition, ContentTypeName,
	OwnershipFacts,
};
use tessera_server_access_config::{load_definitions, AccessConfig, DefinitionsConfig, ReloadPolicy};

use crate::error::{RegistryError, Rejection, Result};
use crate::snapshot::{AccessSnapshot, CompiledContentType};

/// Outcome of a reload that published a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReloadReport {
	/// Version of the snapshot that was published.
	pub version: u64,
	/// Content types published from the supplied definitions.
	pub published: Vec<ContentTypeName>,
	/// Rejected content types that kept their previously published form.
	pub retained: Vec<ContentTypeName>,
	/// Previously published content types absent from the supplied definitions.
	pub removed: Vec<ContentTypeName>,
	#[serde(skip)]
	pub rejected: Vec<Rejection>,
}

impl ReloadReport {
	/// Returns true if every supplied definition was published.
	pub fn is_clean(&self) -> bool {
		self.rejected.is_empty()
	}
}

/// Holds the current [`AccessSnapshot`] and publishes new ones on reload.
pub struct AccessRegistry {
	current: ArcSwap<AccessSnapshot>,
	reload_lock: Mutex<()>,
	policy: ReloadPolicy,
}

impl AccessRegistry {
	/// A registry serving the empty snapshot under the default reload policy.
	pub fn new() -> Self {
		Self::with_policy(ReloadPolicy::default())
	}

	pub fn with_policy(policy: ReloadPolicy) -> Self {
		Self {
			current: ArcSwap::from_pointee(AccessSnapshot::empty()),
			reload_lock: Mutex::new(()),
			policy,
		}
	}

	/// Builds a registry from configuration and performs the initial load.
	#[instrument(level = "debug", skip(config), fields(dir = %config.definitions.dir.display()))]
	pub fn from_config(config: &AccessConfig) -> Result<Self> {
		let registry = Self::with_policy(config.definitions.reload_policy);
		registry.reload_from_config(&config.definitions)?;
		Ok(registry)
	}

	pub fn policy(&self) -> ReloadPolicy {
		self.policy
	}

	/// The snapshot currently in effect.
	pub fn snapshot(&self) -> Arc<AccessSnapshot> {
		self.current.load_full()
	}

	pub fn version(&self) -> u64 {
		self.current.load().version()
	}

	/// Resolves against the current snapshot.
	pub fn resolve(
		&self,
		ctx: &AuthorizationContext,
		content_type: &str,
		operation: &str,
		current_state: &str,
		facts: &OwnershipFacts,
	) -> AccessDecision {
		self
			.current
			.load()
			.resolve(ctx, content_type, operation, current_state, facts)
	}

	pub fn is_allowed(
		&self,
		ctx: &AuthorizationContext,
		content_type: &str,
		operation: &str,
		current_state: &str,
		facts: &OwnershipFacts,
	) -> bool {
		self
			.resolve(ctx, content_type, operation, current_state, facts)
			.is_allowed()
	}

	pub fn authorize<T: AccessTarget + ?Sized>(
		&self,
		ctx: &AuthorizationContext,
		content_type: &str,
		operation: &str,
		target: &T,
	) -> AccessDecision {
		self.current.load().authorize(ctx, content_type, operation, target)
	}

	/// Re-reads the definitions directory and reloads.
	pub fn reload_from_config(&self, config: &DefinitionsConfig) -> Result<ReloadReport> {
		let definitions = load_definitions(config)?;
		self.reload(definitions)
	}

	/// Compiles `definitions` into a new snapshot and publishes it.
	///
	/// The supplied definitions replace the whole set: content types not present are
	/// removed. How invalid definitions are handled depends on the [`ReloadPolicy`].
	#[instrument(level = "debug", skip(self, definitions), fields(policy = %self.policy, count = definitions.len()))]
	pub fn reload(&self, definitions: Vec<ContentTypeDefinition>) -> Result<ReloadReport> {
		let _guard = self.reload_lock.lock();
		let previous = self.current.load_full();

		let mut grouped: BTreeMap<ContentTypeName, Vec<ContentTypeDefinition>> = BTreeMap::new();
		for definition in definitions {
			grouped
				.entry(definition.name.clone())
				.or_default()
				.push(definition);
		}

		let supplied: BTreeSet<ContentTypeName> = grouped.keys().cloned().collect();

		let mut compiled: BTreeMap<ContentTypeName, Arc<CompiledContentType>> = BTreeMap::new();
		let mut rejected = Vec::new();
		for (name, mut candidates) in grouped {
			if candidates.len() > 1 {
				rejected.push(Rejection::Duplicate(name));
				continue;
			}
			let Some(definition) = candidates.pop() else {
				continue;
			};

			if let Some(existing) = previous.content_type(name.as_str()) {
				if existing.is_compiled_from(&definition) {
					debug!(content_type = %name, "definition unchanged, reusing compiled form");
					compiled.insert(name, Arc::clone(existing));
					continue;
				}
			}

			match CompiledContentType::compile(&definition) {
				Ok(content_type) => {
					compiled.insert(name, Arc::new(content_type));
				}
				Err(err) => rejected.push(Rejection::from(err)),
			}
		}

		if !rejected.is_empty() && self.policy == ReloadPolicy::AllOrNothing {
			for rejection in &rejected {
				error!(content_type = %rejection.content_type(), error = %rejection, "content type rejected");
			}
			error!(
				version = previous.version(),
				rejected = rejected.len(),
				"reload rejected, keeping previous snapshot"
			);
			return Err(RegistryError::Rejected { errors: rejected });
		}

		let published: Vec<ContentTypeName> = compiled.keys().cloned().collect();
		let mut retained = Vec::new();
		for rejection in &rejected {
			let name = rejection.content_type();
			match previous.content_type(name.as_str()) {
				Some(existing) => {
					warn!(content_type = %name, error = %rejection, "content type rejected, keeping previous rules");
					compiled.insert(name.clone(), Arc::clone(existing));
					retained.push(name.clone());
				}
				None => {
					warn!(content_type = %name, error = %rejection, "content type rejected, not published");
				}
			}
		}

		let removed: Vec<ContentTypeName> = previous
			.content_type_map()
			.keys()
			.filter(|name| !supplied.contains(*name))
			.cloned()
			.collect();

		let version = previous.version() + 1;
		self.current
			.store(Arc::new(AccessSnapshot::new(version, compiled)));

		info!(
			version,
			published = published.len(),
			retained = retained.len(),
			removed = removed.len(),
			rejected = rejected.len(),
			"access snapshot published"
		);

		Ok(ReloadReport {
			version,
			published,
			retained,
			removed,
			rejected,
		})
	}
}

impl Default for AccessRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for AccessRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AccessRegistry")
			.field("version", &self.version())
			.field("policy", &self.policy)
			.finish()
	}
}
