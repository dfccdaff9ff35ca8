// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Immutable compiled snapshots.
//!
//! An [`AccessSnapshot`] is everything a request needs to answer an access check:
//! every content type's catalog, descriptors and compiled access lists. Snapshots
//! are never modified once built. Content types are held behind [`Arc`] so a reload
//! can carry an unchanged or rejected content type into the next snapshot without
//! recompiling it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use tessera_access_core::{
	compile_content_type, resolve, AccessDecision, AccessError, AccessList, AccessTarget,
	AuthorizationContext, ContentTypeDefinition, ContentTypeName, OperationDescriptor, OperationName,
	OwnershipFacts, RoleCatalog,
};

/// A descriptor together with the allow-sets compiled from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledOperation {
	pub descriptor: OperationDescriptor,
	pub access: AccessList,
}

/// All compiled operations of one content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledContentType {
	pub name: ContentTypeName,
	pub catalog: RoleCatalog,
	pub operations: BTreeMap<OperationName, CompiledOperation>,
}

impl CompiledContentType {
	/// Compiles every operation of `definition`. Fails on the first invalid operation.
	pub fn compile(definition: &ContentTypeDefinition) -> Result<Self, AccessError> {
		let operations = compile_content_type(definition)?
			.into_iter()
			.filter_map(|(name, access)| {
				let descriptor = definition.operations.get(&name)?.clone();
				Some((name, CompiledOperation { descriptor, access }))
			})
			.collect();

		Ok(Self {
			name: definition.name.clone(),
			catalog: definition.catalog.clone(),
			operations,
		})
	}

	pub fn operation(&self, operation: &str) -> Option<&CompiledOperation> {
		self.operations.get(operation)
	}

	/// Returns true if compiling `definition` would reproduce this content type.
	pub fn is_compiled_from(&self, definition: &ContentTypeDefinition) -> bool {
		self.name == definition.name
			&& self.catalog == definition.catalog
			&& self.operations.len() == definition.operations.len()
			&& definition.operations.iter().all(|(name, descriptor)| {
				self.operations
					.get(name)
					.is_some_and(|op| &op.descriptor == descriptor)
			})
	}
}

/// One published generation of compiled access rules.
#[derive(Debug, Clone, Serialize)]
pub struct AccessSnapshot {
	version: u64,
	compiled_at: DateTime<Utc>,
	content_types: BTreeMap<ContentTypeName, Arc<CompiledContentType>>,
}

impl AccessSnapshot {
	/// The snapshot in effect before anything is loaded. Denies everyone but owners.
	pub fn empty() -> Self {
		Self::new(0, BTreeMap::new())
	}

	pub(crate) fn new(
		version: u64,
		content_types: BTreeMap<ContentTypeName, Arc<CompiledContentType>>,
	) -> Self {
		Self {
			version,
			compiled_at: Utc::now(),
			content_types,
		}
	}

	/// Monotonic publication counter; zero for the initial empty snapshot.
	pub fn version(&self) -> u64 {
		self.version
	}

	pub fn compiled_at(&self) -> DateTime<Utc> {
		self.compiled_at
	}

	pub fn len(&self) -> usize {
		self.content_types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.content_types.is_empty()
	}

	pub fn content_type(&self, name: &str) -> Option<&Arc<CompiledContentType>> {
		self.content_types.get(name)
	}

	pub fn content_types(&self) -> impl Iterator<Item = &Arc<CompiledContentType>> {
		self.content_types.values()
	}

	pub(crate) fn content_type_map(&self) -> &BTreeMap<ContentTypeName, Arc<CompiledContentType>> {
		&self.content_types
	}

	/// The compiled access list for an operation, if both exist.
	pub fn access(&self, content_type: &str, operation: &str) -> Option<&AccessList> {
		self
			.content_type(content_type)
			.and_then(|ct| ct.operation(operation))
			.map(|op| &op.access)
	}

	/// Resolves an access check. Unknown content types and operations deny.
	pub fn resolve(
		&self,
		ctx: &AuthorizationContext,
		content_type: &str,
		operation: &str,
		current_state: &str,
		facts: &OwnershipFacts,
	) -> AccessDecision {
		match self.access(content_type, operation) {
			Some(access) => resolve(ctx, access, current_state, facts),
			None => {
				debug!(
					content_type,
					operation,
					version = self.version,
					"operation not defined, denying"
				);
				AccessDecision::undefined_operation()
			}
		}
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

	/// Resolves an access check against any [`AccessTarget`].
	pub fn authorize<T: AccessTarget + ?Sized>(
		&self,
		ctx: &AuthorizationContext,
		content_type: &str,
		operation: &str,
		target: &T,
	) -> AccessDecision {
		self.resolve(
			ctx,
			content_type,
			operation,
			target.current_state().as_str(),
			target.ownership_facts(),
		)
	}
}

impl Default for AccessSnapshot {
	fn default() -> Self {
		Self::empty()
	}
}
