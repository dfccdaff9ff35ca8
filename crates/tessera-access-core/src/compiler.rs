// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access rule compiler.
//!
//! Turns an [`OperationDescriptor`] and its owning [`RoleCatalog`] into an
//! [`AccessList`]: one [`AllowSet`] for every state the catalog declares.
//!
//! Compilation is two-phase:
//!
//! 1. **Validation**: every role and state the descriptor mentions must exist in the
//!    catalog (or be a magic role). The first invalid token aborts compilation.
//! 2. **Per-state folding**: each state's candidate roles are folded into an
//!    allow-set, with `ANONYMOUS` and `AUTHENTICATED` short-circuiting the rest.
//!
//! The output only depends on its inputs and iterates ordered collections, so
//! compiling the same pair twice yields identical allow-sets.

use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

use crate::allow_set::{AccessList, AllowSet};
use crate::catalog::RoleCatalog;
use crate::descriptor::{ContentTypeDefinition, DescriptorField, OperationDescriptor};
use crate::error::{AccessError, Result};
use crate::token::{ContentTypeName, MagicRole, OperationName, RoleToken};

/// Compiles one operation descriptor against its content type's catalog.
#[instrument(
	level = "debug",
	skip(catalog, descriptor),
	fields(content_type = %content_type, states = catalog.states.len())
)]
pub fn compile(
	content_type: &ContentTypeName,
	catalog: &RoleCatalog,
	descriptor: &OperationDescriptor,
) -> Result<AccessList> {
	catalog.validate(content_type)?;
	validate(content_type, catalog, descriptor)?;

	let allow_sets = catalog
		.states
		.iter()
		.map(|state| {
			let permitted = descriptor.required_states.is_empty()
				|| descriptor.required_states.contains(state);

			let allow_set = if permitted {
				let mut candidates: BTreeSet<&RoleToken> = descriptor.required_roles.iter().collect();
				if let Some(extra) = descriptor.per_state_roles.get(state) {
					candidates.extend(extra);
				}
				fold_candidates(catalog, candidates)
			} else {
				AllowSet::default()
			};

			(state.clone(), allow_set)
		})
		.collect::<BTreeMap<_, _>>();

	debug!(compiled = allow_sets.len(), "compiled access list");
	Ok(AccessList::from_map(allow_sets))
}

/// Compiles every operation of a content type. Fails on the first invalid operation.
pub fn compile_content_type(
	definition: &ContentTypeDefinition,
) -> Result<BTreeMap<OperationName, AccessList>> {
	definition
		.operations
		.iter()
		.map(|(operation, descriptor)| {
			compile(&definition.name, &definition.catalog, descriptor)
				.map(|access| (operation.clone(), access))
		})
		.collect()
}

fn validate(
	content_type: &ContentTypeName,
	catalog: &RoleCatalog,
	descriptor: &OperationDescriptor,
) -> Result<()> {
	validate_roles(
		content_type,
		catalog,
		DescriptorField::RequiredRoles,
		&descriptor.required_roles,
	)?;

	for state in &descriptor.required_states {
		if !catalog.has_state(state.as_str()) {
			return Err(AccessError::UndefinedState {
				content_type: content_type.clone(),
				field: DescriptorField::RequiredStates,
				state: state.clone(),
			});
		}
	}

	for state in descriptor.per_state_roles.keys() {
		if !catalog.has_state(state.as_str()) {
			return Err(AccessError::UndefinedState {
				content_type: content_type.clone(),
				field: DescriptorField::PerStateRoles(state.clone()),
				state: state.clone(),
			});
		}
	}

	for (state, roles) in &descriptor.per_state_roles {
		validate_roles(
			content_type,
			catalog,
			DescriptorField::PerStateRoles(state.clone()),
			roles,
		)?;
	}

	Ok(())
}

fn validate_roles(
	content_type: &ContentTypeName,
	catalog: &RoleCatalog,
	field: DescriptorField,
	roles: &BTreeSet<RoleToken>,
) -> Result<()> {
	match roles.iter().find(|token| !catalog.is_known_role(token)) {
		Some(token) => Err(AccessError::UndefinedRole {
			content_type: content_type.clone(),
			field,
			token: token.clone(),
		}),
		None => Ok(()),
	}
}

fn fold_candidates(catalog: &RoleCatalog, candidates: BTreeSet<&RoleToken>) -> AllowSet {
	if candidates.iter().any(|t| t.magic() == Some(MagicRole::Anonymous)) {
		return AllowSet::anonymous();
	}
	if candidates
		.iter()
		.any(|t| t.magic() == Some(MagicRole::Authenticated))
	{
		return AllowSet::authenticated();
	}

	let mut allow_set = AllowSet::default();
	for token in candidates {
		match token.magic() {
			// Owners bypass allow-sets in the resolver.
			Some(MagicRole::Owner) => {}
			Some(MagicRole::SelfRole) => allow_set.allow_self = true,
			Some(MagicRole::Author) => allow_set.allow_author = true,
			Some(MagicRole::Anonymous | MagicRole::Authenticated) => {}
			None => match catalog.role(token.as_str()) {
				Some(role) if role.purchasable => {
					allow_set.privilege_roles.insert(token.clone());
				}
				Some(_) => {
					allow_set.group_roles.insert(token.clone());
				}
				None => {}
			},
		}
	}
	allow_set
}
