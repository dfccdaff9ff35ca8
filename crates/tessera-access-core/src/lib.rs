// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for Tessera content access control.
//!
//! This crate turns declarative, per content type permission rules into
//! precomputed allow-sets and answers "may this caller perform this operation on
//! this object right now?" without re-deriving role membership per request. It is
//! used by the snapshot registry (`tessera-server-access`) and by anything that
//! needs to evaluate a single compiled rule directly.
//!
//! # Overview
//!
//! - [`RoleCatalog`]: custom roles and lifecycle states a content type declares
//! - [`OperationDescriptor`]: which roles, in which states, may invoke an operation
//! - [`compile`]: validates a descriptor and builds an [`AccessList`] of [`AllowSet`]s
//! - [`resolve`] / [`is_allowed`]: default-deny evaluation against an [`AuthorizationContext`]
//! - [`matched_roles`]: the lightweight evaluator for private-by-default records
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, Utc};
//! use tessera_access_core::{
//!     compile, is_allowed, AuthorizationContext, ContentTypeName, OperationDescriptor,
//!     OwnershipFacts, RoleCatalog,
//! };
//!
//! let catalog = RoleCatalog::new().with_state("draft").with_state("published");
//! let descriptor = OperationDescriptor::new()
//!     .with_state("published")
//!     .with_role("ANONYMOUS");
//! let access = compile(&ContentTypeName::from("article"), &catalog, &descriptor).unwrap();
//!
//! let ctx = AuthorizationContext::anonymous(Utc::now() + Duration::hours(1));
//! assert!(is_allowed(&ctx, &access, "published", &OwnershipFacts::new()));
//! assert!(!is_allowed(&ctx, &access, "draft", &OwnershipFacts::new()));
//! ```

pub mod allow_set;
pub mod catalog;
pub mod compiler;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod facts;
pub mod resolver;
pub mod simple;
pub mod token;

pub use allow_set::{AccessList, AllowSet};
pub use catalog::{RoleCatalog, RoleDefinition};
pub use compiler::{compile, compile_content_type};
pub use context::AuthorizationContext;
pub use descriptor::{ContentTypeDefinition, DescriptorField, OperationDescriptor};
pub use error::{AccessError, Result};
pub use facts::{AccessTarget, OwnershipFacts, RoleGrants};
pub use resolver::{authorize, is_allowed, resolve, AccessDecision, DecisionReason};
pub use simple::matched_roles;
pub use token::{
	ContentTypeName, GroupId, MagicRole, OperationName, PrivilegeId, RoleToken, StateToken,
	SubjectId,
};
