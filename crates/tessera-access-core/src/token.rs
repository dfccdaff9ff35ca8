// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Token and identifier newtypes.
//!
//! Every name that flows through the access subsystem is an opaque string, but the
//! different kinds must never be mixed up: a lifecycle state is not a role, and a
//! group identifier is not a subject. Each kind gets its own newtype here:
//!
//! - **Role and state tokens**: [`RoleToken`], [`StateToken`]
//! - **Configuration names**: [`ContentTypeName`], [`OperationName`]
//! - **Caller identifiers**: [`SubjectId`], [`GroupId`], [`PrivilegeId`]
//! - **Magic roles**: the closed [`MagicRole`] enumeration
//!
//! All newtypes serialize transparently as plain strings and order lexicographically,
//! so the maps and sets built from them iterate deterministically.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

// =============================================================================
// String Newtypes
// =============================================================================

macro_rules! define_token_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(String);

		impl $name {
			/// Create a new value from anything string-like.
			pub fn new(value: impl Into<String>) -> Self {
				Self(value.into())
			}

			/// Get the underlying string.
			pub fn as_str(&self) -> &str {
				&self.0
			}

			/// Returns true if the value is the empty string.
			pub fn is_empty(&self) -> bool {
				self.0.is_empty()
			}

			/// Consume the value and return the inner string.
			pub fn into_inner(self) -> String {
				self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(&self.0)
			}
		}

		impl From<&str> for $name {
			fn from(value: &str) -> Self {
				Self(value.to_string())
			}
		}

		impl From<String> for $name {
			fn from(value: String) -> Self {
				Self(value)
			}
		}

		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
	};
}

define_token_type!(RoleToken, "Opaque identifier naming a permission grant.");
define_token_type!(StateToken, "Opaque identifier naming one lifecycle state.");
define_token_type!(ContentTypeName, "Name of a content type owning a role catalog.");
define_token_type!(OperationName, "Name of an operation declared on a content type.");
define_token_type!(SubjectId, "Opaque identifier of an authenticated caller.");
define_token_type!(GroupId, "Opaque identifier of a group the caller belongs to.");
define_token_type!(PrivilegeId, "Opaque identifier of a purchase or subscription held by the caller.");

// =============================================================================
// Magic Roles
// =============================================================================

/// Built-in roles whose meaning is computed from the request rather than declared.
///
/// Magic roles are never declared in a role catalog. The compiler folds them into
/// the boolean fields of an allow-set and the resolver evaluates them against the
/// authorization context and the target's ownership facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MagicRole {
	/// Everyone, identified or not.
	#[serde(rename = "ANONYMOUS")]
	Anonymous,
	/// Any identified caller.
	#[serde(rename = "AUTHENTICATED")]
	Authenticated,
	/// The owner of the target. Handled structurally by the resolver.
	#[serde(rename = "OWNER")]
	Owner,
	/// The subject that created the target.
	#[serde(rename = "AUTHOR")]
	Author,
	/// The subject the target represents (e.g. their own profile).
	#[serde(rename = "SELF")]
	SelfRole,
}

impl MagicRole {
	/// Returns all magic roles.
	pub fn all() -> &'static [MagicRole] {
		&[
			MagicRole::Anonymous,
			MagicRole::Authenticated,
			MagicRole::Owner,
			MagicRole::Author,
			MagicRole::SelfRole,
		]
	}

	/// Canonical token spelling.
	pub fn as_str(&self) -> &'static str {
		match self {
			MagicRole::Anonymous => "ANONYMOUS",
			MagicRole::Authenticated => "AUTHENTICATED",
			MagicRole::Owner => "OWNER",
			MagicRole::Author => "AUTHOR",
			MagicRole::SelfRole => "SELF",
		}
	}

	/// Parses the canonical spelling. Matching is case-sensitive.
	pub fn parse(token: &str) -> Option<MagicRole> {
		MagicRole::all()
			.iter()
			.copied()
			.find(|role| role.as_str() == token)
	}

	/// Returns this magic role as a role token.
	pub fn token(&self) -> RoleToken {
		RoleToken::new(self.as_str())
	}
}

impl fmt::Display for MagicRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl RoleToken {
	/// The `ANONYMOUS` magic token.
	pub fn anonymous() -> Self {
		MagicRole::Anonymous.token()
	}

	/// The `AUTHENTICATED` magic token.
	pub fn authenticated() -> Self {
		MagicRole::Authenticated.token()
	}

	/// The `OWNER` magic token.
	pub fn owner() -> Self {
		MagicRole::Owner.token()
	}

	/// The `AUTHOR` magic token.
	pub fn author() -> Self {
		MagicRole::Author.token()
	}

	/// The `SELF` magic token.
	pub fn self_role() -> Self {
		MagicRole::SelfRole.token()
	}

	/// Returns the magic role this token names, if any.
	pub fn magic(&self) -> Option<MagicRole> {
		MagicRole::parse(self.as_str())
	}

	/// Returns true if this token names a magic role.
	pub fn is_magic(&self) -> bool {
		self.magic().is_some()
	}
}

impl From<MagicRole> for RoleToken {
	fn from(role: MagicRole) -> Self {
		role.token()
	}
}
