// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Content-type definitions configuration section.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_DEFINITIONS_DIR: &str = "/etc/tessera/content-types";

/// How a reload treats content types whose definitions fail to compile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReloadPolicy {
	/// Invalid content types keep their previously published rules; valid ones are replaced.
	#[default]
	PerContentType,
	/// Any invalid content type rejects the whole reload.
	AllOrNothing,
}

impl fmt::Display for ReloadPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ReloadPolicy::PerContentType => write!(f, "per_content_type"),
			ReloadPolicy::AllOrNothing => write!(f, "all_or_nothing"),
		}
	}
}

impl FromStr for ReloadPolicy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"per_content_type" => Ok(ReloadPolicy::PerContentType),
			"all_or_nothing" => Ok(ReloadPolicy::AllOrNothing),
			other => Err(format!("unknown reload policy '{other}'")),
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DefinitionsConfigLayer {
	pub dir: Option<PathBuf>,
	pub reload_policy: Option<ReloadPolicy>,
}

impl DefinitionsConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.dir.is_some() {
			self.dir = other.dir;
		}
		if other.reload_policy.is_some() {
			self.reload_policy = other.reload_policy;
		}
	}

	pub fn finalize(self) -> DefinitionsConfig {
		DefinitionsConfig {
			dir: self
				.dir
				.unwrap_or_else(|| PathBuf::from(DEFAULT_DEFINITIONS_DIR)),
			reload_policy: self.reload_policy.unwrap_or_default(),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DefinitionsConfig {
	pub dir: PathBuf,
	pub reload_policy: ReloadPolicy,
}

impl Default for DefinitionsConfig {
	fn default() -> Self {
		DefinitionsConfigLayer::default().finalize()
	}
}
