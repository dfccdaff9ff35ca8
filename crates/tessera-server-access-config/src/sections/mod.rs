// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

mod definitions;
mod logging;

pub use definitions::{
	DefinitionsConfig, DefinitionsConfigLayer, ReloadPolicy, DEFAULT_DEFINITIONS_DIR,
};
pub use logging::{init_tracing, LoggingConfig, LoggingConfigLayer};
