// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Published access rules for Tessera servers.
//!
//! Compiles content-type definitions into immutable [`AccessSnapshot`]s and serves
//! them through an [`AccessRegistry`]. Request handlers load the current snapshot
//! without locking; configuration reloads build and publish a replacement.
//!
//! # Usage
//!
//! ```ignore
//! use tessera_server_access::AccessRegistry;
//! use tessera_server_access_config::{init_tracing, load_config};
//!
//! let config = load_config()?;
//! init_tracing(&config.logging)?;
//! let registry = AccessRegistry::from_config(&config)?;
//!
//! let snapshot = registry.snapshot();
//! let allowed = snapshot.is_allowed(&ctx, "article", "view", "published", &facts);
//! ```

pub mod error;
pub mod registry;
pub mod snapshot;

pub use error::{RegistryError, Rejection, Result};
pub use registry::{AccessRegistry, ReloadReport};
pub use snapshot::{AccessSnapshot, CompiledContentType, CompiledOperation};
