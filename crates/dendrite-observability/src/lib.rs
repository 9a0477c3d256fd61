// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # dendrite-observability
//!
//! Logging setup shared by the dendrite binaries and tests.
//!
//! Library crates only emit `tracing` events; this crate installs the
//! subscriber, honouring the configured level and format plus per-crate
//! debug flags (`--debug-<crate>`, `--debug-all`, `DENDRITE_DEBUG`).

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

// Re-export commonly used items
pub use cli::*;
pub use config::*;
pub use init::*;

/// Known dendrite crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "dendrite",
    "dendrite-neural",
    "dendrite-config",
    "dendrite-observability",
    "psc_trace",
];
