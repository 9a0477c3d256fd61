// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Console output only, on stderr so tools can keep stdout for data.

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingConfig};

/// Filter combining the configured level with per-crate debug flags
///
/// `RUST_LOG`, when set, replaces both.
pub fn build_filter(config: &LoggingConfig, debug_flags: &CrateDebugFlags) -> Result<EnvFilter> {
    if let Ok(directives) = std::env::var("RUST_LOG") {
        return EnvFilter::try_new(&directives)
            .with_context(|| format!("Invalid RUST_LOG directives: {}", directives));
    }
    let directives = debug_flags.to_filter_string(&config.level);
    EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter: {}", directives))
}

/// Install the global subscriber
///
/// # Errors
/// Fails on an invalid filter, or when a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig, debug_flags: &CrateDebugFlags) -> Result<()> {
    let filter = build_filter(config, debug_flags)?;

    let console_layer = match config.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .with_filter(filter)
            .boxed(),
    };

    Registry::default()
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_with_flags() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = LoggingConfig::default();
        let flags = CrateDebugFlags::from_args(vec!["--debug-dendrite-neural".to_string()]);
        let filter = build_filter(&config, &flags).unwrap();
        assert!(filter.to_string().contains("dendrite-neural=debug"));
    }

    #[test]
    fn test_build_filter_rejects_bad_directive() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = LoggingConfig {
            level: "dendrite=loud".to_string(),
            format: LogFormat::Text,
        };
        assert!(build_filter(&config, &CrateDebugFlags::default()).is_err());
    }
}
