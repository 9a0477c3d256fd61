// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Dendrite Configuration System
//!
//! Type-safe configuration loader for compartment simulations with support for:
//! - TOML file parsing
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dendrite_config::{load_config, validate_config};
//!
//! let config = load_config(None, None).expect("Failed to load config");
//! validate_config(&config).expect("Invalid config");
//!
//! let compartment = config.build_compartment().expect("Invalid channel parameters");
//! println!("dt = {} ms, scheme = {}", config.simulation.dt_ms, compartment.linearization());
//! ```
//!
//! Every section and field is optional; omitted values fall back to the
//! documented channel and receptor defaults.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{apply_cli_overrides, apply_environment_overrides, find_config_file, load_config};
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

use dendrite_neural::ConfigurationError;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid model configuration: {0}")]
    Model(#[from] ConfigurationError),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_errors_convert() {
        let err: ConfigError = ConfigurationError::UnknownSynapseKind("AMPAR".to_string()).into();
        assert!(matches!(err, ConfigError::Model(_)));
        assert!(err.to_string().contains("AMPAR"));
    }

    #[test]
    fn test_toml_errors_convert() {
        let err: ConfigError = toml::from_str::<DendriteConfig>("[simulation\n")
            .unwrap_err()
            .into();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
