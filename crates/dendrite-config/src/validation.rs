// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Checks simulation settings, logging settings and every channel and
//! receptor parameter set, and reports all problems at once.

use dendrite_neural::{ConfigurationError, SynapseKind};

use crate::{ConfigError, ConfigResult, DendriteConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["text", "json"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    InvalidValue { field: String, reason: String },
    InvalidModel { section: String, source: ConfigurationError },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
            Self::InvalidModel { section, source } => {
                write!(f, "[{}] {}", section, source)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every failed check
pub fn validate_config(config: &DendriteConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_simulation(config, &mut errors);
    validate_system(config, &mut errors);
    validate_model(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_simulation(config: &DendriteConfig, errors: &mut Vec<ConfigValidationError>) {
    let dt = config.simulation.dt_ms;
    if !(dt.is_finite() && dt > 0.0) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "simulation.dt_ms".to_string(),
            reason: format!("must be a positive number of milliseconds, got {}", dt),
        });
    }
    if config.simulation.buffer_slots == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "simulation.buffer_slots".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
}

fn validate_system(config: &DendriteConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.system.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "system.log_level".to_string(),
            reason: format!("must be one of {}", LOG_LEVELS.join(", ")),
        });
    }
    let format = config.system.log_format.to_lowercase();
    if !LOG_FORMATS.contains(&format.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "system.log_format".to_string(),
            reason: format!("must be one of {}", LOG_FORMATS.join(", ")),
        });
    }
}

fn validate_model(config: &DendriteConfig, errors: &mut Vec<ConfigValidationError>) {
    let mut check = |section: &str, result: Result<(), ConfigurationError>| {
        if let Err(source) = result {
            errors.push(ConfigValidationError::InvalidModel {
                section: section.to_string(),
                source,
            });
        }
    };

    check("channels.na", config.channels.na.validate());
    check("channels.k", config.channels.k.validate());
    for kind in SynapseKind::ALL {
        let section = format!("synapses.{}", kind.as_str().to_lowercase());
        check(&section, config.synapse_parameters(kind).validate());
    }
}
