// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, DendriteConfig};
use dendrite_neural::Linearization;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "dendrite_configuration.toml";

/// Find the dendrite configuration file
///
/// Search order:
/// 1. `DENDRITE_CONFIG_PATH` environment variable
/// 2. Current working directory: `./dendrite_configuration.toml`
/// 3. Parent directories (up to 5 levels)
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("DENDRITE_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by DENDRITE_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        search_paths.extend(cwd.ancestors().skip(1).take(5).map(|dir| dir.join(CONFIG_FILE_NAME)));
    }

    if let Some(path) = search_paths.iter().find(|path| path.exists()) {
        return Ok(path.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "Configuration file '{}' not found in any of these locations:\n{}\n\nSet DENDRITE_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML.
/// Values are not validated here; call [`validate_config`](crate::validate_config).
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<DendriteConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: DendriteConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `DENDRITE_DT_MS` -> `simulation.dt_ms`
/// - `DENDRITE_LINEARIZATION` -> `simulation.linearization`
/// - `DENDRITE_BUFFER_SLOTS` -> `simulation.buffer_slots`
/// - `DENDRITE_LOG_LEVEL` -> `system.log_level`
///
/// Values that fail to parse are ignored.
pub fn apply_environment_overrides(config: &mut DendriteConfig) {
    let overrides: HashMap<String, String> = [
        ("DENDRITE_DT_MS", "dt_ms"),
        ("DENDRITE_LINEARIZATION", "linearization"),
        ("DENDRITE_BUFFER_SLOTS", "buffer_slots"),
        ("DENDRITE_LOG_LEVEL", "log_level"),
    ]
    .into_iter()
    .filter_map(|(var, key)| env::var(var).ok().map(|value| (key.to_string(), value)))
    .collect();

    apply_cli_overrides(config, &overrides);
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"dt_ms": "0.025", "linearization": "crank-nicolson"}`)
pub fn apply_cli_overrides(config: &mut DendriteConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("dt_ms") {
        if let Ok(dt) = value.parse::<f64>() {
            config.simulation.dt_ms = dt;
        }
    }
    if let Some(value) = cli_args.get("linearization") {
        if let Ok(scheme) = value.parse::<Linearization>() {
            config.simulation.linearization = scheme;
        }
    }
    if let Some(value) = cli_args.get("buffer_slots") {
        if let Ok(slots) = value.parse::<usize>() {
            config.simulation.buffer_slots = slots;
        }
    }
    if let Some(value) = cli_args.get("log_level") {
        config.system.log_level = value.clone();
    }
    if let Some(value) = cli_args.get("log_format") {
        config.system.log_format = value.clone();
    }
}
