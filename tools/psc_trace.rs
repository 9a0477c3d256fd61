// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Postsynaptic current trace.
//!
//! Builds one compartment with one synapse of the chosen kind, delivers a
//! single spike at t = 0 and prints the voltage-clamped response as CSV:
//! `t_ms,g,i` followed by every recordable state of the compartment.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use dendrite::config::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config,
    validate_config, ConfigError, DendriteConfig,
};
use dendrite::neural::{CompartmentIndex, SynapseIndex};
use dendrite::observability::debug_flags_help;

struct Args {
    config: Option<PathBuf>,
    kind: String,
    voltage: f64,
    duration_ms: f64,
    weight: f64,
    overrides: HashMap<String, String>,
}

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: psc_trace [--config <path>] [--kind <AMPA|GABA|NMDA|AMPA_NMDA>] [--voltage <mV>]\n\
         \x20                [--duration <ms>] [--weight <w>] [--dt <ms>] [--linearization <scheme>]\n\n\
         Defaults:\n\
         - config: dendrite_configuration.toml if found, built-in defaults otherwise\n\
         - kind: AMPA, voltage: -65, duration: 50, weight: 1\n\n{}",
        debug_flags_help()
    );
    process::exit(2);
}

fn parse_number(flag: &str, value: Option<String>) -> f64 {
    let value = value.unwrap_or_else(|| usage_and_exit());
    value.parse().unwrap_or_else(|_| {
        eprintln!("{flag} expects a number, got {value}");
        usage_and_exit()
    })
}

fn parse_args() -> Args {
    let mut parsed = Args {
        config: None,
        kind: "AMPA".to_string(),
        voltage: -65.0,
        duration_ms: 50.0,
        weight: 1.0,
        overrides: HashMap::new(),
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.config = Some(PathBuf::from(v));
            }
            "--kind" => parsed.kind = args.next().unwrap_or_else(|| usage_and_exit()),
            "--voltage" => parsed.voltage = parse_number("--voltage", args.next()),
            "--duration" => parsed.duration_ms = parse_number("--duration", args.next()),
            "--weight" => parsed.weight = parse_number("--weight", args.next()),
            "--dt" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.overrides.insert("dt_ms".to_string(), v);
            }
            "--linearization" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.overrides.insert("linearization".to_string(), v);
            }
            "-h" | "--help" => usage_and_exit(),
            // handled by the logging setup
            other if other.starts_with("--debug-") => {}
            other => {
                eprintln!("Unknown argument: {other}");
                usage_and_exit();
            }
        }
    }

    parsed
}

fn resolve_config(args: &Args) -> Result<DendriteConfig> {
    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => match find_config_file() {
            Ok(path) => Some(path),
            Err(ConfigError::FileNotFound(_)) => None,
            Err(err) => return Err(err.into()),
        },
    };

    let config = match path {
        Some(path) => load_config(Some(&path), Some(&args.overrides))
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => {
            let mut config = DendriteConfig::default();
            apply_environment_overrides(&mut config);
            apply_cli_overrides(&mut config, &args.overrides);
            config
        }
    };
    validate_config(&config)?;
    Ok(config)
}

fn run(args: Args) -> Result<()> {
    let config = resolve_config(&args)?;
    dendrite::init_logging(&config)?;

    if !(args.duration_ms.is_finite() && args.duration_ms >= 0.0) {
        bail!("--duration must be a non-negative number of milliseconds");
    }

    let mut compartment = config.build_compartment()?;
    config.add_synapse(&mut compartment, &args.kind, SynapseIndex(0))?;
    let mut buffers = config.spike_buffers(1);
    compartment.attach_buffers(&buffers);
    compartment.calibrate(&mut buffers);

    let recordables = compartment.collect_recordables(CompartmentIndex(0));
    let dt = config.simulation.dt_ms;
    let steps = (args.duration_ms / dt).round() as usize;
    tracing::info!(
        kind = %args.kind,
        v = args.voltage,
        dt,
        steps,
        scheme = %compartment.linearization(),
        "tracing postsynaptic current"
    );

    let header: Vec<&str> = ["t_ms", "g", "i"]
        .into_iter()
        .chain(recordables.keys().map(String::as_str))
        .collect();
    println!("{}", header.join(","));

    if let Some(ring) = buffers.get_mut(SynapseIndex(0)) {
        ring.add_value(0, args.weight);
    }
    for step in 0..=steps {
        let gi = compartment.step(args.voltage, dt, 0, &mut buffers);
        buffers.advance_all(1);

        let mut row = vec![format!("{:.4}", step as f64 * dt), gi.g.to_string(), gi.i.to_string()];
        row.extend(
            recordables
                .values()
                .map(|state| compartment.read(*state).unwrap_or(f64::NAN).to_string()),
        );
        println!("{}", row.join(","));
    }

    Ok(())
}

fn main() {
    if let Err(err) = run(parse_args()) {
        eprintln!("psc_trace: {err:#}");
        process::exit(1);
    }
}
