// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # dendrite - Compartment Current Core
//!
//! Ion-channel and synaptic currents for the compartments of a
//! multi-compartment neuron. Each simulation step a compartment reports one
//! linearized (g, i) pair that the membrane solver folds into its system.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! dendrite = "0.1"
//! ```
//!
//! ```rust
//! use dendrite::prelude::*;
//!
//! let config = DendriteConfig::default();
//! let mut compartment = config.build_compartment()?;
//! config.add_synapse(&mut compartment, "AMPA_NMDA", SynapseIndex(0))?;
//!
//! let mut buffers = config.spike_buffers(1);
//! compartment.attach_buffers(&buffers);
//! compartment.calibrate(&mut buffers);
//!
//! buffers.get_mut(SynapseIndex(0)).unwrap().add_value(0, 1.0);
//! for _ in 0..10 {
//!     let gi = compartment.step(-65.0, config.simulation.dt_ms, 0, &mut buffers);
//!     buffers.advance_all(1);
//!     assert!(gi.g >= 0.0);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  dendrite-config                                        │
//! │  (TOML + env + CLI → channel/receptor parameters)       │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  dendrite-neural                                        │
//! │  (channels, synapses, spike buffers, aggregation)       │
//! └─────────────────────────────────────────────────────────┘
//!
//!   dendrite-observability: tracing subscriber for binaries
//! ```

pub use dendrite_config as config;
pub use dendrite_neural as neural;
pub use dendrite_observability as observability;

/// Prelude - commonly used types
pub mod prelude {
    pub use crate::config::{load_config, validate_config, DendriteConfig};
    pub use crate::neural::{
        CompartmentCurrents, CompartmentIndex, CurrentContribution, Linearization, Recordables,
        SpikeBuffers, StateRef, SynapseIndex, SynapseKind, SynapseParameters,
    };
}

/// Install logging from the `[system]` section plus `--debug-*` / `DENDRITE_DEBUG` flags
pub fn init_logging(config: &dendrite_config::DendriteConfig) -> anyhow::Result<()> {
    let logging = observability::LoggingConfig::from_settings(
        &config.system.log_level,
        &config.system.log_format,
    )?;
    let flags = observability::parse_debug_flags();
    observability::init_logging(&logging, &flags)?;
    tracing::debug!(
        level = %logging.level,
        format = %logging.format,
        "logging initialised"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        use crate::prelude::*;
        let compartment = CompartmentCurrents::new();
        assert_eq!(compartment.synapse_count(), 0);
        assert_eq!(DendriteConfig::default().simulation.buffer_slots, 16);
    }
}
