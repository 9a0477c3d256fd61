// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `dendrite_configuration.toml`.

use serde::{Deserialize, Serialize};

use dendrite_neural::{
    AmpaNmdaParameters, AmpaParameters, CompartmentCurrents, GabaParameters, Linearization,
    NmdaParameters, PotassiumParameters, SodiumParameters, SpikeBuffers, SynapseIndex,
    SynapseKind, SynapseParameters,
};

use crate::ConfigResult;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DendriteConfig {
    pub simulation: SimulationConfig,
    pub channels: ChannelsConfig,
    pub synapses: SynapsesConfig,
    pub system: SystemConfig,
}

/// Solver pairing and input buffer sizing
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulation step (ms)
    pub dt_ms: f64,
    pub linearization: Linearization,
    /// Ring length of every spike input buffer (min_delay + max_delay steps)
    pub buffer_slots: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt_ms: 0.1,
            linearization: Linearization::BackwardEuler,
            buffer_slots: 16,
        }
    }
}

/// Voltage-gated channels present in every compartment
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChannelsConfig {
    pub na: SodiumParameters,
    pub k: PotassiumParameters,
}

/// Parameters used for every synapse of each receptor variant
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SynapsesConfig {
    pub ampa: AmpaParameters,
    pub gaba: GabaParameters,
    pub nmda: NmdaParameters,
    pub ampa_nmda: AmpaNmdaParameters,
}

impl SynapsesConfig {
    pub fn parameters(&self, kind: SynapseKind) -> SynapseParameters {
        match kind {
            SynapseKind::Ampa => SynapseParameters::Ampa(self.ampa),
            SynapseKind::Gaba => SynapseParameters::Gaba(self.gaba),
            SynapseKind::Nmda => SynapseParameters::Nmda(self.nmda),
            SynapseKind::AmpaNmda => SynapseParameters::AmpaNmda(self.ampa_nmda),
        }
    }
}

/// System-level configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    pub log_level: String,
    /// "text" or "json"
    pub log_format: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl DendriteConfig {
    /// Configured parameters for `kind`
    pub fn synapse_parameters(&self, kind: SynapseKind) -> SynapseParameters {
        self.synapses.parameters(kind)
    }

    /// Empty compartment with the configured channels and linearization
    pub fn build_compartment(&self) -> ConfigResult<CompartmentCurrents> {
        let compartment = CompartmentCurrents::with_channels(self.channels.na, self.channels.k)?
            .with_linearization(self.simulation.linearization);
        Ok(compartment)
    }

    /// Add a synapse of the variant named `kind` using the configured parameters
    pub fn add_synapse(
        &self,
        compartment: &mut CompartmentCurrents,
        kind: &str,
        index: SynapseIndex,
    ) -> ConfigResult<()> {
        let kind: SynapseKind = kind.parse()?;
        let params = self.synapse_parameters(kind);
        compartment.add_synapse_of_kind(kind, index, Some(&params))?;
        Ok(())
    }

    /// `count` input buffers sized by `simulation.buffer_slots`
    pub fn spike_buffers(&self, count: usize) -> SpikeBuffers {
        SpikeBuffers::new(count, self.simulation.buffer_slots.max(1))
    }
}
