// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Compartment Current Aggregator
//!
//! Owns one Na-like and one K-like channel plus an append-only collection per
//! receptor variant, and reduces all of them to a single (g, i) pair per step.
//!
//! ## Visiting order
//!
//! ```text
//! Na → K → AMPA[..] → GABA[..] → NMDA[..] → AMPA_NMDA[..]
//! ```
//!
//! Members are independent, so the order only fixes floating-point summation
//! for reproducibility.
//!
//! ## Per-step contract
//! - `attach_buffers` must run after the last `add_synapse` and before
//!   `calibrate`/`step` (unattached synapses panic)
//! - one `step` per compartment per simulation step, from a single worker

use std::collections::BTreeMap;

use tracing::{debug, trace, warn};

use crate::buffer::SpikeBuffers;
use crate::channels::{PotassiumChannel, PotassiumParameters, SodiumChannel, SodiumParameters};
use crate::recordables::{recordable_name, Recordables, StateRef};
use crate::synapses::{Synapse, SynapseKind, SynapseParameters};
use crate::types::{CompartmentIndex, CurrentContribution, Linearization, Result, SynapseIndex};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompartmentCurrents {
    na: SodiumChannel,
    k: PotassiumChannel,
    /// One collection per [`SynapseKind`], indexed by [`SynapseKind::slot`]
    synapses: [Vec<Synapse>; 4],
    linearization: Linearization,
}

impl CompartmentCurrents {
    /// Compartment with default (absent) channels and no synapses
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channels(na: SodiumParameters, k: PotassiumParameters) -> Result<Self> {
        Ok(Self {
            na: SodiumChannel::new(na)?,
            k: PotassiumChannel::new(k)?,
            ..Self::default()
        })
    }

    pub fn with_linearization(mut self, scheme: Linearization) -> Self {
        self.linearization = scheme;
        self
    }

    pub fn linearization(&self) -> Linearization {
        self.linearization
    }

    pub fn sodium(&self) -> &SodiumChannel {
        &self.na
    }

    pub fn potassium(&self) -> &PotassiumChannel {
        &self.k
    }

    pub fn synapses(&self, kind: SynapseKind) -> &[Synapse] {
        &self.synapses[kind.slot()]
    }

    /// Every synapse in visiting order
    pub fn iter_synapses(&self) -> impl Iterator<Item = &Synapse> {
        self.synapses.iter().flatten()
    }

    pub fn synapse_count(&self) -> usize {
        self.synapses.iter().map(Vec::len).sum()
    }

    /// Append a synapse of the variant named `kind` ("AMPA", "GABA", "NMDA", "AMPA_NMDA")
    ///
    /// # Errors
    /// Unknown variant names, parameters of a different variant and invalid
    /// parameters are rejected; the compartment is left untouched.
    pub fn add_synapse(
        &mut self,
        kind: &str,
        index: SynapseIndex,
        params: Option<&SynapseParameters>,
    ) -> Result<()> {
        let kind: SynapseKind = kind.parse()?;
        self.add_synapse_of_kind(kind, index, params)
    }

    pub fn add_synapse_of_kind(
        &mut self,
        kind: SynapseKind,
        index: SynapseIndex,
        params: Option<&SynapseParameters>,
    ) -> Result<()> {
        let synapse = Synapse::new(kind, index, params)?;
        self.push_synapse(synapse);
        Ok(())
    }

    /// Append an already-built synapse to its variant's collection
    pub fn push_synapse(&mut self, synapse: Synapse) {
        let index = synapse.index();
        if self.iter_synapses().any(|s| s.index() == index) {
            warn!(
                target: "dendrite-neural",
                "{} is already wired to this compartment; both receptors will read the same input line",
                index
            );
        }
        debug!(target: "dendrite-neural", "Adding {} synapse on {}", synapse.kind(), index);
        self.synapses[synapse.kind().slot()].push(synapse);
    }

    /// Bind every synapse to the buffer at its own index
    ///
    /// # Panics
    /// If some synapse index has no entry in `buffers`.
    pub fn attach_buffers(&mut self, buffers: &SpikeBuffers) {
        for synapse in self.synapses.iter_mut().flatten() {
            synapse.attach_buffer(buffers);
        }
        debug!(
            target: "dendrite-neural",
            "Attached {} synapses to {} input buffers",
            self.synapse_count(),
            buffers.len()
        );
    }

    /// Reset every gate and kinetic state and clear every pending input
    pub fn calibrate(&mut self, buffers: &mut SpikeBuffers) {
        self.na.calibrate();
        self.k.calibrate();
        for synapse in self.synapses.iter_mut().flatten() {
            synapse.calibrate(buffers);
        }
        debug!(target: "dendrite-neural", "Calibrated compartment with {} synapses", self.synapse_count());
    }

    /// Advance every member by `dt` at voltage `v` and return the summed (g, i)
    pub fn step(
        &mut self,
        v: f64,
        dt: f64,
        lag: usize,
        buffers: &mut SpikeBuffers,
    ) -> CurrentContribution {
        let scheme = self.linearization;
        let mut total = self.na.step(v, dt, scheme);
        total += self.k.step(v, dt, scheme);
        for synapse in self.synapses.iter_mut().flatten() {
            total += synapse.step(v, dt, lag, buffers, scheme);
        }
        trace!(target: "dendrite-neural", v, lag, g = total.g, i = total.i, "compartment step");
        total
    }

    /// Name → handle map of every owned state variable
    ///
    /// A second synapse of the same variant on an already used index is
    /// registered as `{name}#{position}` so no handle is dropped.
    pub fn collect_recordables(&self, compartment: CompartmentIndex) -> Recordables {
        let mut recordables = Recordables::new();

        let [m, h] = self.na.recordable_names(compartment);
        recordables.insert(m, StateRef::SodiumActivation);
        recordables.insert(h, StateRef::SodiumInactivation);
        let [n] = self.k.recordable_names(compartment);
        recordables.insert(n, StateRef::PotassiumActivation);

        for kind in SynapseKind::ALL {
            for (position, synapse) in self.synapses(kind).iter().enumerate() {
                for (component, label) in synapse.state_labels().iter().enumerate() {
                    let mut name = recordable_name(label, synapse.index().0);
                    if recordables.contains_key(&name) {
                        warn!(
                            target: "dendrite-neural",
                            "Recordable {} is already registered; using {}#{}",
                            name,
                            name,
                            position
                        );
                        name = format!("{}#{}", name, position);
                    }
                    let state = StateRef::Synapse {
                        kind,
                        position,
                        component,
                    };
                    recordables.insert(name, state);
                }
            }
        }
        recordables
    }

    /// Current value behind a handle
    pub fn read(&self, state: StateRef) -> Option<f64> {
        match state {
            StateRef::SodiumActivation => Some(self.na.m()),
            StateRef::SodiumInactivation => Some(self.na.h()),
            StateRef::PotassiumActivation => Some(self.k.n()),
            StateRef::Synapse {
                kind,
                position,
                component,
            } => self.synapses(kind).get(position)?.state(component),
        }
    }

    /// Read every handle of `recordables`
    pub fn sample(&self, recordables: &Recordables) -> BTreeMap<String, f64> {
        recordables
            .iter()
            .filter_map(|(name, state)| self.read(*state).map(|value| (name.clone(), value)))
            .collect()
    }
}
