// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Dual-kinetics AMPA+NMDA receptor
//!
//! Two independent biexponentials share one input line:
//!
//! ```text
//! I(v) = g_A·(e_rev − v) + ratio·g_N·σ(v)·(e_rev − v)
//! ```
//!
//! Only the NMDA component is voltage gated.

use super::kinetics::BiexpKinetics;
use super::nmda::gated_current;
use super::params::AmpaNmdaParameters;
use crate::buffer::{InputLine, SpikeBuffers};
use crate::types::{CurrentContribution, Linearization, Result, SynapseIndex};

#[derive(Debug, Clone, PartialEq)]
pub struct AmpaNmdaSynapse {
    input: InputLine,
    e_rev: f64,
    nmda_ratio: f64,
    ampa: BiexpKinetics,
    nmda: BiexpKinetics,
}

impl AmpaNmdaSynapse {
    pub fn new(index: SynapseIndex, params: &AmpaNmdaParameters) -> Result<Self> {
        let (ampa, nmda) = params.kinetics()?;
        Ok(Self {
            input: InputLine::new(index),
            e_rev: params.e_rev,
            nmda_ratio: params.nmda_ratio,
            ampa,
            nmda,
        })
    }

    pub fn index(&self) -> SynapseIndex {
        self.input.index()
    }

    pub fn input(&self) -> &InputLine {
        &self.input
    }

    pub fn e_rev(&self) -> f64 {
        self.e_rev
    }

    pub fn nmda_ratio(&self) -> f64 {
        self.nmda_ratio
    }

    pub fn ampa_kinetics(&self) -> &BiexpKinetics {
        &self.ampa
    }

    pub fn nmda_kinetics(&self) -> &BiexpKinetics {
        &self.nmda
    }

    pub fn attach_buffer(&mut self, buffers: &SpikeBuffers) {
        self.input.attach(buffers);
    }

    pub fn calibrate(&mut self, buffers: &mut SpikeBuffers) {
        self.ampa.reset();
        self.nmda.reset();
        self.input.clear(buffers);
    }

    pub fn step(
        &mut self,
        v: f64,
        dt: f64,
        lag: usize,
        buffers: &mut SpikeBuffers,
        scheme: Linearization,
    ) -> CurrentContribution {
        let weight = self.input.read(buffers, lag);
        let g_ampa = self.ampa.advance(dt, weight);
        let g_nmda = self.nmda.advance(dt, weight);

        let (gated, d_gated_dv) = gated_current(self.nmda_ratio * g_nmda, self.e_rev, v);
        let current = g_ampa * (self.e_rev - v) + gated;
        let d_current_dv = -g_ampa + d_gated_dv;
        scheme.linearize(current, d_current_dv, v)
    }

    /// AMPA rise, AMPA decay, NMDA rise, NMDA decay
    pub fn state(&self) -> [f64; 4] {
        [
            self.ampa.rise(),
            self.ampa.decay(),
            self.nmda.rise(),
            self.nmda.decay(),
        ]
    }

    pub fn state_labels(&self) -> &'static [&'static str] {
        &["g_r_AN_AMPA", "g_d_AN_AMPA", "g_r_AN_NMDA", "g_d_AN_NMDA"]
    }
}
