// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Voltage-gated NMDA-like receptor
//!
//! ```text
//! I(v)    = g(t)·σ(v)·(e_rev − v)
//! dI/dv   = g(t)·(σ'(v)·(e_rev − v) − σ(v))
//! σ(v)    = 1 / (1 + 0.3·exp(−0.1·v))
//! ```
//!
//! Both terms are handed to [`Linearization::linearize`], so the solver sees
//! the tangent of the current at the present voltage.

use super::kinetics::{nmda_sigmoid, nmda_sigmoid_dv, BiexpKinetics};
use super::params::NmdaParameters;
use crate::buffer::{InputLine, SpikeBuffers};
use crate::types::{CurrentContribution, Linearization, Result, SynapseIndex};

/// `(I, dI/dv)` of a voltage-gated conductance `g` at `v`
#[inline(always)]
pub(crate) fn gated_current(g: f64, e_rev: f64, v: f64) -> (f64, f64) {
    let sigma = nmda_sigmoid(v);
    let current = g * sigma * (e_rev - v);
    let d_current_dv = g * (nmda_sigmoid_dv(v) * (e_rev - v) - sigma);
    (current, d_current_dv)
}

#[derive(Debug, Clone, PartialEq)]
pub struct NmdaSynapse {
    input: InputLine,
    e_rev: f64,
    kinetics: BiexpKinetics,
}

impl NmdaSynapse {
    pub fn new(index: SynapseIndex, params: &NmdaParameters) -> Result<Self> {
        Ok(Self {
            input: InputLine::new(index),
            e_rev: params.e_rev,
            kinetics: params.kinetics()?,
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

    pub fn kinetics(&self) -> &BiexpKinetics {
        &self.kinetics
    }

    pub fn attach_buffer(&mut self, buffers: &SpikeBuffers) {
        self.input.attach(buffers);
    }

    pub fn calibrate(&mut self, buffers: &mut SpikeBuffers) {
        self.kinetics.reset();
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
        let g = self.kinetics.advance(dt, weight);
        let (current, d_current_dv) = gated_current(g, self.e_rev, v);
        scheme.linearize(current, d_current_dv, v)
    }

    pub fn state(&self) -> [f64; 2] {
        [self.kinetics.rise(), self.kinetics.decay()]
    }

    pub fn state_labels(&self) -> &'static [&'static str] {
        &["g_r_NMDA", "g_d_NMDA"]
    }
}
