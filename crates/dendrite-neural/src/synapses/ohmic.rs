// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fast ohmic receptors (AMPA-like, GABA-like)
//!
//! `I(v) = g(t)·(e_rev − v)`, with `g` from a single biexponential.

use super::kinetics::BiexpKinetics;
use super::params::{AmpaParameters, GabaParameters};
use super::SynapseKind;
use crate::buffer::{InputLine, SpikeBuffers};
use crate::types::{CurrentContribution, Linearization, Result, SynapseIndex};

#[derive(Debug, Clone, PartialEq)]
pub struct OhmicSynapse {
    kind: SynapseKind,
    input: InputLine,
    e_rev: f64,
    kinetics: BiexpKinetics,
}

impl OhmicSynapse {
    pub fn ampa(index: SynapseIndex, params: &AmpaParameters) -> Result<Self> {
        Ok(Self {
            kind: SynapseKind::Ampa,
            input: InputLine::new(index),
            e_rev: params.e_rev,
            kinetics: params.kinetics()?,
        })
    }

    pub fn gaba(index: SynapseIndex, params: &GabaParameters) -> Result<Self> {
        Ok(Self {
            kind: SynapseKind::Gaba,
            input: InputLine::new(index),
            e_rev: params.e_rev,
            kinetics: params.kinetics()?,
        })
    }

    pub fn kind(&self) -> SynapseKind {
        self.kind
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
        scheme.ohmic(g, self.e_rev, v)
    }

    /// Rise and decay states, in that order
    pub fn state(&self) -> [f64; 2] {
        [self.kinetics.rise(), self.kinetics.decay()]
    }

    pub fn state_labels(&self) -> &'static [&'static str] {
        match self.kind {
            SynapseKind::Gaba => &["g_r_GABA", "g_d_GABA"],
            _ => &["g_r_AMPA", "g_d_AMPA"],
        }
    }
}
