// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Biexponential Synapses
//!
//! Receptors driven by the per-step spike weight of their input line. The set
//! of receptor variants is closed: [`SynapseKind`] is the tag and [`Synapse`]
//! the sum type the compartment stores.
//!
//! | kind | current | gated |
//! |------|---------|-------|
//! | AMPA | `g·(e − v)` | no |
//! | GABA | `g·(e − v)` | no |
//! | NMDA | `g·σ(v)·(e − v)` | yes |
//! | AMPA_NMDA | `g_A·(e − v) + r·g_N·σ(v)·(e − v)` | NMDA part |

pub mod ampa_nmda;
pub mod kinetics;
pub mod nmda;
pub mod ohmic;
pub mod params;

use core::fmt;
use core::str::FromStr;

pub use ampa_nmda::AmpaNmdaSynapse;
pub use kinetics::{nmda_sigmoid, nmda_sigmoid_dv, normalization, peak_time, BiexpKinetics};
pub use nmda::NmdaSynapse;
pub use ohmic::OhmicSynapse;
pub use params::{
    AmpaNmdaParameters, AmpaParameters, GabaParameters, NmdaParameters, SynapseParameters,
};

use crate::buffer::{InputLine, SpikeBuffers};
use crate::types::{ConfigurationError, CurrentContribution, Linearization, Result, SynapseIndex};

/// Receptor variant, in the order the compartment visits them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SynapseKind {
    #[cfg_attr(feature = "serde", serde(rename = "AMPA"))]
    Ampa = 0,
    #[cfg_attr(feature = "serde", serde(rename = "GABA"))]
    Gaba = 1,
    #[cfg_attr(feature = "serde", serde(rename = "NMDA"))]
    Nmda = 2,
    #[cfg_attr(feature = "serde", serde(rename = "AMPA_NMDA"))]
    AmpaNmda = 3,
}

impl SynapseKind {
    pub const ALL: [SynapseKind; 4] = [
        SynapseKind::Ampa,
        SynapseKind::Gaba,
        SynapseKind::Nmda,
        SynapseKind::AmpaNmda,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SynapseKind::Ampa => "AMPA",
            SynapseKind::Gaba => "GABA",
            SynapseKind::Nmda => "NMDA",
            SynapseKind::AmpaNmda => "AMPA_NMDA",
        }
    }

    /// Position of this kind's collection inside the compartment
    #[inline(always)]
    pub fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SynapseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SynapseKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s {
            "AMPA" => Ok(SynapseKind::Ampa),
            "GABA" => Ok(SynapseKind::Gaba),
            "NMDA" => Ok(SynapseKind::Nmda),
            "AMPA_NMDA" => Ok(SynapseKind::AmpaNmda),
            other => Err(ConfigurationError::UnknownSynapseKind(other.to_string())),
        }
    }
}

/// A receptor instance of any variant
///
/// The AMPA and GABA variants share [`OhmicSynapse`]; for them the kind is the
/// one the payload was built as, whichever variant wraps it.
#[derive(Debug, Clone, PartialEq)]
pub enum Synapse {
    Ampa(OhmicSynapse),
    Gaba(OhmicSynapse),
    Nmda(NmdaSynapse),
    AmpaNmda(AmpaNmdaSynapse),
}

impl Synapse {
    /// Build a receptor of `kind`, with its documented defaults when `params` is `None`
    ///
    /// # Errors
    /// `ParameterKindMismatch` if `params` belong to another variant, or the
    /// validation error of the parameters.
    pub fn new(
        kind: SynapseKind,
        index: SynapseIndex,
        params: Option<&SynapseParameters>,
    ) -> Result<Self> {
        let params = match params {
            Some(p) if p.kind() != kind => {
                return Err(ConfigurationError::ParameterKindMismatch {
                    requested: kind,
                    provided: p.kind(),
                })
            }
            Some(p) => *p,
            None => SynapseParameters::defaults(kind),
        };
        Self::from_parameters(index, &params)
    }

    pub fn from_parameters(index: SynapseIndex, params: &SynapseParameters) -> Result<Self> {
        Ok(match params {
            SynapseParameters::Ampa(p) => Synapse::Ampa(OhmicSynapse::ampa(index, p)?),
            SynapseParameters::Gaba(p) => Synapse::Gaba(OhmicSynapse::gaba(index, p)?),
            SynapseParameters::Nmda(p) => Synapse::Nmda(NmdaSynapse::new(index, p)?),
            SynapseParameters::AmpaNmda(p) => Synapse::AmpaNmda(AmpaNmdaSynapse::new(index, p)?),
        })
    }

    pub fn kind(&self) -> SynapseKind {
        match self {
            Synapse::Ampa(s) | Synapse::Gaba(s) => s.kind(),
            Synapse::Nmda(_) => SynapseKind::Nmda,
            Synapse::AmpaNmda(_) => SynapseKind::AmpaNmda,
        }
    }

    fn input(&self) -> &InputLine {
        match self {
            Synapse::Ampa(s) | Synapse::Gaba(s) => s.input(),
            Synapse::Nmda(s) => s.input(),
            Synapse::AmpaNmda(s) => s.input(),
        }
    }

    pub fn index(&self) -> SynapseIndex {
        self.input().index()
    }

    pub fn is_attached(&self) -> bool {
        self.input().is_attached()
    }

    pub fn attach_buffer(&mut self, buffers: &SpikeBuffers) {
        match self {
            Synapse::Ampa(s) | Synapse::Gaba(s) => s.attach_buffer(buffers),
            Synapse::Nmda(s) => s.attach_buffer(buffers),
            Synapse::AmpaNmda(s) => s.attach_buffer(buffers),
        }
    }

    pub fn calibrate(&mut self, buffers: &mut SpikeBuffers) {
        match self {
            Synapse::Ampa(s) | Synapse::Gaba(s) => s.calibrate(buffers),
            Synapse::Nmda(s) => s.calibrate(buffers),
            Synapse::AmpaNmda(s) => s.calibrate(buffers),
        }
    }

    #[inline]
    pub fn step(
        &mut self,
        v: f64,
        dt: f64,
        lag: usize,
        buffers: &mut SpikeBuffers,
        scheme: Linearization,
    ) -> CurrentContribution {
        match self {
            Synapse::Ampa(s) | Synapse::Gaba(s) => s.step(v, dt, lag, buffers, scheme),
            Synapse::Nmda(s) => s.step(v, dt, lag, buffers, scheme),
            Synapse::AmpaNmda(s) => s.step(v, dt, lag, buffers, scheme),
        }
    }

    /// Labels of the kinetic state components, aligned with [`Synapse::state`]
    pub fn state_labels(&self) -> &'static [&'static str] {
        match self {
            Synapse::Ampa(s) | Synapse::Gaba(s) => s.state_labels(),
            Synapse::Nmda(s) => s.state_labels(),
            Synapse::AmpaNmda(s) => s.state_labels(),
        }
    }

    /// One kinetic state component, `None` past the last one
    pub fn state(&self, component: usize) -> Option<f64> {
        match self {
            Synapse::Ampa(s) | Synapse::Gaba(s) => s.state().get(component).copied(),
            Synapse::Nmda(s) => s.state().get(component).copied(),
            Synapse::AmpaNmda(s) => s.state().get(component).copied(),
        }
    }
}
