// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Biexponential conductance kinetics
//!
//! ## Model
//!
//! ```text
//! rise(t + dt)  = rise(t)  · exp(−dt/τ_r) + w(t)
//! decay(t + dt) = decay(t) · exp(−dt/τ_d) + w(t)
//! g(t)          = g_norm · (decay − rise)
//! ```
//!
//! A unit weight at t = 0 produces `g_norm·(exp(−t/τ_d) − exp(−t/τ_r))`, which
//! peaks at
//!
//! ```text
//! t* = τ_r·τ_d / (τ_d − τ_r) · ln(τ_d/τ_r)
//! ```
//!
//! and `g_norm` is chosen so that this peak is exactly 1.

use crate::types::error::{require_positive, ConfigurationError, Result};

/// Time of the waveform peak for a unit input at t = 0
pub fn peak_time(tau_r: f64, tau_d: f64) -> f64 {
    tau_r * tau_d / (tau_d - tau_r) * (tau_d / tau_r).ln()
}

/// Factor that scales the unit-input waveform to a peak of 1
pub fn normalization(tau_r: f64, tau_d: f64) -> f64 {
    let tp = peak_time(tau_r, tau_d);
    1.0 / ((-tp / tau_d).exp() - (-tp / tau_r).exp())
}

/// Voltage dependence of NMDA receptors (Mg²⁺ unblock)
#[inline(always)]
pub fn nmda_sigmoid(v: f64) -> f64 {
    1.0 / (1.0 + 0.3 * (-0.1 * v).exp())
}

/// `d nmda_sigmoid / dv`
#[inline(always)]
pub fn nmda_sigmoid_dv(v: f64) -> f64 {
    let e = (-0.1 * v).exp();
    let denom = 1.0 + 0.3 * e;
    0.03 * e / (denom * denom)
}

/// One rise/decay state pair with its propagators' time constants
#[derive(Debug, Clone, PartialEq)]
pub struct BiexpKinetics {
    tau_r: f64,
    tau_d: f64,
    g_norm: f64,
    rise: f64,
    decay: f64,
}

impl BiexpKinetics {
    /// `tau_r` and `tau_d` are named in errors by the caller-supplied labels
    pub fn new(
        tau_r: f64,
        tau_d: f64,
        tau_r_name: &'static str,
        tau_d_name: &'static str,
    ) -> Result<Self> {
        require_positive(tau_r_name, tau_r)?;
        require_positive(tau_d_name, tau_d)?;
        if tau_r >= tau_d {
            return Err(ConfigurationError::invalid(
                tau_r_name,
                tau_r,
                "rise time constant must be smaller than the decay time constant",
            ));
        }

        Ok(Self {
            tau_r,
            tau_d,
            g_norm: normalization(tau_r, tau_d),
            rise: 0.0,
            decay: 0.0,
        })
    }

    pub fn tau_r(&self) -> f64 {
        self.tau_r
    }

    pub fn tau_d(&self) -> f64 {
        self.tau_d
    }

    pub fn g_norm(&self) -> f64 {
        self.g_norm
    }

    pub fn rise(&self) -> f64 {
        self.rise
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    pub fn peak_time(&self) -> f64 {
        peak_time(self.tau_r, self.tau_d)
    }

    pub fn reset(&mut self) {
        self.rise = 0.0;
        self.decay = 0.0;
    }

    /// Decay both components over `dt`, add `weight` to each, return the conductance
    #[inline(always)]
    pub fn advance(&mut self, dt: f64, weight: f64) -> f64 {
        self.rise = self.rise * (-dt / self.tau_r).exp() + weight;
        self.decay = self.decay * (-dt / self.tau_d).exp() + weight;
        self.conductance()
    }

    #[inline(always)]
    pub fn conductance(&self) -> f64 {
        self.g_norm * (self.decay - self.rise)
    }
}
