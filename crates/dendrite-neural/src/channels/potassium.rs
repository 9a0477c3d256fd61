// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! K-like channel: single delayed-rectifier gate `n`, `g = gbar·n⁴`

use super::gating::{linoid, relax, GateRates};
use super::params::PotassiumParameters;
use super::ABSENT_CONDUCTANCE;
use crate::types::{CompartmentIndex, CurrentContribution, Linearization, Result};

#[inline]
pub fn n_rates(v: f64) -> GateRates {
    let x = v - 25.0;
    GateRates::new(linoid(0.02, x, 9.0), linoid(0.002, -x, 9.0))
}

#[derive(Debug, Clone, PartialEq)]
pub struct PotassiumChannel {
    params: PotassiumParameters,
    n: f64,
}

impl Default for PotassiumChannel {
    fn default() -> Self {
        Self {
            params: PotassiumParameters::default(),
            n: 0.0,
        }
    }
}

impl PotassiumChannel {
    pub fn new(params: PotassiumParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params, n: 0.0 })
    }

    pub fn params(&self) -> &PotassiumParameters {
        &self.params
    }

    pub fn n(&self) -> f64 {
        self.n
    }

    pub fn calibrate(&mut self) {
        self.n = 0.0;
    }

    pub fn recordable_names(&self, compartment: CompartmentIndex) -> [String; 1] {
        [format!("n_K_{}", compartment.0)]
    }

    pub fn step(&mut self, v: f64, dt: f64, scheme: Linearization) -> CurrentContribution {
        if self.params.gbar <= ABSENT_CONDUCTANCE {
            return CurrentContribution::ZERO;
        }

        let n = n_rates(v);
        self.n = relax(self.n, n.steady_state(), n.time_constant(), dt);

        let g = self.params.gbar * self.n.powi(4);
        scheme.ohmic(g, self.params.e_rev, v)
    }
}
