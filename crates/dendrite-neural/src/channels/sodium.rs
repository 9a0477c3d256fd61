// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Na-like channel: fast activation `m`, slow inactivation `h`, `g = gbar·m³·h`

use super::gating::{linoid, relax, GateRates};
use super::params::SodiumParameters;
use super::ABSENT_CONDUCTANCE;
use crate::types::{CompartmentIndex, CurrentContribution, Linearization, Result};

/// Activation gate rates
#[inline]
pub fn m_rates(v: f64) -> GateRates {
    let x = v + 35.013;
    GateRates::new(linoid(0.182, x, 9.0), linoid(0.124, -x, 9.0))
}

/// Inactivation gate rates (only the time constant is taken from them)
#[inline]
pub fn h_rates(v: f64) -> GateRates {
    GateRates::new(
        linoid(0.024, v + 50.013, 5.0),
        linoid(0.0091, -(v + 75.013), 5.0),
    )
}

/// Boltzmann fit of the inactivation steady state
#[inline]
pub fn h_steady_state(v: f64) -> f64 {
    1.0 / (((v + 65.0) / 6.2).exp() + 1.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SodiumChannel {
    params: SodiumParameters,
    m: f64,
    h: f64,
}

impl Default for SodiumChannel {
    fn default() -> Self {
        Self {
            params: SodiumParameters::default(),
            m: 0.0,
            h: 0.0,
        }
    }
}

impl SodiumChannel {
    pub fn new(params: SodiumParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            m: 0.0,
            h: 0.0,
        })
    }

    pub fn params(&self) -> &SodiumParameters {
        &self.params
    }

    pub fn m(&self) -> f64 {
        self.m
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn calibrate(&mut self) {
        self.m = 0.0;
        self.h = 0.0;
    }

    pub fn recordable_names(&self, compartment: CompartmentIndex) -> [String; 2] {
        [
            format!("m_Na_{}", compartment.0),
            format!("h_Na_{}", compartment.0),
        ]
    }

    pub fn step(&mut self, v: f64, dt: f64, scheme: Linearization) -> CurrentContribution {
        if self.params.gbar <= ABSENT_CONDUCTANCE {
            return CurrentContribution::ZERO;
        }

        let m = m_rates(v);
        self.m = relax(self.m, m.steady_state(), m.time_constant(), dt);

        let h_tau = h_rates(v).time_constant();
        self.h = relax(self.h, h_steady_state(v), h_tau, dt);

        let g = self.params.gbar * self.m.powi(3) * self.h;
        scheme.ohmic(g, self.params.e_rev, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(gbar: f64) -> SodiumChannel {
        SodiumChannel::new(SodiumParameters::with_values(gbar, 50.0)).unwrap()
    }

    #[test]
    fn test_absent_channel_contributes_nothing() {
        let mut na = SodiumChannel::default();
        let gi = na.step(-20.0, 0.1, Linearization::CrankNicolson);
        assert_eq!(gi, CurrentContribution::ZERO);
        assert_eq!(na.m(), 0.0);
        assert_eq!(na.h(), 0.0);
    }

    #[test]
    fn test_long_step_reaches_steady_state() {
        let mut na = channel(1.0);
        let v = -40.0;
        na.step(v, 1e5, Linearization::BackwardEuler);
        assert!((na.m() - m_rates(v).steady_state()).abs() < 1e-12);
        assert!((na.h() - h_steady_state(v)).abs() < 1e-12);
    }

    #[test]
    fn test_conductance_is_m_cubed_h() {
        let mut na = channel(2.0);
        let v = -30.0;
        for _ in 0..50 {
            na.step(v, 0.1, Linearization::BackwardEuler);
        }
        let gi = na.step(v, 0.1, Linearization::BackwardEuler);
        let g = 2.0 * na.m().powi(3) * na.h();
        assert!((gi.g - g).abs() < 1e-12);
        assert!((gi.i - g * 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_calibrate_resets_gates() {
        let mut na = channel(1.0);
        na.step(-20.0, 1.0, Linearization::CrankNicolson);
        assert!(na.m() > 0.0);
        na.calibrate();
        assert_eq!((na.m(), na.h()), (0.0, 0.0));
    }

    #[test]
    fn test_activation_increases_with_depolarization() {
        assert!(m_rates(-20.0).steady_state() > m_rates(-60.0).steady_state());
        assert!(h_steady_state(-20.0) < h_steady_state(-80.0));
    }

    #[test]
    fn test_rates_are_finite_at_singular_points() {
        for v in [-35.013, -50.013, -75.013] {
            let m = m_rates(v);
            let h = h_rates(v);
            assert!(m.alpha.is_finite() && m.beta.is_finite());
            assert!(h.alpha.is_finite() && h.beta.is_finite());
        }
    }
}
