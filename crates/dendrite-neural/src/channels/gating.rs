// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Gating-variable kinetics
//!
//! A gate obeys the first-order ODE
//!
//! ```text
//! dx/dt = α(v)·(1 − x) − β(v)·x
//! ```
//!
//! For a step of length `dt` at fixed voltage the exact solution is
//!
//! ```text
//! x(t + dt) = x(t)·p + (1 − p)·x_inf,   p = exp(−dt / τ)
//! x_inf = α / (α + β),   τ = 1 / (q·(α + β))
//! ```
//!
//! which is unconditionally stable in `dt` and leaves `x` untouched as `dt → 0`.

/// Temperature scaling of every rate (Q10 of 2.3 from 23 °C to 37 °C)
pub const TEMPERATURE_FACTOR: f64 = 3.21;

/// `a·x / (1 − exp(−x/k))`, continuous through `x = 0` where it equals `a·k`
#[inline]
pub fn linoid(a: f64, x: f64, k: f64) -> f64 {
    let u = x / k;
    if u.abs() < 1e-6 {
        // Taylor expansion around the removable singularity
        a * k * (1.0 + 0.5 * u)
    } else {
        a * x / -(-u).exp_m1()
    }
}

/// Opening (α) and closing (β) rates of one gate at a given voltage, in 1/ms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateRates {
    pub alpha: f64,
    pub beta: f64,
}

impl GateRates {
    #[inline]
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// `α / (α + β)`
    #[inline]
    pub fn steady_state(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// `1 / (q·(α + β))` in ms
    #[inline]
    pub fn time_constant(&self) -> f64 {
        1.0 / (TEMPERATURE_FACTOR * (self.alpha + self.beta))
    }
}

/// Advance a gate by `dt` towards `x_inf` with time constant `tau`
///
/// The result is clamped to [0, 1] to absorb rounding in the convex combination.
#[inline]
pub fn relax(x: f64, x_inf: f64, tau: f64, dt: f64) -> f64 {
    let p = (-dt / tau).exp();
    (x * p + (1.0 - p) * x_inf).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_linoid_is_continuous_at_zero() {
        let at_zero = linoid(0.182, 0.0, 9.0);
        assert!((at_zero - 0.182 * 9.0).abs() < 1e-12);

        let left = linoid(0.182, -1e-4, 9.0);
        let right = linoid(0.182, 1e-4, 9.0);
        assert!((left - at_zero).abs() < 1e-4);
        assert!((right - at_zero).abs() < 1e-4);
    }

    #[test]
    fn test_linoid_matches_closed_form_away_from_zero() {
        let x = 12.5;
        let expected = 0.02 * x / (1.0 - (-x / 9.0_f64).exp());
        assert!((linoid(0.02, x, 9.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_relax_limits() {
        // dt → 0 keeps the state
        assert_eq!(relax(0.3, 0.9, 2.0, 0.0), 0.3);
        // dt → ∞ reaches steady state
        assert!((relax(0.3, 0.9, 2.0, 1e6) - 0.9).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_relax_stays_in_unit_interval(
            x in 0.0f64..=1.0,
            x_inf in 0.0f64..=1.0,
            tau in 1e-4f64..1e3,
            dt in 0.0f64..1e4,
        ) {
            let next = relax(x, x_inf, tau, dt);
            prop_assert!((0.0..=1.0).contains(&next));
        }

        #[test]
        fn prop_steady_state_is_a_probability(
            alpha in 1e-9f64..1e3,
            beta in 1e-9f64..1e3,
        ) {
            let rates = GateRates::new(alpha, beta);
            let x_inf = rates.steady_state();
            prop_assert!((0.0..=1.0).contains(&x_inf));
            prop_assert!(rates.time_constant() > 0.0);
        }
    }
}
