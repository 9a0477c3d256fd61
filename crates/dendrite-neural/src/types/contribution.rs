// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Solver-facing (g, i) pairs
//!
//! Every channel and synapse computes its total transmembrane current `I(v)`
//! (positive = depolarizing, `g·(e_rev − v)` for an ohmic member) together with
//! `dI/dv`, and hands the compartment solver the θ-method linearization:
//!
//! ```text
//! g_out = −θ · dI/dv
//! i_out = I − θ · dI/dv · v
//! ```
//!
//! The solver adds `g_out` to the diagonal of its system and `i_out` to the
//! right-hand side. For an ohmic member with conductance `g`:
//!
//! ```text
//! BackwardEuler (θ = 1):  g_out = g,    i_out = g·e_rev
//! CrankNicolson (θ = ½):  g_out = g/2,  i_out = g·(e_rev − v/2)
//! ```
//!
//! BackwardEuler is the default, so an ohmic member reports its conductance
//! unscaled.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};
use core::str::FromStr;

use super::error::ConfigurationError;

/// Linearized (conductance, current) pair consumed by the voltage solver
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrentContribution {
    /// Diagonal term (µS-equivalent)
    pub g: f64,
    /// Right-hand-side term (nA-equivalent)
    pub i: f64,
}

impl CurrentContribution {
    pub const ZERO: CurrentContribution = CurrentContribution { g: 0.0, i: 0.0 };

    pub fn new(g: f64, i: f64) -> Self {
        Self { g, i }
    }
}

impl Add for CurrentContribution {
    type Output = CurrentContribution;

    #[inline]
    fn add(self, rhs: CurrentContribution) -> CurrentContribution {
        CurrentContribution {
            g: self.g + rhs.g,
            i: self.i + rhs.i,
        }
    }
}

impl AddAssign for CurrentContribution {
    #[inline]
    fn add_assign(&mut self, rhs: CurrentContribution) {
        self.g += rhs.g;
        self.i += rhs.i;
    }
}

impl Sum for CurrentContribution {
    fn sum<I: Iterator<Item = CurrentContribution>>(iter: I) -> Self {
        iter.fold(CurrentContribution::ZERO, Add::add)
    }
}

/// Implicitness of the solver the core is paired with
///
/// Serialized as the kebab-case name; deserialized through [`FromStr`], so a
/// configuration file accepts the same spellings as the overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Linearization {
    /// θ = 1
    #[default]
    BackwardEuler,
    /// θ = ½, the scheme used by the compartment-tree solver
    CrankNicolson,
}

impl Linearization {
    #[inline(always)]
    pub fn theta(self) -> f64 {
        match self {
            Linearization::CrankNicolson => 0.5,
            Linearization::BackwardEuler => 1.0,
        }
    }

    /// Package `I(v)` and `dI/dv` evaluated at `v` for the solver
    #[inline(always)]
    pub fn linearize(self, current: f64, d_current_dv: f64, v: f64) -> CurrentContribution {
        let theta = self.theta();
        CurrentContribution {
            g: -theta * d_current_dv,
            i: current - theta * d_current_dv * v,
        }
    }

    /// Linearization of an ohmic member `I(v) = g·(e_rev − v)`
    #[inline(always)]
    pub fn ohmic(self, conductance: f64, e_rev: f64, v: f64) -> CurrentContribution {
        self.linearize(conductance * (e_rev - v), -conductance, v)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Linearization::CrankNicolson => "crank-nicolson",
            Linearization::BackwardEuler => "backward-euler",
        }
    }
}

impl fmt::Display for Linearization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Linearization {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "crank-nicolson" | "cn" => Ok(Linearization::CrankNicolson),
            "backward-euler" | "implicit" | "be" => Ok(Linearization::BackwardEuler),
            _ => Err(ConfigurationError::UnknownLinearization(s.to_string())),
        }
    }
}

// Serialize as the canonical name
#[cfg(feature = "serde")]
impl serde::Serialize for Linearization {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

// Deserialize through FromStr - accepts every spelling the overrides accept
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Linearization {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse::<Linearization>()
            .map_err(|e| serde::de::Error::custom(format!("{}", e)))
    }
}
