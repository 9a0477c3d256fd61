// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Ion channel parameters

use crate::types::error::{require_finite, require_non_negative, Result};

/// Sodium channel parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SodiumParameters {
    /// Maximal conductance (µS); 0 leaves the channel out of the compartment
    pub gbar: f64,
    /// Reversal potential (mV)
    pub e_rev: f64,
}

impl Default for SodiumParameters {
    fn default() -> Self {
        Self {
            gbar: 0.0,
            e_rev: 50.0,
        }
    }
}

impl SodiumParameters {
    pub fn with_values(gbar: f64, e_rev: f64) -> Self {
        Self { gbar, e_rev }
    }

    pub fn validate(&self) -> Result<()> {
        require_non_negative("gbar_Na", self.gbar)?;
        require_finite("e_Na", self.e_rev)
    }
}

/// Potassium channel parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PotassiumParameters {
    /// Maximal conductance (µS); 0 leaves the channel out of the compartment
    pub gbar: f64,
    /// Reversal potential (mV)
    pub e_rev: f64,
}

impl Default for PotassiumParameters {
    fn default() -> Self {
        Self {
            gbar: 0.0,
            e_rev: -85.0,
        }
    }
}

impl PotassiumParameters {
    pub fn with_values(gbar: f64, e_rev: f64) -> Self {
        Self { gbar, e_rev }
    }

    pub fn validate(&self) -> Result<()> {
        require_non_negative("gbar_K", self.gbar)?;
        require_finite("e_K", self.e_rev)
    }
}
