// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for compartment current construction
//!
//! Every error here is raised while a compartment is being assembled. The
//! per-step numeric path has no failure mode.

use crate::synapses::SynapseKind;

/// Invalid or out-of-range construction input
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Unknown synapse type: {0:?} (expected one of AMPA, GABA, NMDA, AMPA_NMDA)")]
    UnknownSynapseKind(String),

    #[error("Unknown linearization scheme: {0:?} (expected crank-nicolson or backward-euler)")]
    UnknownLinearization(String),

    #[error("Invalid parameter {parameter} = {value}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Parameters for {provided} synapse cannot build a {requested} synapse")]
    ParameterKindMismatch {
        requested: SynapseKind,
        provided: SynapseKind,
    },
}

impl ConfigurationError {
    pub(crate) fn invalid(parameter: &'static str, value: f64, reason: &'static str) -> Self {
        ConfigurationError::InvalidParameter {
            parameter,
            value,
            reason,
        }
    }
}

pub type Result<T> = core::result::Result<T, ConfigurationError>;
pub type Error = ConfigurationError;

/// Reject non-finite values
pub(crate) fn require_finite(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError::invalid(parameter, value, "must be finite"))
    }
}

/// Reject negative or non-finite values
pub(crate) fn require_non_negative(parameter: &'static str, value: f64) -> Result<()> {
    require_finite(parameter, value)?;
    if value < 0.0 {
        return Err(ConfigurationError::invalid(parameter, value, "must be >= 0"));
    }
    Ok(())
}

/// Reject zero, negative or non-finite values
pub(crate) fn require_positive(parameter: &'static str, value: f64) -> Result<()> {
    require_finite(parameter, value)?;
    if value <= 0.0 {
        return Err(ConfigurationError::invalid(parameter, value, "must be > 0"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_parameter() {
        let err = require_positive("tau_r", -1.0).unwrap_err();
        assert_eq!(err.to_string(), "Invalid parameter tau_r = -1: must be > 0");

        let err = require_finite("e_rev", f64::NAN).unwrap_err();
        assert!(err.to_string().contains("e_rev"));
    }

    #[test]
    fn test_non_negative_accepts_zero() {
        assert!(require_non_negative("gbar", 0.0).is_ok());
        assert!(require_non_negative("gbar", -1e-12).is_err());
        assert!(require_non_negative("gbar", f64::INFINITY).is_err());
    }
}
