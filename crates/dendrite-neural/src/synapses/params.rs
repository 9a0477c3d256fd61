// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Receptor parameters with documented defaults and validation

use super::kinetics::BiexpKinetics;
use super::SynapseKind;
use crate::types::error::{require_finite, require_non_negative, Result};

macro_rules! receptor_parameters {
    (
        $(#[$meta:meta])*
        $name:ident {
            e_rev: $e_rev:expr => $e_label:literal,
            tau_r: $tau_r:expr => $tau_r_label:literal,
            tau_d: $tau_d:expr => $tau_d_label:literal $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(default))]
        pub struct $name {
            /// Reversal potential (mV)
            pub e_rev: f64,
            /// Rise time constant (ms)
            pub tau_r: f64,
            /// Decay time constant (ms)
            pub tau_d: f64,
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    e_rev: $e_rev,
                    tau_r: $tau_r,
                    tau_d: $tau_d,
                }
            }
        }

        impl $name {
            pub fn with_values(e_rev: f64, tau_r: f64, tau_d: f64) -> Self {
                Self { e_rev, tau_r, tau_d }
            }

            pub fn validate(&self) -> Result<()> {
                self.kinetics().map(|_| ())
            }

            pub(crate) fn kinetics(&self) -> Result<BiexpKinetics> {
                require_finite($e_label, self.e_rev)?;
                BiexpKinetics::new(self.tau_r, self.tau_d, $tau_r_label, $tau_d_label)
            }
        }
    };
}

receptor_parameters! {
    /// Fast excitatory receptor
    AmpaParameters {
        e_rev: 0.0 => "e_AMPA",
        tau_r: 0.2 => "tau_r_AMPA",
        tau_d: 3.0 => "tau_d_AMPA",
    }
}

receptor_parameters! {
    /// Fast inhibitory receptor
    GabaParameters {
        e_rev: -80.0 => "e_GABA",
        tau_r: 0.2 => "tau_r_GABA",
        tau_d: 10.0 => "tau_d_GABA",
    }
}

receptor_parameters! {
    /// Slow voltage-gated excitatory receptor
    NmdaParameters {
        e_rev: 0.0 => "e_NMDA",
        tau_r: 0.2 => "tau_r_NMDA",
        tau_d: 43.0 => "tau_d_NMDA",
    }
}

/// Combined AMPA and NMDA receptor sharing one input line
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AmpaNmdaParameters {
    /// Reversal potential shared by both components (mV)
    pub e_rev: f64,
    pub tau_r_ampa: f64,
    pub tau_d_ampa: f64,
    pub tau_r_nmda: f64,
    pub tau_d_nmda: f64,
    /// Weight of the NMDA component relative to the AMPA component
    pub nmda_ratio: f64,
}

impl Default for AmpaNmdaParameters {
    fn default() -> Self {
        Self {
            e_rev: 0.0,
            tau_r_ampa: 0.2,
            tau_d_ampa: 3.0,
            tau_r_nmda: 0.2,
            tau_d_nmda: 43.0,
            nmda_ratio: 2.0,
        }
    }
}

impl AmpaNmdaParameters {
    pub fn validate(&self) -> Result<()> {
        self.kinetics().map(|_| ())
    }

    pub(crate) fn kinetics(&self) -> Result<(BiexpKinetics, BiexpKinetics)> {
        require_finite("e_AMPA_NMDA", self.e_rev)?;
        require_non_negative("NMDA_ratio", self.nmda_ratio)?;
        let ampa = BiexpKinetics::new(self.tau_r_ampa, self.tau_d_ampa, "tau_r_AMPA", "tau_d_AMPA")?;
        let nmda = BiexpKinetics::new(self.tau_r_nmda, self.tau_d_nmda, "tau_r_NMDA", "tau_d_NMDA")?;
        Ok((ampa, nmda))
    }
}

/// Parameters for any receptor variant
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum SynapseParameters {
    #[cfg_attr(feature = "serde", serde(rename = "AMPA"))]
    Ampa(AmpaParameters),
    #[cfg_attr(feature = "serde", serde(rename = "GABA"))]
    Gaba(GabaParameters),
    #[cfg_attr(feature = "serde", serde(rename = "NMDA"))]
    Nmda(NmdaParameters),
    #[cfg_attr(feature = "serde", serde(rename = "AMPA_NMDA"))]
    AmpaNmda(AmpaNmdaParameters),
}

impl SynapseParameters {
    /// Documented defaults for `kind`
    pub fn defaults(kind: SynapseKind) -> Self {
        match kind {
            SynapseKind::Ampa => SynapseParameters::Ampa(AmpaParameters::default()),
            SynapseKind::Gaba => SynapseParameters::Gaba(GabaParameters::default()),
            SynapseKind::Nmda => SynapseParameters::Nmda(NmdaParameters::default()),
            SynapseKind::AmpaNmda => SynapseParameters::AmpaNmda(AmpaNmdaParameters::default()),
        }
    }

    pub fn kind(&self) -> SynapseKind {
        match self {
            SynapseParameters::Ampa(_) => SynapseKind::Ampa,
            SynapseParameters::Gaba(_) => SynapseKind::Gaba,
            SynapseParameters::Nmda(_) => SynapseKind::Nmda,
            SynapseParameters::AmpaNmda(_) => SynapseKind::AmpaNmda,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            SynapseParameters::Ampa(p) => p.validate(),
            SynapseParameters::Gaba(p) => p.validate(),
            SynapseParameters::Nmda(p) => p.validate(),
            SynapseParameters::AmpaNmda(p) => p.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConfigurationError;

    #[test]
    fn test_defaults_validate() {
        for kind in SynapseKind::ALL {
            assert!(SynapseParameters::defaults(kind).validate().is_ok(), "{}", kind);
            assert_eq!(SynapseParameters::defaults(kind).kind(), kind);
        }
    }

    #[test]
    fn test_inverted_time_constants_rejected() {
        let err = GabaParameters::with_values(-80.0, 10.0, 0.2).validate().unwrap_err();
        match err {
            ConfigurationError::InvalidParameter { parameter, .. } => assert_eq!(parameter, "tau_r_GABA"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_negative_ratio_rejected() {
        let params = AmpaNmdaParameters {
            nmda_ratio: -1.0,
            ..AmpaNmdaParameters::default()
        };
        assert!(params.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_tagged_parameters_deserialize_with_defaults() {
        let params: SynapseParameters =
            serde_json::from_str(r#"{"type": "GABA", "tau_d": 12.0}"#).unwrap();
        assert_eq!(
            params,
            SynapseParameters::Gaba(GabaParameters::with_values(-80.0, 0.2, 12.0))
        );
    }
}
