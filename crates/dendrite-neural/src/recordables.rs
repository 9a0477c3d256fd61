// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Recordable state registration
//!
//! Monitoring code asks a compartment once for a `name → StateRef` map and
//! then resolves the handles at every sample through
//! [`CompartmentCurrents::read`](crate::compartment::CompartmentCurrents::read),
//! so nothing outside the compartment ever holds a reference into its state.
//!
//! Names follow `{state}_{compartment}` for channel gates (`m_Na_0`, `h_Na_0`,
//! `n_K_0`) and `{state}_{synapse index}` for receptor states (`g_r_AMPA_3`,
//! `g_d_AN_NMDA_7`, ...).

use std::collections::BTreeMap;

use crate::synapses::SynapseKind;

/// Handle to one scalar state variable inside a compartment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateRef {
    /// Na activation gate `m`
    SodiumActivation,
    /// Na inactivation gate `h`
    SodiumInactivation,
    /// K activation gate `n`
    PotassiumActivation,
    /// Kinetic component `component` of the `position`-th synapse of `kind`
    Synapse {
        kind: SynapseKind,
        position: usize,
        component: usize,
    },
}

/// Ordered name → handle map
pub type Recordables = BTreeMap<String, StateRef>;

/// `{label}_{id}`
pub(crate) fn recordable_name(label: &str, id: usize) -> String {
    format!("{}_{}", label, id)
}
