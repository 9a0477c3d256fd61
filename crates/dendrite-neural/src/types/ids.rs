// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Identity types for compartments and synapse input lines

use core::fmt;

/// Compartment index (position of the compartment in the owning cell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompartmentIndex(pub usize);

impl fmt::Display for CompartmentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Compartment({})", self.0)
    }
}

/// Synapse index (position of the synapse's input line in the shared spike buffers)
///
/// Must be unique per physical input line. The aggregator does not enforce this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SynapseIndex(pub usize);

impl fmt::Display for SynapseIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Synapse({})", self.0)
    }
}

impl From<usize> for SynapseIndex {
    fn from(index: usize) -> Self {
        SynapseIndex(index)
    }
}

impl From<usize> for CompartmentIndex {
    fn from(index: usize) -> Self {
        CompartmentIndex(index)
    }
}
