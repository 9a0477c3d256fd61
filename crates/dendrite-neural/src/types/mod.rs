// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Core Types
//!
//! Identity, error and solver-interface types shared by channels, synapses and
//! the compartment aggregator.

pub mod contribution;
pub mod error;
pub mod ids;

// Re-export commonly used types
pub use contribution::{CurrentContribution, Linearization};
pub use error::{ConfigurationError, Error, Result};
pub use ids::{CompartmentIndex, SynapseIndex};
