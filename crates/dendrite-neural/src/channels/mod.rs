// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Voltage-Gated Ion Channels
//!
//! Hodgkin-Huxley style channels whose gates are advanced with the exact
//! exponential solution of their linear ODE (see [`gating`]).
//!
//! ## Adding a New Channel
//!
//! 1. Create `src/channels/your_channel.rs` with its rate functions
//! 2. Advance each gate with [`gating::relax`]
//! 3. Return the (g, i) pair through [`Linearization::ohmic`](crate::types::Linearization::ohmic)
//! 4. Add it to `CompartmentCurrents`

pub mod gating;
pub mod params;
pub mod potassium;
pub mod sodium;

pub use gating::{linoid, relax, GateRates, TEMPERATURE_FACTOR};
pub use params::{PotassiumParameters, SodiumParameters};
pub use potassium::PotassiumChannel;
pub use sodium::SodiumChannel;

/// Channels at or below this maximal conductance are skipped entirely
pub const ABSENT_CONDUCTANCE: f64 = 1e-9;
