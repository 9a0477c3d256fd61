// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Dendrite Compartment Currents
//!
//! Per-compartment current core of a multi-compartment neuron:
//! - **Channels**: Na-like and K-like Hodgkin-Huxley conductances
//! - **Synapses**: AMPA, GABA, NMDA and AMPA+NMDA biexponential receptors
//! - **Buffer**: per-synapse spike input rings
//! - **Compartment**: aggregation into one linearized (g, i) pair per step
//!
//! The membrane solver owns voltages and the cable equation; this crate only
//! answers "what conductance and current does compartment `c` inject at `v`".
//!
//! ```
//! use dendrite_neural::{CompartmentCurrents, SpikeBuffers, SynapseIndex};
//!
//! let mut compartment = CompartmentCurrents::new();
//! compartment.add_synapse("AMPA", SynapseIndex(0), None).unwrap();
//!
//! let mut buffers = SpikeBuffers::new(1, 16);
//! compartment.attach_buffers(&buffers);
//! compartment.calibrate(&mut buffers);
//!
//! buffers.get_mut(SynapseIndex(0)).unwrap().add_value(0, 1.0);
//! // rise and decay jump together, so g is 0 on the arrival step
//! assert_eq!(compartment.step(-70.0, 0.1, 0, &mut buffers).g, 0.0);
//! buffers.advance_all(1);
//! let gi = compartment.step(-70.0, 0.1, 0, &mut buffers);
//! assert!(gi.g > 0.0);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod buffer;
pub mod channels;
pub mod compartment;
pub mod recordables;
pub mod synapses;
pub mod types;

pub use buffer::{BufferHandle, InputLine, RingBuffer, SpikeBuffers};
pub use channels::{
    PotassiumChannel, PotassiumParameters, SodiumChannel, SodiumParameters, ABSENT_CONDUCTANCE,
};
pub use compartment::CompartmentCurrents;
pub use recordables::{Recordables, StateRef};
pub use synapses::{
    AmpaNmdaParameters, AmpaParameters, GabaParameters, NmdaParameters, Synapse, SynapseKind,
    SynapseParameters,
};
pub use types::{
    CompartmentIndex, ConfigurationError, CurrentContribution, Error, Linearization, Result,
    SynapseIndex,
};
