// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end behavior of a compartment driven step by step, the way the
//! membrane solver drives it.

use dendrite_neural::synapses::{normalization, peak_time};
use dendrite_neural::{
    AmpaParameters, CompartmentCurrents, CompartmentIndex, ConfigurationError,
    CurrentContribution, Linearization, PotassiumChannel, PotassiumParameters, SodiumChannel,
    SodiumParameters, SpikeBuffers, Synapse, SynapseIndex, SynapseKind, SynapseParameters,
};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {} got {} (tol {})",
        expected,
        actual,
        tol
    );
}

/// Drive `steps` solver steps at a clamped voltage, one lag per step
fn run_clamped(
    compartment: &mut CompartmentCurrents,
    buffers: &mut SpikeBuffers,
    v: f64,
    dt: f64,
    steps: usize,
) -> Vec<CurrentContribution> {
    (0..steps)
        .map(|_| {
            let gi = compartment.step(v, dt, 0, buffers);
            buffers.advance_all(1);
            gi
        })
        .collect()
}

/// Default compartment (absent Na/K, default scheme) with one default AMPA
/// synapse on input line 0 and a unit spike due at lag 0
fn default_ampa_compartment() -> (CompartmentCurrents, SpikeBuffers) {
    let mut compartment = CompartmentCurrents::new();
    compartment
        .add_synapse("AMPA", SynapseIndex(0), None)
        .unwrap();
    let mut buffers = SpikeBuffers::new(1, 4);
    compartment.attach_buffers(&buffers);
    compartment.calibrate(&mut buffers);
    buffers.get_mut(SynapseIndex(0)).unwrap().add_value(0, 1.0);
    (compartment, buffers)
}

#[test]
fn test_single_ampa_follows_biexponential_waveform() {
    let (tau_r, tau_d, v, dt) = (0.2, 3.0, -70.0, 0.1);
    let (mut compartment, mut buffers) = default_ampa_compartment();
    assert_eq!(compartment.linearization(), Linearization::BackwardEuler);

    let trace = run_clamped(&mut compartment, &mut buffers, v, dt, 100);

    let g_norm = normalization(tau_r, tau_d);
    for (n, gi) in trace.iter().enumerate() {
        let t = n as f64 * dt;
        let g = g_norm * ((-t / tau_d).exp() - (-t / tau_r).exp());
        assert_close(gi.g, g, 1e-12);
        // e_AMPA = 0, so the backward-Euler right-hand side vanishes
        assert_close(gi.i, 0.0, 1e-12);
    }

    // rises, then decays
    let peak = trace
        .iter()
        .enumerate()
        .fold(0, |best, (n, gi)| if gi.g > trace[best].g { n } else { best });
    assert!(peak > 0 && peak < trace.len() - 1);
    assert!(trace[..=peak].windows(2).all(|w| w[1].g >= w[0].g));
    assert!(trace[peak..].windows(2).all(|w| w[1].g <= w[0].g));
}

#[test]
fn test_ampa_peak_is_unity_at_peak_time() {
    let dt = peak_time(0.2, 3.0) / 50.0;
    let (mut compartment, mut buffers) = default_ampa_compartment();
    let trace = run_clamped(&mut compartment, &mut buffers, -70.0, dt, 120);

    assert_close(trace[50].g, 1.0, 1e-6);
    let max = trace.iter().map(|gi| gi.g).fold(f64::MIN, f64::max);
    assert_close(max, 1.0, 1e-6);
}

#[test]
fn test_crank_nicolson_halves_conductance_term() {
    let mut be = CompartmentCurrents::new();
    assert_eq!(be.linearization(), Linearization::BackwardEuler);
    let mut cn = CompartmentCurrents::new().with_linearization(Linearization::CrankNicolson);
    let mut buffers = SpikeBuffers::new(1, 4);
    for comp in [&mut be, &mut cn] {
        comp.add_synapse("GABA", SynapseIndex(0), None).unwrap();
        comp.attach_buffers(&buffers);
    }

    let v = -60.0;
    buffers.get_mut(SynapseIndex(0)).unwrap().add_value(1, 1.0);
    be.step(v, 0.1, 1, &mut buffers);
    buffers.get_mut(SynapseIndex(0)).unwrap().add_value(1, 1.0);
    cn.step(v, 0.1, 1, &mut buffers);
    let a = be.step(v, 0.1, 2, &mut buffers);
    let b = cn.step(v, 0.1, 2, &mut buffers);

    assert!(a.g > 0.0);
    assert_close(b.g, 0.5 * a.g, 1e-12);
    // both linearizations reproduce I(v) = g·(e − v)
    let g = a.g;
    assert_close(a.i - a.g * v, g * (-80.0 - v), 1e-9);
    assert_close(b.i - b.g * v, g * (-80.0 - v), 1e-9);
}

/// Step a compartment holding `counts[kind.slot()]` synapses of each kind next
/// to standalone copies of every member, and compare the aggregate with the
/// member sum at every step
fn check_aggregate_against_members(counts: [usize; 4], scheme: Linearization) {
    let na_params = SodiumParameters::with_values(0.12, 50.0);
    let k_params = PotassiumParameters::with_values(0.036, -85.0);
    let mut compartment = CompartmentCurrents::with_channels(na_params, k_params)
        .unwrap()
        .with_linearization(scheme);

    let mut wiring = Vec::new();
    for kind in SynapseKind::ALL {
        for _ in 0..counts[kind.slot()] {
            wiring.push((kind, SynapseIndex(wiring.len())));
        }
    }
    for &(kind, index) in &wiring {
        compartment.add_synapse(kind.as_str(), index, None).unwrap();
    }
    for kind in SynapseKind::ALL {
        assert_eq!(compartment.synapses(kind).len(), counts[kind.slot()]);
    }
    let lines = wiring.len().max(1);
    let mut buffers = SpikeBuffers::new(lines, 8);
    compartment.attach_buffers(&buffers);
    compartment.calibrate(&mut buffers);

    let mut na = SodiumChannel::new(na_params).unwrap();
    let mut k = PotassiumChannel::new(k_params).unwrap();
    let mut members: Vec<Synapse> = wiring
        .iter()
        .map(|&(kind, index)| Synapse::new(kind, index, None).unwrap())
        .collect();
    let mut member_buffers = SpikeBuffers::new(lines, 8);
    for member in &mut members {
        member.attach_buffer(&member_buffers);
    }

    let dt = 0.025;
    for step in 0..240 {
        let v = -65.0 + 40.0 * (step as f64 * 0.05).sin();
        // every line has its own period, phase and weight
        for i in 0..wiring.len() {
            if (step + 5 * i) % (11 + 3 * i) == 0 {
                let w = 0.5 + i as f64 * 0.25;
                buffers.get_mut(SynapseIndex(i)).unwrap().add_value(0, w);
                member_buffers.get_mut(SynapseIndex(i)).unwrap().add_value(0, w);
            }
        }

        let total = compartment.step(v, dt, 0, &mut buffers);
        let mut expected = na.step(v, dt, scheme) + k.step(v, dt, scheme);
        for member in &mut members {
            expected += member.step(v, dt, 0, &mut member_buffers, scheme);
        }
        assert_close(total.g, expected.g, 1e-12);
        assert_close(total.i, expected.i, 1e-9);

        buffers.advance_all(1);
        member_buffers.advance_all(1);
    }
}

#[test]
fn test_aggregate_equals_sum_of_members() {
    // [AMPA, GABA, NMDA, AMPA_NMDA]
    let mixes = [[1, 1, 1, 1], [0, 3, 1, 0], [2, 0, 0, 2], [0, 0, 0, 0], [3, 2, 2, 1]];
    for counts in mixes {
        for scheme in [Linearization::BackwardEuler, Linearization::CrankNicolson] {
            check_aggregate_against_members(counts, scheme);
        }
    }
}

#[test]
fn test_empty_compartment_contributes_nothing() {
    let mut compartment = CompartmentCurrents::new();
    let mut buffers = SpikeBuffers::default();
    compartment.attach_buffers(&buffers);
    compartment.calibrate(&mut buffers);
    for v in [-90.0, -65.0, 0.0, 40.0] {
        assert_eq!(
            compartment.step(v, 0.1, 0, &mut buffers),
            CurrentContribution::ZERO
        );
    }
}

#[test]
fn test_rejected_synapses_do_not_change_the_compartment() {
    let mut compartment = CompartmentCurrents::new();
    compartment
        .add_synapse("NMDA", SynapseIndex(0), None)
        .unwrap();
    let before = compartment.clone();

    assert_eq!(
        compartment.add_synapse("ampa", SynapseIndex(1), None),
        Err(ConfigurationError::UnknownSynapseKind("ampa".to_string()))
    );
    let gaba = SynapseParameters::defaults(SynapseKind::Gaba);
    assert!(matches!(
        compartment.add_synapse("AMPA", SynapseIndex(1), Some(&gaba)),
        Err(ConfigurationError::ParameterKindMismatch { .. })
    ));
    let inverted = SynapseParameters::Ampa(AmpaParameters::with_values(0.0, 5.0, 1.0));
    assert!(compartment
        .add_synapse("AMPA", SynapseIndex(1), Some(&inverted))
        .is_err());

    assert_eq!(compartment, before);
}

#[test]
fn test_recordables_resolve_across_steps() {
    let na = SodiumParameters::with_values(0.12, 50.0);
    let mut compartment = CompartmentCurrents::with_channels(na, PotassiumParameters::default()).unwrap();
    compartment
        .add_synapse("AMPA_NMDA", SynapseIndex(0), None)
        .unwrap();
    let mut buffers = SpikeBuffers::new(1, 4);
    compartment.attach_buffers(&buffers);
    let recordables = compartment.collect_recordables(CompartmentIndex(5));

    buffers.get_mut(SynapseIndex(0)).unwrap().add_value(0, 2.0);
    run_clamped(&mut compartment, &mut buffers, -40.0, 0.1, 10);

    let sample = compartment.sample(&recordables);
    assert!(sample["m_Na_5"] > 0.0);
    assert!(sample["h_Na_5"] > 0.0);
    // absent K channel never advances its gate
    assert_eq!(sample["n_K_5"], 0.0);
    assert!(sample["g_d_AN_NMDA_0"] > sample["g_d_AN_AMPA_0"]);
    assert!(sample["g_r_AN_AMPA_0"] < sample["g_d_AN_AMPA_0"]);
}

#[test]
fn test_independent_compartments_step_on_separate_workers() {
    fn build() -> (CompartmentCurrents, SpikeBuffers) {
        let mut compartment = CompartmentCurrents::with_channels(
            SodiumParameters::with_values(0.12, 50.0),
            PotassiumParameters::with_values(0.036, -85.0),
        )
        .unwrap();
        compartment
            .add_synapse("AMPA_NMDA", SynapseIndex(0), None)
            .unwrap();
        let buffers = SpikeBuffers::new(1, 4);
        compartment.attach_buffers(&buffers);
        (compartment, buffers)
    }

    let drive = |(mut compartment, mut buffers): (CompartmentCurrents, SpikeBuffers)| {
        buffers.get_mut(SynapseIndex(0)).unwrap().add_value(0, 1.0);
        run_clamped(&mut compartment, &mut buffers, -55.0, 0.05, 300)
    };

    let serial = drive(build());
    let parallel: Vec<Vec<CurrentContribution>> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..4).map(|_| scope.spawn(|| drive(build()))).collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    for trace in parallel {
        assert_eq!(trace, serial);
    }
}
