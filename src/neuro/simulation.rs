//! Fixed-step driver that runs one neuron over a precomputed stimulus.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::neuro::{
    error::{Result, ensure_positive},
    neuron::{NeuronModel, Observables},
    stimuli::StimulusTrace,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Simulation {
    dt: f64,
}

impl Simulation {
    pub fn new(dt: f64) -> Result<Self> {
        ensure_positive("dt", dt)?;
        Ok(Self { dt })
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Advances `neuron` once per stimulus value, in order, and records every step.
    pub fn run<N: NeuronModel>(&self, neuron: &mut N, stimulus: &StimulusTrace) -> SimulationTrace {
        let mut trace = SimulationTrace::with_capacity(self.dt, stimulus.len());

        for (i, current) in stimulus.iter().enumerate() {
            let t = i as f64 * self.dt;
            let sample = neuron.advance(current, self.dt);
            trace.push(t, current, sample);
        }

        debug!(
            steps = trace.len(),
            spikes = trace.spike_times.len(),
            final_v = neuron.voltage(),
            "simulation finished"
        );

        trace
    }
}

/// Everything recorded during one run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationTrace {
    pub dt: f64,
    pub time: Vec<f64>,
    pub stimulus: Vec<f64>,
    pub samples: Vec<Observables>,
    /// Times (ms) of the steps that reported a spike
    pub spike_times: Vec<f64>,
}

impl SimulationTrace {
    fn with_capacity(dt: f64, steps: usize) -> Self {
        Self {
            dt,
            time: Vec::with_capacity(steps),
            stimulus: Vec::with_capacity(steps),
            samples: Vec::with_capacity(steps),
            spike_times: Vec::new(),
        }
    }

    fn push(&mut self, t: f64, stimulus: f64, sample: Observables) {
        if sample.spiked() {
            self.spike_times.push(t);
        }
        self.time.push(t);
        self.stimulus.push(stimulus);
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn voltages(&self) -> Vec<f64> {
        self.samples.iter().map(Observables::voltage).collect()
    }

    /// Mean firing rate in Hz over the recorded spikes; `0` with fewer than two.
    pub fn firing_rate(&self) -> f64 {
        firing_rate(&self.spike_times)
    }

    /// Times at which the voltage goes from below `level` to at or above it.
    pub fn threshold_crossings(&self, level: f64) -> Vec<f64> {
        if self.len() < 2 {
            return Vec::new();
        }

        self.samples
            .windows(2)
            .zip(&self.time[1..])
            .filter(|(pair, _)| pair[0].voltage() < level && pair[1].voltage() >= level)
            .map(|(_, &t)| t)
            .collect()
    }
}

/// `1000 / mean(ISI)` for spike times in ms, `0` with fewer than two spikes.
pub fn firing_rate(spike_times: &[f64]) -> f64 {
    if spike_times.len() < 2 {
        return 0.0;
    }

    let intervals = spike_times.len() - 1;
    let mean_isi = (spike_times[intervals] - spike_times[0]) / intervals as f64;
    if mean_isi > 0.0 { 1000.0 / mean_isi } else { 0.0 }
}
