//! Experiment records: what to simulate, for how long and under which drive.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::neuro::{
    error::{Result, SimError, ensure_non_negative},
    hodgkin_huxley::HodgkinHuxleyParams,
    izhikevich::IzhikevichPreset,
    lif::LifParams,
    neuron::ModelConfig,
    simulation::{Simulation, SimulationTrace},
    stimuli::StimulusWaveform,
};

/// Longest run an experiment may request; bounds the trace allocation.
pub const MAX_STEPS: usize = 10_000_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub name: String,
    /// Integration step (ms)
    pub dt: f64,
    /// Simulated time (ms); the run has `floor(duration / dt) + 1` steps
    #[serde(default)]
    pub duration: f64,
    /// Overrides the step count derived from `duration`
    #[serde(default)]
    pub steps: Option<usize>,
    pub model: ModelConfig,
    pub stimulus: StimulusWaveform,
}

impl ExperimentConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("invalid experiment file {}", path.display()))?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        Simulation::new(self.dt)?;
        ensure_non_negative("duration", self.duration)?;
        if self.steps.is_none() && self.duration == 0.0 {
            return Err(SimError::invalid_parameter(
                "duration",
                self.duration,
                "> 0 when steps is not given",
            ));
        }
        let steps = match self.steps {
            Some(steps) => steps as f64,
            None => (self.duration / self.dt + 1e-9).floor() + 1.0,
        };
        if steps > MAX_STEPS as f64 {
            return Err(SimError::invalid_parameter(
                "steps",
                steps,
                format!("<= {MAX_STEPS}"),
            ));
        }
        self.model.validate()
    }

    pub fn step_count(&self) -> usize {
        self.steps
            .unwrap_or_else(|| (self.duration / self.dt + 1e-9).floor() as usize + 1)
    }

    /// Validates, builds the model and stimulus, and runs to the end of the stimulus.
    pub fn run(&self) -> Result<SimulationTrace> {
        self.validate()?;

        let simulation = Simulation::new(self.dt)?;
        let stimulus = self.stimulus.generate(self.step_count())?;
        let mut neuron = self.model.build()?;

        info!(
            experiment = %self.name,
            model = self.model.name(),
            steps = stimulus.len(),
            dt = self.dt,
            "running experiment"
        );

        Ok(simulation.run(&mut neuron, &stimulus))
    }

    /// 5000 steps of 0.05 ms with a current step on steps `[2000, 3000)`.
    pub fn hodgkin_huxley_step(amplitude: f64) -> Self {
        Self {
            name: "hh-step".to_string(),
            dt: 0.05,
            duration: 0.0,
            steps: Some(5000),
            model: ModelConfig::HodgkinHuxley(HodgkinHuxleyParams::default()),
            stimulus: StimulusWaveform::Step {
                amplitude,
                start: 2000,
                stop: Some(3000),
            },
        }
    }

    /// 50 ms LIF run driven by a triangular current peaking at `current` mA.
    pub fn lif_triangular(params: LifParams, current: f64) -> Self {
        Self {
            name: format!("lif-i{current}-vth{}", params.v_threshold),
            dt: 0.1,
            duration: 50.0,
            steps: None,
            model: ModelConfig::Lif(params),
            stimulus: StimulusWaveform::Triangular { amplitude: current },
        }
    }

    pub fn izhikevich(preset: IzhikevichPreset) -> Self {
        Self {
            name: format!("izhikevich-{}", preset.slug()),
            dt: IzhikevichPreset::DT,
            duration: preset.duration(),
            steps: None,
            model: ModelConfig::Izhikevich(preset.params()),
            stimulus: preset.stimulus(),
        }
    }
}

/// Firing rate against drive amplitude for one LIF parameter set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateCurve {
    pub r_m: f64,
    pub c_m: f64,
    pub tau_m: f64,
    pub currents: Vec<f64>,
    pub rates: Vec<f64>,
}

/// `(Rm, Cm)` pairs of the classic f-I comparison.
pub const IF_CURVE_MEMBRANES: [(f64, f64); 3] = [(1.0, 1.0), (5.0, 5.0), (10.0, 10.0)];

/// `count` evenly spaced values from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Runs the triangular-drive LIF experiment for every current and membrane.
pub fn if_curves(
    membranes: &[(f64, f64)],
    currents: &[f64],
    base: LifParams,
) -> Result<Vec<RateCurve>> {
    membranes
        .iter()
        .map(|&(r_m, c_m)| -> Result<RateCurve> {
            let params = LifParams { r_m, c_m, ..base };
            let rates = currents
                .iter()
                .map(|&current| {
                    ExperimentConfig::lif_triangular(params, current)
                        .run()
                        .map(|trace| trace.firing_rate())
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(RateCurve {
                r_m,
                c_m,
                tau_m: params.tau_m(),
                currents: currents.to_vec(),
                rates,
            })
        })
        .collect()
}
