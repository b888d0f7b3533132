use tracing::info;

use crate::{cli::OutputArgs, commands::write_trace, experiment::ExperimentConfig};

/// Upward crossings of this level (mV above rest) count as action potentials.
const SPIKE_LEVEL: f64 = 50.0;

pub fn run(amplitude: f64, output: &OutputArgs) -> anyhow::Result<()> {
    let config = ExperimentConfig::hodgkin_huxley_step(amplitude);
    let trace = config.run()?;

    let spikes = trace.threshold_crossings(SPIKE_LEVEL);
    info!(
        amplitude,
        action_potentials = spikes.len(),
        "hodgkin-huxley step response"
    );

    write_trace(output, &config.name, "Hodgkin-Huxley Neuron Model", &trace)
}
