use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::{cli::OutputArgs, commands::write_trace, experiment::ExperimentConfig};

pub fn run(config_path: &Path, output: &OutputArgs) -> anyhow::Result<()> {
    let config = ExperimentConfig::load(config_path)?;

    let trace = config
        .run()
        .with_context(|| format!("experiment {} failed", config.name))?;

    info!(
        experiment = %config.name,
        spikes = trace.spike_times.len(),
        firing_rate_hz = trace.firing_rate(),
        "experiment finished"
    );

    write_trace(output, &config.name, &config.name, &trace)
}
