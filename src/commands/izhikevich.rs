use tracing::info;

use crate::{
    cli::OutputArgs, commands::write_trace, experiment::ExperimentConfig,
    neuro::izhikevich::IzhikevichPreset,
};

pub fn run(preset: Option<IzhikevichPreset>, output: &OutputArgs) -> anyhow::Result<()> {
    let presets = match preset {
        Some(preset) => vec![preset],
        None => IzhikevichPreset::ALL.to_vec(),
    };

    for preset in presets {
        let config = ExperimentConfig::izhikevich(preset);
        let trace = config.run()?;

        info!(
            preset = preset.label(),
            resets = trace.spike_times.len(),
            "izhikevich run"
        );

        let title = format!("Izhikevich Model: {}", preset.label());
        write_trace(output, &config.name, &title, &trace)?;
    }

    Ok(())
}

pub fn list() {
    println!(
        "{:<24} {:>6} {:>6} {:>7} {:>6} {:>6} {:>7}  label",
        "preset", "a", "b", "c", "d", "v0", "T (ms)"
    );
    for preset in IzhikevichPreset::ALL {
        let p = preset.params();
        println!(
            "{:<24} {:>6} {:>6} {:>7} {:>6} {:>6} {:>7}  {}",
            preset.slug(),
            p.a,
            p.b,
            p.c,
            p.d,
            p.v0,
            preset.duration(),
            preset.label()
        );
    }
}
