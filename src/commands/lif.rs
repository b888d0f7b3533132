use tracing::info;

use crate::{
    cli::OutputArgs,
    commands::{write_html, write_json, write_trace},
    experiment::{ExperimentConfig, IF_CURVE_MEMBRANES, if_curves, linspace},
    neuro::lif::LifParams,
    plot,
};

pub fn run(current: f64, thresholds: &[f64], output: &OutputArgs) -> anyhow::Result<()> {
    for &v_threshold in thresholds {
        let params = LifParams {
            v_threshold,
            ..Default::default()
        };
        let config = ExperimentConfig::lif_triangular(params, current);
        let trace = config.run()?;

        info!(
            v_threshold,
            spikes = trace.spike_times.len(),
            firing_rate_hz = trace.firing_rate(),
            "lif run"
        );

        let title = format!("V-T Curve (I = {current} mA, threshold = {v_threshold} mV)");
        write_trace(output, &config.name, &title, &trace)?;
    }

    Ok(())
}

pub fn if_curve(max_current: f64, points: usize, output: &OutputArgs) -> anyhow::Result<()> {
    anyhow::ensure!(points > 0, "points must be > 0");
    anyhow::ensure!(
        max_current.is_finite() && max_current >= 0.0,
        "max current must be finite and >= 0"
    );

    let currents = linspace(0.0, max_current, points);
    let curves = if_curves(&IF_CURVE_MEMBRANES, &currents, LifParams::default())?;

    for curve in &curves {
        let peak = curve.rates.iter().copied().fold(0.0, f64::max);
        info!(tau_m = curve.tau_m, peak_rate_hz = peak, "i-f curve");
    }

    write_json(output, "if-curve", &curves)?;
    if output.plot {
        write_html(output, "if-curve", plot::if_curve_html(&curves))?;
    }

    Ok(())
}
