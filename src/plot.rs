//! Renders finished traces as standalone plotly HTML pages.

use plotly::{
    Layout, Plot, Scatter,
    common::{Mode, Title},
    layout::{Axis, GridPattern, LayoutGrid},
};

use crate::{
    experiment::RateCurve,
    neuro::{neuron::Observables, simulation::SimulationTrace},
};

/// Offset added to Hodgkin-Huxley voltages so the plot shows absolute mV.
const HH_RESTING_POTENTIAL: f64 = -70.0;

fn line(x: &[f64], y: Vec<f64>, name: &str) -> Box<Scatter<f64, f64>> {
    Scatter::new(x.to_vec(), y).name(name).mode(Mode::Lines)
}

fn axis(title: &str) -> Axis {
    Axis::new().title(Title::with_text(title))
}

/// One page per trace: voltage with the scaled stimulus on top, plus gate
/// states and ionic currents for Hodgkin-Huxley runs.
pub fn trace_html(trace: &SimulationTrace, title: &str) -> String {
    let mut plot = Plot::new();
    let t = &trace.time;

    let is_hh = matches!(trace.samples.first(), Some(Observables::HodgkinHuxley { .. }));
    let offset = if is_hh { HH_RESTING_POTENTIAL } else { 0.0 };
    // The stimulus is drawn on the resting line, except for LIF whose drive is in mA.
    let baseline = match trace.samples.first() {
        Some(Observables::Lif { .. }) | None => 0.0,
        Some(_) => trace.voltages()[0] + offset,
    };

    plot.add_trace(line(
        t,
        trace.voltages().into_iter().map(|v| v + offset).collect(),
        "Vm",
    ));
    plot.add_trace(line(
        t,
        trace.stimulus.iter().map(|i| i + baseline).collect(),
        "Stimulus (scaled)",
    ));

    let mut layout = Layout::new()
        .title(Title::with_text(title))
        .x_axis(axis("Time (ms)"))
        .y_axis(axis("Membrane Potential (mV)"));

    match trace.samples.first() {
        Some(Observables::HodgkinHuxley { .. }) => {
            let mut gates: [Vec<f64>; 3] = Default::default();
            let mut currents: [Vec<f64>; 4] = Default::default();
            for sample in &trace.samples {
                if let Observables::HodgkinHuxley {
                    m,
                    h,
                    n,
                    i_na,
                    i_k,
                    i_leak,
                    i_sum,
                    ..
                } = *sample
                {
                    for (series, value) in gates.iter_mut().zip([m, h, n]) {
                        series.push(value);
                    }
                    for (series, value) in currents.iter_mut().zip([i_na, i_k, i_leak, i_sum]) {
                        series.push(value);
                    }
                }
            }

            for (name, values) in ["m (Na)", "h (Na)", "n (K)"].into_iter().zip(gates) {
                plot.add_trace(line(t, values, name).x_axis("x2").y_axis("y2"));
            }
            for (name, values) in ["INa", "IK", "Ileak", "Isum"].into_iter().zip(currents) {
                plot.add_trace(line(t, values, name).x_axis("x3").y_axis("y3"));
            }

            layout = layout
                .grid(
                    LayoutGrid::new()
                        .rows(3)
                        .columns(1)
                        .pattern(GridPattern::Independent),
                )
                .x_axis2(axis("Time (ms)"))
                .y_axis2(axis("Gate state"))
                .x_axis3(axis("Time (ms)"))
                .y_axis3(axis("Current (uA)"));
        }
        Some(Observables::Izhikevich { .. }) => {
            let recovery = trace
                .samples
                .iter()
                .filter_map(|s| match *s {
                    Observables::Izhikevich { u, .. } => Some(u),
                    _ => None,
                })
                .collect();
            plot.add_trace(line(t, recovery, "Recovery"));
        }
        _ => {}
    }

    plot.set_layout(layout);
    plot.to_html()
}

/// Firing rate against input current, one line per membrane time constant.
pub fn if_curve_html(curves: &[RateCurve]) -> String {
    let mut plot = Plot::new();
    for curve in curves {
        plot.add_trace(line(
            &curve.currents,
            curve.rates.clone(),
            &format!("Tau = {} ms", curve.tau_m),
        ));
    }

    plot.set_layout(
        Layout::new()
            .title(Title::with_text("I-F Curves for Different Tau Values"))
            .x_axis(axis("Input Current (mA)"))
            .y_axis(axis("Firing Rate (Hz)")),
    );
    plot.to_html()
}
