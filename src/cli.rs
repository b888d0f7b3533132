use std::path::PathBuf;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Args, Parser, Subcommand};

use crate::neuro::izhikevich::IzhikevichPreset;

#[derive(Parser, Debug)]
#[command(
    name = "neurosim",
    version,
    about = "Single-neuron simulator: Hodgkin-Huxley, LIF and Izhikevich models",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub output: OutputArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Directory that receives trace JSON and plots
    #[arg(long, global = true, default_value = "out")]
    pub out_dir: PathBuf,

    /// Also write a plotly HTML page next to each trace
    #[arg(long, global = true)]
    pub plot: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an experiment described by a TOML file
    Run {
        config: PathBuf,
    },

    /// Hodgkin-Huxley response to a 50 ms current step
    Hh {
        /// Step amplitude (uA/cm^2)
        #[arg(long, default_value_t = 10.0)]
        amplitude: f64,
    },

    /// LIF response to a triangular current, once per threshold
    Lif {
        /// Peak current (mA)
        #[arg(long, default_value_t = 0.1)]
        current: f64,

        /// Spike thresholds (mV)
        #[arg(long = "threshold", num_args = 1.., allow_negative_numbers = true, default_values_t = [-60.0, -20.0, 20.0])]
        thresholds: Vec<f64>,
    },

    /// LIF firing rate as a function of input current
    IfCurve {
        /// Largest current of the sweep (mA)
        #[arg(long, default_value_t = 5.0)]
        max_current: f64,

        /// Number of currents in the sweep
        #[arg(long, default_value_t = 100)]
        points: usize,
    },

    /// Izhikevich firing regimes
    Izhikevich {
        /// Run a single preset instead of all of them
        #[arg(long, value_parser = preset_parser())]
        preset: Option<IzhikevichPreset>,
    },

    /// List the Izhikevich preset table
    Presets,
}

fn preset_parser() -> impl TypedValueParser<Value = IzhikevichPreset> {
    PossibleValuesParser::new(IzhikevichPreset::ALL.map(IzhikevichPreset::slug))
        .try_map(|slug| slug.parse::<IzhikevichPreset>())
}
