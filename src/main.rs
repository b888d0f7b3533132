use clap::Parser;
use neurosim::cli::{Cli, Commands};
use neurosim::commands;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Run { config } => commands::run::run(&config, &cli.output)?,
        Commands::Hh { amplitude } => commands::hh::run(amplitude, &cli.output)?,
        Commands::Lif {
            current,
            thresholds,
        } => commands::lif::run(current, &thresholds, &cli.output)?,
        Commands::IfCurve {
            max_current,
            points,
        } => commands::lif::if_curve(max_current, points, &cli.output)?,
        Commands::Izhikevich { preset } => commands::izhikevich::run(preset, &cli.output)?,
        Commands::Presets => commands::izhikevich::list(),
    }

    Ok(())
}
