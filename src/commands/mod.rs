use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;
use tracing::info;

use crate::{cli::OutputArgs, neuro::simulation::SimulationTrace, plot};

pub mod hh;
pub mod izhikevich;
pub mod lif;
pub mod run;

fn prepare(output: &OutputArgs) -> anyhow::Result<()> {
    fs::create_dir_all(&output.out_dir)
        .with_context(|| format!("failed to create {}", output.out_dir.display()))
}

fn write_file(path: PathBuf, contents: String) -> anyhow::Result<PathBuf> {
    fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote");
    Ok(path)
}

/// Writes `<name>.json`, and `<name>.html` when plotting is on.
pub fn write_trace(
    output: &OutputArgs,
    name: &str,
    title: &str,
    trace: &SimulationTrace,
) -> anyhow::Result<()> {
    write_json(output, name, trace)?;

    if output.plot {
        let html = plot::trace_html(trace, title);
        write_file(output.out_dir.join(format!("{name}.html")), html)?;
    }

    Ok(())
}

pub fn write_json<T: Serialize>(output: &OutputArgs, name: &str, value: &T) -> anyhow::Result<()> {
    prepare(output)?;
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to serialize {name}"))?;
    write_file(output.out_dir.join(format!("{name}.json")), json)?;
    Ok(())
}

pub fn write_html(output: &OutputArgs, name: &str, html: String) -> anyhow::Result<()> {
    prepare(output)?;
    write_file(output.out_dir.join(format!("{name}.html")), html)?;
    Ok(())
}
