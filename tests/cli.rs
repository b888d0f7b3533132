use assert_cmd::Command;
use predicates::prelude::*;
use std::error::Error;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

use neurosim::neuro::simulation::SimulationTrace;

fn demo(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

fn read_trace(path: &Path) -> Result<SimulationTrace, Box<dyn Error>> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

#[test]
fn presets_lists_every_regime() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("neurosim")?;
    cmd.arg("presets");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("regular-spiking"))
        .stdout(predicate::str::contains("Resonator (RZ)"))
        .stdout(predicate::str::contains("thalamo-cortical-right"));
    Ok(())
}

#[test]
fn run_writes_trace_json() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    let mut cmd = Command::cargo_bin("neurosim")?;
    cmd.args(["--out-dir", tmp.path().to_str().expect("utf8")])
        .args(["run", &demo("lif_triangular.toml")]);
    cmd.assert().success();

    let trace = read_trace(&tmp.path().join("lif-triangular.json"))?;
    assert_eq!(trace.len(), 501);
    assert!(trace.spike_times.len() >= 2);
    assert!(trace.firing_rate() > 0.0);
    Ok(())
}

#[test]
fn run_with_plot_writes_html() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    let mut cmd = Command::cargo_bin("neurosim")?;
    cmd.args(["run", &demo("izhikevich_resonator.toml")])
        .args(["--out-dir", tmp.path().to_str().expect("utf8"), "--plot"]);
    cmd.assert().success();

    assert!(tmp.path().join("izhikevich-resonator.json").exists());
    let html = fs::read_to_string(tmp.path().join("izhikevich-resonator.html"))?;
    assert!(html.contains("Recovery"));
    Ok(())
}

#[test]
fn run_rejects_negative_time_step() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    let config = tmp.path().join("bad.toml");
    fs::write(
        &config,
        r#"
name = "bad"
dt = -0.1
duration = 10.0

[model]
kind = "izhikevich"

[stimulus]
waveform = "constant"
amplitude = 10.0
"#,
    )?;

    let mut cmd = Command::cargo_bin("neurosim")?;
    cmd.args(["--out-dir", tmp.path().to_str().expect("utf8")])
        .args(["run", config.to_str().expect("utf8")]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("dt"));
    assert!(!tmp.path().join("bad.json").exists());
    Ok(())
}

#[test]
fn run_reports_missing_file() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("neurosim")?;
    cmd.args(["run", "does-not-exist.toml"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.toml"));
    Ok(())
}

#[test]
fn izhikevich_single_preset() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    let mut cmd = Command::cargo_bin("neurosim")?;
    cmd.args(["--out-dir", tmp.path().to_str().expect("utf8")])
        .args(["izhikevich", "--preset", "regular-spiking"]);
    cmd.assert().success();

    let trace = read_trace(&tmp.path().join("izhikevich-regular-spiking.json"))?;
    assert_eq!(trace.len(), 801);
    assert!(!trace.spike_times.is_empty());
    assert!(!tmp.path().join("izhikevich-chattering.json").exists());
    Ok(())
}

#[test]
fn lif_writes_one_trace_per_threshold() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    let mut cmd = Command::cargo_bin("neurosim")?;
    cmd.args(["--out-dir", tmp.path().to_str().expect("utf8")])
        .args(["lif", "--current", "0.1", "--threshold", "-60", "-20"]);
    cmd.assert().success();

    assert!(tmp.path().join("lif-i0.1-vth-60.json").exists());
    assert!(tmp.path().join("lif-i0.1-vth-20.json").exists());
    Ok(())
}

#[test]
fn if_curve_writes_three_curves() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    let mut cmd = Command::cargo_bin("neurosim")?;
    cmd.args(["--out-dir", tmp.path().to_str().expect("utf8")])
        .args(["if-curve", "--points", "5"]);
    cmd.assert().success();

    let json = fs::read_to_string(tmp.path().join("if-curve.json"))?;
    let curves: serde_json::Value = serde_json::from_str(&json)?;
    let curves = curves.as_array().expect("array of curves");
    assert_eq!(curves.len(), 3);
    assert_eq!(curves[0]["rates"][0], 0.0);
    Ok(())
}

#[test]
fn izhikevich_rejects_unknown_preset() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("neurosim")?;
    cmd.args(["izhikevich", "--preset", "fast"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("fast-spiking"));
    Ok(())
}
