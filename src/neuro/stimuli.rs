use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::neuro::error::{Result, SimError};

/// A rectangular block of current on steps `[start, stop)`; `stop = None` runs
/// to the end of the trace.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    pub amplitude: f64,
    pub start: usize,
    #[serde(default)]
    pub stop: Option<usize>,
}

impl Pulse {
    pub fn new(amplitude: f64, start: usize, stop: Option<usize>) -> Self {
        Self {
            amplitude,
            start,
            stop,
        }
    }

    fn window(&self, steps: usize) -> Result<std::ops::Range<usize>> {
        if !self.amplitude.is_finite() {
            return Err(SimError::invalid_stimulus(format!(
                "amplitude {} is not finite",
                self.amplitude
            )));
        }
        if let Some(stop) = self.stop.filter(|&stop| self.start > stop) {
            return Err(SimError::invalid_stimulus(format!(
                "start {} is after stop {}",
                self.start, stop
            )));
        }

        let start = self.start.min(steps);
        let stop = self.stop.unwrap_or(steps).min(steps).max(start);
        Ok(start..stop)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "waveform", rename_all = "kebab-case")]
pub enum StimulusWaveform {
    Constant {
        amplitude: f64,
    },

    Step {
        amplitude: f64,
        start: usize,
        #[serde(default)]
        stop: Option<usize>,
    },

    /// Applied in order; a later pulse overwrites an earlier one where they overlap.
    Pulses {
        pulses: Vec<Pulse>,
    },

    /// Symmetric triangular window spanning the whole run, peaking at `amplitude`.
    Triangular {
        amplitude: f64,
    },

    /// Zero before `start`, linear up to `amplitude` at `stop`, held afterwards.
    Ramp {
        amplitude: f64,
        start: usize,
        stop: usize,
    },

    /// Uniform noise in `mean ± amplitude`, reproducible from `seed`.
    Noise {
        mean: f64,
        amplitude: f64,
        seed: u64,
    },
}

impl StimulusWaveform {
    pub fn generate(&self, steps: usize) -> Result<StimulusTrace> {
        let values = match self {
            StimulusWaveform::Constant { amplitude } => {
                ensure_finite_amplitude(*amplitude)?;
                vec![*amplitude; steps]
            }
            StimulusWaveform::Step {
                amplitude,
                start,
                stop,
            } => pulses(&[Pulse::new(*amplitude, *start, *stop)], steps)?,
            StimulusWaveform::Pulses { pulses: list } => pulses(list, steps)?,
            StimulusWaveform::Triangular { amplitude } => {
                ensure_finite_amplitude(*amplitude)?;
                triangular_window(steps)
                    .into_iter()
                    .map(|w| amplitude * w)
                    .collect()
            }
            StimulusWaveform::Ramp {
                amplitude,
                start,
                stop,
            } => {
                ensure_finite_amplitude(*amplitude)?;
                if start >= stop {
                    return Err(SimError::invalid_stimulus(format!(
                        "ramp start {start} must be before stop {stop}"
                    )));
                }
                let span = (stop - start) as f64;
                (0..steps)
                    .map(|i| {
                        if i < *start {
                            0.0
                        } else if i < *stop {
                            amplitude * (i - start) as f64 / span
                        } else {
                            *amplitude
                        }
                    })
                    .collect()
            }
            StimulusWaveform::Noise {
                mean,
                amplitude,
                seed,
            } => {
                ensure_finite_amplitude(*mean)?;
                ensure_finite_amplitude(*amplitude)?;
                if *amplitude < 0.0 {
                    return Err(SimError::invalid_stimulus(format!(
                        "noise amplitude {amplitude} must be >= 0"
                    )));
                }
                let mut rng = StdRng::seed_from_u64(*seed);
                (0..steps)
                    .map(|_| {
                        let u: f64 = rng.random();
                        mean + amplitude * (2.0 * u - 1.0)
                    })
                    .collect()
            }
        };

        Ok(values.into())
    }
}

fn ensure_finite_amplitude(amplitude: f64) -> Result<()> {
    if amplitude.is_finite() {
        Ok(())
    } else {
        Err(SimError::invalid_stimulus(format!(
            "amplitude {amplitude} is not finite"
        )))
    }
}

fn pulses(list: &[Pulse], steps: usize) -> Result<Vec<f64>> {
    let mut values = vec![0.0; steps];
    for pulse in list {
        let window = pulse.window(steps)?;
        values[window].fill(pulse.amplitude);
    }
    Ok(values)
}

/// Triangular window of length `len` with non-zero end points, peak 1 in the
/// middle.
pub fn triangular_window(len: usize) -> Vec<f64> {
    let half = len.div_ceil(2);
    let rising: Vec<f64> = if len % 2 == 0 {
        (1..=half)
            .map(|n| (2 * n - 1) as f64 / len as f64)
            .collect()
    } else {
        (1..=half)
            .map(|n| 2.0 * n as f64 / (len + 1) as f64)
            .collect()
    };

    let mirrored = if len % 2 == 0 { half } else { half - 1 };
    let mut window = rising.clone();
    window.extend(rising[..mirrored].iter().rev());
    window
}

/// Per-step input current, fixed once generated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StimulusTrace(Vec<f64>);

impl StimulusTrace {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<f64>> for StimulusTrace {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}
