//! Izhikevich two-variable spiking neuron.
//!
//! ```text
//! dv/dt = 0.04 v² + 5 v + 140 - u + I
//! du/dt = a (b v - u)
//! if v > 30 mV: v <- c, u <- u + d
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::neuro::{
    error::{Result, SimError, ensure_finite, ensure_positive},
    neuron::{NeuronModel, Observables},
    stimuli::{Pulse, StimulusWaveform},
};

/// Spike threshold and the marker recorded for a spike with [`SpikeRecording::Peak`] (mV).
pub const SPIKE_PEAK: f64 = 30.0;

/// What the trace shows on the step a reset fires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpikeRecording {
    /// The spike peak marker, so the plotted trace shows the action potential
    #[default]
    Peak,
    /// The post-reset voltage, used for the resonator regime
    Raw,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IzhikevichParams {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub v0: f64,
    pub recording: SpikeRecording,
}

impl Default for IzhikevichParams {
    fn default() -> Self {
        IzhikevichPreset::RegularSpiking.params()
    }
}

impl IzhikevichParams {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("a", self.a)?;
        ensure_finite("b", self.b)?;
        ensure_finite("c", self.c)?;
        ensure_finite("d", self.d)?;
        ensure_finite("v0", self.v0)?;
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct IzhikevichNeuron {
    pub params: IzhikevichParams,
    pub v: f64,
    pub u: f64,
}

impl IzhikevichNeuron {
    pub fn new(params: IzhikevichParams) -> Result<Self> {
        params.validate()?;

        Ok(Self {
            params,
            v: params.v0,
            u: params.b * params.v0,
        })
    }
}

impl NeuronModel for IzhikevichNeuron {
    fn advance(&mut self, stimulus: f64, dt: f64) -> Observables {
        let IzhikevichParams { a, b, c, d, .. } = self.params;

        self.v += dt * (0.04 * self.v * self.v + 5.0 * self.v + 140.0 - self.u + stimulus);
        self.u += dt * a * (b * self.v - self.u);

        let spiked = self.v > SPIKE_PEAK;
        if spiked {
            self.v = c;
            self.u += d;
        }

        let v = match (spiked, self.params.recording) {
            (true, SpikeRecording::Peak) => SPIKE_PEAK,
            _ => self.v,
        };

        Observables::Izhikevich {
            v,
            u: self.u,
            spiked,
        }
    }

    fn reset(&mut self) {
        self.v = self.params.v0;
        self.u = self.params.b * self.params.v0;
    }

    fn voltage(&self) -> f64 {
        self.v
    }
}

/// Named firing regimes, each a fixed `(a, b, c, d, v0)`, run length and drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IzhikevichPreset {
    RegularSpiking,
    Chattering,
    FastSpiking,
    IntrinsicallyBursting,
    LowThresholdSpiking,
    Resonator,
    ThalamoCorticalLeft,
    ThalamoCorticalRight,
}

impl IzhikevichPreset {
    pub const ALL: [IzhikevichPreset; 8] = [
        Self::RegularSpiking,
        Self::Chattering,
        Self::FastSpiking,
        Self::IntrinsicallyBursting,
        Self::LowThresholdSpiking,
        Self::Resonator,
        Self::ThalamoCorticalLeft,
        Self::ThalamoCorticalRight,
    ];

    /// Integration step shared by every preset (ms).
    pub const DT: f64 = 0.25;

    pub fn params(self) -> IzhikevichParams {
        let (a, b, c, d, v0) = match self {
            Self::RegularSpiking => (0.02, 0.2, -65.0, 8.0, -70.0),
            Self::Chattering => (0.02, 0.2, -50.0, 2.0, -70.0),
            Self::FastSpiking => (0.1, 0.2, -65.0, 2.0, -70.0),
            Self::IntrinsicallyBursting => (0.02, 0.2, -55.0, 4.0, -70.0),
            Self::LowThresholdSpiking => (0.02, 0.25, -65.0, 2.0, -70.0),
            Self::Resonator => (0.1, 0.26, -65.0, 2.0, -62.0),
            Self::ThalamoCorticalLeft => (0.02, 0.25, -65.0, 8.0, -63.0),
            Self::ThalamoCorticalRight => (0.02, 0.25, -65.0, 0.05, -87.0),
        };
        let recording = match self {
            Self::Resonator => SpikeRecording::Raw,
            _ => SpikeRecording::Peak,
        };

        IzhikevichParams {
            a,
            b,
            c,
            d,
            v0,
            recording,
        }
    }

    /// Simulated duration (ms).
    pub fn duration(self) -> f64 {
        match self {
            Self::ThalamoCorticalLeft | Self::ThalamoCorticalRight => 250.0,
            _ => 200.0,
        }
    }

    pub fn stimulus(self) -> StimulusWaveform {
        match self {
            Self::Resonator => StimulusWaveform::Pulses {
                pulses: vec![
                    Pulse::new(0.2, 20, None),
                    Pulse::new(1.0, 300, Some(321)),
                ],
            },
            Self::ThalamoCorticalLeft => StimulusWaveform::Step {
                amplitude: 15.0,
                start: 400,
                stop: None,
            },
            Self::ThalamoCorticalRight => StimulusWaveform::Step {
                amplitude: -15.0,
                start: 0,
                stop: Some(21),
            },
            _ => StimulusWaveform::Step {
                amplitude: 10.0,
                start: 20,
                stop: None,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::RegularSpiking => "Regular Spiking (RS)",
            Self::Chattering => "Chattering (CH)",
            Self::FastSpiking => "Fast Spiking (FS)",
            Self::IntrinsicallyBursting => "Intrinsically Bursting (IB)",
            Self::LowThresholdSpiking => "Low-Threshold Spiking (LTS)",
            Self::Resonator => "Resonator (RZ)",
            Self::ThalamoCorticalLeft => "Thalamo-Cortical Left Side (TC)",
            Self::ThalamoCorticalRight => "Thalamo-Cortical Right Side (TC)",
        }
    }

    /// Kebab-case identifier, matching the CLI and config spelling.
    pub fn slug(self) -> &'static str {
        match self {
            Self::RegularSpiking => "regular-spiking",
            Self::Chattering => "chattering",
            Self::FastSpiking => "fast-spiking",
            Self::IntrinsicallyBursting => "intrinsically-bursting",
            Self::LowThresholdSpiking => "low-threshold-spiking",
            Self::Resonator => "resonator",
            Self::ThalamoCorticalLeft => "thalamo-cortical-left",
            Self::ThalamoCorticalRight => "thalamo-cortical-right",
        }
    }
}

impl FromStr for IzhikevichPreset {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.slug() == s)
            .ok_or_else(|| SimError::invalid_parameter("preset", s, "a known preset name"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(params: IzhikevichParams, stimulus: &[f64], dt: f64) -> Vec<Observables> {
        let mut neuron = IzhikevichNeuron::new(params).unwrap();
        stimulus.iter().map(|&i| neuron.advance(i, dt)).collect()
    }

    fn step_drive(steps: usize, onset: usize, amplitude: f64) -> Vec<f64> {
        (0..steps)
            .map(|i| if i >= onset { amplitude } else { 0.0 })
            .collect()
    }

    #[test]
    fn test_initial_recovery() {
        let neuron = IzhikevichNeuron::new(IzhikevichPreset::RegularSpiking.params()).unwrap();
        assert_eq!(neuron.voltage(), -70.0);
        assert!((neuron.u - (-14.0)).abs() < 1e-12);
    }

    #[test]
    fn test_regular_spiking_resets() {
        let params = IzhikevichPreset::RegularSpiking.params();
        let samples = run(params, &step_drive(801, 20, 10.0), 0.25);

        let spikes: Vec<_> = samples.iter().filter(|s| s.spiked()).collect();
        assert!(!spikes.is_empty());
        for spike in spikes {
            assert_eq!(spike.voltage(), SPIKE_PEAK);
        }
        assert!(samples.iter().all(|s| s.voltage() <= SPIKE_PEAK));
    }

    #[test]
    fn test_raw_recording_keeps_reset_value() {
        let params = IzhikevichPreset::Resonator.params();
        assert_eq!(params.recording, SpikeRecording::Raw);

        let samples = run(params, &step_drive(801, 20, 10.0), 0.25);
        let spike = samples.iter().find(|s| s.spiked()).unwrap();
        assert_eq!(spike.voltage(), params.c);
    }

    #[test]
    fn test_reset_carries_recovery() {
        let params = IzhikevichPreset::RegularSpiking.params();
        let mut neuron = IzhikevichNeuron::new(params).unwrap();
        neuron.v = 29.0;
        let u_before = neuron.u;

        let sample = neuron.advance(0.0, 0.25);
        assert!(sample.spiked());
        assert_eq!(neuron.v, params.c);

        let v_peak = 29.0 + 0.25 * (0.04 * 29.0 * 29.0 + 5.0 * 29.0 + 140.0 - u_before);
        let relaxed = u_before + 0.25 * params.a * (params.b * v_peak - u_before);
        assert!((neuron.u - (relaxed + params.d)).abs() < 1e-9);
    }

    #[test]
    fn test_no_drive_no_spikes() {
        let samples = run(IzhikevichPreset::RegularSpiking.params(), &vec![0.0; 801], 0.25);
        assert!(samples.iter().all(|s| !s.spiked()));
    }

    #[test]
    fn test_presets_table() {
        for preset in IzhikevichPreset::ALL {
            assert!(preset.params().validate().is_ok(), "{}", preset.label());
            assert!(preset.duration() > 0.0);
        }
        assert_eq!(IzhikevichPreset::ThalamoCorticalRight.params().d, 0.05);
        assert_eq!(
            IzhikevichPreset::ALL
                .iter()
                .filter(|p| p.params().recording == SpikeRecording::Raw)
                .count(),
            1
        );
    }

    #[test]
    fn test_preset_from_slug() {
        for preset in IzhikevichPreset::ALL {
            assert_eq!(preset.slug().parse::<IzhikevichPreset>(), Ok(preset));
        }
        assert!("fast".parse::<IzhikevichPreset>().is_err());
    }

    #[test]
    fn test_invalid_params() {
        let params = IzhikevichParams {
            a: 0.0,
            ..Default::default()
        };
        assert!(IzhikevichNeuron::new(params).is_err());
    }
}
