//! Leaky integrate-and-fire neuron.
//!
//! Sub-threshold dynamics are linear, so each step uses the exact exponential
//! update `V(t + dt) = uinf + (V(t) - uinf) exp(-dt / tau)` with
//! `uinf = vRest + Rm I` and `tau = Rm Cm`.

use serde::{Deserialize, Serialize};

use crate::neuro::{
    error::{Result, ensure_finite, ensure_non_negative, ensure_positive},
    neuron::{NeuronModel, Observables},
};

/// kΩ · mA = V, expressed in mV.
const MV_PER_KOHM_MA: f64 = 1e3;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifParams {
    pub r_m: f64,
    pub c_m: f64,
    pub v_rest: f64,
    pub v_threshold: f64,
    pub v_spike: f64,
    pub tau_ref: f64,
    pub t_init: f64,
}

impl Default for LifParams {
    fn default() -> Self {
        Self {
            r_m: 1.0,           // Membrane resistance (kΩ)
            c_m: 5.0,           // Membrane capacitance (µF)
            v_rest: -70.0,      // Resting potential (mV)
            v_threshold: -40.0, // Spike threshold (mV)
            v_spike: 50.0,      // Voltage recorded at a spike (mV)
            tau_ref: 1.0,       // Refractory period (ms)
            t_init: 0.0,        // Stimulus onset; steps up to here are held (ms)
        }
    }
}

impl LifParams {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("r_m", self.r_m)?;
        ensure_positive("c_m", self.c_m)?;
        ensure_finite("v_rest", self.v_rest)?;
        ensure_finite("v_threshold", self.v_threshold)?;
        ensure_finite("v_spike", self.v_spike)?;
        ensure_non_negative("tau_ref", self.tau_ref)?;
        ensure_non_negative("t_init", self.t_init)?;
        Ok(())
    }

    /// Membrane time constant in ms (kΩ · µF).
    pub fn tau_m(&self) -> f64 {
        self.r_m * self.c_m
    }

    /// Voltage the membrane relaxes to under a constant current (mA).
    pub fn steady_state_voltage(&self, current: f64) -> f64 {
        self.v_rest + self.r_m * current * MV_PER_KOHM_MA
    }
}

#[derive(Clone, Debug)]
pub struct LifNeuron {
    pub params: LifParams,
    /// Voltage of the step about to be processed (mV)
    pub v: f64,
    pub last_spike_time: Option<f64>,
    /// Steps at `t <= refractory_until` skip the update (ms)
    pub refractory_until: f64,
    step: u64,
}

impl LifNeuron {
    pub fn new(params: LifParams) -> Result<Self> {
        params.validate()?;

        Ok(Self {
            params,
            v: params.v_rest,
            last_spike_time: None,
            refractory_until: params.t_init,
            step: 0,
        })
    }

    pub fn is_refractory(&self, t: f64) -> bool {
        t <= self.refractory_until
    }
}

impl NeuronModel for LifNeuron {
    fn advance(&mut self, stimulus: f64, dt: f64) -> Observables {
        let t = self.step as f64 * dt;
        self.step += 1;

        if self.is_refractory(t) {
            let recorded = self.v;
            self.v = self.params.v_rest;
            return Observables::Lif {
                v: recorded,
                spiked: false,
            };
        }

        let uinf = self.params.steady_state_voltage(stimulus);
        let next = uinf + (self.v - uinf) * (-dt / self.params.tau_m()).exp();

        // The threshold test reads this step's voltage; the update above
        // already went to the next step, so a spike only pins what is recorded.
        let spiked = self.v >= self.params.v_threshold;
        let recorded = if spiked {
            self.last_spike_time = Some(t);
            self.refractory_until = t + self.params.tau_ref;
            self.params.v_spike
        } else {
            self.v
        };

        self.v = next;

        Observables::Lif {
            v: recorded,
            spiked,
        }
    }

    fn reset(&mut self) {
        self.v = self.params.v_rest;
        self.last_spike_time = None;
        self.refractory_until = self.params.t_init;
        self.step = 0;
    }

    fn voltage(&self) -> f64 {
        self.v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(neuron: &mut LifNeuron, current: f64, steps: usize, dt: f64) -> Vec<Observables> {
        (0..steps).map(|_| neuron.advance(current, dt)).collect()
    }

    #[test]
    fn test_params_validation() {
        assert!(LifParams::default().validate().is_ok());

        let params = LifParams {
            v_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = LifParams {
            tau_ref: -1.0,
            ..Default::default()
        };
        assert!(LifNeuron::new(params).is_err());

        let params = LifParams {
            r_m: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_units() {
        let params = LifParams::default();
        assert_eq!(params.tau_m(), 5.0);
        assert!((params.steady_state_voltage(0.2) - 130.0).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_below_rest_fires_once_unlocked() {
        let params = LifParams {
            v_threshold: -80.0,
            ..Default::default()
        };
        let mut neuron = LifNeuron::new(params).unwrap();
        let samples = drive(&mut neuron, 0.0, 3, 0.1);

        assert!(!samples[0].spiked());
        assert_eq!(samples[0].voltage(), params.v_rest);
        assert!(samples[1].spiked());
        assert_eq!(samples[1].voltage(), params.v_spike);
        assert_eq!(neuron.last_spike_time, Some(0.1));
        assert!(!samples[2].spiked());
    }

    #[test]
    fn test_first_step_held_until_onset() {
        let mut neuron = LifNeuron::new(LifParams::default()).unwrap();
        let samples = drive(&mut neuron, 0.2, 2, 0.1);
        assert_eq!(samples[0].voltage(), -70.0);
        assert_eq!(samples[1].voltage(), -70.0);
        assert!(neuron.voltage() > -70.0);
    }

    #[test]
    fn test_no_current_stays_at_rest() {
        let mut neuron = LifNeuron::new(LifParams::default()).unwrap();
        let samples = drive(&mut neuron, 0.0, 500, 0.1);
        assert!(samples.iter().all(|s| !s.spiked()));
        assert!(samples.iter().all(|s| s.voltage() == -70.0));
    }

    #[test]
    fn test_exact_exponential_relaxation() {
        let params = LifParams::default();
        let mut neuron = LifNeuron::new(params).unwrap();
        let current = 0.01; // uinf = -60 mV, below threshold
        let dt = 0.1;
        drive(&mut neuron, current, 101, dt);

        // 100 updates after the held onset step
        let uinf = params.steady_state_voltage(current);
        let expected = uinf + (params.v_rest - uinf) * (-100.0 * dt / params.tau_m()).exp();
        assert!((neuron.voltage() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_spike_pins_checked_step_and_locks_out() {
        let params = LifParams::default();
        let dt = 0.1;
        let mut neuron = LifNeuron::new(params).unwrap();
        let samples = drive(&mut neuron, 1.0, 60, dt);

        let first = samples.iter().position(|s| s.spiked()).unwrap();
        assert_eq!(samples[first].voltage(), params.v_spike);
        assert!(samples[first - 1].voltage() < params.v_threshold);

        // The step right after a spike carries the value computed before the
        // pin; the rest of the window sits at v_rest.
        assert!(samples[first + 1].voltage() > params.v_threshold);
        assert_eq!(samples[first + 2].voltage(), params.v_rest);

        let lockout = (params.tau_ref / dt).round() as usize;
        for sample in &samples[first + 1..first + lockout] {
            assert!(!sample.spiked());
        }
        assert_eq!(neuron.last_spike_time.map(|t| t > 0.0), Some(true));
    }

    #[test]
    fn test_reset() {
        let mut neuron = LifNeuron::new(LifParams::default()).unwrap();
        drive(&mut neuron, 1.0, 100, 0.1);
        neuron.reset();
        assert_eq!(neuron.voltage(), -70.0);
        assert_eq!(neuron.last_spike_time, None);
        assert_eq!(neuron.refractory_until, 0.0);
    }
}
