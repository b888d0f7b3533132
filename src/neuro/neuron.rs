use serde::{Deserialize, Serialize};

use crate::neuro::{
    error::Result,
    hodgkin_huxley::{HodgkinHuxleyNeuron, HodgkinHuxleyParams},
    izhikevich::{IzhikevichNeuron, IzhikevichParams},
    lif::{LifNeuron, LifParams},
};

/// Capability shared by every single-neuron model.
pub trait NeuronModel {
    /// Integrates one step of `dt` ms under `stimulus` and returns what the
    /// trace records for that step.
    fn advance(&mut self, stimulus: f64, dt: f64) -> Observables;

    /// Returns to the state the model was constructed in.
    fn reset(&mut self);

    fn voltage(&self) -> f64;
}

/// Values recorded for one step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "kebab-case")]
pub enum Observables {
    HodgkinHuxley {
        v: f64,
        m: f64,
        h: f64,
        n: f64,
        i_na: f64,
        i_k: f64,
        i_leak: f64,
        i_sum: f64,
    },
    Lif {
        v: f64,
        spiked: bool,
    },
    Izhikevich {
        v: f64,
        u: f64,
        spiked: bool,
    },
}

impl Observables {
    pub fn voltage(&self) -> f64 {
        match *self {
            Observables::HodgkinHuxley { v, .. }
            | Observables::Lif { v, .. }
            | Observables::Izhikevich { v, .. } => v,
        }
    }

    /// Whether the step produced a discrete spike event. Hodgkin-Huxley spikes
    /// are emergent and never reported here.
    pub fn spiked(&self) -> bool {
        match *self {
            Observables::HodgkinHuxley { .. } => false,
            Observables::Lif { spiked, .. } | Observables::Izhikevich { spiked, .. } => spiked,
        }
    }
}

/// Model selection and constants, as read from an experiment file.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ModelConfig {
    HodgkinHuxley(HodgkinHuxleyParams),
    Lif(LifParams),
    Izhikevich(IzhikevichParams),
}

impl ModelConfig {
    pub fn name(&self) -> &'static str {
        match self {
            ModelConfig::HodgkinHuxley(_) => "hodgkin-huxley",
            ModelConfig::Lif(_) => "lif",
            ModelConfig::Izhikevich(_) => "izhikevich",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            ModelConfig::HodgkinHuxley(params) => params.validate(),
            ModelConfig::Lif(params) => params.validate(),
            ModelConfig::Izhikevich(params) => params.validate(),
        }
    }

    pub fn build(&self) -> Result<Neuron> {
        Ok(match *self {
            ModelConfig::HodgkinHuxley(params) => {
                Neuron::HodgkinHuxley(HodgkinHuxleyNeuron::new(params)?)
            }
            ModelConfig::Lif(params) => Neuron::Lif(LifNeuron::new(params)?),
            ModelConfig::Izhikevich(params) => Neuron::Izhikevich(IzhikevichNeuron::new(params)?),
        })
    }
}

/// One neuron of any supported model.
#[derive(Clone, Debug)]
pub enum Neuron {
    HodgkinHuxley(HodgkinHuxleyNeuron),
    Lif(LifNeuron),
    Izhikevich(IzhikevichNeuron),
}

impl NeuronModel for Neuron {
    fn advance(&mut self, stimulus: f64, dt: f64) -> Observables {
        match self {
            Neuron::HodgkinHuxley(neuron) => neuron.advance(stimulus, dt),
            Neuron::Lif(neuron) => neuron.advance(stimulus, dt),
            Neuron::Izhikevich(neuron) => neuron.advance(stimulus, dt),
        }
    }

    fn reset(&mut self) {
        match self {
            Neuron::HodgkinHuxley(neuron) => neuron.reset(),
            Neuron::Lif(neuron) => neuron.reset(),
            Neuron::Izhikevich(neuron) => neuron.reset(),
        }
    }

    fn voltage(&self) -> f64 {
        match self {
            Neuron::HodgkinHuxley(neuron) => neuron.voltage(),
            Neuron::Lif(neuron) => neuron.voltage(),
            Neuron::Izhikevich(neuron) => neuron.voltage(),
        }
    }
}
