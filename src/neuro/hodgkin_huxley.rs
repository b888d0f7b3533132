//! Conductance-based Hodgkin-Huxley neuron.
//!
//! ```text
//! Cm dV/dt = I - gNa m³h (V - ENa) - gK n⁴ (V - EK) - gLeak (V - ELeak)
//! ```
//!
//! Voltages use the original 0 mV resting convention.

use serde::{Deserialize, Serialize};

use crate::neuro::{
    error::{Result, ensure_finite, ensure_non_negative, ensure_positive},
    gate::Gate,
    neuron::{NeuronModel, Observables},
    rates::{h_rates, m_rates, n_rates},
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HodgkinHuxleyParams {
    pub v0: f64,
    pub e_na: f64,
    pub e_k: f64,
    pub e_leak: f64,
    pub g_na: f64,
    pub g_k: f64,
    pub g_leak: f64,
    pub c_m: f64,
}

impl Default for HodgkinHuxleyParams {
    fn default() -> Self {
        Self {
            v0: 0.0,      // Starting membrane potential, relative to rest (mV)
            e_na: 115.0,  // Sodium reversal potential (mV)
            e_k: -12.0,   // Potassium reversal potential (mV)
            e_leak: 10.6, // Leak reversal potential (mV)
            g_na: 120.0,  // Maximal sodium conductance (mS/cm²)
            g_k: 36.0,    // Maximal potassium conductance (mS/cm²)
            g_leak: 0.3,  // Leak conductance (mS/cm²)
            c_m: 1.0,     // Membrane capacitance (µF/cm²)
        }
    }
}

impl HodgkinHuxleyParams {
    pub fn validate(&self) -> Result<()> {
        ensure_finite("v0", self.v0)?;
        ensure_finite("e_na", self.e_na)?;
        ensure_finite("e_k", self.e_k)?;
        ensure_finite("e_leak", self.e_leak)?;
        ensure_non_negative("g_na", self.g_na)?;
        ensure_non_negative("g_k", self.g_k)?;
        ensure_non_negative("g_leak", self.g_leak)?;
        ensure_positive("c_m", self.c_m)?;
        Ok(())
    }
}

/// Ionic currents of one step, in µA/cm².
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Currents {
    pub i_na: f64,
    pub i_k: f64,
    pub i_leak: f64,
    pub i_sum: f64,
}

#[derive(Clone, Debug)]
pub struct HodgkinHuxleyNeuron {
    pub params: HodgkinHuxleyParams,
    pub v: f64,
    pub m: Gate,
    pub h: Gate,
    pub n: Gate,
    pub currents: Currents,
}

impl HodgkinHuxleyNeuron {
    pub fn new(params: HodgkinHuxleyParams) -> Result<Self> {
        params.validate()?;

        let mut neuron = Self {
            params,
            v: params.v0,
            m: Gate::default(),
            h: Gate::default(),
            n: Gate::default(),
            currents: Currents::default(),
        };
        neuron.initialize();

        Ok(neuron)
    }

    fn initialize(&mut self) {
        self.v = self.params.v0;
        self.currents = Currents::default();
        self.update_gate_rates();
        self.m.set_steady_state();
        self.h.set_steady_state();
        self.n.set_steady_state();
    }

    fn update_gate_rates(&mut self) {
        self.n.set_rates(n_rates(self.v));
        self.m.set_rates(m_rates(self.v));
        self.h.set_rates(h_rates(self.v));
    }

    /// Currents for the present `(v, m, h, n)` and a stimulus.
    pub fn ionic_currents(&self, stimulus: f64) -> Currents {
        let p = &self.params;
        let i_na = self.m.state.powi(3) * p.g_na * self.h.state * (self.v - p.e_na);
        let i_k = self.n.state.powi(4) * p.g_k * (self.v - p.e_k);
        let i_leak = p.g_leak * (self.v - p.e_leak);

        Currents {
            i_na,
            i_k,
            i_leak,
            i_sum: stimulus - i_na - i_k - i_leak,
        }
    }

    fn observe(&self) -> Observables {
        Observables::HodgkinHuxley {
            v: self.v,
            m: self.m.state,
            h: self.h.state,
            n: self.n.state,
            i_na: self.currents.i_na,
            i_k: self.currents.i_k,
            i_leak: self.currents.i_leak,
            i_sum: self.currents.i_sum,
        }
    }
}

impl NeuronModel for HodgkinHuxleyNeuron {
    fn advance(&mut self, stimulus: f64, dt: f64) -> Observables {
        // Rates and currents both see the pre-step voltage.
        self.update_gate_rates();

        self.currents = self.ionic_currents(stimulus);
        self.v += dt * self.currents.i_sum / self.params.c_m;

        self.n.advance(dt);
        self.m.advance(dt);
        self.h.advance(dt);

        self.observe()
    }

    fn reset(&mut self) {
        self.initialize();
    }

    fn voltage(&self) -> f64 {
        self.v
    }
}
