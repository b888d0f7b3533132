//! Single-neuron simulator.
//!
//! - [`neuro`]: the numerical core. Hodgkin-Huxley, leaky integrate-and-fire and
//!   Izhikevich models behind one [`neuro::neuron::NeuronModel`] trait, the
//!   stimulus generator and the fixed-step driver. No I/O.
//! - [`experiment`]: experiment records (TOML), built-in experiments and the
//!   Izhikevich preset table.
//! - [`plot`]: plotly HTML rendering of finished traces.
//! - [`cli`] / [`commands`]: the `neurosim` binary's argument parsing and
//!   command bodies, exposed so they can be driven from tests.

pub mod cli;
pub mod commands;
pub mod experiment;
pub mod neuro;
pub mod plot;
