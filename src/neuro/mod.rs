pub mod error;
pub mod gate;
pub mod hodgkin_huxley;
pub mod izhikevich;
pub mod lif;
pub mod neuron;
pub mod rates;
pub mod simulation;
pub mod stimuli;
