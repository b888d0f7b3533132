use serde::{Deserialize, Serialize};

use crate::neuro::rates::Rates;

/// Open probability of one ion-channel gate and its current rate constants.
///
/// `state` is not clamped; it stays in `[0, 1]` as long as `dt * (alpha + beta)
/// <= 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub alpha: f64,
    pub beta: f64,
    pub state: f64,
}

impl Gate {
    pub fn set_rates(&mut self, (alpha, beta): Rates) {
        self.alpha = alpha;
        self.beta = beta;
    }

    /// Forward-Euler step of `ds/dt = alpha (1 - s) - beta s`.
    pub fn advance(&mut self, dt: f64) {
        let opening = self.alpha * (1.0 - self.state);
        let closing = self.beta * self.state;
        self.state += dt * (opening - closing);
    }

    pub fn set_steady_state(&mut self) {
        self.state = self.steady_state();
    }

    pub fn steady_state(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Relaxation time constant `1 / (alpha + beta)` in ms.
    pub fn time_constant(&self) -> f64 {
        1.0 / (self.alpha + self.beta)
    }
}
