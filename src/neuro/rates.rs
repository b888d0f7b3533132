//! Hodgkin-Huxley gate rate functions.
//!
//! Voltages are in mV relative to rest (0 mV resting convention), rates in 1/ms.

/// `(alpha, beta)` pair for one gate at one voltage.
pub type Rates = (f64, f64);

const SINGULAR_WIDTH: f64 = 1e-6;

/// `x / (exp(x / k) - 1)` with its removable singularity at `x = 0` replaced by
/// the series `k * (1 - x / 2k)`.
pub fn vtrap(x: f64, k: f64) -> f64 {
    let u = x / k;
    if u.abs() < SINGULAR_WIDTH {
        k * (1.0 - u / 2.0)
    } else {
        x / u.exp_m1()
    }
}

/// Potassium activation `n`.
pub fn n_rates(v: f64) -> Rates {
    let alpha = 0.01 * vtrap(10.0 - v, 10.0);
    let beta = 0.125 * (-v / 80.0).exp();
    (alpha, beta)
}

/// Sodium activation `m`.
pub fn m_rates(v: f64) -> Rates {
    let alpha = 0.1 * vtrap(25.0 - v, 10.0);
    let beta = 4.0 * (-v / 18.0).exp();
    (alpha, beta)
}

/// Sodium inactivation `h`.
pub fn h_rates(v: f64) -> Rates {
    let alpha = 0.07 * (-v / 20.0).exp();
    let beta = 1.0 / (((30.0 - v) / 10.0).exp() + 1.0);
    (alpha, beta)
}
