use std::f64::consts::PI;

use crate::simulator::engine::{PricePath, SimulationParameters};
use crate::simulator::random::RandomSource;

/// Standard normal deviate from two uniform samples.
///
/// `u1` must lie in `(0, 1]`; `u2` may be any value in `[0, 1]`.
#[inline]
pub fn box_muller(u1: f64, u2: f64) -> f64 {
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Generate geometric brownian motion
/// S(i) — Asset price at step i, S(0) is the initial price
/// µ — Drift per step, in percent
/// σ — Volatility per step, in percent
/// Z — Standard normal deviate drawn with [`box_muller`]
///
/// S(i) = S(i-1) · exp(µ/100 + σ/100 · Z)
#[derive(Debug, Default, Clone, Copy)]
pub struct PathGenerator;

impl PathGenerator {
    /// Builds one path of exactly `params.steps` prices. Always succeeds;
    /// range checks belong to the caller.
    pub fn generate<R: RandomSource>(
        &self,
        params: &SimulationParameters,
        mut rng: R,
    ) -> PricePath {
        let mean = params.drift_pct / 100.0;
        let sigma = params.volatility_pct / 100.0;
        let mut prices = Vec::<f64>::with_capacity(params.steps);
        prices.push(params.initial_price);
        let mut current_price = params.initial_price;
        for _ in 1..params.steps {
            let u1 = rng.next_uniform();
            let u2 = rng.next_uniform();
            let z = box_muller(u1, u2);
            current_price *= (mean + sigma * z).exp();
            prices.push(current_price);
        }
        PricePath::from(prices)
    }
}
