use std::ops::Deref;

use log::{debug, info};

use crate::errors::{Error, Result};
use crate::simulator::gbm::PathGenerator;
use crate::simulator::random::RandomSource;

/// Inputs of one generation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    pub initial_price: f64,
    pub volatility_pct: f64,
    pub drift_pct: f64,
    pub steps: usize,
    pub path_count: usize,
}

impl SimulationParameters {
    /// Validated constructor. Drift may be negative.
    pub fn new(
        initial_price: f64,
        volatility_pct: f64,
        drift_pct: f64,
        steps: usize,
        path_count: usize,
    ) -> Result<Self> {
        if !initial_price.is_finite() || initial_price <= 0.0 {
            return Err(Error::invalid(
                "initial_price",
                format!("must be a finite value greater than 0, got {initial_price}"),
            ));
        }
        if !volatility_pct.is_finite() || volatility_pct < 0.0 {
            return Err(Error::invalid(
                "volatility_pct",
                format!("must be a finite value of at least 0, got {volatility_pct}"),
            ));
        }
        if !drift_pct.is_finite() {
            return Err(Error::invalid(
                "drift_pct",
                format!("must be finite, got {drift_pct}"),
            ));
        }
        let params = Self {
            initial_price,
            volatility_pct,
            drift_pct,
            steps,
            path_count,
        };
        params.check_counts()?;
        Ok(params)
    }

    fn check_counts(&self) -> Result<()> {
        if self.steps < 1 {
            return Err(Error::invalid("steps", "at least one step is required"));
        }
        if self.path_count < 1 {
            return Err(Error::invalid("path_count", "at least one path is required"));
        }
        Ok(())
    }
}

/// One simulated price trajectory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricePath(Vec<f64>);

impl PricePath {
    pub fn values(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for PricePath {
    fn from(prices: Vec<f64>) -> Self {
        Self(prices)
    }
}

impl Deref for PricePath {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

/// Paths in generation order. Order decides color assignment when drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricePathSet {
    paths: Vec<PricePath>,
}

impl PricePathSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            paths: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, path: PricePath) {
        self.paths.push(path);
    }

    pub fn paths(&self) -> &[PricePath] {
        &self.paths
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PricePath> {
        self.paths.iter()
    }

    pub fn first(&self) -> Option<&PricePath> {
        self.paths.first()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Smallest and largest value over every path, `None` when there are no values.
    pub fn extremes(&self) -> Option<(f64, f64)> {
        self.paths
            .iter()
            .flat_map(|path| path.iter().copied())
            .fold(None, |acc, value| match acc {
                None => Some((value, value)),
                Some((min, max)) => Some((min.min(value), max.max(value))),
            })
    }
}

impl From<Vec<PricePath>> for PricePathSet {
    fn from(paths: Vec<PricePath>) -> Self {
        Self { paths }
    }
}

impl From<Vec<Vec<f64>>> for PricePathSet {
    fn from(paths: Vec<Vec<f64>>) -> Self {
        Self {
            paths: paths.into_iter().map(PricePath::from).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PricePathSet {
    type Item = &'a PricePath;
    type IntoIter = std::slice::Iter<'a, PricePath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Runs the path generator once per requested path, sequentially, on a
/// single random stream.
#[derive(Debug, Clone)]
pub struct SimulationEngine<R> {
    generator: PathGenerator,
    rng: R,
}

impl<R: RandomSource> SimulationEngine<R> {
    pub fn new(rng: R) -> Self {
        Self {
            generator: PathGenerator,
            rng,
        }
    }

    pub fn run(&mut self, params: &SimulationParameters) -> Result<PricePathSet> {
        self.run_with(params, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_path` with the index of every finished path.
    pub fn run_with<F: FnMut(usize)>(
        &mut self,
        params: &SimulationParameters,
        mut on_path: F,
    ) -> Result<PricePathSet> {
        params.check_counts()?;
        info!(
            "Generating {} paths of {} steps from {} (volatility {}%, drift {}%)",
            params.path_count,
            params.steps,
            params.initial_price,
            params.volatility_pct,
            params.drift_pct
        );
        let mut set = PricePathSet::with_capacity(params.path_count);
        for i in 0..params.path_count {
            let path = self.generator.generate(params, &mut self.rng);
            debug!("path {i} ends at {:?}", path.last());
            set.push(path);
            on_path(i);
        }
        Ok(set)
    }
}
