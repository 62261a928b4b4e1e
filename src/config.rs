use std::path::PathBuf;
use std::str::FromStr;

use crate::chart::models::Viewport;
use crate::errors::{Error, Result};
use crate::simulator::engine::SimulationParameters;

/// Settings for the command line tools, read from the environment and `.env`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub params: SimulationParameters,
    pub seed: Option<u64>,
    pub viewport: Viewport,
    pub output_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        let initial_price = parse_or(&lookup, "GBM_INITIAL_PRICE", 100.0)?;
        let volatility_pct = parse_or(&lookup, "GBM_VOLATILITY_PCT", 1.0)?;
        let drift_pct = parse_or(&lookup, "GBM_DRIFT_PCT", 0.0)?;
        let steps = parse_or(&lookup, "GBM_STEPS", 252)?;
        let path_count = parse_or(&lookup, "GBM_PATHS", 5)?;
        let params =
            SimulationParameters::new(initial_price, volatility_pct, drift_pct, steps, path_count)?;

        let seed = match lookup("GBM_SEED") {
            Some(raw) => Some(parse("GBM_SEED", &raw)?),
            None => None,
        };
        let viewport = Viewport::new(
            parse_or(&lookup, "CHART_WIDTH", 800.0)?,
            parse_or(&lookup, "CHART_HEIGHT", 600.0)?,
        );
        let output_dir =
            PathBuf::from(lookup("GBM_OUTPUT_DIR").unwrap_or_else(|| "./simulations".to_string()));

        Ok(Self {
            params,
            seed,
            viewport,
            output_dir,
        })
    }
}

fn parse<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| Error::Config(format!("{key}: {e}")))
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => parse(key, &raw),
        None => Ok(default),
    }
}
