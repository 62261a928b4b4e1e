use anyhow::{Error, Result};
use csv::Writer;
use gbm_chart::{path_records, AppConfig, SimulationEngine, StdRandomSource};
use indicatif::ProgressBar;
use log::{info, LevelFilter};
use std::fs;

fn main() -> Result<(), Error> {
    let mut logger = pretty_env_logger::formatted_timed_builder();
    logger.filter_level(LevelFilter::Info);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }
    logger.init();

    let config = AppConfig::from_env()?;
    fs::create_dir_all(&config.output_dir)?;

    let rng = match config.seed {
        Some(seed) => StdRandomSource::from_seed(seed),
        None => StdRandomSource::from_entropy(),
    };
    let mut engine = SimulationEngine::new(rng);

    let bar = ProgressBar::new(config.params.path_count as u64);
    let set = engine.run_with(&config.params, |_| bar.inc(1))?;
    bar.finish();

    let path = config.output_dir.join("paths.csv");
    info!("Saving {} simulated paths in {}", set.len(), path.display());
    let mut wtr = Writer::from_path(&path)?;
    for record in path_records(&set) {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
