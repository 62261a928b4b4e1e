use anyhow::{Error, Result};
use csv::Writer;
use gbm_chart::{
    draw_records, path_records, AppConfig, ChartRenderer, ChartState, SimulationEngine,
    StdRandomSource,
};
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

    let rng = config
        .seed
        .map_or_else(StdRandomSource::from_entropy, StdRandomSource::from_seed);
    let mut engine = SimulationEngine::new(rng);
    let mut state = ChartState::new();

    let bar = ProgressBar::new(config.params.path_count as u64);
    let set = state.replace(engine.run_with(&config.params, |_| bar.inc(1))?);
    bar.finish();

    let mut wtr = Writer::from_path(config.output_dir.join("paths.csv"))?;
    for record in path_records(&set) {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    let renderer = ChartRenderer::default();
    let primitives = state.render(&renderer, config.viewport);
    let mut wtr = Writer::from_path(config.output_dir.join("chart.csv"))?;
    for primitive in &primitives {
        for record in draw_records(&renderer, primitive) {
            wtr.serialize(record)?;
        }
    }
    wtr.flush()?;
    info!(
        "Saved {} paths and {} primitives in {}",
        set.len(),
        primitives.len(),
        config.output_dir.display()
    );
    Ok(())
}
