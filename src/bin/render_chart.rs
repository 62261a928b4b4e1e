use anyhow::{Error, Result};
use csv::Writer;
use gbm_chart::{draw_records, paths_from_records, AppConfig, ChartRenderer, PathRecord};
use log::{info, warn, LevelFilter};
use std::time::Instant;

fn main() -> Result<(), Error> {
    let mut logger = pretty_env_logger::formatted_timed_builder();
    logger.filter_level(LevelFilter::Info);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }
    logger.init();

    let config = AppConfig::from_env()?;

    let reader_path = config.output_dir.join("paths.csv");
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(&reader_path)?;
    let records = rdr
        .deserialize::<PathRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    let set = paths_from_records(records)?;
    info!("Loaded {} paths from {}", set.len(), reader_path.display());

    let renderer = ChartRenderer::default();
    let begin = Instant::now();
    let primitives = renderer.render(&set, config.viewport);
    let elapsed = begin.elapsed().as_micros();
    if primitives.is_empty() {
        warn!("No path has two samples, the chart is empty");
    }
    info!("Rendered {} primitives in {elapsed}us", primitives.len());

    let chart_path = config.output_dir.join("chart.csv");
    let mut wtr = Writer::from_path(&chart_path)?;
    for primitive in &primitives {
        for record in draw_records(&renderer, primitive) {
            wtr.serialize(record)?;
        }
    }
    wtr.flush()?;
    info!("Saved draw records in {}", chart_path.display());
    Ok(())
}
