pub mod chart;
pub mod config;
pub mod errors;
pub mod simulator;
pub mod state;

use serde::{Deserialize, Serialize};

pub use chart::mapper::{normalize, CoordinateMapper};
pub use chart::models::{
    AxisLabel, Color, DrawPrimitive, Margins, Orientation, PlotArea, Point, ValueRange, Viewport,
};
pub use chart::renderer::{ChartConfig, ChartRenderer, Stroke};
pub use config::AppConfig;
pub use errors::{Error, Result};
pub use simulator::engine::{PricePath, PricePathSet, SimulationEngine, SimulationParameters};
pub use simulator::gbm::{box_muller, PathGenerator};
pub use simulator::random::{RandomSource, ReplaySource, StdRandomSource};
pub use state::ChartState;

/// One price of one generated path, as stored in the paths CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathRecord {
    pub path: usize,
    pub step: usize,
    pub price: f64,
}

pub fn path_records(set: &PricePathSet) -> impl Iterator<Item = PathRecord> + '_ {
    set.iter().enumerate().flat_map(|(path, prices)| {
        prices.iter().enumerate().map(move |(step, price)| PathRecord {
            path,
            step,
            price: *price,
        })
    })
}

/// Rebuilds a path set from CSV rows. A row may continue any path already
/// seen or open the next one; steps of a path must arrive as 0, 1, 2, ...
pub fn paths_from_records<I>(records: I) -> Result<PricePathSet>
where
    I: IntoIterator<Item = PathRecord>,
{
    let mut paths: Vec<Vec<f64>> = Vec::new();
    for (row, record) in records.into_iter().enumerate() {
        if record.path > paths.len() {
            return Err(Error::MalformedRecord {
                row,
                reason: format!(
                    "path {} skips ahead, expected at most {}",
                    record.path,
                    paths.len()
                ),
            });
        }
        if record.path == paths.len() {
            paths.push(Vec::new());
        }
        let prices = &mut paths[record.path];
        if record.step != prices.len() {
            return Err(Error::MalformedRecord {
                row,
                reason: format!(
                    "path {} has step {}, expected {}",
                    record.path,
                    record.step,
                    prices.len()
                ),
            });
        }
        prices.push(record.price);
    }
    Ok(PricePathSet::from(paths))
}

/// Flat form of a draw primitive; polylines contribute one row per segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawRecord {
    pub kind: &'static str,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub label: String,
    pub color: String,
    pub stroke: f64,
}

pub fn draw_records(renderer: &ChartRenderer, primitive: &DrawPrimitive) -> Vec<DrawRecord> {
    let stroke = renderer.stroke_for(primitive);
    let (kind, label) = match primitive {
        DrawPrimitive::Gridline {
            orientation: Orientation::Horizontal,
            label,
            ..
        } => ("hgrid", label.to_string()),
        DrawPrimitive::Gridline {
            orientation: Orientation::Vertical,
            label,
            ..
        } => ("vgrid", label.to_string()),
        DrawPrimitive::AxisLine { .. } => ("axis", String::new()),
        DrawPrimitive::Polyline { color_index, .. } => ("series", color_index.to_string()),
    };
    primitive
        .segments()
        .into_iter()
        .map(|(a, b)| DrawRecord {
            kind,
            x1: a.x,
            y1: a.y,
            x2: b.x,
            y2: b.y,
            label: label.clone(),
            color: stroke.color.to_string(),
            stroke: stroke.width,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_rebuild_the_same_set() {
        let set = PricePathSet::from(vec![vec![1.0, 2.0, 3.0], vec![4.0], vec![5.0, 6.0]]);
        let records: Vec<PathRecord> = path_records(&set).collect();
        assert_eq!(records.len(), 6);
        assert_eq!(
            records[3],
            PathRecord {
                path: 1,
                step: 0,
                price: 4.0
            }
        );
        assert_eq!(paths_from_records(records).unwrap(), set);
    }

    fn record(path: usize, step: usize) -> PathRecord {
        PathRecord {
            path,
            step,
            price: 1.0,
        }
    }

    #[test]
    fn interleaved_records_are_accepted() {
        let set = paths_from_records(vec![record(0, 0), record(1, 0), record(0, 1)]).unwrap();
        assert_eq!(set.paths()[0].len(), 2);
        assert_eq!(set.paths()[1].len(), 1);
    }

    #[test]
    fn out_of_range_path_index_is_rejected() {
        assert!(matches!(
            paths_from_records(vec![record(0, 0), record(usize::MAX, 0)]),
            Err(Error::MalformedRecord { row: 1, .. })
        ));
        assert!(paths_from_records(vec![record(2, 0)]).is_err());
    }

    #[test]
    fn missing_or_repeated_steps_are_rejected() {
        assert!(matches!(
            paths_from_records(vec![record(0, 0), record(0, 2)]),
            Err(Error::MalformedRecord { row: 1, .. })
        ));
        assert!(paths_from_records(vec![record(0, 0), record(0, 0)]).is_err());
        assert!(paths_from_records(vec![record(0, 1)]).is_err());
    }

    #[test]
    fn polyline_flattens_to_segments() {
        let renderer = ChartRenderer::default();
        let primitive = DrawPrimitive::Polyline {
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(2.0, 0.0),
            ],
            color_index: 1,
        };
        let rows = draw_records(&renderer, &primitive);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].x1, 1.0);
        assert_eq!(rows[1].color, "#ff0000");
        assert_eq!(rows[0].kind, "series");
    }

    #[test]
    fn gridline_rows_carry_labels() {
        let renderer = ChartRenderer::default();
        let primitive = DrawPrimitive::Gridline {
            orientation: Orientation::Horizontal,
            position: 20.0,
            from: Point::new(70.0, 20.0),
            to: Point::new(780.0, 20.0),
            label: AxisLabel::Price {
                value: 101.0,
                decimals: 2,
            },
        };
        let rows = draw_records(&renderer, &primitive);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "101");
        assert_eq!(rows[0].stroke, 1.0);
    }
}
