use std::num::NonZeroUsize;

use log::debug;
use serde::Deserialize;

use crate::chart::mapper::{division_offset, CoordinateMapper};
use crate::chart::models::{
    AxisLabel, Color, DrawPrimitive, Margins, Orientation, PlotArea, Point, ValueRange, Viewport,
};
use crate::errors::{Error, Result};
use crate::simulator::engine::PricePathSet;

const DEFAULT_DIVISIONS: usize = 5;

fn default_divisions() -> NonZeroUsize {
    NonZeroUsize::new(DEFAULT_DIVISIONS).unwrap_or(NonZeroUsize::MIN)
}

/// Layout constants of the chart. Defaults reproduce the stock chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub margins: Margins,
    pub x_divisions: NonZeroUsize,
    pub y_divisions: NonZeroUsize,
    /// Added to `max` when every plotted value is equal. Absolute, in price units.
    pub range_epsilon: f64,
    pub palette: Vec<Color>,
    pub grid_stroke: f64,
    pub axis_stroke: f64,
    pub series_stroke: f64,
    pub price_label_decimals: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            x_divisions: default_divisions(),
            y_divisions: default_divisions(),
            range_epsilon: 1.0,
            palette: vec![
                Color::BLUE,
                Color::RED,
                Color::GREEN,
                Color::ORANGE,
                Color::PURPLE,
            ],
            grid_stroke: 1.0,
            axis_stroke: 1.5,
            series_stroke: 2.0,
            price_label_decimals: 2,
        }
    }
}

impl ChartConfig {
    /// Rejects a range epsilon that could not widen a flat range.
    pub fn validate(&self) -> Result<()> {
        if !self.range_epsilon.is_finite() || self.range_epsilon <= 0.0 {
            return Err(Error::invalid(
                "range_epsilon",
                format!("must be a finite value greater than 0, got {}", self.range_epsilon),
            ));
        }
        Ok(())
    }

    /// Palette entry for a series; black when the palette is empty.
    pub fn color(&self, color_index: usize) -> Color {
        if self.palette.is_empty() {
            return Color::BLACK;
        }
        self.palette[color_index % self.palette.len()]
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

/// Turns a path set into draw primitives for a given viewport. Holds no
/// state between calls.
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    config: ChartConfig,
}

impl ChartRenderer {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    /// Like [`new`](Self::new) for configs read from outside the program.
    pub fn try_new(config: ChartConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn stroke_for(&self, primitive: &DrawPrimitive) -> Stroke {
        match primitive {
            DrawPrimitive::Gridline { .. } => Stroke {
                color: Color::BLACK,
                width: self.config.grid_stroke,
            },
            DrawPrimitive::AxisLine { .. } => Stroke {
                color: Color::BLACK,
                width: self.config.axis_stroke,
            },
            DrawPrimitive::Polyline { color_index, .. } => Stroke {
                color: self.config.color(*color_index),
                width: self.config.series_stroke,
            },
        }
    }

    /// Horizontal gridlines, vertical gridlines, the two axis lines, then one
    /// polyline per drawable path. Empty when no path has two samples.
    pub fn render(&self, set: &PricePathSet, viewport: Viewport) -> Vec<DrawPrimitive> {
        if set.iter().all(|path| path.len() < 2) {
            debug!("nothing to draw for {} paths", set.len());
            return Vec::new();
        }
        let (min, max) = match set.extremes() {
            Some(extremes) => extremes,
            None => return Vec::new(),
        };
        let mapper = CoordinateMapper::new(ValueRange::new(min, max, self.config.range_epsilon));
        let area = PlotArea::new(viewport, &self.config.margins);
        let x_divisions = self.config.x_divisions.get();
        let y_divisions = self.config.y_divisions.get();

        let mut primitives = Vec::with_capacity(x_divisions + y_divisions + 4 + set.len());

        for i in 0..=y_divisions {
            let y = area.top + division_offset(i, y_divisions, area.height);
            primitives.push(DrawPrimitive::Gridline {
                orientation: Orientation::Horizontal,
                position: y,
                from: Point::new(area.left, y),
                to: Point::new(area.right(), y),
                label: AxisLabel::Price {
                    value: mapper.division_value(i, y_divisions),
                    decimals: self.config.price_label_decimals,
                },
            });
        }

        let num_points = set.first().map_or(0, |path| path.len());
        for i in 0..=x_divisions {
            let x = area.left + division_offset(i, x_divisions, area.width);
            primitives.push(DrawPrimitive::Gridline {
                orientation: Orientation::Vertical,
                position: x,
                from: Point::new(x, area.top),
                to: Point::new(x, area.bottom()),
                label: AxisLabel::Step(i * (num_points / x_divisions)),
            });
        }

        primitives.push(DrawPrimitive::AxisLine {
            p1: Point::new(area.left, area.top),
            p2: Point::new(area.left, area.bottom()),
        });
        primitives.push(DrawPrimitive::AxisLine {
            p1: Point::new(area.left, area.bottom()),
            p2: Point::new(area.right(), area.bottom()),
        });

        let palette_size = self.config.palette.len().max(1);
        let mut rendered = 0;
        for path in set.iter().filter(|path| path.len() >= 2) {
            let color_index = rendered % palette_size;
            rendered += 1;

            let dx = area.width / (path.len() - 1) as f64;
            let mut run: Vec<Point> = Vec::with_capacity(path.len());
            for (i, value) in path.iter().enumerate() {
                let point = Point::new(area.left + i as f64 * dx, mapper.y(*value, &area));
                if point.is_finite() {
                    run.push(point);
                    continue;
                }
                flush_run(&mut primitives, &mut run, color_index);
            }
            flush_run(&mut primitives, &mut run, color_index);
        }
        debug!(
            "rendered {rendered} of {} paths into {} primitives over {:?}",
            set.len(),
            primitives.len(),
            mapper.range()
        );
        primitives
    }
}

/// Emits `run` as a polyline when it has at least one segment, then clears it.
fn flush_run(primitives: &mut Vec<DrawPrimitive>, run: &mut Vec<Point>, color_index: usize) {
    if run.len() >= 2 {
        primitives.push(DrawPrimitive::Polyline {
            points: std::mem::take(run),
            color_index,
        });
    } else {
        run.clear();
    }
}
