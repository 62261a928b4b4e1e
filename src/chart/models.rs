use std::fmt;

use serde::{Deserialize, Serialize};

/// Full drawable canvas, in device-independent pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 70.0,
            right: 20.0,
            top: 20.0,
            bottom: 30.0,
        }
    }
}

/// Viewport inset by the margins. Width and height go negative when the
/// viewport is smaller than the margins; nothing downstream relies on them
/// being positive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn new(viewport: Viewport, margins: &Margins) -> Self {
        Self {
            left: margins.left,
            top: margins.top,
            width: viewport.width - margins.left - margins.right,
            height: viewport.height - margins.top - margins.bottom,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Value span with `max > min` guaranteed for finite inputs.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Pushes `max` up by `epsilon` when both extremes coincide. If `epsilon`
    /// is not a positive finite number, or is lost below the precision of
    /// `min`, `max` moves up by a couple of ulps of `min` instead.
    pub fn new(min: f64, max: f64, epsilon: f64) -> Self {
        if max != min {
            return Self { min, max };
        }
        let widened = min + epsilon;
        if epsilon.is_finite() && epsilon > 0.0 && widened > min {
            Self { min, max: widened }
        } else {
            Self {
                min,
                max: min + min.abs().max(1.0) * f64::EPSILON * 2.0,
            }
        }
    }

    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Text attached to a gridline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AxisLabel {
    /// Price at a horizontal gridline, printed with at most `decimals` digits.
    Price { value: f64, decimals: usize },
    /// Step index at a vertical gridline.
    Step(usize),
}

impl fmt::Display for AxisLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            AxisLabel::Step(index) => write!(f, "{index}"),
            AxisLabel::Price { value, decimals } => {
                // ties round away from zero, `{:.N}` alone rounds them to even
                let scale = 10f64.powi(decimals.min(i32::MAX as usize) as i32);
                let rounded = (value * scale).round() / scale;
                let value = if rounded.is_finite() { rounded } else { value };
                let text = format!("{value:.decimals$}");
                let text = if text.contains('.') {
                    text.trim_end_matches('0').trim_end_matches('.')
                } else {
                    text.as_str()
                };
                // "-0" after trimming tiny negatives
                if text == "-0" {
                    f.write_str("0")
                } else {
                    f.write_str(text)
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawPrimitive {
    /// `position` is the pixel row for horizontal lines and the pixel column
    /// for vertical ones; `from`/`to` are the line endpoints.
    Gridline {
        orientation: Orientation,
        position: f64,
        from: Point,
        to: Point,
        label: AxisLabel,
    },
    AxisLine {
        p1: Point,
        p2: Point,
    },
    Polyline {
        points: Vec<Point>,
        color_index: usize,
    },
}

impl DrawPrimitive {
    /// Consecutive point pairs making up the primitive.
    pub fn segments(&self) -> Vec<(Point, Point)> {
        match self {
            DrawPrimitive::Gridline { from, to, .. } => vec![(*from, *to)],
            DrawPrimitive::AxisLine { p1, p2 } => vec![(*p1, *p2)],
            DrawPrimitive::Polyline { points, .. } => {
                points.windows(2).map(|w| (w[0], w[1])).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(value: f64) -> String {
        AxisLabel::Price { value, decimals: 2 }.to_string()
    }

    #[test]
    fn price_labels_trim_like_hash_pattern() {
        assert_eq!(price(101.0), "101");
        assert_eq!(price(100.8), "100.8");
        assert_eq!(price(100.456), "100.46");
        assert_eq!(price(-0.001), "0");
        assert_eq!(price(1200.10), "1200.1");
        assert_eq!(AxisLabel::Step(40).to_string(), "40");
    }

    #[test]
    fn price_label_ties_round_away_from_zero() {
        assert_eq!(price(100.125), "100.13");
        assert_eq!(price(0.125), "0.13");
        assert_eq!(price(-0.125), "-0.13");
        let many_decimals = AxisLabel::Price {
            value: 1.5,
            decimals: 400,
        };
        assert_eq!(many_decimals.to_string(), "1.5");
    }

    #[test]
    fn zero_decimal_labels_keep_integer_zeros() {
        let label = AxisLabel::Price {
            value: 100.4,
            decimals: 0,
        };
        assert_eq!(label.to_string(), "100");
    }

    #[test]
    fn equal_extremes_are_widened() {
        let range = ValueRange::new(100.0, 100.0, 1.0);
        assert_eq!(range, ValueRange { min: 100.0, max: 101.0 });
        assert_eq!(ValueRange::new(1.0, 3.0, 1.0).span(), 2.0);
    }

    #[test]
    fn widening_survives_huge_values_and_bad_epsilons() {
        for (value, epsilon) in [
            (1e17, 1.0),
            (-1e17, 1.0),
            (100.0, 0.0),
            (100.0, -1.0),
            (100.0, f64::NAN),
            (100.0, f64::INFINITY),
            (0.0, 0.0),
        ] {
            let range = ValueRange::new(value, value, epsilon);
            assert!(range.max > range.min, "{value} with epsilon {epsilon}");
            assert!(range.max.is_finite());
        }
    }

    #[test]
    fn plot_area_subtracts_margins() {
        let area = PlotArea::new(Viewport::new(800.0, 600.0), &Margins::default());
        assert_eq!(area.width, 710.0);
        assert_eq!(area.height, 550.0);
        assert_eq!(area.right(), 780.0);
        assert_eq!(area.bottom(), 570.0);
    }

    #[test]
    fn color_hex() {
        assert_eq!(Color::ORANGE.to_string(), "#ffa500");
    }
}
