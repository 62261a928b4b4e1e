use crate::chart::models::{PlotArea, ValueRange};

/// Linear scaling between a value range and pixel offsets.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CoordinateMapper {
    range: ValueRange,
}

impl CoordinateMapper {
    pub fn new(range: ValueRange) -> Self {
        Self { range }
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }

    /// Offset of `value` along an axis of length `extent`.
    #[inline]
    pub fn normalize(&self, value: f64, extent: f64) -> f64 {
        normalize(value, self.range.min, self.range.max, extent)
    }

    /// Pixel row of `value`; larger values sit higher on screen.
    #[inline]
    pub fn y(&self, value: f64, area: &PlotArea) -> f64 {
        area.top + area.height - self.normalize(value, area.height)
    }

    /// Value shown at horizontal division `index` of `divisions`, counted from the top.
    #[inline]
    pub fn division_value(&self, index: usize, divisions: usize) -> f64 {
        self.range.max - self.range.span() * index as f64 / divisions as f64
    }
}

/// `(value - min) / (max - min) * extent`
#[inline]
pub fn normalize(value: f64, min: f64, max: f64, extent: f64) -> f64 {
    (value - min) / (max - min) * extent
}

/// Offset of division `index` when `extent` is cut into `divisions` equal parts.
#[inline]
pub fn division_offset(index: usize, divisions: usize, extent: f64) -> f64 {
    index as f64 * (extent / divisions as f64)
}
