use log::debug;

use super::point::{DataPoint, DataRange, DisplayExtent, DisplayPoint};

/// Fraction of each axis span added on both sides of the data.
pub const DEFAULT_MARGIN: f64 = 0.1;

/// Affine transform between data space and display space.
///
/// The mapped window is `[min - margin, max + margin]` on each axis, with
/// `margin = fraction * span`, stretched to fill the whole extent. An axis
/// whose data is a single value gets a unit span centred on that value. The y axis
/// is flipped: larger data y lands on smaller display y.
///
/// Scales and offsets are private and recomputed in full by every setter, so
/// a mapper can never pair a new extent with an old range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    range: DataRange,
    extent: DisplayExtent,
    margin: f64,
    scale_x: f64,
    scale_y: f64,
    offset_x: f64,
    offset_y: f64,
}

impl CoordinateMapper {
    /// Creates a mapper with the default 10% margin.
    pub fn new(range: DataRange, extent: DisplayExtent) -> Self {
        Self::with_margin(range, extent, DEFAULT_MARGIN)
    }

    /// Creates a mapper with a custom margin fraction.
    ///
    /// Negative or non-finite margins are treated as zero.
    pub fn with_margin(range: DataRange, extent: DisplayExtent, margin: f64) -> Self {
        let margin = if margin.is_finite() { margin.max(0.0) } else { 0.0 };
        let mut mapper = Self {
            range,
            extent,
            margin,
            scale_x: 1.0,
            scale_y: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
        mapper.refresh();
        mapper
    }

    pub fn set_extent(&mut self, extent: DisplayExtent) {
        self.extent = extent;
        self.refresh();
    }

    pub fn set_range(&mut self, range: DataRange) {
        self.range = range;
        self.refresh();
    }

    fn refresh(&mut self) {
        let span_x = self.range.span_x();
        let span_y = self.range.span_y();
        let margin_x = span_x * self.margin;
        let margin_y = span_y * self.margin;

        self.scale_x = self.extent.width() / (span_x + 2.0 * margin_x);
        self.scale_y = self.extent.height() / (span_y + 2.0 * margin_y);
        self.offset_x = self.range.lower_x() - margin_x;
        self.offset_y = self.range.lower_y() - margin_y;

        debug!(
            "mapper refreshed: extent {}x{}, scale ({:.4}, {:.4}), offset ({:.4}, {:.4})",
            self.extent.width(),
            self.extent.height(),
            self.scale_x,
            self.scale_y,
            self.offset_x,
            self.offset_y
        );
    }

    #[inline]
    pub fn to_display(&self, p: DataPoint) -> DisplayPoint {
        DisplayPoint {
            x: (p.x - self.offset_x) * self.scale_x,
            y: self.extent.height() - (p.y - self.offset_y) * self.scale_y,
        }
    }

    #[inline]
    pub fn to_data(&self, p: DisplayPoint) -> DataPoint {
        DataPoint {
            x: p.x / self.scale_x + self.offset_x,
            y: (self.extent.height() - p.y) / self.scale_y + self.offset_y,
        }
    }

    #[inline]
    pub fn range(&self) -> DataRange {
        self.range
    }

    #[inline]
    pub fn extent(&self) -> DisplayExtent {
        self.extent
    }

    #[inline]
    pub fn margin(&self) -> f64 {
        self.margin
    }
}
