use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Span used for an axis whose data collapses to a single value.
pub const FALLBACK_SPAN: f64 = 1.0;

/// A point in measurement space (y grows upwards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point on the rendering surface (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayPoint {
    pub x: f64,
    pub y: f64,
}

impl DisplayPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounds of a set of data points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataRange {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DataRange {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Min/max over every point, or `None` when there are no points.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = DataPoint>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let init = Self::new(first.x, first.x, first.y, first.y);

        Some(points.fold(init, |r, p| Self {
            x_min: r.x_min.min(p.x),
            x_max: r.x_max.max(p.x),
            y_min: r.y_min.min(p.y),
            y_max: r.y_max.max(p.y),
        }))
    }

    /// Width of the x axis, falling back to [`FALLBACK_SPAN`] when degenerate.
    #[inline]
    pub fn span_x(&self) -> f64 {
        effective_span(self.x_max - self.x_min)
    }

    /// Height of the y axis, falling back to [`FALLBACK_SPAN`] when degenerate.
    #[inline]
    pub fn span_y(&self) -> f64 {
        effective_span(self.y_max - self.y_min)
    }

    /// Lower edge of the x axis once the fallback span is centred on a
    /// degenerate axis.
    #[inline]
    pub fn lower_x(&self) -> f64 {
        effective_lower(self.x_min, self.x_max)
    }

    #[inline]
    pub fn lower_y(&self) -> f64 {
        effective_lower(self.y_min, self.y_max)
    }

    /// Whether either axis needed the fallback span.
    pub fn is_degenerate(&self) -> bool {
        !is_usable_span(self.x_max - self.x_min) || !is_usable_span(self.y_max - self.y_min)
    }
}

#[inline]
fn is_usable_span(span: f64) -> bool {
    span.is_finite() && span > 0.0
}

#[inline]
fn effective_span(span: f64) -> f64 {
    if is_usable_span(span) {
        span
    } else {
        FALLBACK_SPAN
    }
}

#[inline]
fn effective_lower(min: f64, max: f64) -> f64 {
    if is_usable_span(max - min) {
        min
    } else {
        (min + max) / 2.0 - FALLBACK_SPAN / 2.0
    }
}

/// Largest accepted side of a display extent.
pub const MAX_EXTENT: f64 = 16_384.0;

/// Size of the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayExtent {
    width: f64,
    height: f64,
}

impl DisplayExtent {
    /// Creates a new extent.
    ///
    /// # Errors
    /// Returns `Error::InvalidExtent` unless both sides are in `(0, MAX_EXTENT]`.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let valid = |side: f64| side > 0.0 && side <= MAX_EXTENT;
        if !(valid(width) && valid(height)) {
            return Err(Error::InvalidExtent { width, height });
        }

        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enclosing_range_covers_all_points() {
        let pts = [
            DataPoint::new(40.0, 18.0),
            DataPoint::new(32.1, 15.5),
            DataPoint::new(58.0, 21.2),
        ];
        let r = DataRange::enclosing(pts).unwrap();
        assert_eq!(r, DataRange::new(32.1, 58.0, 15.5, 21.2));
        assert!(!r.is_degenerate());
    }

    #[test]
    fn enclosing_range_of_nothing_is_none() {
        assert!(DataRange::enclosing(Vec::new()).is_none());
    }

    #[test]
    fn degenerate_axis_uses_fallback_span() {
        let r = DataRange::new(5.0, 5.0, 1.0, 3.0);
        assert!(r.is_degenerate());
        assert_eq!(r.span_x(), FALLBACK_SPAN);
        assert_eq!(r.span_y(), 2.0);
        assert_eq!(r.lower_x(), 4.5);
        assert_eq!(r.lower_y(), 1.0);
    }

    #[test]
    fn extent_rejects_empty_surfaces() {
        assert!(DisplayExtent::new(0.0, 10.0).is_err());
        assert!(DisplayExtent::new(10.0, -1.0).is_err());
        assert!(DisplayExtent::new(f64::NAN, 10.0).is_err());
        assert!(DisplayExtent::new(f64::INFINITY, 10.0).is_err());
        assert!(DisplayExtent::new(1e9, 1e9).is_err());
        assert!(DisplayExtent::new(MAX_EXTENT, MAX_EXTENT).is_ok());
        assert!(DisplayExtent::new(640.0, 480.0).is_ok());
    }
}
