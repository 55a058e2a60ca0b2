use std::{error::Error, fmt};

use log::debug;
use serde::{Deserialize, Serialize};

use super::equation::LineEquation;
use crate::geometry::{CoordinateMapper, DisplayPoint};

/// Minimum vertex count for a boundary to be scored, for either kind.
pub const MIN_VERTICES: usize = 2;

/// Shape of the boundary being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryKind {
    /// Two vertices, `[start, end]`.
    #[default]
    Line,
    /// A freehand polyline in insertion order.
    Curve,
}

/// Where the current stroke is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokePhase {
    Empty,
    Drawing,
    Finalized,
}

/// Stroke operations issued in the wrong phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeError {
    /// `start_stroke` while a stroke is still being drawn.
    StrokeInProgress,
    /// `append_point` without an active stroke.
    NoActiveStroke,
    /// A line already has both of its vertices.
    LineComplete,
}

impl fmt::Display for StrokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrokeError::StrokeInProgress => write!(f, "a stroke is already in progress"),
            StrokeError::NoActiveStroke => write!(f, "no stroke is in progress"),
            StrokeError::LineComplete => write!(f, "the line already has two vertices"),
        }
    }
}

impl Error for StrokeError {}

/// A user-drawn boundary, stored as display-space vertices.
///
/// Vertices only change through [`reset`](Self::reset),
/// [`start_stroke`](Self::start_stroke) and [`append_point`](Self::append_point).
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryModel {
    kind: BoundaryKind,
    vertices: Vec<DisplayPoint>,
    phase: StrokePhase,
}

impl Default for BoundaryModel {
    fn default() -> Self {
        Self::new(BoundaryKind::default())
    }
}

impl BoundaryModel {
    pub fn new(kind: BoundaryKind) -> Self {
        Self {
            kind,
            vertices: Vec::new(),
            phase: StrokePhase::Empty,
        }
    }

    /// Drops every vertex and switches to `kind`.
    pub fn reset(&mut self, kind: BoundaryKind) {
        self.kind = kind;
        self.vertices.clear();
        self.phase = StrokePhase::Empty;
    }

    /// Begins a new stroke at `point`, replacing any finalized boundary.
    ///
    /// # Errors
    /// `StrokeError::StrokeInProgress` if the previous stroke is still open.
    pub fn start_stroke(&mut self, point: DisplayPoint) -> Result<(), StrokeError> {
        if self.phase == StrokePhase::Drawing {
            return Err(StrokeError::StrokeInProgress);
        }

        self.vertices.clear();
        self.vertices.push(point);
        self.phase = StrokePhase::Drawing;
        debug!("{:?} stroke started at ({:.1}, {:.1})", self.kind, point.x, point.y);
        Ok(())
    }

    /// Adds a vertex to the open stroke.
    ///
    /// A curve accepts any number of points. A line accepts exactly one, its
    /// end vertex, and is finalized right after.
    ///
    /// # Errors
    /// `StrokeError::NoActiveStroke` without an open stroke,
    /// `StrokeError::LineComplete` for a third line vertex.
    pub fn append_point(&mut self, point: DisplayPoint) -> Result<(), StrokeError> {
        if self.phase != StrokePhase::Drawing {
            return Err(match (self.kind, self.phase) {
                (BoundaryKind::Line, StrokePhase::Finalized) => StrokeError::LineComplete,
                _ => StrokeError::NoActiveStroke,
            });
        }

        match self.kind {
            BoundaryKind::Curve => self.vertices.push(point),
            BoundaryKind::Line => {
                if self.vertices.len() >= MIN_VERTICES {
                    return Err(StrokeError::LineComplete);
                }
                self.vertices.push(point);
                self.finalize_stroke();
            }
        }
        Ok(())
    }

    /// Closes the open stroke. Calling it again, or with no stroke, does nothing.
    pub fn finalize_stroke(&mut self) {
        if self.phase == StrokePhase::Drawing {
            self.phase = StrokePhase::Finalized;
            debug!(
                "{:?} stroke finalized with {} vertices",
                self.kind,
                self.vertices.len()
            );
        }
    }

    /// Whether there are enough vertices to classify with.
    pub fn is_ready(&self) -> bool {
        match self.kind {
            BoundaryKind::Line => self.vertices.len() == MIN_VERTICES,
            BoundaryKind::Curve => self.vertices.len() >= MIN_VERTICES,
        }
    }

    #[inline]
    pub fn is_drawing(&self) -> bool {
        self.phase == StrokePhase::Drawing
    }

    #[inline]
    pub fn kind(&self) -> BoundaryKind {
        self.kind
    }

    #[inline]
    pub fn phase(&self) -> StrokePhase {
        self.phase
    }

    #[inline]
    pub fn vertices(&self) -> &[DisplayPoint] {
        &self.vertices
    }

    /// Slope-intercept form of a completed line, in data space.
    ///
    /// # Returns
    /// `None` for curves and unfinished lines. A vertical line yields
    /// `Some(LineEquation::Undefined)`.
    pub fn line_equation(&self, mapper: &CoordinateMapper) -> Option<LineEquation> {
        if self.kind != BoundaryKind::Line || !self.is_ready() {
            return None;
        }

        let start = mapper.to_data(self.vertices[0]);
        let end = mapper.to_data(self.vertices[1]);
        Some(LineEquation::through(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{DataPoint, DataRange, DisplayExtent};

    fn p(x: f64, y: f64) -> DisplayPoint {
        DisplayPoint::new(x, y)
    }

    #[test]
    fn line_takes_exactly_two_vertices() {
        let mut b = BoundaryModel::new(BoundaryKind::Line);
        assert!(!b.is_ready());

        b.start_stroke(p(10.0, 10.0)).unwrap();
        assert!(b.is_drawing());
        assert!(!b.is_ready());

        b.append_point(p(90.0, 50.0)).unwrap();
        assert!(b.is_ready());
        assert_eq!(b.phase(), StrokePhase::Finalized);
        assert_eq!(b.append_point(p(1.0, 1.0)), Err(StrokeError::LineComplete));
        assert_eq!(b.vertices().len(), 2);
    }

    #[test]
    fn curve_appends_until_finalized() {
        let mut b = BoundaryModel::new(BoundaryKind::Curve);
        b.start_stroke(p(0.0, 0.0)).unwrap();
        for i in 1..5 {
            b.append_point(p(i as f64 * 10.0, (i % 2) as f64 * 20.0)).unwrap();
        }
        assert!(b.is_ready());
        assert_eq!(b.vertices().len(), 5);

        b.finalize_stroke();
        b.finalize_stroke();
        assert_eq!(b.phase(), StrokePhase::Finalized);
        assert_eq!(b.append_point(p(1.0, 1.0)), Err(StrokeError::NoActiveStroke));
    }

    #[test]
    fn two_point_curve_is_ready() {
        let mut b = BoundaryModel::new(BoundaryKind::Curve);
        b.start_stroke(p(0.0, 0.0)).unwrap();
        b.append_point(p(5.0, 5.0)).unwrap();
        assert!(b.is_ready());
    }

    #[test]
    fn cannot_start_over_an_open_stroke() {
        let mut b = BoundaryModel::new(BoundaryKind::Curve);
        b.start_stroke(p(0.0, 0.0)).unwrap();
        assert_eq!(b.start_stroke(p(1.0, 1.0)), Err(StrokeError::StrokeInProgress));
    }

    #[test]
    fn new_stroke_replaces_finalized_one() {
        let mut b = BoundaryModel::new(BoundaryKind::Line);
        b.start_stroke(p(0.0, 0.0)).unwrap();
        b.append_point(p(5.0, 5.0)).unwrap();

        b.start_stroke(p(7.0, 7.0)).unwrap();
        assert_eq!(b.vertices(), &[p(7.0, 7.0)]);
    }

    #[test]
    fn reset_clears_and_switches_kind() {
        let mut b = BoundaryModel::new(BoundaryKind::Line);
        b.start_stroke(p(0.0, 0.0)).unwrap();
        b.reset(BoundaryKind::Curve);
        assert_eq!(b.kind(), BoundaryKind::Curve);
        assert!(b.vertices().is_empty());
        assert_eq!(b.phase(), StrokePhase::Empty);
    }

    #[test]
    fn append_without_stroke_fails() {
        let mut b = BoundaryModel::new(BoundaryKind::Line);
        assert_eq!(b.append_point(p(1.0, 1.0)), Err(StrokeError::NoActiveStroke));
    }

    #[test]
    fn line_equation_goes_through_data_space() {
        let mapper = CoordinateMapper::new(
            DataRange::new(30.0, 60.0, 12.0, 22.0),
            DisplayExtent::new(600.0, 400.0).unwrap(),
        );
        let mut b = BoundaryModel::new(BoundaryKind::Line);
        b.start_stroke(mapper.to_display(DataPoint::new(30.0, 12.0))).unwrap();
        b.append_point(mapper.to_display(DataPoint::new(60.0, 22.0))).unwrap();

        match b.line_equation(&mapper) {
            Some(LineEquation::SlopeIntercept { slope, intercept }) => {
                assert!((slope - 1.0 / 3.0).abs() < 1e-9);
                assert!((intercept - 2.0).abs() < 1e-9);
            }
            other => panic!("unexpected equation: {other:?}"),
        }

        let mut vertical = BoundaryModel::new(BoundaryKind::Line);
        vertical.start_stroke(p(120.0, 10.0)).unwrap();
        vertical.append_point(p(120.0, 300.0)).unwrap();
        assert_eq!(vertical.line_equation(&mapper), Some(LineEquation::Undefined));

        let mut curve = BoundaryModel::new(BoundaryKind::Curve);
        curve.start_stroke(p(0.0, 0.0)).unwrap();
        curve.append_point(p(10.0, 10.0)).unwrap();
        assert_eq!(curve.line_equation(&mapper), None);
    }
}
