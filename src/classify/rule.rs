use crate::{
    boundary::{BoundaryKind, BoundaryModel},
    geometry::DisplayPoint,
};

/// Signed cross product of `q - start` against `end - start`.
///
/// The sign tells which half-plane `q` is in; zero means `q` is on the line.
/// Swapping `start` and `end` flips the sign of every result at once.
#[inline]
pub fn side(start: DisplayPoint, end: DisplayPoint, q: DisplayPoint) -> f64 {
    (q.y - start.y) * (end.x - start.x) - (q.x - start.x) * (end.y - start.y)
}

/// Number of polyline edges crossed by a ray from `q` towards increasing x.
///
/// An edge counts when one endpoint is strictly above `q.y` and the other is
/// at or below it, so a vertex lying exactly on the ray is counted once. The
/// scan is linear in the vertex count.
pub fn crossings(vertices: &[DisplayPoint], q: DisplayPoint) -> usize {
    vertices
        .windows(2)
        .filter(|edge| {
            let (a, b) = (edge[0], edge[1]);
            if (a.y > q.y) == (b.y > q.y) {
                return false;
            }
            // a.y != b.y here, one is above q.y and the other is not
            let x = a.x + (b.x - a.x) * (q.y - a.y) / (b.y - a.y);
            x > q.x
        })
        .count()
}

/// Where a point sits relative to a boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Raw side value of the line test.
    Line { side: f64 },
    /// Whether the ray crossed the curve an odd number of times.
    Curve { odd: bool },
}

impl Placement {
    /// Whether `self` and `other` fall in the same region.
    ///
    /// Points exactly on a line (`side == 0`) never share a region with
    /// anything, so they get the label opposite to the anchor's.
    pub fn shares_region(&self, other: &Placement) -> bool {
        match (self, other) {
            (Placement::Line { side: a }, Placement::Line { side: b }) => a * b > 0.0,
            (Placement::Curve { odd: a }, Placement::Curve { odd: b }) => a == b,
            _ => false,
        }
    }
}

/// A ready boundary, viewed as the decision rule of its kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecisionRule<'a> {
    Line {
        start: DisplayPoint,
        end: DisplayPoint,
    },
    Curve {
        vertices: &'a [DisplayPoint],
    },
}

impl<'a> DecisionRule<'a> {
    /// `None` while the boundary does not have enough vertices.
    pub fn from_boundary(boundary: &'a BoundaryModel) -> Option<Self> {
        if !boundary.is_ready() {
            return None;
        }

        let vertices = boundary.vertices();
        Some(match boundary.kind() {
            BoundaryKind::Line => DecisionRule::Line {
                start: vertices[0],
                end: vertices[1],
            },
            BoundaryKind::Curve => DecisionRule::Curve { vertices },
        })
    }

    pub fn place(&self, q: DisplayPoint) -> Placement {
        match *self {
            DecisionRule::Line { start, end } => Placement::Line {
                side: side(start, end, q),
            },
            DecisionRule::Curve { vertices } => Placement::Curve {
                odd: crossings(vertices, q) % 2 == 1,
            },
        }
    }
}
