use std::fmt;

use serde::Serialize;

use crate::geometry::DataPoint;

/// `y = slope * x + intercept`, or the vertical-line state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum LineEquation {
    SlopeIntercept { slope: f64, intercept: f64 },
    /// Both points share the same x; there is no finite slope.
    Undefined,
}

impl LineEquation {
    pub fn through(p1: DataPoint, p2: DataPoint) -> Self {
        let run = p2.x - p1.x;
        if run == 0.0 {
            return LineEquation::Undefined;
        }

        let slope = (p2.y - p1.y) / run;
        if !slope.is_finite() {
            return LineEquation::Undefined;
        }

        LineEquation::SlopeIntercept {
            slope,
            intercept: p1.y - slope * p1.x,
        }
    }
}

impl fmt::Display for LineEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            LineEquation::SlopeIntercept { slope, intercept } => {
                let sign = if intercept >= 0.0 { '+' } else { '-' };
                write!(f, "y = {slope:.2}x {sign} {:.2}", intercept.abs())
            }
            LineEquation::Undefined => write!(f, "undefined"),
        }
    }
}
