pub mod equation;
pub mod model;

pub use equation::LineEquation;
pub use model::{BoundaryKind, BoundaryModel, StrokeError, StrokePhase, MIN_VERTICES};
