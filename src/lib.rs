//! Scores hand-drawn decision boundaries over a two-class scatter plot.
//!
//! A boundary is drawn in display space, either a two-point line or a
//! freehand polyline. Data points are projected through a
//! [`CoordinateMapper`] and assigned to a class by a cross-product side test
//! (lines) or a ray-casting parity test (curves), anchored on the first
//! class-A training observation. The same rule feeds point classification,
//! accuracy and region shading.

pub mod boundary;
pub mod classify;
pub mod config;
pub mod data;
pub mod error;
pub mod geometry;
pub mod region;
pub mod session;

pub use boundary::{BoundaryKind, BoundaryModel, LineEquation, StrokeError};
pub use classify::{accuracy, classify, Accuracy, ClassificationEngine, ClassificationResult};
pub use config::SessionConfig;
pub use data::{DataLoadError, Dataset, Label, LabelSet, Observation, Subset};
pub use error::{Error, Result};
pub use geometry::{CoordinateMapper, DataPoint, DataRange, DisplayExtent, DisplayPoint};
pub use region::{RegionCell, RegionRenderer};
pub use session::{InputEvent, Session, SessionActor, SessionSnapshot};
