pub mod mapper;
pub mod point;

pub use mapper::{CoordinateMapper, DEFAULT_MARGIN};
pub use point::{DataPoint, DataRange, DisplayExtent, DisplayPoint, FALLBACK_SPAN, MAX_EXTENT};
