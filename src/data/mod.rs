pub mod dataset;
pub mod loader;
pub mod observation;

pub use dataset::{Dataset, Subset, DEFAULT_EVALUATION_FRACTION};
pub use loader::{
    load_path, parse_delimited, read_delimited, ColumnSpec, DataLoadError, LoadedRows,
};
pub use observation::{Label, LabelSet, Observation};
