use std::{
    error,
    fmt::{self, Display},
    io,
};

use crate::{data::DataLoadError, geometry::MAX_EXTENT};

/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures that stop a session from starting.
///
/// Geometry and scoring problems never show up here, they resolve to
/// sentinel states (`None`, `Accuracy::Undefined`, `LineEquation::Undefined`).
#[derive(Debug)]
pub enum Error {
    /// The dataset could not be loaded.
    DataLoad(DataLoadError),
    /// The configuration is inconsistent, caught before loading anything.
    InvalidConfig(String),
    /// A display extent without area.
    InvalidExtent { width: f64, height: f64 },
    Io(io::Error),
    Json(serde_json::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DataLoad(e) => write!(f, "failed to load dataset: {e}"),
            Error::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Error::InvalidExtent { width, height } => {
                write!(
                    f,
                    "display extent must be positive and at most {MAX_EXTENT} per side, got {width}x{height}"
                )
            }
            Error::Io(e) => write!(f, "io error: {e}"),
            Error::Json(e) => write!(f, "invalid JSON: {e}"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::DataLoad(e) => Some(e),
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DataLoadError> for Error {
    fn from(value: DataLoadError) -> Self {
        Self::DataLoad(value)
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
