use std::{num::NonZeroUsize, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    boundary::BoundaryKind,
    data::{ColumnSpec, LabelSet, DEFAULT_EVALUATION_FRACTION},
    error::{Error, Result},
    geometry::{DisplayExtent, DEFAULT_MARGIN},
    region::DEFAULT_CELL_SIZE,
};

/// Where the observations come from and how they are split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: Option<PathBuf>,
    pub columns: ColumnSpec,
    pub labels: LabelSet,
    pub evaluation_fraction: f64,
    /// Fixed seed for the shuffle; a fresh one is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: None,
            columns: ColumnSpec::default(),
            labels: LabelSet::default(),
            evaluation_fraction: DEFAULT_EVALUATION_FRACTION,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub cell_size: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            margin: DEFAULT_MARGIN,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

/// Everything a session needs besides the observations themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub dataset: DatasetConfig,
    pub display: DisplayConfig,
    pub boundary_kind: BoundaryKind,
    pub show_training: bool,
    pub show_evaluation: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            display: DisplayConfig::default(),
            boundary_kind: BoundaryKind::default(),
            show_training: true,
            show_evaluation: false,
        }
    }
}

impl SessionConfig {
    /// Parses a JSON document; missing fields take their defaults.
    ///
    /// # Errors
    /// `Error::Json` on malformed input, `Error::InvalidConfig` if the
    /// result does not pass [`validate`](Self::validate).
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// `Error::InvalidConfig` describing the first inconsistency found.
    pub fn validate(&self) -> Result<()> {
        let fraction = self.dataset.evaluation_fraction;
        if !(0.0..1.0).contains(&fraction) {
            return Err(Error::InvalidConfig(format!(
                "evaluation_fraction must be in [0, 1), got {fraction}"
            )));
        }

        if self.dataset.labels.a == self.dataset.labels.b {
            return Err(Error::InvalidConfig(format!(
                "the two class names must differ, both are '{}'",
                self.dataset.labels.a
            )));
        }

        if !(self.display.margin.is_finite() && self.display.margin >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "margin must be a non-negative number, got {}",
                self.display.margin
            )));
        }

        if self.display.cell_size == 0 {
            return Err(Error::InvalidConfig(
                "cell_size must be greater than 0".into(),
            ));
        }

        self.extent().map(|_| ())
    }

    /// # Errors
    /// `Error::InvalidExtent` for a non-positive width or height.
    pub fn extent(&self) -> Result<DisplayExtent> {
        DisplayExtent::new(self.display.width, self.display.height)
    }

    pub fn cell_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.display.cell_size).unwrap_or(NonZeroUsize::MIN)
    }
}
