use std::num::NonZeroUsize;

use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    classify::ClassificationEngine,
    data::Label,
    geometry::{DisplayExtent, DisplayPoint},
};

/// Side of a shading cell in display units, as drawn by default.
pub const DEFAULT_CELL_SIZE: usize = 10;

/// Most cells a single shading pass produces.
pub const MAX_CELLS: usize = 1 << 20;

/// A square of the display surface and the label of its centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionCell {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub label: Label,
}

/// Samples an engine over a grid covering the display extent.
#[derive(Debug, Clone, Copy)]
pub struct RegionRenderer {
    cell_size: NonZeroUsize,
}

impl Default for RegionRenderer {
    fn default() -> Self {
        Self {
            cell_size: NonZeroUsize::new(DEFAULT_CELL_SIZE).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl RegionRenderer {
    pub fn new(cell_size: NonZeroUsize) -> Self {
        Self { cell_size }
    }

    #[inline]
    pub fn cell_size(&self) -> usize {
        self.cell_size.get()
    }

    /// Labels every cell whose centre the engine can classify.
    ///
    /// Each centre goes through `to_data` and then the same `classify` call
    /// used for scoring. Rows run in parallel; cells come back in row-major
    /// order. Undetermined cells are left out. When the configured cell size
    /// would produce more than [`MAX_CELLS`] cells, cells are enlarged until
    /// the grid fits.
    pub fn shade(&self, engine: &ClassificationEngine<'_>, extent: DisplayExtent) -> Vec<RegionCell> {
        if !engine.is_resolved() {
            return Vec::new();
        }

        let size = self.effective_cell_size(extent);
        let cols = (extent.width() / size).ceil() as usize;
        let rows = (extent.height() / size).ceil() as usize;
        let mapper = engine.mapper();

        (0..rows)
            .into_par_iter()
            .flat_map_iter(|row| {
                let y = row as f64 * size;
                (0..cols).filter_map(move |col| {
                    let x = col as f64 * size;
                    let centre = DisplayPoint::new(x + size / 2.0, y + size / 2.0);
                    let label = engine.classify(mapper.to_data(centre))?;
                    Some(RegionCell { x, y, size, label })
                })
            })
            .collect()
    }

    fn effective_cell_size(&self, extent: DisplayExtent) -> f64 {
        let cells = |size: f64| {
            (extent.width() / size).ceil() as usize * (extent.height() / size).ceil() as usize
        };

        let configured = self.cell_size.get() as f64;
        let mut size = configured
            .max((extent.width() * extent.height() / MAX_CELLS as f64).sqrt().ceil());
        while cells(size) > MAX_CELLS {
            size += 1.0;
        }

        if size > configured {
            debug!(
                "cell size raised from {configured} to {size} for a {}x{} extent",
                extent.width(),
                extent.height()
            );
        }
        size
    }
}
