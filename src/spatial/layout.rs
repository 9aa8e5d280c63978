//! Grid layout planning: how many cells, and how many pixels per cell
//!
//! The planner balances three proportions: the reference image's aspect
//! ratio, the average tile aspect ratio, and the requested grid and cell
//! sizes. Missing sizes are derived so that the finished canvas keeps the
//! reference image's shape while each cell keeps the average tile's shape.

use crate::analysis::catalog::TileCatalog;
use crate::io::configuration::MosaicConfig;
use crate::io::error::{Result, invalid_source};
use tracing::debug;

/// Geometry shared by the assignment engine and the compositor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MosaicPlan {
    /// Cells across
    pub grid_width: u32,
    /// Cells down
    pub grid_height: u32,
    /// Pixel width of one cell
    pub cell_width: u32,
    /// Pixel height of one cell
    pub cell_height: u32,
}

impl MosaicPlan {
    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.grid_width as usize * self.grid_height as usize
    }

    /// Output canvas size as (width, height) in pixels
    pub const fn canvas_dimensions(&self) -> (u32, u32) {
        (
            self.grid_width * self.cell_width,
            self.grid_height * self.cell_height,
        )
    }

    /// Width/height ratio of a single cell box
    pub fn box_ratio(&self) -> f64 {
        f64::from(self.cell_width) / f64::from(self.cell_height)
    }
}

/// Inputs the planner needs from the reference image and the catalog
#[derive(Clone, Copy, Debug)]
pub struct LayoutPlanner {
    reference_width: u32,
    reference_height: u32,
    tile_count: usize,
    mean_aspect_ratio: f64,
    mean_height: u32,
}

impl LayoutPlanner {
    /// Collect planner inputs from a reference size and a tile catalog
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if the reference image has zero size
    pub fn new(reference_dimensions: (u32, u32), catalog: &TileCatalog) -> Result<Self> {
        let (reference_width, reference_height) = reference_dimensions;
        if reference_width == 0 || reference_height == 0 {
            return Err(invalid_source(&format!(
                "reference image has zero size ({reference_width}x{reference_height})"
            )));
        }

        Ok(Self::from_parts(
            reference_dimensions,
            catalog.len(),
            catalog.mean_aspect_ratio(),
            catalog.mean_height(),
        ))
    }

    /// Build a planner from raw statistics
    pub const fn from_parts(
        reference_dimensions: (u32, u32),
        tile_count: usize,
        mean_aspect_ratio: f64,
        mean_height: u32,
    ) -> Self {
        Self {
            reference_width: reference_dimensions.0,
            reference_height: reference_dimensions.1,
            tile_count,
            mean_aspect_ratio,
            mean_height,
        }
    }

    fn reference_ratio(&self) -> f64 {
        f64::from(self.reference_width) / f64::from(self.reference_height)
    }

    /// Resolve every size the configuration leaves open
    pub fn plan(&self, config: &MosaicConfig) -> MosaicPlan {
        let (cell_height, tile_ratio) = match (config.cell_width, config.cell_height) {
            (None, None) => (self.mean_height, self.mean_aspect_ratio),
            (Some(width), None) => (
                truncate(f64::from(width) / self.mean_aspect_ratio),
                self.mean_aspect_ratio,
            ),
            (None, Some(height)) => (height, self.mean_aspect_ratio),
            (Some(width), Some(height)) => (height, f64::from(width) / f64::from(height)),
        };

        // Reference proportions measured in units of average tiles
        let adjusted_ratio = self.reference_ratio() / tile_ratio;

        let (grid_width, grid_height) = match (config.grid_width, config.grid_height) {
            (None, None) => auto_grid(self.tile_count, adjusted_ratio),
            (Some(width), None) => (width, truncate(f64::from(width) / adjusted_ratio)),
            (None, Some(height)) => (truncate(f64::from(height) * adjusted_ratio), height),
            (Some(width), Some(height)) => (width, height),
        };
        let grid_width = grid_width.max(1);
        let grid_height = grid_height.max(1);

        let effective_ratio =
            self.reference_ratio() * f64::from(grid_height) / f64::from(grid_width);
        let cell_height = cell_height.max(1);
        let cell_width = config
            .cell_width
            .unwrap_or_else(|| truncate(f64::from(cell_height) * effective_ratio))
            .max(1);

        debug!(
            adjusted_ratio,
            effective_ratio, grid_width, grid_height, cell_width, cell_height, "planned layout"
        );

        MosaicPlan {
            grid_width,
            grid_height,
            cell_width,
            cell_height,
        }
    }
}

/// Smallest grid with at least `tile_count` cells whose shape follows `ratio`
///
/// Starts from the real-valued solution of `w * h = n, w / h = ratio`,
/// truncates the width and rounds the height up, then trades one row for one
/// column (and finally adds a row back) until every tile has a cell.
pub fn auto_grid(tile_count: usize, ratio: f64) -> (u32, u32) {
    let n = tile_count as f64;
    let exact_width = (n * ratio).sqrt();
    let exact_height = n / exact_width;

    let mut width = exact_width as u64;
    let mut height = exact_height as u64 + 1;
    let target = tile_count as u64;

    if width * height < target {
        height -= 1;
        width += 1;
    }
    if width * height < target {
        height += 1;
    }

    (width as u32, height as u32)
}

fn truncate(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value as u32
    } else {
        0
    }
}
