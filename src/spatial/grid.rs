//! Reference grid and per-cell tile assignment
//!
//! Cells are numbered row-major: cell `y * grid_width + x` sits at column
//! `x`, row `y`. Both structures below use that numbering.

use crate::io::error::{MosaicError, Result, invalid_source};
use crate::math::{Color, color_from_rgb};
use crate::spatial::layout::MosaicPlan;
use image::{Rgb, RgbImage, imageops};
use ndarray::Array2;

/// Convert a row-major cell index into (x, y)
pub const fn cell_position(cell: usize, grid_width: usize) -> (usize, usize) {
    (cell % grid_width, cell / grid_width)
}

/// Reference image reduced to one colour per cell
#[derive(Clone, Debug)]
pub struct ReferenceGrid {
    width: u32,
    height: u32,
    pixels: Vec<Rgb<u8>>,
}

impl ReferenceGrid {
    /// Downscale the reference image to exactly one pixel per cell
    ///
    /// Uses area averaging, so every cell colour is the mean of the reference
    /// pixels it covers.
    pub fn from_image(reference: &RgbImage, plan: &MosaicPlan) -> Self {
        let reduced = imageops::thumbnail(reference, plan.grid_width, plan.grid_height);
        let pixels = reduced.pixels().copied().collect();

        Self {
            width: plan.grid_width,
            height: plan.grid_height,
            pixels,
        }
    }

    /// Build a grid from row-major cell colours
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if the pixel count does not match the
    /// dimensions
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb<u8>>) -> Result<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(invalid_source(&format!(
                "{} cell colours given for a {width}x{height} grid",
                pixels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Cells across
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Cells down
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// 8-bit colour of the cell at (x, y)
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb<u8>> {
        if x >= self.width as usize {
            return None;
        }
        self.pixels.get(y * self.width as usize + x).copied()
    }

    /// Real-valued colours of every cell, row-major
    pub fn colors(&self) -> Vec<Color> {
        self.pixels.iter().map(|&pixel| color_from_rgb(pixel)).collect()
    }
}

/// Which tile each cell shows
///
/// Filled incrementally: first by the one-to-one matching, then by the
/// leftover resolver. A complete assignment has a tile for every cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellAssignment {
    /// Tile per cell, indexed by (row, column)
    tiles: Array2<Option<usize>>,
}

impl CellAssignment {
    /// Create an assignment with every cell empty
    pub fn new(grid_width: usize, grid_height: usize) -> Self {
        Self {
            tiles: Array2::from_elem((grid_height, grid_width), None),
        }
    }

    /// Cells across
    pub fn width(&self) -> usize {
        self.tiles.ncols()
    }

    /// Cells down
    pub fn height(&self) -> usize {
        self.tiles.nrows()
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    /// Place `tile` in the cell with row-major index `cell`
    ///
    /// Overwrites any earlier choice for that cell.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if `cell` is outside the grid
    pub fn assign(&mut self, cell: usize, tile: usize) -> Result<()> {
        let (x, y) = cell_position(cell, self.width().max(1));
        let slot = self
            .tiles
            .get_mut([y, x])
            .ok_or_else(|| invalid_source(&format!("cell {cell} is outside the grid")))?;
        *slot = Some(tile);
        Ok(())
    }

    /// Tile shown at (x, y), if one has been chosen
    pub fn get(&self, x: usize, y: usize) -> Option<usize> {
        self.tiles.get([y, x]).copied().flatten()
    }

    /// Number of cells that already hold a tile
    pub fn assigned_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_some()).count()
    }

    /// Whether every cell holds a tile
    pub fn is_complete(&self) -> bool {
        self.tiles.iter().all(Option::is_some)
    }

    /// Row-major indices of cells still waiting for a tile
    pub fn unassigned_cells(&self) -> Vec<usize> {
        self.tiles
            .iter()
            .enumerate()
            .filter_map(|(cell, tile)| tile.is_none().then_some(cell))
            .collect()
    }

    /// Tile per cell in row-major order
    ///
    /// # Errors
    ///
    /// Returns `UnassignedCell` for the first cell without a tile
    pub fn to_complete_vec(&self) -> Result<Vec<usize>> {
        let width = self.width().max(1);
        self.tiles
            .iter()
            .enumerate()
            .map(|(cell, tile)| {
                tile.ok_or_else(|| {
                    let (x, y) = cell_position(cell, width);
                    MosaicError::UnassignedCell { x, y }
                })
            })
            .collect()
    }
}
