//! Canvas rendering from a complete cell assignment
//!
//! Each tile is letterboxed into its cell: scaled until one side fills the
//! box exactly, never cropped, with the slack on the other side split
//! evenly (the trailing side takes the odd pixel) and painted with a fill
//! colour.

use crate::analysis::catalog::TileCatalog;
use crate::io::error::{Result, invalid_source};
use crate::io::image::TileSource;
use crate::math::rgb_from_color;
use crate::spatial::grid::{CellAssignment, ReferenceGrid, cell_position};
use crate::spatial::layout::MosaicPlan;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use indicatif::ProgressBar;
use rayon::prelude::*;

/// Size and padding of a tile inside its cell box
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileFit {
    /// Rendered tile width
    pub width: u32,
    /// Rendered tile height
    pub height: u32,
    /// Fill rows above the tile
    pub pad_top: u32,
    /// Fill rows below the tile
    pub pad_bottom: u32,
    /// Fill columns left of the tile
    pub pad_left: u32,
    /// Fill columns right of the tile
    pub pad_right: u32,
}

/// Letterbox a tile of the given aspect ratio into a `cell_width x cell_height` box
///
/// Tiles wider than the box keep the full box width and lose height;
/// all others keep the full box height and lose width. The shrunk side is
/// truncated to whole pixels and never drops below one pixel.
pub fn fit_tile(aspect_ratio: f64, cell_width: u32, cell_height: u32) -> TileFit {
    let box_ratio = f64::from(cell_width) / f64::from(cell_height);

    if aspect_ratio > box_ratio {
        let height = ((f64::from(cell_width) / aspect_ratio) as u32).clamp(1, cell_height);
        let (pad_top, pad_bottom) = split_slack(cell_height - height);
        TileFit {
            width: cell_width,
            height,
            pad_top,
            pad_bottom,
            pad_left: 0,
            pad_right: 0,
        }
    } else {
        let width = ((f64::from(cell_height) * aspect_ratio) as u32).clamp(1, cell_width);
        let (pad_left, pad_right) = split_slack(cell_width - width);
        TileFit {
            width,
            height: cell_height,
            pad_top: 0,
            pad_bottom: 0,
            pad_left,
            pad_right,
        }
    }
}

const fn split_slack(slack: u32) -> (u32, u32) {
    let leading = slack / 2;
    (leading, slack - leading)
}

/// Render one cell block: the resized tile over a filled background
pub fn render_cell(tile: &RgbImage, fit: &TileFit, fill: Rgb<u8>) -> RgbImage {
    let resized = imageops::resize(tile, fit.width, fit.height, FilterType::Triangle);
    let mut block = RgbImage::from_pixel(
        fit.pad_left + fit.width + fit.pad_right,
        fit.pad_top + fit.height + fit.pad_bottom,
        fill,
    );
    imageops::replace(
        &mut block,
        &resized,
        i64::from(fit.pad_left),
        i64::from(fit.pad_top),
    );
    block
}

/// Everything needed to paint the final canvas
pub struct Compositor<'a, S: TileSource + ?Sized> {
    plan: MosaicPlan,
    grid: &'a ReferenceGrid,
    catalog: &'a TileCatalog,
    source: &'a S,
    color_from_reference: bool,
}

impl<'a, S: TileSource + ?Sized> Compositor<'a, S> {
    /// Bind geometry, colours and tile pixels together
    pub const fn new(
        plan: MosaicPlan,
        grid: &'a ReferenceGrid,
        catalog: &'a TileCatalog,
        source: &'a S,
        color_from_reference: bool,
    ) -> Self {
        Self {
            plan,
            grid,
            catalog,
            source,
            color_from_reference,
        }
    }

    fn fill_color(&self, x: usize, y: usize, tile: usize) -> Result<Rgb<u8>> {
        if self.color_from_reference {
            self.grid.pixel(x, y).ok_or_else(|| {
                invalid_source(&format!("cell ({x}, {y}) is outside the reference grid"))
            })
        } else {
            Ok(rgb_from_color(self.catalog.get(tile)?.average_color))
        }
    }

    fn render_block(&self, x: usize, y: usize, tile: usize) -> Result<RgbImage> {
        let descriptor = self.catalog.get(tile)?;
        let fit = fit_tile(
            descriptor.aspect_ratio,
            self.plan.cell_width,
            self.plan.cell_height,
        );
        let fill = self.fill_color(x, y, tile)?;
        let image = self.source.load_tile(tile)?;
        Ok(render_cell(&image, &fit, fill))
    }

    /// Paint every cell onto a `grid * cell` sized canvas
    ///
    /// Cells are rendered in parallel and blitted in row-major order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A cell has no tile (`UnassignedCell`)
    /// - An assigned tile is outside the catalog
    /// - A tile image cannot be decoded
    pub fn compose(&self, assignment: &CellAssignment, progress: &ProgressBar) -> Result<RgbImage> {
        let tiles = assignment.to_complete_vec()?;
        let grid_width = self.plan.grid_width as usize;
        if tiles.len() != self.plan.cell_count() {
            return Err(invalid_source(&format!(
                "assignment covers {} cells but the plan has {}",
                tiles.len(),
                self.plan.cell_count()
            )));
        }
        progress.set_length(tiles.len() as u64);

        let blocks = tiles
            .par_iter()
            .enumerate()
            .map(|(cell, &tile)| {
                let (x, y) = cell_position(cell, grid_width);
                let block = self.render_block(x, y, tile);
                progress.inc(1);
                block.map(|block| (x, y, block))
            })
            .collect::<Result<Vec<_>>>()?;

        let (canvas_width, canvas_height) = self.plan.canvas_dimensions();
        let mut canvas = RgbImage::new(canvas_width, canvas_height);
        for (x, y, block) in blocks {
            imageops::replace(
                &mut canvas,
                &block,
                x as i64 * i64::from(self.plan.cell_width),
                y as i64 * i64::from(self.plan.cell_height),
            );
        }

        progress.finish_and_clear();
        Ok(canvas)
    }
}
