//! Mosaic constants and runtime configuration

use crate::io::error::{Result, invalid_configuration};

/// Default colour threshold for leftover cell candidates
pub const DEFAULT_COLOR_DIFF: f64 = 30.0;

// Guarantees progress when the threshold admits no tile
/// Number of nearest tiles drawn from when no tile is within the threshold
pub const FALLBACK_CANDIDATES: usize = 20;

/// Fixed seed for reproducible mosaics
pub const DEFAULT_SEED: u64 = 42;

/// Output file extensions the mosaic can be encoded as
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

// Output settings
/// Suffix added to the reference file stem when no output path is given
pub const OUTPUT_SUFFIX: &str = "_mosaic";
/// Extension of the default output file
pub const OUTPUT_EXTENSION: &str = "png";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// User-facing knobs for a single mosaic run
///
/// Any of the four size fields may be left out; the layout planner derives
/// the missing ones from the reference image and the tile catalog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MosaicConfig {
    /// Number of cells across the output
    pub grid_width: Option<u32>,
    /// Number of cells down the output
    pub grid_height: Option<u32>,
    /// Pixel width of one cell
    pub cell_width: Option<u32>,
    /// Pixel height of one cell
    pub cell_height: Option<u32>,
    /// Pad tiles with the reference colour instead of their own average
    pub color_from_reference: bool,
    /// Maximum colour distance for a tile to be a leftover candidate
    pub color_diff: f64,
    /// Seed for the cell shuffle and leftover draws
    pub seed: u64,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            grid_width: None,
            grid_height: None,
            cell_width: None,
            cell_height: None,
            color_from_reference: false,
            color_diff: DEFAULT_COLOR_DIFF,
            seed: DEFAULT_SEED,
        }
    }
}

impl MosaicConfig {
    /// Reject sizes of zero and thresholds that are negative or not finite
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` naming the first offending parameter
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("grid_width", self.grid_width),
            ("grid_height", self.grid_height),
            ("cell_width", self.cell_width),
            ("cell_height", self.cell_height),
        ];
        for (parameter, value) in sizes {
            if value == Some(0) {
                return Err(invalid_configuration(
                    parameter,
                    &0,
                    &"must be a positive integer",
                ));
            }
        }

        if !self.color_diff.is_finite() || self.color_diff < 0.0 {
            return Err(invalid_configuration(
                "color_diff",
                &self.color_diff,
                &"must be a non-negative number",
            ));
        }

        Ok(())
    }
}
