//! Tile catalog: one immutable descriptor per source image

use crate::io::error::{MosaicError, Result, invalid_source};
use crate::io::image::TileSource;
use crate::math::Color;
use image::RgbImage;
use indicatif::ProgressBar;
use rayon::prelude::*;

/// Precomputed summary of a tile used for matching without touching pixels
#[derive(Clone, Debug, PartialEq)]
pub struct TileDescriptor {
    /// Stable identity, position of the tile in its source
    pub index: usize,
    /// Mean colour over every pixel
    pub average_color: Color,
    /// Width divided by height
    pub aspect_ratio: f64,
    /// Height in pixels of the decoded image
    pub native_height: u32,
}

impl TileDescriptor {
    /// Summarise a decoded tile image
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if the image has no pixels
    pub fn from_image(index: usize, image: &RgbImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(invalid_source(&format!(
                "tile {index} has zero size ({width}x{height})"
            )));
        }

        let mut sums = [0u64; 3];
        for pixel in image.pixels() {
            for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
                *sum += u64::from(channel);
            }
        }
        let count = u64::from(width) * u64::from(height);
        let average_color = sums.map(|sum| sum as f64 / count as f64);

        Ok(Self {
            index,
            average_color,
            aspect_ratio: f64::from(width) / f64::from(height),
            native_height: height,
        })
    }
}

/// Ordered, read-only collection of tile descriptors
#[derive(Clone, Debug)]
pub struct TileCatalog {
    descriptors: Vec<TileDescriptor>,
}

impl TileCatalog {
    /// Build a catalog from existing descriptors
    ///
    /// Descriptors are re-indexed by position so that `index` always equals
    /// the slot a tile occupies.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if no descriptors are given
    pub fn from_descriptors(descriptors: Vec<TileDescriptor>) -> Result<Self> {
        if descriptors.is_empty() {
            return Err(invalid_source(&"tile catalog is empty"));
        }

        let descriptors = descriptors
            .into_iter()
            .enumerate()
            .map(|(index, descriptor)| TileDescriptor { index, ..descriptor })
            .collect();

        Ok(Self { descriptors })
    }

    /// Decode and describe every tile of a source in parallel
    ///
    /// # Errors
    ///
    /// Returns the first decoding error encountered, or `InvalidSourceData`
    /// if the source holds no tiles
    pub fn from_source<S: TileSource + ?Sized>(source: &S, progress: &ProgressBar) -> Result<Self> {
        let count = source.tile_count();
        progress.set_length(count as u64);

        let descriptors = (0..count)
            .into_par_iter()
            .map(|index| {
                let image = source.load_tile(index)?;
                let descriptor = TileDescriptor::from_image(index, &image);
                progress.inc(1);
                descriptor
            })
            .collect::<Result<Vec<_>>>()?;

        progress.finish_and_clear();
        Self::from_descriptors(descriptors)
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the catalog holds no tiles (never true once built)
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// All descriptors in index order
    pub fn descriptors(&self) -> &[TileDescriptor] {
        &self.descriptors
    }

    /// Look up a single descriptor
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileIndex` if `index` is outside the catalog
    pub fn get(&self, index: usize) -> Result<&TileDescriptor> {
        self.descriptors
            .get(index)
            .ok_or(MosaicError::InvalidTileIndex {
                index,
                max_tiles: self.descriptors.len(),
            })
    }

    /// Average colours in index order
    pub fn colors(&self) -> Vec<Color> {
        self.descriptors.iter().map(|d| d.average_color).collect()
    }

    /// Mean width/height ratio over all tiles
    pub fn mean_aspect_ratio(&self) -> f64 {
        let total: f64 = self.descriptors.iter().map(|d| d.aspect_ratio).sum();
        total / self.descriptors.len() as f64
    }

    /// Mean native height, truncated to whole pixels
    pub fn mean_height(&self) -> u32 {
        let total: u64 = self
            .descriptors
            .iter()
            .map(|d| u64::from(d.native_height))
            .sum();
        (total / self.descriptors.len() as u64) as u32
    }
}
