//! Tile choice for cells the one-to-one matching could not cover
//!
//! Every leftover cell picks independently, with replacement, from the
//! whole catalog: uniformly among tiles closer than the colour threshold,
//! or among the nearest few tiles when none is close enough.

use crate::math::Color;
use crate::math::distance::distances_to;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rayon::prelude::*;

/// Tiles eligible for a cell given their distances to it
///
/// Tiles strictly closer than `color_diff` qualify. If none does, the
/// `fallback` nearest tiles qualify instead (all of them when the catalog
/// is smaller), ordered by distance with ties kept in index order.
pub fn candidate_tiles(distances: &[f64], color_diff: f64, fallback: usize) -> Vec<usize> {
    let within: Vec<usize> = distances
        .iter()
        .enumerate()
        .filter_map(|(tile, &distance)| (distance < color_diff).then_some(tile))
        .collect();
    if !within.is_empty() {
        return within;
    }

    let mut ranked: Vec<(usize, f64)> = distances.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked.into_iter().take(fallback).map(|(tile, _)| tile).collect()
}

/// Threshold-with-fallback picker over a fixed set of tile colours
#[derive(Clone, Debug)]
pub struct LeftoverResolver {
    tile_colors: Vec<Color>,
    color_diff: f64,
    fallback: usize,
}

impl LeftoverResolver {
    /// Create a resolver over every tile of a catalog
    pub const fn new(tile_colors: Vec<Color>, color_diff: f64, fallback: usize) -> Self {
        Self {
            tile_colors,
            color_diff,
            fallback,
        }
    }

    /// Pick a tile for one cell colour
    ///
    /// Returns `None` only when there are no tiles at all.
    pub fn resolve<R: rand::Rng + ?Sized>(&self, cell_color: Color, rng: &mut R) -> Option<usize> {
        let distances = distances_to(&self.tile_colors, cell_color);
        let candidates = candidate_tiles(&distances, self.color_diff, self.fallback);
        candidates.choose(rng).copied()
    }

    /// Pick tiles for many cells in parallel
    ///
    /// `cells` pairs each row-major cell index with its colour; `seeds`
    /// supplies one generator seed per cell so the outcome does not depend
    /// on thread scheduling. Returns `(cell, tile)` pairs in input order.
    pub fn resolve_all(&self, cells: &[(usize, Color)], seeds: &[u64]) -> Vec<(usize, usize)> {
        cells
            .par_iter()
            .zip(seeds.par_iter())
            .filter_map(|(&(cell, color), &seed)| {
                let mut rng = StdRng::seed_from_u64(seed);
                self.resolve(color, &mut rng).map(|tile| (cell, tile))
            })
            .collect()
    }
}
