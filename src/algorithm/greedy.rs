//! Global-minimum-first one-to-one matching of tiles to cells
//!
//! Each step commits to the single closest (tile, cell) pair among those
//! still available, then retires both. Earlier commitments are never
//! revisited, so the result is greedy rather than a minimum-cost matching.
//!
//! The dense distance matrix is kept intact; consumed rows and columns are
//! tracked with live sets, and each live row caches its current minimum so
//! a step only rescans rows whose cached minimum sat in the retired column.

use crate::algorithm::bitset::LiveSet;
use crate::math::Color;
use crate::math::distance::pairwise_distances;
use ndarray::Array2;

/// Result of the one-to-one phase
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GreedyOutcome {
    /// Committed (tile, cell) pairs in the order they were chosen
    pub pairs: Vec<(usize, usize)>,
    /// Tiles that never received a cell, ascending
    pub unused_tiles: Vec<usize>,
    /// Cells that never received a tile, in shuffled order
    pub leftover_cells: Vec<usize>,
}

/// Incremental greedy matcher over a tiles x cells distance matrix
///
/// Matrix columns follow `cell_order`, so ties between equally distant
/// cells go to whichever comes first in that order. Ties between tiles go
/// to the lowest tile index.
pub struct GreedyMatcher {
    distances: Array2<f64>,
    cell_order: Vec<usize>,
    live_tiles: LiveSet,
    live_columns: LiveSet,
    /// Per tile row: smallest live distance and the first column achieving it
    row_minima: Vec<Option<(f64, usize)>>,
}

impl GreedyMatcher {
    /// Prepare a matcher
    ///
    /// `cell_order` lists row-major cell indices in the order they become
    /// matrix columns; it should be a permutation of `0..cell_colors.len()`.
    /// Entries that do not name a cell are ignored.
    pub fn new(tile_colors: &[Color], cell_colors: &[Color], cell_order: &[usize]) -> Self {
        let cell_order: Vec<usize> = cell_order
            .iter()
            .copied()
            .filter(|&cell| cell < cell_colors.len())
            .collect();
        let ordered_colors: Vec<Color> = cell_order
            .iter()
            .filter_map(|&cell| cell_colors.get(cell).copied())
            .collect();

        let distances = pairwise_distances(tile_colors, &ordered_colors);
        let live_tiles = LiveSet::full(tile_colors.len());
        let live_columns = LiveSet::full(ordered_colors.len());
        let row_minima = (0..tile_colors.len())
            .map(|row| row_minimum(&distances, row, &live_columns))
            .collect();

        Self {
            distances,
            cell_order,
            live_tiles,
            live_columns,
            row_minima,
        }
    }

    /// Number of pairs the matcher will commit in total
    pub fn total_steps(&self) -> usize {
        self.live_tiles.capacity().min(self.live_columns.capacity())
    }

    /// Whether tiles or cells have run out
    pub fn is_exhausted(&self) -> bool {
        self.live_tiles.is_empty() || self.live_columns.is_empty()
    }

    /// Commit the closest remaining pair
    ///
    /// Returns `(tile, cell)` with `cell` as a row-major index, or `None`
    /// once tiles or cells are exhausted.
    pub fn step(&mut self) -> Option<(usize, usize)> {
        let mut best: Option<(f64, usize, usize)> = None;
        for row in self.live_tiles.iter() {
            if let Some(Some((distance, column))) = self.row_minima.get(row).copied()
                && best.is_none_or(|(min, _, _)| distance < min)
            {
                best = Some((distance, row, column));
            }
        }

        let (_, tile, column) = best?;
        let cell = self.cell_order.get(column).copied()?;

        self.live_tiles.remove(tile);
        self.live_columns.remove(column);
        if let Some(slot) = self.row_minima.get_mut(tile) {
            *slot = None;
        }

        // Rows whose minimum was in the retired column need a fresh scan
        for row in self.live_tiles.iter() {
            if let Some(slot) = self.row_minima.get_mut(row)
                && slot.is_some_and(|(_, min_column)| min_column == column)
            {
                *slot = row_minimum(&self.distances, row, &self.live_columns);
            }
        }

        Some((tile, cell))
    }

    /// Tiles and cells left over once matching stops
    pub fn remainder(&self) -> (Vec<usize>, Vec<usize>) {
        let leftover_cells = self
            .live_columns
            .iter()
            .filter_map(|column| self.cell_order.get(column).copied())
            .collect();
        (self.live_tiles.to_vec(), leftover_cells)
    }
}

fn row_minimum(distances: &Array2<f64>, row: usize, live_columns: &LiveSet) -> Option<(f64, usize)> {
    let mut best: Option<(f64, usize)> = None;
    for column in live_columns.iter() {
        let Some(&distance) = distances.get([row, column]) else {
            continue;
        };
        if best.is_none_or(|(min, _)| distance < min) {
            best = Some((distance, column));
        }
    }
    best
}

/// Run the greedy matching to completion
pub fn greedy_match(
    tile_colors: &[Color],
    cell_colors: &[Color],
    cell_order: &[usize],
) -> GreedyOutcome {
    let mut matcher = GreedyMatcher::new(tile_colors, cell_colors, cell_order);
    let mut pairs = Vec::with_capacity(matcher.total_steps());
    while let Some(pair) = matcher.step() {
        pairs.push(pair);
    }

    let (unused_tiles, leftover_cells) = matcher.remainder();
    GreedyOutcome {
        pairs,
        unused_tiles,
        leftover_cells,
    }
}
