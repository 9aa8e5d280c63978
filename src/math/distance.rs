//! Distance primitives between tile average colours and cell colours

use crate::math::Color;
use ndarray::Array2;

/// Straight-line distance between two colours in RGB space
pub fn euclidean(a: Color, b: Color) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Full `tiles x cells` matrix of colour distances
///
/// Row `i` holds the distances from tile `i` to every cell, in the order
/// the cells were given.
pub fn pairwise_distances(tiles: &[Color], cells: &[Color]) -> Array2<f64> {
    let mut distances = Array2::zeros((tiles.len(), cells.len()));
    for (mut row, &tile) in distances.rows_mut().into_iter().zip(tiles) {
        for (entry, &cell) in row.iter_mut().zip(cells) {
            *entry = euclidean(tile, cell);
        }
    }
    distances
}

/// Distances from every tile to a single cell colour
pub fn distances_to(tiles: &[Color], cell: Color) -> Vec<f64> {
    tiles.iter().map(|&tile| euclidean(tile, cell)).collect()
}
