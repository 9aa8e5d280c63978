//! Photomosaic construction: rebuild a reference image out of many tile images
//!
//! Tiles are summarised by their average colour, a grid is planned from the
//! reference image and the tile shapes, and tiles are matched to cells by a
//! greedy closest-pair-first heuristic. Cells left over when tiles run out
//! reuse tiles within a colour tolerance. Each tile is then letterboxed into
//! its cell on the output canvas.

#![forbid(unsafe_code)]

/// Tile matching: greedy one-to-one phase, leftover phase and orchestration
pub mod algorithm;
/// Tile catalog construction
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Colour types and distance primitives
pub mod math;
/// Canvas rendering
pub mod render;
/// Layout planning, reference grid and cell assignment
pub mod spatial;

pub use io::error::{MosaicError, Result};
