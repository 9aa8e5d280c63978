//! Spatial layout of the mosaic
//!
//! This module contains:
//! - Layout planning (grid size and cell size)
//! - The reference grid and the per-cell tile assignment

/// Reference grid and cell assignment
pub mod grid;
/// Grid and cell size planning
pub mod layout;

pub use grid::{CellAssignment, ReferenceGrid};
pub use layout::MosaicPlan;
