//! Tile analysis performed once before matching

/// Per-tile colour and shape descriptors
pub mod catalog;
