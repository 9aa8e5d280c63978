//! Final canvas rendering

/// Letterbox fitting and parallel cell compositing
pub mod compositor;
