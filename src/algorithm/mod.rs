/// Live index sets for matrix rows and columns
pub mod bitset;
/// Run orchestration and seeded randomness
pub mod executor;
/// Greedy one-to-one tile to cell matching
pub mod greedy;
/// Threshold-with-fallback choice for uncovered cells
pub mod leftover;
