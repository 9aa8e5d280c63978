use bitvec::prelude::*;
use std::fmt;

/// Fixed-size set of still-available indices
///
/// Tracks which tiles (matrix rows) or cells (matrix columns) have not yet
/// been consumed by the greedy matching. Uses 0-based indexing and starts
/// with every index live.
#[derive(Clone, Debug)]
pub struct LiveSet {
    bits: BitVec,
}

impl LiveSet {
    /// Create a set with every index in `0..len` live
    pub fn full(len: usize) -> Self {
        Self {
            bits: bitvec![1; len],
        }
    }

    /// Create a set with no live indices
    pub fn empty(len: usize) -> Self {
        Self {
            bits: bitvec![0; len],
        }
    }

    /// Mark an index as consumed
    ///
    /// Returns whether the index was live before the call.
    pub fn remove(&mut self, index: usize) -> bool {
        if self.contains(index) {
            self.bits.set(index, false);
            true
        } else {
            false
        }
    }

    /// Mark an index as live again
    pub fn insert(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, true);
        }
    }

    /// Test whether an index is still live
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Test if nothing is live
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Number of live indices
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Capacity of the set
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Live indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Collect live indices in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl fmt::Display for LiveSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LiveSet({}/{} live)", self.count(), self.capacity())
    }
}
