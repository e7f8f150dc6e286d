// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sparse occupancy grid over `(cross, scroll)` track cells.

use core::fmt::Debug;

use hashbrown::HashMap;

use crate::Block;

/// Sparse map from track cells to the item occupying them.
///
/// Bounded along the cross axis by `tracks`, unbounded along the scroll axis.
/// The map is only ever probed by key, so its iteration order never leaks into
/// placement decisions.
#[derive(Clone)]
pub(crate) struct Occupancy {
    tracks: u32,
    cells: HashMap<(u32, u32), usize>,
}

impl Debug for Occupancy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Occupancy")
            .field("tracks", &self.tracks)
            .field("occupied_cells", &self.cells.len())
            .finish_non_exhaustive()
    }
}

impl Occupancy {
    pub(crate) fn new(tracks: u32) -> Self {
        Self {
            tracks: tracks.max(1),
            cells: HashMap::new(),
        }
    }

    pub(crate) const fn tracks(&self) -> u32 {
        self.tracks
    }

    /// Drop every cell and adopt a new track count.
    pub(crate) fn reset(&mut self, tracks: u32) {
        self.tracks = tracks.max(1);
        self.cells.clear();
    }

    /// The item occupying `(cross, scroll)`, if any.
    #[inline]
    pub(crate) fn get(&self, cross: u32, scroll: u32) -> Option<usize> {
        self.cells.get(&(cross, scroll)).copied()
    }

    #[inline]
    pub(crate) fn is_free(&self, cross: u32, scroll: u32) -> bool {
        !self.cells.contains_key(&(cross, scroll))
    }

    /// Whether every cell `block` covers is free and inside the track bounds.
    pub(crate) fn fits(&self, block: &Block) -> bool {
        block.cross_end() <= self.tracks && block.cells().all(|(c, s)| self.is_free(c, s))
    }

    /// Whether no cell in scroll row `scroll` is free.
    pub(crate) fn row_is_full(&self, scroll: u32) -> bool {
        (0..self.tracks).all(|c| !self.is_free(c, scroll))
    }

    /// Mark every cell of `block` as owned by `index`.
    pub(crate) fn occupy(&mut self, block: &Block, index: usize) {
        for cell in block.cells() {
            let prev = self.cells.insert(cell, index);
            debug_assert!(
                prev.is_none(),
                "cell {cell:?} already owned by {prev:?} when placing item {index}"
            );
        }
    }

    /// Free every cell of `block`.
    pub(crate) fn release(&mut self, block: &Block) {
        for cell in block.cells() {
            self.cells.remove(&cell);
        }
    }

    #[cfg(test)]
    pub(crate) fn occupied(&self) -> usize {
        self.cells.len()
    }
}
