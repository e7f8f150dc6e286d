// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition records returned from insert/remove.

use alloc::vec::Vec;

use kurbo::Rect;

/// Which mutation produced a [`Transition`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    /// An item was inserted at [`Transition::index`].
    Inserted,
    /// The item at [`Transition::index`] was removed.
    Removed,
}

/// What changed when an item was inserted or removed.
///
/// The layout is already consistent with the new item count when this is
/// returned. Hosts animate each entry of [`moved`][Self::moved] from its old
/// rect to [`QuiltLayout::rect_for_item`][crate::QuiltLayout::rect_for_item]
/// of its new index, and may drop the record once the animation completes.
///
/// Only items that had been packed before the mutation are listed.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Index at which the mutation happened.
    pub index: usize,
    /// Kind of mutation.
    pub kind: TransitionKind,
    /// Rect of the removed item, if it had been packed.
    pub removed: Option<Rect>,
    /// `(new_index, old_rect)` for each surviving item at or after `index`.
    pub moved: Vec<(usize, Rect)>,
}

impl Transition {
    /// Returns `true` if no packed geometry was affected.
    pub fn is_empty(&self) -> bool {
        self.removed.is_none() && self.moved.is_empty()
    }

    /// Returns the union of all old rects, or `None` if nothing was packed.
    ///
    /// This bounds the region that must be repainted at the start of the
    /// transition.
    pub fn union_rect(&self) -> Option<Rect> {
        let mut it = self
            .removed
            .iter()
            .copied()
            .chain(self.moved.iter().map(|&(_, r)| r));
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }
}
