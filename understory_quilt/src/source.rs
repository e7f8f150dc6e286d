// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item sources: the capability interface consulted by the packer, and an
//! owned, versioned item store implementing it.

use alloc::vec::Vec;

use kurbo::{Insets, Size};

/// Per-item inputs to a [`QuiltLayout`][crate::QuiltLayout].
///
/// Only [`len`][Self::len] is required. Every other method has a documented
/// default, so a source of uniform 1×1 cells is a one-method implementation.
///
/// Sizes are in track units (`width` × `height`, independent of the scroll
/// axis). Insets are in pixels and shrink the item's rect inside its block.
/// Malformed values are clamped by the packer rather than rejected.
pub trait QuiltSource {
    /// Number of items in the sequence.
    fn len(&self) -> usize;

    /// Returns `true` if the sequence has no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Requested size of `index` in track units. Defaults to 1×1.
    fn size_of(&self, index: usize) -> Size {
        let _ = index;
        Size::new(1.0, 1.0)
    }

    /// Pixel insets applied to `index`'s rect. Defaults to zero.
    fn insets_of(&self, index: usize) -> Insets {
        let _ = index;
        Insets::ZERO
    }

    /// Monotonic stamp that changes whenever the sequence changes.
    ///
    /// The packer relayouts from scratch when it sees a revision (or length) it
    /// was not told about through [`insert_item`][crate::QuiltLayout::insert_item]
    /// or [`remove_item`][crate::QuiltLayout::remove_item]. Each reported
    /// mutation must advance the revision by exactly one (wrapping), so any
    /// other edit made since the last call shows up as a larger step. Sources
    /// that return the default constant must call
    /// [`invalidate`][crate::QuiltLayout::invalidate] themselves after changing
    /// sizes in place.
    fn revision(&self) -> u64 {
        0
    }
}

/// One entry of a [`QuiltItems`] store.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuiltItem {
    /// Requested size in track units.
    pub size: Size,
    /// Pixel insets.
    pub insets: Insets,
}

impl QuiltItem {
    /// A 1×1 item without insets.
    pub const UNIT: Self = Self {
        size: Size::new(1.0, 1.0),
        insets: Insets::ZERO,
    };

    /// An item of the given track size without insets.
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            insets: Insets::ZERO,
        }
    }

    /// Replace the insets.
    pub const fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }
}

impl Default for QuiltItem {
    fn default() -> Self {
        Self::UNIT
    }
}

/// An owned, versioned sequence of quilt items.
///
/// Every mutation bumps [`QuiltSource::revision`] by one, so a layout reading
/// from this store notices any change that was not reported to it.
///
/// ```
/// use understory_quilt::{QuiltItem, QuiltItems, QuiltSource};
///
/// let mut items = QuiltItems::new();
/// items.push(QuiltItem::new(2.0, 1.0));
/// let before = items.revision();
/// items.insert(0, QuiltItem::UNIT);
/// assert_eq!(items.len(), 2);
/// assert!(items.revision() > before);
/// ```
#[derive(Clone, Debug, Default)]
pub struct QuiltItems {
    items: Vec<QuiltItem>,
    revision: u64,
}

impl QuiltItems {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from existing items.
    pub fn from_items(items: impl IntoIterator<Item = QuiltItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
            revision: 0,
        }
    }

    /// Get the item at `index`.
    pub fn get(&self, index: usize) -> Option<&QuiltItem> {
        self.items.get(index)
    }

    /// All items in order.
    pub fn as_slice(&self) -> &[QuiltItem] {
        &self.items
    }

    /// Append an item.
    pub fn push(&mut self, item: QuiltItem) {
        self.items.push(item);
        self.bump();
    }

    /// Insert an item at `index`, shifting later items up.
    ///
    /// `index` is clamped to `len()`.
    pub fn insert(&mut self, index: usize, item: QuiltItem) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.bump();
    }

    /// Remove and return the item at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<QuiltItem> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.bump();
        Some(item)
    }

    /// Change the requested size of `index`. Returns `false` if out of range.
    pub fn set_size(&mut self, index: usize, size: Size) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        item.size = size;
        self.bump();
        true
    }

    /// Change the insets of `index`. Returns `false` if out of range.
    pub fn set_insets(&mut self, index: usize, insets: Insets) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        item.insets = insets;
        self.bump();
        true
    }

    /// Remove all items.
    pub fn clear(&mut self) {
        self.items.clear();
        self.bump();
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl QuiltSource for QuiltItems {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn size_of(&self, index: usize) -> Size {
        self.items
            .get(index)
            .map_or(QuiltItem::UNIT.size, |item| item.size)
    }

    fn insets_of(&self, index: usize) -> Insets {
        self.items.get(index).map_or(Insets::ZERO, |item| item.insets)
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}

impl FromIterator<QuiltItem> for QuiltItems {
    fn from_iter<I: IntoIterator<Item = QuiltItem>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}
