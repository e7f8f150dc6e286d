// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The quilt packer: first-fit placement, lazy extension, incremental updates.

use alloc::vec::Vec;

use kurbo::{Insets, Point, Rect, Size};

use crate::grid::Occupancy;
use crate::{Axis, Block, QuiltConfig, QuiltSource, Transition, TransitionKind};

/// Largest scroll-axis span an item may request, in tracks.
///
/// Larger requests are clamped. The cross-axis span is clamped to the track
/// count instead.
pub const MAX_SCROLL_SPAN: u32 = 1024;

#[derive(Copy, Clone, Debug, PartialEq)]
struct Placed {
    block: Block,
    rect: Rect,
}

/// Packs variable-sized items into a gap-free grid.
///
/// Items are placed in index order. Each one takes the first free slot of its
/// size, scanning scroll tracks from the *frontier* (the lowest scroll track
/// with a free cell) and, within a scroll track, cross tracks from zero. The
/// result depends only on the item sizes and their order.
///
/// The layout never stores its [`QuiltSource`]: every method that may need to
/// pack takes the source by reference. Packing is lazy unless
/// [`QuiltConfig::eager`] is set; geometry queries extend the packed prefix
/// only as far as they need, and never move an item that is already placed.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Rect, Size};
/// use understory_quilt::{Block, QuiltConfig, QuiltItem, QuiltItems, QuiltLayout};
///
/// // Two 100px tracks; the second item is two tracks wide.
/// let config = QuiltConfig::new(Size::new(200.0, 400.0));
/// let items: QuiltItems = [QuiltItem::UNIT, QuiltItem::new(2.0, 1.0), QuiltItem::UNIT]
///     .into_iter()
///     .collect();
///
/// let mut layout = QuiltLayout::new(config);
/// layout.compute_layout(&items);
///
/// assert_eq!(layout.block_of(1), Some(Block::new(0, 1, 2, 1)));
/// // The third item back-fills the gap next to the first.
/// assert_eq!(layout.rect_for_item(&items, 2), Some(Rect::new(100.0, 0.0, 200.0, 100.0)));
/// assert_eq!(layout.content_size(), Size::new(200.0, 200.0));
/// ```
#[derive(Clone, Debug)]
pub struct QuiltLayout {
    config: QuiltConfig,
    cell: Size,
    occupancy: Occupancy,
    placed: Vec<Placed>,
    /// Item count last observed from the source.
    len: usize,
    /// Source revision last observed; `None` until the first sync.
    revision: Option<u64>,
    frontier: u32,
    extent: u32,
}

impl Default for QuiltLayout {
    fn default() -> Self {
        Self::new(QuiltConfig::default())
    }
}

impl QuiltLayout {
    /// Create an empty layout.
    ///
    /// Nothing is packed until a method taking a [`QuiltSource`] is called.
    pub fn new(config: QuiltConfig) -> Self {
        Self {
            config,
            cell: config.effective_cell_size(),
            occupancy: Occupancy::new(config.track_count()),
            placed: Vec::new(),
            len: 0,
            revision: None,
            frontier: 0,
            extent: 0,
        }
    }

    /// The current configuration.
    #[must_use]
    pub const fn config(&self) -> &QuiltConfig {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// Relayouts from scratch if the track grid changes: a different axis, cell
    /// size, or number of cross-axis tracks. Otherwise packed geometry is kept.
    pub fn set_config(&mut self, config: QuiltConfig) {
        let cell = config.effective_cell_size();
        let tracks = config.track_count();
        let relayout =
            config.axis != self.config.axis || cell != self.cell || tracks != self.track_count();
        self.config = config;
        self.cell = cell;
        if relayout {
            self.invalidate();
        }
    }

    /// Set the viewport size. See [`set_config`][Self::set_config].
    pub fn set_viewport_size(&mut self, viewport: Size) {
        self.set_config(self.config.with_viewport(viewport));
    }

    /// Set the cell size. See [`set_config`][Self::set_config].
    pub fn set_cell_size(&mut self, cell_size: Size) {
        self.set_config(self.config.with_cell_size(cell_size));
    }

    /// Set the scroll axis. See [`set_config`][Self::set_config].
    pub fn set_axis(&mut self, axis: Axis) {
        self.set_config(self.config.with_axis(axis));
    }

    /// Enable or disable eager packing. Never relayouts by itself.
    pub fn set_eager(&mut self, eager: bool) {
        self.config.eager = eager;
    }

    /// Drop all packed geometry.
    ///
    /// The next call taking a [`QuiltSource`] re-reads the item count and
    /// packs again from index 0.
    pub fn invalidate(&mut self) {
        log::debug!(
            "quilt invalidated: {} of {} items were packed",
            self.placed.len(),
            self.len
        );
        self.clear();
        self.revision = None;
    }

    /// Number of cross-axis tracks.
    #[must_use]
    pub const fn track_count(&self) -> u32 {
        self.occupancy.tracks()
    }

    /// Item count last observed from the source.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the last observed source was empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of items that currently have a block, always a prefix `0..packed_len`.
    #[must_use]
    pub fn packed_len(&self) -> usize {
        self.placed.len()
    }

    /// Lowest scroll track that still has a free cell.
    #[must_use]
    pub const fn frontier(&self) -> u32 {
        self.frontier
    }

    /// One past the furthest scroll track covered by any packed block.
    #[must_use]
    pub const fn content_extent(&self) -> u32 {
        self.extent
    }

    /// Total scrollable size of the packed content.
    ///
    /// Along the scroll axis this is the content extent in pixels; along the
    /// cross axis it is the viewport extent. With lazy packing it covers only
    /// the packed prefix.
    #[must_use]
    pub fn content_size(&self) -> Size {
        let axis = self.config.axis;
        let cross = axis.cross(self.config.viewport).max(0.0);
        let scroll = f64::from(self.extent) * axis.scroll(self.cell);
        axis.size(cross, scroll)
    }

    /// Block of an already packed item, without packing.
    #[must_use]
    pub fn block_of(&self, index: usize) -> Option<Block> {
        self.placed.get(index).map(|p| p.block)
    }

    /// Rect of an already packed item, without packing.
    #[must_use]
    pub fn rect_of(&self, index: usize) -> Option<Rect> {
        self.placed.get(index).map(|p| p.rect)
    }

    /// Pack every item of `source`.
    ///
    /// Already packed items keep their blocks; packing continues from the
    /// first unpacked index.
    pub fn compute_layout<S: QuiltSource + ?Sized>(&mut self, source: &S) {
        self.sync(source);
        self.pack_to(source, self.len);
    }

    /// Pixel rect of `index`, packing forward as far as needed.
    ///
    /// Returns `None` if `index` is not below the source's item count.
    pub fn rect_for_item<S: QuiltSource + ?Sized>(
        &mut self,
        source: &S,
        index: usize,
    ) -> Option<Rect> {
        self.sync(source);
        if index >= self.len {
            return None;
        }
        self.pack_to(source, index + 1);
        self.rect_of(index)
    }

    /// Block of `index`, packing forward as far as needed.
    ///
    /// Returns `None` if `index` is not below the source's item count.
    pub fn block_for_item<S: QuiltSource + ?Sized>(
        &mut self,
        source: &S,
        index: usize,
    ) -> Option<Block> {
        self.sync(source);
        if index >= self.len {
            return None;
        }
        self.pack_to(source, index + 1);
        self.block_of(index)
    }

    /// Indices of items whose block overlaps `region`, in ascending order.
    ///
    /// Packs just far enough that no later item could land in `region`.
    /// Overlap requires positive area; touching edges do not count. The test is
    /// made against blocks, so an item whose insets keep it visually outside
    /// `region` is still reported.
    pub fn items_intersecting<S: QuiltSource + ?Sized>(
        &mut self,
        source: &S,
        region: Rect,
    ) -> Vec<usize> {
        self.sync(source);
        let mut out = Vec::new();
        let region = region.abs();
        if !region.is_finite() || region.is_zero_area() {
            return out;
        }

        let axis = self.config.axis;
        let (c0, c1, s0, s1) = axis.split_rect(region);
        let cell_cross = axis.cross(self.cell);
        let cell_scroll = axis.scroll(self.cell);
        let first_row = floor_track(s0 / cell_scroll);
        let end_row = ceil_track(s1 / cell_scroll);
        let first_col = floor_track(c0 / cell_cross);
        let end_col = ceil_track(c1 / cell_cross).min(self.track_count());
        if first_row >= end_row || first_col >= end_col {
            return out;
        }

        // Once every row before `end_row` is full, later items land past the region.
        while self.placed.len() < self.len && self.frontier < end_row {
            self.place(source, self.placed.len());
        }

        for row in first_row..end_row.min(self.extent) {
            for col in first_col..end_col {
                if let Some(index) = self.occupancy.get(col, row) {
                    out.push(index);
                }
            }
        }
        out.sort_unstable();
        out.dedup();
        out
    }

    /// The item whose (inset) rect contains `point`, packing forward as needed.
    pub fn item_at_point<S: QuiltSource + ?Sized>(
        &mut self,
        source: &S,
        point: Point,
    ) -> Option<usize> {
        self.sync(source);
        if !point.is_finite() {
            return None;
        }
        let axis = self.config.axis;
        let (cross, scroll) = axis.split_point(point);
        if cross < 0.0 || scroll < 0.0 {
            return None;
        }
        let col = floor_track(cross / axis.cross(self.cell));
        let row = floor_track(scroll / axis.scroll(self.cell));
        if col >= self.track_count() {
            return None;
        }

        while self.placed.len() < self.len && self.frontier <= row {
            self.place(source, self.placed.len());
        }

        let index = self.occupancy.get(col, row)?;
        self.placed[index].rect.contains(point).then_some(index)
    }

    /// Account for an item inserted into `source` at `index`.
    ///
    /// `source` must already contain the new item. Blocks before `index` are
    /// kept; everything from `index` on is repacked before the next geometry
    /// query (immediately with eager packing).
    ///
    /// The reported insert must be the only change since the layout last
    /// looked at `source`: one more item, and a revision bumped exactly once
    /// (or left alone, for sources without revisions). Otherwise the layout
    /// is invalidated instead and an empty [`Transition`] is returned.
    pub fn insert_item<S: QuiltSource + ?Sized>(
        &mut self,
        source: &S,
        index: usize,
    ) -> Transition {
        let len = source.len();
        let consistent =
            self.is_one_mutation(source.revision()) && len == self.len + 1 && index <= self.len;
        if !consistent {
            return self.resync_after_mismatch(source, index, TransitionKind::Inserted);
        }

        let moved = self
            .truncate(index)
            .into_iter()
            .enumerate()
            .map(|(offset, p)| (index + offset + 1, p.rect))
            .collect();
        self.len = len;
        self.revision = Some(source.revision());
        if self.config.eager {
            self.pack_to(source, self.len);
        }

        Transition {
            index,
            kind: TransitionKind::Inserted,
            removed: None,
            moved,
        }
    }

    /// Account for the item at `index` having been removed from `source`.
    ///
    /// `source` must already be missing the item. Blocks before `index` are
    /// kept; everything after it shifts down by one and is repacked before the
    /// next geometry query (immediately with eager packing).
    ///
    /// As with [`insert_item`][Self::insert_item], the removal must be the
    /// only change to `source` since the layout last looked at it; otherwise
    /// the layout is invalidated and an empty [`Transition`] is returned.
    pub fn remove_item<S: QuiltSource + ?Sized>(
        &mut self,
        source: &S,
        index: usize,
    ) -> Transition {
        let len = source.len();
        let consistent =
            self.is_one_mutation(source.revision()) && len + 1 == self.len && index < self.len;
        if !consistent {
            return self.resync_after_mismatch(source, index, TransitionKind::Removed);
        }

        let mut suffix = self.truncate(index).into_iter();
        let removed = suffix.next().map(|p| p.rect);
        let moved = suffix
            .enumerate()
            .map(|(offset, p)| (index + offset, p.rect))
            .collect();
        self.len = len;
        self.revision = Some(source.revision());
        if self.config.eager {
            self.pack_to(source, self.len);
        }

        Transition {
            index,
            kind: TransitionKind::Removed,
            removed,
            moved,
        }
    }

    /// Whether `revision` is at most one step past the last observed one.
    ///
    /// A constant revision is accepted so sources without revisions can still
    /// report mutations; the length check then carries the whole burden.
    fn is_one_mutation(&self, revision: u64) -> bool {
        self.revision
            .is_some_and(|last| revision == last || revision == last.wrapping_add(1))
    }

    fn resync_after_mismatch<S: QuiltSource + ?Sized>(
        &mut self,
        source: &S,
        index: usize,
        kind: TransitionKind,
    ) -> Transition {
        if let Some(last) = self.revision {
            log::warn!(
                "quilt {kind:?} at {index} does not match source (had {} items at revision {last}, source has {} at revision {}); relaying out",
                self.len,
                source.len(),
                source.revision()
            );
        }
        self.invalidate();
        self.sync(source);
        Transition {
            index,
            kind,
            removed: None,
            moved: Vec::new(),
        }
    }

    /// Relayout from scratch if the source changed behind our back.
    fn sync<S: QuiltSource + ?Sized>(&mut self, source: &S) {
        let revision = source.revision();
        let len = source.len();
        if self.revision != Some(revision) || self.len != len {
            if self.revision.is_some() {
                log::debug!(
                    "quilt source changed (revision {:?} -> {revision}, {} -> {len} items); relaying out",
                    self.revision,
                    self.len
                );
            }
            self.clear();
            self.revision = Some(revision);
            self.len = len;
        }
        if self.config.eager {
            self.pack_to(source, self.len);
        }
    }

    fn clear(&mut self) {
        self.placed.clear();
        self.occupancy.reset(self.config.track_count());
        self.frontier = 0;
        self.extent = 0;
    }

    /// Pack items up to (excluding) `end`, clamped to the item count.
    fn pack_to<S: QuiltSource + ?Sized>(&mut self, source: &S, end: usize) {
        let end = end.min(self.len);
        let start = self.placed.len();
        if start >= end {
            return;
        }
        for index in start..end {
            self.place(source, index);
        }
        log::trace!(
            "quilt packed items {start}..{end}, frontier {}, extent {}",
            self.frontier,
            self.extent
        );
    }

    /// Place `index`, which must be the first unpacked item.
    fn place<S: QuiltSource + ?Sized>(&mut self, source: &S, index: usize) {
        debug_assert_eq!(index, self.placed.len(), "items are placed in order");
        let (cross_span, scroll_span) = self.spans_for(source.size_of(index), index);
        let last_cross = self.track_count() - cross_span;

        let mut scroll = self.frontier;
        let block = loop {
            let found = (0..=last_cross)
                .map(|cross| Block::new(cross, scroll, cross_span, scroll_span))
                .find(|candidate| self.occupancy.fits(candidate));
            if let Some(block) = found {
                break block;
            }
            // Every row at or past `extent` is empty, so this terminates there.
            scroll += 1;
        };

        self.occupancy.occupy(&block, index);
        let rect = inset_rect(
            block.to_rect(self.config.axis, self.cell),
            source.insets_of(index),
        );
        self.placed.push(Placed { block, rect });
        self.extent = self.extent.max(block.scroll_end());
        while self.occupancy.row_is_full(self.frontier) {
            self.frontier += 1;
        }
    }

    /// Drop blocks from `from` on, returning them in index order.
    fn truncate(&mut self, from: usize) -> Vec<Placed> {
        if from >= self.placed.len() {
            return Vec::new();
        }
        let suffix = self.placed.split_off(from);
        for p in &suffix {
            self.occupancy.release(&p.block);
            // The freed cells are the only new gaps.
            self.frontier = self.frontier.min(p.block.scroll);
        }
        self.extent = self
            .placed
            .iter()
            .map(|p| p.block.scroll_end())
            .max()
            .unwrap_or(0);
        log::trace!(
            "quilt dropped {} packed items from {from}, frontier {}, extent {}",
            suffix.len(),
            self.frontier,
            self.extent
        );
        suffix
    }

    /// Track spans for a requested size, clamped to something placeable.
    fn spans_for(&self, size: Size, index: usize) -> (u32, u32) {
        let axis = self.config.axis;
        let cross = axis.cross(size);
        let scroll = axis.scroll(size);
        if !(cross.is_finite() && scroll.is_finite() && cross > 0.0 && scroll > 0.0) {
            log::debug!("quilt item {index} has unusable size {size:?}; using 1x1");
            return (1, 1);
        }
        let tracks = self.track_count();
        let cross_span = ceil_track(cross);
        let scroll_span = ceil_track(scroll);
        if cross_span > tracks || scroll_span > MAX_SCROLL_SPAN {
            log::debug!(
                "quilt item {index} size {size:?} clamped to {tracks} cross / {MAX_SCROLL_SPAN} scroll tracks"
            );
        }
        (cross_span.min(tracks), scroll_span.min(MAX_SCROLL_SPAN))
    }
}

/// Largest track index not above `value`. Negative and NaN map to 0.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Truncation is the intended floor for non-negative values; the cast saturates."
)]
#[inline]
fn floor_track(value: f64) -> u32 {
    value as u32
}

/// Smallest track count not below `value`. Non-positive and NaN map to 0.
#[inline]
fn ceil_track(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    let t = floor_track(value);
    if f64::from(t) < value {
        t.saturating_add(1)
    } else {
        t
    }
}

/// Shrink `rect` by `insets`.
///
/// Non-finite or negative inset components count as zero. If the insets
/// consume an axis entirely, the rect collapses to its center on that axis.
fn inset_rect(rect: Rect, insets: Insets) -> Rect {
    fn clean(v: f64) -> f64 {
        if v.is_finite() && v > 0.0 { v } else { 0.0 }
    }
    let (left, top, right, bottom) = (
        clean(insets.x0),
        clean(insets.y0),
        clean(insets.x1),
        clean(insets.y1),
    );
    if left + right > rect.width() || top + bottom > rect.height() {
        log::debug!("quilt insets {insets:?} exceed {rect:?}; collapsing");
    }
    let (x0, x1) = shrink(rect.x0, rect.x1, left, right);
    let (y0, y1) = shrink(rect.y0, rect.y1, top, bottom);
    Rect::new(x0, y0, x1, y1)
}

fn shrink(min: f64, max: f64, before: f64, after: f64) -> (f64, f64) {
    let (lo, hi) = (min + before, max - after);
    if lo <= hi {
        (lo, hi)
    } else {
        let mid = 0.5 * (min + max);
        (mid, mid)
    }
}
