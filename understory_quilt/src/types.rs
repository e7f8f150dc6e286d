// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unit geometry: scroll axis and track-space blocks.

use kurbo::{Point, Rect, Size};

/// The direction in which a quilt scrolls.
///
/// The other direction is the *cross axis*: it is bounded by the number of
/// tracks that fit the viewport.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Content grows left to right; tracks are rows.
    Horizontal,
    /// Content grows top to bottom; tracks are columns.
    #[default]
    Vertical,
}

impl Axis {
    /// The component of `size` that lies along the cross axis.
    #[inline]
    pub const fn cross(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.height,
            Self::Vertical => size.width,
        }
    }

    /// The component of `size` that lies along the scroll axis.
    #[inline]
    pub const fn scroll(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Build a size from its cross and scroll components.
    #[inline]
    pub const fn size(self, cross: f64, scroll: f64) -> Size {
        match self {
            Self::Horizontal => Size::new(scroll, cross),
            Self::Vertical => Size::new(cross, scroll),
        }
    }

    /// Build a point from its cross and scroll components.
    #[inline]
    pub const fn point(self, cross: f64, scroll: f64) -> Point {
        match self {
            Self::Horizontal => Point::new(scroll, cross),
            Self::Vertical => Point::new(cross, scroll),
        }
    }

    /// Split a point into `(cross, scroll)`.
    #[inline]
    pub(crate) const fn split_point(self, point: Point) -> (f64, f64) {
        match self {
            Self::Horizontal => (point.y, point.x),
            Self::Vertical => (point.x, point.y),
        }
    }

    /// Split a rect into `(cross_min, cross_max, scroll_min, scroll_max)`.
    #[inline]
    pub(crate) const fn split_rect(self, rect: Rect) -> (f64, f64, f64, f64) {
        match self {
            Self::Horizontal => (rect.y0, rect.y1, rect.x0, rect.x1),
            Self::Vertical => (rect.x0, rect.x1, rect.y0, rect.y1),
        }
    }
}

/// The footprint of an item in track units.
///
/// `cross`/`scroll` are the origin and `cross_span`/`scroll_span` the extent
/// along each axis. Spans of a placed block are always at least 1.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Block {
    /// First cross-axis track covered.
    pub cross: u32,
    /// First scroll-axis track covered.
    pub scroll: u32,
    /// Number of cross-axis tracks covered.
    pub cross_span: u32,
    /// Number of scroll-axis tracks covered.
    pub scroll_span: u32,
}

impl Block {
    /// Create a new block from its origin and spans.
    #[inline(always)]
    pub const fn new(cross: u32, scroll: u32, cross_span: u32, scroll_span: u32) -> Self {
        Self {
            cross,
            scroll,
            cross_span,
            scroll_span,
        }
    }

    /// One past the last cross-axis track covered.
    #[inline]
    pub const fn cross_end(&self) -> u32 {
        self.cross.saturating_add(self.cross_span)
    }

    /// One past the last scroll-axis track covered.
    #[inline]
    pub const fn scroll_end(&self) -> u32 {
        self.scroll.saturating_add(self.scroll_span)
    }

    /// Whether the track cell `(cross, scroll)` lies inside this block.
    #[inline]
    pub const fn contains(&self, cross: u32, scroll: u32) -> bool {
        self.cross <= cross
            && cross < self.cross_end()
            && self.scroll <= scroll
            && scroll < self.scroll_end()
    }

    /// Whether two blocks share at least one track cell.
    ///
    /// Unlike pixel rects, blocks that merely touch along an edge do not overlap.
    ///
    /// ```
    /// use understory_quilt::Block;
    ///
    /// let a = Block::new(0, 0, 2, 1);
    /// assert!(a.overlaps(&Block::new(1, 0, 1, 1)));
    /// assert!(!a.overlaps(&Block::new(0, 1, 2, 1)));
    /// ```
    #[inline]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.cross < other.cross_end()
            && other.cross < self.cross_end()
            && self.scroll < other.scroll_end()
            && other.scroll < self.scroll_end()
    }

    /// Iterate the `(cross, scroll)` track cells covered by this block.
    ///
    /// Cells are yielded scroll-major, lowest cross first within a row.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + use<> {
        let (c0, c1) = (self.cross, self.cross_end());
        (self.scroll..self.scroll_end()).flat_map(move |s| (c0..c1).map(move |c| (c, s)))
    }

    /// The pixel rect of this block for the given cell size, before insets.
    pub fn to_rect(&self, axis: Axis, cell: Size) -> Rect {
        let cell_cross = axis.cross(cell);
        let cell_scroll = axis.scroll(cell);
        let origin = axis.point(
            f64::from(self.cross) * cell_cross,
            f64::from(self.scroll) * cell_scroll,
        );
        let size = axis.size(
            f64::from(self.cross_span) * cell_cross,
            f64::from(self.scroll_span) * cell_scroll,
        );
        Rect::from_origin_size(origin, size)
    }
}
