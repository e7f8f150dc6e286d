// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_quilt --heading-base-level=0

//! Understory Quilt: a deterministic, gap-free grid packer for variable-sized cells.
//!
//! A *quilt* is a scrolling grid in which each item covers a rectangle of whole
//! cells. Items are packed greedily in index order: each one takes the first
//! free slot of its size, so later small items back-fill gaps left by earlier
//! large ones.
//!
//! The core concepts are:
//!
//! - [`QuiltConfig`]: cell size, viewport size, scroll [`Axis`], and whether
//!   to pack eagerly. The number of cross-axis *tracks* is the viewport's
//!   cross extent divided by the cell size.
//! - [`QuiltSource`]: the per-item inputs (count, size in tracks, pixel
//!   insets, revision) with documented defaults. [`QuiltItems`] is an owned,
//!   versioned implementation.
//! - [`QuiltLayout`]: the packer. It assigns each item a [`Block`] (its
//!   footprint in track units) and a pixel rect, and answers culling and
//!   hit-testing queries.
//! - [`Transition`]: returned by [`QuiltLayout::insert_item`] and
//!   [`QuiltLayout::remove_item`] so hosts can animate surviving items from
//!   their old rects.
//!
//! This crate does not know about views, cells, or animation. Host frameworks
//! own the data and views, pass the source into each call, render the rects
//! they get back, and report inserts and removals.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_quilt::{QuiltConfig, QuiltItem, QuiltItems, QuiltLayout};
//!
//! // A 300px wide viewport with the default 100×100 cells: three tracks.
//! let mut items: QuiltItems = (0..20).map(|_| QuiltItem::UNIT).collect();
//! items.set_size(0, Size::new(2.0, 2.0));
//!
//! let mut layout = QuiltLayout::new(QuiltConfig::new(Size::new(300.0, 500.0)));
//!
//! // Only what the viewport needs is packed.
//! let visible = layout.items_intersecting(&items, Rect::new(0.0, 0.0, 300.0, 200.0));
//! assert_eq!(visible, [0, 1, 2]);
//!
//! // Remove an item; earlier geometry is kept and the rest is repacked on demand.
//! items.remove(1);
//! let transition = layout.remove_item(&items, 1);
//! assert_eq!(transition.moved.first().map(|&(index, _)| index), Some(1));
//! assert_eq!(layout.rect_for_item(&items, 1), Some(Rect::new(200.0, 0.0, 300.0, 100.0)));
//! ```
//!
//! ## Packing rules
//!
//! - Scroll tracks are scanned from the frontier (the lowest one with a free
//!   cell); within a scroll track, the lowest cross offset wins.
//! - Sizes are rounded up to whole tracks. Cross spans wider than the track
//!   count are clamped to it, scroll spans to [`MAX_SCROLL_SPAN`]. Non-finite
//!   or non-positive sizes become 1×1.
//! - Negative or non-finite insets count as zero.
//! - Already placed items never move unless the layout is invalidated or an
//!   item before them is inserted or removed.
//!
//! Clamping and invalidation are reported through the [`log`] facade.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod grid;
mod layout;
mod source;
mod transition;
mod types;

pub use config::QuiltConfig;
pub use layout::{MAX_SCROLL_SPAN, QuiltLayout};
pub use source::{QuiltItem, QuiltItems, QuiltSource};
pub use transition::{Transition, TransitionKind};
pub use types::{Axis, Block};
