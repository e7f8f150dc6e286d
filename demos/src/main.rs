// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quilt demo: pack a random item store, draw it as text, then insert and
//! remove items the way a collection view would when the user taps.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos`

use kurbo::{Insets, Point, Rect, Size};
use rand::Rng;
use understory_quilt::{
    Axis, QuiltConfig, QuiltItem, QuiltItems, QuiltLayout, QuiltSource, Transition,
};

const ITEM_COUNT: usize = 40;

/// A random store of 1×1 to 2×2 items with a small gutter.
fn random_items(rng: &mut impl Rng) -> QuiltItems {
    (0..ITEM_COUNT)
        .map(|_| random_item(rng))
        .collect()
}

fn random_item(rng: &mut impl Rng) -> QuiltItem {
    let width = f64::from(rng.gen_range(1..=2_u8));
    let height = f64::from(rng.gen_range(1..=2_u8));
    QuiltItem::new(width, height).with_insets(Insets::uniform(2.0))
}

const GLYPHS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Draw the packed blocks as a character grid, one letter per item.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Track indices are u32 and the demo only targets 32/64-bit hosts."
)]
fn draw(layout: &QuiltLayout) -> String {
    let tracks = layout.track_count() as usize;
    let rows = layout.content_extent() as usize;
    let mut grid = vec![vec!['.'; tracks]; rows];
    for index in 0..layout.packed_len() {
        let Some(block) = layout.block_of(index) else {
            continue;
        };
        let glyph = char::from(GLYPHS[index % GLYPHS.len()]);
        for (cross, scroll) in block.cells() {
            grid[scroll as usize][cross as usize] = glyph;
        }
    }
    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe(transition: &Transition) {
    println!(
        "{:?} at {}: {} items move, repaint {:?}",
        transition.kind,
        transition.index,
        transition.moved.len(),
        transition.union_rect()
    );
}

fn main() {
    env_logger::init();

    let mut rng = rand::thread_rng();
    let mut items = random_items(&mut rng);

    let config = QuiltConfig::new(Size::new(320.0, 480.0))
        .with_cell_size(Size::new(75.0, 75.0))
        .with_axis(Axis::Vertical);
    let mut layout = QuiltLayout::new(config);

    // A first screenful, packed lazily.
    let screen = Rect::new(0.0, 0.0, 320.0, 480.0);
    let visible = layout.items_intersecting(&items, screen);
    log::info!(
        "{} items visible, {} of {} packed",
        visible.len(),
        layout.packed_len(),
        items.len()
    );

    layout.compute_layout(&items);
    println!("{}\n", draw(&layout));
    println!("content size: {:?}", layout.content_size());

    // Tap to add at the front, then tap an item to remove it.
    items.insert(0, random_item(&mut rng));
    let inserted = layout.insert_item(&items, 0);
    describe(&inserted);

    let tapped = layout.item_at_point(&items, Point::new(100.0, 100.0));
    if let Some(index) = tapped {
        items.remove(index);
        let removed = layout.remove_item(&items, index);
        describe(&removed);
    }

    layout.compute_layout(&items);
    println!("\n{}\n", draw(&layout));
    for index in 0..items.len().min(5) {
        println!("{index}: {:?}", layout.rect_for_item(&items, index));
    }
}
