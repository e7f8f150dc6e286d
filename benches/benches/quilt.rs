// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Criterion benchmarks for quilt packing.
//!
//! - Full pack of the whole sequence.
//! - Lazy culling: scroll a viewport through the sequence, packing on demand.
//! - Incremental repack after removing an item near the end.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use understory_benches::quilt_items;
use understory_quilt::{QuiltConfig, QuiltLayout};

fn config() -> QuiltConfig {
    QuiltConfig::new(Size::new(800.0, 600.0)).with_cell_size(Size::new(100.0, 100.0))
}

fn bench_quilt(c: &mut Criterion) {
    let mut group = c.benchmark_group("quilt");
    for &n in &[1_000_usize, 10_000, 50_000] {
        let items = quilt_items(0x5eed, n, 3, 8);

        group.bench_with_input(BenchmarkId::new("full_pack", n), &n, |b, &_n| {
            b.iter(|| {
                let mut layout = QuiltLayout::new(config());
                layout.compute_layout(&items);
                black_box(layout.content_size());
            });
        });

        group.bench_with_input(BenchmarkId::new("scroll_cull", n), &n, |b, &_n| {
            b.iter(|| {
                let mut layout = QuiltLayout::new(config());
                let mut offset = 0.0;
                let mut total = 0;
                while offset < 20_000.0 {
                    let window = Rect::new(0.0, offset, 800.0, offset + 600.0);
                    total += layout.items_intersecting(&items, window).len();
                    offset += 150.0;
                }
                black_box(total);
            });
        });

        let mut items_after = items.clone();
        let at = n - n / 20;
        items_after.remove(at);
        let mut packed = QuiltLayout::new(config());
        packed.compute_layout(&items);
        group.bench_with_input(BenchmarkId::new("remove_near_end", n), &n, |b, &_n| {
            b.iter(|| {
                let mut layout = packed.clone();
                black_box(layout.remove_item(&items_after, at));
                layout.compute_layout(&items_after);
                black_box(layout.content_extent());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_quilt);
criterion_main!(benches);
