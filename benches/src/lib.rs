// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for the Understory benchmarks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use understory_quilt::{QuiltItem, QuiltItems};

/// A reproducible item store with spans in `1..=max_span` on both axes.
///
/// Roughly one item in `big_every` gets the maximum span; the rest are 1×1 or 1×2.
pub fn quilt_items(seed: u64, count: usize, max_span: u32, big_every: u32) -> QuiltItems {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            if rng.gen_range(0..big_every.max(1)) == 0 {
                let span = f64::from(max_span);
                QuiltItem::new(span, span)
            } else {
                QuiltItem::new(1.0, f64::from(rng.gen_range(1..=2_u32)))
            }
        })
        .collect()
}
