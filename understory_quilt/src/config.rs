// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout configuration.

use kurbo::Size;

use crate::Axis;

/// Configuration of a [`QuiltLayout`][crate::QuiltLayout].
///
/// Changing any field that affects the track grid (the cell size, the scroll
/// axis, or the viewport extent along the cross axis) forces a full relayout.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuiltConfig {
    /// Pixel size of a single 1×1 cell.
    pub cell_size: Size,
    /// Pixel size of the viewport. Only the cross-axis component affects packing.
    pub viewport: Size,
    /// Direction in which content grows.
    pub axis: Axis,
    /// Pack the whole sequence up front instead of lazily.
    ///
    /// Eager packing makes [`QuiltLayout::content_size`][crate::QuiltLayout::content_size]
    /// exact from the first query at the cost of touching every item. It is a
    /// good fit for sequences of up to a few thousand items.
    pub eager: bool,
}

impl QuiltConfig {
    /// Cell size used when none (or an unusable one) is configured.
    pub const DEFAULT_CELL_SIZE: Size = Size::new(100.0, 100.0);

    /// Create a configuration with default cell size and axis for the given viewport.
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Set the cell size.
    pub fn with_cell_size(mut self, cell_size: Size) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set the viewport size.
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    /// Set the scroll axis.
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Enable or disable eager packing.
    pub fn with_eager(mut self, eager: bool) -> Self {
        self.eager = eager;
        self
    }

    /// The cell size actually used for layout.
    ///
    /// Non-finite or non-positive components fall back to [`Self::DEFAULT_CELL_SIZE`].
    pub fn effective_cell_size(&self) -> Size {
        let w = self.cell_size.width;
        let h = self.cell_size.height;
        if w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0 {
            self.cell_size
        } else {
            log::debug!(
                "unusable quilt cell size {:?}, using {:?}",
                self.cell_size,
                Self::DEFAULT_CELL_SIZE
            );
            Self::DEFAULT_CELL_SIZE
        }
    }

    /// Number of tracks that fit along the cross axis. Always at least 1.
    pub fn track_count(&self) -> u32 {
        let cell = self.axis.cross(self.effective_cell_size());
        let extent = self.axis.cross(self.viewport);
        if !(extent.is_finite() && extent > 0.0) {
            return 1;
        }
        let tracks = extent / cell;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Truncation is the intended floor; the cast saturates for huge viewports."
        )]
        let tracks = tracks as u32;
        tracks.max(1)
    }
}

impl Default for QuiltConfig {
    fn default() -> Self {
        Self {
            cell_size: Self::DEFAULT_CELL_SIZE,
            viewport: Size::ZERO,
            axis: Axis::Vertical,
            eager: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::QuiltConfig;
    use crate::Axis;

    #[test]
    fn track_count_floors_cross_extent() {
        let config = QuiltConfig::new(Size::new(320.0, 480.0));
        assert_eq!(config.track_count(), 3);

        let config = config.with_axis(Axis::Horizontal);
        assert_eq!(config.track_count(), 4);
    }

    #[test]
    fn narrow_viewport_keeps_one_track() {
        let config = QuiltConfig::new(Size::new(40.0, 40.0));
        assert_eq!(config.track_count(), 1);
        assert_eq!(QuiltConfig::default().track_count(), 1);
    }

    #[test]
    fn bad_cell_size_falls_back_to_default() {
        let config = QuiltConfig::new(Size::new(300.0, 300.0)).with_cell_size(Size::new(0.0, 10.0));
        assert_eq!(config.effective_cell_size(), QuiltConfig::DEFAULT_CELL_SIZE);
        assert_eq!(config.track_count(), 3);

        let config = config.with_cell_size(Size::new(f64::NAN, 10.0));
        assert_eq!(config.effective_cell_size(), QuiltConfig::DEFAULT_CELL_SIZE);
    }
}
