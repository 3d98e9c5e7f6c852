//! Visible index window and recycled render-slot pool.
//!
//! Only `num_of_items` items are ever materialized. Each data index lives in
//! slot `index % num_of_items`, so when the window slides forward the slots
//! that scrolled out at the top are reused for the indices appearing at the
//! bottom. The window only moves when the primary scroll position leaves the
//! hysteresis band kept in [`Threshold`].

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ListConfig;
use crate::geometry::{ClientSize, GridPosition, Point, ScrollBounds};
use crate::host::{MoreInfo, ScrollHost};
use crate::metrics::{Metrics, MetricsCalculator, Threshold};

/// The window trails the scroll position by up to two lines, so fewer
/// overhang lines would leave the bottom of the viewport unrendered.
pub const MIN_OVERHANG: usize = 2;

/// Tolerance for float position to line conversion
const LINE_EPSILON: f64 = 1e-6;

/// Contiguous range of materialized data indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Window {
    pub first_index: usize,
    pub num_of_items: usize,
    pub max_first_index: usize,
}

impl Window {
    /// One past the last materialized index
    #[inline]
    pub fn end_index(&self) -> usize {
        self.first_index + self.num_of_items
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index >= self.first_index && index < self.end_index()
    }
}

/// Data indices `[update_from, update_to)` that were (re)written into slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotUpdate {
    pub update_from: usize,
    pub update_to: usize,
}

impl SlotUpdate {
    pub fn len(&self) -> usize {
        self.update_to.saturating_sub(self.update_from)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn indices(&self) -> std::ops::Range<usize> {
        self.update_from..self.update_to
    }
}

/// Absolute placement of a rendered item
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemLayout {
    /// Horizontal offset; negated from the right edge in RTL layouts
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Owns metrics, threshold, window and the render-slot pool of one list
#[derive(Debug, Clone)]
pub struct WindowManager {
    metrics: Metrics,
    threshold: Threshold,
    window: Window,
    client: ClientSize,
    bounds: ScrollBounds,
    data_size: usize,
    overhang: usize,
    rtl: bool,
    /// Last primary-axis scroll position applied
    scroll_position: f64,
    slots: Vec<Option<usize>>,
    last_update: Option<SlotUpdate>,
}

impl WindowManager {
    /// Build metrics and the initial window for a list
    pub fn new(config: &ListConfig, measured: ClientSize) -> Self {
        let client = config.client_size_or(measured);
        let metrics = MetricsCalculator::calculate(
            client,
            config.item_size,
            config.spacing,
            config.direction,
        );
        let mut manager = Self {
            metrics,
            threshold: Threshold::new(metrics.primary.grid_size),
            window: Window::default(),
            client,
            bounds: ScrollBounds::default(),
            data_size: 0,
            overhang: config.overhang,
            rtl: config.rtl,
            scroll_position: 0.0,
            slots: Vec::new(),
            last_update: None,
        };
        manager.update_states_and_bounds(config.data_size(), config.overhang);
        manager
    }

    /// Recompute metrics after a layout-affecting change
    ///
    /// Resets the scroll position and window to index 0.
    pub fn calculate_metrics(&mut self, config: &ListConfig, measured: ClientSize) {
        self.client = config.client_size_or(measured);
        self.metrics = MetricsCalculator::calculate(
            self.client,
            config.item_size,
            config.spacing,
            config.direction,
        );
        self.rtl = config.rtl;
        self.threshold = Threshold::new(self.metrics.primary.grid_size);
        self.window.first_index = 0;
        self.scroll_position = 0.0;
        debug!(
            dimension_to_extent = self.metrics.dimension_to_extent,
            item_size = self.metrics.primary.item_size,
            grid_size = self.metrics.primary.grid_size,
            "Recalculated list metrics"
        );
        self.update_states_and_bounds(config.data_size(), config.overhang);
    }

    /// Resize the window for a new data size or overhang
    ///
    /// The scroll position is kept and re-clamped. A window that was pinned
    /// to the end of the data stays pinned when data is appended.
    pub fn update_states_and_bounds(&mut self, data_size: usize, overhang: usize) -> SlotUpdate {
        let overhang = if overhang < MIN_OVERHANG {
            warn!(
                overhang,
                min = MIN_OVERHANG,
                "Overhang below minimum; window exceeds lines plus configured overhang"
            );
            MIN_OVERHANG
        } else {
            overhang
        };

        let ext = self.metrics.dimension_to_extent;
        let lines_in_client =
            (self.metrics.primary.client_size / self.metrics.primary.grid_size).ceil() as usize;
        let num_of_items =
            data_size.min(ext.saturating_mul(lines_in_client.saturating_add(overhang)));

        let was_pinned = self.window.first_index > 0
            && self.window.first_index == self.window.max_first_index;
        let grew = data_size > self.data_size;

        self.data_size = data_size;
        self.overhang = overhang;
        self.window.num_of_items = num_of_items;
        self.window.max_first_index = data_size - num_of_items;
        self.bounds = self.calculate_scroll_bounds();

        let max_pos = self.max_primary_position();
        self.scroll_position = self.scroll_position.clamp(0.0, max_pos);

        if (was_pinned && grew) || self.window.first_index > self.window.max_first_index {
            self.sync_to_position();
        } else {
            self.sync_threshold(max_pos);
        }

        self.slots = vec![None; num_of_items];
        let update = SlotUpdate {
            update_from: self.window.first_index,
            update_to: self.window.end_index(),
        };
        self.apply_slot_update(update);
        debug!(
            data_size,
            num_of_items,
            first_index = self.window.first_index,
            max_first_index = self.window.max_first_index,
            "Updated window states and bounds"
        );
        update
    }

    /// Feed a scroll position into the window state machine
    ///
    /// Returns the range of data indices re-rendered into slots when the
    /// window moved, `None` while the position stays inside the hysteresis
    /// band.
    pub fn set_scroll_position(
        &mut self,
        x: f64,
        y: f64,
        dir_x: i8,
        dir_y: i8,
    ) -> Option<SlotUpdate> {
        let (pos, dir) = if self.metrics.is_vertical() {
            (y, dir_y)
        } else {
            (x, dir_x)
        };
        self.scroll_position = pos;

        if self.data_size == 0 {
            return None;
        }

        let grid = self.metrics.primary.grid_size;
        let ext = self.metrics.dimension_to_extent;
        let max_pos = self.max_primary_position();
        let threshold = &mut self.threshold;
        let first_index = self.window.first_index;
        let mut new_first_index = first_index;

        if dir > 0 && pos > threshold.max {
            let num_lines = ((pos - threshold.max) / grid).ceil();
            threshold.max = max_pos.min(threshold.max + num_lines * grid);
            threshold.min = (max_pos - threshold.base).min(threshold.max - grid);
            new_first_index = self
                .window
                .max_first_index
                .min(round_up_to_extent(first_index, ext) + num_lines as usize * ext);
        } else if dir < 0 && pos < threshold.min {
            let num_lines = ((threshold.min - pos) / grid).ceil();
            threshold.max = threshold
                .base
                .max(threshold.min - (num_lines * grid - grid));
            threshold.min = if threshold.max > threshold.base {
                threshold.max - grid
            } else {
                f64::NEG_INFINITY
            };
            new_first_index = if threshold.min == f64::NEG_INFINITY {
                0
            } else {
                round_up_to_extent(first_index, ext).saturating_sub(num_lines as usize * ext)
            };
        }

        if new_first_index == first_index {
            return None;
        }

        let update = self.slot_update_for(first_index, new_first_index);
        self.window.first_index = new_first_index;
        self.apply_slot_update(update);
        debug!(
            from = first_index,
            to = new_first_index,
            update_from = update.update_from,
            update_to = update.update_to,
            "Window moved"
        );
        Some(update)
    }

    /// Position of an item in primary/secondary coordinates
    pub fn get_grid_position(&self, index: usize) -> GridPosition {
        let ext = self.metrics.dimension_to_extent;
        GridPosition {
            primary_position: (index / ext) as f64 * self.metrics.primary.grid_size,
            secondary_position: (index % ext) as f64 * self.metrics.secondary.grid_size,
        }
    }

    /// Position of an item as `{left, top}`
    pub fn get_item_position(&self, index: usize) -> Point {
        self.get_grid_position(index).to_point(self.metrics.direction)
    }

    /// Inverse of [`WindowManager::get_grid_position`]
    pub fn grid_position_to_index(&self, position: GridPosition) -> usize {
        let ext = self.metrics.dimension_to_extent;
        let line = line_at(position.primary_position, self.metrics.primary.grid_size);
        let column = line_at(position.secondary_position, self.metrics.secondary.grid_size)
            .min(ext - 1);
        line * ext + column
    }

    /// Absolute placement of a rendered item, RTL-aware
    pub fn item_layout(&self, index: usize) -> ItemLayout {
        let point = self.get_item_position(index);
        let (width, height) = if self.metrics.is_vertical() {
            (self.metrics.secondary.item_size, self.metrics.primary.item_size)
        } else {
            (self.metrics.primary.item_size, self.metrics.secondary.item_size)
        };
        ItemLayout {
            x: if self.rtl { -point.left } else { point.left },
            y: point.top,
            width,
            height,
        }
    }

    pub fn scroll_bounds(&self) -> ScrollBounds {
        self.bounds
    }

    /// First and last index intersecting the viewport at the current position
    pub fn more_info(&self) -> MoreInfo {
        if self.data_size == 0 {
            return MoreInfo::default();
        }
        let ext = self.metrics.dimension_to_extent;
        let primary = &self.metrics.primary;
        let pos = self.scroll_position;

        let first_line = ((pos - primary.item_size) / primary.grid_size).floor() + 1.0;
        let first = (first_line.max(0.0) as usize * ext).min(self.data_size - 1);
        let last_line = ((pos + primary.client_size) / primary.grid_size).ceil();
        let last = (last_line.max(1.0) as usize * ext - 1).min(self.data_size - 1);

        MoreInfo {
            first_visible_index: Some(first),
            last_visible_index: Some(last.max(first)),
        }
    }

    /// Slot index holding the given data index
    pub fn slot_of(&self, index: usize) -> Option<usize> {
        if self.window.contains(index) {
            Some(index % self.window.num_of_items)
        } else {
            None
        }
    }

    /// Data indices currently written into each slot
    pub fn slots(&self) -> &[Option<usize>] {
        &self.slots
    }

    /// Materialized `(slot, data_index)` pairs in index order
    pub fn rendered(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.window.num_of_items;
        (self.window.first_index..self.window.end_index()).map(move |index| (index % n, index))
    }

    pub fn last_update(&self) -> Option<SlotUpdate> {
        self.last_update
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn threshold(&self) -> &Threshold {
        &self.threshold
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn data_size(&self) -> usize {
        self.data_size
    }

    pub fn overhang(&self) -> usize {
        self.overhang
    }

    pub fn client_size(&self) -> ClientSize {
        self.client
    }

    /// Last primary-axis position fed into the window
    pub fn primary_position(&self) -> f64 {
        self.scroll_position
    }

    fn calculate_scroll_bounds(&self) -> ScrollBounds {
        let content = self.metrics.content_size(self.data_size);
        if self.metrics.is_vertical() {
            ScrollBounds::new(self.client, self.client.width, content)
        } else {
            ScrollBounds::new(self.client, content, self.client.height)
        }
    }

    fn max_primary_position(&self) -> f64 {
        if self.metrics.is_vertical() {
            self.bounds.max_top
        } else {
            self.bounds.max_left
        }
    }

    /// Pull an out-of-range threshold back inside `max_pos`
    fn sync_threshold(&mut self, max_pos: f64) {
        let threshold = &mut self.threshold;
        if threshold.max > max_pos {
            if max_pos < threshold.base {
                threshold.max = threshold.base;
                threshold.min = f64::NEG_INFINITY;
            } else {
                threshold.max = max_pos;
                threshold.min = max_pos - threshold.base;
            }
        }
    }

    /// Rebuild first index and threshold from the current scroll position
    fn sync_to_position(&mut self) {
        let grid = self.metrics.primary.grid_size;
        let ext = self.metrics.dimension_to_extent;
        let max_pos = self.max_primary_position();
        let line = ((self.scroll_position / grid).ceil() as usize).saturating_sub(2);

        let base = self.threshold.base;
        let max = max_pos.min(base + line as f64 * grid);
        self.threshold.max = max.max(base);
        self.threshold.min = if line == 0 {
            f64::NEG_INFINITY
        } else {
            (max_pos - base).min(self.threshold.max - grid)
        };
        self.window.first_index = self.window.max_first_index.min(line * ext);
    }

    /// Non-overlapping range of indices to render after the window slides
    fn slot_update_for(&self, old_first: usize, new_first: usize) -> SlotUpdate {
        let n = self.window.num_of_items;
        if new_first > old_first && new_first - old_first < n {
            SlotUpdate {
                update_from: old_first + n,
                update_to: new_first + n,
            }
        } else if new_first < old_first && old_first - new_first < n {
            SlotUpdate {
                update_from: new_first,
                update_to: old_first,
            }
        } else {
            SlotUpdate {
                update_from: new_first,
                update_to: new_first + n,
            }
        }
    }

    fn apply_slot_update(&mut self, update: SlotUpdate) {
        let n = self.window.num_of_items;
        if n > 0 {
            for index in update.indices() {
                self.slots[index % n] = Some(index);
            }
        }
        self.last_update = Some(update);
    }
}

impl ScrollHost for WindowManager {
    fn is_ready(&self) -> bool {
        self.metrics.primary.client_size > 0.0
    }

    fn direction(&self) -> crate::geometry::Direction {
        self.metrics.direction
    }

    fn scroll_bounds(&self) -> ScrollBounds {
        self.bounds
    }

    fn set_scroll_position(&mut self, x: f64, y: f64, dir_x: i8, dir_y: i8) -> Option<SlotUpdate> {
        WindowManager::set_scroll_position(self, x, y, dir_x, dir_y)
    }

    fn item_position(&self, index: usize) -> Point {
        self.get_item_position(index)
    }

    fn more_info(&self) -> MoreInfo {
        WindowManager::more_info(self)
    }

    fn node_index(&self, node: usize) -> Option<usize> {
        self.slots.get(node).copied().flatten()
    }
}

#[inline]
fn round_up_to_extent(index: usize, ext: usize) -> usize {
    index.div_ceil(ext) * ext
}

#[inline]
fn line_at(position: f64, grid_size: f64) -> usize {
    ((position + LINE_EPSILON) / grid_size).floor().max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ItemSize;
    use crate::geometry::Direction;

    fn list(data_size: i64, item: f64) -> ListConfig {
        ListConfig {
            data_size,
            item_size: ItemSize::Fixed(item),
            ..Default::default()
        }
    }

    fn vertical(data_size: i64) -> WindowManager {
        WindowManager::new(&list(data_size, 50.0), ClientSize::new(800.0, 500.0))
    }

    /// Scroll forward from 0 to `to` in `step` increments
    fn scroll_down(wm: &mut WindowManager, to: f64, step: f64) {
        let mut pos = wm.primary_position();
        while pos < to {
            pos = (pos + step).min(to);
            wm.set_scroll_position(0.0, pos, 0, 1);
        }
    }

    #[test]
    fn test_reference_scenario() {
        let wm = vertical(1000);
        let window = wm.window();
        assert_eq!(window.num_of_items, 13);
        assert_eq!(window.max_first_index, 987);
        assert_eq!(window.first_index, 0);
        assert_eq!(wm.scroll_bounds().max_top, 49_500.0);
    }

    #[test]
    fn test_small_data_renders_everything() {
        let wm = vertical(5);
        assert_eq!(wm.window().num_of_items, 5);
        assert_eq!(wm.window().max_first_index, 0);
        assert_eq!(wm.scroll_bounds().max_top, 0.0);
    }

    #[test]
    fn test_empty_list() {
        let mut wm = vertical(0);
        assert_eq!(wm.window().num_of_items, 0);
        assert!(wm.set_scroll_position(0.0, 100.0, 0, 1).is_none());
        assert_eq!(wm.more_info(), MoreInfo::default());
    }

    #[test]
    fn test_forward_crossing_moves_window() {
        let mut wm = vertical(1000);
        // inside the initial band (max = 100)
        assert!(wm.set_scroll_position(0.0, 100.0, 0, 1).is_none());
        assert_eq!(wm.window().first_index, 0);

        let update = wm.set_scroll_position(0.0, 175.0, 0, 1).unwrap();
        // ceil(75 / 50) = 2 lines
        assert_eq!(wm.window().first_index, 2);
        assert_eq!(wm.threshold().max, 200.0);
        assert_eq!(wm.threshold().min, 150.0);
        // only the two indices that newly entered the window are rendered
        assert_eq!(update, SlotUpdate { update_from: 13, update_to: 15 });
    }

    #[test]
    fn test_backward_crossing_returns_to_zero() {
        let mut wm = vertical(1000);
        wm.set_scroll_position(0.0, 175.0, 0, 1);
        let update = wm.set_scroll_position(0.0, 20.0, 0, -1).unwrap();
        assert_eq!(wm.window().first_index, 0);
        assert_eq!(wm.threshold().min, f64::NEG_INFINITY);
        assert_eq!(wm.threshold().max, 100.0);
        assert_eq!(update, SlotUpdate { update_from: 0, update_to: 2 });
    }

    #[test]
    fn test_backward_partial() {
        let mut wm = vertical(1000);
        scroll_down(&mut wm, 1000.0, 10.0);
        let first = wm.window().first_index;
        assert_eq!(first, 18);
        let min = wm.threshold().min;
        wm.set_scroll_position(0.0, min - 1.0, 0, -1);
        assert_eq!(wm.window().first_index, 17);
    }

    #[test]
    fn test_hysteresis_band() {
        let mut wm = vertical(1000);
        wm.set_scroll_position(0.0, 175.0, 0, 1);
        let first = wm.window().first_index;
        for (i, pos) in [151.0, 199.0, 160.0, 200.0, 150.5, 185.0].iter().enumerate() {
            let dir = if i % 2 == 0 { -1 } else { 1 };
            assert!(wm.set_scroll_position(0.0, *pos, 0, dir).is_none());
            assert_eq!(wm.window().first_index, first);
        }
    }

    #[test]
    fn test_zero_direction_never_moves() {
        let mut wm = vertical(1000);
        assert!(wm.set_scroll_position(0.0, 5000.0, 0, 0).is_none());
        assert_eq!(wm.window().first_index, 0);
    }

    #[test]
    fn test_large_jump_rerenders_everything() {
        let mut wm = vertical(1000);
        let update = wm.set_scroll_position(0.0, 10_000.0, 0, 1).unwrap();
        assert_eq!(wm.window().first_index, 198);
        assert_eq!(update, SlotUpdate { update_from: 198, update_to: 211 });
        for (slot, index) in wm.rendered() {
            assert_eq!(wm.slots()[slot], Some(index));
        }
    }

    #[test]
    fn test_jump_to_end_pins_max_first_index() {
        let mut wm = vertical(1000);
        wm.set_scroll_position(0.0, 49_500.0, 0, 1);
        assert_eq!(wm.window().first_index, 987);
        assert_eq!(wm.threshold().max, 49_500.0);
        assert_eq!(wm.window().end_index(), 1000);
    }

    #[test]
    fn test_slots_recycle_modulo() {
        let mut wm = vertical(1000);
        scroll_down(&mut wm, 3000.0, 25.0);
        let window = wm.window();
        for index in window.first_index..window.end_index() {
            let slot = wm.slot_of(index).unwrap();
            assert_eq!(slot, index % window.num_of_items);
            assert_eq!(wm.slots()[slot], Some(index));
        }
        assert_eq!(wm.slot_of(window.end_index()), None);
    }

    #[test]
    fn test_window_covers_viewport_while_scrolling() {
        let mut wm = vertical(1000);
        let mut pos = 0.0;
        while pos < 49_500.0 {
            pos += 37.0;
            let pos = f64::min(pos, 49_500.0);
            wm.set_scroll_position(0.0, pos, 0, 1);
            let info = wm.more_info();
            let window = wm.window();
            assert!(window.first_index <= info.first_visible_index.unwrap());
            assert!(info.last_visible_index.unwrap() < window.end_index());
        }
    }

    #[test]
    fn test_grid_positions() {
        let config = ListConfig {
            data_size: 100,
            item_size: ItemSize::Grid {
                min_width: 300.0,
                min_height: 200.0,
            },
            spacing: 20.0,
            ..Default::default()
        };
        let wm = WindowManager::new(&config, ClientSize::new(960.0, 540.0));
        let gp = wm.get_grid_position(7);
        // line 2, column 1
        assert_eq!(gp.primary_position, 2.0 * 225.0);
        assert_eq!(gp.secondary_position, 327.0);
        assert_eq!(wm.get_item_position(7), Point::new(327.0, 450.0));
        assert_eq!(wm.grid_position_to_index(gp), 7);
    }

    #[test]
    fn test_extrapolated_position_beyond_window() {
        let wm = vertical(1000);
        assert!(!wm.window().contains(500));
        assert_eq!(wm.get_item_position(500), Point::new(0.0, 25_000.0));
    }

    #[test]
    fn test_more_info() {
        let mut wm = vertical(1000);
        wm.set_scroll_position(0.0, 120.0, 0, 1);
        let info = wm.more_info();
        assert_eq!(info.first_visible_index, Some(2));
        assert_eq!(info.last_visible_index, Some(12));
    }

    #[test]
    fn test_data_shrink_clamps_window() {
        let mut wm = vertical(1000);
        wm.set_scroll_position(0.0, 10_000.0, 0, 1);
        wm.update_states_and_bounds(100, 3);
        let window = wm.window();
        assert_eq!(window.max_first_index, 87);
        assert_eq!(window.first_index, 87);
        assert_eq!(wm.primary_position(), 4_500.0);
        assert!(window.end_index() <= 100);
    }

    #[test]
    fn test_data_growth_keeps_pinned_window_at_end() {
        let mut wm = vertical(100);
        wm.set_scroll_position(0.0, 4_500.0, 0, 1);
        assert_eq!(wm.window().first_index, 87);

        wm.update_states_and_bounds(102, 3);
        let window = wm.window();
        // position still shows the old end, window re-pinned to cover it
        assert_eq!(window.max_first_index, 89);
        assert_eq!(window.first_index, 88);
        let info = wm.more_info();
        assert!(window.first_index <= info.first_visible_index.unwrap());
        assert!(info.last_visible_index.unwrap() < window.end_index());

        // continuing forward reaches the new end
        wm.set_scroll_position(0.0, 4_600.0, 0, 1);
        assert_eq!(wm.window().first_index, 89);
    }

    #[test]
    fn test_data_growth_unpinned_keeps_first_index() {
        let mut wm = vertical(1000);
        wm.set_scroll_position(0.0, 175.0, 0, 1);
        wm.update_states_and_bounds(2000, 3);
        assert_eq!(wm.window().first_index, 2);
        assert_eq!(wm.window().max_first_index, 1987);
    }

    #[test]
    fn test_overhang_below_minimum_is_raised() {
        let wm = WindowManager::new(
            &ListConfig {
                overhang: 0,
                ..list(1000, 50.0)
            },
            ClientSize::new(800.0, 500.0),
        );
        assert_eq!(wm.overhang(), MIN_OVERHANG);
        assert_eq!(wm.window().num_of_items, 12);
    }

    #[test]
    fn test_huge_overhang_renders_all_data() {
        let config = ListConfig {
            overhang: usize::MAX,
            ..list(1000, 50.0)
        };
        let mut wm = WindowManager::new(&config, ClientSize::new(800.0, 500.0));
        assert_eq!(wm.window().num_of_items, 1000);
        assert_eq!(wm.window().max_first_index, 0);

        // grid extents multiply the line count too
        let grid = ListConfig {
            item_size: ItemSize::Grid {
                min_width: 100.0,
                min_height: 100.0,
            },
            overhang: usize::MAX,
            ..list(50, 0.0)
        };
        wm.calculate_metrics(&grid, ClientSize::new(800.0, 500.0));
        assert_eq!(wm.window().num_of_items, 50);

        wm.set_scroll_position(0.0, 10_000.0, 0, 1);
        assert_eq!(wm.window().first_index, 0);
    }

    #[test]
    fn test_recalculate_metrics_resets_to_zero() {
        let mut wm = vertical(1000);
        wm.set_scroll_position(0.0, 10_000.0, 0, 1);
        let config = ListConfig {
            direction: Direction::Horizontal,
            ..list(1000, 100.0)
        };
        wm.calculate_metrics(&config, ClientSize::new(800.0, 500.0));
        assert_eq!(wm.window().first_index, 0);
        assert_eq!(wm.primary_position(), 0.0);
        assert_eq!(wm.window().num_of_items, 11);
        assert_eq!(wm.scroll_bounds().max_left, 99_200.0);
    }

    #[test]
    fn test_rtl_layout_flips_x() {
        let config = ListConfig {
            direction: Direction::Horizontal,
            rtl: true,
            ..list(10, 100.0)
        };
        let wm = WindowManager::new(&config, ClientSize::new(800.0, 300.0));
        let layout = wm.item_layout(3);
        assert_eq!(layout.x, -300.0);
        assert_eq!(layout.width, 100.0);
        assert_eq!(layout.height, 300.0);
    }

    #[test]
    fn test_node_index_reads_slot() {
        let mut wm = vertical(1000);
        wm.set_scroll_position(0.0, 175.0, 0, 1);
        // slot 0 now holds index 13, slot 2 still holds index 2
        assert_eq!(ScrollHost::node_index(&wm, 0), Some(13));
        assert_eq!(ScrollHost::node_index(&wm, 2), Some(2));
        assert_eq!(ScrollHost::node_index(&wm, 99), None);
    }
}
