//! Focus-follow adapter: keeps the focused item revealed and keeps focus
//! inside the list while the window catches up.

use tracing::debug;
use vlist_core::{Point, WindowManager};

use crate::nav::NavKey;

/// How far focus may travel when it leaves the last rendered item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerRestrict {
    /// Prefer items inside the list, fall back to outside
    #[default]
    SelfFirst,
    /// Never leave the list
    SelfOnly,
}

/// External spatial-navigation collaborator
pub trait SpotlightHost {
    /// Data index of the item holding focus, if focus is in the list
    fn focused_index(&self) -> Option<usize>;

    /// Move focus to a rendered item; returns false if it is not rendered
    fn focus_index(&mut self, index: usize) -> bool;

    /// Suspend focus handling during an index jump
    fn pause(&mut self);

    fn resume(&mut self);

    fn set_container_restrict(&mut self, restrict: ContainerRestrict);
}

/// Focus bookkeeping for one list
#[derive(Debug, Clone, Default)]
pub struct FocusFollow {
    page_scroll: bool,
    last_focused_index: Option<usize>,
    /// Index to focus once the running scroll stops
    index_to_focus: Option<usize>,
}

impl FocusFollow {
    pub fn new(page_scroll: bool) -> Self {
        Self {
            page_scroll,
            ..Default::default()
        }
    }

    pub fn set_page_scroll(&mut self, page_scroll: bool) {
        self.page_scroll = page_scroll;
    }

    pub fn last_focused_index(&self) -> Option<usize> {
        self.last_focused_index
    }

    pub fn set_last_focused_index(&mut self, index: usize) {
        self.last_focused_index = Some(index);
    }

    /// Target that fully reveals `index` from primary offset `scroll_position`
    ///
    /// An item past the client end is scrolled to the end edge, or to the
    /// start edge in page mode. An item before the client start is scrolled
    /// to the start edge, or to the end edge in page mode. A visible item
    /// keeps the current offset. The secondary axis always returns to 0.
    pub fn calculate_position_on_focus(
        &self,
        wm: &WindowManager,
        index: usize,
        scroll_position: f64,
    ) -> Point {
        let metrics = wm.metrics();
        let primary = metrics.primary;
        let mut grid_position = wm.get_grid_position(index);
        let offset_to_client_end = primary.client_size - primary.item_size;

        if primary.client_size >= primary.item_size {
            if grid_position.primary_position > scroll_position + offset_to_client_end {
                if !self.page_scroll {
                    grid_position.primary_position -= offset_to_client_end;
                }
            } else if grid_position.primary_position >= scroll_position {
                grid_position.primary_position = scroll_position;
            } else if self.page_scroll {
                grid_position.primary_position -= offset_to_client_end;
            }
        }
        grid_position.secondary_position = 0.0;

        grid_position.to_point(metrics.direction)
    }

    /// Whether focus should stay inside the list for a key press on `index`
    ///
    /// True when another item exists past `index` in the travel direction, so
    /// spatial navigation cannot skip over items not rendered yet.
    pub fn needs_container_restrict(wm: &WindowManager, key: NavKey, index: usize) -> bool {
        let metrics = wm.metrics();
        if !key.is_along(metrics.direction) || key.is_page() {
            return false;
        }
        let ext = metrics.dimension_to_extent;
        let data_size = wm.data_size();
        if data_size == 0 {
            return false;
        }
        let last_line_len = (data_size - 1) % ext + 1;
        if key.is_backward() {
            index >= ext
        } else {
            index < data_size - last_line_len
        }
    }

    /// Compute the restrict mode for a key press and push it to spotlight
    pub fn set_spotlight_container_restrict(
        &self,
        wm: &WindowManager,
        key: NavKey,
        index: usize,
        spotlight: &mut dyn SpotlightHost,
    ) -> bool {
        let self_only = Self::needs_container_restrict(wm, key, index);
        spotlight.set_container_restrict(if self_only {
            ContainerRestrict::SelfOnly
        } else {
            ContainerRestrict::SelfFirst
        });
        self_only
    }

    /// Remember an index to focus once scrolling stops
    pub fn focus_after_scroll(&mut self, index: usize) {
        debug!(index, "Deferring focus until scroll stops");
        self.index_to_focus = Some(index);
    }

    pub fn pending_focus(&self) -> Option<usize> {
        self.index_to_focus
    }

    pub fn take_pending_focus(&mut self) -> Option<usize> {
        self.index_to_focus.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vlist_core::{ClientSize, Direction, ItemSize, ListConfig};

    fn list(direction: Direction, item_size: ItemSize, data_size: i64) -> WindowManager {
        let config = ListConfig {
            direction,
            item_size,
            data_size,
            overhang: 3,
            ..Default::default()
        };
        WindowManager::new(&config, ClientSize::new(800.0, 500.0))
    }

    #[derive(Default)]
    struct RecordingSpotlight {
        restrict: ContainerRestrict,
    }

    impl SpotlightHost for RecordingSpotlight {
        fn focused_index(&self) -> Option<usize> {
            None
        }

        fn focus_index(&mut self, _index: usize) -> bool {
            true
        }

        fn pause(&mut self) {}

        fn resume(&mut self) {}

        fn set_container_restrict(&mut self, restrict: ContainerRestrict) {
            self.restrict = restrict;
        }
    }

    #[test]
    fn test_item_past_client_end() {
        let wm = list(Direction::Vertical, ItemSize::Fixed(50.0), 1000);
        // item 12 spans 600..650, client shows 0..500
        let minimal = FocusFollow::new(false);
        assert_eq!(minimal.calculate_position_on_focus(&wm, 12, 0.0), Point::new(0.0, 150.0));
        let page = FocusFollow::new(true);
        assert_eq!(page.calculate_position_on_focus(&wm, 12, 0.0), Point::new(0.0, 600.0));
    }

    #[test]
    fn test_visible_item_keeps_position() {
        let wm = list(Direction::Vertical, ItemSize::Fixed(50.0), 1000);
        let focus = FocusFollow::new(false);
        assert_eq!(focus.calculate_position_on_focus(&wm, 5, 0.0), Point::new(0.0, 0.0));
        assert_eq!(focus.calculate_position_on_focus(&wm, 29, 1000.0), Point::new(0.0, 1000.0));
    }

    #[test]
    fn test_item_before_client_start() {
        let wm = list(Direction::Vertical, ItemSize::Fixed(50.0), 1000);
        let minimal = FocusFollow::new(false);
        assert_eq!(minimal.calculate_position_on_focus(&wm, 2, 1000.0), Point::new(0.0, 100.0));
        let page = FocusFollow::new(true);
        assert_eq!(page.calculate_position_on_focus(&wm, 2, 1000.0), Point::new(0.0, -350.0));
    }

    #[test]
    fn test_horizontal_grid_resets_secondary() {
        let wm = list(
            Direction::Horizontal,
            ItemSize::Grid {
                min_width: 200.0,
                min_height: 200.0,
            },
            100,
        );
        let ext = wm.metrics().dimension_to_extent;
        let focus = FocusFollow::new(false);
        let target = focus.calculate_position_on_focus(&wm, ext + 1, 0.0);
        assert_eq!(target.top, 0.0);
        assert_eq!(target.left, 0.0);
    }

    #[test]
    fn test_restrict_in_vertical_grid() {
        let wm = list(
            Direction::Vertical,
            ItemSize::Grid {
                min_width: 250.0,
                min_height: 100.0,
            },
            10,
        );
        assert_eq!(wm.metrics().dimension_to_extent, 3);

        assert!(!FocusFollow::needs_container_restrict(&wm, NavKey::Up, 2));
        assert!(FocusFollow::needs_container_restrict(&wm, NavKey::Up, 3));
        assert!(FocusFollow::needs_container_restrict(&wm, NavKey::Down, 8));
        assert!(!FocusFollow::needs_container_restrict(&wm, NavKey::Down, 9));
        assert!(!FocusFollow::needs_container_restrict(&wm, NavKey::Right, 4));
        assert!(!FocusFollow::needs_container_restrict(&wm, NavKey::PageDown, 4));
    }

    #[test]
    fn test_restrict_in_horizontal_list() {
        let wm = list(Direction::Horizontal, ItemSize::Fixed(100.0), 20);
        assert!(FocusFollow::needs_container_restrict(&wm, NavKey::Right, 0));
        assert!(!FocusFollow::needs_container_restrict(&wm, NavKey::Left, 0));
        assert!(!FocusFollow::needs_container_restrict(&wm, NavKey::Right, 19));
        assert!(!FocusFollow::needs_container_restrict(&wm, NavKey::Down, 5));
    }

    #[test]
    fn test_restrict_pushed_to_spotlight() {
        let wm = list(Direction::Vertical, ItemSize::Fixed(50.0), 1000);
        let focus = FocusFollow::default();
        let mut spotlight = RecordingSpotlight::default();

        assert!(focus.set_spotlight_container_restrict(&wm, NavKey::Down, 10, &mut spotlight));
        assert_eq!(spotlight.restrict, ContainerRestrict::SelfOnly);
        assert!(!focus.set_spotlight_container_restrict(&wm, NavKey::Down, 999, &mut spotlight));
        assert_eq!(spotlight.restrict, ContainerRestrict::SelfFirst);
    }

    #[test]
    fn test_pending_focus() {
        let mut focus = FocusFollow::default();
        assert!(focus.pending_focus().is_none());
        focus.focus_after_scroll(42);
        assert_eq!(focus.take_pending_focus(), Some(42));
        assert!(focus.take_pending_focus().is_none());
    }
}
