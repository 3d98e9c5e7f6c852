//! Virtual list composition: window manager, scroll coordinator and
//! focus-follow behind one entry point per input.

use tokio::sync::mpsc;
use tracing::debug;
use vlist_core::{ClientSize, GridPosition, ItemLayout, ListConfig, ScrollConfig, WindowManager};

use crate::focus::{FocusFollow, SpotlightHost};
use crate::nav::NavKey;
use crate::scroll::{
    FrameQueue, FrameScheduler, FrameToken, ScrollConfigExt, ScrollCoordinator, ScrollEvent,
    ScrollState, ScrollToOptions,
};

/// One materialized item handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedItem<T> {
    pub slot: usize,
    pub index: usize,
    pub layout: ItemLayout,
    pub content: T,
}

pub struct VirtualList<S> {
    config: ListConfig,
    measured: ClientSize,
    coordinator: ScrollCoordinator<WindowManager, S>,
    focus: FocusFollow,
    spotlight: Option<Box<dyn SpotlightHost>>,
}

impl<S: FrameScheduler> VirtualList<S> {
    pub fn new(
        config: ListConfig,
        scroll: ScrollConfig,
        measured: ClientSize,
        scheduler: S,
    ) -> Self {
        let wm = WindowManager::new(&config, measured);
        let mut coordinator = ScrollCoordinator::new(wm, scheduler, scroll);
        coordinator.set_rtl(config.rtl && !config.direction.is_vertical());
        Self {
            focus: FocusFollow::new(config.page_scroll),
            config,
            measured,
            coordinator,
            spotlight: None,
        }
    }

    /// Set the event sender for scroll notifications
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<ScrollEvent>) -> Self {
        self.coordinator.set_event_sender(tx);
        self
    }

    pub fn with_spotlight(mut self, spotlight: Box<dyn SpotlightHost>) -> Self {
        self.spotlight = Some(spotlight);
        self
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn coordinator(&self) -> &ScrollCoordinator<WindowManager, S> {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut ScrollCoordinator<WindowManager, S> {
        &mut self.coordinator
    }

    pub fn window_manager(&self) -> &WindowManager {
        self.coordinator.host()
    }

    pub fn focus(&self) -> &FocusFollow {
        &self.focus
    }

    // ===== Configuration =====

    /// Apply a new list configuration
    ///
    /// Layout changes rebuild metrics and return to the origin; data-size and
    /// overhang changes keep the scroll position.
    pub fn set_config(&mut self, config: ListConfig, timestamp: f64) {
        let relayout = config.layout_changed(&self.config) || config.rtl != self.config.rtl;
        let resized = config.data_size() != self.config.data_size()
            || config.overhang != self.config.overhang;
        self.focus.set_page_scroll(config.page_scroll);
        self.coordinator
            .set_rtl(config.rtl && !config.direction.is_vertical());
        self.config = config;

        if relayout {
            debug!("List layout changed, recalculating metrics");
            self.coordinator
                .host_mut()
                .calculate_metrics(&self.config, self.measured);
            self.coordinator.on_layout_changed(true, timestamp);
        } else if resized {
            self.coordinator
                .host_mut()
                .update_states_and_bounds(self.config.data_size(), self.config.overhang);
            self.coordinator.on_layout_changed(false, timestamp);
        }
        self.finish_pending_focus();
    }

    pub fn set_data_size(&mut self, data_size: usize, timestamp: f64) {
        let config = ListConfig {
            data_size: data_size as i64,
            ..self.config.clone()
        };
        self.set_config(config, timestamp);
    }

    /// New measured client size from the host layout
    pub fn resize(&mut self, measured: ClientSize, timestamp: f64) {
        self.measured = measured;
        if self.config.client_size_or(measured) == self.window_manager().client_size() {
            return;
        }
        self.coordinator
            .host_mut()
            .calculate_metrics(&self.config, measured);
        self.coordinator.on_layout_changed(true, timestamp);
        self.finish_pending_focus();
    }

    // ===== Scrolling =====

    /// Programmatic scroll; with `focus` the target index is focused once
    /// the scroll stops and spotlight is paused meanwhile
    pub fn scroll_to(&mut self, options: ScrollToOptions, timestamp: f64) -> bool {
        if options.focus {
            if let Some(index) = options.index {
                self.focus.focus_after_scroll(index);
                if let Some(spotlight) = self.spotlight.as_mut() {
                    spotlight.pause();
                }
            }
        }
        let started = self.coordinator.scroll_to(options, timestamp);
        self.finish_pending_focus();
        started
    }

    pub fn on_frame(&mut self, token: FrameToken, timestamp: f64) {
        self.coordinator.on_frame(token, timestamp);
        self.finish_pending_focus();
    }

    pub fn stop(&mut self) {
        self.coordinator.stop();
        self.finish_pending_focus();
    }

    // ===== Focus =====

    /// Spatial navigation moved focus onto a rendered item
    ///
    /// Scrolls so the item is fully revealed. Ignored while dragging and
    /// while an index jump is waiting to focus its own target.
    pub fn on_item_focus(&mut self, index: usize, timestamp: f64) {
        self.focus.set_last_focused_index(index);
        if self.coordinator.state() == ScrollState::Dragging
            || self.focus.pending_focus().is_some()
        {
            return;
        }

        let wm = self.coordinator.host();
        let current = wm.primary_position();
        let target = self.focus.calculate_position_on_focus(wm, index, current);
        let primary = GridPosition::from_point(target, wm.metrics().direction).primary_position;
        if primary == current {
            return;
        }

        let scroll = self.coordinator.config();
        let animate = scroll.is_smooth();
        let duration = scroll.animation_duration();
        self.coordinator
            .start(target.left, target.top, animate, duration, timestamp);
    }

    /// Handle a navigation key before spatial navigation sees it
    ///
    /// Page keys scroll. Arrow keys update the spotlight container restrict
    /// and return true when focus must stay inside the list.
    pub fn on_key_down(&mut self, key: NavKey, timestamp: f64) -> bool {
        if key.is_page() {
            return self.coordinator.page_key(key, timestamp);
        }
        if self.coordinator.is_input_blocked() {
            return true;
        }

        let focused = self
            .spotlight
            .as_ref()
            .and_then(|spotlight| spotlight.focused_index())
            .or(self.focus.last_focused_index());
        let Some(index) = focused else {
            return false;
        };

        let wm = self.coordinator.host();
        match self.spotlight.as_deref_mut() {
            Some(spotlight) => self
                .focus
                .set_spotlight_container_restrict(wm, key, index, spotlight),
            None => FocusFollow::needs_container_restrict(wm, key, index),
        }
    }

    fn finish_pending_focus(&mut self) {
        if self.coordinator.is_scrolling() || self.coordinator.has_pending_scroll_to() {
            return;
        }
        let Some(index) = self.focus.take_pending_focus() else {
            return;
        };
        if let Some(spotlight) = self.spotlight.as_mut() {
            spotlight.resume();
            if spotlight.focus_index(index) {
                self.focus.set_last_focused_index(index);
            }
        }
    }

    // ===== Rendering =====

    /// Materialize the current window through `render_item`
    ///
    /// `render_item` is only called for data indices held by a render slot.
    pub fn render<T>(&self, mut render_item: impl FnMut(usize) -> T) -> Vec<RenderedItem<T>> {
        let wm = self.window_manager();
        wm.rendered()
            .map(|(slot, index)| RenderedItem {
                slot,
                index,
                layout: wm.item_layout(index),
                content: render_item(index),
            })
            .collect()
    }
}

impl VirtualList<FrameQueue> {
    /// Deliver every queued frame; returns true if any fired
    pub fn run_frame(&mut self, timestamp: f64) -> bool {
        let fired = self.coordinator.run_frame(timestamp);
        self.finish_pending_focus();
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use vlist_core::{Direction, ItemSize};

    use crate::focus::ContainerRestrict;

    #[derive(Debug, Default)]
    struct SpotlightLog {
        paused: bool,
        pauses: usize,
        focused: Option<usize>,
        restrict: ContainerRestrict,
    }

    struct SharedSpotlight(Rc<RefCell<SpotlightLog>>);

    impl SpotlightHost for SharedSpotlight {
        fn focused_index(&self) -> Option<usize> {
            self.0.borrow().focused
        }

        fn focus_index(&mut self, index: usize) -> bool {
            self.0.borrow_mut().focused = Some(index);
            true
        }

        fn pause(&mut self) {
            let mut log = self.0.borrow_mut();
            log.paused = true;
            log.pauses += 1;
        }

        fn resume(&mut self) {
            self.0.borrow_mut().paused = false;
        }

        fn set_container_restrict(&mut self, restrict: ContainerRestrict) {
            self.0.borrow_mut().restrict = restrict;
        }
    }

    fn list_config() -> ListConfig {
        ListConfig {
            item_size: ItemSize::Fixed(50.0),
            data_size: 1000,
            overhang: 3,
            ..Default::default()
        }
    }

    fn list(smooth: bool) -> (VirtualList<FrameQueue>, Rc<RefCell<SpotlightLog>>) {
        let scroll = ScrollConfig {
            smooth_enabled: smooth,
            ..Default::default()
        };
        let log = Rc::new(RefCell::new(SpotlightLog::default()));
        let list = VirtualList::new(
            list_config(),
            scroll,
            ClientSize::new(800.0, 500.0),
            FrameQueue::new(),
        )
        .with_spotlight(Box::new(SharedSpotlight(log.clone())));
        (list, log)
    }

    #[test]
    fn test_render_only_window() {
        let (list, _) = list(false);
        let mut calls = Vec::new();
        let items = list.render(|index| {
            calls.push(index);
            format!("Item {}", index)
        });
        assert_eq!(items.len(), 13);
        assert_eq!(calls, (0..13).collect::<Vec<_>>());
        assert_eq!(items[4].slot, 4);
        assert_eq!(items[4].content, "Item 4");
        assert_eq!(items[4].layout.y, 200.0);
        assert_eq!(items[4].layout.height, 50.0);
    }

    #[test]
    fn test_render_after_scroll_recycles_slots() {
        let (mut list, _) = list(false);
        list.scroll_to(ScrollToOptions::position(None, Some(1000.0)), 0.0);
        let items = list.render(|index| index);
        let first = list.window_manager().window().first_index;
        assert_eq!(items[0].index, first);
        assert!(items.iter().all(|item| item.slot == item.index % 13));
    }

    #[test]
    fn test_index_jump_with_focus_jumps_then_focuses() {
        let (mut list, log) = list(false);
        list.scroll_to(ScrollToOptions::index(100).with_focus(true), 0.0);

        let log = log.borrow();
        assert_eq!(log.pauses, 1);
        assert!(!log.paused);
        assert_eq!(log.focused, Some(100));
        assert_eq!(list.coordinator().position().top, 5000.0);
        assert_eq!(list.focus().last_focused_index(), Some(100));
    }

    #[test]
    fn test_index_jump_with_focus_waits_for_animation() {
        let (mut list, log) = list(true);
        list.scroll_to(ScrollToOptions::index(100).with_focus(true), 0.0);
        assert!(log.borrow().paused);
        assert_eq!(log.borrow().focused, None);

        let mut now = 0.0;
        while list.coordinator().needs_frame() {
            now += 16.0;
            list.run_frame(now);
        }
        assert!(!log.borrow().paused);
        assert_eq!(log.borrow().focused, Some(100));
        assert_eq!(list.coordinator().position().top, 5000.0);
    }

    #[test]
    fn test_item_focus_reveals_item() {
        let (mut list, _) = list(false);
        list.on_item_focus(12, 0.0);
        assert_eq!(list.coordinator().position().top, 150.0);

        // already visible
        list.on_item_focus(5, 10.0);
        assert_eq!(list.coordinator().position().top, 150.0);
        assert_eq!(list.focus().last_focused_index(), Some(5));
    }

    #[test]
    fn test_key_down_sets_restrict() {
        let (mut list, log) = list(false);
        log.borrow_mut().focused = Some(10);
        assert!(list.on_key_down(NavKey::Down, 0.0));
        assert_eq!(log.borrow().restrict, ContainerRestrict::SelfOnly);

        log.borrow_mut().focused = Some(0);
        assert!(!list.on_key_down(NavKey::Up, 10.0));
        assert_eq!(log.borrow().restrict, ContainerRestrict::SelfFirst);

        assert!(list.on_key_down(NavKey::PageDown, 20.0));
        assert_eq!(list.coordinator().position().top, 400.0);
    }

    #[test]
    fn test_focus_scroll_unblocks_keys_after_wheel() {
        let (mut list, log) = list(true);
        list.coordinator_mut()
            .wheel(crate::scroll::WheelInput::pixels(0.0, 40.0), 0.0);
        assert!(list.coordinator().is_input_blocked());

        list.on_item_focus(30, 20.0);
        assert!(list.coordinator().is_animating());
        assert!(!list.coordinator().is_input_blocked());

        log.borrow_mut().focused = Some(30);
        assert!(list.on_key_down(NavKey::Down, 30.0));
        assert_eq!(log.borrow().restrict, ContainerRestrict::SelfOnly);
    }

    #[test]
    fn test_layout_change_resets_position() {
        let (mut list, _) = list(false);
        list.scroll_to(ScrollToOptions::index(100), 0.0);
        assert_eq!(list.coordinator().position().top, 5000.0);

        let config = ListConfig {
            direction: Direction::Horizontal,
            ..list_config()
        };
        list.set_config(config, 10.0);
        assert_eq!(list.coordinator().position().top, 0.0);
        assert_eq!(list.window_manager().window().first_index, 0);
        assert_eq!(list.window_manager().scroll_bounds().max_left, 1000.0 * 50.0 - 800.0);
    }

    #[test]
    fn test_data_shrink_keeps_clamped_position() {
        let (mut list, _) = list(false);
        list.scroll_to(ScrollToOptions::index(100), 0.0);
        list.set_data_size(50, 10.0);
        assert_eq!(list.coordinator().position().top, 2000.0);
        assert_eq!(list.window_manager().data_size(), 50);
    }

    #[test]
    fn test_resize_recalculates() {
        let (mut list, _) = list(false);
        list.scroll_to(ScrollToOptions::index(100), 0.0);
        list.resize(ClientSize::new(800.0, 500.0), 5.0);
        assert_eq!(list.coordinator().position().top, 5000.0);

        list.resize(ClientSize::new(800.0, 1000.0), 10.0);
        assert_eq!(list.coordinator().position().top, 0.0);
        assert_eq!(list.window_manager().window().num_of_items, 23);
    }
}
