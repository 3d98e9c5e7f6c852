use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Constraint, Direction as LayoutDirection, Layout, Rect};
use tokio::sync::mpsc;
use tracing::debug;
use vlist_core::{AppConfig, ClientSize, Direction, GridPosition, Point};

use crate::focus::{ContainerRestrict, SpotlightHost};
use crate::input::Action;
use crate::list::VirtualList;
use crate::nav::NavKey;
use crate::scroll::{FrameQueue, ScrollEvent, ScrollToOptions, WheelDeltaMode, WheelInput};
use crate::theme::Theme;

/// Pixels represented by one terminal row
pub const PX_PER_ROW: f64 = 25.0;
/// Pixels represented by one terminal column
pub const PX_PER_COL: f64 = 10.0;

/// Focus state shared between the app and the list's spotlight handle
#[derive(Debug, Default)]
pub struct FocusState {
    pub focused: Option<usize>,
    pub paused: bool,
    pub restrict: ContainerRestrict,
}

/// Spotlight implementation backed by [`FocusState`]
pub struct TerminalSpotlight {
    state: Rc<RefCell<FocusState>>,
}

impl TerminalSpotlight {
    pub fn new(state: Rc<RefCell<FocusState>>) -> Self {
        Self { state }
    }
}

impl SpotlightHost for TerminalSpotlight {
    fn focused_index(&self) -> Option<usize> {
        self.state.borrow().focused
    }

    fn focus_index(&mut self, index: usize) -> bool {
        let mut state = self.state.borrow_mut();
        if state.paused {
            return false;
        }
        state.focused = Some(index);
        true
    }

    fn pause(&mut self) {
        self.state.borrow_mut().paused = true;
    }

    fn resume(&mut self) {
        self.state.borrow_mut().paused = false;
    }

    fn set_container_restrict(&mut self, restrict: ContainerRestrict) {
        self.state.borrow_mut().restrict = restrict;
    }
}

/// Screen areas of the demo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoLayout {
    pub list: Rect,
    pub scrollbar: Rect,
    pub status: Rect,
}

impl DemoLayout {
    /// Split the terminal into list, scrollbar and status bar
    pub fn split(area: Rect, direction: Direction) -> Self {
        let rows = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        if direction.is_vertical() {
            let columns = Layout::default()
                .direction(LayoutDirection::Horizontal)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(rows[0]);
            Self {
                list: columns[0],
                scrollbar: columns[1],
                status: rows[1],
            }
        } else {
            let parts = Layout::default()
                .direction(LayoutDirection::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(rows[0]);
            Self {
                list: parts[0],
                scrollbar: parts[1],
                status: rows[1],
            }
        }
    }

    /// List area inside its border
    pub fn list_inner(&self) -> Rect {
        Rect {
            x: self.list.x.saturating_add(1),
            y: self.list.y.saturating_add(1),
            width: self.list.width.saturating_sub(2),
            height: self.list.height.saturating_sub(2),
        }
    }

    /// Client size in list pixels
    pub fn client_size(&self) -> ClientSize {
        let inner = self.list_inner();
        ClientSize::new(inner.width as f64 * PX_PER_COL, inner.height as f64 * PX_PER_ROW)
    }
}

/// Interactive demo state
pub struct App {
    pub list: VirtualList<FrameQueue>,
    pub theme: Theme,
    pub focus: Rc<RefCell<FocusState>>,
    pub layout: DemoLayout,
    pub pending_g: bool,
    pub should_quit: bool,
    pub last_event: Option<ScrollEvent>,
    events: mpsc::UnboundedReceiver<ScrollEvent>,
    started: Instant,
    pointer_moved: bool,
}

impl App {
    pub fn new(config: &AppConfig, area: Rect) -> Self {
        let layout = DemoLayout::split(area, config.list.direction);
        let focus = Rc::new(RefCell::new(FocusState {
            focused: (config.list.data_size() > 0).then_some(0),
            ..Default::default()
        }));
        let (tx, events) = mpsc::unbounded_channel();
        let list = VirtualList::new(
            config.list.clone(),
            config.scroll.clone(),
            layout.client_size(),
            FrameQueue::new(),
        )
        .with_event_sender(tx)
        .with_spotlight(Box::new(TerminalSpotlight::new(focus.clone())));

        Self {
            list,
            theme: Theme::default(),
            focus,
            layout,
            pending_g: false,
            should_quit: false,
            last_event: None,
            events,
            started: Instant::now(),
            pointer_moved: false,
        }
    }

    /// Milliseconds since the demo started
    pub fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focus.borrow().focused
    }

    pub fn restrict(&self) -> ContainerRestrict {
        self.focus.borrow().restrict
    }

    /// Whether the next poll should return at frame rate
    pub fn needs_frames(&self) -> bool {
        let coordinator = self.list.coordinator();
        coordinator.needs_frame()
            || coordinator.vertical_thumb().hide_at().is_some()
            || coordinator.horizontal_thumb().hide_at().is_some()
    }

    /// Advance animations and collect scroll events
    pub fn tick(&mut self, now: f64) {
        self.list.run_frame(now);
        while let Ok(event) = self.events.try_recv() {
            self.last_event = Some(event);
        }
    }

    pub fn resize(&mut self, area: Rect, now: f64) {
        self.layout = DemoLayout::split(area, self.list.config().direction);
        self.list.resize(self.layout.client_size(), now);
    }

    pub fn handle_action(&mut self, action: Action, now: f64) {
        if action != Action::PendingG {
            self.pending_g = false;
        }
        match action {
            Action::Quit => self.should_quit = true,
            Action::PendingG => self.pending_g = true,
            Action::JumpToTop => self.jump_to(0, now),
            Action::JumpToBottom => {
                let data_size = self.list.window_manager().data_size();
                if data_size > 0 {
                    self.jump_to(data_size - 1, now);
                }
            }
            Action::PageUp | Action::PageDown => {
                if let Some(key) = action.nav_key() {
                    self.list.on_key_down(key, now);
                }
            }
            Action::MoveUp | Action::MoveDown | Action::MoveLeft | Action::MoveRight => {
                if let Some(key) = action.nav_key() {
                    self.move_focus(key, now);
                }
            }
            Action::None => {}
        }
    }

    fn jump_to(&mut self, index: usize, now: f64) {
        debug!(index, "Jumping to index");
        self.list
            .scroll_to(ScrollToOptions::index(index).with_focus(true), now);
    }

    /// Emulate spatial navigation for an arrow key
    fn move_focus(&mut self, key: NavKey, now: f64) {
        if self.list.coordinator().is_input_blocked() {
            return;
        }
        let Some(current) = self.focused_index() else {
            return;
        };
        self.list.on_key_down(key, now);

        let Some(next) = self.neighbor(current, key) else {
            return;
        };
        self.focus.borrow_mut().focused = Some(next);
        self.list.on_item_focus(next, now);
    }

    /// Index spatial navigation would land on from `index`
    pub fn neighbor(&self, index: usize, key: NavKey) -> Option<usize> {
        let wm = self.list.window_manager();
        let ext = wm.metrics().dimension_to_extent;
        let data_size = wm.data_size();
        if index >= data_size {
            return None;
        }

        if key.is_along(wm.metrics().direction) {
            if key.is_backward() {
                index.checked_sub(ext)
            } else if index + ext < data_size {
                Some(index + ext)
            } else if index / ext < (data_size - 1) / ext {
                // shorter last line: land on its last item
                Some(data_size - 1)
            } else {
                None
            }
        } else {
            let column = index % ext;
            if key.is_backward() {
                (column > 0).then(|| index - 1)
            } else {
                (column + 1 < ext && index + 1 < data_size).then(|| index + 1)
            }
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: f64) {
        let point = self.pointer_px(mouse.column, mouse.row);
        let coordinator = self.list.coordinator_mut();
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                coordinator.wheel(wheel_lines(1.0), now);
            }
            MouseEventKind::ScrollUp => {
                coordinator.wheel(wheel_lines(-1.0), now);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.pointer_moved = false;
                coordinator.drag_start(point.left, point.top, now);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.pointer_moved = true;
                coordinator.drag_move(point.left, point.top, now);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                coordinator.drag_end(now);
                if !self.pointer_moved {
                    self.click(mouse.column, mouse.row, now);
                }
            }
            _ => {}
        }
    }

    /// Focus the item under a clicked cell
    fn click(&mut self, column: u16, row: u16, now: f64) {
        let inner = self.layout.list_inner();
        if column < inner.x || row < inner.y || column >= inner.right() || row >= inner.bottom() {
            return;
        }
        let position = self.list.coordinator().position();
        let content = Point::new(
            (column - inner.x) as f64 * PX_PER_COL + position.left,
            (row - inner.y) as f64 * PX_PER_ROW + position.top,
        );
        let wm = self.list.window_manager();
        let cell = GridPosition::from_point(content, wm.metrics().direction);
        let index = wm.grid_position_to_index(cell);
        if index < wm.data_size() {
            self.focus.borrow_mut().focused = Some(index);
            self.list.on_item_focus(index, now);
        }
    }

    fn pointer_px(&self, column: u16, row: u16) -> Point {
        Point::new(column as f64 * PX_PER_COL, row as f64 * PX_PER_ROW)
    }
}

fn wheel_lines(lines: f64) -> WheelInput {
    WheelInput {
        delta_x: 0.0,
        delta_y: lines,
        mode: WheelDeltaMode::Line,
    }
}
