//! L2 Organism Layer: Scroll coordinator
//!
//! Owns the scroll position and turns raw input (drag, wheel, page keys,
//! native scroll reports and programmatic `scroll_to`) into positions pushed
//! through a [`ScrollHost`]. Every entry point takes the host timestamp in
//! milliseconds; nothing here reads a clock.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, trace};
use vlist_core::{MoreInfo, Point, ScrollBounds, ScrollHost};

use super::animation::{AnimationState, FlickTarget, ScrollAnimator};
use super::config::{ScrollConfig, ScrollConfigExt, ScrollMode};
use super::scheduler::{FrameQueue, FrameScheduler, FrameToken};
use super::scrollbar::ScrollbarThumb;
use crate::nav::NavKey;

/// Scroll lifecycle notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollEventKind {
    Start,
    Scroll,
    Stop,
}

/// Event emitted on scroll start, every position change and scroll stop
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollEvent {
    #[serde(rename = "type")]
    pub kind: ScrollEventKind,
    pub scroll_left: f64,
    pub scroll_top: f64,
    pub more_info: MoreInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollState {
    #[default]
    Idle,
    Dragging,
    Animating,
}

/// Current offset and the sign of the last movement on each axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollPosition {
    pub left: f64,
    pub top: f64,
    pub dir_horizontal: i8,
    pub dir_vertical: i8,
}

impl ScrollPosition {
    pub fn point(&self) -> Point {
        Point::new(self.left, self.top)
    }
}

/// Unit of a wheel delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WheelDeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct WheelInput {
    #[serde(default)]
    pub delta_x: f64,
    #[serde(default)]
    pub delta_y: f64,
    #[serde(default)]
    pub mode: WheelDeltaMode,
}

impl WheelInput {
    pub fn pixels(delta_x: f64, delta_y: f64) -> Self {
        Self {
            delta_x,
            delta_y,
            mode: WheelDeltaMode::Pixel,
        }
    }
}

/// Edge to align with in `scroll_to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Align {
    fn resolve(self, current: Point, bounds: &ScrollBounds) -> Point {
        let (left, top) = match self {
            Align::Top => (current.left, 0.0),
            Align::Bottom => (current.left, bounds.max_top),
            Align::Left => (0.0, current.top),
            Align::Right => (bounds.max_left, current.top),
            Align::TopLeft => (0.0, 0.0),
            Align::TopRight => (bounds.max_left, 0.0),
            Align::BottomLeft => (0.0, bounds.max_top),
            Align::BottomRight => (bounds.max_left, bounds.max_top),
        };
        Point::new(left, top)
    }
}

/// Absolute target; a missing axis keeps its current offset
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct PositionTarget {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

/// Programmatic scroll request
///
/// When several targets are given the first of `position`, `align`, `index`,
/// `node` wins.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ScrollToOptions {
    #[serde(default)]
    pub position: Option<PositionTarget>,
    #[serde(default)]
    pub align: Option<Align>,
    #[serde(default)]
    pub index: Option<usize>,
    /// Render slot whose current item should be revealed
    #[serde(default)]
    pub node: Option<usize>,
    #[serde(default = "default_animate")]
    pub animate: bool,
    /// Move focus to `index` once scrolling stops
    #[serde(default)]
    pub focus: bool,
}

fn default_animate() -> bool {
    true
}

impl Default for ScrollToOptions {
    fn default() -> Self {
        Self {
            position: None,
            align: None,
            index: None,
            node: None,
            animate: default_animate(),
            focus: false,
        }
    }
}

impl ScrollToOptions {
    pub fn position(x: Option<f64>, y: Option<f64>) -> Self {
        Self {
            position: Some(PositionTarget { x, y }),
            ..Default::default()
        }
    }

    pub fn align(align: Align) -> Self {
        Self {
            align: Some(align),
            ..Default::default()
        }
    }

    pub fn index(index: usize) -> Self {
        Self {
            index: Some(index),
            ..Default::default()
        }
    }

    pub fn node(node: usize) -> Self {
        Self {
            node: Some(node),
            ..Default::default()
        }
    }

    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub fn with_focus(mut self, focus: bool) -> Self {
        self.focus = focus;
        self
    }
}

/// Velocity measured at release and where it will carry the list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flick {
    /// Pointer velocity in px/ms
    pub velocity_x: f64,
    pub velocity_y: f64,
    pub target: FlickTarget,
}

#[derive(Debug, Clone, Copy)]
struct DragInfo {
    last_x: f64,
    last_y: f64,
    last_timestamp: f64,
    delta_x: f64,
    delta_y: f64,
    /// Time between the last two pointer samples
    interval: f64,
}

/// Running target of a wheel or page-key gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccumulatedTarget {
    pub x: f64,
    pub y: f64,
    direction: i8,
    vertical: bool,
}

/// Scroll state machine for one list
///
/// States move `Idle -> Dragging -> (Animating | Idle)` for pointer gestures
/// and `Idle -> Animating -> Idle` for wheel, keys and `scroll_to`. Frames
/// requested from `S` must be delivered back through
/// [`ScrollCoordinator::on_frame`].
pub struct ScrollCoordinator<H, S> {
    host: H,
    animator: ScrollAnimator<S>,
    config: ScrollConfig,
    state: ScrollState,
    position: ScrollPosition,
    /// Between a Start and a Stop event
    scrolling: bool,
    drag: Option<DragInfo>,
    accumulated: Option<AccumulatedTarget>,
    input_blocked: bool,
    pending_scroll_to: Option<ScrollToOptions>,
    last_flick: Option<Flick>,
    rtl: bool,
    horizontal_thumb: ScrollbarThumb,
    vertical_thumb: ScrollbarThumb,
    /// Timestamp of the most recent input or frame
    now: f64,
    event_tx: Option<mpsc::UnboundedSender<ScrollEvent>>,
}

impl<H: ScrollHost, S: FrameScheduler> ScrollCoordinator<H, S> {
    pub fn new(host: H, scheduler: S, config: ScrollConfig) -> Self {
        let mut coordinator = Self {
            host,
            animator: ScrollAnimator::new(scheduler, config.easing),
            horizontal_thumb: ScrollbarThumb::new(config.min_thumb_ratio),
            vertical_thumb: ScrollbarThumb::new(config.min_thumb_ratio),
            config,
            state: ScrollState::Idle,
            position: ScrollPosition::default(),
            scrolling: false,
            drag: None,
            accumulated: None,
            input_blocked: false,
            pending_scroll_to: None,
            last_flick: None,
            rtl: false,
            now: 0.0,
            event_tx: None,
        };
        let bounds = coordinator.host.scroll_bounds();
        coordinator.update_thumbs(&bounds);
        coordinator
    }

    /// Set the event sender for scroll notifications
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<ScrollEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    pub fn set_event_sender(&mut self, tx: mpsc::UnboundedSender<ScrollEvent>) {
        self.event_tx = Some(tx);
    }

    /// Mirror horizontal pointer input for right-to-left layouts
    pub fn set_rtl(&mut self, rtl: bool) {
        self.rtl = rtl;
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn scheduler(&self) -> &S {
        self.animator.scheduler()
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn position(&self) -> ScrollPosition {
        self.position
    }

    #[inline]
    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Whether a frame callback is outstanding
    pub fn needs_frame(&self) -> bool {
        self.animator.is_frame_pending()
    }

    /// Key input is blocked while an accumulated scroll is running
    pub fn is_input_blocked(&self) -> bool {
        self.input_blocked
    }

    pub fn accumulated_target(&self) -> Option<AccumulatedTarget> {
        self.accumulated
    }

    pub fn last_flick(&self) -> Option<Flick> {
        self.last_flick
    }

    pub fn has_pending_scroll_to(&self) -> bool {
        self.pending_scroll_to.is_some()
    }

    pub fn horizontal_thumb(&self) -> &ScrollbarThumb {
        &self.horizontal_thumb
    }

    pub fn vertical_thumb(&self) -> &ScrollbarThumb {
        &self.vertical_thumb
    }

    // ===== Pointer drag =====

    pub fn drag_start(&mut self, x: f64, y: f64, timestamp: f64) {
        self.now = timestamp;
        if self.config.mode == ScrollMode::Native {
            return;
        }
        self.stop();
        self.drag = Some(DragInfo {
            last_x: x,
            last_y: y,
            last_timestamp: timestamp,
            delta_x: 0.0,
            delta_y: 0.0,
            interval: 0.0,
        });
        self.state = ScrollState::Dragging;
        self.last_flick = None;
    }

    pub fn drag_move(&mut self, x: f64, y: f64, timestamp: f64) {
        self.now = timestamp;
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        drag.delta_x = x - drag.last_x;
        drag.delta_y = y - drag.last_y;
        drag.interval = timestamp - drag.last_timestamp;
        drag.last_x = x;
        drag.last_y = y;
        drag.last_timestamp = timestamp;

        let (dx, dy) = (drag.delta_x, drag.delta_y);
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        let dx = if self.rtl { -dx } else { dx };
        self.begin_scroll();
        self.apply_position(Point::new(self.position.left - dx, self.position.top - dy));
    }

    /// Release the pointer; a recent movement turns into a flick
    pub fn drag_end(&mut self, timestamp: f64) {
        self.now = timestamp;
        let Some(drag) = self.drag.take() else {
            return;
        };
        self.state = ScrollState::Idle;

        let hold = timestamp - drag.last_timestamp;
        if hold > self.config.flick_hold_ms || (drag.delta_x == 0.0 && drag.delta_y == 0.0) {
            debug!(hold, "Drag released without flick");
            self.stop();
            return;
        }

        let interval = drag.interval.max(1.0);
        let velocity_x = drag.delta_x / interval;
        let velocity_y = drag.delta_y / interval;
        let scroll_velocity_x = if self.rtl { velocity_x } else { -velocity_x };
        let target = self.animator.simulate(
            self.position.left,
            self.position.top,
            scroll_velocity_x,
            -velocity_y,
        );
        self.last_flick = Some(Flick {
            velocity_x,
            velocity_y,
            target,
        });
        debug!(
            velocity_x,
            velocity_y,
            target_x = target.target_x,
            target_y = target.target_y,
            duration = target.duration,
            "Flick"
        );

        if target.duration <= 0.0 {
            self.stop();
            return;
        }
        self.start(target.target_x, target.target_y, true, target.duration, timestamp);
    }

    // ===== Wheel and keys =====

    /// Handle a wheel tick; returns false when the list cannot scroll
    pub fn wheel(&mut self, input: WheelInput, timestamp: f64) -> bool {
        self.now = timestamp;
        if self.config.mode == ScrollMode::Native || self.state == ScrollState::Dragging {
            return false;
        }
        let bounds = self.host.scroll_bounds();
        let (vertical, raw) = if bounds.can_scroll_vertically() {
            (true, input.delta_y)
        } else if bounds.can_scroll_horizontally() {
            let raw = if input.delta_x != 0.0 {
                input.delta_x
            } else {
                input.delta_y
            };
            (false, raw)
        } else {
            return false;
        };

        let client = if vertical {
            bounds.client_height
        } else {
            bounds.client_width
        };
        let delta = self.wheel_distance(raw, input.mode, client);
        if delta == 0.0 || !delta.is_finite() {
            return false;
        }
        self.scroll_to_accumulated_target(delta, vertical, timestamp);
        true
    }

    /// Scroll one page for PageUp/PageDown; other keys are ignored
    pub fn page_key(&mut self, key: NavKey, timestamp: f64) -> bool {
        self.now = timestamp;
        if !key.is_page() || self.state == ScrollState::Dragging {
            return false;
        }
        let bounds = self.host.scroll_bounds();
        let vertical = self.host.direction().is_vertical();
        let client = if vertical {
            bounds.client_height
        } else {
            bounds.client_width
        };
        let distance = client * self.config.page_multiplier;
        if distance <= 0.0 {
            return false;
        }
        let delta = if key.is_backward() { -distance } else { distance };
        self.scroll_to_accumulated_target(delta, vertical, timestamp);
        true
    }

    fn wheel_distance(&self, raw: f64, mode: WheelDeltaMode, client: f64) -> f64 {
        let limit = client * self.config.wheel_max_page_ratio;
        let pixels = match mode {
            WheelDeltaMode::Pixel => raw,
            WheelDeltaMode::Line => raw * self.config.wheel_line_px,
            WheelDeltaMode::Page => raw * limit,
        };
        if limit > 0.0 {
            pixels.clamp(-limit, limit)
        } else {
            pixels
        }
    }

    fn scroll_to_accumulated_target(&mut self, delta: f64, vertical: bool, timestamp: f64) {
        let direction: i8 = if delta > 0.0 { 1 } else { -1 };
        let bounds = self.host.scroll_bounds();

        let continuing = self
            .accumulated
            .filter(|acc| acc.direction == direction && acc.vertical == vertical);
        let mut acc = continuing.unwrap_or(AccumulatedTarget {
            x: self.position.left,
            y: self.position.top,
            direction,
            vertical,
        });
        if vertical {
            acc.y += delta;
        } else {
            acc.x += delta;
        }
        let target = self.snap(bounds.clamp(Point::new(acc.x, acc.y)), &bounds);
        acc.x = target.left;
        acc.y = target.top;

        if continuing.is_some() && self.animator.retarget(acc.x, acc.y) {
            trace!(x = acc.x, y = acc.y, "Retargeted accumulated scroll");
            self.accumulated = Some(acc);
            return;
        }

        let animate = self.config.is_smooth();
        let duration = self.config.animation_duration();
        self.start(acc.x, acc.y, animate, duration, timestamp);
        if self.animator.is_animating() {
            self.accumulated = Some(acc);
            self.input_blocked = true;
        }
    }

    // ===== Programmatic scrolling =====

    /// Scroll to a target position
    ///
    /// The target is clamped to the scroll bounds and snapped to an edge when
    /// within `bound_snap_epsilon`. Without animation the position is applied
    /// immediately and Start, Scroll and Stop are emitted synchronously.
    /// Any accumulated wheel or page target is dropped and key input is
    /// unblocked; wheel and page input re-arm them after the call.
    pub fn start(
        &mut self,
        target_x: f64,
        target_y: f64,
        animate: bool,
        duration: f64,
        timestamp: f64,
    ) {
        self.now = timestamp;
        self.accumulated = None;
        self.input_blocked = false;
        let bounds = self.host.scroll_bounds();
        let target = self.snap(bounds.clamp(Point::new(target_x, target_y)), &bounds);
        let current = self.position.point();

        if target == current {
            self.stop();
            return;
        }

        self.animator.stop();
        self.drag = None;
        self.begin_scroll();

        if self.config.mode == ScrollMode::Native {
            if self.host.request_native_scroll(target, animate) && animate {
                self.state = ScrollState::Animating;
                return;
            }
            self.apply_position(target);
            self.stop();
            return;
        }

        if animate && duration > 0.0 {
            debug!(
                from_x = current.left,
                from_y = current.top,
                to_x = target.left,
                to_y = target.top,
                duration,
                "Starting scroll animation"
            );
            self.animator.start(AnimationState {
                source_x: current.left,
                source_y: current.top,
                target_x: target.left,
                target_y: target.top,
                duration,
                start_timestamp: timestamp,
            });
            self.state = ScrollState::Animating;
        } else {
            self.apply_position(target);
            self.stop();
        }
    }

    /// Resolve and start a programmatic scroll
    ///
    /// Requests issued before the host is ready are kept and replayed by
    /// [`ScrollCoordinator::on_layout_changed`]. Returns true if a scroll was
    /// started or the list is already at the target.
    pub fn scroll_to(&mut self, options: ScrollToOptions, timestamp: f64) -> bool {
        self.now = timestamp;
        if !self.host.is_ready() {
            debug!("Host not ready, deferring scroll_to");
            self.pending_scroll_to = Some(options);
            return false;
        }
        let Some(target) = self.resolve_target(&options) else {
            return false;
        };
        let animate = options.animate && self.config.is_smooth();
        let duration = self.config.animation_duration();
        self.start(target.left, target.top, animate, duration, timestamp);
        true
    }

    /// Position a `scroll_to` request would scroll to, before clamping
    pub fn resolve_target(&self, options: &ScrollToOptions) -> Option<Point> {
        let current = self.position.point();
        if let Some(position) = options.position {
            return Some(Point::new(
                position.x.unwrap_or(current.left),
                position.y.unwrap_or(current.top),
            ));
        }
        if let Some(align) = options.align {
            return Some(align.resolve(current, &self.host.scroll_bounds()));
        }
        if let Some(index) = options.index {
            return Some(self.host.item_position(index));
        }
        if let Some(node) = options.node {
            return self.host.node_index(node).map(|index| self.host.item_position(index));
        }
        None
    }

    /// Cancel any scroll in progress
    ///
    /// Clears accumulation, unblocks input and emits Stop if a scroll was in
    /// progress. Safe to call when idle.
    pub fn stop(&mut self) {
        self.animator.stop();
        self.accumulated = None;
        self.input_blocked = false;
        self.drag = None;
        self.state = ScrollState::Idle;
        if self.scrolling {
            self.scrolling = false;
            let delay = self.config.thumb_hide_delay_ms;
            self.horizontal_thumb.start_hiding(self.now, delay);
            self.vertical_thumb.start_hiding(self.now, delay);
            debug!(left = self.position.left, top = self.position.top, "Scroll stopped");
            self.emit(ScrollEventKind::Stop);
        }
    }

    // ===== Host callbacks =====

    /// Deliver a frame fired by the scheduler
    pub fn on_frame(&mut self, token: FrameToken, timestamp: f64) {
        self.now = timestamp;
        self.tick(timestamp);
        let Some(frame) = self.animator.on_frame(token, timestamp) else {
            return;
        };
        trace!(elapsed = frame.elapsed, top = frame.position.top, "Scroll frame");
        self.apply_position(frame.position);
        if frame.done {
            self.stop();
        } else {
            self.animator.animate();
        }
    }

    /// Position reported by a natively scrolling host
    pub fn on_native_scroll(&mut self, left: f64, top: f64, timestamp: f64) {
        self.now = timestamp;
        if self.config.mode == ScrollMode::Native {
            self.begin_scroll();
            self.apply_position(Point::new(left, top));
        } else {
            self.start(left, top, false, 0.0, timestamp);
        }
    }

    pub fn on_native_scroll_end(&mut self, timestamp: f64) {
        self.now = timestamp;
        self.stop();
    }

    /// Re-read bounds after the host changed metrics or data size
    ///
    /// With `reset` the position returns to the origin, as after a layout
    /// change; otherwise it is re-clamped. A running animation keeps going
    /// and is clamped on its next frame. Deferred `scroll_to` requests are
    /// replayed once the host is ready.
    pub fn on_layout_changed(&mut self, reset: bool, timestamp: f64) {
        self.now = timestamp;
        let bounds = self.host.scroll_bounds();
        if reset {
            self.stop();
            self.position = ScrollPosition::default();
        } else {
            let clamped = bounds.clamp(self.position.point());
            self.position.left = clamped.left;
            self.position.top = clamped.top;
        }
        self.update_thumbs(&bounds);

        if self.host.is_ready() {
            if let Some(options) = self.pending_scroll_to.take() {
                debug!("Replaying deferred scroll_to");
                self.scroll_to(options, timestamp);
            }
        }
    }

    /// Advance scrollbar hide timers; returns true if a thumb disappeared
    pub fn tick(&mut self, timestamp: f64) -> bool {
        let horizontal = self.horizontal_thumb.tick(timestamp);
        let vertical = self.vertical_thumb.tick(timestamp);
        horizontal || vertical
    }

    // ===== Internals =====

    fn begin_scroll(&mut self) {
        if self.scrolling {
            return;
        }
        self.scrolling = true;
        let bounds = self.host.scroll_bounds();
        if bounds.can_scroll_horizontally() {
            self.horizontal_thumb.show();
        }
        if bounds.can_scroll_vertically() {
            self.vertical_thumb.show();
        }
        self.emit(ScrollEventKind::Start);
    }

    fn apply_position(&mut self, target: Point) {
        let bounds = self.host.scroll_bounds();
        let next = bounds.clamp(target);
        let dir_horizontal = direction_of(next.left - self.position.left);
        let dir_vertical = direction_of(next.top - self.position.top);
        self.position = ScrollPosition {
            left: next.left,
            top: next.top,
            dir_horizontal,
            dir_vertical,
        };
        if let Some(update) = self
            .host
            .set_scroll_position(next.left, next.top, dir_horizontal, dir_vertical)
        {
            trace!(from = update.update_from, to = update.update_to, "Window moved");
        }
        self.update_thumbs(&bounds);
        self.emit(ScrollEventKind::Scroll);
    }

    fn snap(&self, point: Point, bounds: &ScrollBounds) -> Point {
        let epsilon = self.config.bound_snap_epsilon.max(0.0);
        Point::new(
            snap_axis(point.left, bounds.max_left, epsilon),
            snap_axis(point.top, bounds.max_top, epsilon),
        )
    }

    fn update_thumbs(&mut self, bounds: &ScrollBounds) {
        self.horizontal_thumb
            .update(bounds.client_width, bounds.scroll_width, self.position.left);
        self.vertical_thumb
            .update(bounds.client_height, bounds.scroll_height, self.position.top);
    }

    fn emit(&self, kind: ScrollEventKind) {
        let Some(tx) = &self.event_tx else {
            return;
        };
        let event = ScrollEvent {
            kind,
            scroll_left: self.position.left,
            scroll_top: self.position.top,
            more_info: self.host.more_info(),
        };
        if tx.send(event).is_err() {
            trace!("Scroll event receiver dropped");
        }
    }
}

impl<H: ScrollHost> ScrollCoordinator<H, FrameQueue> {
    /// Deliver every frame queued before this call; returns true if any fired
    pub fn run_frame(&mut self, timestamp: f64) -> bool {
        let due = self.animator.scheduler_mut().take_pending();
        let fired = !due.is_empty();
        for token in due {
            self.on_frame(token, timestamp);
        }
        if !fired {
            self.now = timestamp;
            self.tick(timestamp);
        }
        fired
    }
}

#[inline]
fn direction_of(delta: f64) -> i8 {
    if delta > 0.0 {
        1
    } else if delta < 0.0 {
        -1
    } else {
        0
    }
}

#[inline]
fn snap_axis(value: f64, max: f64, epsilon: f64) -> f64 {
    if value < epsilon {
        0.0
    } else if max - value < epsilon {
        max
    } else {
        value
    }
}
