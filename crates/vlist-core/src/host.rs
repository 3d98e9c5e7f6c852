//! Contract between the scroll coordinator and the content it scrolls.

use serde::Serialize;

use crate::geometry::{Direction, Point, ScrollBounds};
use crate::window::SlotUpdate;

/// Visible index range reported with every scroll event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoreInfo {
    pub first_visible_index: Option<usize>,
    pub last_visible_index: Option<usize>,
}

/// Scrollable content driven by a scroll coordinator
///
/// The coordinator never touches window state directly; it reads bounds and
/// positions through this trait and pushes every committed scroll position
/// back through [`ScrollHost::set_scroll_position`].
pub trait ScrollHost {
    /// Whether metrics have been measured and scrolling can be resolved
    fn is_ready(&self) -> bool;

    /// Primary direction of the content
    fn direction(&self) -> Direction;

    fn scroll_bounds(&self) -> ScrollBounds;

    /// Apply a scroll position; returns the re-rendered slot range if the
    /// window moved
    fn set_scroll_position(&mut self, x: f64, y: f64, dir_x: i8, dir_y: i8) -> Option<SlotUpdate>;

    /// Best-effort position of an item, extrapolated when not rendered
    fn item_position(&self, index: usize) -> Point;

    fn more_info(&self) -> MoreInfo;

    /// Data index currently rendered in the given render slot
    fn node_index(&self, _node: usize) -> Option<usize> {
        None
    }

    /// Hand a programmatic scroll to a natively scrolling host
    ///
    /// Returns false when the host has no native scroller, in which case the
    /// coordinator jumps to the target itself. A host that accepts the request
    /// reports progress back through `on_native_scroll`.
    fn request_native_scroll(&mut self, _target: Point, _animate: bool) -> bool {
        false
    }
}
