//! Plain geometry shared by the metrics, window and scroll layers.

use serde::{Deserialize, Serialize};

/// Primary scrolling axis of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

impl Direction {
    #[inline]
    pub fn is_vertical(self) -> bool {
        self == Direction::Vertical
    }
}

/// A scroll offset or item origin in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub left: f64,
    pub top: f64,
}

impl Point {
    pub const ZERO: Point = Point { left: 0.0, top: 0.0 };

    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

/// Measured size of the list viewport
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClientSize {
    pub width: f64,
    pub height: f64,
}

impl ClientSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Extent along the given primary direction
    pub fn primary(&self, direction: Direction) -> f64 {
        if direction.is_vertical() {
            self.height
        } else {
            self.width
        }
    }

    /// Extent across the given primary direction
    pub fn secondary(&self, direction: Direction) -> f64 {
        if direction.is_vertical() {
            self.width
        } else {
            self.height
        }
    }
}

/// Scrollable extents derived from client size and content size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollBounds {
    pub client_width: f64,
    pub client_height: f64,
    pub scroll_width: f64,
    pub scroll_height: f64,
    pub max_left: f64,
    pub max_top: f64,
}

impl ScrollBounds {
    pub fn new(client: ClientSize, scroll_width: f64, scroll_height: f64) -> Self {
        Self {
            client_width: client.width,
            client_height: client.height,
            scroll_width,
            scroll_height,
            max_left: (scroll_width - client.width).max(0.0),
            max_top: (scroll_height - client.height).max(0.0),
        }
    }

    #[inline]
    pub fn can_scroll_horizontally(&self) -> bool {
        self.max_left > 0.0
    }

    #[inline]
    pub fn can_scroll_vertically(&self) -> bool {
        self.max_top > 0.0
    }

    /// Clamp a position into `[0, max]` on both axes
    pub fn clamp(&self, point: Point) -> Point {
        Point {
            left: clamp_axis(point.left, self.max_left),
            top: clamp_axis(point.top, self.max_top),
        }
    }
}

fn clamp_axis(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}

/// Position of an item in primary/secondary coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridPosition {
    pub primary_position: f64,
    pub secondary_position: f64,
}

impl GridPosition {
    /// Map onto `{left, top}` for the given primary direction
    pub fn to_point(self, direction: Direction) -> Point {
        if direction.is_vertical() {
            Point::new(self.secondary_position, self.primary_position)
        } else {
            Point::new(self.primary_position, self.secondary_position)
        }
    }

    /// Inverse of [`GridPosition::to_point`]
    pub fn from_point(point: Point, direction: Direction) -> Self {
        if direction.is_vertical() {
            Self {
                primary_position: point.top,
                secondary_position: point.left,
            }
        } else {
            Self {
                primary_position: point.left,
                secondary_position: point.top,
            }
        }
    }
}
