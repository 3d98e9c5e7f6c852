//! Directional remote-control keys

use serde::{Deserialize, Serialize};
use vlist_core::Direction;

/// Navigation key delivered by a remote or keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavKey {
    Left,
    Up,
    Right,
    Down,
    PageUp,
    PageDown,
}

impl NavKey {
    /// Map a TV platform key code
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(NavKey::Left),
            38 => Some(NavKey::Up),
            39 => Some(NavKey::Right),
            40 => Some(NavKey::Down),
            33 => Some(NavKey::PageUp),
            34 => Some(NavKey::PageDown),
            _ => None,
        }
    }

    pub fn key_code(self) -> u32 {
        match self {
            NavKey::Left => 37,
            NavKey::Up => 38,
            NavKey::Right => 39,
            NavKey::Down => 40,
            NavKey::PageUp => 33,
            NavKey::PageDown => 34,
        }
    }

    #[inline]
    pub fn is_page(self) -> bool {
        matches!(self, NavKey::PageUp | NavKey::PageDown)
    }

    /// Whether the key travels toward lower indices
    #[inline]
    pub fn is_backward(self) -> bool {
        matches!(self, NavKey::Left | NavKey::Up | NavKey::PageUp)
    }

    /// Whether an arrow key travels along the primary axis of a list
    pub fn is_along(self, direction: Direction) -> bool {
        match self {
            NavKey::Up | NavKey::Down => direction.is_vertical(),
            NavKey::Left | NavKey::Right => !direction.is_vertical(),
            NavKey::PageUp | NavKey::PageDown => true,
        }
    }
}
