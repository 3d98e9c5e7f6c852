use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::keymap::{KeyBinding, Keymap};
use crate::nav::NavKey;

/// Input action that can be performed in the demo list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PageUp,
    PageDown,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    None,
}

impl Action {
    /// Remote-control key equivalent of a navigation action
    pub fn nav_key(self) -> Option<NavKey> {
        match self {
            Action::MoveUp => Some(NavKey::Up),
            Action::MoveDown => Some(NavKey::Down),
            Action::MoveLeft => Some(NavKey::Left),
            Action::MoveRight => Some(NavKey::Right),
            Action::PageUp => Some(NavKey::PageUp),
            Action::PageDown => Some(NavKey::PageDown),
            _ => None,
        }
    }
}

/// Handle a key event and return the corresponding action
///
/// `pending_g` is true when the previous key was a lone 'g'.
pub fn handle_key_event(key: KeyEvent, keymap: &Keymap, pending_g: bool) -> Action {
    // crossterm reports uppercase chars with SHIFT on some terminals only
    let modifiers = match key.code {
        KeyCode::Char(c) if c.is_ascii_uppercase() => key.modifiers | KeyModifiers::SHIFT,
        _ => key.modifiers,
    };
    let binding = KeyBinding::new(key.code, modifiers);

    if pending_g {
        if let Some(action) = keymap.g_sequence(&binding) {
            return action;
        }
    }
    if keymap.is_g_prefix(&binding) {
        return Action::PendingG;
    }

    keymap.get(&binding).unwrap_or(Action::None)
}
