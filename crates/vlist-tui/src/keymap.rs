use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};
use tracing::warn;
use vlist_core::config::KeymapConfig;

use crate::input::Action;

/// Key names accepted inside `<...>`
const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("cr", KeyCode::Enter),
    ("enter", KeyCode::Enter),
    ("esc", KeyCode::Esc),
    ("tab", KeyCode::Tab),
    ("space", KeyCode::Char(' ')),
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("pageup", KeyCode::PageUp),
    ("pgup", KeyCode::PageUp),
    ("pagedown", KeyCode::PageDown),
    ("pgdn", KeyCode::PageDown),
];

/// Remote-control keys bound regardless of configuration
const REMOTE_KEYS: &[(KeyCode, Action)] = &[
    (KeyCode::Left, Action::MoveLeft),
    (KeyCode::Right, Action::MoveRight),
    (KeyCode::Up, Action::MoveUp),
    (KeyCode::Down, Action::MoveDown),
    (KeyCode::PageUp, Action::PageUp),
    (KeyCode::PageDown, Action::PageDown),
    (KeyCode::Home, Action::JumpToTop),
    (KeyCode::End, Action::JumpToBottom),
];

/// Key code plus modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Parse Vim-style notation
    ///
    /// Accepts a single character (`j`, `G` as Shift+g), or a bracketed
    /// key with optional modifier prefixes (`<C-f>`, `<S-Tab>`, `<C-S-x>`,
    /// `<PageDown>`).
    pub fn parse(notation: &str) -> Option<Self> {
        let notation = notation.trim();
        match notation.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
            Some(inner) if !inner.is_empty() => parse_bracketed(inner),
            _ => single_char(notation).map(char_binding),
        }
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

fn char_binding(c: char) -> KeyBinding {
    if c.is_ascii_uppercase() {
        KeyBinding::new(KeyCode::Char(c), KeyModifiers::SHIFT)
    } else {
        KeyBinding::plain(KeyCode::Char(c))
    }
}

fn parse_bracketed(inner: &str) -> Option<KeyBinding> {
    let mut modifiers = KeyModifiers::NONE;
    let mut rest = inner;
    loop {
        if let Some(tail) = rest.strip_prefix("C-") {
            modifiers |= KeyModifiers::CONTROL;
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("S-") {
            modifiers |= KeyModifiers::SHIFT;
            rest = tail;
        } else {
            break;
        }
    }

    let lower = rest.to_ascii_lowercase();
    let code = NAMED_KEYS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, code)| *code)
        .or_else(|| single_char(&lower).map(KeyCode::Char))?;
    Some(KeyBinding::new(code, modifiers))
}

/// Key-to-action lookup built from [`KeymapConfig`]
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
    /// Second key of `g`-prefixed sequences such as `gg`
    g_sequences: HashMap<char, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut keymap = Self {
            bindings: HashMap::new(),
            g_sequences: HashMap::new(),
        };

        for (notation, action) in [
            (&config.quit, Action::Quit),
            (&config.move_up, Action::MoveUp),
            (&config.move_down, Action::MoveDown),
            (&config.move_left, Action::MoveLeft),
            (&config.move_right, Action::MoveRight),
            (&config.page_up, Action::PageUp),
            (&config.page_down, Action::PageDown),
            (&config.jump_to_top, Action::JumpToTop),
            (&config.jump_to_bottom, Action::JumpToBottom),
        ] {
            keymap.bind(notation, action);
        }

        keymap
            .bindings
            .insert(KeyBinding::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Action::Quit);
        for &(code, action) in REMOTE_KEYS {
            keymap.bindings.entry(KeyBinding::plain(code)).or_insert(action);
        }
        keymap
    }

    fn bind(&mut self, notation: &str, action: Action) {
        let mut chars = notation.chars();
        if let (Some('g'), Some(second), None) = (chars.next(), chars.next(), chars.next()) {
            if self.g_sequences.insert(second, action).is_some() {
                warn!(notation, ?action, "Sequence bound twice, keeping the last");
            }
            return;
        }

        let Some(binding) = KeyBinding::parse(notation) else {
            warn!(notation, "Invalid key binding, ignoring");
            return;
        };
        if let Some(existing) = self.bindings.get(&binding) {
            warn!(notation, ?existing, ?action, "Key already bound, ignoring");
            return;
        }
        self.bindings.insert(binding, action);
    }

    pub fn get(&self, binding: &KeyBinding) -> Option<Action> {
        self.bindings.get(binding).copied()
    }

    /// Whether a plain `g` starts a sequence
    pub fn is_g_prefix(&self, binding: &KeyBinding) -> bool {
        !self.g_sequences.is_empty() && *binding == KeyBinding::plain(KeyCode::Char('g'))
    }

    /// Action completing a `g` sequence with `next`
    pub fn g_sequence(&self, next: &KeyBinding) -> Option<Action> {
        match next.code {
            KeyCode::Char(c) if next.modifiers == KeyModifiers::NONE => {
                self.g_sequences.get(&c).copied()
            }
            _ => None,
        }
    }
}
