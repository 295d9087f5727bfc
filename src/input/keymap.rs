//! Key mapping from terminal key codes to simulation key ids.

use super::event::KeyId;
use crossterm::event::{KeyCode, ModifierKeyCode};
use std::collections::HashMap;

/// Key ids understood by the simulation.
///
/// Printable keys use their lowercase ASCII value; everything else lives in
/// the `0x80..=0xff` range.
pub mod keys {
    use super::KeyId;

    /// Tab.
    pub const TAB: KeyId = KeyId::from_const(9);
    /// Enter / Return.
    pub const ENTER: KeyId = KeyId::from_const(13);
    /// Escape (opens the menu).
    pub const ESCAPE: KeyId = KeyId::from_const(27);
    /// Space.
    pub const SPACE: KeyId = KeyId::from_const(b' ');
    /// Backspace.
    pub const BACKSPACE: KeyId = KeyId::from_const(0x7f);

    /// Strafe left.
    pub const STRAFE_LEFT: KeyId = KeyId::from_const(0xa0);
    /// Strafe right.
    pub const STRAFE_RIGHT: KeyId = KeyId::from_const(0xa1);
    /// Use / open.
    pub const USE: KeyId = KeyId::from_const(0xa2);
    /// Fire.
    pub const FIRE: KeyId = KeyId::from_const(0xa3);

    /// Left arrow (turn left).
    pub const LEFT_ARROW: KeyId = KeyId::from_const(0xac);
    /// Up arrow (move forward).
    pub const UP_ARROW: KeyId = KeyId::from_const(0xad);
    /// Right arrow (turn right).
    pub const RIGHT_ARROW: KeyId = KeyId::from_const(0xae);
    /// Down arrow (move backward).
    pub const DOWN_ARROW: KeyId = KeyId::from_const(0xaf);

    /// Right control.
    pub const RCTRL: KeyId = KeyId::from_const(0x80 + 0x1d);
    /// Right shift.
    pub const RSHIFT: KeyId = KeyId::from_const(0x80 + 0x36);
    /// Right alt.
    pub const RALT: KeyId = KeyId::from_const(0x80 + 0x38);

    /// Home.
    pub const HOME: KeyId = KeyId::from_const(0x80 + 0x47);
    /// Page up.
    pub const PAGE_UP: KeyId = KeyId::from_const(0x80 + 0x49);
    /// End.
    pub const END: KeyId = KeyId::from_const(0x80 + 0x4f);
    /// Page down.
    pub const PAGE_DOWN: KeyId = KeyId::from_const(0x80 + 0x51);
    /// Insert.
    pub const INSERT: KeyId = KeyId::from_const(0x80 + 0x52);
    /// Delete.
    pub const DELETE: KeyId = KeyId::from_const(0x80 + 0x53);
    /// Pause.
    pub const PAUSE: KeyId = KeyId::from_const(0xff);

    /// Function key `F(n)` for `n` in `1..=12`.
    pub const fn function(n: u8) -> Option<KeyId> {
        match n {
            1..=10 => KeyId::new(0x80 + 0x3a + n),
            11 => KeyId::new(0x80 + 0x57),
            12 => KeyId::new(0x80 + 0x58),
            _ => None,
        }
    }
}

/// Translates terminal key codes into simulation key ids.
///
/// The built-in table covers arrows, editing and navigation keys, function
/// keys, modifiers and printable ASCII (letters folded to lowercase).
/// Explicit bindings take precedence over it.
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    bindings: HashMap<KeyCode, KeyId>,
}

impl KeyMap {
    /// Map with only the built-in table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `code` to `key`, replacing any previous binding.
    #[must_use]
    pub fn bind(mut self, code: KeyCode, key: KeyId) -> Self {
        self.bindings.insert(code, key);
        self
    }

    /// Resolve a terminal key code. `None` means the key is ignored.
    pub fn lookup(&self, code: KeyCode) -> Option<KeyId> {
        self.bindings
            .get(&code)
            .copied()
            .or_else(|| default_key(code))
    }
}

/// Built-in translation table.
fn default_key(code: KeyCode) -> Option<KeyId> {
    Some(match code {
        KeyCode::Left => keys::LEFT_ARROW,
        KeyCode::Right => keys::RIGHT_ARROW,
        KeyCode::Up => keys::UP_ARROW,
        KeyCode::Down => keys::DOWN_ARROW,
        KeyCode::Enter => keys::ENTER,
        KeyCode::Esc => keys::ESCAPE,
        KeyCode::Tab | KeyCode::BackTab => keys::TAB,
        KeyCode::Backspace => keys::BACKSPACE,
        KeyCode::Home => keys::HOME,
        KeyCode::End => keys::END,
        KeyCode::PageUp => keys::PAGE_UP,
        KeyCode::PageDown => keys::PAGE_DOWN,
        KeyCode::Insert => keys::INSERT,
        KeyCode::Delete => keys::DELETE,
        KeyCode::Pause => keys::PAUSE,
        KeyCode::F(n) => return keys::function(n),
        KeyCode::Modifier(modifier) => return modifier_key(modifier),
        KeyCode::Char(c) => return char_key(c),
        _ => return None,
    })
}

fn modifier_key(modifier: ModifierKeyCode) -> Option<KeyId> {
    Some(match modifier {
        ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => keys::RCTRL,
        ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => keys::RSHIFT,
        ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => keys::RALT,
        _ => return None,
    })
}

fn char_key(c: char) -> Option<KeyId> {
    if !c.is_ascii() || c.is_ascii_control() {
        return None;
    }
    KeyId::ascii(c.to_ascii_lowercase() as u8)
}
