//! Backend-neutral input event types.

/// Generic key representation.
///
/// Hosts map their native key codes to these values before handing them to
/// [`crate::input::CanvasSession::key_press`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)] // Modifier variants are only forwarded by some hosts
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Backspace key
    Backspace,
    /// Tab key
    Tab,
    /// Space bar
    Space,
    /// Shift modifier
    Shift,
    /// Ctrl modifier
    Ctrl,
    /// Alt modifier
    Alt,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Maps a typed character, turning `' '`, `'\n'` and `'\r'` into their
    /// dedicated keys.
    pub fn from_char(c: char) -> Self {
        match c {
            ' ' => Key::Space,
            '\n' | '\r' => Key::Return,
            '\u{8}' => Key::Backspace,
            '\u{1b}' => Key::Escape,
            '\t' => Key::Tab,
            c => Key::Char(c),
        }
    }
}

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left mouse button (primary drawing button)
    Left,
    /// Right mouse button (ignored by the tools)
    Right,
    /// Middle mouse button (ignored by the tools)
    Middle,
}
