use std::str::FromStr;

use crate::error::ParseKeyError;
use crate::option::OptionId;

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Space,
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    /// The meta/command key on its own
    Meta,
    /// Anything the host couldn't name
    Unidentified,
}

impl Key {
    /// Keys the listbox handles itself. Their default behavior is suppressed.
    pub const USED: [Key; 6] = [Key::Enter, Key::Space, Key::Down, Key::Up, Key::Home, Key::End];

    pub fn is_used(self) -> bool {
        Self::USED.contains(&self)
    }
}

impl FromStr for Key {
    type Err = ParseKeyError;

    /// Parse a DOM `KeyboardEvent.key` value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            " " | "Spacebar" => Key::Space,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "Tab" => Key::Tab,
            "ArrowUp" => Key::Up,
            "ArrowDown" => Key::Down,
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            "Meta" => Key::Meta,
            "Unidentified" => Key::Unidentified,
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => match s.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
                        Some(n) if (1..=24).contains(&n) => Key::F(n),
                        _ => return Err(ParseKeyError(s.to_string())),
                    },
                }
            }
        };
        Ok(key)
    }
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Default::default()
        }
    }
}

/// A keyboard event delivered to the listbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    /// Option that had input focus, resolved by the host.
    pub target: Option<OptionId>,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            target: None,
        }
    }

    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn target(mut self, target: impl Into<OptionId>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// Press or release of a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    Down(KeyEvent),
    Up(KeyEvent),
}

/// Whether the listbox handled an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Handled; the host should suppress the platform default.
    Consumed,
    /// Not handled.
    Ignored,
}

impl EventResult {
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}

/// Notifications queued for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListboxEvent {
    /// The set of selected options changed.
    Change,
    /// The option should receive input focus.
    Focus(OptionId),
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::{KeyCode, ModifierKeyCode};
        match code {
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            KeyCode::Modifier(
                ModifierKeyCode::LeftMeta
                | ModifierKeyCode::RightMeta
                | ModifierKeyCode::LeftSuper
                | ModifierKeyCode::RightSuper,
            ) => Key::Meta,
            _ => Key::Unidentified,
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::KeyEvent> for KeyInput {
    /// Repeats count as presses. Terminals only report releases when keyboard
    /// enhancement is enabled.
    fn from(event: crossterm::event::KeyEvent) -> Self {
        use crossterm::event::KeyEventKind;
        let key_event = KeyEvent::new(event.code.into()).modifiers(event.modifiers.into());
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => KeyInput::Down(key_event),
            KeyEventKind::Release => KeyInput::Up(key_event),
        }
    }
}
