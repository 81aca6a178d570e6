//! Input events delivered to widgets

use serde::{Deserialize, Serialize};

/// Events that widgets can respond to.
///
/// Positions are in screen space, `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Mouse button pressed over the page
    MousePress {
        button: MouseButton,
        position: (f32, f32),
        modifiers: KeyModifiers,
    },
    /// Mouse button released
    MouseRelease {
        button: MouseButton,
        position: (f32, f32),
        modifiers: KeyModifiers,
    },
    /// Pointer moved
    MouseMove { position: (f32, f32) },
    /// Mouse wheel scrolled (positive `delta` scrolls content down)
    MouseScroll { delta: f32, position: (f32, f32) },
    /// Committed text (already composed characters)
    TextInput { text: String },
    /// Key pressed
    KeyPress {
        key: KeyCode,
        modifiers: KeyModifiers,
    },
    /// The window lost keyboard focus
    FocusLost,
}

impl Event {
    /// Left click at a position with no modifiers held
    pub fn left_press(x: f32, y: f32) -> Self {
        Event::MousePress {
            button: MouseButton::Left,
            position: (x, y),
            modifiers: KeyModifiers::default(),
        }
    }

    /// Left button release at a position with no modifiers held
    pub fn left_release(x: f32, y: f32) -> Self {
        Event::MouseRelease {
            button: MouseButton::Left,
            position: (x, y),
            modifiers: KeyModifiers::default(),
        }
    }

    /// Plain key press
    pub fn key(key: KeyCode) -> Self {
        Event::KeyPress {
            key,
            modifiers: KeyModifiers::default(),
        }
    }

    /// Committed text
    pub fn text(text: impl Into<String>) -> Self {
        Event::TextInput { text: text.into() }
    }

    /// Position carried by pointer events
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Event::MousePress { position, .. }
            | Event::MouseRelease { position, .. }
            | Event::MouseMove { position }
            | Event::MouseScroll { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keys the widgets care about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    A,
}

/// Keyboard modifiers held during an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}
