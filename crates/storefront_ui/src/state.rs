//! Widget state types for stateful widgets

/// Editing state of a text input.
///
/// The text itself is not part of this state; inputs display whatever value
/// their owner supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextInputState {
    /// Cursor position (character index)
    pub cursor: usize,
    /// Selection range (anchor, cursor) if any
    pub selection: Option<(usize, usize)>,
    /// Whether the input has keyboard focus
    pub is_focused: bool,
}

impl TextInputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&mut self) {
        self.is_focused = true;
    }

    pub fn blur(&mut self) {
        self.is_focused = false;
        self.selection = None;
    }

    /// Keep the cursor and selection inside a text of `len` characters
    pub fn clamp_to(&mut self, len: usize) {
        self.cursor = self.cursor.min(len);
        self.selection = self
            .selection
            .map(|(a, b)| (a.min(len), b.min(len)))
            .filter(|(a, b)| a != b);
    }
}
