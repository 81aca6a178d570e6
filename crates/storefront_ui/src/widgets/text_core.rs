//! Shared text editing utilities for input widgets
//!
//! Cursor positions and selections are character indices, not byte offsets.

use crate::constants::{char_width, CURSOR_WIDTH};
use crate::layout::Bounds;
use crate::renderer::{Color, Renderer};

/// Number of characters in `text`
#[inline]
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of the character at `index` (or the end of the string)
fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// Convert an x screen position to a character index, clamped to the text
pub fn x_to_char_index(x: f32, content_x: f32, font_size: f32, text_len: usize) -> usize {
    let index = ((x - content_x) / char_width(font_size)).round();
    if index <= 0.0 {
        0
    } else {
        (index as usize).min(text_len)
    }
}

/// Normalize a selection range so start <= end
#[inline]
pub fn normalize_selection(selection: (usize, usize)) -> (usize, usize) {
    let (start, end) = selection;
    (start.min(end), start.max(end))
}

/// Remove the selected characters; returns the new cursor
pub fn delete_selection(text: &mut String, selection: (usize, usize)) -> usize {
    let (start, end) = normalize_selection(selection);
    let range = byte_offset(text, start)..byte_offset(text, end);
    text.replace_range(range, "");
    start
}

/// Insert at the cursor (replacing any selection); returns the new cursor
pub fn insert_text(
    text: &mut String,
    cursor: usize,
    selection: Option<(usize, usize)>,
    insert: &str,
) -> usize {
    let at = match selection {
        Some(sel) => delete_selection(text, sel),
        None => cursor.min(char_count(text)),
    };
    let offset = byte_offset(text, at);
    text.insert_str(offset, insert);
    at + char_count(insert)
}

/// Backspace; returns the new cursor if the text changed
pub fn handle_backspace(
    text: &mut String,
    cursor: usize,
    selection: Option<(usize, usize)>,
) -> Option<usize> {
    if let Some(sel) = selection {
        if sel.0 != sel.1 {
            return Some(delete_selection(text, sel));
        }
    }
    let cursor = cursor.min(char_count(text));
    if cursor == 0 {
        return None;
    }
    Some(delete_selection(text, (cursor - 1, cursor)))
}

/// Forward delete; returns the new cursor if the text changed
pub fn handle_delete(
    text: &mut String,
    cursor: usize,
    selection: Option<(usize, usize)>,
) -> Option<usize> {
    if let Some(sel) = selection {
        if sel.0 != sel.1 {
            return Some(delete_selection(text, sel));
        }
    }
    if cursor >= char_count(text) {
        return None;
    }
    Some(delete_selection(text, (cursor, cursor + 1)))
}

/// Content area inside the input's padding
pub fn content_bounds(bounds: Bounds, padding: &crate::layout::Padding) -> Bounds {
    bounds.shrink(*padding)
}

/// Draw the caret
pub fn draw_cursor(renderer: &mut Renderer, content: Bounds, cursor: usize, font_size: f32, color: Color) {
    let x = content.x + cursor as f32 * char_width(font_size);
    renderer.fill_rect(Bounds::new(x, content.y, CURSOR_WIDTH, content.height), color);
}
