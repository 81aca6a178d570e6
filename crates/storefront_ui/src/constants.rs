//! Centralized constants for storefront_ui
//!
//! All magic numbers shared between widgets live here.

use crate::layout::Padding;
use web_time::Duration;

// =============================================================================
// Typography
// =============================================================================

/// Default font size (text-sm)
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Body text size (text-base)
pub const BODY_FONT_SIZE: f32 = 16.0;

/// Heading text size (text-2xl)
pub const HEADING_FONT_SIZE: f32 = 24.0;

/// Approximate character width as a ratio of font size
pub const CHAR_WIDTH_FACTOR: f32 = 0.6;

/// Line height as a ratio of font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.4;

/// Approximate width of one character
#[inline]
pub fn char_width(font_size: f32) -> f32 {
    font_size * CHAR_WIDTH_FACTOR
}

/// Height of one line of text
#[inline]
pub fn line_height(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_FACTOR
}

/// Approximate rendered width of a string
pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * char_width(font_size)
}

// =============================================================================
// Spacing
// =============================================================================

pub const PADDING_COMPACT: f32 = 8.0;
pub const PADDING_STANDARD: f32 = 12.0;
pub const PADDING_COMFORTABLE: f32 = 16.0;

/// Default padding for text inputs
pub const TEXT_INPUT_PADDING: Padding = Padding {
    top: PADDING_STANDARD,
    right: PADDING_COMFORTABLE,
    bottom: PADDING_STANDARD,
    left: PADDING_COMFORTABLE,
};

/// Default padding for buttons
pub const BUTTON_PADDING: Padding = Padding {
    top: PADDING_COMPACT,
    right: PADDING_COMFORTABLE,
    bottom: PADDING_COMPACT,
    left: PADDING_COMFORTABLE,
};

/// Side length of the inline submit affordance inside a text input
pub const SUBMIT_BUTTON_SIZE: f32 = 32.0;

/// Size of inline icons
pub const ICON_SIZE: f32 = 16.0;

/// Width of the text cursor
pub const CURSOR_WIDTH: f32 = 1.0;

// =============================================================================
// Dropdown
// =============================================================================

/// Trigger width for the small size variant (w-32)
pub const DROPDOWN_WIDTH_SMALL: f32 = 128.0;
/// Trigger width for the medium size variant (w-48)
pub const DROPDOWN_WIDTH_MEDIUM: f32 = 192.0;
/// Trigger width for the large size variant (w-64)
pub const DROPDOWN_WIDTH_LARGE: f32 = 256.0;

/// Trigger padding (px-5 py-3)
pub const DROPDOWN_TRIGGER_PADDING: Padding = Padding::symmetric(12.0, 20.0);

/// Gap between trigger and popup (mt-2)
pub const DROPDOWN_POPUP_GAP: f32 = 8.0;

/// Height of one option row in the popup
pub const DROPDOWN_OPTION_HEIGHT: f32 = 36.0;

/// Padding around the option list
pub const DROPDOWN_LIST_PADDING: f32 = 8.0;

/// Height of the search field inside the popup
pub const DROPDOWN_SEARCH_HEIGHT: f32 = 36.0;

/// Maximum height of the scrollable option list (max-h-60)
pub const DROPDOWN_LIST_MAX_HEIGHT: f32 = 240.0;

/// Expansion extent contributed by each option when the popup opens
pub const DROPDOWN_EXTENT_PER_OPTION: f32 = 180.0;

/// Upper bound on the popup expansion extent
pub const DROPDOWN_MAX_POPUP_EXTENT: f32 = 300.0;

/// Duration of the popup reveal/collapse transition
pub const REVEAL_DURATION: Duration = Duration::from_millis(300);

/// Opacity multiplier for disabled controls
pub const DISABLED_OPACITY: f32 = 0.5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_width() {
        assert!((char_width(10.0) - 6.0).abs() < 0.001);
    }

    #[test]
    fn test_text_width_counts_chars_not_bytes() {
        assert!((text_width("äö", 10.0) - 12.0).abs() < 0.001);
    }

    #[test]
    fn test_dropdown_widths_ordered() {
        assert!(DROPDOWN_WIDTH_SMALL < DROPDOWN_WIDTH_MEDIUM);
        assert!(DROPDOWN_WIDTH_MEDIUM < DROPDOWN_WIDTH_LARGE);
    }

    #[test]
    fn test_extent_cap_exceeds_one_option() {
        assert!(DROPDOWN_MAX_POPUP_EXTENT > DROPDOWN_EXTENT_PER_OPTION);
        assert!(DROPDOWN_MAX_POPUP_EXTENT > DROPDOWN_OPTION_HEIGHT);
    }
}
