//! Single-line text input
//!
//! The input is controlled: it shows the value its owner gives it and never
//! edits that value in place. Every edit is computed on a copy and reported
//! through `on_change`; the owner decides whether the new value comes back via
//! [`TextInput::set_value`]. Only caret, selection and focus live here.

use crate::callback::{Callback, Callback0};
use crate::constants::{line_height, DEFAULT_FONT_SIZE, SUBMIT_BUTTON_SIZE, TEXT_INPUT_PADDING};
use crate::event::{Event, KeyCode, MouseButton};
use crate::layout::{Bounds, Length, Padding, Size};
use crate::renderer::{Color, Icon, Renderer};
use crate::state::TextInputState;
use crate::widget::Widget;
use crate::widgets::text_core;

/// Appearance of a text input
#[derive(Debug, Clone)]
pub struct TextInputConfig {
    pub background: Color,
    pub border: Color,
    pub border_focused: Color,
    pub text_color: Color,
    pub placeholder_color: Color,
    pub cursor_color: Color,
    /// Draw only a bottom border (used for fields embedded in popups)
    pub underline_only: bool,
}

impl Default for TextInputConfig {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            border: Color::BORDER,
            border_focused: Color::BORDER_FOCUSED,
            text_color: Color::TEXT_DARK,
            placeholder_color: Color::TEXT_MUTED,
            cursor_color: Color::TEXT_DARK,
            underline_only: false,
        }
    }
}

/// A text input widget
pub struct TextInput<M> {
    value: String,
    placeholder: String,
    state: TextInputState,
    width: Length,
    padding: Padding,
    font_size: f32,
    config: TextInputConfig,
    /// Show an inline submit affordance at the right edge
    submit_button: bool,
    on_change: Callback<String, M>,
    on_submit: Callback0<M>,
}

impl<M> Default for TextInput<M> {
    fn default() -> Self {
        Self {
            value: String::new(),
            placeholder: String::new(),
            state: TextInputState::default(),
            width: Length::Fill,
            padding: TEXT_INPUT_PADDING,
            font_size: DEFAULT_FONT_SIZE,
            config: TextInputConfig::default(),
            submit_button: false,
            on_change: Callback::none(),
            on_submit: Callback::none(),
        }
    }
}

impl<M> TextInput<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the displayed value
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }

    crate::builder_field!(font_size, f32);
    crate::builder_field!(config, TextInputConfig);
    crate::builder_field!(submit_button, bool);

    crate::callback_setter!(on_change, String);
    crate::callback_setter!(on_submit);

    /// Replace the displayed value (owner re-render)
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.state.clamp_to(text_core::char_count(&self.value));
    }

    pub fn current_value(&self) -> &str {
        &self.value
    }

    pub fn state(&self) -> &TextInputState {
        &self.state
    }

    pub fn is_focused(&self) -> bool {
        self.state.is_focused
    }

    pub fn focus(&mut self) {
        self.state.focus();
        self.state.cursor = text_core::char_count(&self.value);
    }

    pub fn blur(&mut self) {
        self.state.blur();
    }

    /// Area of the inline submit affordance, if shown
    fn submit_bounds(&self, bounds: Bounds) -> Option<Bounds> {
        self.submit_button.then(|| {
            let side = SUBMIT_BUTTON_SIZE.min(bounds.height);
            Bounds::new(
                bounds.right() - side - (bounds.height - side) / 2.0,
                bounds.y + (bounds.height - side) / 2.0,
                side,
                side,
            )
        })
    }

    fn content_bounds(&self, bounds: Bounds) -> Bounds {
        let mut content = text_core::content_bounds(bounds, &self.padding);
        if let Some(submit) = self.submit_bounds(bounds) {
            content.width = (submit.x - content.x).max(0.0);
        }
        content
    }

    /// Apply an edit to a copy of the value and report it
    fn edit<F>(&mut self, f: F) -> Option<M>
    where
        F: FnOnce(&mut String, &TextInputState) -> Option<usize>,
    {
        let mut next = self.value.clone();
        let cursor = f(&mut next, &self.state)?;
        self.state.cursor = cursor;
        self.state.selection = None;
        log::debug!("TextInput: edit -> '{}'", next);
        self.on_change.call(next)
    }
}

impl<M> Widget<M> for TextInput<M> {
    fn layout(&mut self, available: Size) -> Size {
        let min_height = (line_height(self.font_size) + self.padding.vertical()).max(if self.submit_button {
            SUBMIT_BUTTON_SIZE
        } else {
            0.0
        });
        Size::new(self.width.resolve(available.width, 120.0), min_height)
    }

    fn draw(&self, renderer: &mut Renderer, bounds: Bounds) {
        let border = if self.state.is_focused {
            self.config.border_focused
        } else {
            self.config.border
        };
        renderer.fill_rect(bounds, self.config.background);
        if self.config.underline_only {
            renderer.line((bounds.x, bounds.bottom()), (bounds.right(), bounds.bottom()), border, 1.0);
        } else {
            renderer.stroke_rect(bounds, border, 1.0);
        }

        let content = self.content_bounds(bounds);
        let text_y = content.y + (content.height - self.font_size) / 2.0;
        renderer.push_clip(content);
        if self.value.is_empty() {
            if !self.placeholder.is_empty() {
                renderer.text(&self.placeholder, content.x, text_y, self.font_size, self.config.placeholder_color);
            }
        } else {
            renderer.text(&self.value, content.x, text_y, self.font_size, self.config.text_color);
        }
        if self.state.is_focused {
            text_core::draw_cursor(renderer, content, self.state.cursor, self.font_size, self.config.cursor_color);
        }
        renderer.pop_clip();

        if let Some(submit) = self.submit_bounds(bounds) {
            renderer.fill_rect(submit, Color::PRIMARY);
            let inset = (submit.width - crate::constants::ICON_SIZE) / 2.0;
            renderer.icon(
                Icon::ArrowRight,
                Bounds::new(submit.x + inset, submit.y + inset, submit.width - 2.0 * inset, submit.height - 2.0 * inset),
                Color::WHITE,
            );
        }
    }

    fn on_event(&mut self, event: &Event, bounds: Bounds) -> Option<M> {
        match event {
            Event::MousePress {
                button: MouseButton::Left,
                position: (x, y),
                ..
            } => {
                if let Some(submit) = self.submit_bounds(bounds) {
                    if submit.contains(*x, *y) {
                        log::debug!("TextInput: submit affordance clicked");
                        return self.on_submit.emit();
                    }
                }
                if bounds.contains(*x, *y) {
                    let content = self.content_bounds(bounds);
                    self.state.is_focused = true;
                    self.state.selection = None;
                    self.state.cursor = text_core::x_to_char_index(
                        *x,
                        content.x,
                        self.font_size,
                        text_core::char_count(&self.value),
                    );
                    log::debug!("TextInput: focused, cursor = {}", self.state.cursor);
                } else if self.state.is_focused {
                    self.state.blur();
                    log::debug!("TextInput: blurred by outside press");
                }
                None
            }

            Event::TextInput { text } if self.state.is_focused => {
                let text = text.clone();
                self.edit(move |value, state| {
                    Some(text_core::insert_text(value, state.cursor, state.selection, &text))
                })
            }

            Event::KeyPress { key, modifiers } if self.state.is_focused => match key {
                KeyCode::Backspace => {
                    self.edit(|value, state| text_core::handle_backspace(value, state.cursor, state.selection))
                }
                KeyCode::Delete => {
                    self.edit(|value, state| text_core::handle_delete(value, state.cursor, state.selection))
                }
                KeyCode::Left => {
                    self.state.cursor = self.state.cursor.saturating_sub(1);
                    self.state.selection = None;
                    None
                }
                KeyCode::Right => {
                    self.state.cursor = (self.state.cursor + 1).min(text_core::char_count(&self.value));
                    self.state.selection = None;
                    None
                }
                KeyCode::Home => {
                    self.state.cursor = 0;
                    self.state.selection = None;
                    None
                }
                KeyCode::End => {
                    self.state.cursor = text_core::char_count(&self.value);
                    self.state.selection = None;
                    None
                }
                KeyCode::A if modifiers.ctrl => {
                    let len = text_core::char_count(&self.value);
                    self.state.selection = (len > 0).then_some((0, len));
                    self.state.cursor = len;
                    None
                }
                KeyCode::Enter => {
                    log::debug!("TextInput: Enter pressed, value = '{}'", self.value);
                    self.on_submit.emit()
                }
                KeyCode::Escape => {
                    self.state.blur();
                    None
                }
                _ => None,
            },

            Event::FocusLost => {
                self.state.blur();
                None
            }

            _ => None,
        }
    }
}

/// Create a text input
pub fn text_input<M>() -> TextInput<M> {
    TextInput::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    const B: Bounds = Bounds {
        x: 0.0,
        y: 0.0,
        width: 300.0,
        height: 44.0,
    };

    #[derive(Debug, Clone, PartialEq)]
    enum Msg {
        Changed(String),
        Submitted,
    }

    fn input(value: &str) -> TextInput<Msg> {
        text_input()
            .value(value)
            .on_change(Msg::Changed)
            .on_submit(|| Msg::Submitted)
    }

    fn focused(value: &str) -> TextInput<Msg> {
        let mut i = input(value);
        i.focus();
        i
    }

    #[test]
    fn test_typing_reports_new_value_without_mutating() {
        let mut i = focused("SAVE");
        let msg = i.on_event(&Event::text("1"), B);
        assert_eq!(msg, Some(Msg::Changed("SAVE1".into())));
        assert_eq!(i.current_value(), "SAVE");
    }

    #[test]
    fn test_owner_supplies_value_back() {
        let mut i = focused("SAVE");
        if let Some(Msg::Changed(v)) = i.on_event(&Event::text("1"), B) {
            i.set_value(v);
        }
        let msg = i.on_event(&Event::text("0"), B);
        assert_eq!(msg, Some(Msg::Changed("SAVE10".into())));
    }

    #[test]
    fn test_unfocused_ignores_typing() {
        let mut i = input("abc");
        assert_eq!(i.on_event(&Event::text("x"), B), None);
    }

    #[test]
    fn test_backspace_at_start_reports_nothing() {
        let mut i = focused("");
        assert_eq!(i.on_event(&Event::key(KeyCode::Backspace), B), None);
    }

    #[test]
    fn test_backspace_reports_shorter_value() {
        let mut i = focused("abc");
        assert_eq!(
            i.on_event(&Event::key(KeyCode::Backspace), B),
            Some(Msg::Changed("ab".into()))
        );
    }

    #[test]
    fn test_enter_submits() {
        let mut i = focused("abc");
        assert_eq!(i.on_event(&Event::key(KeyCode::Enter), B), Some(Msg::Submitted));
    }

    #[test]
    fn test_submit_affordance_click_submits() {
        let mut i = input("abc").submit_button(true);
        // Affordance sits against the right edge
        assert_eq!(i.on_event(&Event::left_press(290.0, 22.0), B), Some(Msg::Submitted));
        assert!(!i.is_focused());
    }

    #[test]
    fn test_press_focuses_and_outside_press_blurs() {
        let mut i = input("abc");
        i.on_event(&Event::left_press(20.0, 20.0), B);
        assert!(i.is_focused());
        i.on_event(&Event::left_press(20.0, 200.0), B);
        assert!(!i.is_focused());
    }

    #[test]
    fn test_shrinking_value_clamps_cursor() {
        let mut i = focused("abcdef");
        i.set_value("ab");
        assert_eq!(i.state().cursor, 2);
    }

    #[test]
    fn test_draw_shows_placeholder_when_empty() {
        let i = input("").placeholder("Type here");
        let mut r = Renderer::new(400.0, 100.0);
        i.draw(&mut r, B);
        assert_eq!(r.texts(), vec!["Type here"]);
    }

    #[test]
    fn test_draw_shows_value() {
        let i = input("CODE");
        let mut r = Renderer::new(400.0, 100.0);
        i.draw(&mut r, B);
        assert_eq!(r.texts(), vec!["CODE"]);
    }
}
