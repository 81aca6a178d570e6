//! Button widget

use crate::constants::{line_height, text_width, BUTTON_PADDING, DEFAULT_FONT_SIZE, DISABLED_OPACITY, ICON_SIZE};
use crate::event::{Event, MouseButton};
use crate::layout::{Bounds, Length, Padding, Size};
use crate::renderer::{Color, Icon, Renderer};
use crate::widget::Widget;

/// Button visual style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonStyle {
    /// Light surface with a border
    #[default]
    Normal,
    /// Dark filled call-to-action
    Primary,
    /// No background or border, content only
    Bare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ButtonState {
    #[default]
    Normal,
    Hovered,
    Pressed,
}

/// A clickable button showing a label, an icon, or both
pub struct Button<M> {
    label: String,
    icon: Option<Icon>,
    on_click: Option<M>,
    width: Length,
    height: Length,
    padding: Padding,
    font_size: f32,
    bold: bool,
    style: ButtonStyle,
    disabled: bool,
    state: ButtonState,
}

impl<M> Button<M> {
    /// Create a new button with the given label
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: None,
            on_click: None,
            width: Length::Shrink,
            height: Length::Shrink,
            padding: BUTTON_PADDING,
            font_size: DEFAULT_FONT_SIZE,
            bold: false,
            style: ButtonStyle::default(),
            disabled: false,
            state: ButtonState::Normal,
        }
    }

    /// Set the message produced when the button is clicked
    pub fn on_click(mut self, message: M) -> Self {
        self.on_click = Some(message);
        self
    }

    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.height = height.into();
        self
    }

    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }

    crate::builder_field!(font_size, f32);
    crate::builder_field!(bold, bool);
    crate::builder_field!(style, ButtonStyle);
    crate::builder_field!(disabled, bool);

    pub fn label(&self) -> &str {
        &self.label
    }

    fn content_size(&self) -> Size {
        let label_width = text_width(&self.label, self.font_size);
        let icon_width = match (self.icon, self.label.is_empty()) {
            (Some(_), true) => ICON_SIZE,
            (Some(_), false) => ICON_SIZE + self.padding.left / 2.0,
            (None, _) => 0.0,
        };
        Size::new(
            label_width + icon_width,
            line_height(self.font_size).max(if self.icon.is_some() { ICON_SIZE } else { 0.0 }),
        )
    }

    fn background_color(&self) -> Option<Color> {
        let color = match (self.style, self.state) {
            (ButtonStyle::Bare, _) => return None,
            (ButtonStyle::Normal, ButtonState::Normal) => Color::INPUT_BG,
            (ButtonStyle::Normal, _) => Color::INPUT_HOVER,
            (ButtonStyle::Primary, ButtonState::Normal) => Color::PRIMARY,
            (ButtonStyle::Primary, _) => Color::PRIMARY_HOVER,
        };
        Some(self.apply_disabled(color))
    }

    fn foreground_color(&self) -> Color {
        let color = match self.style {
            ButtonStyle::Primary => Color::WHITE,
            ButtonStyle::Normal | ButtonStyle::Bare => Color::TEXT_PRIMARY,
        };
        self.apply_disabled(color)
    }

    fn apply_disabled(&self, color: Color) -> Color {
        if self.disabled {
            color.faded(DISABLED_OPACITY)
        } else {
            color
        }
    }
}

impl<M: Clone> Widget<M> for Button<M> {
    fn layout(&mut self, available: Size) -> Size {
        let content = self.content_size();
        Size::new(
            self.width
                .resolve(available.width, content.width + self.padding.horizontal()),
            self.height
                .resolve(available.height, content.height + self.padding.vertical()),
        )
    }

    fn draw(&self, renderer: &mut Renderer, bounds: Bounds) {
        if let Some(bg) = self.background_color() {
            renderer.fill_rect(bounds, bg);
        }
        if self.style == ButtonStyle::Normal {
            renderer.stroke_rect(bounds, self.apply_disabled(Color::BORDER), 1.0);
        }

        let content = self.content_size();
        let inner = bounds.shrink(self.padding);
        let mut x = inner.x + ((inner.width - content.width) / 2.0).max(0.0);
        let fg = self.foreground_color();

        if !self.label.is_empty() {
            let y = bounds.y + (bounds.height - self.font_size) / 2.0;
            if self.bold {
                renderer.bold_text(&self.label, x, y, self.font_size, fg);
            } else {
                renderer.text(&self.label, x, y, self.font_size, fg);
            }
            x += text_width(&self.label, self.font_size) + self.padding.left / 2.0;
        }

        if let Some(icon) = self.icon {
            let y = bounds.y + (bounds.height - ICON_SIZE) / 2.0;
            renderer.icon(icon, Bounds::new(x, y, ICON_SIZE, ICON_SIZE), fg);
        }
    }

    fn on_event(&mut self, event: &Event, bounds: Bounds) -> Option<M> {
        if self.disabled {
            self.state = ButtonState::Normal;
            return None;
        }

        match event {
            Event::MouseMove { position } => {
                let inside = bounds.contains(position.0, position.1);
                if inside && self.state == ButtonState::Normal {
                    self.state = ButtonState::Hovered;
                } else if !inside && self.state == ButtonState::Hovered {
                    self.state = ButtonState::Normal;
                }
                None
            }
            Event::MousePress {
                button: MouseButton::Left,
                position,
                ..
            } if bounds.contains(position.0, position.1) => {
                self.state = ButtonState::Pressed;
                // Click fires on press so a focus change elsewhere can't swallow it
                log::debug!("Button '{}': pressed", self.label);
                self.on_click.clone()
            }
            Event::MouseRelease {
                button: MouseButton::Left,
                position,
                ..
            } => {
                self.state = if bounds.contains(position.0, position.1) {
                    ButtonState::Hovered
                } else {
                    ButtonState::Normal
                };
                None
            }
            _ => None,
        }
    }
}

/// Create a button
pub fn button<M>(label: impl Into<String>) -> Button<M> {
    Button::new(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    const B: Bounds = Bounds {
        x: 0.0,
        y: 0.0,
        width: 100.0,
        height: 40.0,
    };

    #[test]
    fn test_click_inside_emits_message() {
        let mut b = button("Go").on_click(7);
        assert_eq!(b.on_event(&Event::left_press(50.0, 20.0), B), Some(7));
    }

    #[test]
    fn test_click_outside_is_ignored() {
        let mut b = button("Go").on_click(7);
        assert_eq!(b.on_event(&Event::left_press(150.0, 20.0), B), None);
    }

    #[test]
    fn test_disabled_never_emits() {
        let mut b = button("Go").on_click(7).disabled(true);
        assert_eq!(b.on_event(&Event::left_press(50.0, 20.0), B), None);
    }

    #[test]
    fn test_no_handler_no_message() {
        let mut b: Button<i32> = button("Go");
        assert_eq!(b.on_event(&Event::left_press(50.0, 20.0), B), None);
    }

    #[test]
    fn test_shrink_layout_fits_label_and_padding() {
        let mut b: Button<i32> = button("Go").font_size(10.0).padding(Padding::all(5.0));
        let size = b.layout(Size::new(500.0, 500.0));
        assert!((size.width - 22.0).abs() < 0.001);
        assert!((size.height - 24.0).abs() < 0.001);
    }

    #[test]
    fn test_icon_only_button_draws_icon() {
        let b: Button<i32> = button("").icon(Icon::ArrowRight);
        let mut r = Renderer::new(200.0, 200.0);
        b.draw(&mut r, B);
        assert!(r
            .commands()
            .any(|c| matches!(c, crate::renderer::DrawCommand::Icon { icon: Icon::ArrowRight, .. })));
        assert!(r.texts().is_empty());
    }
}
