//! Static text label

use crate::constants::{line_height, text_width, DEFAULT_FONT_SIZE};
use crate::layout::{Alignment, Bounds, Size};
use crate::renderer::{Color, Renderer};
use crate::widget::Widget;

/// A single line of text
#[derive(Debug, Clone)]
pub struct Text {
    content: String,
    size: f32,
    color: Color,
    bold: bool,
    align: Alignment,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            size: DEFAULT_FONT_SIZE,
            color: Color::TEXT_DARK,
            bold: false,
            align: Alignment::Start,
        }
    }

    crate::builder_field!(size, f32);
    crate::builder_field!(color, Color);
    crate::builder_field!(bold, bool);
    crate::builder_field!(align, Alignment);

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the displayed text
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    fn natural_size(&self) -> Size {
        Size::new(text_width(&self.content, self.size), line_height(self.size))
    }
}

impl<M> Widget<M> for Text {
    fn layout(&mut self, available: Size) -> Size {
        let natural = self.natural_size();
        Size::new(natural.width.min(available.width), natural.height)
    }

    fn draw(&self, renderer: &mut Renderer, bounds: Bounds) {
        let natural = self.natural_size();
        let x = bounds.x + self.align.align(bounds.width, natural.width);
        let y = bounds.y + (bounds.height - self.size) / 2.0;
        if self.bold {
            renderer.bold_text(&self.content, x, y, self.size, self.color);
        } else {
            renderer.text(&self.content, x, y, self.size, self.color);
        }
    }
}

/// Create a text label
pub fn text(content: impl Into<String>) -> Text {
    Text::new(content)
}
