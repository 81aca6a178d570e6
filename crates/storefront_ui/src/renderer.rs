//! Display-list renderer
//!
//! Widgets draw through high-level primitives (rectangles, text runs, icons).
//! The renderer records them as [`DrawCommand`]s; a backend (or a test) then
//! walks the finished list. Overlay content such as dropdown popups is recorded
//! into a separate layer that always ends up after the base layer.

use crate::layout::Bounds;

/// RGBA color with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Primary text on light surfaces
    pub const TEXT_DARK: Self = Self::rgb8(0x1f, 0x1f, 0x1f);
    /// Default control text (gray-700)
    pub const TEXT_PRIMARY: Self = Self::rgb8(0x37, 0x41, 0x51);
    /// Muted text, placeholders (gray-400)
    pub const TEXT_MUTED: Self = Self::rgb8(0x9c, 0xa3, 0xaf);

    /// Control surface
    pub const INPUT_BG: Self = Self::rgb8(0xf9, 0xf9, 0xf9);
    /// Control surface on hover (gray-50)
    pub const INPUT_HOVER: Self = Self::rgb8(0xf9, 0xfa, 0xfb);
    /// Popup list item hover (gray-100)
    pub const ITEM_HOVER: Self = Self::rgb8(0xf3, 0xf4, 0xf6);

    /// Control border
    pub const BORDER: Self = Self::rgb8(0xdd, 0xdd, 0xdd);
    /// Row separators (gray-300)
    pub const BORDER_LIGHT: Self = Self::rgb8(0xd1, 0xd5, 0xdb);
    /// Border of a focused input
    pub const BORDER_FOCUSED: Self = Self::rgb8(0x6b, 0x72, 0x80);

    /// Primary action background
    pub const PRIMARY: Self = Self::rgb8(0x1f, 0x1f, 0x1f);
    /// Primary action background on hover
    pub const PRIMARY_HOVER: Self = Self::rgb8(0x3a, 0x3a, 0x3a);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Color from 8-bit channels
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Same color with its alpha multiplied by `factor`
    pub fn faded(self, factor: f32) -> Self {
        Self {
            a: self.a * factor.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// Built-in vector icons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    ChevronDown,
    ArrowRight,
}

/// A recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        bounds: Bounds,
        color: Color,
    },
    StrokeRect {
        bounds: Bounds,
        color: Color,
        width: f32,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Color,
        width: f32,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
        bold: bool,
    },
    Icon {
        icon: Icon,
        bounds: Bounds,
        color: Color,
    },
    PushClip {
        bounds: Bounds,
    },
    PopClip,
}

/// Records draw commands for one frame
#[derive(Debug, Clone)]
pub struct Renderer {
    width: f32,
    height: f32,
    base: Vec<DrawCommand>,
    overlay: Vec<DrawCommand>,
    overlay_depth: usize,
}

impl Renderer {
    /// Create a renderer for a viewport of the given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            base: Vec::new(),
            overlay: Vec::new(),
            overlay_depth: 0,
        }
    }

    /// The whole drawing area
    pub fn viewport(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width, self.height)
    }

    /// Drop everything recorded so far
    pub fn clear(&mut self) {
        self.base.clear();
        self.overlay.clear();
        self.overlay_depth = 0;
    }

    fn push(&mut self, command: DrawCommand) {
        if self.overlay_depth > 0 {
            self.overlay.push(command);
        } else {
            self.base.push(command);
        }
    }

    /// Route subsequent commands into the overlay layer
    pub fn begin_overlay(&mut self) {
        self.overlay_depth += 1;
    }

    pub fn end_overlay(&mut self) {
        if self.overlay_depth == 0 {
            log::warn!("Renderer: end_overlay without matching begin_overlay");
            return;
        }
        self.overlay_depth -= 1;
    }

    pub fn fill_rect(&mut self, bounds: Bounds, color: Color) {
        self.push(DrawCommand::FillRect { bounds, color });
    }

    pub fn stroke_rect(&mut self, bounds: Bounds, color: Color, width: f32) {
        self.push(DrawCommand::StrokeRect {
            bounds,
            color,
            width,
        });
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Color, width: f32) {
        self.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    pub fn text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        self.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            size,
            color,
            bold: false,
        });
    }

    pub fn bold_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        self.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            size,
            color,
            bold: true,
        });
    }

    pub fn icon(&mut self, icon: Icon, bounds: Bounds, color: Color) {
        self.push(DrawCommand::Icon {
            icon,
            bounds,
            color,
        });
    }

    pub fn push_clip(&mut self, bounds: Bounds) {
        self.push(DrawCommand::PushClip { bounds });
    }

    pub fn pop_clip(&mut self) {
        self.push(DrawCommand::PopClip);
    }

    /// All commands in paint order: base layer first, then overlays
    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.base.iter().chain(self.overlay.iter())
    }

    /// Text runs in paint order
    pub fn texts(&self) -> Vec<&str> {
        self.commands()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Text runs that were recorded into the overlay layer
    pub fn overlay_texts(&self) -> Vec<&str> {
        self.overlay
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Find the first text command with exactly this content
    pub fn find_text(&self, needle: &str) -> Option<&DrawCommand> {
        self.commands()
            .find(|command| matches!(command, DrawCommand::Text { text, .. } if text == needle))
    }
}
