//! Geometry and sizing primitives shared by all widgets

/// A rectangle in screen space (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// Zero-sized bounds at the origin
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounds at `(x, y)` with the given size
    pub fn from_size(x: f32, y: f32, size: Size) -> Self {
        Self::new(x, y, size.width, size.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check whether a point lies inside (edges on the left/top are inclusive)
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink by padding on every side, never going negative
    pub fn shrink(&self, padding: Padding) -> Self {
        Self {
            x: self.x + padding.left,
            y: self.y + padding.top,
            width: (self.width - padding.horizontal()).max(0.0),
            height: (self.height - padding.vertical()).max(0.0),
        }
    }

    /// Smallest bounds containing both rectangles
    pub fn union(&self, other: &Bounds) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    /// Copy with a different height, keeping the top edge
    pub fn with_height(&self, height: f32) -> Self {
        Self { height, ..*self }
    }
}

/// A width/height pair
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Space around the content of a widget
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// Same padding on all sides
    pub const fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Vertical and horizontal padding
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl From<f32> for Padding {
    fn from(value: f32) -> Self {
        Self::all(value)
    }
}

impl From<(f32, f32)> for Padding {
    fn from((vertical, horizontal): (f32, f32)) -> Self {
        Self::symmetric(vertical, horizontal)
    }
}

/// How a widget dimension is resolved against the available space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Length {
    /// Use the content's natural size
    #[default]
    Shrink,
    /// Take all available space
    Fill,
    /// Exact size in pixels
    Fixed(f32),
}

impl Length {
    /// Resolve to a concrete size, given the available space and the content size
    pub fn resolve(&self, available: f32, content: f32) -> f32 {
        match self {
            Length::Shrink => content,
            Length::Fill => {
                if available.is_finite() {
                    available.max(0.0)
                } else {
                    content
                }
            }
            Length::Fixed(value) => *value,
        }
    }
}

impl From<f32> for Length {
    fn from(value: f32) -> Self {
        Length::Fixed(value)
    }
}

/// Horizontal alignment of content inside a wider area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

impl Alignment {
    /// Offset of content of width `content` inside an area of width `available`
    pub fn align(&self, available: f32, content: f32) -> f32 {
        let free = (available - content).max(0.0);
        match self {
            Alignment::Start => 0.0,
            Alignment::Center => free / 2.0,
            Alignment::End => free,
        }
    }
}
