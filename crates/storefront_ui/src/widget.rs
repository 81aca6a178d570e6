//! Widget trait

use crate::event::Event;
use crate::layout::{Bounds, Size};
use crate::renderer::Renderer;

/// The core trait every UI element implements.
///
/// Widgets are driven by their owner: `layout` to size them, `draw` to paint
/// them into the bounds the owner chose, and `on_event` to let them react to
/// input inside those same bounds. A widget reports interaction by returning a
/// message rather than calling into application code.
pub trait Widget<M> {
    /// Calculate the size this widget wants given the available space
    fn layout(&mut self, available: Size) -> Size;

    /// Draw the widget to the renderer
    fn draw(&self, renderer: &mut Renderer, bounds: Bounds);

    /// Handle an event, optionally producing a message
    fn on_event(&mut self, event: &Event, bounds: Bounds) -> Option<M> {
        let _ = (event, bounds);
        None
    }

    /// Whether the widget currently shows a popup that should get input first
    fn has_active_overlay(&self) -> bool {
        false
    }

    /// Area the widget claims for input, which may exceed its layout bounds
    /// while a popup is open
    fn capture_bounds(&self, layout_bounds: Bounds) -> Option<Bounds> {
        let _ = layout_bounds;
        None
    }
}
