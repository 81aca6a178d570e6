//! storefront_ui - a small retained-mode widget toolkit for storefront pages
//!
//! Widgets implement [`Widget`], report interaction by returning messages built
//! from [`Callback`]s, and paint into a recording [`Renderer`]. Page-wide
//! listeners (outside-click detection) go through a shared [`Document`].

#[macro_use]
mod macros;

mod callback;
pub mod constants;
mod document;
mod event;
mod layout;
mod renderer;
mod state;
mod transition;
mod widget;
pub mod widgets;

pub use callback::{Callback, Callback0};
pub use document::{Document, Subscription};
pub use event::{Event, KeyCode, KeyModifiers, MouseButton};
pub use layout::{Alignment, Bounds, Length, Padding, Size};
pub use renderer::{Color, DrawCommand, Icon, Renderer};
pub use state::TextInputState;
pub use transition::RevealTransition;
pub use widget::Widget;

pub use widgets::{button, text, text_input, Button, ButtonStyle, OverlayCloseHelper, Text, TextInput};
