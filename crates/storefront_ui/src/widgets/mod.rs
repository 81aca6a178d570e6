// Widget implementations

mod button;
mod overlay;
mod text;
mod text_input;
pub(crate) mod text_core;

pub use button::{button, Button, ButtonStyle};
pub use overlay::OverlayCloseHelper;
pub use text::{text, Text};
pub use text_input::{text_input, TextInput, TextInputConfig};
