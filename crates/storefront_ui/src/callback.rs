//! Callback abstraction for widget event handlers
//!
//! Widgets never call back into application code directly. A callback turns an
//! event payload into the application's message type, and the widget hands that
//! message back from `on_event`. Instead of spelling out
//! `Option<Box<dyn Fn(T) -> M>>` in every widget, use `Callback<T, M>`.
//!
//! ```
//! use storefront_ui::Callback;
//!
//! #[derive(Debug, PartialEq)]
//! enum Message {
//!     Picked(usize),
//! }
//!
//! let on_pick: Callback<usize, Message> = Callback::new(Message::Picked);
//! assert_eq!(on_pick.call(3), Some(Message::Picked(3)));
//!
//! let unset: Callback<usize, Message> = Callback::none();
//! assert_eq!(unset.call(3), None);
//! ```

use std::fmt;

/// An optional event handler producing a message of type `M` from a value of type `T`.
pub struct Callback<T, M> {
    f: Option<Box<dyn Fn(T) -> M>>,
}

impl<T, M> Callback<T, M> {
    /// Create a callback from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> M + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty callback (no handler).
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Call the callback with a value.
    ///
    /// Returns `None` when no handler is registered.
    pub fn call(&self, value: T) -> Option<M> {
        self.f.as_ref().map(|f| f(value))
    }

    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }

    pub fn is_none(&self) -> bool {
        self.f.is_none()
    }
}

impl<T, M> Default for Callback<T, M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T, M> fmt::Debug for Callback<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}

/// A callback that takes no parameters (button clicks, submits).
pub type Callback0<M> = Callback<(), M>;

impl<M> Callback0<M> {
    /// Call the callback without a payload.
    pub fn emit(&self) -> Option<M> {
        self.call(())
    }
}
