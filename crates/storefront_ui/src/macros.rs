//! Macros for reducing boilerplate in widget builders.

/// Generates a builder-style setter for a field.
///
/// ```ignore
/// builder_field!(disabled, bool);
/// // pub fn disabled(mut self, value: bool) -> Self { self.disabled = value; self }
///
/// builder_field!(searchable, is_searchable, bool);
/// // pub fn searchable(mut self, value: bool) -> Self { self.is_searchable = value; self }
/// ```
#[macro_export]
macro_rules! builder_field {
    ($name:ident, $type:ty) => {
        pub fn $name(mut self, value: $type) -> Self {
            self.$name = value;
            self
        }
    };
    ($method:ident, $field:ident, $type:ty) => {
        pub fn $method(mut self, value: $type) -> Self {
            self.$field = value;
            self
        }
    };
}

/// Generates a setter that wraps a closure in a [`Callback`](crate::Callback).
///
/// The enclosing type must name its message type parameter `M`.
///
/// ```ignore
/// callback_setter!(on_submit);
/// // pub fn on_submit<F: Fn() -> M + 'static>(mut self, f: F) -> Self
///
/// callback_setter!(on_change, String);
/// // pub fn on_change<F: Fn(String) -> M + 'static>(mut self, f: F) -> Self
/// ```
#[macro_export]
macro_rules! callback_setter {
    ($name:ident) => {
        pub fn $name<F>(mut self, f: F) -> Self
        where
            F: Fn() -> M + 'static,
        {
            self.$name = $crate::Callback::new(move |()| f());
            self
        }
    };
    ($name:ident, $param:ty) => {
        pub fn $name<F>(mut self, f: F) -> Self
        where
            F: Fn($param) -> M + 'static,
        {
            self.$name = $crate::Callback::new(f);
            self
        }
    };
}
