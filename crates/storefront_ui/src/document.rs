//! Page-wide event hub
//!
//! Widgets that need to observe pointer presses anywhere on the page (to close
//! a popup on an outside click, for instance) register a listener here. The
//! registration is tied to the returned [`Subscription`]: dropping it removes
//! the listener, so a widget that owns its subscription can never leave a
//! dangling listener behind.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type PointerListener = Rc<dyn Fn((f32, f32))>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    pointer_down: Vec<(u64, PointerListener)>,
}

/// Shared handle to the page's global listeners.
///
/// Cloning is cheap; every clone refers to the same registry.
#[derive(Clone, Default)]
pub struct Document {
    registry: Rc<RefCell<Registry>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every pointer-down on the page.
    ///
    /// The listener stays registered for as long as the returned guard lives.
    #[must_use = "dropping the subscription immediately removes the listener"]
    pub fn on_pointer_down<F>(&self, listener: F) -> Subscription
    where
        F: Fn((f32, f32)) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.pointer_down.push((id, Rc::new(listener)));
        log::debug!(
            "Document: pointer-down listener {} added ({} active)",
            id,
            registry.pointer_down.len()
        );

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver a pointer-down at `position` to every registered listener.
    ///
    /// Listeners run in registration order. The list is snapshotted first, so
    /// a listener may add or drop subscriptions while being called.
    pub fn dispatch_pointer_down(&self, position: (f32, f32)) {
        let listeners: Vec<PointerListener> = self
            .registry
            .borrow()
            .pointer_down
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener(position);
        }
    }

    /// Number of live pointer-down listeners
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().pointer_down.len()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Keeps a listener registered; removes it on drop.
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // The document may already be gone; nothing to clean up then.
        if let Some(registry) = self.registry.upgrade() {
            let mut registry = registry.borrow_mut();
            registry.pointer_down.retain(|(id, _)| *id != self.id);
            log::debug!(
                "Document: pointer-down listener {} removed ({} active)",
                self.id,
                registry.pointer_down.len()
            );
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
