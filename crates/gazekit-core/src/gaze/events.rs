//! Listener registry for gaze transitions

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use super::Gazeable;

/// Token returned by the `on_*` methods of [`Gazeable`]; pass it to
/// [`Gazeable::unsubscribe`] to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

#[derive(Clone)]
pub(crate) enum Listener {
    Changed(Rc<dyn Fn(&Gazeable, bool)>),
    Start(Rc<dyn Fn(&Gazeable)>),
    End(Rc<dyn Fn(&Gazeable)>),
    StartPlain(Rc<dyn Fn()>),
    EndPlain(Rc<dyn Fn()>),
}

#[derive(Default)]
pub(crate) struct Listeners {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(Subscription, Listener)>>,
}

impl Listeners {
    pub(crate) fn add(&self, listener: Listener) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let subscription = Subscription(id);
        self.entries.borrow_mut().push((subscription, listener));
        subscription
    }

    pub(crate) fn remove(&self, subscription: Subscription) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(id, _)| *id != subscription);
        entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Run every listener interested in a transition to `gazed`.
    ///
    /// Works on a snapshot so listeners can (un)subscribe or drive the
    /// aggregate re-entrantly.
    pub(crate) fn dispatch(&self, gazeable: &Gazeable, gazed: bool) {
        let snapshot: Vec<Listener> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in &snapshot {
            if let Listener::Changed(f) = listener {
                f(gazeable, gazed);
            }
        }
        for listener in &snapshot {
            match (listener, gazed) {
                (Listener::StartPlain(f), true) | (Listener::EndPlain(f), false) => f(),
                _ => {}
            }
        }
        for listener in &snapshot {
            match (listener, gazed) {
                (Listener::Start(f), true) | (Listener::End(f), false) => f(gazeable),
                _ => {}
            }
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.len())
            .finish()
    }
}
