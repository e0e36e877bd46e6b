use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type Callback<T> = Box<dyn FnOnce(&T)>;

enum State<T> {
    Waiting(Vec<Callback<T>>),
    Fired(T),
}

/// A one-shot event.
///
/// Callbacks registered before [`Latch::trigger`] are queued and run once,
/// in registration order, when it fires. Callbacks registered afterwards run
/// immediately with the stored value. Clones share the same state.
///
/// No borrow is held while callbacks run, so a callback may register more
/// callbacks or inspect the latch.
pub struct Latch<T> {
    state: Rc<RefCell<State<T>>>,
}

impl<T: Clone + 'static> Latch<T> {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(State::Waiting(Vec::new()))),
        }
    }

    pub fn is_fired(&self) -> bool {
        matches!(*self.state.borrow(), State::Fired(_))
    }

    /// The value the latch fired with, if it has fired.
    pub fn value(&self) -> Option<T> {
        match &*self.state.borrow() {
            State::Fired(value) => Some(value.clone()),
            State::Waiting(_) => None,
        }
    }

    /// Run `callback` once the latch fires, or right away if it already has.
    pub fn on(&self, callback: impl FnOnce(&T) + 'static) {
        if let Some(value) = self.value() {
            callback(&value);
            return;
        }
        if let State::Waiting(callbacks) = &mut *self.state.borrow_mut() {
            callbacks.push(Box::new(callback));
        }
    }

    /// Fire the latch. Returns `false` if it had already fired, in which
    /// case `value` is discarded and nothing runs.
    pub fn trigger(&self, value: T) -> bool {
        let callbacks = {
            let mut state = self.state.borrow_mut();
            let State::Waiting(callbacks) = &mut *state else {
                return false;
            };
            let callbacks = std::mem::take(callbacks);
            *state = State::Fired(value.clone());
            callbacks
        };

        for callback in callbacks {
            callback(&value);
        }
        true
    }
}

impl<T: Clone + 'static> Default for Latch<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Latch<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T> fmt::Debug for Latch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.state.borrow() {
            State::Waiting(callbacks) => write!(f, "Latch(waiting, {} queued)", callbacks.len()),
            State::Fired(_) => write!(f, "Latch(fired)"),
        }
    }
}
