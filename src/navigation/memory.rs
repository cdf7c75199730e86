//! In-memory history for tests and non-browser hosts.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{Detach, NavigationHost};
use crate::models::Address;

type Listeners = Rc<RefCell<Vec<(u64, Rc<dyn Fn()>)>>>;

/// A session history stack driven programmatically.
///
/// Every operation updates the current entry first and then notifies
/// installed listeners, matching how a patched browser history behaves.
pub struct MemoryHistory {
    entries: RefCell<Vec<Address>>,
    cursor: Cell<usize>,
    listeners: Listeners,
    next_id: Cell<u64>,
}

impl MemoryHistory {
    pub fn new(initial: &str) -> Self {
        Self {
            entries: RefCell::new(vec![Address::parse(initial)]),
            cursor: Cell::new(0),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_id: Cell::new(0),
        }
    }

    /// Add an entry after the current one, dropping any forward entries.
    pub fn push_state(&self, url: &str) {
        {
            let mut entries = self.entries.borrow_mut();
            let cursor = self.cursor.get();
            entries.truncate(cursor + 1);
            entries.push(Address::parse(url));
            self.cursor.set(cursor + 1);
        }
        self.notify();
    }

    /// Overwrite the current entry.
    pub fn replace_state(&self, url: &str) {
        {
            let mut entries = self.entries.borrow_mut();
            entries[self.cursor.get()] = Address::parse(url);
        }
        self.notify();
    }

    /// Move one entry back. Returns `false` at the start of history.
    pub fn back(&self) -> bool {
        let cursor = self.cursor.get();
        if cursor == 0 {
            return false;
        }
        self.cursor.set(cursor - 1);
        self.notify();
        true
    }

    /// Move one entry forward. Returns `false` at the end of history.
    pub fn forward(&self) -> bool {
        let cursor = self.cursor.get();
        if cursor + 1 >= self.entries.borrow().len() {
            return false;
        }
        self.cursor.set(cursor + 1);
        self.notify();
        true
    }

    /// Number of installed listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn notify(&self) {
        // Snapshot so listeners may navigate or detach re-entrantly
        let listeners: Vec<Rc<dyn Fn()>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

impl NavigationHost for MemoryHistory {
    fn current(&self) -> Address {
        self.entries.borrow()[self.cursor.get()].clone()
    }

    fn install(&self, notify: Rc<dyn Fn()>) -> Detach {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, notify));

        let listeners = Rc::clone(&self.listeners);
        Detach::new(move || listeners.borrow_mut().retain(|(other, _)| *other != id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_truncates_forward_entries() {
        let history = MemoryHistory::new("/a");
        history.push_state("/b");
        history.push_state("/c");
        assert!(history.back());
        assert!(history.back());
        assert!(!history.back());
        history.push_state("/d");

        assert_eq!(history.current(), Address::parse("/d"));
        assert!(!history.forward());
        assert!(history.back());
        assert_eq!(history.current(), Address::parse("/a"));
    }

    #[test]
    fn test_listeners_run_after_update() {
        let history = Rc::new(MemoryHistory::new("/a"));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let observer = Rc::downgrade(&history);
        let sink = Rc::clone(&seen);
        let detach = history.install(Rc::new(move || {
            if let Some(history) = observer.upgrade() {
                sink.borrow_mut().push(history.current().to_string());
            }
        }));

        history.push_state("/b");
        history.replace_state("/c");
        detach.run();
        history.push_state("/d");

        assert_eq!(*seen.borrow(), vec!["/b", "/c"]);
    }
}
