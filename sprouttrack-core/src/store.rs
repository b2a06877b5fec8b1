//! Explicit state container.
//!
//! All mutation goes through [`Store::update`], which notifies every
//! subscriber with the new state afterwards. The CLI subscribes a
//! persistence listener so each mutation is written through to disk.

use crate::models::Document;

type Listener = Box<dyn Fn(&Document)>;

pub struct Store {
    state: Document,
    listeners: Vec<Listener>,
}

impl Store {
    pub fn new(state: Document) -> Self {
        Self {
            state,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &Document {
        &self.state
    }

    /// Registers a listener invoked after every mutation.
    pub fn subscribe(&mut self, listener: impl Fn(&Document) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Applies a mutation to the document and notifies subscribers.
    pub fn update<R>(&mut self, mutate: impl FnOnce(&mut Document) -> R) -> R {
        let out = mutate(&mut self.state);
        self.notify();
        out
    }

    /// Swaps in a whole new document (import path) and notifies.
    pub fn replace(&mut self, next: Document) {
        self.state = next;
        self.notify();
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Child, Units};
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_update_mutates_and_returns() {
        let mut store = Store::new(Document::default());
        let count = store.update(|doc| {
            doc.upsert_child(Child::new(
                "Avery",
                NaiveDate::from_ymd_opt(2024, 8, 23).unwrap(),
            ));
            doc.children.len()
        });
        assert_eq!(count, 1);
        assert_eq!(store.state().children.len(), 1);
    }

    #[test]
    fn test_subscribers_see_every_mutation() {
        let seen: Rc<RefCell<Vec<Units>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut store = Store::new(Document::default());
        store.subscribe(move |doc| sink.borrow_mut().push(doc.units));

        store.update(|doc| doc.set_units(Units::Imperial));
        store.update(|doc| doc.set_units(Units::Metric));

        assert_eq!(*seen.borrow(), vec![Units::Imperial, Units::Metric]);
    }

    #[test]
    fn test_replace_notifies() {
        let seen = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&seen);

        let mut store = Store::new(Document::default());
        store.subscribe(move |doc| *sink.borrow_mut() = doc.children.len());

        store.replace(Document::demo(NaiveDate::from_ymd_opt(2025, 8, 23).unwrap()));
        assert_eq!(*seen.borrow(), 1);
        assert_eq!(store.state().children.len(), 1);
    }
}
