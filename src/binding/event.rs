// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Event-emitter binding with any number of subscribers.

use super::Binding;
use crate::field::FieldStore;
use crate::form::ErrorMap;

/// State change broadcast to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    FieldsChanged(FieldStore),
    ErrorsChanged(ErrorMap),
    Focus(String),
    Submitted(FieldStore),
    SubmitRejected(ErrorMap),
}

/// Handle returned by [`EventBinding::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&FormEvent)>;

/// Binding that broadcasts every change as a [`FormEvent`].
#[derive(Default)]
pub struct EventBinding {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl EventBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Listeners run in subscription order.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&FormEvent) + 'static,
    {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn emit(&mut self, event: FormEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

impl std::fmt::Debug for EventBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBinding")
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}

impl Binding for EventBinding {
    fn fields_changed(&mut self, fields: &FieldStore) {
        self.emit(FormEvent::FieldsChanged(fields.clone()));
    }

    fn errors_changed(&mut self, errors: &ErrorMap) {
        self.emit(FormEvent::ErrorsChanged(errors.clone()));
    }

    fn focus(&mut self, field: &str) {
        self.emit(FormEvent::Focus(field.to_string()));
    }

    fn submitted(&mut self, fields: &FieldStore) {
        self.emit(FormEvent::Submitted(fields.clone()));
    }

    fn submit_rejected(&mut self, errors: &ErrorMap) {
        self.emit(FormEvent::SubmitRejected(errors.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_broadcast_and_unsubscribe() {
        let seen_a = Rc::new(RefCell::new(Vec::new()));
        let seen_b = Rc::new(RefCell::new(Vec::new()));

        let mut binding = EventBinding::new();
        let sink_a = seen_a.clone();
        let a = binding.subscribe(move |event: &FormEvent| sink_a.borrow_mut().push(event.clone()));
        let sink_b = seen_b.clone();
        binding.subscribe(move |event: &FormEvent| sink_b.borrow_mut().push(event.clone()));

        binding.focus("email");
        assert!(binding.unsubscribe(a));
        assert!(!binding.unsubscribe(a));
        binding.focus("name");

        assert_eq!(seen_a.borrow().as_slice(), [FormEvent::Focus("email".to_string())]);
        assert_eq!(seen_b.borrow().len(), 2);
        assert_eq!(binding.subscriber_count(), 1);
    }
}
