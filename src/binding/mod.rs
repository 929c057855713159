// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Host binding adapters.
//!
//! A form drives one [`Binding`], which carries its state into whatever UI
//! model the host uses: callback props, hook-style state snapshots, or an
//! event emitter with subscribers.

mod callback;
mod event;
mod hook;

pub use callback::CallbackBinding;
pub use event::{EventBinding, FormEvent, SubscriptionId};
pub use hook::HookBinding;

use crate::field::FieldStore;
use crate::form::ErrorMap;

/// Receives state changes from a form.
///
/// Every method has a no-op default so adapters implement only what their
/// host needs.
pub trait Binding {
    /// Field values changed.
    fn fields_changed(&mut self, _fields: &FieldStore) {}

    /// The error map changed.
    fn errors_changed(&mut self, _errors: &ErrorMap) {}

    /// Move focus to `field`.
    fn focus(&mut self, _field: &str) {}

    /// A submit attempt passed every rule.
    fn submitted(&mut self, _fields: &FieldStore) {}

    /// A submit attempt failed.
    fn submit_rejected(&mut self, _errors: &ErrorMap) {}
}

/// Headless forms with nothing to notify.
impl Binding for () {}

impl<B: Binding + ?Sized> Binding for Box<B> {
    fn fields_changed(&mut self, fields: &FieldStore) {
        (**self).fields_changed(fields)
    }

    fn errors_changed(&mut self, errors: &ErrorMap) {
        (**self).errors_changed(errors)
    }

    fn focus(&mut self, field: &str) {
        (**self).focus(field)
    }

    fn submitted(&mut self, fields: &FieldStore) {
        (**self).submitted(fields)
    }

    fn submit_rejected(&mut self, errors: &ErrorMap) {
        (**self).submit_rejected(errors)
    }
}
