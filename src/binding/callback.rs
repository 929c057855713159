// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Callback-props binding: the host hands over a submit callback and an
//! optional focus callback, and the binding keeps the component state.

use super::Binding;
use crate::field::FieldStore;
use crate::form::ErrorMap;

type SubmitCallback = Box<dyn FnMut(&FieldStore)>;
type FocusCallback = Box<dyn FnMut(&str)>;

/// Binding for component-style hosts.
pub struct CallbackBinding {
    on_submit: SubmitCallback,
    on_focus: Option<FocusCallback>,
    fields: FieldStore,
    input_errors: ErrorMap,
    is_own_update: bool,
}

impl CallbackBinding {
    /// Create a binding invoking `on_submit` after a passing submit.
    pub fn new<F>(on_submit: F) -> Self
    where
        F: FnMut(&FieldStore) + 'static,
    {
        Self {
            on_submit: Box::new(on_submit),
            on_focus: None,
            fields: FieldStore::new(),
            input_errors: ErrorMap::new(),
            is_own_update: false,
        }
    }

    /// Invoke `on_focus` when the form wants to focus a field.
    pub fn on_focus<F>(mut self, on_focus: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        self.on_focus = Some(Box::new(on_focus));
        self
    }

    /// Field values as last mirrored.
    pub fn fields(&self) -> &FieldStore {
        &self.fields
    }

    /// Errors as last mirrored.
    pub fn input_errors(&self) -> &ErrorMap {
        &self.input_errors
    }

    /// Whether the last field update came from the form itself.
    pub fn is_own_update(&self) -> bool {
        self.is_own_update
    }
}

impl std::fmt::Debug for CallbackBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackBinding")
            .field("fields", &self.fields)
            .field("input_errors", &self.input_errors)
            .field("is_own_update", &self.is_own_update)
            .finish_non_exhaustive()
    }
}

impl Binding for CallbackBinding {
    fn fields_changed(&mut self, fields: &FieldStore) {
        self.fields = fields.clone();
        self.is_own_update = true;
    }

    fn errors_changed(&mut self, errors: &ErrorMap) {
        self.input_errors = errors.clone();
    }

    fn focus(&mut self, field: &str) {
        if let Some(on_focus) = self.on_focus.as_mut() {
            on_focus(field);
        }
    }

    fn submitted(&mut self, fields: &FieldStore) {
        (self.on_submit)(fields);
    }
}
