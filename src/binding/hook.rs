// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Hook-style binding: state snapshots the host reads after each event.

use super::Binding;
use crate::field::FieldStore;
use crate::form::ErrorMap;

/// Snapshot state for hook-style hosts.
#[derive(Debug, Clone, Default)]
pub struct HookBinding {
    fields: FieldStore,
    errors: ErrorMap,
    is_valid_form: bool,
    focused: Option<String>,
    submissions: usize,
}

impl HookBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &FieldStore {
        &self.fields
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Whether the last submit attempt passed.
    pub fn is_valid_form(&self) -> bool {
        self.is_valid_form
    }

    /// Field most recently asked to take focus.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Number of passing submit attempts.
    pub fn submissions(&self) -> usize {
        self.submissions
    }
}

impl Binding for HookBinding {
    fn fields_changed(&mut self, fields: &FieldStore) {
        self.fields = fields.clone();
    }

    fn errors_changed(&mut self, errors: &ErrorMap) {
        self.errors = errors.clone();
    }

    fn focus(&mut self, field: &str) {
        self.focused = Some(field.to_string());
    }

    fn submitted(&mut self, fields: &FieldStore) {
        self.fields = fields.clone();
        self.is_valid_form = true;
        self.submissions += 1;
    }

    fn submit_rejected(&mut self, errors: &ErrorMap) {
        self.errors = errors.clone();
        self.is_valid_form = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_tracks_last_submit() {
        let mut binding = HookBinding::new();
        assert!(!binding.is_valid_form());

        binding.submitted(&FieldStore::new());
        assert!(binding.is_valid_form());
        assert_eq!(binding.submissions(), 1);

        let mut errors = ErrorMap::new();
        errors.set("email", "bad");
        binding.submit_rejected(&errors);
        assert!(!binding.is_valid_form());
        assert_eq!(binding.errors().message("email"), Some("bad"));
    }
}
