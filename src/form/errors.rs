// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The error map mirrored into host state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::validator::Verdict;

/// Current failure of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub present: bool,
    pub message: String,
}

impl ErrorEntry {
    fn new(message: impl Into<String>) -> Self {
        Self {
            present: true,
            message: message.into(),
        }
    }
}

/// Field name → current failure. A passing field has no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap {
    entries: BTreeMap<String, ErrorEntry>,
}

impl ErrorMap {
    /// Create an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The entry for `field`.
    pub fn get(&self, field: &str) -> Option<&ErrorEntry> {
        self.entries.get(field)
    }

    /// The message for `field`.
    pub fn message(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(|entry| entry.message.as_str())
    }

    /// Whether `field` currently fails.
    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in field name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ErrorEntry)> {
        self.entries.iter().map(|(field, entry)| (field.as_str(), entry))
    }

    /// Messages only, for hosts that keep the plain variant.
    pub fn messages(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(field, entry)| (field.clone(), entry.message.clone()))
            .collect()
    }

    /// Record a failure, replacing any earlier one.
    pub fn set(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.entries.insert(field.into(), ErrorEntry::new(message));
    }

    /// Remove the entry for `field`. Returns whether one existed.
    pub fn clear(&mut self, field: &str) -> bool {
        self.entries.remove(field).is_some()
    }

    /// Apply a verdict to `fields`: each field the verdict reports gets its
    /// first message, every other field is cleared. Fields outside `fields`
    /// are never touched.
    pub(crate) fn reconcile<'a>(&mut self, fields: impl IntoIterator<Item = &'a str>, verdict: &Verdict) {
        for field in fields {
            match verdict.first_message_for(field) {
                Some(message) => self.set(field, message),
                None => {
                    self.clear(field);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_sets_first_message_and_clears_others() {
        let mut errors = ErrorMap::new();
        errors.set("password", "old");
        errors.set("name", "untouched");

        let verdict = Verdict::pass()
            .with_failure("password_confirmation", "The confirmation does not match.")
            .with_failure("password_confirmation", "second");

        errors.reconcile(["password_confirmation", "password"], &verdict);

        assert_eq!(
            errors.message("password_confirmation"),
            Some("The confirmation does not match.")
        );
        assert!(!errors.contains("password"));
        assert_eq!(errors.message("name"), Some("untouched"));
    }

    #[test]
    fn test_passing_verdict_clears_request_fields() {
        let mut errors = ErrorMap::new();
        errors.set("email", "bad");
        errors.reconcile(["email"], &Verdict::pass());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut errors = ErrorMap::new();
        errors.set("email", "bad");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["email"]["present"], true);
        assert_eq!(json["email"]["message"], "bad");
    }
}
