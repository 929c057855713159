// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Request and verdict types exchanged with the validation capability.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::field::FieldValue;

/// One validation call: the data subset, its rules, and display names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRequest {
    /// Values of every field in the request, companions included.
    pub data: BTreeMap<String, FieldValue>,

    /// Rule expression per validated field.
    pub rules: BTreeMap<String, String>,

    /// Display names for fields that have one.
    #[serde(default)]
    pub attribute_names: BTreeMap<String, String>,

    /// Locale for messages.
    pub locale: String,

    /// Message overrides for `locale`, keyed by rule name.
    #[serde(default)]
    pub messages: HashMap<String, String>,

    /// Whether the capability should run its asynchronous rules.
    #[serde(rename = "async", default)]
    pub is_async: bool,
}

impl ValidationRequest {
    /// Names of every field present in `data`.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }
}

/// The capability's answer: failure messages per field, in reported order.
///
/// An empty verdict means every rule passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl Verdict {
    /// A passing verdict.
    pub fn pass() -> Self {
        Self::default()
    }

    /// Record a failure message for `field`.
    pub fn with_failure(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
        self
    }

    /// Whether any field reported a message.
    pub fn failed(&self) -> bool {
        self.errors.values().any(|messages| !messages.is_empty())
    }

    /// The first message reported for `field`.
    pub fn first_message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// Fields with at least one message, with their first message.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().filter_map(|(field, messages)| {
            messages
                .first()
                .map(|message| (field.as_str(), message.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_first_message() {
        let verdict = Verdict::pass()
            .with_failure("password", "The password field is required.")
            .with_failure("password", "The password must be at least 8 characters.");

        assert!(verdict.failed());
        assert_eq!(
            verdict.first_message_for("password"),
            Some("The password field is required.")
        );
        assert_eq!(verdict.first_message_for("email"), None);
    }

    #[test]
    fn test_verdict_empty_message_list_passes() {
        let verdict: Verdict = serde_json::from_str(r#"{"errors": {"email": []}}"#).unwrap();
        assert!(!verdict.failed());
        assert_eq!(verdict.failures().count(), 0);
    }

    #[test]
    fn test_request_wire_format() {
        let mut data = BTreeMap::new();
        data.insert("email".to_string(), FieldValue::from("x"));
        let mut rules = BTreeMap::new();
        rules.insert("email".to_string(), "email".to_string());

        let request = ValidationRequest {
            data,
            rules,
            attribute_names: BTreeMap::new(),
            locale: "en".to_string(),
            messages: HashMap::new(),
            is_async: true,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["data"]["email"], "x");
        assert_eq!(json["rules"]["email"], "email");
        assert_eq!(json["async"], true);
    }
}
