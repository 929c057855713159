// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Field values and the store that holds them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The current value of a form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Boolean toggle.
    Bool(bool),
    /// Numeric value set by the host.
    Number(f64),
    /// Single text value (inputs, textareas, selects, radio groups).
    Text(String),
    /// Checked values of a checkbox group, in document order.
    List(Vec<String>),
}

impl FieldValue {
    /// Whether the value carries no input (empty text or empty list).
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Bool(_) | FieldValue::Number(_) => false,
        }
    }

    /// Borrow the text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Borrow the list, if this is a list value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

/// Field values keyed by field name.
pub type FieldStore = BTreeMap<String, FieldValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(FieldValue::default().is_empty());
        assert!(FieldValue::List(vec![]).is_empty());
        assert!(!FieldValue::Bool(false).is_empty());
        assert!(!FieldValue::from("x").is_empty());
    }

    #[test]
    fn test_untagged_json() {
        let values: Vec<FieldValue> =
            serde_json::from_str(r#"["a", ["b", "c"], true, 4.5]"#).unwrap();
        assert_eq!(values[0], FieldValue::from("a"));
        assert_eq!(
            values[1],
            FieldValue::List(vec!["b".to_string(), "c".to_string()])
        );
        assert_eq!(values[2], FieldValue::Bool(true));
        assert_eq!(values[3], FieldValue::Number(4.5));
    }

    #[test]
    fn test_display() {
        let list = FieldValue::List(vec!["red".to_string(), "blue".to_string()]);
        assert_eq!(list.to_string(), "red, blue");
    }
}
