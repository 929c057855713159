// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The element list supplied by the host, and value extraction from it.

use serde::{Deserialize, Serialize};

use super::value::FieldValue;
use crate::error::{FieldError, FormError, Result};

/// Kind of an input-like element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    #[default]
    Text,
    Number,
    Date,
    Email,
    Tel,
    Password,
    Hidden,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Submit,
    File,
}

impl ElementKind {
    /// Whether elements of this kind never take part in validation.
    pub fn is_excluded(&self) -> bool {
        matches!(self, ElementKind::Submit | ElementKind::File)
    }
}

/// A named input-like element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,

    #[serde(default)]
    pub kind: ElementKind,

    /// Current value (for checkboxes and radios, the value submitted when checked).
    #[serde(default)]
    pub value: String,

    #[serde(default)]
    pub checked: bool,
}

impl Element {
    /// Create an element of the given kind.
    pub fn new(name: impl Into<String>, kind: ElementKind, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
            checked: false,
        }
    }

    /// A text input.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, ElementKind::Text, value)
    }

    /// A checkbox belonging to the group `name`.
    pub fn checkbox(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self::new(name, ElementKind::Checkbox, value).with_checked(checked)
    }

    /// A radio button belonging to the group `name`.
    pub fn radio(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self::new(name, ElementKind::Radio, value).with_checked(checked)
    }

    /// A submit button.
    pub fn submit(name: impl Into<String>) -> Self {
        Self::new(name, ElementKind::Submit, "")
    }

    /// Set the checked state.
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

#[derive(Deserialize)]
struct RawDocument {
    elements: Vec<Element>,
}

/// Elements of one form, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormDocument {
    elements: Vec<Element>,
}

impl FormDocument {
    /// Create a document, rejecting unnamed elements.
    pub fn new(elements: Vec<Element>) -> Result<Self> {
        if let Some(index) = elements.iter().position(|e| e.name.is_empty()) {
            return Err(FormError::Field(FieldError::UnnamedElement { index }));
        }
        Ok(Self { elements })
    }

    /// Parse a document from `{"elements": [...]}` JSON.
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: RawDocument = serde_json::from_str(content).map_err(|e| {
            FormError::Field(FieldError::MalformedDocument {
                message: e.to_string(),
            })
        })?;
        Self::new(raw.elements)
    }

    /// All elements in document order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The first element carrying `name`.
    pub fn element(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.name == name)
    }

    /// Mutable access to the first element carrying `name`.
    pub fn element_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.name == name)
    }

    /// Every element sharing `name`, in document order.
    pub fn group<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements.iter().filter(move |e| e.name == name)
    }

    /// Document position of the first element carrying `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.name == name)
    }

    /// Distinct field names of elements that may take part in validation,
    /// in document order.
    pub fn candidate_fields(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for element in &self.elements {
            if element.kind.is_excluded() || names.contains(&element.name.as_str()) {
                continue;
            }
            names.push(&element.name);
        }
        names
    }

    /// Extract the current value of field `name`.
    pub fn value_of(&self, name: &str) -> Result<FieldValue> {
        let element = self.element(name).ok_or_else(|| {
            FormError::Field(FieldError::UnknownField {
                name: name.to_string(),
            })
        })?;
        Ok(self.extract(element))
    }

    /// Extract the value for the field `element` belongs to.
    ///
    /// Checkbox groups yield the checked values in document order, radio
    /// groups the checked value or `""`; every other kind yields its value.
    pub fn extract(&self, element: &Element) -> FieldValue {
        match element.kind {
            ElementKind::Checkbox => FieldValue::List(
                self.group(&element.name)
                    .filter(|e| e.checked)
                    .map(|e| e.value.clone())
                    .collect(),
            ),
            ElementKind::Radio => FieldValue::Text(
                self.group(&element.name)
                    .find(|e| e.checked)
                    .map(|e| e.value.clone())
                    .unwrap_or_default(),
            ),
            _ => FieldValue::Text(element.value.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> FormDocument {
        FormDocument::new(vec![
            Element::text("email", "a@example.com"),
            Element::checkbox("colors", "red", true),
            Element::checkbox("colors", "green", false),
            Element::checkbox("colors", "blue", true),
            Element::radio("plan", "free", false),
            Element::radio("plan", "pro", false),
            Element::new("bio", ElementKind::Textarea, "hello"),
            Element::new("avatar", ElementKind::File, ""),
            Element::submit("save"),
        ])
        .unwrap()
    }

    #[test]
    fn test_checkbox_group_preserves_order() {
        let doc = document();
        assert_eq!(
            doc.value_of("colors").unwrap(),
            FieldValue::List(vec!["red".to_string(), "blue".to_string()])
        );
    }

    #[test]
    fn test_checkbox_group_none_checked() {
        let doc = FormDocument::new(vec![
            Element::checkbox("tos", "yes", false),
            Element::checkbox("tos", "maybe", false),
        ])
        .unwrap();
        assert_eq!(doc.value_of("tos").unwrap(), FieldValue::List(vec![]));
    }

    #[test]
    fn test_radio_group() {
        let mut doc = document();
        assert_eq!(doc.value_of("plan").unwrap(), FieldValue::from(""));

        doc.elements[5].checked = true;
        assert_eq!(doc.value_of("plan").unwrap(), FieldValue::from("pro"));
    }

    #[test]
    fn test_single_values() {
        let doc = document();
        assert_eq!(doc.value_of("email").unwrap(), FieldValue::from("a@example.com"));
        assert_eq!(doc.value_of("bio").unwrap(), FieldValue::from("hello"));
        assert!(doc.value_of("missing").is_err());
    }

    #[test]
    fn test_candidate_fields_skip_submit_and_file() {
        let doc = document();
        assert_eq!(doc.candidate_fields(), vec!["email", "colors", "plan", "bio"]);
    }

    #[test]
    fn test_unnamed_element_rejected() {
        let err = FormDocument::new(vec![Element::text("a", ""), Element::text("", "")]).unwrap_err();
        assert!(matches!(
            err,
            FormError::Field(FieldError::UnnamedElement { index: 1 })
        ));
    }

    #[test]
    fn test_from_json() {
        let doc = FormDocument::from_json(
            r#"{"elements": [
                {"name": "email", "kind": "email", "value": "x@y.z"},
                {"name": "tos", "kind": "checkbox", "value": "yes", "checked": true}
            ]}"#,
        )
        .unwrap();
        assert_eq!(doc.elements().len(), 2);
        assert_eq!(doc.elements()[0].kind, ElementKind::Email);
        assert_eq!(doc.value_of("tos").unwrap(), FieldValue::List(vec!["yes".to_string()]));
    }
}
