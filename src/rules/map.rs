// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule map and per-field rule resolution.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Field name → rule expression.
///
/// Expressions are opaque here; only the validation capability parses them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleMap {
    rules: HashMap<String, String>,
}

/// Outcome of looking up one field's rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRule {
    pub field: String,
    pub expression: String,
    /// No rule was configured; `expression` is empty and always passes.
    pub missing: bool,
}

impl RuleMap {
    /// Create an empty rule map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rule for `field`.
    pub fn with_rule(mut self, field: impl Into<String>, expression: impl Into<String>) -> Self {
        self.rules.insert(field.into(), expression.into());
        self
    }

    /// The rule for `field`, if configured.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.rules.get(field).map(String::as_str)
    }

    /// Number of configured rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are configured.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve the rule for `field`, substituting an always-pass rule when
    /// none is configured.
    pub fn resolve(&self, field: &str) -> ResolvedRule {
        match self.rules.get(field).filter(|rule| !rule.is_empty()) {
            Some(expression) => ResolvedRule {
                field: field.to_string(),
                expression: expression.clone(),
                missing: false,
            },
            None => {
                tracing::warn!("Rule is not defined for {}", field);
                ResolvedRule {
                    field: field.to_string(),
                    expression: String::new(),
                    missing: true,
                }
            }
        }
    }
}

impl From<HashMap<String, String>> for RuleMap {
    fn from(rules: HashMap<String, String>) -> Self {
        Self { rules }
    }
}

impl<K, V> FromIterator<(K, V)> for RuleMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            rules: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_configured_rule() {
        let rules = RuleMap::new().with_rule("email", "required|email");
        let resolved = rules.resolve("email");
        assert_eq!(resolved.expression, "required|email");
        assert!(!resolved.missing);
    }

    #[test]
    fn test_resolve_missing_rule() {
        let rules = RuleMap::new();
        let resolved = rules.resolve("nickname");
        assert!(resolved.missing);
        assert!(resolved.expression.is_empty());
    }

    #[test]
    fn test_from_iter() {
        let rules: RuleMap = [("a", "required"), ("b", "email")].into_iter().collect();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.get("b"), Some("email"));
    }
}
