// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from formcheck.toml.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{ConfigError, FormError, Result};
use crate::rules::{Pairing, RuleMap};

/// The main configuration structure for formcheck.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FormConfig {
    /// Form-wide settings.
    pub form: FormSettings,

    /// Rule expression per field name.
    pub rules: HashMap<String, String>,

    /// Per-field options, resolved once at setup.
    pub fields: HashMap<String, FieldOptions>,

    /// External validation capability.
    pub validator: ValidatorConfig,
}

impl FormConfig {
    /// Load configuration from the default locations.
    pub fn load() -> Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        super::loader::load_config_from(path)
    }

    /// Build the rule map from the `[rules]` table.
    pub fn rule_map(&self) -> RuleMap {
        RuleMap::from(self.rules.clone())
    }

    /// Compile the confirmation pattern.
    pub fn pairing(&self) -> Result<Pairing> {
        Pairing::new(&self.form.confirmation_pattern)
    }

    /// Compile the ignore globs.
    pub fn ignore_patterns(&self) -> Result<Vec<glob::Pattern>> {
        self.form
            .ignore
            .iter()
            .map(|pattern| {
                glob::Pattern::new(pattern).map_err(|e| {
                    FormError::Config(ConfigError::InvalidValue {
                        key: "form.ignore".to_string(),
                        message: format!("'{}': {}", pattern, e),
                    })
                })
            })
            .collect()
    }
}

/// Form-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
    /// Locale applied process-wide when the form is built. Unset keeps
    /// the current one.
    pub locale: Option<String>,

    /// Regex recognising confirmation fields. Must capture `base`.
    pub confirmation_pattern: String,

    /// Glob patterns of field names excluded from validation.
    pub ignore: Vec<String>,

    /// How long `settle` waits for outstanding async replies.
    pub settle_timeout_ms: u64,
}

impl FormSettings {
    /// Settle timeout as a duration.
    pub fn settle_timeout(&self) -> Duration {
        Duration::from_millis(self.settle_timeout_ms)
    }
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            locale: None,
            confirmation_pattern: crate::rules::DEFAULT_CONFIRMATION_PATTERN.to_string(),
            ignore: Vec::new(),
            settle_timeout_ms: 5000,
        }
    }
}

/// Per-field options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FieldOptions {
    /// Display name used in messages instead of the field name.
    pub attribute_name: Option<String>,

    /// Whether the field is validated asynchronously.
    #[serde(rename = "async")]
    pub is_async: bool,

    /// Whether the field is skipped at submit time.
    pub ignore_validation: bool,
}

impl FieldOptions {
    /// Options for an async field.
    pub fn asynchronous() -> Self {
        Self {
            is_async: true,
            ..Self::default()
        }
    }

    /// Options for an ignored field.
    pub fn ignored() -> Self {
        Self {
            ignore_validation: true,
            ..Self::default()
        }
    }

    /// Set the display name.
    pub fn with_attribute_name(mut self, name: impl Into<String>) -> Self {
        self.attribute_name = Some(name.into());
        self
    }
}

/// External validator process configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Program to run.
    pub command: Option<String>,

    /// Arguments passed to the program.
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let config = FormConfig::default();
        assert_eq!(config.form.locale, None);
        assert_eq!(config.form.settle_timeout(), Duration::from_secs(5));
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_invalid_ignore_glob() {
        let mut config = FormConfig::default();
        config.form.ignore = vec!["[".to_string()];
        assert!(config.ignore_patterns().is_err());
    }

    #[test]
    fn test_field_options_builders() {
        let options = FieldOptions::asynchronous().with_attribute_name("user name");
        assert!(options.is_async);
        assert!(!options.ignore_validation);
        assert_eq!(options.attribute_name.as_deref(), Some("user name"));
    }
}
