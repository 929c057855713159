// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Confirmation field pairing.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{ConfigError, FormError, Result};

/// Pattern matching `<base>_confirmation` field names.
pub const DEFAULT_CONFIRMATION_PATTERN: &str = r"^(?P<base>.+)_confirmation$";

lazy_static! {
    static ref DEFAULT_REGEX: Regex = Regex::new(DEFAULT_CONFIRMATION_PATTERN).unwrap();
}

/// Recognises confirmation fields and names their companion.
#[derive(Debug, Clone)]
pub struct Pairing {
    pattern: Regex,
}

impl Pairing {
    /// Compile a pairing pattern. The pattern must have a `base` group.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            FormError::Config(ConfigError::InvalidValue {
                key: "form.confirmation_pattern".to_string(),
                message: e.to_string(),
            })
        })?;

        if !regex.capture_names().any(|name| name == Some("base")) {
            return Err(FormError::Config(ConfigError::InvalidValue {
                key: "form.confirmation_pattern".to_string(),
                message: "pattern must define a named group 'base'".to_string(),
            }));
        }

        Ok(Self { pattern: regex })
    }

    /// The companion of `field`, if `field` is a confirmation field.
    pub fn companion<'a>(&self, field: &'a str) -> Option<&'a str> {
        let captures = self.pattern.captures(field)?;
        let base = captures.name("base")?.as_str();
        (!base.is_empty() && base != field).then_some(base)
    }
}

impl Default for Pairing {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_REGEX.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_companion() {
        let pairing = Pairing::default();
        assert_eq!(pairing.companion("password_confirmation"), Some("password"));
        assert_eq!(pairing.companion("email_confirmation"), Some("email"));
        assert_eq!(pairing.companion("password"), None);
        assert_eq!(pairing.companion("_confirmation"), None);
    }

    #[test]
    fn test_custom_pattern() {
        let pairing = Pairing::new(r"^confirm_(?P<base>\w+)$").unwrap();
        assert_eq!(pairing.companion("confirm_email"), Some("email"));
        assert_eq!(pairing.companion("email_confirmation"), None);
    }

    #[test]
    fn test_pattern_without_base_group() {
        assert!(Pairing::new(r"^(.+)_again$").is_err());
        assert!(Pairing::new(r"(").is_err());
    }
}
