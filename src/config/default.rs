// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

use super::schema::FormConfig;

/// Get the default configuration.
pub fn default_config() -> FormConfig {
    FormConfig::default()
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# formcheck configuration file
# Author: Eshan Roy
# SPDX-License-Identifier: MIT

[form]
locale = "en"
# Confirmation fields are validated together with their base field.
confirmation_pattern = "^(?P<base>.+)_confirmation$"
# Field names skipped at submit time.
ignore = ["csrf_token", "_method"]
settle_timeout_ms = 5000

# Rule expressions are passed through to the validator untouched.
[rules]
name = "required"
email = "required|email"
password = "required|min:8"
password_confirmation = "required|same:password"
interests = "required|array"
plan = "required"
username = "required|username_available"

[fields.email]
attribute_name = "email address"

[fields.username]
async = true

[validator]
command = "node"
args = ["scripts/validate.js"]
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[test]
    fn test_example_config_parses() {
        let config = parse_config(example_config()).unwrap();
        assert_eq!(config.rules.len(), 7);
        assert!(config.fields["username"].is_async);
        assert_eq!(config.form.ignore.len(), 2);
    }
}
