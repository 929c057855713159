// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading and merging.

use crate::error::{ConfigError, FormError, Result};
use std::path::{Path, PathBuf};

use super::schema::FormConfig;

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["formcheck.toml", ".formcheck.toml", ".config/formcheck.toml"];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    // XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join("formcheck").join("config.toml");
        if user_config.exists() {
            return Some(user_config);
        }
    }

    None
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<FormConfig> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            Ok(FormConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<FormConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(FormError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        FormError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<FormConfig> {
    let config: FormConfig = toml::from_str(content).map_err(|e| {
        FormError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })?;

    // Surface bad patterns at load time rather than on the first event.
    config.pairing()?;
    config.ignore_patterns()?;

    Ok(config)
}

/// Merge two configurations, with the overlay taking precedence.
///
/// Rule and field tables are merged key by key; form settings and the
/// validator come from the overlay when it sets them.
pub fn merge_configs(base: FormConfig, overlay: FormConfig) -> FormConfig {
    let defaults = super::schema::FormSettings::default();

    let form = super::schema::FormSettings {
        locale: overlay.form.locale.or(base.form.locale),
        confirmation_pattern: if overlay.form.confirmation_pattern != defaults.confirmation_pattern
        {
            overlay.form.confirmation_pattern
        } else {
            base.form.confirmation_pattern
        },
        ignore: {
            let mut merged = base.form.ignore;
            for pattern in overlay.form.ignore {
                if !merged.contains(&pattern) {
                    merged.push(pattern);
                }
            }
            merged
        },
        settle_timeout_ms: if overlay.form.settle_timeout_ms != defaults.settle_timeout_ms {
            overlay.form.settle_timeout_ms
        } else {
            base.form.settle_timeout_ms
        },
    };

    FormConfig {
        form,
        rules: {
            let mut merged = base.rules;
            merged.extend(overlay.rules);
            merged
        },
        fields: {
            let mut merged = base.fields;
            merged.extend(overlay.fields);
            merged
        },
        validator: if overlay.validator.command.is_some() {
            overlay.validator
        } else {
            base.validator
        },
    }
}
