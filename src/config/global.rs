// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Process-wide validation settings.
//!
//! These mirror the validator library's global switches (locale, message
//! overrides, attribute formatter). Every form in the process shares them
//! and the last writer wins. Each request captures a snapshot when it is
//! built, so a change only affects validations dispatched afterwards.

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Formats a field name into the display name used in messages.
pub type AttributeFormatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Locale used until `use_lang` is called.
pub const DEFAULT_LOCALE: &str = "en";

struct Settings {
    locale: String,
    messages: HashMap<String, HashMap<String, String>>,
    attribute_formatter: Option<AttributeFormatter>,
}

lazy_static! {
    static ref SETTINGS: RwLock<Settings> = RwLock::new(Settings {
        locale: DEFAULT_LOCALE.to_string(),
        messages: HashMap::new(),
        attribute_formatter: None,
    });
}

// A panic while holding the lock cannot leave the settings half-written,
// so a poisoned lock is still safe to use.
fn read() -> RwLockReadGuard<'static, Settings> {
    SETTINGS.read().unwrap_or_else(|e| e.into_inner())
}

fn write() -> RwLockWriteGuard<'static, Settings> {
    SETTINGS.write().unwrap_or_else(|e| e.into_inner())
}

/// Set the locale for error messages.
pub fn use_lang(locale: impl Into<String>) {
    let locale = locale.into();
    tracing::debug!("Switching validation locale to {}", locale);
    write().locale = locale;
}

/// Get the locale currently in use.
pub fn default_lang() -> String {
    read().locale.clone()
}

/// Override error messages for a locale, keyed by rule name.
pub fn set_messages(locale: impl Into<String>, messages: HashMap<String, String>) {
    write().messages.insert(locale.into(), messages);
}

/// Get the message overrides registered for a locale.
pub fn get_messages(locale: &str) -> HashMap<String, String> {
    read().messages.get(locale).cloned().unwrap_or_default()
}

/// Install a formatter applied to every field without an explicit display name.
pub fn set_attribute_formatter<F>(formatter: F)
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    write().attribute_formatter = Some(Arc::new(formatter));
}

/// Remove the global attribute formatter.
pub fn clear_attribute_formatter() {
    write().attribute_formatter = None;
}

/// The installed attribute formatter, if any.
pub fn attribute_formatter() -> Option<AttributeFormatter> {
    read().attribute_formatter.clone()
}

/// Locale and message overrides captured for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsSnapshot {
    pub locale: String,
    pub messages: HashMap<String, String>,
}

/// Capture the current locale with its message overrides.
pub fn snapshot() -> SettingsSnapshot {
    let settings = read();
    SettingsSnapshot {
        locale: settings.locale.clone(),
        messages: settings
            .messages
            .get(&settings.locale)
            .cloned()
            .unwrap_or_default(),
    }
}
