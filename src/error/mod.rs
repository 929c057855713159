// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for formcheck.
//!
//! Field validation failures are not errors: they are recorded in the
//! error map. The types here cover configuration, the external validation
//! capability, and malformed host input.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for formcheck operations.
#[derive(Error, Debug)]
pub enum FormError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Validation capability errors
    #[error("Validator error: {0}")]
    Validator(#[from] ValidatorError),

    // Host/document errors
    #[error("Field error: {0}")]
    Field(#[from] FieldError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Missing required configuration: {key}")]
    MissingRequired { key: String },

    #[error("Configuration merge error: {message}")]
    MergeError { message: String },
}

/// Errors raised by the external validation capability itself.
#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("Validator '{name}' failed: {message}")]
    ExecutionFailed { name: String, message: String },

    #[error("Validator '{name}' returned an invalid response: {message}")]
    InvalidResponse { name: String, message: String },

    #[error("No validator configured")]
    NotConfigured,
}

/// Errors about the elements supplied by the host.
#[derive(Error, Debug)]
pub enum FieldError {
    #[error("No element named '{name}' in the form")]
    UnknownField { name: String },

    #[error("Element at position {index} has no name")]
    UnnamedElement { index: usize },

    #[error("Form document is malformed: {message}")]
    MalformedDocument { message: String },

    #[error("Validation failed with {count} errors")]
    Failed { count: usize },
}

/// Result type alias for formcheck operations.
pub type Result<T> = std::result::Result<T, FormError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| FormError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}
