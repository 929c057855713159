// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! formcheck - Form validation orchestrator
//!
//! Collects field values from a form, resolves the rule for each field,
//! hands the work to a validation engine and keeps the error map that the
//! host renders.
//!
//! # Features
//!
//! - **Field Extraction**: Text, checkbox group and radio group values
//! - **Confirmation Pairing**: `x_confirmation` is checked against `x`
//! - **Sync and Async Validation**: Out-of-order async replies are discarded
//! - **Submit Coordination**: Focus moves to the first failing field
//! - **Host Bindings**: Callback, hook-style and event-emitter adapters
//!
//! # Example
//!
//! ```no_run
//! use formcheck::binding::HookBinding;
//! use formcheck::field::{Element, FormDocument};
//! use formcheck::validator::ProcessValidator;
//! use formcheck::{FormConfig, FormValidator};
//!
//! let config = FormConfig::load().unwrap();
//! let validator = ProcessValidator::from_config(&config.validator).unwrap();
//! let mut form = FormValidator::from_config(&config, validator, HookBinding::new()).unwrap();
//!
//! let document = FormDocument::new(vec![
//!     Element::text("email", "ada@example.com"),
//!     Element::submit("save"),
//! ])
//! .unwrap();
//!
//! let status = form.handle_submit(&document).unwrap();
//! println!("{:?}: {:?}", status, form.errors());
//! ```

// Module declarations
pub mod binding;
pub mod cli;
pub mod config;
pub mod error;
pub mod field;
pub mod form;
pub mod rules;
pub mod validator;

// Re-exports for convenience
pub use binding::Binding;
pub use config::FormConfig;
pub use error::{FormError, Result};
pub use field::{FieldValue, FormDocument};
pub use form::{Dispatch, ErrorMap, FormValidator, SubmitStatus};
pub use rules::RuleMap;
pub use validator::{AsyncResponder, ValidationRequest, Validator, Verdict};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of formcheck.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
