// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Printable outcome of a validation run.

use console::{style, Style};
use serde::Serialize;
use std::collections::BTreeMap;

use super::{Dispatch, FormValidator, SubmitStatus};
use crate::binding::Binding;
use crate::cli::args::OutputFormat;
use crate::field::FieldStore;
use crate::validator::Validator;

/// Outcome of validating one field or a whole form.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Whether everything validated passed.
    pub valid: bool,
    /// `accepted`, `rejected`, `valid`, `invalid`, `pending` or `aborted`.
    pub status: String,
    /// Field a rejected submit focused.
    pub focus: Option<String>,
    /// Why the validator could not produce a verdict.
    pub reason: Option<String>,
    /// First message per failing field.
    pub errors: BTreeMap<String, String>,
    /// Values that were validated.
    pub fields: FieldStore,
    /// Requests still unanswered.
    pub pending: usize,
}

impl Report {
    /// Report a submit attempt.
    pub fn for_submit<V: Validator, B: Binding>(
        form: &FormValidator<V, B>,
        status: &SubmitStatus,
    ) -> Self {
        let (valid, label, focus) = match status {
            SubmitStatus::Accepted => (true, "accepted", None),
            SubmitStatus::Rejected { focus } => (false, "rejected", focus.clone()),
            SubmitStatus::Pending => (false, "pending", None),
        };
        Self::build(form, valid, label, focus, None)
    }

    /// Report validation of a single field.
    pub fn for_field<V: Validator, B: Binding>(
        form: &FormValidator<V, B>,
        dispatch: &Dispatch,
    ) -> Self {
        match dispatch {
            Dispatch::Validated { valid: true } => Self::build(form, true, "valid", None, None),
            Dispatch::Validated { valid: false } => Self::build(form, false, "invalid", None, None),
            Dispatch::Pending { .. } => Self::build(form, false, "pending", None, None),
            Dispatch::Aborted { reason } => {
                Self::build(form, false, "aborted", None, Some(reason.clone()))
            }
        }
    }

    fn build<V: Validator, B: Binding>(
        form: &FormValidator<V, B>,
        valid: bool,
        status: &str,
        focus: Option<String>,
        reason: Option<String>,
    ) -> Self {
        Self {
            valid,
            status: status.to_string(),
            focus,
            reason,
            errors: form.errors().messages(),
            fields: form.fields().clone(),
            pending: form.pending_count(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Print the report to stdout.
    pub fn print(&self, format: Option<OutputFormat>) {
        match format {
            Some(OutputFormat::Json) => self.print_json(),
            _ => println!("{}", self.format_text()),
        }
    }

    /// Render for the terminal.
    pub fn format_text(&self) -> String {
        let marker = if self.valid {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };
        let mut output = format!("{} {}", marker, self.summary());

        let width = self.errors.keys().map(String::len).max().unwrap_or(0);
        let name_style = Style::new().red();
        for (field, message) in &self.errors {
            output.push_str(&format!(
                "\n  {} {:width$}  {}",
                style("✗").red(),
                name_style.apply_to(field),
                message,
                width = width
            ));
        }

        if let Some(ref focus) = self.focus {
            output.push_str(&format!("\n  {} focus {}", style("→").dim(), style(focus).cyan()));
        }
        if let Some(ref reason) = self.reason {
            output.push_str(&format!("\n  {} {}", style("⚠").yellow(), style(reason).dim()));
        }
        if self.pending > 0 {
            output.push_str(&format!(
                "\n  {} {} validations did not answer in time",
                style("⚠").yellow(),
                self.pending
            ));
        }

        output
    }

    fn print_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }

    /// One-line summary.
    pub fn summary(&self) -> String {
        match self.errors.len() {
            0 => format!("{} ({} fields)", self.status, self.fields.len()),
            1 => format!("{} (1 error)", self.status),
            n => format!("{} ({} errors)", self.status, n),
        }
    }
}
