// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The validation capability.
//!
//! Rule parsing, message formatting and pass/fail decisions belong to an
//! external engine. Forms talk to it through the [`Validator`] trait.

mod process;
mod request;
mod responder;

pub use process::ProcessValidator;
pub use request::{ValidationRequest, Verdict};
pub use responder::{AsyncOutcome, AsyncReply, AsyncResponder, TicketId};

use crate::error::Result;

/// An engine that evaluates data against rules.
pub trait Validator {
    /// Name used in diagnostics.
    fn name(&self) -> &str {
        "validator"
    }

    /// Evaluate a request synchronously.
    ///
    /// An `Err` means the engine itself failed; rule violations are
    /// reported through the verdict.
    fn evaluate(&self, request: &ValidationRequest) -> Result<Verdict>;

    /// Evaluate a request whose rules may complete later.
    ///
    /// The engine must eventually call exactly one terminal method on
    /// `responder`. The default evaluates synchronously and replies at once.
    fn evaluate_async(&self, request: ValidationRequest, responder: AsyncResponder) -> Result<()> {
        let verdict = self.evaluate(&request)?;
        responder.settle(verdict);
        Ok(())
    }
}

impl<F> Validator for F
where
    F: Fn(&ValidationRequest) -> Result<Verdict>,
{
    fn evaluate(&self, request: &ValidationRequest) -> Result<Verdict> {
        self(request)
    }
}
