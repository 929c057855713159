// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! One-shot continuation handed to asynchronous validations.

use std::sync::mpsc::Sender;

use super::request::Verdict;

/// Identifies one dispatched validation request.
pub type TicketId = u64;

/// Terminal state of an asynchronous request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncOutcome {
    /// Every rule passed.
    Passed,
    /// At least one field failed.
    Failed(Verdict),
    /// The capability itself broke; state is left untouched.
    Rejected(String),
}

/// An outcome tagged with the request it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncReply {
    pub ticket: TicketId,
    pub outcome: AsyncOutcome,
}

/// Continuation for one pending request.
///
/// Every terminal method consumes the responder, so a request settles at
/// most once. Dropping it without replying leaves the request pending.
#[derive(Debug)]
pub struct AsyncResponder {
    ticket: TicketId,
    sender: Sender<AsyncReply>,
}

impl AsyncResponder {
    pub(crate) fn new(ticket: TicketId, sender: Sender<AsyncReply>) -> Self {
        Self { ticket, sender }
    }

    /// The request this responder answers.
    pub fn ticket(&self) -> TicketId {
        self.ticket
    }

    /// All rules passed.
    pub fn passes(self) {
        self.send(AsyncOutcome::Passed);
    }

    /// `field` failed with `message`.
    pub fn fails(self, field: impl Into<String>, message: impl Into<String>) {
        let verdict = Verdict::pass().with_failure(field, message);
        self.send(AsyncOutcome::Failed(verdict));
    }

    /// Reply with a full verdict, passing when it reports nothing.
    pub fn settle(self, verdict: Verdict) {
        if verdict.failed() {
            self.send(AsyncOutcome::Failed(verdict));
        } else {
            self.send(AsyncOutcome::Passed);
        }
    }

    /// The capability could not evaluate the request.
    pub fn reject(self, reason: impl Into<String>) {
        self.send(AsyncOutcome::Rejected(reason.into()));
    }

    fn send(self, outcome: AsyncOutcome) {
        let reply = AsyncReply {
            ticket: self.ticket,
            outcome,
        };
        if self.sender.send(reply).is_err() {
            tracing::debug!("Form dropped before request {} settled", self.ticket);
        }
    }
}
