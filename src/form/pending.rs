// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Bookkeeping for outstanding asynchronous requests and submit rounds.

use std::collections::{HashMap, HashSet};

use crate::validator::TicketId;

/// Hands out request tickets and remembers the latest one per field.
///
/// A reply only updates fields for which its ticket is still the latest,
/// so a slow response cannot overwrite a newer validation.
#[derive(Debug, Default)]
pub(crate) struct Sequencer {
    next: TicketId,
    latest: HashMap<String, TicketId>,
}

impl Sequencer {
    pub(crate) fn issue<'a>(&mut self, fields: impl IntoIterator<Item = &'a str>) -> TicketId {
        self.next += 1;
        let ticket = self.next;
        for field in fields {
            self.latest.insert(field.to_string(), ticket);
        }
        ticket
    }

    pub(crate) fn is_current(&self, field: &str, ticket: TicketId) -> bool {
        self.latest.get(field) == Some(&ticket)
    }

    /// Whether `field` has been validated by a request issued after `ticket`.
    pub(crate) fn is_newer_than(&self, field: &str, ticket: TicketId) -> bool {
        self.latest.get(field).map_or(false, |latest| *latest > ticket)
    }
}

/// An async request awaiting its reply.
#[derive(Debug)]
pub(crate) struct PendingRequest {
    /// Fields whose rules the request carries.
    pub(crate) targets: Vec<String>,
    /// Data-only companions the reply may clear.
    pub(crate) companions: Vec<String>,
    pub(crate) round: Option<u64>,
}

/// One submit attempt.
#[derive(Debug)]
pub(crate) struct SubmitRound {
    pub(crate) id: u64,
    pub(crate) outstanding: HashSet<TicketId>,
    /// The capability failed for at least one target.
    pub(crate) aborted: bool,
    /// Field names in document order, for focusing.
    pub(crate) order: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes() {
        let mut sequencer = Sequencer::default();
        let first = sequencer.issue(["username"]);
        let second = sequencer.issue(["username"]);

        assert!(!sequencer.is_current("username", first));
        assert!(sequencer.is_current("username", second));
    }

    #[test]
    fn test_tickets_are_per_field() {
        let mut sequencer = Sequencer::default();
        let a = sequencer.issue(["email"]);
        let b = sequencer.issue(["password", "password_confirmation"]);

        assert!(sequencer.is_current("email", a));
        assert!(sequencer.is_current("password", b));
        assert!(!sequencer.is_current("email", b));
        assert!(!sequencer.is_current("unknown", a));
    }

    #[test]
    fn test_newer_than() {
        let mut sequencer = Sequencer::default();
        let first = sequencer.issue(["password_confirmation"]);
        assert!(!sequencer.is_newer_than("password", first));

        sequencer.issue(["password"]);
        assert!(sequencer.is_newer_than("password", first));
        assert!(!sequencer.is_newer_than("password_confirmation", first));
    }
}
