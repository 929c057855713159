// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Form validation orchestration.
//!
//! [`FormValidator`] collects field values from the host's elements,
//! resolves each field's rule, hands requests to the validation
//! capability (synchronously or through a one-shot continuation), and
//! reconciles the verdicts into the error map it mirrors to the binding.

mod errors;
mod pending;
mod report;

pub use errors::{ErrorEntry, ErrorMap};
pub use report::Report;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use crate::binding::Binding;
use crate::config::global::{self, AttributeFormatter};
use crate::config::{FieldOptions, FormConfig};
use crate::error::{FieldError, FormError, Result};
use crate::field::{FieldStore, FieldValue, FormDocument};
use crate::rules::{Pairing, RuleMap};
use crate::validator::{
    AsyncOutcome, AsyncReply, AsyncResponder, TicketId, ValidationRequest, Validator, Verdict,
};

use pending::{PendingRequest, Sequencer, SubmitRound};

/// Result of dispatching one validation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The verdict has been applied.
    Validated { valid: bool },
    /// Waiting for an asynchronous reply.
    Pending { ticket: TicketId },
    /// The capability failed; the error map was left as it was.
    Aborted { reason: String },
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStatus {
    /// Every field passed and the binding was notified.
    Accepted,
    /// At least one field failed, or the capability did.
    Rejected { focus: Option<String> },
    /// Asynchronous validations are still outstanding.
    Pending,
}

/// Replies applied by one call to [`FormValidator::process_replies`] or
/// [`FormValidator::settle`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    pub settled: Vec<(TicketId, Dispatch)>,
    /// Set when the replies completed a submit round.
    pub submit: Option<SubmitStatus>,
}

/// Drives validation for one form.
pub struct FormValidator<V, B = ()> {
    validator: V,
    binding: B,
    rules: RuleMap,
    pairing: Pairing,
    options: HashMap<String, FieldOptions>,
    ignore: Vec<glob::Pattern>,
    attribute_formatter: Option<AttributeFormatter>,
    fields: FieldStore,
    errors: ErrorMap,
    sequencer: Sequencer,
    pending: HashMap<TicketId, PendingRequest>,
    round: Option<SubmitRound>,
    next_round: u64,
    replies_tx: Sender<AsyncReply>,
    replies_rx: Receiver<AsyncReply>,
}

impl<V: Validator, B: Binding> FormValidator<V, B> {
    /// Create a form validating `rules` with `validator`.
    pub fn new(validator: V, binding: B, rules: RuleMap) -> Self {
        let (replies_tx, replies_rx) = channel();
        Self {
            validator,
            binding,
            rules,
            pairing: Pairing::default(),
            options: HashMap::new(),
            ignore: Vec::new(),
            attribute_formatter: None,
            fields: FieldStore::new(),
            errors: ErrorMap::new(),
            sequencer: Sequencer::default(),
            pending: HashMap::new(),
            round: None,
            next_round: 0,
            replies_tx,
            replies_rx,
        }
    }

    /// Create a form from a loaded configuration.
    ///
    /// A configured locale is applied process-wide.
    pub fn from_config(config: &FormConfig, validator: V, binding: B) -> Result<Self> {
        if let Some(locale) = &config.form.locale {
            global::use_lang(locale.clone());
        }

        let mut form = Self::new(validator, binding, config.rule_map())
            .with_pairing(config.pairing()?)
            .with_ignore(config.ignore_patterns()?);
        for (name, options) in &config.fields {
            form.options.insert(name.clone(), options.clone());
        }
        Ok(form)
    }

    /// Set options for one field.
    pub fn with_field_options(mut self, name: impl Into<String>, options: FieldOptions) -> Self {
        self.options.insert(name.into(), options);
        self
    }

    /// Replace the confirmation pairing.
    pub fn with_pairing(mut self, pairing: Pairing) -> Self {
        self.pairing = pairing;
        self
    }

    /// Skip fields matching any of `patterns` at submit time.
    pub fn with_ignore(mut self, patterns: Vec<glob::Pattern>) -> Self {
        self.ignore = patterns;
        self
    }

    /// Seed initial field values.
    pub fn with_values(mut self, values: FieldStore) -> Self {
        self.fields = values;
        self
    }

    /// Replace the rule map wholesale.
    pub fn use_rules(&mut self, rules: RuleMap) {
        self.rules = rules;
    }

    /// Format display names for this form, taking precedence over the
    /// process-wide formatter.
    pub fn set_attribute_formatter<F>(&mut self, formatter: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.attribute_formatter = Some(std::sync::Arc::new(formatter));
    }

    /// Switch the process-wide locale.
    pub fn use_lang(&self, locale: impl Into<String>) {
        global::use_lang(locale);
    }

    pub fn rules(&self) -> &RuleMap {
        &self.rules
    }

    pub fn fields(&self) -> &FieldStore {
        &self.fields
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Current value of `name`.
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn binding(&self) -> &B {
        &self.binding
    }

    pub fn binding_mut(&mut self) -> &mut B {
        &mut self.binding
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Number of asynchronous requests awaiting a reply.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether a submit attempt is waiting on asynchronous replies.
    pub fn is_submitting(&self) -> bool {
        self.round.is_some()
    }

    /// Record the value of the changed element `name`.
    pub fn handle_change(&mut self, document: &FormDocument, name: &str) -> Result<()> {
        let value = document.value_of(name)?;
        self.set_value(name, value);
        Ok(())
    }

    /// Record a value supplied directly by the host.
    pub fn set_value(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
        self.binding.fields_changed(&self.fields);
    }

    /// Validate the blurred element `name`.
    pub fn handle_blur(&mut self, document: &FormDocument, name: &str) -> Result<Dispatch> {
        if document.element(name).is_none() {
            return Err(FormError::Field(FieldError::UnknownField {
                name: name.to_string(),
            }));
        }

        self.refresh(document, name);
        if let Some(companion) = self.pairing.companion(name) {
            if document.element(companion).is_some() {
                self.refresh(document, companion);
            }
        }
        self.binding.fields_changed(&self.fields);

        Ok(self.validate_field(name))
    }

    /// Validate `name` against its stored value.
    pub fn validate_field(&mut self, name: &str) -> Dispatch {
        let request = self.build_request(&[name]);
        let dispatch = self.dispatch(request, None);

        let ticket = match dispatch {
            Dispatch::Pending { ticket } => ticket,
            settled => return settled,
        };

        // Capabilities that answer inline have already replied.
        let progress = self.process_replies();
        progress
            .settled
            .into_iter()
            .find(|(settled, _)| *settled == ticket)
            .map(|(_, outcome)| outcome)
            .unwrap_or(Dispatch::Pending { ticket })
    }

    /// Validate every relevant field of `document`.
    ///
    /// One request is dispatched per field. Once all have settled, the
    /// binding is told about a passing submit, or the first failing field
    /// in document order is focused.
    pub fn handle_submit(&mut self, document: &FormDocument) -> Result<SubmitStatus> {
        let candidates: Vec<String> = document
            .candidate_fields()
            .into_iter()
            .map(str::to_string)
            .collect();
        for name in &candidates {
            self.refresh(document, name);
        }
        self.binding.fields_changed(&self.fields);

        if let Some(previous) = self.round.take() {
            tracing::debug!("Submit round {} superseded", previous.id);
        }

        self.next_round += 1;
        let mut round = SubmitRound {
            id: self.next_round,
            outstanding: HashSet::new(),
            aborted: false,
            order: candidates.clone(),
        };

        let targets: Vec<&String> = candidates
            .iter()
            .filter(|name| self.is_submit_target(name))
            .collect();
        tracing::debug!("Submitting {} fields in round {}", targets.len(), round.id);

        for name in targets {
            let request = self.build_request(&[name.as_str()]);
            match self.dispatch(request, Some(round.id)) {
                Dispatch::Pending { ticket } => {
                    round.outstanding.insert(ticket);
                }
                Dispatch::Aborted { .. } => round.aborted = true,
                Dispatch::Validated { .. } => {}
            }
        }

        if round.outstanding.is_empty() {
            return Ok(self.finish_round(round));
        }

        self.round = Some(round);
        let progress = self.process_replies();
        Ok(progress.submit.unwrap_or(SubmitStatus::Pending))
    }

    /// Apply every reply that has arrived, without blocking.
    pub fn process_replies(&mut self) -> Progress {
        let mut progress = Progress::default();
        while let Ok(reply) = self.replies_rx.try_recv() {
            self.apply_reply(reply, &mut progress);
        }
        progress
    }

    /// Block until every pending request has replied or `timeout` passes.
    ///
    /// Requests still pending at the deadline stay pending; their fields
    /// keep their previous error state.
    pub fn settle(&mut self, timeout: Duration) -> Progress {
        let deadline = Instant::now() + timeout;
        let mut progress = self.process_replies();

        while !self.pending.is_empty() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.replies_rx.recv_timeout(remaining) {
                Ok(reply) => self.apply_reply(reply, &mut progress),
                Err(RecvTimeoutError::Timeout) => {
                    tracing::warn!(
                        "{} validation requests still pending after {:?}",
                        self.pending.len(),
                        timeout
                    );
                    break;
                }
                // The form holds a sender, so the channel never disconnects.
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        progress
    }

    fn refresh(&mut self, document: &FormDocument, name: &str) {
        if let Some(element) = document.element(name) {
            let value = document.extract(element);
            self.fields.insert(name.to_string(), value);
        }
    }

    fn is_submit_target(&self, name: &str) -> bool {
        if self
            .options
            .get(name)
            .map(|options| options.ignore_validation)
            .unwrap_or(false)
        {
            return false;
        }
        !self.ignore.iter().any(|pattern| pattern.matches(name))
    }

    fn display_name(&self, name: &str) -> Option<String> {
        if let Some(explicit) = self
            .options
            .get(name)
            .and_then(|options| options.attribute_name.clone())
        {
            return Some(explicit);
        }
        self.attribute_formatter
            .clone()
            .or_else(global::attribute_formatter)
            .map(|formatter| formatter(name))
    }

    fn build_request(&self, targets: &[&str]) -> ValidationRequest {
        let settings = global::snapshot();
        let mut data = BTreeMap::new();
        let mut rules = BTreeMap::new();
        let mut attribute_names = BTreeMap::new();
        let mut is_async = false;

        for &name in targets {
            data.insert(
                name.to_string(),
                self.fields.get(name).cloned().unwrap_or_default(),
            );

            let resolved = self.rules.resolve(name);
            rules.insert(name.to_string(), resolved.expression);

            if let Some(companion) = self.pairing.companion(name) {
                data.insert(
                    companion.to_string(),
                    self.fields.get(companion).cloned().unwrap_or_default(),
                );
            }

            if let Some(display) = self.display_name(name) {
                attribute_names.insert(name.to_string(), display);
            }

            is_async |= self
                .options
                .get(name)
                .map(|options| options.is_async)
                .unwrap_or(false);
        }

        ValidationRequest {
            data,
            rules,
            attribute_names,
            locale: settings.locale,
            messages: settings.messages,
            is_async,
        }
    }

    fn dispatch(&mut self, request: ValidationRequest, round: Option<u64>) -> Dispatch {
        // Only fields whose rules are in the request are validated by it.
        // Companions ride along as data and are only cleared on blur, since
        // at submit time they are validated by their own request.
        let targets: Vec<String> = request.rules.keys().cloned().collect();
        let companions: Vec<String> = if round.is_none() {
            request
                .data
                .keys()
                .filter(|field| !request.rules.contains_key(*field))
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        if request.is_async {
            let ticket = self.sequencer.issue(targets.iter().map(String::as_str));
            tracing::debug!("Dispatching async request {} for {:?}", ticket, targets);

            self.pending.insert(
                ticket,
                PendingRequest {
                    targets,
                    companions,
                    round,
                },
            );
            let responder = AsyncResponder::new(ticket, self.replies_tx.clone());
            if let Err(e) = self.validator.evaluate_async(request, responder) {
                tracing::error!("Validator {} failed: {}", self.validator.name(), e);
                self.pending.remove(&ticket);
                return Dispatch::Aborted {
                    reason: e.to_string(),
                };
            }
            return Dispatch::Pending { ticket };
        }

        match self.validator.evaluate(&request) {
            Ok(verdict) => {
                let ticket = self.sequencer.issue(targets.iter().map(String::as_str));
                self.apply_verdict(ticket, &targets, &companions, &verdict);
                Dispatch::Validated {
                    valid: !verdict.failed(),
                }
            }
            Err(e) => {
                tracing::error!("Validator {} failed: {}", self.validator.name(), e);
                Dispatch::Aborted {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn apply_verdict(
        &mut self,
        ticket: TicketId,
        targets: &[String],
        companions: &[String],
        verdict: &Verdict,
    ) {
        let (mut current, stale): (Vec<&str>, Vec<&str>) = targets
            .iter()
            .map(String::as_str)
            .partition(|field| self.sequencer.is_current(field, ticket));

        if !stale.is_empty() {
            tracing::debug!("Ignoring superseded result of request {} for {:?}", ticket, stale);
        }

        // A companion with its own newer or outstanding validation keeps
        // whatever that validation decides.
        for companion in companions {
            let busy = self.sequencer.is_newer_than(companion, ticket)
                || self
                    .pending
                    .values()
                    .any(|pending| pending.targets.contains(companion));
            if busy {
                tracing::debug!("Leaving {} to its own pending validation", companion);
            } else {
                current.push(companion.as_str());
            }
        }

        for (field, _) in verdict.failures() {
            if !targets.iter().chain(companions).any(|f| f == field) {
                tracing::debug!("Validator reported unrequested field {}", field);
            }
        }

        self.errors.reconcile(current, verdict);
        self.binding.errors_changed(&self.errors);
    }

    fn apply_reply(&mut self, reply: AsyncReply, progress: &mut Progress) {
        let Some(pending) = self.pending.remove(&reply.ticket) else {
            tracing::debug!("Reply for unknown request {}", reply.ticket);
            return;
        };

        let outcome = match reply.outcome {
            AsyncOutcome::Passed => {
                self.apply_verdict(
                    reply.ticket,
                    &pending.targets,
                    &pending.companions,
                    &Verdict::pass(),
                );
                Dispatch::Validated { valid: true }
            }
            AsyncOutcome::Failed(verdict) => {
                self.apply_verdict(reply.ticket, &pending.targets, &pending.companions, &verdict);
                Dispatch::Validated {
                    valid: !verdict.failed(),
                }
            }
            AsyncOutcome::Rejected(reason) => {
                tracing::error!("Async validation {} rejected: {}", reply.ticket, reason);
                Dispatch::Aborted { reason }
            }
        };

        let aborted = matches!(outcome, Dispatch::Aborted { .. });
        progress.settled.push((reply.ticket, outcome));

        let Some(round_id) = pending.round else {
            return;
        };
        let Some(round) = self.round.as_mut().filter(|round| round.id == round_id) else {
            return;
        };

        round.outstanding.remove(&reply.ticket);
        round.aborted |= aborted;
        if round.outstanding.is_empty() {
            if let Some(round) = self.round.take() {
                progress.submit = Some(self.finish_round(round));
            }
        }
    }

    fn finish_round(&mut self, round: SubmitRound) -> SubmitStatus {
        let focus = round
            .order
            .iter()
            .find(|name| self.errors.contains(name))
            .cloned();

        if !round.aborted && self.errors.is_empty() {
            tracing::debug!("Submit round {} passed", round.id);
            self.binding.submitted(&self.fields);
            return SubmitStatus::Accepted;
        }

        if round.aborted {
            tracing::warn!("Submit round {} aborted by validator failure", round.id);
        }
        if let Some(field) = &focus {
            self.binding.focus(field);
        }
        self.binding.submit_rejected(&self.errors);
        SubmitStatus::Rejected { focus }
    }
}

impl<V, B: std::fmt::Debug> std::fmt::Debug for FormValidator<V, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormValidator")
            .field("binding", &self.binding)
            .field("rules", &self.rules)
            .field("fields", &self.fields)
            .field("errors", &self.errors)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}
