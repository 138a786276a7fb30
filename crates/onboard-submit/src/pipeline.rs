#![forbid(unsafe_code)]

//! The submission state machine.
//!
//! Idle → Sending → {Succeeded, Failed} → Idle. Terminal states are
//! reported through [`SubmitEvent`]s; once observed, the session settles
//! back to Idle (or Sending while other requests remain in flight). There
//! is no retry transition.
//!
//! Editing is never locked while a request is in flight, and concurrent
//! submissions are not serialized: whichever response arrives is applied
//! to the submission record, and a reset only happens when the live form
//! state still equals the snapshot the request was dispatched with.

use std::sync::mpsc;

use onboard_form::{FormController, FormValues};

use crate::transport::{HttpTransport, SubmitOutcome, Transport};

// ---------------------------------------------------------------------------
// SubmitPhase
// ---------------------------------------------------------------------------

/// Where the pipeline currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    /// No request in flight.
    #[default]
    Idle,
    /// At least one request in flight.
    Sending,
    /// A response was just applied; settles to Idle once observed.
    Succeeded,
    /// A failure was just logged; settles to Idle once observed.
    Failed,
}

// ---------------------------------------------------------------------------
// SubmitEvent
// ---------------------------------------------------------------------------

/// One observed terminal transition, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitEvent {
    /// The endpoint accepted the request.
    Succeeded {
        /// Sequence number of the resolved request.
        seq: u64,
        /// Whether the form state was reset (it still matched the
        /// request's snapshot).
        reset: bool,
    },
    /// The request failed; details went to the operator log only.
    Failed {
        /// Sequence number of the resolved request.
        seq: u64,
    },
}

// ---------------------------------------------------------------------------
// SubmitSession
// ---------------------------------------------------------------------------

/// Owns the form controller and drives submissions through a [`Transport`].
pub struct SubmitSession<T: Transport> {
    controller: FormController,
    transport: T,
    outcomes: mpsc::Receiver<SubmitOutcome>,
    phase: SubmitPhase,
    next_seq: u64,
    in_flight: Vec<(u64, FormValues)>,
    record: Option<serde_json::Value>,
}

impl<T: Transport> SubmitSession<T> {
    /// Create a session over a controller, a transport, and the transport's
    /// outcome channel.
    #[must_use]
    pub fn new(
        controller: FormController,
        transport: T,
        outcomes: mpsc::Receiver<SubmitOutcome>,
    ) -> Self {
        Self {
            controller,
            transport,
            outcomes,
            phase: SubmitPhase::Idle,
            next_seq: 1,
            in_flight: Vec::new(),
            record: None,
        }
    }

    /// The form controller.
    #[must_use]
    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    /// The form controller, mutably. Editing stays open while requests are
    /// in flight.
    pub fn controller_mut(&mut self) -> &mut FormController {
        &mut self.controller
    }

    /// The current pipeline phase.
    #[must_use]
    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// The last response body, held for display.
    #[must_use]
    pub fn record(&self) -> Option<&serde_json::Value> {
        self.record.as_ref()
    }

    /// Number of requests currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Dispatch the current form state.
    ///
    /// Returns `None` without dispatching when the submit gate is
    /// disabled. On dispatch, the request carries a snapshot of the state
    /// it was built from.
    pub fn submit(&mut self) -> Option<u64> {
        if !self.controller.submit_enabled() {
            tracing::debug!("submit ignored; record does not validate");
            return None;
        }

        let snapshot = self.controller.snapshot();
        let body = snapshot.to_json();
        let seq = self.next_seq;
        self.next_seq += 1;

        tracing::debug!(seq, "dispatching submission");
        self.in_flight.push((seq, snapshot));
        self.transport.dispatch(seq, body);
        self.phase = SubmitPhase::Sending;
        Some(seq)
    }

    /// Drain arrived outcomes and apply them, returning the observed
    /// terminal transitions in arrival order.
    pub fn pump(&mut self) -> Vec<SubmitEvent> {
        let mut events = Vec::new();
        while let Ok(outcome) = self.outcomes.try_recv() {
            events.push(self.apply(outcome));
        }

        // Terminal states settle once observed.
        self.phase = if self.in_flight.is_empty() {
            SubmitPhase::Idle
        } else {
            SubmitPhase::Sending
        };

        events
    }

    fn apply(&mut self, outcome: SubmitOutcome) -> SubmitEvent {
        let seq = outcome.seq;
        let snapshot = self
            .in_flight
            .iter()
            .position(|(pending, _)| *pending == seq)
            .map(|index| self.in_flight.remove(index).1);

        match outcome.result {
            Ok(body) => {
                let reset = snapshot.is_some_and(|snap| &snap == self.controller.values());
                if reset {
                    self.controller.reset();
                } else {
                    tracing::debug!(seq, "form edited since dispatch; reset skipped");
                }
                // Last arrival wins.
                self.record = Some(body);
                self.phase = SubmitPhase::Succeeded;
                tracing::info!(seq, reset, "submission accepted");
                SubmitEvent::Succeeded { seq, reset }
            }
            Err(err) => {
                tracing::warn!(seq, error = %err, "submission failed");
                self.phase = SubmitPhase::Failed;
                SubmitEvent::Failed { seq }
            }
        }
    }
}

impl SubmitSession<HttpTransport> {
    /// Create a session posting to the given HTTP endpoint.
    #[must_use]
    pub fn over_http(controller: FormController, endpoint: impl Into<String>) -> Self {
        let (transport, outcomes) = HttpTransport::new(endpoint);
        Self::new(controller, transport, outcomes)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
