#![forbid(unsafe_code)]

//! The wire seam.
//!
//! A [`Transport`] dispatches one request body and delivers its outcome —
//! whenever it arrives — over the session's outcome channel. The pipeline
//! never blocks on a dispatch.
//!
//! [`HttpTransport`] posts with a blocking client on a named worker thread
//! per request, so the event loop stays responsive while a submission is
//! in flight.

use std::sync::mpsc;
use std::thread;

use crate::SubmitError;

/// The fixed user-creation endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://reqres.in/api/users";

// ---------------------------------------------------------------------------
// SubmitOutcome
// ---------------------------------------------------------------------------

/// The resolution of one dispatched request.
#[derive(Debug)]
pub struct SubmitOutcome {
    /// Sequence number of the request this outcome resolves.
    pub seq: u64,
    /// The response body, or the failure.
    pub result: Result<serde_json::Value, SubmitError>,
}

// ---------------------------------------------------------------------------
// Transport trait
// ---------------------------------------------------------------------------

/// Dispatches request bodies toward the remote endpoint.
///
/// Implementations must not block the caller; the outcome is delivered
/// later over the channel handed out at construction.
pub trait Transport: Send {
    /// Fire off one request. `seq` identifies it in the outcome.
    fn dispatch(&mut self, seq: u64, body: serde_json::Value);
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// Posts JSON bodies to a fixed HTTP endpoint, one worker thread per
/// request. No timeout is configured; a request waits for its response
/// indefinitely.
pub struct HttpTransport {
    endpoint: String,
    client: reqwest::blocking::Client,
    outcomes: mpsc::Sender<SubmitOutcome>,
}

impl HttpTransport {
    /// Create a transport for the given endpoint, returning the receiving
    /// end of its outcome channel.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> (Self, mpsc::Receiver<SubmitOutcome>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                endpoint: endpoint.into(),
                client: reqwest::blocking::Client::new(),
                outcomes: tx,
            },
            rx,
        )
    }

    /// The endpoint this transport posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn dispatch(&mut self, seq: u64, body: serde_json::Value) {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let outcomes = self.outcomes.clone();

        let spawned = thread::Builder::new()
            .name(format!("onboard-submit-{seq}"))
            .spawn(move || {
                let result = post_json(&client, &endpoint, &body);
                // The session may be gone by the time a slow response lands.
                let _ = outcomes.send(SubmitOutcome { seq, result });
            });

        if let Err(err) = spawned {
            tracing::warn!(seq, error = %err, "failed to spawn submission worker");
            let _ = self.outcomes.send(SubmitOutcome {
                seq,
                result: Err(SubmitError::Transport(err.to_string())),
            });
        }
    }
}

fn post_json(
    client: &reqwest::blocking::Client,
    endpoint: &str,
    body: &serde_json::Value,
) -> Result<serde_json::Value, SubmitError> {
    let response = client
        .post(endpoint)
        .json(body)
        .send()
        .map_err(|err| SubmitError::Transport(err.to_string()))?;

    let status = response.status();
    let text = response
        .text()
        .map_err(|err| SubmitError::Transport(err.to_string()))?;

    if !status.is_success() {
        return Err(SubmitError::Status {
            code: status.as_u16(),
            body: text,
        });
    }

    serde_json::from_str(&text).map_err(|err| SubmitError::Decode(err.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
