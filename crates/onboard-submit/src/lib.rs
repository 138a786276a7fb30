#![forbid(unsafe_code)]

//! The submission pipeline.
//!
//! On an explicit submit action the current form state is serialized to a
//! JSON body, tagged with a sequence number and a snapshot of the state it
//! was dispatched with, and posted to a fixed remote endpoint. Responses
//! are drained on the caller's event loop:
//! - success stores the response body as the submission record
//!   (last-arrival-wins) and resets the form only if the live state still
//!   equals the request's snapshot
//! - failure is logged to the operator channel and changes nothing
//!
//! There is no retry and no timeout; a request waits indefinitely for its
//! response.
//!
//! The [`Transport`] trait is the seam between the pipeline and the wire;
//! [`HttpTransport`] is the production implementation.

use std::fmt;

pub mod pipeline;
pub mod transport;

pub use pipeline::{SubmitEvent, SubmitPhase, SubmitSession};
pub use transport::{DEFAULT_ENDPOINT, HttpTransport, SubmitOutcome, Transport};

// ---------------------------------------------------------------------------
// SubmitError
// ---------------------------------------------------------------------------

/// A submission failure. Logged, never surfaced to the end user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The request never completed: connect, send, or read failure.
    Transport(String),
    /// The endpoint answered with a non-success status.
    Status {
        /// HTTP status code.
        code: u16,
        /// Raw response body, opaque.
        body: String,
    },
    /// The success response body was not JSON.
    Decode(String),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport failure: {msg}"),
            Self::Status { code, body } => write!(f, "endpoint returned {code}: {body}"),
            Self::Decode(msg) => write!(f, "response body is not JSON: {msg}"),
        }
    }
}

impl std::error::Error for SubmitError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SubmitError::Status {
            code: 500,
            body: "{\"error\":\"boom\"}".into(),
        };
        assert_eq!(format!("{err}"), "endpoint returned 500: {\"error\":\"boom\"}");

        let err = SubmitError::Transport("connection refused".into());
        assert_eq!(format!("{err}"), "transport failure: connection refused");
    }
}
