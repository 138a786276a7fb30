#![forbid(unsafe_code)]

//! Onboard public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports the common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.
//!
//! # Example
//!
//! ```rust
//! use onboard::prelude::*;
//!
//! let mut form = FormController::new(Schema::onboarding());
//! form.apply_change(InputChange::text("email", "ada@example.com")).unwrap();
//! assert_eq!(form.error("email"), "");
//! ```

// --- Validation re-exports -------------------------------------------------

pub use onboard_validate::{
    Accepted, Chain, Email, MinLength, Required, Rule, RuleError, RuleOutcome,
};

// --- Form re-exports -------------------------------------------------------

pub use onboard_form::{
    ErrorState, FieldDef, FieldKind, FieldRevisions, FieldRule, FieldTicket, FieldValue,
    FormController, FormError, FormValues, InputChange, Revision, Schema,
};

// --- Submission re-exports -------------------------------------------------

pub use onboard_submit::{
    DEFAULT_ENDPOINT, HttpTransport, SubmitError, SubmitEvent, SubmitOutcome, SubmitPhase,
    SubmitSession, Transport,
};

// --- Prelude ---------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Accepted, Chain, Email, FieldDef, FieldKind, FieldValue, FormController, FormError,
        FormValues, InputChange, MinLength, Required, Rule, RuleOutcome, Schema, SubmitEvent,
        SubmitPhase, SubmitSession,
    };

    pub use crate::{form, submit, validate};
}

pub use onboard_form as form;
pub use onboard_submit as submit;
pub use onboard_validate as validate;
