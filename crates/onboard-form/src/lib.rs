#![forbid(unsafe_code)]

//! Form schema, state store, and controller.
//!
//! This crate holds the behavioral core of the onboarding form:
//! - [`schema`] — declarative field definitions, explicitly constructed and
//!   passed in (never a module-level singleton)
//! - [`state`] — the form state store: current field values, mutated only
//!   through the input-change operation
//! - [`recency`] — per-field monotonic revisions that let stale validation
//!   outcomes be discarded
//! - [`controller`] — the [`FormController`] owning values, error state, and
//!   the submit gate, with an explicit post-mutation validation hook
//!
//! # Example
//!
//! ```rust
//! use onboard_form::{FormController, InputChange, Schema};
//!
//! let mut form = FormController::new(Schema::onboarding());
//! assert!(!form.submit_enabled());
//!
//! form.apply_change(InputChange::text("email", "bad")).unwrap();
//! assert_eq!(form.error("email"), "Must be a valid email address.");
//!
//! form.apply_change(InputChange::text("email", "a@b.com")).unwrap();
//! assert_eq!(form.error("email"), "");
//! ```

pub mod controller;
pub mod recency;
pub mod schema;
pub mod state;

pub use controller::{ErrorState, FormController, FormError};
pub use recency::{FieldRevisions, FieldTicket, Revision};
pub use schema::{FieldDef, FieldKind, FieldRule, Schema};
pub use state::{FieldValue, FormValues, InputChange};
