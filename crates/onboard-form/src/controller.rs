#![forbid(unsafe_code)]

//! The form controller.
//!
//! [`FormController`] exclusively owns the form state and error state and
//! runs the explicit post-mutation hook: every [`apply_change`] validates
//! the changed field, updates that field's error message, and recomputes
//! the submit gate from the whole record. Nothing re-runs behind the
//! controller's back.
//!
//! The gate starts disabled until the record first proves valid; a form
//! with required fields is therefore not submittable before any input.
//!
//! Deferred validation outcomes go through [`apply_outcome`], which drops
//! anything older than the field's current revision.
//!
//! [`apply_change`]: FormController::apply_change
//! [`apply_outcome`]: FormController::apply_outcome

use std::collections::HashMap;
use std::fmt;

use onboard_validate::RuleOutcome;

use crate::recency::{FieldRevisions, FieldTicket};
use crate::schema::Schema;
use crate::state::{FieldValue, FormValues, InputChange};

// ---------------------------------------------------------------------------
// FormError
// ---------------------------------------------------------------------------

/// Misuse of the controller API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The named field is not declared in the schema.
    UnknownField(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField(name) => write!(f, "unknown field: {name}"),
        }
    }
}

impl std::error::Error for FormError {}

// ---------------------------------------------------------------------------
// ErrorState
// ---------------------------------------------------------------------------

/// Per-field validation failure messages. An absent entry reads as the
/// empty string: no error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorState {
    messages: HashMap<String, String>,
}

impl ErrorState {
    /// The current message for a field; `""` when the field has no error.
    #[must_use]
    pub fn message(&self, field: &str) -> &str {
        self.messages.get(field).map_or("", String::as_str)
    }

    /// Record a failure message for a field, overwriting any previous one.
    /// An empty message clears the field.
    pub fn set(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() {
            self.messages.remove(field);
        } else {
            self.messages.insert(field.to_string(), message);
        }
    }

    /// Clear a field's error.
    pub fn clear(&mut self, field: &str) {
        self.messages.remove(field);
    }

    /// Clear every field's error.
    pub fn clear_all(&mut self) {
        self.messages.clear();
    }

    /// Whether no field has an error.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterate over `(field, message)` pairs that currently fail.
    pub fn failing(&self) -> impl Iterator<Item = (&str, &str)> {
        self.messages
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

// ---------------------------------------------------------------------------
// FormController
// ---------------------------------------------------------------------------

/// Owns form state, error state, per-field revisions, and the submit gate.
#[derive(Debug)]
pub struct FormController {
    schema: Schema,
    values: FormValues,
    initial: FormValues,
    errors: ErrorState,
    revisions: FieldRevisions,
    submit_enabled: bool,
}

impl FormController {
    /// Create a controller over the given schema with every field at its
    /// empty default. The gate is computed from the initial record.
    #[must_use]
    pub fn new(schema: Schema) -> Self {
        let values = FormValues::initial(&schema);
        let initial = values.clone();
        let submit_enabled = record_is_valid(&schema, &values);
        Self {
            schema,
            values,
            initial,
            errors: ErrorState::default(),
            revisions: FieldRevisions::new(),
            submit_enabled,
        }
    }

    /// The schema this controller validates against.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The current form state.
    #[must_use]
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// The current value of a field.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// The current error state.
    #[must_use]
    pub fn errors(&self) -> &ErrorState {
        &self.errors
    }

    /// The current error message for a field; `""` when clear.
    #[must_use]
    pub fn error(&self, field: &str) -> &str {
        self.errors.message(field)
    }

    /// Whether the submit control is interactive.
    #[must_use]
    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// Whether any field differs from its initial value.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.values != self.initial
    }

    /// A copy of the current form state, for tagging dispatched requests.
    #[must_use]
    pub fn snapshot(&self) -> FormValues {
        self.values.clone()
    }

    /// Apply one input change.
    ///
    /// Checkbox fields store the checked boolean; every other kind stores
    /// the raw string. The changed field is re-validated and its error
    /// message overwritten, then the gate is recomputed from the whole
    /// record. Returns the ticket identifying this change's revision.
    pub fn apply_change(&mut self, change: InputChange<'_>) -> Result<FieldTicket, FormError> {
        let def = self
            .schema
            .field(change.field)
            .ok_or_else(|| FormError::UnknownField(change.field.to_string()))?;

        let value = if def.kind().is_boolean() {
            FieldValue::Flag(change.checked)
        } else {
            FieldValue::Text(change.value.to_string())
        };
        self.values.set(change.field, value);

        let ticket = FieldTicket {
            field: change.field.to_string(),
            revision: self.revisions.bump(change.field),
        };

        let outcome = self.validate_field(change.field)?;
        self.apply_outcome(&ticket, outcome);
        self.submit_enabled = self.validate_record();

        Ok(ticket)
    }

    /// Validate a single field against its current value. Pure: error state
    /// is not touched.
    pub fn validate_field(&self, field: &str) -> Result<RuleOutcome, FormError> {
        let def = self
            .schema
            .field(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;
        let value = self
            .values
            .get(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;
        Ok(def.check(value))
    }

    /// Validate the whole record. Pure: drives the gate only, never the
    /// error state.
    #[must_use]
    pub fn validate_record(&self) -> bool {
        record_is_valid(&self.schema, &self.values)
    }

    /// Apply a validation outcome for the given ticket.
    ///
    /// Returns `false` — and leaves error state untouched — if the field
    /// has changed since the ticket was issued. Only the most recent
    /// outcome for a field may land.
    pub fn apply_outcome(&mut self, ticket: &FieldTicket, outcome: RuleOutcome) -> bool {
        if !self.revisions.is_current(&ticket.field, ticket.revision) {
            return false;
        }
        match outcome {
            RuleOutcome::Pass => self.errors.clear(&ticket.field),
            RuleOutcome::Fail(err) => self.errors.set(&ticket.field, err.message),
        }
        true
    }

    /// Restore the initial form state.
    ///
    /// Called after a successful submission. Every field's revision is
    /// bumped so in-flight validations of pre-reset values are discarded,
    /// errors are cleared back to pristine, and the gate is recomputed.
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        for def in self.schema.fields() {
            self.revisions.bump(def.name());
        }
        self.errors.clear_all();
        self.submit_enabled = self.validate_record();
    }
}

fn record_is_valid(schema: &Schema, values: &FormValues) -> bool {
    schema.fields().iter().all(|def| {
        values
            .get(def.name())
            .is_some_and(|value| def.check(value).is_pass())
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDef;
    use onboard_validate::{Accepted, Chain, Email, MinLength, Required};

    /// The first-cut field set: name, email, password, terms.
    fn first_cut() -> Schema {
        Schema::new(vec![
            FieldDef::text("name")
                .required()
                .rule(Chain::new().and(Required::new().with_message("Name is required."))),
            FieldDef::email("email").required().rule(
                Chain::new()
                    .and(Required::new().with_message("Must include email address."))
                    .and(Email::new().with_message("Must be a valid email address.")),
            ),
            FieldDef::password("password").required().rule(
                Chain::new()
                    .and(Required::new().with_message("Password is Required"))
                    .and(
                        MinLength::new(6)
                            .with_message("Passwords must be at least 6 characters long."),
                    ),
            ),
            FieldDef::checkbox("terms").required().flag_rule(
                Chain::new()
                    .and(Accepted::new().with_message("You must accept Terms and Conditions")),
            ),
        ])
    }

    fn fill_valid(form: &mut FormController) {
        form.apply_change(InputChange::text("name", "Ada")).unwrap();
        form.apply_change(InputChange::text("email", "ada@example.com"))
            .unwrap();
        form.apply_change(InputChange::text("password", "hunter42"))
            .unwrap();
        form.apply_change(InputChange::toggle("terms", true)).unwrap();
    }

    // -- Initialize --

    #[test]
    fn initialize_uses_empty_defaults() {
        let form = FormController::new(first_cut());
        assert_eq!(form.value("name"), Some(&FieldValue::Text(String::new())));
        assert_eq!(form.value("email"), Some(&FieldValue::Text(String::new())));
        assert_eq!(
            form.value("password"),
            Some(&FieldValue::Text(String::new()))
        );
        assert_eq!(form.value("terms"), Some(&FieldValue::Flag(false)));
    }

    #[test]
    fn gate_starts_disabled_with_required_fields() {
        let form = FormController::new(first_cut());
        assert!(!form.submit_enabled());
    }

    #[test]
    fn gate_starts_enabled_without_rules() {
        let form = FormController::new(Schema::new(vec![FieldDef::text("note")]));
        assert!(form.submit_enabled());
    }

    // -- ApplyChange --

    #[test]
    fn email_error_set_then_cleared() {
        let mut form = FormController::new(first_cut());

        form.apply_change(InputChange::text("email", "bad")).unwrap();
        assert_eq!(form.error("email"), "Must be a valid email address.");

        form.apply_change(InputChange::text("email", "a@b.com"))
            .unwrap();
        assert_eq!(form.error("email"), "");
    }

    #[test]
    fn checkbox_stores_checked_state_not_raw_value() {
        let mut form = FormController::new(first_cut());
        form.apply_change(InputChange {
            field: "terms",
            value: "on",
            checked: true,
        })
        .unwrap();
        assert_eq!(form.value("terms"), Some(&FieldValue::Flag(true)));
    }

    #[test]
    fn text_field_stores_raw_string() {
        let mut form = FormController::new(first_cut());
        form.apply_change(InputChange::text("name", "  Ada  ")).unwrap();
        assert_eq!(form.value("name"), Some(&FieldValue::Text("  Ada  ".into())));
    }

    #[test]
    fn unknown_field_is_an_error() {
        let mut form = FormController::new(first_cut());
        let err = form
            .apply_change(InputChange::text("nonesuch", "x"))
            .unwrap_err();
        assert_eq!(err, FormError::UnknownField("nonesuch".into()));
    }

    #[test]
    fn change_updates_only_that_fields_error() {
        let mut form = FormController::new(first_cut());
        form.apply_change(InputChange::text("email", "bad")).unwrap();
        form.apply_change(InputChange::text("password", "abc")).unwrap();

        assert_eq!(form.error("email"), "Must be a valid email address.");
        assert_eq!(
            form.error("password"),
            "Passwords must be at least 6 characters long."
        );
        assert_eq!(form.error("name"), "");
    }

    // -- Submit gate --

    #[test]
    fn gate_tracks_record_validity_without_lag() {
        let mut form = FormController::new(first_cut());
        fill_valid(&mut form);
        assert!(form.submit_enabled());

        form.apply_change(InputChange::text("password", "abc")).unwrap();
        assert!(!form.submit_enabled());

        form.apply_change(InputChange::text("password", "abcdef"))
            .unwrap();
        assert!(form.submit_enabled());

        form.apply_change(InputChange::toggle("terms", false)).unwrap();
        assert!(!form.submit_enabled());
    }

    #[test]
    fn record_validation_does_not_touch_error_state() {
        let form = FormController::new(first_cut());
        assert!(!form.validate_record());
        assert!(form.errors().is_clear());
    }

    // -- Recency --

    #[test]
    fn stale_outcome_is_discarded() {
        let mut form = FormController::new(first_cut());
        let stale = form
            .apply_change(InputChange::text("email", "bad"))
            .unwrap();
        form.apply_change(InputChange::text("email", "still-bad"))
            .unwrap();

        // A late pass computed for the superseded value must not clear the
        // current error.
        assert!(!form.apply_outcome(&stale, RuleOutcome::Pass));
        assert_eq!(form.error("email"), "Must be a valid email address.");
    }

    #[test]
    fn current_outcome_is_applied() {
        let mut form = FormController::new(first_cut());
        let ticket = form
            .apply_change(InputChange::text("email", "bad"))
            .unwrap();
        assert!(form.apply_outcome(&ticket, RuleOutcome::Pass));
        assert_eq!(form.error("email"), "");
    }

    // -- Reset --

    #[test]
    fn reset_restores_initialize_result() {
        let mut form = FormController::new(first_cut());
        fill_valid(&mut form);
        assert!(form.is_dirty());

        form.reset();
        assert_eq!(form.values(), &FormValues::initial(form.schema()));
        assert!(!form.is_dirty());
        assert!(form.errors().is_clear());
        assert!(!form.submit_enabled());
    }

    #[test]
    fn reset_invalidates_in_flight_tickets() {
        let mut form = FormController::new(first_cut());
        let ticket = form
            .apply_change(InputChange::text("email", "bad"))
            .unwrap();
        form.reset();
        assert!(!form.apply_outcome(&ticket, RuleOutcome::Pass));
    }

    // -- Independent instances --

    #[test]
    fn controllers_are_independent() {
        let mut a = FormController::new(first_cut());
        let b = FormController::new(first_cut());

        a.apply_change(InputChange::text("email", "bad")).unwrap();
        assert_eq!(a.error("email"), "Must be a valid email address.");
        assert_eq!(b.error("email"), "");
    }

    // -- Full field set --

    #[test]
    fn onboarding_gate_requires_every_required_field() {
        let mut form = FormController::new(Schema::onboarding());
        form.apply_change(InputChange::text("name", "Ada")).unwrap();
        form.apply_change(InputChange::text("email", "ada@example.com"))
            .unwrap();
        form.apply_change(InputChange::text("password", "hunter42"))
            .unwrap();
        form.apply_change(InputChange::toggle("terms", true)).unwrap();
        form.apply_change(InputChange::text("role", "Developer"))
            .unwrap();
        form.apply_change(InputChange::text("bio", "Hello.")).unwrap();
        assert!(!form.submit_enabled());

        // suffix stays empty; it is unconstrained
        form.apply_change(InputChange::text("gpa", "3.5")).unwrap();
        assert!(form.submit_enabled());
    }
}
