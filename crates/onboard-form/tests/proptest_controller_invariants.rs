#![forbid(unsafe_code)]

//! Property tests for the form controller invariants.

use onboard_form::{FormController, FormValues, InputChange, Schema};
use proptest::prelude::*;

/// One randomized edit: a field index into the onboarding schema plus a
/// candidate string and flag (the controller picks the one matching the
/// field's kind).
fn edits() -> impl Strategy<Value = Vec<(usize, String, bool)>> {
    prop::collection::vec((0usize..8, ".{0,12}", any::<bool>()), 0..24)
}

fn apply_edits(form: &mut FormController, edits: &[(usize, String, bool)]) {
    for (index, text, flag) in edits {
        let name = form.schema().fields()[*index].name().to_string();
        let kind = form.schema().fields()[*index].kind();
        let change = if kind.is_boolean() {
            InputChange::toggle(&name, *flag)
        } else {
            InputChange::text(&name, text)
        };
        form.apply_change(change).expect("declared field");
    }
}

proptest! {
    /// The gate always equals the conjunction of per-field validity.
    #[test]
    fn gate_matches_per_field_validity(edits in edits()) {
        let mut form = FormController::new(Schema::onboarding());
        apply_edits(&mut form, &edits);

        let all_pass = form
            .schema()
            .fields()
            .iter()
            .all(|def| form.validate_field(def.name()).expect("declared field").is_pass());
        prop_assert_eq!(form.submit_enabled(), all_pass);
    }

    /// After any edit sequence, reset restores the initialize result.
    #[test]
    fn reset_restores_initialize(edits in edits()) {
        let mut form = FormController::new(Schema::onboarding());
        apply_edits(&mut form, &edits);
        form.reset();

        prop_assert_eq!(form.values(), &FormValues::initial(form.schema()));
        prop_assert!(form.errors().is_clear());
    }

    /// A field's error message is non-empty exactly when its last applied
    /// validation failed.
    #[test]
    fn error_state_mirrors_last_validation(edits in edits()) {
        let mut form = FormController::new(Schema::onboarding());
        apply_edits(&mut form, &edits);

        for (index, _, _) in &edits {
            let name = form.schema().fields()[*index].name().to_string();
            let outcome = form.validate_field(&name).expect("declared field");
            prop_assert_eq!(form.error(&name).is_empty(), outcome.is_pass());
        }
    }
}
