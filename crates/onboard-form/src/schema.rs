#![forbid(unsafe_code)]

//! Declarative field definitions.
//!
//! A [`Schema`] is a plain value listing every field the form carries:
//! name, input kind, required flag, and the rule chain the field validates
//! against. Schemas are built once at form-construction time and handed to
//! the controller; multiple independent form instances can share or clone
//! them freely.

use onboard_validate::{Accepted, Chain, Email, MinLength, Required, Rule, RuleError, RuleOutcome};

use crate::state::FieldValue;

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

/// The input kind of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Single-line text input.
    Text,
    /// Email input.
    Email,
    /// Masked password input.
    Password,
    /// Boolean checkbox.
    Checkbox,
    /// Single choice from a dropdown-style list.
    Select,
    /// Multi-line text input.
    TextArea,
    /// Single choice from a group of radio buttons.
    RadioGroup,
}

impl FieldKind {
    /// Whether this kind stores a boolean rather than a string.
    #[must_use]
    pub fn is_boolean(self) -> bool {
        matches!(self, Self::Checkbox)
    }
}

// ---------------------------------------------------------------------------
// FieldRule
// ---------------------------------------------------------------------------

/// The rule chain a field validates against, typed by the value it stores.
#[derive(Debug)]
pub enum FieldRule {
    /// Rules over the string value of a text-like field.
    Text(Chain<str>),
    /// Rules over the boolean value of a checkbox.
    Flag(Chain<bool>),
}

impl FieldRule {
    /// Whether the chain has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(chain) => chain.is_empty(),
            Self::Flag(chain) => chain.is_empty(),
        }
    }
}

// ---------------------------------------------------------------------------
// FieldDef
// ---------------------------------------------------------------------------

/// Static description of one form field.
#[derive(Debug)]
pub struct FieldDef {
    name: String,
    label: String,
    kind: FieldKind,
    required: bool,
    placeholder: Option<String>,
    rule: FieldRule,
}

impl FieldDef {
    /// Create a field of the given kind. The label defaults to the name.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        let rule = if kind.is_boolean() {
            FieldRule::Flag(Chain::new())
        } else {
            FieldRule::Text(Chain::new())
        };
        Self {
            label: name.clone(),
            name,
            kind,
            required: false,
            placeholder: None,
            rule,
        }
    }

    /// Create a text field.
    #[must_use]
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    /// Create an email field.
    #[must_use]
    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Email)
    }

    /// Create a password field.
    #[must_use]
    pub fn password(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Password)
    }

    /// Create a checkbox field.
    #[must_use]
    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Checkbox)
    }

    /// Create a select field.
    #[must_use]
    pub fn select(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Select)
    }

    /// Create a textarea field.
    #[must_use]
    pub fn textarea(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::TextArea)
    }

    /// Create a radio-group field.
    #[must_use]
    pub fn radio_group(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::RadioGroup)
    }

    /// Set the display label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the placeholder shown while the field is empty.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Mark the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach a rule chain over the field's string value.
    ///
    /// Only meaningful for non-checkbox kinds; a checkbox keeps its flag
    /// chain.
    #[must_use]
    pub fn rule(mut self, chain: Chain<str>) -> Self {
        debug_assert!(!self.kind.is_boolean(), "checkbox fields take flag_rule");
        self.rule = FieldRule::Text(chain);
        self
    }

    /// Attach a rule chain over the field's boolean value.
    #[must_use]
    pub fn flag_rule(mut self, chain: Chain<bool>) -> Self {
        debug_assert!(self.kind.is_boolean(), "only checkbox fields take flag_rule");
        self.rule = FieldRule::Flag(chain);
        self
    }

    /// The field's identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field's display label.
    #[must_use]
    pub fn display_label(&self) -> &str {
        &self.label
    }

    /// The field's input kind.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Whether the field is required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The placeholder, if declared.
    #[must_use]
    pub fn placeholder_text(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// The empty default value for this field's kind.
    #[must_use]
    pub fn default_value(&self) -> FieldValue {
        if self.kind.is_boolean() {
            FieldValue::Flag(false)
        } else {
            FieldValue::Text(String::new())
        }
    }

    /// Check a candidate value against this field's rule chain.
    ///
    /// A value of the wrong shape for the field's kind never passes.
    #[must_use]
    pub fn check(&self, value: &FieldValue) -> RuleOutcome {
        match (&self.rule, value) {
            (FieldRule::Text(chain), FieldValue::Text(text)) => chain.check(text.as_str()),
            (FieldRule::Flag(chain), FieldValue::Flag(flag)) => chain.check(flag),
            _ => RuleOutcome::Fail(RuleError::new(
                "kind_mismatch",
                "Value does not match the field kind.",
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// The ordered set of field definitions for one form.
#[derive(Debug, Default)]
pub struct Schema {
    fields: Vec<FieldDef>,
}

impl Schema {
    /// Create a schema from field definitions.
    #[must_use]
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self { fields }
    }

    /// All fields, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|def| def.name() == name)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The full onboarding field set.
    ///
    /// Name, email, password, and terms from the first cut of the form,
    /// plus role, bio, suffix, and GPA. Suffix is unconstrained; every
    /// other field carries its declared message.
    #[must_use]
    pub fn onboarding() -> Self {
        Self::new(vec![
            FieldDef::text("name")
                .label("Name")
                .placeholder("Name")
                .required()
                .rule(Chain::new().and(Required::new().with_message("Name is required."))),
            FieldDef::email("email")
                .label("Email")
                .placeholder("Email")
                .required()
                .rule(
                    Chain::new()
                        .and(Required::new().with_message("Must include email address."))
                        .and(Email::new().with_message("Must be a valid email address.")),
                ),
            FieldDef::password("password")
                .label("Password")
                .placeholder("Password")
                .required()
                .rule(
                    Chain::new()
                        .and(Required::new().with_message("Password is Required"))
                        .and(
                            MinLength::new(6)
                                .with_message("Passwords must be at least 6 characters long."),
                        ),
                ),
            FieldDef::checkbox("terms")
                .label("Do you agree to the terms and conditions?")
                .required()
                .flag_rule(
                    Chain::new()
                        .and(Accepted::new().with_message("You must accept Terms and Conditions")),
                ),
            FieldDef::select("role")
                .label("Role")
                .required()
                .rule(Chain::new().and(Required::new().with_message("Please choose a role."))),
            FieldDef::textarea("bio")
                .label("Bio")
                .placeholder("Tell us about yourself")
                .required()
                .rule(
                    Chain::new()
                        .and(Required::new().with_message("Tell us a little about yourself.")),
                ),
            FieldDef::select("suffix").label("Suffix"),
            FieldDef::text("gpa")
                .label("GPA")
                .placeholder("3.5")
                .required()
                .rule(Chain::new().and(Required::new().with_message("GPA is required."))),
        ])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- FieldDef --

    #[test]
    fn label_defaults_to_name() {
        let def = FieldDef::text("gpa");
        assert_eq!(def.display_label(), "gpa");
        let def = FieldDef::text("gpa").label("GPA");
        assert_eq!(def.display_label(), "GPA");
    }

    #[test]
    fn checkbox_defaults_to_false() {
        let def = FieldDef::checkbox("terms");
        assert_eq!(def.default_value(), FieldValue::Flag(false));
    }

    #[test]
    fn text_like_kinds_default_to_empty_string() {
        for def in [
            FieldDef::text("a"),
            FieldDef::email("b"),
            FieldDef::password("c"),
            FieldDef::select("d"),
            FieldDef::textarea("e"),
            FieldDef::radio_group("f"),
        ] {
            assert_eq!(def.default_value(), FieldValue::Text(String::new()));
        }
    }

    #[test]
    fn unconstrained_field_passes_anything() {
        let def = FieldDef::select("suffix");
        assert!(def.check(&FieldValue::Text(String::new())).is_pass());
        assert!(def.check(&FieldValue::Text("Jr.".into())).is_pass());
    }

    #[test]
    fn kind_mismatch_never_passes() {
        let def = FieldDef::text("name");
        assert!(def.check(&FieldValue::Flag(true)).is_fail());
    }

    // -- Schema --

    #[test]
    fn field_lookup_by_name() {
        let schema = Schema::onboarding();
        assert!(schema.field("email").is_some());
        assert!(schema.field("nonesuch").is_none());
    }

    #[test]
    fn onboarding_field_set() {
        let schema = Schema::onboarding();
        let names: Vec<&str> = schema.fields().iter().map(FieldDef::name).collect();
        assert_eq!(
            names,
            ["name", "email", "password", "terms", "role", "bio", "suffix", "gpa"]
        );
    }

    #[test]
    fn onboarding_required_flags() {
        let schema = Schema::onboarding();
        for def in schema.fields() {
            let expect_required = def.name() != "suffix";
            assert_eq!(def.is_required(), expect_required, "field {}", def.name());
        }
    }

    #[test]
    fn required_fields_fail_empty_with_declared_message() {
        let schema = Schema::onboarding();
        let expected = [
            ("name", "Name is required."),
            ("email", "Must include email address."),
            ("password", "Password is Required"),
            ("role", "Please choose a role."),
            ("bio", "Tell us a little about yourself."),
            ("gpa", "GPA is required."),
        ];
        for (name, message) in expected {
            let def = schema.field(name).unwrap();
            let outcome = def.check(&def.default_value());
            assert_eq!(outcome.message(), Some(message), "field {name}");
        }

        let terms = schema.field("terms").unwrap();
        assert_eq!(
            terms.check(&FieldValue::Flag(false)).message(),
            Some("You must accept Terms and Conditions")
        );
        assert!(terms.check(&FieldValue::Flag(true)).is_pass());
    }

    #[test]
    fn password_minimum_length_boundary() {
        let schema = Schema::onboarding();
        let def = schema.field("password").unwrap();
        assert_eq!(
            def.check(&FieldValue::Text("abc".into())).message(),
            Some("Passwords must be at least 6 characters long.")
        );
        assert!(def.check(&FieldValue::Text("abcdef".into())).is_pass());
    }
}
