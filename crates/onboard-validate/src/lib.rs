#![forbid(unsafe_code)]

//! Composable field validation rules.
//!
//! This crate provides the pure validation layer for the onboard form
//! controller:
//! - A core [`Rule`] trait for checking candidate values
//! - Built-in rules for the onboarding fields ([`Required`], [`Email`],
//!   [`MinLength`], [`Accepted`])
//! - An ordered [`Chain`] that reports the first violated rule's message
//!
//! Every rule carries the human-readable message it was declared with; a
//! failing check returns exactly that message. Rules are pure and never
//! touch form state — wiring outcomes into error state is the controller's
//! job.
//!
//! # Example
//!
//! ```rust
//! use onboard_validate::{Chain, Email, MinLength, Required, Rule};
//!
//! let password = Chain::new()
//!     .and(Required::new().with_message("Password is Required"))
//!     .and(MinLength::new(6).with_message("Passwords must be at least 6 characters long."));
//!
//! assert!(password.check("hunter42").is_pass());
//! assert_eq!(
//!     password.check("abc").message(),
//!     Some("Passwords must be at least 6 characters long.")
//! );
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// Error codes
// ---------------------------------------------------------------------------

/// Code for a missing required value.
pub const CODE_REQUIRED: &str = "required";
/// Code for a value below the minimum length.
pub const CODE_MIN_LENGTH: &str = "too_short";
/// Code for a malformed email address.
pub const CODE_EMAIL: &str = "email";
/// Code for an unchecked must-accept flag.
pub const CODE_ACCEPTED: &str = "not_accepted";

// ---------------------------------------------------------------------------
// RuleError
// ---------------------------------------------------------------------------

/// A single validation failure: a stable code plus the declared message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleError {
    /// Stable identifier for programmatic handling.
    pub code: &'static str,
    /// The message the rule was declared with.
    pub message: String,
}

impl RuleError {
    /// Create an error with the given code and message.
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RuleError {}

// ---------------------------------------------------------------------------
// RuleOutcome
// ---------------------------------------------------------------------------

/// The result of checking a value against a rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RuleOutcome {
    /// The value passed.
    #[default]
    Pass,
    /// The value failed with the first violated rule's error.
    Fail(RuleError),
}

impl RuleOutcome {
    /// Returns `true` if the outcome is `Pass`.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns `true` if the outcome is `Fail`.
    #[must_use]
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }

    /// The failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&RuleError> {
        match self {
            Self::Pass => None,
            Self::Fail(err) => Some(err),
        }
    }

    /// The failure message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.error().map(|err| err.message.as_str())
    }
}

// ---------------------------------------------------------------------------
// Rule trait
// ---------------------------------------------------------------------------

/// A rule that checks values of type `T`.
///
/// Rules over `str` cover the text-like field kinds; rules over `bool`
/// cover checkboxes. Compose rules with [`Chain`].
pub trait Rule<T: ?Sized>: Send + Sync {
    /// Check the given value.
    fn check(&self, value: &T) -> RuleOutcome;

    /// The message this rule fails with.
    fn message(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Built-in rules
// ---------------------------------------------------------------------------

/// Fails on an empty string.
///
/// Whitespace-only strings count as empty unless [`Required::allow_whitespace`]
/// is set.
#[derive(Debug, Clone)]
pub struct Required {
    message: String,
    allow_whitespace: bool,
}

impl Default for Required {
    fn default() -> Self {
        Self::new()
    }
}

impl Required {
    /// Create a `Required` rule with the default message.
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: "This field is required.".to_string(),
            allow_whitespace: false,
        }
    }

    /// Use a declared message instead of the default.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Let whitespace-only strings pass.
    #[must_use]
    pub fn allow_whitespace(mut self) -> Self {
        self.allow_whitespace = true;
        self
    }
}

impl Rule<str> for Required {
    fn check(&self, value: &str) -> RuleOutcome {
        let is_empty = if self.allow_whitespace {
            value.is_empty()
        } else {
            value.trim().is_empty()
        };

        if is_empty {
            RuleOutcome::Fail(RuleError::new(CODE_REQUIRED, self.message.clone()))
        } else {
            RuleOutcome::Pass
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Fails on a string shorter than `min` characters.
#[derive(Debug, Clone)]
pub struct MinLength {
    min: usize,
    message: String,
}

impl MinLength {
    /// Create a `MinLength` rule with a default message.
    #[must_use]
    pub fn new(min: usize) -> Self {
        Self {
            min,
            message: format!("Must be at least {min} characters long."),
        }
    }

    /// Use a declared message instead of the default.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Rule<str> for MinLength {
    fn check(&self, value: &str) -> RuleOutcome {
        if value.chars().count() < self.min {
            RuleOutcome::Fail(RuleError::new(CODE_MIN_LENGTH, self.message.clone()))
        } else {
            RuleOutcome::Pass
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Fails on a syntactically malformed email address.
///
/// Heuristic check: one `@` with a non-empty local part, a domain containing
/// a dot, no empty domain labels, and a TLD of at least two characters.
/// An empty string passes; pair with [`Required`] for mandatory fields.
#[derive(Debug, Clone)]
pub struct Email {
    message: String,
}

impl Default for Email {
    fn default() -> Self {
        Self::new()
    }
}

impl Email {
    /// Create an `Email` rule with the default message.
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: "Must be a valid email address.".to_string(),
        }
    }

    /// Use a declared message instead of the default.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    fn fail(&self) -> RuleOutcome {
        RuleOutcome::Fail(RuleError::new(CODE_EMAIL, self.message.clone()))
    }
}

impl Rule<str> for Email {
    fn check(&self, value: &str) -> RuleOutcome {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return RuleOutcome::Pass;
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return self.fail();
        };

        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return self.fail();
        }

        let labels: Vec<&str> = domain.split('.').collect();
        if labels.iter().any(|label| label.is_empty()) {
            return self.fail();
        }

        if let Some(tld) = labels.last()
            && tld.len() < 2
        {
            return self.fail();
        }

        RuleOutcome::Pass
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Fails unless the flag is `true`. Used for must-accept checkboxes.
#[derive(Debug, Clone)]
pub struct Accepted {
    message: String,
}

impl Default for Accepted {
    fn default() -> Self {
        Self::new()
    }
}

impl Accepted {
    /// Create an `Accepted` rule with the default message.
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: "This box must be checked.".to_string(),
        }
    }

    /// Use a declared message instead of the default.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Rule<bool> for Accepted {
    fn check(&self, value: &bool) -> RuleOutcome {
        if *value {
            RuleOutcome::Pass
        } else {
            RuleOutcome::Fail(RuleError::new(CODE_ACCEPTED, self.message.clone()))
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

// ---------------------------------------------------------------------------
// Chain
// ---------------------------------------------------------------------------

/// An ordered set of rules checked front to back.
///
/// The first violated rule decides the outcome; later rules are not
/// consulted. An empty chain passes everything — unconstrained fields hold
/// an empty chain.
pub struct Chain<T: ?Sized> {
    rules: Vec<Box<dyn Rule<T>>>,
}

impl<T: ?Sized> Default for Chain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Chain<T> {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule to the chain.
    #[must_use]
    pub fn and(mut self, rule: impl Rule<T> + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Number of rules in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the chain has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T: ?Sized> Rule<T> for Chain<T> {
    fn check(&self, value: &T) -> RuleOutcome {
        for rule in &self.rules {
            let outcome = rule.check(value);
            if outcome.is_fail() {
                return outcome;
            }
        }
        RuleOutcome::Pass
    }

    fn message(&self) -> &str {
        self.rules
            .first()
            .map_or("Validation failed.", |rule| rule.message())
    }
}

impl<T: ?Sized> fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("rules", &format!("[{} rules]", self.rules.len()))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
