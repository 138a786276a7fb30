#![forbid(unsafe_code)]

//! Per-field recency tracking.
//!
//! Every input-change bumps the target field's monotonic [`Revision`]; a
//! validation outcome is applied only if it carries the field's current
//! revision. A slower validation finishing after a newer one is discarded
//! rather than cancelled — cancellation by recency.
//!
//! # Invariants
//!
//! - Revisions are strictly monotonic per field.
//! - Revision 0 means the field has never changed.

use std::collections::HashMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Revision
// ---------------------------------------------------------------------------

/// A monotonically increasing per-field input version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Revision(u64);

impl Revision {
    /// The revision of a field that has never changed.
    pub const INITIAL: Self = Self(0);

    /// The raw counter value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// FieldTicket
// ---------------------------------------------------------------------------

/// A handle identifying one validation request: the field plus the revision
/// its value had when validation was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTicket {
    /// The field the validation targets.
    pub field: String,
    /// The revision the validated value carried.
    pub revision: Revision,
}

// ---------------------------------------------------------------------------
// FieldRevisions
// ---------------------------------------------------------------------------

/// Current revision per field name.
#[derive(Debug, Clone, Default)]
pub struct FieldRevisions {
    current: HashMap<String, u64>,
}

impl FieldRevisions {
    /// Create an empty ledger; every field starts at [`Revision::INITIAL`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bump a field's revision, returning the new value.
    pub fn bump(&mut self, field: &str) -> Revision {
        let counter = self.current.entry(field.to_string()).or_insert(0);
        *counter += 1;
        Revision(*counter)
    }

    /// The field's current revision.
    #[must_use]
    pub fn current(&self, field: &str) -> Revision {
        Revision(self.current.get(field).copied().unwrap_or(0))
    }

    /// Whether the given revision is the field's current one.
    #[must_use]
    pub fn is_current(&self, field: &str, revision: Revision) -> bool {
        self.current(field) == revision
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
