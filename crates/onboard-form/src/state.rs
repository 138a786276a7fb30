#![forbid(unsafe_code)]

//! The form state store.
//!
//! [`FormValues`] maps field names to their current values in schema
//! declaration order. It is created with every field at its empty default,
//! mutated only by the controller's input-change path, and serializes to
//! the JSON object used as the submission request body.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::schema::Schema;

// ---------------------------------------------------------------------------
// FieldValue
// ---------------------------------------------------------------------------

/// The current value of one field: a string for text-like kinds, a boolean
/// for checkboxes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Value of a text-like field.
    Text(String),
    /// Value of a checkbox.
    Flag(bool),
}

impl FieldValue {
    /// The string value, if this is a text-like field.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Flag(_) => None,
        }
    }

    /// The boolean value, if this is a checkbox field.
    #[must_use]
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Text(_) => None,
            Self::Flag(flag) => Some(*flag),
        }
    }
}

// ---------------------------------------------------------------------------
// InputChange
// ---------------------------------------------------------------------------

/// One input-change event, carrying both the raw string and the checked
/// flag the way a change event does. The controller stores the checked
/// boolean for checkbox fields and the raw string for everything else.
#[derive(Debug, Clone, Copy)]
pub struct InputChange<'a> {
    /// Name of the field the change targets.
    pub field: &'a str,
    /// The raw string value.
    pub value: &'a str,
    /// The checked state.
    pub checked: bool,
}

impl<'a> InputChange<'a> {
    /// A change to a text-like field.
    #[must_use]
    pub fn text(field: &'a str, value: &'a str) -> Self {
        Self {
            field,
            value,
            checked: false,
        }
    }

    /// A change to a checkbox field.
    #[must_use]
    pub fn toggle(field: &'a str, checked: bool) -> Self {
        Self {
            field,
            value: "",
            checked,
        }
    }
}

// ---------------------------------------------------------------------------
// FormValues
// ---------------------------------------------------------------------------

/// Current values of all fields, in schema declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    entries: Vec<(String, FieldValue)>,
}

impl FormValues {
    /// Create the initial form state: every declared field at its empty
    /// default.
    #[must_use]
    pub fn initial(schema: &Schema) -> Self {
        Self {
            entries: schema
                .fields()
                .iter()
                .map(|def| (def.name().to_string(), def.default_value()))
                .collect(),
        }
    }

    /// The current value of a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Overwrite a field's value. Returns `false` if the field is not
    /// declared; undeclared names are never inserted.
    pub(crate) fn set(&mut self, field: &str, value: FieldValue) -> bool {
        for (name, slot) in &mut self.entries {
            if name == field {
                *slot = value;
                return true;
            }
        }
        false
    }

    /// Iterate over `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The JSON object used as the submission request body.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for FormValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
