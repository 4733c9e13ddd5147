//! Field-level validation and input sanitization.

use crate::field::Field;
use std::collections::BTreeMap;

/// Message recorded for a field left empty.
pub const EMPTY_FIELD_MESSAGE: &str = "Field can't be empty.";

/// Checks a single field value.
///
/// A value is invalid if and only if it is empty. The field name is part of
/// the signature so callers validate an explicit `(field, value)` pair.
#[must_use]
pub fn validate(_field: Field, value: &str) -> Option<&'static str> {
    value.is_empty().then_some(EMPTY_FIELD_MESSAGE)
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    messages: BTreeMap<Field, String>,
}

impl FieldErrors {
    /// Records the outcome of validating `field`; `None` clears it.
    pub fn record(&mut self, field: Field, message: Option<&str>) {
        match message {
            Some(message) => {
                self.messages.insert(field, message.to_string());
            }
            None => {
                self.messages.remove(&field);
            }
        }
    }

    /// Validates `value` for `field` and records the result.
    ///
    /// Returns `true` when the value is invalid.
    pub fn check(&mut self, field: Field, value: &str) -> bool {
        let message = validate(field, value);
        self.record(field, message);
        message.is_some()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.messages.get(&field).map(String::as_str)
    }

    /// Returns whether any of `fields` has a recorded error.
    #[must_use]
    pub fn any_of(&self, fields: &[Field]) -> bool {
        fields.iter().any(|field| self.messages.contains_key(field))
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

/// A value with spaces removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub value: String,
    /// Whether at least one space was stripped.
    pub removed: bool,
}

/// Removes every space character from `raw`.
///
/// Only U+0020 is stripped; tabs and other whitespace are kept as typed.
#[must_use]
pub fn strip_spaces(raw: &str) -> Sanitized {
    if raw.contains(' ') {
        Sanitized {
            value: raw.replace(' ', ""),
            removed: true,
        }
    } else {
        Sanitized {
            value: raw.to_string(),
            removed: false,
        }
    }
}
