//! The form state snapshot.
//!
//! A `FormState` is a plain value. The engine never mutates one in place:
//! every validation pass consumes a snapshot and returns a new one.

use super::message::Message;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of a form: values, touch flags, messages and derived validity.
///
/// `values`, `filled` and `messages` always carry exactly the field names
/// declared by the schema that produced the state. `is_form_valid` is
/// recomputed by every validation pass and should not be set by callers.
///
/// Serializes with camelCase keys (`formMessage`, `isFormValid`) so it can
/// be dumped as-is for display.
///
/// # Example
///
/// ```rust
/// use formset::core::FormState;
///
/// let state = FormState::default()
///     .with_value("email", "ada@example.com")
///     .with_filled("email", true);
///
/// assert_eq!(state.value("email"), Some("ada@example.com"));
/// assert!(state.is_filled("email"));
/// assert!(!state.is_filled("password"));
/// ```
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    /// Current value per field, raw or trimmed
    pub values: BTreeMap<String, String>,
    /// Whether each field has lost focus at least once
    pub filled: BTreeMap<String, bool>,
    /// Most recent visible field-level message
    pub messages: BTreeMap<String, Option<Message>>,
    /// Most recent whole-form message
    pub form_message: Option<Message>,
    /// Derived validity of the whole form
    pub is_form_valid: bool,
}

impl FormState {
    /// Get the current value of a field.
    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Check whether a field has been touched. Unknown fields are untouched.
    pub fn is_filled(&self, field: &str) -> bool {
        self.filled.get(field).copied().unwrap_or(false)
    }

    /// Get the visible message of a field, if any.
    pub fn message(&self, field: &str) -> Option<&Message> {
        self.messages.get(field).and_then(Option::as_ref)
    }

    /// Iterate over fields currently showing an error message.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &Message)> {
        self.messages.iter().filter_map(|(field, message)| {
            message
                .as_ref()
                .filter(|m| m.is_error())
                .map(|m| (field.as_str(), m))
        })
    }

    /// Check if any visible message, field or form level, is an error.
    pub fn has_visible_errors(&self) -> bool {
        self.errors().next().is_some() || self.form_message.as_ref().is_some_and(Message::is_error)
    }

    /// Return a copy with one value replaced.
    ///
    /// This is a pure function - the original state is left untouched.
    pub fn with_value(&self, field: impl Into<String>, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.values.insert(field.into(), value.into());
        next
    }

    /// Return a copy with one touch flag replaced.
    pub fn with_filled(&self, field: impl Into<String>, filled: bool) -> Self {
        let mut next = self.clone();
        next.filled.insert(field.into(), filled);
        next
    }

    /// Return a copy with a different whole-form message.
    ///
    /// Intended for whole-form rules, which conventionally keep the field
    /// messages and only decide the form message.
    pub fn with_form_message(self, form_message: Option<Message>) -> Self {
        Self {
            form_message,
            ..self
        }
    }
}
