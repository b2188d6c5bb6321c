//! Rule functions for fields and whole forms.
//!
//! Rules are pure functions wrapped in cheaply clonable handles. They
//! encapsulate validation logic without side effects, so a compiled schema
//! can be shared and re-run any number of times.

use super::message::Message;
use super::state::FormState;
use std::fmt;
use std::sync::Arc;

/// Pure per-field validator: value in, optional message out.
///
/// The validator receives the value after trim semantics have been applied
/// (if the field asks for them). Returning `None` means the value is fine.
///
/// # Example
///
/// ```rust
/// use formset::core::{FieldValidator, Message};
///
/// let no_spaces = FieldValidator::new(|value: &str| {
///     value.contains(' ').then(|| Message::error("No spaces allowed"))
/// });
///
/// assert!(no_spaces.check("ada").is_none());
/// assert!(no_spaces.check("a da").is_some());
/// ```
#[derive(Clone)]
pub struct FieldValidator {
    check: Arc<dyn Fn(&str) -> Option<Message> + Send + Sync>,
}

impl FieldValidator {
    /// Create a validator from a pure function.
    ///
    /// The function must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&str) -> Option<Message> + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
        }
    }

    /// Run the validator against a value.
    pub fn check(&self, value: &str) -> Option<Message> {
        (self.check)(value)
    }
}

impl fmt::Debug for FieldValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldValidator(..)")
    }
}

/// Pure whole-form rule for cross-field checks.
///
/// The rule sees the state after every field-level rule ran and returns the
/// next state. By convention it keeps `messages` and only decides
/// `form_message`; see [`FormRule::from_message`] for that shape.
///
/// On entry `form_message` is `None` and `is_form_valid` reflects the field
/// rules only. The engine recomputes validity from the rule's output.
///
/// # Example
///
/// ```rust
/// use formset::core::{FormRule, FormState, Message};
///
/// let never_empty = FormRule::from_message(|state: &FormState| {
///     state
///         .values
///         .values()
///         .all(|v| v.is_empty())
///         .then(|| Message::warning("Nothing entered yet"))
/// });
///
/// let state = never_empty.apply(FormState::default());
/// assert!(state.form_message.is_some());
/// ```
#[derive(Clone)]
pub struct FormRule {
    apply: Arc<dyn Fn(FormState) -> FormState + Send + Sync>,
}

impl FormRule {
    /// Create a rule from a full state transformation.
    pub fn new<F>(apply: F) -> Self
    where
        F: Fn(FormState) -> FormState + Send + Sync + 'static,
    {
        Self {
            apply: Arc::new(apply),
        }
    }

    /// Create a rule that only decides the whole-form message.
    ///
    /// The returned message fully replaces any previous form message.
    pub fn from_message<F>(decide: F) -> Self
    where
        F: Fn(&FormState) -> Option<Message> + Send + Sync + 'static,
    {
        Self::new(move |state| {
            let message = decide(&state);
            state.with_form_message(message)
        })
    }

    /// Run the rule against a state.
    pub fn apply(&self, state: FormState) -> FormState {
        (self.apply)(state)
    }
}

impl fmt::Debug for FormRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FormRule(..)")
    }
}
