//! The validation engine.
//!
//! The engine turns a form state and a compiled schema into the next form
//! state. All functions here are pure: they take their full input, return a
//! new value and never touch shared state.
//!
//! # Key Concepts
//!
//! - **Field pass**: trim, required check and custom validator per field, in
//!   declaration order
//! - **Form pass**: the whole-form rule runs once, after every field
//! - **Display gating**: field messages only show once a field is filled,
//!   validity never waits for that
//!
//! Edits usually come as a stream of change and blur events. [`FormEngine`]
//! offers one method per event so callers do not have to assemble the next
//! state by hand.

mod config;
mod error;
mod pass;

pub use config::ValidateConfig;
pub use error::EditError;
pub use pass::{init_form, validate_form};

use crate::core::FormState;
use crate::schema::FormSchema;

/// A compiled schema bound to the validation passes.
///
/// # Example
///
/// ```rust
/// use formset::engine::FormEngine;
/// use formset::schema::{FieldSchema, FormSchema};
///
/// let schema = FormSchema::builder()
///     .field("name", FieldSchema::new().required().trim())
///     .build()
///     .unwrap();
/// let engine = FormEngine::new(schema);
///
/// let state = engine.init_form([("name", "")]);
/// let state = engine.change(&state, "name", " Ada ").unwrap();
/// assert_eq!(state.value("name"), Some(" Ada "));
///
/// let state = engine.blur(&state, "name").unwrap();
/// assert_eq!(state.value("name"), Some("Ada"));
/// assert!(state.is_form_valid);
/// ```
#[derive(Clone, Debug)]
pub struct FormEngine {
    schema: FormSchema,
}

impl FormEngine {
    pub fn new(schema: FormSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Build the initial state from the given values.
    pub fn init_form<I, K, V>(&self, initial_values: I) -> FormState
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        init_form(initial_values, &self.schema)
    }

    /// Run one validation pass.
    pub fn validate(&self, state: &FormState, config: ValidateConfig) -> FormState {
        validate_form(state, &self.schema, config)
    }

    /// Apply a value change while the user is typing.
    ///
    /// Validates without preprocessing, so whitespace being typed survives.
    pub fn change(
        &self,
        state: &FormState,
        field: &str,
        value: impl Into<String>,
    ) -> Result<FormState, EditError> {
        self.ensure_declared(field)?;
        Ok(self.validate(&state.with_value(field, value), ValidateConfig::typing()))
    }

    /// Apply a loss of focus: the field becomes filled and its value is
    /// preprocessed.
    pub fn blur(&self, state: &FormState, field: &str) -> Result<FormState, EditError> {
        self.ensure_declared(field)?;
        Ok(self.validate(&state.with_filled(field, true), ValidateConfig::committed()))
    }

    /// Mark every field filled, revealing all messages at once.
    ///
    /// Useful right before a submit attempt.
    pub fn touch_all(&self, state: &FormState) -> FormState {
        let mut touched = state.clone();
        for name in self.schema.field_names() {
            touched.filled.insert(name.to_string(), true);
        }
        self.validate(&touched, ValidateConfig::committed())
    }

    fn ensure_declared(&self, field: &str) -> Result<(), EditError> {
        if self.schema.contains(field) {
            Ok(())
        } else {
            Err(EditError::UnknownField {
                field: field.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Message;
    use crate::schema::{rules, FieldSchema};

    fn engine() -> FormEngine {
        let schema = FormSchema::builder()
            .field("email", FieldSchema::new().required().trim().validator(rules::email("Invalid email")))
            .field("bio", FieldSchema::new())
            .build()
            .unwrap();
        FormEngine::new(schema)
    }

    #[test]
    fn change_rejects_unknown_field() {
        let engine = engine();
        let state = engine.init_form([("email", "")]);

        let result = engine.change(&state, "phone", "123");
        assert_eq!(
            result,
            Err(EditError::UnknownField {
                field: "phone".to_string()
            })
        );
    }

    #[test]
    fn blur_rejects_unknown_field() {
        let engine = engine();
        let state = engine.init_form([("email", "")]);

        assert!(engine.blur(&state, "phone").is_err());
    }

    #[test]
    fn change_before_blur_shows_nothing() {
        let engine = engine();
        let state = engine.init_form([("email", "")]);

        let state = engine.change(&state, "email", "not-an-email").unwrap();
        assert!(state.message("email").is_none());
        assert!(!state.is_form_valid);
    }

    #[test]
    fn blur_reveals_and_change_updates_message() {
        let engine = engine();
        let state = engine.init_form([("email", "")]);

        let state = engine.change(&state, "email", "ada").unwrap();
        let state = engine.blur(&state, "email").unwrap();
        assert_eq!(state.message("email"), Some(&Message::error("Invalid email")));

        let state = engine.change(&state, "email", "ada@example.com ").unwrap();
        assert!(state.message("email").is_none());
        assert_eq!(state.value("email"), Some("ada@example.com "));
        assert!(state.is_form_valid);
    }

    #[test]
    fn filled_is_never_reset() {
        let engine = engine();
        let state = engine.init_form([("email", "")]);
        let state = engine.blur(&state, "email").unwrap();

        let state = engine.change(&state, "email", "").unwrap();
        let state = engine.validate(&state, ValidateConfig::default());
        assert!(state.is_filled("email"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn engine_types_are_thread_safe() {
        assert_send_sync::<FormSchema>();
        assert_send_sync::<FormEngine>();
        assert_send_sync::<FormState>();
    }

    #[test]
    fn engine_is_shared_across_threads() {
        let engine = std::sync::Arc::new(engine());

        let handles: Vec<_> = ["ada@example.com", "ada"]
            .into_iter()
            .map(|email| {
                let engine = std::sync::Arc::clone(&engine);
                std::thread::spawn(move || {
                    let state = engine.init_form([("email", email)]);
                    state.is_form_valid
                })
            })
            .collect();

        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![true, false]);
    }

    #[test]
    fn touch_all_reveals_every_message() {
        let engine = engine();
        let state = engine.init_form([("email", "")]);
        assert!(state.errors().next().is_none());

        let state = engine.touch_all(&state);
        assert!(state.is_filled("email"));
        assert!(state.is_filled("bio"));
        assert_eq!(
            state.message("email"),
            Some(&Message::error("email is required"))
        );
    }
}
