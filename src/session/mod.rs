//! Form sessions: the imperative shell around the pure engine.
//!
//! A session owns the current state of one form instance and applies edits
//! one at a time, so two validation passes can never race to become the
//! current state. Every applied edit is recorded in an immutable history.

mod history;

pub use history::{FormEvent, FormHistory, FormTransition};

use crate::core::FormState;
use crate::engine::{EditError, FormEngine, ValidateConfig};
use chrono::Utc;
use tracing::debug;

/// One live form: the engine, the current state and the edit history.
///
/// # Example
///
/// ```rust
/// use formset::engine::FormEngine;
/// use formset::schema::{FieldSchema, FormSchema};
/// use formset::session::FormSession;
///
/// let schema = FormSchema::builder()
///     .field("name", FieldSchema::new().required().trim())
///     .build()
///     .unwrap();
/// let mut session = FormSession::new(FormEngine::new(schema), [("name", "")]);
///
/// session.change("name", "Ada").unwrap();
/// session.blur("name").unwrap();
///
/// assert!(session.state().is_form_valid);
/// assert_eq!(session.history().transitions().len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct FormSession {
    engine: FormEngine,
    current: FormState,
    history: FormHistory,
}

impl FormSession {
    /// Create a session with a freshly initialized form.
    pub fn new<I, K, V>(engine: FormEngine, initial_values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let current = engine.init_form(initial_values);
        let history = FormHistory::new().record(FormTransition {
            event: FormEvent::Init,
            was_valid: false,
            is_valid: current.is_form_valid,
            timestamp: Utc::now(),
        });
        Self {
            engine,
            current,
            history,
        }
    }

    /// Get current state (pure)
    pub fn state(&self) -> &FormState {
        &self.current
    }

    /// Get edit history (pure)
    pub fn history(&self) -> &FormHistory {
        &self.history
    }

    pub fn engine(&self) -> &FormEngine {
        &self.engine
    }

    /// Apply a value change while typing.
    pub fn change(&mut self, field: &str, value: impl Into<String>) -> Result<&FormState, EditError> {
        let next = self.engine.change(&self.current, field, value)?;
        Ok(self.apply(
            FormEvent::Change {
                field: field.to_string(),
            },
            next,
        ))
    }

    /// Apply a loss of focus.
    pub fn blur(&mut self, field: &str) -> Result<&FormState, EditError> {
        let next = self.engine.blur(&self.current, field)?;
        Ok(self.apply(
            FormEvent::Blur {
                field: field.to_string(),
            },
            next,
        ))
    }

    /// Mark every field filled.
    pub fn touch_all(&mut self) -> &FormState {
        let next = self.engine.touch_all(&self.current);
        self.apply(FormEvent::TouchAll, next)
    }

    /// Revalidate the current state without an edit.
    pub fn revalidate(&mut self, config: ValidateConfig) -> &FormState {
        let next = self.engine.validate(&self.current, config);
        self.apply(FormEvent::Revalidate, next)
    }

    fn apply(&mut self, event: FormEvent, next: FormState) -> &FormState {
        let transition = FormTransition {
            event,
            was_valid: self.current.is_form_valid,
            is_valid: next.is_form_valid,
            timestamp: Utc::now(),
        };
        if transition.changed_validity() {
            debug!(event = ?transition.event, valid = transition.is_valid, "form validity changed");
        }
        self.history = self.history.record(transition);
        self.current = next;
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Message;
    use crate::schema::{rules, FieldSchema, FormSchema};

    fn session() -> FormSession {
        let schema = FormSchema::builder()
            .field(
                "code",
                FieldSchema::new()
                    .required()
                    .trim()
                    .validator(rules::length(Some(4), Some(4), "Four characters")),
            )
            .build()
            .unwrap();
        FormSession::new(FormEngine::new(schema), [("code", "")])
    }

    #[test]
    fn new_session_records_init() {
        let session = session();

        assert_eq!(session.history().events(), vec![&FormEvent::Init]);
        assert!(!session.state().is_form_valid);
    }

    #[test]
    fn edits_update_current_state() {
        let mut session = session();

        session.change("code", "ab").unwrap();
        session.blur("code").unwrap();
        assert_eq!(
            session.state().message("code"),
            Some(&Message::error("Four characters"))
        );

        session.change("code", "abcd").unwrap();
        assert!(session.state().message("code").is_none());
        assert!(session.state().is_form_valid);
    }

    #[test]
    fn failed_edit_leaves_session_untouched() {
        let mut session = session();
        let before = session.state().clone();

        assert!(session.change("nope", "x").is_err());
        assert_eq!(session.state(), &before);
        assert_eq!(session.history().transitions().len(), 1);
    }

    #[test]
    fn history_tracks_validity_flips() {
        let mut session = session();
        session.change("code", "abcd").unwrap();
        session.blur("code").unwrap();

        let flips: Vec<_> = session
            .history()
            .transitions()
            .iter()
            .filter(|t| t.changed_validity())
            .map(|t| t.event.clone())
            .collect();

        assert_eq!(
            flips,
            vec![FormEvent::Change {
                field: "code".to_string()
            }]
        );
    }

    #[test]
    fn touch_all_and_revalidate_are_recorded() {
        let mut session = session();
        session.touch_all();
        session.revalidate(ValidateConfig::default());

        assert_eq!(
            session.history().events(),
            vec![&FormEvent::Init, &FormEvent::TouchAll, &FormEvent::Revalidate]
        );
        assert!(session.state().is_filled("code"));
    }
}
